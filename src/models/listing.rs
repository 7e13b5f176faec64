use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::price::{PriceHistory, PricePoint};

// ---------------------------------------------------------------------------
// Listing — A property listing as served by the listings API
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Listing {
    pub id: i64,
    pub title: String,
    pub street_address: String,
    pub city: String,
    pub province: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "de_decimal", serialize_with = "ser_decimal")]
    pub current_price: f64,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub square_feet: i32,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub price_histories: Vec<PriceHistoryRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_built: Option<i32>,
}

impl Listing {
    /// The price series of the first history record, or an empty slice.
    pub fn price_history(&self) -> &PriceHistory {
        self.price_histories
            .first()
            .map(|h| h.price_values.as_slice())
            .unwrap_or(&[])
    }

    /// `street_address city province`, as used for map and search labels.
    pub fn full_address(&self) -> String {
        format!("{} {} {}", self.street_address, self.city, self.province)
    }

    /// The full address as a Walk Score badge slug: whitespace runs become
    /// `-`, then anything outside `[A-Za-z0-9-]` is dropped.
    pub fn score_slug(&self) -> String {
        let full_address = self.full_address();
        let dashed = whitespace_pattern().replace_all(&full_address, "-");
        slug_reject_pattern().replace_all(&dashed, "").into_owned()
    }
}

fn whitespace_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

fn slug_reject_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^a-zA-Z0-9-]").expect("slug pattern is valid"))
}

// ---------------------------------------------------------------------------
// NewListing — Writable listing fields for create/update requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NewListing {
    pub title: String,
    pub street_address: String,
    pub city: String,
    pub province: String,
    pub description: String,
    #[serde(deserialize_with = "de_decimal", serialize_with = "ser_decimal")]
    pub current_price: f64,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub square_feet: i32,
    pub image_url: String,
}

impl From<&Listing> for NewListing {
    fn from(l: &Listing) -> Self {
        Self {
            title: l.title.clone(),
            street_address: l.street_address.clone(),
            city: l.city.clone(),
            province: l.province.clone(),
            description: l.description.clone(),
            current_price: l.current_price,
            bedrooms: l.bedrooms,
            bathrooms: l.bathrooms,
            square_feet: l.square_feet,
            image_url: l.image_url.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// PriceHistoryRecord — Stored price series attached to a listing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistoryRecord {
    pub id: i64,
    /// Stored either as a JSON array or as a JSON-encoded string of one.
    #[serde(default, deserialize_with = "de_price_values")]
    pub price_values: Vec<PricePoint>,
    #[serde(default)]
    pub date_recorded: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// Serde helpers
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum DecimalRepr {
    Number(f64),
    Text(String),
}

/// Decimal fields arrive as strings (`"250000.00"`) or plain numbers.
fn de_decimal<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match DecimalRepr::deserialize(deserializer)? {
        DecimalRepr::Number(n) => Ok(n),
        DecimalRepr::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid decimal '{}': {}", s, e))),
    }
}

fn ser_decimal<S>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("{:.2}", value))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PriceValuesRepr {
    List(Vec<PricePoint>),
    Encoded(String),
    Null(()),
}

fn de_price_values<'de, D>(deserializer: D) -> std::result::Result<Vec<PricePoint>, D::Error>
where
    D: Deserializer<'de>,
{
    match PriceValuesRepr::deserialize(deserializer)? {
        PriceValuesRepr::List(points) => Ok(points),
        PriceValuesRepr::Encoded(s) if s.trim().is_empty() => Ok(Vec::new()),
        PriceValuesRepr::Encoded(s) => serde_json::from_str(&s).map_err(serde::de::Error::custom),
        PriceValuesRepr::Null(()) => Ok(Vec::new()),
    }
}
