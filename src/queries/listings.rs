//! Listing queries against the listings REST service.

use reqwest::Method;
use tracing::debug;

use crate::config;
use crate::error::{LynappError, Result};
use crate::metrics;
use crate::models::{Listing, MetricsResult, NewListing, PricePoint};
use crate::queries::filter::{Page, SearchListingsParams};

/// Snapshot name for the full listings response.
const LISTINGS_SNAPSHOT: &str = "listings";

// ---------------------------------------------------------------------------
// ListingQuery
// ---------------------------------------------------------------------------

/// Query interface for property listings.
pub struct ListingQuery<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> ListingQuery<'a> {
    /// Create a new `ListingQuery` bound to the given connection.
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    // -- Reads -------------------------------------------------------------

    /// Fetch every listing.
    ///
    /// The response is kept as an offline snapshot; in offline mode the
    /// last snapshot is returned.
    pub fn list(&self) -> Result<Vec<Listing>> {
        let value = self
            .conn
            .get_with_snapshot(&config::listings_endpoint(), LISTINGS_SNAPSHOT)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Fetch a single listing by id.
    ///
    /// Offline, the listing is looked up in the listings snapshot.
    pub fn get(&self, id: i64) -> Result<Listing> {
        if self.conn.is_offline() {
            return self
                .list()?
                .into_iter()
                .find(|l| l.id == id)
                .ok_or_else(|| LynappError::NotFound(format!("Listing {} not in snapshot", id)));
        }
        self.conn.get_json(&config::listing_endpoint(id), &[])
    }

    /// Listings whose city contains `city`, case-insensitively.
    ///
    /// The service answers an empty match with 404; that becomes an empty
    /// vector. A blank query returns every listing.
    pub fn search_by_city(&self, city: &str) -> Result<Vec<Listing>> {
        let city = city.trim();
        if city.is_empty() {
            return self.list();
        }
        if self.conn.is_offline() {
            let needle = city.to_lowercase();
            return Ok(self
                .list()?
                .into_iter()
                .filter(|l| l.city.to_lowercase().contains(&needle))
                .collect());
        }

        match self
            .conn
            .get_json::<Vec<Listing>>(&config::search_endpoint(), &[("city", city)])
        {
            Ok(listings) => Ok(listings),
            Err(LynappError::NotFound(msg)) => {
                debug!(city, %msg, "no listings for city");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Search by city, then filter, sort and page locally.
    pub fn search(&self, params: &SearchListingsParams) -> Result<Page<Listing>> {
        params.validate()?;
        let listings = match params.city.as_deref() {
            Some(city) => self.search_by_city(city)?,
            None => self.list()?,
        };
        params.apply(listings)
    }

    /// Distinct city names containing `query`, case-insensitively, in the
    /// order they first appear.
    pub fn city_suggestions(&self, query: &str) -> Result<Vec<String>> {
        Ok(city_suggestions(&self.list()?, query))
    }

    // -- Price history -----------------------------------------------------

    /// The price series of a listing's first history record.
    pub fn price_history(&self, id: i64) -> Result<Vec<PricePoint>> {
        Ok(self.get(id)?.price_history().to_vec())
    }

    /// Validated metrics for a listing; `None` when it has no history.
    pub fn metrics(&self, id: i64) -> Result<Option<MetricsResult>> {
        metrics::compute_validated_metrics(&self.price_history(id)?)
    }

    // -- Writes ------------------------------------------------------------

    pub fn create(&self, listing: &NewListing) -> Result<Listing> {
        self.conn
            .send_json(Method::POST, &config::create_endpoint(), listing)
    }

    pub fn update(&self, id: i64, listing: &NewListing) -> Result<Listing> {
        self.conn
            .send_json(Method::PUT, &config::update_endpoint(id), listing)
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        self.conn.delete(&config::delete_endpoint(id))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Distinct, non-empty cities containing `query` (case-insensitive).
pub fn city_suggestions(listings: &[Listing], query: &str) -> Vec<String> {
    let needle = query.to_lowercase();
    let mut seen: Vec<String> = Vec::new();
    for listing in listings {
        let city = &listing.city;
        if city.is_empty() || !city.to_lowercase().contains(&needle) {
            continue;
        }
        if !seen.iter().any(|c| c == city) {
            seen.push(city.clone());
        }
    }
    seen
}
