use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PricePoint — One observed price on one date
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// An ordered price series for one property, oldest first.
///
/// Ordering is the caller's responsibility; see
/// [`validate_history`](crate::metrics::validate_history).
pub type PriceHistory = [PricePoint];

// ---------------------------------------------------------------------------
// Trend — Latest price relative to the series average
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Up => "UP",
            Trend::Down => "DOWN",
            Trend::Flat => "FLAT",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MetricsResult — Derived statistics over a price history
// ---------------------------------------------------------------------------

/// Statistics derived from a [`PriceHistory`].
///
/// Recomputed on every call to [`compute_metrics`](crate::metrics::compute_metrics);
/// percentages are expressed as percent values (`21.0` means 21%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MetricsResult {
    pub trend: Trend,
    pub total_return_pct: f64,
    pub recent_change_pct: f64,
    pub current_vs_peak_pct: f64,
    pub volatility_pct: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub average_price: f64,
}
