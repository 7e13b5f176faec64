//! Derived financial metrics over a property's price history.
//!
//! Everything here is pure: no I/O, no shared state, and the same input
//! always yields the same output. Sums are accumulated in series order.
//!
//! Percentages with a zero denominator are defined as `0.0`. That applies
//! uniformly to volatility, total return, recent change and current-vs-peak.

use chrono::{Datelike, NaiveDate};

use crate::error::{Result, ValidationError};
use crate::models::{MetricsResult, PriceHistory, Trend};

/// Width of the FLAT band around the average price.
const TREND_BAND: f64 = 1.05;

/// Compute metrics for a price history.
///
/// Returns `None` for an empty history, which callers render as "no data".
/// The history is expected to be ordered by date and to hold finite,
/// non-negative prices; see [`validate_history`].
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use lynapp_sdk::metrics::compute_metrics;
/// use lynapp_sdk::models::{PricePoint, Trend};
///
/// let d = |m| NaiveDate::from_ymd_opt(2023, m, 1).unwrap();
/// let history = [
///     PricePoint::new(d(1), 100_000.0),
///     PricePoint::new(d(6), 110_000.0),
///     PricePoint::new(d(12), 121_000.0),
/// ];
/// let m = compute_metrics(&history).unwrap();
/// assert_eq!(m.trend, Trend::Up);
/// ```
pub fn compute_metrics(history: &PriceHistory) -> Option<MetricsResult> {
    let (first, last) = match (history.first(), history.last()) {
        (Some(f), Some(l)) => (f.price, l.price),
        _ => return None,
    };
    let n = history.len() as f64;

    let mut sum = 0.0;
    let mut min_price = f64::INFINITY;
    let mut max_price = f64::NEG_INFINITY;
    for point in history {
        sum += point.price;
        min_price = min_price.min(point.price);
        max_price = max_price.max(point.price);
    }
    let average_price = sum / n;

    let mut squared = 0.0;
    for point in history {
        let deviation = point.price - average_price;
        squared += deviation * deviation;
    }
    let std_dev = (squared / n).sqrt();

    let recent_change_pct = match history.len() {
        0 | 1 => 0.0,
        len => percent_change(history[len - 2].price, last),
    };

    Some(MetricsResult {
        trend: classify_trend(last, average_price),
        total_return_pct: percent_change(first, last),
        recent_change_pct,
        current_vs_peak_pct: percent_change(max_price, last),
        volatility_pct: ratio_pct(std_dev, average_price),
        min_price,
        max_price,
        average_price,
    })
}

/// Classify `last` against `average` with the asymmetric 5% band.
///
/// Up above `average * 1.05`, down below `average / 1.05`.
pub fn classify_trend(last: f64, average: f64) -> Trend {
    if last > average * TREND_BAND {
        Trend::Up
    } else if last < average / TREND_BAND {
        Trend::Down
    } else {
        Trend::Flat
    }
}

/// Check that a history is safe to feed to [`compute_metrics`].
///
/// Rejects non-finite prices, negative prices and dates that go backwards.
/// Repeated dates are accepted.
pub fn validate_history(history: &PriceHistory) -> std::result::Result<(), ValidationError> {
    let mut previous: Option<NaiveDate> = None;
    for (index, point) in history.iter().enumerate() {
        if !point.price.is_finite() {
            return Err(ValidationError::NonFinitePrice { index });
        }
        if point.price < 0.0 {
            return Err(ValidationError::NegativePrice {
                index,
                price: point.price,
            });
        }
        if let Some(prev) = previous {
            if point.date < prev {
                return Err(ValidationError::OutOfOrder {
                    index,
                    date: point.date,
                    previous: prev,
                });
            }
        }
        previous = Some(point.date);
    }
    Ok(())
}

/// Validate a history and compute its metrics.
pub fn compute_validated_metrics(history: &PriceHistory) -> Result<Option<MetricsResult>> {
    validate_history(history)?;
    Ok(compute_metrics(history))
}

/// Least-squares line of price against point index, evaluated at each index.
///
/// A single point yields its own price; an empty history yields nothing.
pub fn trend_line(history: &PriceHistory) -> Vec<f64> {
    let n = history.len();
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![history[0].price];
    }

    let nf = n as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
    for (i, point) in history.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += point.price;
        sum_xy += x * point.price;
        sum_xx += x * x;
    }

    let slope = (nf * sum_xy - sum_x * sum_y) / (nf * sum_xx - sum_x * sum_x);
    let intercept = (sum_y - slope * sum_x) / nf;

    (0..n).map(|i| slope * i as f64 + intercept).collect()
}

/// Calendar years between the first observation and `today`.
pub fn history_span_years(history: &PriceHistory, today: NaiveDate) -> Option<i32> {
    history.first().map(|p| today.year() - p.date.year())
}

/// Years elapsed since construction, when the construction year is known.
pub fn years_since_built(year_built: Option<i32>, today: NaiveDate) -> Option<i32> {
    year_built
        .map(|year| today.year() - year)
        .filter(|years| *years >= 0)
}

fn percent_change(from: f64, to: f64) -> f64 {
    ratio_pct(to - from, from)
}

fn ratio_pct(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        100.0 * numerator / denominator
    }
}
