//! Display formatting for prices and derived metrics.

use serde::Serialize;

use crate::models::{MetricsResult, Trend};

/// Format a dollar amount as Canadian currency: grouped thousands, no
/// trailing zero cents (`$850,000`, `$1,234.5`, `-$12.05`).
pub fn format_price(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    let frac = cents % 100;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };

    if frac == 0 {
        format!("{}${}", sign, whole)
    } else if frac % 10 == 0 {
        format!("{}${}.{}", sign, whole, frac / 10)
    } else {
        format!("{}${}.{:02}", sign, whole, frac)
    }
}

/// Format a dollar amount rounded to whole dollars (`$110,333`).
pub fn format_whole_dollars(value: f64) -> String {
    format_price(value.round())
}

/// Format a percentage with one decimal place (`21.0%`).
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

fn group_thousands(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut groups = Vec::new();
    while n > 0 {
        groups.push(n % 1000);
        n /= 1000;
    }
    let mut out = groups.pop().map(|g| g.to_string()).unwrap_or_default();
    for g in groups.iter().rev() {
        out.push_str(&format!(",{:03}", g));
    }
    out
}

// ---------------------------------------------------------------------------
// MetricItem
// ---------------------------------------------------------------------------

/// Colour hint for a metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
    Default,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Positive => "positive",
            Tone::Negative => "negative",
            Tone::Neutral => "neutral",
            Tone::Default => "default",
        }
    }

    fn non_negative(value: f64) -> Self {
        if value >= 0.0 {
            Tone::Positive
        } else {
            Tone::Negative
        }
    }
}

/// One labelled row of the metrics panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricItem {
    pub label: String,
    pub value: String,
    pub tone: Tone,
}

impl MetricItem {
    fn new(label: impl Into<String>, value: impl Into<String>, tone: Tone) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            tone,
        }
    }
}

/// Peak drawdowns shallower than this still read as healthy.
const PEAK_TOLERANCE_PCT: f64 = -5.0;

/// Build the labelled metrics panel for a computed result.
///
/// `history_years` is the span shown in the total-return label (see
/// [`history_span_years`](crate::metrics::history_span_years)). A missing
/// construction year renders as `n/a`.
pub fn metric_items(
    metrics: &MetricsResult,
    history_years: Option<i32>,
    years_since_built: Option<i32>,
) -> Vec<MetricItem> {
    let trend_tone = match metrics.trend {
        Trend::Up => Tone::Positive,
        Trend::Down => Tone::Negative,
        Trend::Flat => Tone::Neutral,
    };
    let return_label = match history_years {
        Some(years) => format!("Total Return {}Y", years),
        None => "Total Return".to_string(),
    };
    let peak_tone = if metrics.current_vs_peak_pct >= PEAK_TOLERANCE_PCT {
        Tone::Positive
    } else {
        Tone::Negative
    };

    vec![
        MetricItem::new("Trend", metrics.trend.as_str(), trend_tone),
        MetricItem::new(
            return_label,
            format_percent(metrics.total_return_pct),
            Tone::non_negative(metrics.total_return_pct),
        ),
        MetricItem::new(
            "Recent Change",
            format_percent(metrics.recent_change_pct),
            Tone::non_negative(metrics.recent_change_pct),
        ),
        MetricItem::new(
            "Current vs Peak",
            format_percent(metrics.current_vs_peak_pct),
            peak_tone,
        ),
        MetricItem::new("Volatility", format_percent(metrics.volatility_pct), Tone::Default),
        MetricItem::new(
            "Price Range",
            format!(
                "{} - {}",
                format_price(metrics.min_price),
                format_price(metrics.max_price)
            ),
            Tone::Default,
        ),
        MetricItem::new(
            "Average Price",
            format_whole_dollars(metrics.average_price),
            Tone::Default,
        ),
        MetricItem::new(
            "Years Since Built",
            years_since_built
                .map(|y| y.to_string())
                .unwrap_or_else(|| "n/a".to_string()),
            Tone::Default,
        ),
    ]
}

/// Message shown in place of the panel when there is no price history.
pub const NO_DATA_MESSAGE: &str = "No price history available";
