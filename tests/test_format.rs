//! Price, percent and metrics-panel formatting.

mod common;

use common::history;
use lynapp_sdk::compute_metrics;
use lynapp_sdk::format::{
    format_percent, format_price, format_whole_dollars, metric_items, Tone, NO_DATA_MESSAGE,
};

#[test]
fn prices_group_thousands_and_trim_cents() {
    assert_eq!(format_price(850_000.0), "$850,000");
    assert_eq!(format_price(2_500_000.0), "$2,500,000");
    assert_eq!(format_price(1_234.5), "$1,234.5");
    assert_eq!(format_price(999.99), "$999.99");
    assert_eq!(format_price(12.05), "$12.05");
    assert_eq!(format_price(0.0), "$0");
    assert_eq!(format_price(-1_500.0), "-$1,500");
}

#[test]
fn whole_dollars_round() {
    assert_eq!(format_whole_dollars(110_333.333), "$110,333");
    assert_eq!(format_whole_dollars(1_000_000.5), "$1,000,001");
}

#[test]
fn percents_have_one_decimal() {
    assert_eq!(format_percent(21.0), "21.0%");
    assert_eq!(format_percent(-3.14159), "-3.1%");
    assert_eq!(format_percent(0.0), "0.0%");
}

#[test]
fn metric_panel_for_rising_history() {
    let h = history(&[(2023, 1, 100_000.0), (2023, 6, 110_000.0), (2024, 1, 121_000.0)]);
    let m = compute_metrics(&h).unwrap();
    let items = metric_items(&m, Some(3), None);

    let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Trend",
            "Total Return 3Y",
            "Recent Change",
            "Current vs Peak",
            "Volatility",
            "Price Range",
            "Average Price",
            "Years Since Built",
        ]
    );

    assert_eq!(items[0].value, "UP");
    assert_eq!(items[0].tone, Tone::Positive);
    assert_eq!(items[1].value, "21.0%");
    assert_eq!(items[2].value, "10.0%");
    assert_eq!(items[3].value, "0.0%");
    assert_eq!(items[3].tone, Tone::Positive);
    assert_eq!(items[4].tone, Tone::Default);
    assert_eq!(items[5].value, "$100,000 - $121,000");
    assert_eq!(items[6].value, "$110,333");
    assert_eq!(items[7].value, "n/a");
}

#[test]
fn metric_panel_tones_for_falling_history() {
    let h = history(&[(2023, 1, 500.0), (2023, 6, 480.0), (2024, 1, 400.0)]);
    let m = compute_metrics(&h).unwrap();
    let items = metric_items(&m, None, Some(12));

    assert_eq!(items[0].tone, Tone::Negative);
    assert_eq!(items[1].label, "Total Return");
    assert_eq!(items[1].tone, Tone::Negative);
    assert_eq!(items[2].tone, Tone::Negative);
    assert_eq!(items[3].value, "-20.0%");
    assert_eq!(items[3].tone, Tone::Negative);
    assert_eq!(items[7].value, "12");
}

#[test]
fn peak_tolerance_is_five_percent() {
    let h = history(&[(2023, 1, 100.0), (2023, 6, 95.0)]);
    let m = compute_metrics(&h).unwrap();
    let items = metric_items(&m, Some(1), None);
    assert_eq!(items[3].value, "-5.0%");
    assert_eq!(items[3].tone, Tone::Positive);
    assert_eq!(items[0].tone, Tone::Neutral);
}

#[test]
fn tone_classes() {
    assert_eq!(Tone::Positive.as_str(), "positive");
    assert_eq!(Tone::Neutral.as_str(), "neutral");
    assert_eq!(NO_DATA_MESSAGE, "No price history available");
}
