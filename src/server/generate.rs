//! Synthetic forecast generator
//!
//! Draws a bounded-range random temperature series starting tomorrow. Each
//! request gets its own draw; the forecast and stats endpoints never share
//! one.

use chrono::{Days, Local};

use crate::data::{temperature_f_from_c, ForecastItem};

/// Condition labels, coldest to hottest
pub const SUMMARIES: [&str; 10] = [
    "Freezing",
    "Bracing",
    "Chilly",
    "Cool",
    "Mild",
    "Warm",
    "Balmy",
    "Hot",
    "Sweltering",
    "Scorching",
];

/// Lower bound of generated Celsius temperatures (inclusive)
pub const MIN_TEMPERATURE_C: i32 = -20;
/// Upper bound of generated Celsius temperatures (inclusive)
pub const MAX_TEMPERATURE_C: i32 = 54;

/// Generates `days` forecast items with sequential dates starting tomorrow.
pub fn generate_items(days: u16) -> Vec<ForecastItem> {
    let today = Local::now().date_naive();

    (1..=u64::from(days))
        .map(|offset| {
            let temperature_c = fastrand::i32(MIN_TEMPERATURE_C..=MAX_TEMPERATURE_C);
            ForecastItem {
                date: today + Days::new(offset),
                temperature_c,
                temperature_f: temperature_f_from_c(temperature_c),
                summary: Some(SUMMARIES[fastrand::usize(..SUMMARIES.len())].to_string()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generates_requested_number_of_items() {
        assert_eq!(generate_items(0).len(), 0);
        assert_eq!(generate_items(1).len(), 1);
        assert_eq!(generate_items(14).len(), 14);
    }

    #[test]
    fn test_dates_are_sequential_starting_tomorrow() {
        let items = generate_items(5);
        let tomorrow = Local::now().date_naive() + Days::new(1);

        assert_eq!(items[0].date, tomorrow);
        for pair in items.windows(2) {
            assert_eq!(pair[1].date, pair[0].date + Days::new(1));
        }
    }

    #[test]
    fn test_temperatures_stay_in_bounds() {
        for item in generate_items(200) {
            assert!(
                (MIN_TEMPERATURE_C..=MAX_TEMPERATURE_C).contains(&item.temperature_c),
                "temperature {} out of range",
                item.temperature_c
            );
        }
    }

    #[test]
    fn test_fahrenheit_matches_conversion() {
        for item in generate_items(50) {
            assert_eq!(item.temperature_f, temperature_f_from_c(item.temperature_c));
        }
    }

    #[test]
    fn test_every_item_carries_a_known_summary() {
        for item in generate_items(50) {
            let summary = item.summary.expect("summary should be set");
            assert!(SUMMARIES.contains(&summary.as_str()));
        }
    }
}
