//! # Display Formatting
//!
//! Number and label formatting used when rendering generated page content and
//! composing outbound messages.

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// Maximum fraction digits kept when formatting prices.
const PRICE_FRACTION_DIGITS: usize = 3;

/// Format a price with en-US digit grouping.
///
/// Keeps up to three fraction digits and drops trailing zeros.
///
/// # Example
/// ```rust
/// use sitebind_util::formatting::format_price;
///
/// assert_eq!(format_price(100.0), "100");
/// assert_eq!(format_price(1500.0), "1,500");
/// assert_eq!(format_price(1234567.5), "1,234,567.5");
/// assert_eq!(format_price(0.1234), "0.123");
/// ```
pub fn format_price(price: f64) -> String {
    if !price.is_finite() {
        return price.to_string();
    }
    let scale = 10f64.powi(PRICE_FRACTION_DIGITS as i32);
    let rounded = (price.abs() * scale).round() / scale;
    let fixed = format!("{rounded:.3}");
    let (integer_digits, fraction_digits) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction_digits = fraction_digits.trim_end_matches('0');

    let mut formatted = String::new();
    if price < 0.0 && rounded != 0.0 {
        formatted.push('-');
    }
    formatted.push_str(&group_thousands(integer_digits));
    if !fraction_digits.is_empty() {
        formatted.push('.');
        formatted.push_str(fraction_digits);
    }
    formatted
}

/// Price label shown on product cards: currency symbol, a space, and the price.
///
/// Products without a price render an empty label.
pub fn price_label(currency: &str, price: Option<f64>) -> String {
    match price {
        Some(price) => format!("{currency} {}", format_price(price)),
        None => String::new(),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Human-readable submission timestamp, e.g. `Monday, October 19, 2026 at 03:04 PM UTC`.
pub fn format_submission_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format("%A, %B %-d, %Y at %I:%M %p %Z").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn groups_large_prices() {
        assert_eq!(format_price(999.0), "999");
        assert_eq!(format_price(1000.0), "1,000");
        assert_eq!(format_price(-25000.25), "-25,000.25");
        assert_eq!(format_price(-0.0001), "0");
    }

    #[test]
    fn price_label_uses_currency_prefix() {
        assert_eq!(price_label("৳", Some(100.0)), "৳ 100");
        assert_eq!(price_label("$", Some(12.5)), "$ 12.5");
        assert_eq!(price_label("$", None), "");
    }

    #[test]
    fn submission_timestamp_is_readable() {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 15, 4, 0).unwrap();
        assert_eq!(format_submission_timestamp(&at), "Monday, October 19, 2026 at 03:04 PM UTC");
    }
}
