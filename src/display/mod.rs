//! Human-readable formatting of amounts, prices and dates
//!
//! Amounts are shown in US dollars with thousands separators.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{BillingCycle, PricingTier};

fn group_thousands(whole: u64) -> String {
    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn dollars(amount: f64, trim_cents: bool) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    let whole = group_thousands(cents / 100);
    let frac = cents % 100;
    match (trim_cents, frac) {
        (true, 0) => format!("{}${}", sign, whole),
        (true, f) if f % 10 == 0 => format!("{}${}.{}", sign, whole, f / 10),
        _ => format!("{}${}.{:02}", sign, whole, frac),
    }
}

/// Currency with two decimals, e.g. `$1,234.50`
pub fn format_currency(amount: f64) -> String {
    dollars(amount, false)
}

/// Currency without trailing zero cents, e.g. `$49` or `$49.99`
pub fn format_price(amount: f64) -> String {
    dollars(amount, true)
}

/// Price with a compact cycle suffix, as shown in product lists (`$49/yr`)
pub fn format_cycle_price(price: f64, cycle: BillingCycle) -> String {
    format!("{}{}", format_price(price), cycle.short_suffix())
}

/// Price with a long cycle suffix, as shown in tier editors (`$49/year`)
pub fn format_tier_price(tier: &PricingTier) -> String {
    format!("{}{}", format_price(tier.price), tier.billing_cycle.long_suffix())
}

/// Format a stored date string as `Mar 1, 2024`.
///
/// Accepts `YYYY-MM-DD` and RFC 3339 timestamps. Empty input yields an empty
/// string; anything unparseable is returned unchanged.
pub fn format_date(date: &str) -> String {
    let date = date.trim();
    if date.is_empty() {
        return String::new();
    }
    if let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return day.format("%b %-d, %Y").to_string();
    }
    match DateTime::parse_from_rfc3339(date) {
        Ok(ts) => ts.format("%b %-d, %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_currency(-20.0), "-$20.00");
    }

    #[test]
    fn test_format_price_trims_cents() {
        assert_eq!(format_price(49.0), "$49");
        assert_eq!(format_price(49.5), "$49.5");
        assert_eq!(format_price(49.99), "$49.99");
        assert_eq!(format_price(1299.0), "$1,299");
    }

    #[test]
    fn test_cycle_suffixes() {
        assert_eq!(format_cycle_price(49.0, BillingCycle::Yearly), "$49/yr");
        assert_eq!(format_cycle_price(199.0, BillingCycle::OneTime), "$199");
        let tier = PricingTier {
            name: "Lifetime".to_string(),
            price: 299.0,
            billing_cycle: BillingCycle::Lifetime,
            ..Default::default()
        };
        assert_eq!(format_tier_price(&tier), "$299 (lifetime)");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("2024-03-01"), "Mar 1, 2024");
        assert_eq!(format_date("2024-12-25T10:00:00Z"), "Dec 25, 2024");
        assert_eq!(format_date("Q3 2025"), "Q3 2025");
    }

    #[test]
    fn test_format_timestamp() {
        let ts = Utc.with_ymd_and_hms(2025, 1, 9, 8, 0, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "Jan 9, 2025");
    }
}
