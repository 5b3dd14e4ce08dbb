//! Column conversion helpers shared by the repositories.
//!
//! Money is stored as decimal TEXT. Reads never fail on a malformed amount:
//! unparsable values are logged and read as zero.

use std::collections::BTreeSet;
use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

/// Parses a stored amount, accepting scientific notation. Falls back to zero.
pub fn parse_amount(value: &str, field_name: &str) -> Decimal {
    let trimmed = value.trim();
    if let Ok(d) = Decimal::from_str(trimmed) {
        return d;
    }
    if let Ok(d) = Decimal::from_scientific(trimmed) {
        return d;
    }
    match f64::from_str(trimmed).ok().and_then(Decimal::from_f64) {
        Some(d) => d,
        None => {
            log::warn!(
                "Could not parse {} '{}' as a decimal. Falling back to zero.",
                field_name,
                value
            );
            Decimal::ZERO
        }
    }
}

pub fn parse_optional_amount(value: Option<&str>, field_name: &str) -> Option<Decimal> {
    value.map(|v| parse_amount(v, field_name))
}

pub fn format_amount(amount: Decimal) -> String {
    amount.normalize().to_string()
}

/// Reads a JSON array of percents. Malformed content reads as empty.
pub fn parse_percent_list(value: &str, field_name: &str) -> Vec<u32> {
    serde_json::from_str(value).unwrap_or_else(|e| {
        log::warn!("Invalid {} '{}': {}", field_name, value, e);
        Vec::new()
    })
}

pub fn parse_percent_set(value: &str, field_name: &str) -> BTreeSet<u32> {
    parse_percent_list(value, field_name).into_iter().collect()
}
