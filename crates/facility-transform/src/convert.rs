//! Field-level defaulting shared by the shape adapters.

use chrono::NaiveDate;

/// Returns `Some` only for non-empty strings.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}

/// Clamp a stored integer into the canonical non-negative range.
pub fn count_from(value: Option<i64>) -> u32 {
    value.map_or(0, |count| u32::try_from(count.max(0)).unwrap_or(u32::MAX))
}

/// Keep only finite, non-negative costs.
pub fn cost_from(value: Option<f64>) -> f64 {
    value
        .filter(|cost| cost.is_finite() && *cost >= 0.0)
        .unwrap_or(0.0)
}

/// Parses the leading run of digits the way spreadsheet exports need it:
/// `"5"`, `" 5 "`, `"5.0"` and `"5 boxes"` all give 5. Input that does not
/// start with a digit, or overflows `u32`, gives `None`.
pub fn parse_count(value: &str) -> Option<u32> {
    let trimmed = value.trim();
    let digits_end = trimmed
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..digits_end].parse().ok()
}

/// Parses a non-negative cost, returning None for invalid or empty strings.
pub fn parse_cost(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|cost| cost.is_finite() && *cost >= 0.0)
}

/// Loose boolean used by CSV flag columns.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "y" | "1" | "x"
    )
}

/// Parse the date part of an ISO 8601 date or timestamp.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    let date_part = trimmed.get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
