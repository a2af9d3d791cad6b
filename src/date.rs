// src/date.rs

//! Date normalization for lifecycle comparisons.
//!
//! Lifecycle data and CLI arguments carry dates as `YYYY-MM-DD` text, but
//! some sources emit non-zero-padded forms (`2026-2-1`). [`DateSpec`] accepts
//! either an already-parsed [`NaiveDate`] or text, and resolves text with a
//! strict ISO-8601 parse followed by a manual split fallback for the
//! non-padded encodings.

use crate::error::{Error, Result};
use chrono::NaiveDate;

/// A date given either structured or as text still to be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateSpec {
    /// Already-parsed calendar date
    Date(NaiveDate),
    /// Textual date, expected `YYYY-MM-DD`
    Text(String),
}

impl DateSpec {
    /// Resolve to a calendar date, parsing text per [`parse_date`]
    pub fn resolve(&self) -> Result<NaiveDate> {
        match self {
            DateSpec::Date(date) => Ok(*date),
            DateSpec::Text(text) => parse_date(text),
        }
    }
}

impl From<NaiveDate> for DateSpec {
    fn from(date: NaiveDate) -> Self {
        DateSpec::Date(date)
    }
}

impl From<&str> for DateSpec {
    fn from(text: &str) -> Self {
        DateSpec::Text(text.to_string())
    }
}

impl From<String> for DateSpec {
    fn from(text: String) -> Self {
        DateSpec::Text(text)
    }
}

/// Parse a `YYYY-MM-DD` date string, accepting non-zero-padded month/day
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let text = value.trim();

    // Strict ISO-8601 first
    if let Ok(date) = text.parse::<NaiveDate>() {
        return Ok(date);
    }

    // Fallback for non-padded forms like 2026-2-1
    let parts: Vec<&str> = text.split('-').collect();
    if parts.len() == 3 {
        if let (Ok(year), Ok(month), Ok(day)) = (
            parts[0].parse::<i32>(),
            parts[1].parse::<u32>(),
            parts[2].parse::<u32>(),
        ) {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                return Ok(date);
            }
        }
    }

    Err(Error::InvalidDate(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_padded_date() {
        let date = parse_date("2026-02-01").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
    }

    #[test]
    fn test_parse_non_padded_date_matches_padded() {
        assert_eq!(parse_date("2026-2-1").unwrap(), parse_date("2026-02-01").unwrap());
        assert_eq!(parse_date("1999-12-3").unwrap(), parse_date("1999-12-03").unwrap());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let date = parse_date("  2024-06-15 ").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "not-a-date", "2026-13-40", "2026/02/01", "2026-02", "2026-02-01-05"] {
            let err = parse_date(bad).unwrap_err();
            assert!(matches!(err, Error::InvalidDate(_)), "expected InvalidDate for {bad:?}");
        }
    }

    #[test]
    fn test_invalid_date_error_carries_input() {
        let err = parse_date("bogus").unwrap_err();
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_date_spec_resolves_both_forms() {
        let structured = DateSpec::from(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
        let textual = DateSpec::from("2025-1-2");
        assert_eq!(structured.resolve().unwrap(), textual.resolve().unwrap());
    }
}
