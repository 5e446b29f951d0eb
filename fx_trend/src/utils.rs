//! Utility functions for the fx_trend crate

use crate::error::{Result, TrendError};
use chrono::{Days, NaiveDate};

/// Currency codes accepted by the report
pub const SUPPORTED_CURRENCIES: [&str; 14] = [
    "EUR", "USD", "GBP", "CHF", "SEK", "NOK", "DKK", "PLN", "CZK", "HUF", "RON", "BGN", "HRK",
    "ISK",
];

/// Check a currency code against the supported list, ignoring case
pub fn validate_currency_code(code: &str) -> bool {
    let code = code.trim().to_uppercase();
    SUPPORTED_CURRENCIES.contains(&code.as_str())
}

/// Consecutive calendar days following `last`, one per forecast step
pub fn future_dates(last: NaiveDate, horizon: usize) -> Result<Vec<NaiveDate>> {
    (1..=horizon as u64)
        .map(|offset| {
            last.checked_add_days(Days::new(offset))
                .ok_or(TrendError::DateOverflow {
                    from: last,
                    days: offset,
                })
        })
        .collect()
}

/// Date parsing helpers
pub mod date_parser {
    use super::*;

    /// Parse an ISO `YYYY-MM-DD` date
    pub fn parse_date(s: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map_err(|e| TrendError::InvalidSeries(format!("invalid date {:?}: {}", s, e)))
    }
}
