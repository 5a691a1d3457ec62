//! Lenient parsing for `dateOfBirth`.
//!
//! Date inputs submit `YYYY-MM-DD`, while records written by other tools may carry a
//! full RFC 3339 timestamp. Both are accepted; only the calendar date is kept.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, de};

pub fn parse_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(|e| de::Error::custom(format!("invalid date `{raw}`: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_dates_and_timestamps() {
        let expected = NaiveDate::from_ymd_opt(1990, 5, 1).unwrap();
        assert_eq!(parse_date("1990-05-01").unwrap(), expected);
        assert_eq!(parse_date("1990-05-01T00:00:00.000Z").unwrap(), expected);
        assert_eq!(parse_date(" 1990-05-01 ").unwrap(), expected);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_date("05/01/1990").is_err());
        assert!(parse_date("").is_err());
    }
}
