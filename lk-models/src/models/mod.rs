//! Record definitions.

pub mod list;
pub mod item;

use chrono::{DateTime, SecondsFormat, Utc};
use lk_core::error::LmError;

/// Current time in the stored timestamp format (RFC 3339, milliseconds, UTC).
pub(crate) fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a stored `created_at` column value.
pub(crate) fn parse_timestamp(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Optional text columns store empty input as NULL; any other text is kept
/// as given.
pub(crate) fn empty_to_none(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Map a rusqlite failure onto the unified error type.
pub(crate) fn db_err(e: rusqlite::Error) -> LmError {
    LmError::Database(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_roundtrip() {
        let ts = now_timestamp();
        assert!(ts.ends_with('Z'));
        let parsed = parse_timestamp(0, &ts).unwrap();
        assert_eq!(parsed.to_rfc3339_opts(SecondsFormat::Millis, true), ts);
    }

    #[test]
    fn test_bad_timestamp_is_conversion_error() {
        assert!(parse_timestamp(3, "yesterday").is_err());
    }

    #[test]
    fn test_empty_to_none() {
        assert_eq!(empty_to_none(Some("")), None);
        assert_eq!(empty_to_none(None), None);
        assert_eq!(empty_to_none(Some("  ")), Some("  "));
        assert_eq!(empty_to_none(Some(" 2% ")), Some(" 2% "));
    }
}
