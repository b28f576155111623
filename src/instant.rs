//! Query-instant parsing and canonical keys.
//!
//! The service accepts two instant shapes, both UTC: a bare date
//! (`YYYY-MM-DD`) and a second-resolution timestamp (`YYYY-MM-DDTHH:MM:SS`,
//! no offset suffix). Parsing is strict; anything else is rejected before it
//! reaches the engine.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{PanchangaError, Result};

/// Wire format for date-keyed queries.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Wire format for timestamp-keyed queries.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
/// Format Horizons expects for START_TIME/STOP_TIME.
const HORIZONS_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A validated query instant. A bare date means midnight UTC of that day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryInstant {
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
}

impl QueryInstant {
    /// Parse a raw key strictly against the two accepted formats.
    ///
    /// chrono tolerates un-padded fields (`2026-1-2`), so the parsed value
    /// is re-rendered and compared against the input to enforce the exact
    /// canonical shape.
    pub fn parse(raw: &str) -> Result<Self> {
        if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
            if date.format(DATE_FORMAT).to_string() == raw {
                return Ok(Self::Date(date));
            }
        }
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT) {
            if ts.format(TIMESTAMP_FORMAT).to_string() == raw {
                return Ok(Self::Timestamp(ts));
            }
        }
        Err(PanchangaError::InvalidArgument(raw.to_string()))
    }

    /// Canonical storage/cache key for this instant.
    pub fn key(&self) -> String {
        match self {
            Self::Date(date) => date.format(DATE_FORMAT).to_string(),
            Self::Timestamp(ts) => ts.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    fn start(&self) -> NaiveDateTime {
        match self {
            Self::Date(date) => date.and_time(NaiveTime::MIN),
            Self::Timestamp(ts) => *ts,
        }
    }

    /// One-minute `[start, start + 1 min)` window in the format Horizons
    /// expects for a VECTORS query.
    pub fn horizons_window(&self) -> (String, String) {
        let start = self.start();
        let stop = start + Duration::minutes(1);
        (
            start.format(HORIZONS_FORMAT).to_string(),
            stop.format(HORIZONS_FORMAT).to_string(),
        )
    }

    /// This instant normalized to midnight UTC of its day. Used by the
    /// planet-snapshot pipeline so every query within a day shares one key.
    pub fn midnight(&self) -> QueryInstant {
        Self::Timestamp(self.start().date().and_time(NaiveTime::MIN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_date() {
        let instant = QueryInstant::parse("2026-01-20").unwrap();
        assert_eq!(instant.key(), "2026-01-20");
    }

    #[test]
    fn parses_timestamp() {
        let instant = QueryInstant::parse("2026-01-20T18:30:00").unwrap();
        assert_eq!(instant.key(), "2026-01-20T18:30:00");
    }

    #[test]
    fn rejects_unpadded_date() {
        assert!(QueryInstant::parse("2026-1-2").is_err());
    }

    #[test]
    fn rejects_offset_suffix() {
        assert!(QueryInstant::parse("2026-01-20T18:30:00Z").is_err());
    }

    #[test]
    fn rejects_minute_resolution() {
        assert!(QueryInstant::parse("2026-01-20T18:30").is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            QueryInstant::parse("not-a-date"),
            Err(PanchangaError::InvalidArgument(_))
        ));
    }

    #[test]
    fn date_window_spans_first_minute() {
        let instant = QueryInstant::parse("2026-01-20").unwrap();
        let (start, stop) = instant.horizons_window();
        assert_eq!(start, "2026-01-20 00:00");
        assert_eq!(stop, "2026-01-20 00:01");
    }

    #[test]
    fn timestamp_window_advances_one_minute() {
        let instant = QueryInstant::parse("2026-01-20T23:59:30").unwrap();
        let (start, stop) = instant.horizons_window();
        assert_eq!(start, "2026-01-20 23:59");
        assert_eq!(stop, "2026-01-21 00:00");
    }

    #[test]
    fn midnight_normalizes_timestamp() {
        let instant = QueryInstant::parse("2026-01-20T18:30:00").unwrap();
        assert_eq!(instant.midnight().key(), "2026-01-20T00:00:00");
    }

    #[test]
    fn midnight_of_date_is_stable() {
        let a = QueryInstant::parse("2026-01-20").unwrap().midnight();
        let b = QueryInstant::parse("2026-01-20T07:15:00").unwrap().midnight();
        assert_eq!(a.key(), b.key());
    }
}
