use crate::calendar::{BookedDateSet, CalendarDate};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("booked date is empty")]
    Empty,
    #[error("malformed booked date {input:?}")]
    Malformed { input: String },
}

/// What to do with entries from the source that are not dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    /// Drop the entry and keep the rest.
    #[default]
    Skip,
    /// Reject the whole batch.
    Abort,
}

impl FromStr for MalformedPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "abort" => Ok(Self::Abort),
            other => Err(format!("unknown malformed-date policy {other:?}, expected skip or abort")),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParsedBatch {
    pub dates: BookedDateSet,
    pub skipped: usize,
}

/// Reads one booked date as the calendar day it falls on in `tz`.
///
/// Plain dates and naive date-times are taken at face value. Timestamps
/// carrying an offset are shifted into `tz` first, so `2024-03-15T23:30:00Z`
/// is the 16th in a zone ahead of UTC.
pub fn parse_booked_date<Tz: TimeZone>(raw: &str, tz: &Tz) -> Result<CalendarDate, ParseError> {
    let input = raw.trim();
    if input.is_empty() {
        return Err(ParseError::Empty);
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(CalendarDate::from_naive(date));
    }

    if let Ok(stamp) = DateTime::parse_from_rfc3339(input) {
        return Ok(CalendarDate::from_naive(stamp.with_timezone(tz).date_naive()));
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .map(|stamp| CalendarDate::from_naive(stamp.date()))
        .ok_or_else(|| ParseError::Malformed {
            input: input.to_string(),
        })
}

pub fn parse_batch<Tz, I, S>(
    raws: I,
    tz: &Tz,
    policy: MalformedPolicy,
) -> Result<ParsedBatch, ParseError>
where
    Tz: TimeZone,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut dates = Vec::new();
    let mut skipped = 0;

    for raw in raws {
        match parse_booked_date(raw.as_ref(), tz) {
            Ok(date) => dates.push(date),
            Err(err) => match policy {
                MalformedPolicy::Skip => {
                    warn!("skipping booked date: {err}");
                    skipped += 1;
                }
                MalformedPolicy::Abort => return Err(err),
            },
        }
    }

    Ok(ParsedBatch {
        dates: dates.into_iter().collect(),
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn triple(date: CalendarDate) -> (i32, u32, u32) {
        (date.year(), date.month(), date.day())
    }

    #[test]
    fn plain_date_keeps_its_day() {
        let tz = FixedOffset::west_opt(10 * 3600).unwrap();
        let date = parse_booked_date("2024-03-15", &tz).unwrap();
        assert_eq!(triple(date), (2024, 2, 15));
    }

    #[test]
    fn naive_datetime_drops_time_of_day() {
        for raw in [
            "2024-03-15T23:59:59",
            "2024-03-15T08:00",
            "2024-03-15T10:00:00.123456",
            "2024-03-15 10:00:00",
        ] {
            let date = parse_booked_date(raw, &Utc).unwrap();
            assert_eq!(triple(date), (2024, 2, 15), "{raw}");
        }
    }

    #[test]
    fn offset_timestamp_uses_local_calendar_day() {
        let brisbane = FixedOffset::east_opt(10 * 3600).unwrap();
        let date = parse_booked_date("2024-03-15T20:00:00Z", &brisbane).unwrap();
        assert_eq!(triple(date), (2024, 2, 16));

        let date = parse_booked_date("2024-03-15T20:00:00Z", &Utc).unwrap();
        assert_eq!(triple(date), (2024, 2, 15));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let date = parse_booked_date("  2025-01-01\n", &Utc).unwrap();
        assert_eq!(triple(date), (2025, 0, 1));
    }

    #[test]
    fn rejects_garbage_and_impossible_dates() {
        assert_eq!(parse_booked_date("", &Utc), Err(ParseError::Empty));
        assert_eq!(parse_booked_date("   ", &Utc), Err(ParseError::Empty));
        for raw in ["tomorrow", "2024-02-30", "15/03/2024", "2024-13-01"] {
            assert_eq!(
                parse_booked_date(raw, &Utc),
                Err(ParseError::Malformed {
                    input: raw.to_string()
                })
            );
        }
    }

    #[test]
    fn skip_policy_drops_bad_entries() {
        let batch = parse_batch(
            ["2024-03-15", "nonsense", "2024-03-16", "2024-03-15T09:00:00"],
            &Utc,
            MalformedPolicy::Skip,
        )
        .unwrap();

        assert_eq!(batch.skipped, 1);
        assert_eq!(batch.dates.len(), 2);
        assert!(batch.dates.contains(15, 2, 2024));
        assert!(batch.dates.contains(16, 2, 2024));
    }

    #[test]
    fn abort_policy_fails_whole_batch() {
        let err = parse_batch(["2024-03-15", "nonsense"], &Utc, MalformedPolicy::Abort).unwrap_err();
        assert_eq!(
            err,
            ParseError::Malformed {
                input: "nonsense".to_string()
            }
        );
    }

    #[test]
    fn policy_parses_from_config_values() {
        assert_eq!("skip".parse::<MalformedPolicy>(), Ok(MalformedPolicy::Skip));
        assert_eq!(" ABORT ".parse::<MalformedPolicy>(), Ok(MalformedPolicy::Abort));
        assert!("ignore".parse::<MalformedPolicy>().is_err());
    }
}
