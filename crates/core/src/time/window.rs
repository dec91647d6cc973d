use crate::error::ReportError;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};

pub const WINDOW_DAYS: usize = 7;

// `additional.json` producers stamp the anchor in this human-readable form.
const STAMP_FORMAT: &str = "%d %b %Y, %H:%M:%S UTC";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Seven calendar dates ending at the anchor, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateWindow {
    dates: Vec<NaiveDate>,
}

impl DateWindow {
    pub fn anchor(&self) -> NaiveDate {
        self.dates[0]
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// `YYYY-MM-DD` keys, in window order.
    pub fn date_strings(&self) -> Vec<String> {
        self.dates
            .iter()
            .map(|d| d.format(DATE_FORMAT).to_string())
            .collect()
    }
}

/// Parses an anchor timestamp into a UTC instant.
///
/// Accepts RFC 3339, the `"19 Oct 2026, 10:00:00 UTC"` stamp and a bare
/// `YYYY-MM-DD` (taken as midnight UTC).
pub fn parse_anchor(raw: &str) -> Result<DateTime<Utc>, ReportError> {
    let s = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, STAMP_FORMAT) {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(ReportError::InvalidTimestamp {
        value: raw.to_string(),
    })
}

/// `window[i]` is the UTC calendar date of `anchor - i days`.
pub fn build_date_window(anchor: DateTime<Utc>) -> Result<DateWindow, ReportError> {
    let mut dates = Vec::with_capacity(WINDOW_DAYS);
    for i in 0..WINDOW_DAYS {
        let instant = anchor
            .checked_sub_signed(Duration::days(i as i64))
            .ok_or_else(|| ReportError::InvalidTimestamp {
                value: anchor.to_rfc3339(),
            })?;
        dates.push(instant.date_naive());
    }
    Ok(DateWindow { dates })
}

pub fn date_window_from_str(raw: &str) -> Result<DateWindow, ReportError> {
    build_date_window(parse_anchor(raw)?)
}
