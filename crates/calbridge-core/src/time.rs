//! Query window construction for calendar searches.
//!
//! This module provides [`QueryWindow`], the time bounds sent to the
//! calendar provider for one query: a full day, an ISO week
//! (Monday through Sunday), a calendar month, or the open-ended
//! "upcoming events" window starting now.

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// The time bounds for one calendar query.
///
/// `start` is always present; `end` is absent for the open-ended upcoming
/// listing. The day/week/month constructors place both bounds at local
/// day boundaries (`00:00:00` and `23:59:59.999999999`) and then shift
/// them forward by exactly one second, so that an event starting exactly
/// at midnight of the first day is not excluded by the provider's
/// half-open interval comparison. The shift is part of the wire contract
/// and must be preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryWindow {
    /// Lower bound for event start times (inclusive).
    pub start: DateTime<Utc>,
    /// Upper bound for event start times, if the query is ranged.
    pub end: Option<DateTime<Utc>>,
}

impl QueryWindow {
    /// Window covering the single day `date` in the given timezone.
    pub fn for_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Self {
        Self::bounded(date, date, tz)
    }

    /// Window covering the Monday-through-Sunday week containing `date`.
    pub fn for_week<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Self {
        let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
        let sunday = monday + Duration::days(6);
        Self::bounded(monday, sunday, tz)
    }

    /// Window covering the calendar month containing `date`.
    pub fn for_month<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Self {
        let first = NaiveDate::from_ymd_opt(date.year(), date.month(), 1).expect("valid date");
        let (next_year, next_month) = if date.month() == 12 {
            (date.year() + 1, 1)
        } else {
            (date.year(), date.month() + 1)
        };
        let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .expect("valid date")
            .pred_opt()
            .expect("valid date");
        Self::bounded(first, last, tz)
    }

    /// Open-ended window for the upcoming-events listing: everything
    /// starting from `now`, with no upper bound.
    pub fn upcoming(now: DateTime<Utc>) -> Self {
        Self {
            start: now,
            end: None,
        }
    }

    /// Returns true if this window has an upper bound.
    pub fn is_ranged(&self) -> bool {
        self.end.is_some()
    }

    fn bounded<Tz: TimeZone>(start_date: NaiveDate, end_date: NaiveDate, tz: &Tz) -> Self {
        let start = to_utc(
            start_date.and_hms_opt(0, 0, 0).expect("valid time"),
            tz,
        ) + Duration::seconds(1);
        let end = to_utc(
            end_date
                .and_hms_nano_opt(23, 59, 59, 999_999_999)
                .expect("valid time"),
            tz,
        ) + Duration::seconds(1);
        Self {
            start,
            end: Some(end),
        }
    }
}

/// Resolves a local wall-clock time to UTC. A time inside a DST fold
/// takes the earlier of the two instants; a time inside a DST gap is
/// shifted forward past the gap. Some zones transition exactly at
/// midnight, so day boundaries must never panic on a valid date.
fn to_utc<Tz: TimeZone>(naive: NaiveDateTime, tz: &Tz) -> DateTime<Utc> {
    let mut candidate = naive;
    loop {
        match tz.from_local_datetime(&candidate) {
            LocalResult::Single(dt) => return dt.with_timezone(&Utc),
            LocalResult::Ambiguous(earliest, _) => return earliest.with_timezone(&Utc),
            // Gaps are at most a few hours; step forward in quarter-hour
            // increments to also cover zones with 30-minute transitions.
            LocalResult::None => candidate += Duration::minutes(15),
        }
    }
}
