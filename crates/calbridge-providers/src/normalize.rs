//! RawEvent to CalendarEvent conversion.
//!
//! Normalization is total: every output field has a defined fallback, so
//! a raw event can never fail to normalize. An empty input collection
//! yields an empty output, not an error.

use chrono::SecondsFormat;

use calbridge_core::{CalendarEvent, EventKind};

use crate::raw_event::{RawEvent, RawEventTime};

/// Organizer mailbox whose events are classified as branding events.
/// Hardcoded classification rule, not configurable.
pub const BRANDING_ORGANIZER_EMAIL: &str = "branding@mobydigital.com";

/// Title used when the provider has no usable summary.
const FALLBACK_TITLE: &str = "No title";

/// Converts a [`RawEvent`] to a [`CalendarEvent`].
pub fn normalize_event(raw: &RawEvent) -> CalendarEvent {
    CalendarEvent {
        title: resolve_title(raw),
        description: raw.description.clone().unwrap_or_default(),
        date_time: resolve_date_time(raw.start.as_ref()),
        meet_url: resolve_meet_url(raw),
        kind_event: resolve_kind(raw),
    }
}

/// Batch-normalizes a collection of raw events.
pub fn normalize_events(raw_events: &[RawEvent]) -> Vec<CalendarEvent> {
    raw_events.iter().map(normalize_event).collect()
}

fn resolve_title(raw: &RawEvent) -> String {
    raw.summary
        .as_ref()
        .filter(|s| !s.trim().is_empty())
        .cloned()
        .unwrap_or_else(|| FALLBACK_TITLE.to_string())
}

fn resolve_date_time(start: Option<&RawEventTime>) -> String {
    match start {
        Some(RawEventTime::DateTime(dt)) => dt.to_rfc3339_opts(SecondsFormat::Secs, true),
        Some(RawEventTime::Date(date)) => date.format("%Y-%m-%d").to_string(),
        None => String::new(),
    }
}

/// Picks the meeting URL: the direct hangout link when non-empty, else
/// the first "video" entry point with a non-empty URI. Absent means
/// "no link", distinct from an empty one.
fn resolve_meet_url(raw: &RawEvent) -> Option<String> {
    if let Some(link) = raw.hangout_link.as_ref().filter(|l| !l.is_empty()) {
        return Some(link.clone());
    }

    raw.conference_data
        .as_ref()?
        .entry_points
        .iter()
        .filter(|ep| ep.entry_point_type.eq_ignore_ascii_case("video"))
        .find_map(|ep| ep.uri.clone().filter(|uri| !uri.is_empty()))
}

fn resolve_kind(raw: &RawEvent) -> EventKind {
    match raw.organizer_email.as_deref() {
        Some(email) if email == BRANDING_ORGANIZER_EMAIL => EventKind::Branding,
        _ => EventKind::Personal,
    }
}
