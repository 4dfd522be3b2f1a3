//! Raw event type from the calendar provider.
//!
//! [`RawEvent`] is the provider-shaped representation of a calendar event
//! before normalization: every field apart from the id is optional, and
//! the normalizer supplies the fallbacks.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The start specification of a raw event.
///
/// Providers return either an RFC3339 datetime or, for all-day events, a
/// date with no time-of-day component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum RawEventTime {
    /// A specific datetime in UTC.
    DateTime(DateTime<Utc>),
    /// An all-day event date.
    Date(NaiveDate),
}

impl RawEventTime {
    /// Creates a RawEventTime from a UTC datetime.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt)
    }

    /// Creates a RawEventTime from a date (all-day event).
    pub fn from_date(date: NaiveDate) -> Self {
        Self::Date(date)
    }

    /// Returns true if this is an all-day event time.
    pub fn is_all_day(&self) -> bool {
        matches!(self, Self::Date(_))
    }
}

/// Conference data attached to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawConferenceData {
    /// Entry points for joining the conference.
    pub entry_points: Vec<RawEntryPoint>,
}

/// A typed entry point for joining a conference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntryPoint {
    /// The type of entry point (e.g., "video", "phone", "sip").
    pub entry_point_type: String,
    /// The URI for this entry point.
    pub uri: Option<String>,
}

/// A raw calendar event as returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Unique identifier for the event within the provider.
    pub id: String,

    /// When the event starts; absent events normalize to an empty
    /// timestamp rather than an error.
    pub start: Option<RawEventTime>,

    /// The event title/summary.
    pub summary: Option<String>,

    /// The event description.
    pub description: Option<String>,

    /// The organizer's email address.
    pub organizer_email: Option<String>,

    /// Direct conferencing link (Google Meet "hangout" link).
    pub hangout_link: Option<String>,

    /// Conference data with typed entry points.
    pub conference_data: Option<RawConferenceData>,
}

impl RawEvent {
    /// Creates a new raw event with the given id and no other fields.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            start: None,
            summary: None,
            description: None,
            organizer_email: None,
            hangout_link: None,
            conference_data: None,
        }
    }

    /// Builder method to set the start time.
    pub fn with_start(mut self, start: RawEventTime) -> Self {
        self.start = Some(start);
        self
    }

    /// Builder method to set the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method to set the organizer email.
    pub fn with_organizer_email(mut self, email: impl Into<String>) -> Self {
        self.organizer_email = Some(email.into());
        self
    }

    /// Builder method to set the hangout link.
    pub fn with_hangout_link(mut self, link: impl Into<String>) -> Self {
        self.hangout_link = Some(link.into());
        self
    }

    /// Builder method to set conference data.
    pub fn with_conference_data(mut self, conference_data: RawConferenceData) -> Self {
        self.conference_data = Some(conference_data);
        self
    }

    /// Returns true if this is an all-day event.
    pub fn is_all_day(&self) -> bool {
        self.start.as_ref().is_some_and(RawEventTime::is_all_day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_datetime() -> DateTime<Utc> {
        "2024-03-15T09:00:00Z".parse().unwrap()
    }

    #[test]
    fn raw_event_time_variants() {
        let dt = RawEventTime::from_datetime(sample_datetime());
        assert!(!dt.is_all_day());

        let date = RawEventTime::from_date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert!(date.is_all_day());
    }

    #[test]
    fn raw_event_builder() {
        let event = RawEvent::new("evt-123")
            .with_start(RawEventTime::from_datetime(sample_datetime()))
            .with_summary("Standup")
            .with_description("Daily sync")
            .with_organizer_email("someone@example.com")
            .with_hangout_link("https://meet.google.com/abc-defg-hij");

        assert_eq!(event.id, "evt-123");
        assert_eq!(event.summary, Some("Standup".to_string()));
        assert_eq!(event.organizer_email, Some("someone@example.com".to_string()));
        assert!(!event.is_all_day());
    }

    #[test]
    fn event_without_start_is_not_all_day() {
        let event = RawEvent::new("evt-123");
        assert!(event.start.is_none());
        assert!(!event.is_all_day());
    }

    #[test]
    fn serde_roundtrip() {
        let event = RawEvent::new("evt-123")
            .with_start(RawEventTime::from_date(
                NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            ))
            .with_summary("Day off");

        let json = serde_json::to_string(&event).unwrap();
        let parsed: RawEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, parsed);
    }
}
