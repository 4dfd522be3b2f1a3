//! The flat event record returned to API callers.

use serde::{Deserialize, Serialize};

/// Organizer-based classification of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// Organized by the company branding mailbox.
    Branding,
    /// Everything else, including events with no organizer.
    Personal,
}

/// A single calendar event as returned by the API.
///
/// Built once per raw provider event by the normalizer and owned by the
/// response it is part of. Every field has a defined fallback, so
/// construction never fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    /// Event title; `"No title"` when the provider has no usable summary.
    pub title: String,
    /// Event description; empty when absent.
    pub description: String,
    /// RFC3339 timestamp for timed events, `YYYY-MM-DD` for all-day
    /// events, empty when the provider returned no start at all.
    pub date_time: String,
    /// Video-conference URL. Omitted from the serialized form when the
    /// event has no usable link; never serialized as `null`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meet_url: Option<String>,
    /// Classification by organizer email.
    pub kind_event: EventKind,
}
