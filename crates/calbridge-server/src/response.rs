//! Response envelope types.
//!
//! Explicit named records for the two body shapes the API returns,
//! serialized with camelCase field names. The user-facing literals are
//! kept exactly as the service has always returned them.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use calbridge_core::CalendarEvent;

/// Fixed confirmation message on successful listings.
pub const SUCCESS_MESSAGE: &str = "Eventos del calendario obtenidos exitosamente";

/// Envelope returned by all four listing operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsResponse {
    /// Always true on this shape.
    pub success: bool,
    /// Fixed confirmation message.
    pub message: String,
    /// Number of events in `events_list`.
    pub event_count: usize,
    /// The normalized events.
    pub events_list: Vec<CalendarEvent>,
    /// Response-generation time, epoch milliseconds.
    pub timestamp: i64,
    /// Prose summary of the count.
    pub note: String,
}

impl EventsResponse {
    /// Wraps a normalized event list in the success envelope.
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        let count = events.len();
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            event_count: count,
            events_list: events,
            timestamp: Utc::now().timestamp_millis(),
            note: format!("Mostrando próximos {} eventos", count),
        }
    }
}

/// Structured error envelope, returned with 401 responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Always false on this shape.
    pub success: bool,
    /// Human-readable failure description.
    pub message: String,
    /// Response-generation time, epoch milliseconds.
    pub timestamp: i64,
}

impl ErrorBody {
    /// Builds an error envelope with the current timestamp.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calbridge_core::EventKind;

    #[test]
    fn success_envelope_counts_events() {
        let events = vec![CalendarEvent {
            title: "Standup".to_string(),
            description: String::new(),
            date_time: "2024-03-15T09:00:00Z".to_string(),
            meet_url: None,
            kind_event: EventKind::Personal,
        }];

        let envelope = EventsResponse::new(events);

        assert!(envelope.success);
        assert_eq!(envelope.message, SUCCESS_MESSAGE);
        assert_eq!(envelope.event_count, 1);
        assert_eq!(envelope.note, "Mostrando próximos 1 eventos");
        assert!(envelope.timestamp > 0);
    }

    #[test]
    fn empty_list_is_still_success() {
        let envelope = EventsResponse::new(Vec::new());

        assert!(envelope.success);
        assert_eq!(envelope.event_count, 0);
        assert_eq!(envelope.note, "Mostrando próximos 0 eventos");
    }

    #[test]
    fn envelopes_serialize_with_camel_case_names() {
        let json = serde_json::to_value(EventsResponse::new(Vec::new())).unwrap();
        assert_eq!(json["eventCount"], 0);
        assert!(json["eventsList"].as_array().unwrap().is_empty());
        assert!(json.get("timestamp").is_some());

        let json = serde_json::to_value(ErrorBody::new("denied")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "denied");
    }
}
