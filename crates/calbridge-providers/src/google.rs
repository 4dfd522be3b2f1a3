//! Google Calendar API client.
//!
//! A low-level HTTP client for the Google Calendar API, built per request
//! from the caller's bearer token. It issues a single `events.list` query
//! against the primary calendar with recurring series expanded and results
//! ordered by start time.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use calbridge_core::QueryWindow;

use crate::error::{ProviderError, ProviderResult};
use crate::raw_event::{RawConferenceData, RawEntryPoint, RawEvent, RawEventTime};

/// Base URL for Google Calendar API v3.
const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// The only calendar this service queries.
const PRIMARY_CALENDAR: &str = "primary";

/// Google Calendar API client authenticated with a bearer token.
///
/// The token is treated as a capability valid for the lifetime of one
/// call: there is no refresh and no client secret.
#[derive(Debug)]
pub struct GoogleCalendarClient {
    http_client: reqwest::Client,
    access_token: String,
}

impl GoogleCalendarClient {
    /// Creates a new client with the given access token and per-call
    /// timeout.
    pub fn new(access_token: impl Into<String>, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to create HTTP client");

        Self {
            http_client,
            access_token: access_token.into(),
        }
    }

    /// Lists events from the primary calendar.
    ///
    /// Requests single, non-recurring event instances ordered by start
    /// time, bounded below by `window.start` and above by `window.end`
    /// when present, capped at `max_results`. The caps used by the facade
    /// stay below Google's single-page limit, so no pagination is needed.
    pub async fn list_events(
        &self,
        window: &QueryWindow,
        max_results: usize,
    ) -> ProviderResult<Vec<RawEvent>> {
        let url = format!("{}/calendars/{}/events", CALENDAR_API_BASE, PRIMARY_CALENDAR);

        let mut request = self
            .http_client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("timeMin", window.start.to_rfc3339()),
                ("singleEvents", "true".to_string()),
                ("orderBy", "startTime".to_string()),
                ("maxResults", max_results.to_string()),
            ]);

        if let Some(end) = window.end {
            request = request.query(&[("timeMax", end.to_rfc3339())]);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::network("request timeout")
            } else if e.is_connect() {
                ProviderError::network(format!("connection failed: {}", e))
            } else {
                ProviderError::network(format!("request failed: {}", e))
            }
        })?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ProviderError::authentication(
                "access token expired or invalid",
            ));
        }

        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(ProviderError::authorization("access denied to calendar"));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::rate_limited("rate limit exceeded"));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::server(format!(
                "API error ({}): {}",
                status, body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::network(format!("failed to read response: {}", e)))?;

        let list_response: EventListResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::invalid_response(format!("failed to parse response: {}", e)))?;

        let events: Vec<RawEvent> = list_response.items.into_iter().map(convert_event).collect();

        debug!(event_count = events.len(), "fetched events from primary calendar");
        Ok(events)
    }
}

/// Converts a Google Calendar API event to a RawEvent.
fn convert_event(event: ApiEvent) -> RawEvent {
    let id = event.id.unwrap_or_default();
    let start = event.start.and_then(|s| parse_start(&id, s));

    let conference_data = event.conference_data.map(|cd| RawConferenceData {
        entry_points: cd
            .entry_points
            .unwrap_or_default()
            .into_iter()
            .map(|ep| RawEntryPoint {
                entry_point_type: ep.entry_point_type,
                uri: ep.uri,
            })
            .collect(),
    });

    let mut raw = RawEvent::new(id);
    raw.start = start;
    raw.summary = event.summary;
    raw.description = event.description;
    raw.organizer_email = event.organizer.and_then(|o| o.email);
    raw.hangout_link = event.hangout_link;
    raw.conference_data = conference_data;
    raw
}

/// Parses the start specification of an API event. A start that cannot
/// be parsed is treated as absent; the normalizer falls back to an empty
/// timestamp.
fn parse_start(id: &str, time: ApiEventTime) -> Option<RawEventTime> {
    match (time.date_time, time.date) {
        (Some(dt), _) => DateTime::parse_from_rfc3339(&dt)
            .map_err(|e| warn!(event_id = %id, "failed to parse start time: {}", e))
            .ok()
            .map(|parsed| RawEventTime::DateTime(parsed.with_timezone(&Utc))),
        (None, Some(date)) => NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|e| warn!(event_id = %id, "failed to parse start date: {}", e))
            .ok()
            .map(RawEventTime::Date),
        (None, None) => None,
    }
}

/// Response from the events.list endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventListResponse {
    #[serde(default)]
    items: Vec<ApiEvent>,
}

/// A single event from the Google Calendar API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiEvent {
    id: Option<String>,
    summary: Option<String>,
    description: Option<String>,
    start: Option<ApiEventTime>,
    organizer: Option<ApiOrganizer>,
    hangout_link: Option<String>,
    conference_data: Option<ApiConferenceData>,
}

/// Event time from the API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiEventTime {
    date: Option<String>,
    date_time: Option<String>,
}

/// Organizer from the API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiOrganizer {
    email: Option<String>,
}

/// Conference data from the API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiConferenceData {
    entry_points: Option<Vec<ApiEntryPoint>>,
}

/// Entry point from the API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiEntryPoint {
    entry_point_type: String,
    uri: Option<String>,
}
