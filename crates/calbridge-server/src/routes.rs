//! Route handlers for the calendar event listings.
//!
//! Four GET operations under `/api/calendar`, all requiring an
//! `Authorization: Bearer <token>` header: the open-ended upcoming
//! listing plus month, week, and day ranges anchored to a `date` query
//! parameter.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Json;
use axum::routing::get;
use chrono::{Local, NaiveDate, Utc};
use serde::Deserialize;
use tracing::{debug, info};

use calbridge_core::QueryWindow;
use calbridge_providers::{AccessToken, EventSource, normalize_events};

use crate::auth::extract_access_token;
use crate::error::ApiResult;
use crate::response::EventsResponse;

/// Result cap for the open-ended upcoming listing.
const UPCOMING_MAX_RESULTS: usize = 5;

/// Result cap for the day/week/month listings.
const RANGED_MAX_RESULTS: usize = 100;

/// Shared handler state. The facade is stateless per request; this only
/// carries the provider handle.
#[derive(Clone)]
pub struct AppState {
    source: Arc<dyn EventSource>,
}

impl AppState {
    /// Creates the handler state around an event source.
    pub fn new(source: Arc<dyn EventSource>) -> Self {
        Self { source }
    }
}

/// Builds the API router with all calendar routes mounted.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/calendar/events", get(upcoming_events))
        .route("/api/calendar/events/month", get(events_by_month))
        .route("/api/calendar/events/week", get(events_by_week))
        .route("/api/calendar/events/day", get(events_by_day))
        .with_state(state)
}

/// The `date` query parameter shared by the ranged listings.
#[derive(Debug, Deserialize)]
struct DateQuery {
    /// ISO calendar date (YYYY-MM-DD).
    date: NaiveDate,
}

async fn upcoming_events(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<EventsResponse>> {
    info!("GET /events");
    let token = extract_access_token(&headers)?;
    let window = QueryWindow::upcoming(Utc::now());
    list_and_respond(&state, token, window, UPCOMING_MAX_RESULTS).await
}

async fn events_by_month(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DateQuery>,
) -> ApiResult<Json<EventsResponse>> {
    info!("GET /events/month");
    let token = extract_access_token(&headers)?;
    let window = QueryWindow::for_month(query.date, &Local);
    list_and_respond(&state, token, window, RANGED_MAX_RESULTS).await
}

async fn events_by_week(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DateQuery>,
) -> ApiResult<Json<EventsResponse>> {
    info!("GET /events/week");
    let token = extract_access_token(&headers)?;
    let window = QueryWindow::for_week(query.date, &Local);
    list_and_respond(&state, token, window, RANGED_MAX_RESULTS).await
}

async fn events_by_day(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DateQuery>,
) -> ApiResult<Json<EventsResponse>> {
    info!("GET /events/day");
    let token = extract_access_token(&headers)?;
    let window = QueryWindow::for_day(query.date, &Local);
    list_and_respond(&state, token, window, RANGED_MAX_RESULTS).await
}

async fn list_and_respond(
    state: &AppState,
    token: AccessToken,
    window: QueryWindow,
    max_results: usize,
) -> ApiResult<Json<EventsResponse>> {
    info!("starting calendar events search");
    let raw_events = state.source.list_events(token, window, max_results).await?;
    let events = normalize_events(&raw_events);
    debug!(event_count = events.len(), "events normalized");
    Ok(Json(EventsResponse::new(events)))
}
