//! End-to-end tests for the HTTP facade, driving the router with a
//! stubbed event source.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use calbridge_core::QueryWindow;
use calbridge_providers::{
    AccessToken, BoxFuture, EventSource, ProviderError, ProviderErrorCode, ProviderResult,
    RawConferenceData, RawEntryPoint, RawEvent, RawEventTime,
};
use calbridge_server::routes::{AppState, router};

/// What the stub saw on its last invocation.
#[derive(Debug, Clone)]
struct CallRecord {
    token: String,
    window: QueryWindow,
    max_results: usize,
}

/// Event source that records calls and returns canned events.
struct RecordingSource {
    events: Vec<RawEvent>,
    calls: AtomicUsize,
    last_call: Mutex<Option<CallRecord>>,
}

impl RecordingSource {
    fn new(events: Vec<RawEvent>) -> Arc<Self> {
        Arc::new(Self {
            events,
            calls: AtomicUsize::new(0),
            last_call: Mutex::new(None),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_call(&self) -> CallRecord {
        self.last_call
            .lock()
            .unwrap()
            .clone()
            .expect("source was never called")
    }
}

impl EventSource for RecordingSource {
    fn name(&self) -> &str {
        "recording"
    }

    fn list_events(
        &self,
        token: AccessToken,
        window: QueryWindow,
        max_results: usize,
    ) -> BoxFuture<'_, ProviderResult<Vec<RawEvent>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_call.lock().unwrap() = Some(CallRecord {
            token: token.as_str().to_string(),
            window,
            max_results,
        });
        let events = self.events.clone();
        Box::pin(async move { Ok(events) })
    }
}

/// Event source that always fails with the configured error.
struct FailingSource {
    code: ProviderErrorCode,
    message: String,
}

impl FailingSource {
    fn new(code: ProviderErrorCode, message: &str) -> Arc<Self> {
        Arc::new(Self {
            code,
            message: message.to_string(),
        })
    }
}

impl EventSource for FailingSource {
    fn name(&self) -> &str {
        "failing"
    }

    fn list_events(
        &self,
        _token: AccessToken,
        _window: QueryWindow,
        _max_results: usize,
    ) -> BoxFuture<'_, ProviderResult<Vec<RawEvent>>> {
        let error = ProviderError::new(self.code, self.message.clone());
        Box::pin(async move { Err(error) })
    }
}

fn get(uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(value) = auth {
        builder = builder.header("Authorization", value);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn standup_event() -> RawEvent {
    RawEvent::new("evt-standup")
        .with_summary("Standup")
        .with_start(RawEventTime::from_datetime(
            "2024-03-15T09:00:00Z".parse().unwrap(),
        ))
        .with_organizer_email("branding@mobydigital.com")
        .with_hangout_link("https://meet/x")
}

#[tokio::test]
async fn missing_auth_header_is_rejected_before_any_query() {
    let source = RecordingSource::new(vec![standup_event()]);
    let app = router(AppState::new(source.clone()));

    let response = app.oneshot(get("/api/calendar/events", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(
        json["message"],
        "Autorización requerida. Encabezado 'Authorization' no encontrado o inválido."
    );
    assert!(json["timestamp"].as_i64().unwrap() > 0);
    assert_eq!(source.call_count(), 0);
}

#[tokio::test]
async fn lowercase_bearer_is_rejected() {
    let source = RecordingSource::new(Vec::new());
    let app = router(AppState::new(source.clone()));

    let response = app
        .oneshot(get("/api/calendar/events", Some("bearer abc123")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(source.call_count(), 0);
}

#[tokio::test]
async fn other_auth_scheme_is_rejected() {
    let source = RecordingSource::new(Vec::new());
    let app = router(AppState::new(source.clone()));

    let response = app
        .oneshot(get("/api/calendar/events", Some("Basic dXNlcjpwYXNz")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(source.call_count(), 0);
}

#[tokio::test]
async fn upcoming_listing_extracts_token_and_uses_small_cap() {
    let source = RecordingSource::new(Vec::new());
    let app = router(AppState::new(source.clone()));

    let response = app
        .oneshot(get("/api/calendar/events", Some("Bearer abc123")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let call = source.last_call();
    assert_eq!(call.token, "abc123");
    assert_eq!(call.max_results, 5);
    assert!(call.window.end.is_none());
}

#[tokio::test]
async fn day_listing_returns_normalized_event() {
    let source = RecordingSource::new(vec![standup_event()]);
    let app = router(AppState::new(source.clone()));

    let response = app
        .oneshot(get(
            "/api/calendar/events/day?date=2024-03-15",
            Some("Bearer abc123"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["success"], true);
    assert_eq!(
        json["message"],
        "Eventos del calendario obtenidos exitosamente"
    );
    assert_eq!(json["eventCount"], 1);
    assert_eq!(json["note"], "Mostrando próximos 1 eventos");

    let event = &json["eventsList"][0];
    assert_eq!(event["title"], "Standup");
    assert_eq!(event["description"], "");
    assert_eq!(event["dateTime"], "2024-03-15T09:00:00Z");
    assert_eq!(event["meetUrl"], "https://meet/x");
    assert_eq!(event["kindEvent"], "Branding");

    let call = source.last_call();
    assert_eq!(call.token, "abc123");
    assert_eq!(call.max_results, 100);
    assert!(call.window.end.is_some());
}

#[tokio::test]
async fn ranged_listings_use_large_cap() {
    for path in [
        "/api/calendar/events/month?date=2024-03-15",
        "/api/calendar/events/week?date=2024-03-15",
    ] {
        let source = RecordingSource::new(Vec::new());
        let app = router(AppState::new(source.clone()));

        let response = app.oneshot(get(path, Some("Bearer abc123"))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let call = source.last_call();
        assert_eq!(call.max_results, 100);
        assert!(call.window.end.is_some());
    }
}

#[tokio::test]
async fn empty_result_is_a_success_envelope() {
    let source = RecordingSource::new(Vec::new());
    let app = router(AppState::new(source));

    let response = app
        .oneshot(get(
            "/api/calendar/events/week?date=2024-03-15",
            Some("Bearer abc123"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["eventCount"], 0);
    assert!(json["eventsList"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn meet_url_is_omitted_for_events_without_links() {
    let event = RawEvent::new("evt-nolink")
        .with_summary("Focus time")
        .with_conference_data(RawConferenceData {
            entry_points: vec![RawEntryPoint {
                entry_point_type: "phone".to_string(),
                uri: Some("tel:+1-555-0100".to_string()),
            }],
        });
    let source = RecordingSource::new(vec![event]);
    let app = router(AppState::new(source));

    let response = app
        .oneshot(get(
            "/api/calendar/events/day?date=2024-03-15",
            Some("Bearer abc123"),
        ))
        .await
        .unwrap();

    let json = body_json(response).await;
    let event = &json["eventsList"][0];
    assert!(event.get("meetUrl").is_none());
    assert_eq!(event["kindEvent"], "Personal");
}

#[tokio::test]
async fn provider_failure_returns_plain_text_500() {
    let source = FailingSource::new(ProviderErrorCode::NetworkError, "connection refused");
    let app = router(AppState::new(source));

    let response = app
        .oneshot(get("/api/calendar/events", Some("Bearer abc123")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_text(response).await;
    assert!(body.starts_with("Error al crear evento"));
    assert!(body.contains("connection refused"));
}

#[tokio::test]
async fn unparseable_provider_response_returns_generic_500() {
    let source = FailingSource::new(ProviderErrorCode::InvalidResponse, "bad json at byte 17");
    let app = router(AppState::new(source));

    let response = app
        .oneshot(get("/api/calendar/events", Some("Bearer abc123")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_text(response).await;
    assert_eq!(body, "Ocurrió un error inesperado");
    assert!(!body.contains("byte 17"));
}

#[tokio::test]
async fn ranged_listing_without_date_is_a_client_error() {
    let source = RecordingSource::new(Vec::new());
    let app = router(AppState::new(source.clone()));

    let response = app
        .oneshot(get("/api/calendar/events/day", Some("Bearer abc123")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(source.call_count(), 0);
}
