//! The EventSource seam between the HTTP facade and the provider.
//!
//! The facade depends on the object-safe [`EventSource`] trait rather
//! than on the Google client directly, so the HTTP layer can be exercised
//! in tests with a stubbed provider.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use calbridge_core::QueryWindow;

use crate::error::ProviderResult;
use crate::google::GoogleCalendarClient;
use crate::raw_event::RawEvent;

/// An opaque bearer token supplied by the caller for one request.
///
/// Never persisted; it lives only for the duration of a single query.
/// Debug output is redacted so tokens cannot leak into logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a bearer token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

/// A boxed future for async trait methods, keeping the trait object-safe.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The "list calendar events" capability consumed by the HTTP facade.
///
/// Implementations build whatever short-lived client they need from the
/// per-request token and must not retain it across calls.
pub trait EventSource: Send + Sync {
    /// Returns the name of this source (e.g., "google").
    fn name(&self) -> &str;

    /// Lists events from the caller's primary calendar, bounded by
    /// `window` and capped at `max_results`, ordered by start time with
    /// recurring series expanded into single instances.
    fn list_events(
        &self,
        token: AccessToken,
        window: QueryWindow,
        max_results: usize,
    ) -> BoxFuture<'_, ProviderResult<Vec<RawEvent>>>;
}

/// Google Calendar backed [`EventSource`].
///
/// Builds a fresh [`GoogleCalendarClient`] from the bearer token on every
/// call; nothing is cached between requests.
#[derive(Debug, Clone)]
pub struct GoogleEventSource {
    timeout: Duration,
}

impl GoogleEventSource {
    /// Creates a Google event source with the given per-call timeout.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl EventSource for GoogleEventSource {
    fn name(&self) -> &str {
        "google"
    }

    fn list_events(
        &self,
        token: AccessToken,
        window: QueryWindow,
        max_results: usize,
    ) -> BoxFuture<'_, ProviderResult<Vec<RawEvent>>> {
        let client = GoogleCalendarClient::new(token.as_str(), self.timeout);
        Box::pin(async move { client.list_events(&window, max_results).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn access_token_debug_is_redacted() {
        let token = AccessToken::new("ya29.secret-value");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("secret"));
        assert_eq!(debug, "AccessToken(..)");
    }

    #[test]
    fn access_token_round_trips_value() {
        let token = AccessToken::new("abc123");
        assert_eq!(token.as_str(), "abc123");
    }

    #[test]
    fn google_source_name() {
        let source = GoogleEventSource::new(Duration::from_secs(30));
        assert_eq!(source.name(), "google");
    }

    struct CannedSource(Vec<RawEvent>);

    impl EventSource for CannedSource {
        fn name(&self) -> &str {
            "canned"
        }

        fn list_events(
            &self,
            _token: AccessToken,
            _window: QueryWindow,
            max_results: usize,
        ) -> BoxFuture<'_, ProviderResult<Vec<RawEvent>>> {
            let mut events = self.0.clone();
            events.truncate(max_results);
            Box::pin(async move { Ok(events) })
        }
    }

    #[tokio::test]
    async fn trait_is_object_safe_and_respects_cap() {
        let source: Box<dyn EventSource> = Box::new(CannedSource(vec![
            RawEvent::new("evt-1"),
            RawEvent::new("evt-2"),
            RawEvent::new("evt-3"),
        ]));

        let events = source
            .list_events(
                AccessToken::new("abc123"),
                QueryWindow::upcoming(Utc::now()),
                2,
            )
            .await
            .unwrap();

        assert_eq!(events.len(), 2);
    }
}
