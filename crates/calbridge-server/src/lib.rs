//! HTTP facade over the calendar provider.
//!
//! Each request is handled independently: extract the bearer token,
//! resolve the query window, issue one provider query, normalize, wrap
//! the result in the response envelope. Nothing is shared across
//! requests beyond the provider handle and configuration, and nothing is
//! cached.

pub mod auth;
pub mod config;
pub mod error;
pub mod response;
pub mod routes;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use response::{ErrorBody, EventsResponse};
pub use routes::{AppState, router};
