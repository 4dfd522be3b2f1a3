//! Core types: event DTOs, query windows, tracing setup

pub mod event;
pub mod time;
pub mod tracing;

pub use event::{CalendarEvent, EventKind};
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
pub use time::QueryWindow;
