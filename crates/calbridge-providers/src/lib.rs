//! Calendar provider access: the [`EventSource`] trait, the Google
//! Calendar implementation behind it, and the raw-to-DTO normalizer.

pub mod error;
pub mod google;
pub mod normalize;
pub mod raw_event;
pub mod source;

pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use google::GoogleCalendarClient;
pub use normalize::{BRANDING_ORGANIZER_EMAIL, normalize_event, normalize_events};
pub use raw_event::{RawConferenceData, RawEntryPoint, RawEvent, RawEventTime};
pub use source::{AccessToken, BoxFuture, EventSource, GoogleEventSource};
