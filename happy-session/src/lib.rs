//! # happy-session
//!
//! One registration form session: the draft, its previews, the map centre
//! seeded from geolocation, and submissions driven through the
//! [`happy_core::SubmissionController`].
//!
//! Background work started by a session (the geolocation read) is aborted
//! when the session is dropped; a submission is cancelled by dropping its
//! future, which returns the controller to idle without notifying anyone.

pub mod error;
pub mod geolocation;
pub mod session;

pub use error::SessionError;
pub use geolocation::{FixedLocation, GeolocationProvider, Unavailable};
pub use session::FormSession;
