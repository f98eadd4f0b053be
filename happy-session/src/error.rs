//! Error types for happy-session.

use thiserror::Error;

use happy_core::FormError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("form error: {0}")]
    Form(#[from] FormError),

    /// The geolocation task panicked.
    #[error("geolocation task failed: {0}")]
    Geolocation(#[from] tokio::task::JoinError),
}
