//! Happy core library: draft form state, image previews, submission state
//! machine, map math and configuration.
//!
//! Public API surface:
//! - [`types`]: coordinates, form fields and API records
//! - [`image`]: [`ImageFile`] handles and the [`ImagePreviewManager`]
//! - [`form`]: the [`FormState`] store and per-field validity
//! - [`payload`]: multipart payload built from a draft
//! - [`submission`]: [`SubmissionController`] and its collaborators
//! - [`map`]: map view and slippy-tile helpers
//! - [`config`]: load / save `~/.happy/config.yaml`
//! - [`error`]: [`FormError`], [`ConfigError`]

pub mod config;
pub mod error;
pub mod form;
pub mod image;
pub mod map;
pub mod payload;
pub mod submission;
pub mod types;

pub use config::Config;
pub use error::{ConfigError, FormError};
pub use form::{FormState, OrphanageDraft, ABOUT_MAX_CHARS};
pub use image::{ImageFile, ImagePreviewManager, PreviewRegistry, PreviewUrl};
pub use map::{MapView, TileCoord};
pub use payload::{MultipartPayload, Part};
pub use submission::{
    Navigator, Notifier, SubmissionController, SubmissionState, SubmissionTicket, SubmitOutcome,
};
pub use types::{Appearance, Field, Orphanage, OrphanageImage, Position};
