//! # happy-api
//!
//! Client for the orphanage REST API.
//!
//! [`OrphanageApi`] is the seam the form session talks to; [`HttpApi`] is the
//! `reqwest` implementation used by the CLI.

pub mod client;
pub mod error;
pub mod messages;

pub use client::{HttpApi, OrphanageApi};
pub use error::ApiError;
pub use messages::extract_messages;
