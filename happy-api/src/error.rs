//! Error types for happy-api.

use thiserror::Error;

use crate::messages::extract_messages;

/// All errors that can arise from API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, TLS, timeout or response-decoding failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("API rejected the request with status {status}: {}", messages.join("; "))]
    Rejected {
        status: u16,
        /// Validation messages pulled out of the response body.
        messages: Vec<String>,
        /// Raw response body, for logging.
        body: String,
    },
}

impl ApiError {
    /// Build a [`ApiError::Rejected`] from a status code and raw body.
    ///
    /// A JSON body contributes every scalar leaf regardless of key; any other
    /// non-empty body becomes a single message.
    pub fn rejected(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let messages = match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(value) => extract_messages(&value),
            Err(_) if body.trim().is_empty() => Vec::new(),
            Err(_) => vec![body.trim().to_owned()],
        };
        ApiError::Rejected {
            status,
            messages,
            body,
        }
    }

    /// Messages to attach to a failed submission.
    pub fn messages(&self) -> Vec<String> {
        match self {
            ApiError::Rejected { messages, .. } => messages.clone(),
            ApiError::Transport(err) => vec![err.to_string()],
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status().map(|s| s.as_u16()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_json_body_yields_values() {
        let err = ApiError::rejected(400, r#"{"name": "is required"}"#);
        assert_eq!(err.messages(), vec!["is required".to_owned()]);
        assert_eq!(err.status(), Some(400));
        assert!(err.to_string().contains("is required"));
    }

    #[test]
    fn rejected_plain_body_is_single_message() {
        let err = ApiError::rejected(502, "  Bad Gateway\n");
        assert_eq!(err.messages(), vec!["Bad Gateway".to_owned()]);
    }

    #[test]
    fn rejected_empty_body_has_no_messages() {
        let err = ApiError::rejected(500, "");
        assert!(err.messages().is_empty());
    }
}
