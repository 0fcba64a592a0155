// src/error.rs
// =============================================================================
// Errors produced by the README pipeline.
//
// The Display text of each variant is exactly what the viewer shows in place
// of the README, so keep those strings user-facing. Technical details (HTTP
// status, transport error) ride along in fields and are only logged.
// =============================================================================

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReadmeError {
    /// The API answered 404 for the README endpoint
    #[error("README.md not found in this repository.")]
    NotFound,

    /// Any other non-success status, transport failure or unreadable body
    #[error("Could not fetch README due to a network or API error.")]
    Fetch { reason: String },

    /// The payload had no `content` field, or it was empty
    #[error("README file is empty or could not be read.")]
    EmptyContent,

    /// `content` was not valid base64
    #[error("README could not be decoded.")]
    Decode(#[from] base64::DecodeError),

    /// An image source could not be resolved into an absolute URL
    #[error("README could not be rendered.")]
    Render { reason: String },
}

impl ReadmeError {
    // Technical detail hidden behind the user-facing message
    pub fn detail(&self) -> Option<&str> {
        match self {
            ReadmeError::Fetch { reason } | ReadmeError::Render { reason } => Some(reason.as_str()),
            _ => None,
        }
    }

    // Short machine-friendly name, used in logs and JSON output
    pub fn kind(&self) -> &'static str {
        match self {
            ReadmeError::NotFound => "not_found",
            ReadmeError::Fetch { .. } => "fetch_error",
            ReadmeError::EmptyContent => "empty_content",
            ReadmeError::Decode(_) => "decode_error",
            ReadmeError::Render { .. } => "render_error",
        }
    }
}
