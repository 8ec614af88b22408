//! API error taxonomy
//!
//! Every failed call surfaces as an `ApiError` carrying the HTTP status (if
//! the server answered) and the structured body (if it had one). Deciding
//! what a 401 means is the controller's job, not the client's.

use super::types::ErrorBody;
use thiserror::Error;

/// Message shown when a non-2xx response had no `{message}` body
pub fn status_fallback_message(status: u16) -> String {
    format!("Request failed with status {}", status)
}

/// Errors returned by `ArticlesApi` operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a usable response
    #[error("Request failed: {0}")]
    Transport(String),

    /// 401 from the server
    #[error("Unauthorized{}", describe_body(.body))]
    Unauthorized { body: Option<ErrorBody> },

    /// Any other non-2xx status
    #[error("Rejected with status {status}{}", describe_body(.body))]
    Rejected {
        status: u16,
        body: Option<ErrorBody>,
    },
}

/// Error classes the controller distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    Transport,
    Unauthorized,
    Rejected,
}

impl ApiError {
    /// Build from a non-2xx status and whatever body could be parsed
    pub fn from_status(status: u16, body: Option<ErrorBody>) -> Self {
        if status == 401 {
            Self::Unauthorized { body }
        } else {
            Self::Rejected { status, body }
        }
    }

    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport(detail.into())
    }

    pub fn kind(&self) -> ApiErrorKind {
        match self {
            Self::Transport(_) => ApiErrorKind::Transport,
            Self::Unauthorized { .. } => ApiErrorKind::Unauthorized,
            Self::Rejected { .. } => ApiErrorKind::Rejected,
        }
    }

    /// HTTP status, absent for transport failures
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(_) => None,
            Self::Unauthorized { .. } => Some(401),
            Self::Rejected { status, .. } => Some(*status),
        }
    }

    pub fn body(&self) -> Option<&ErrorBody> {
        match self {
            Self::Transport(_) => None,
            Self::Unauthorized { body } | Self::Rejected { body, .. } => body.as_ref(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind() == ApiErrorKind::Unauthorized
    }

    /// Text for the message banner: the server's message when it sent one,
    /// otherwise a fallback naming the status or transport failure.
    pub fn user_message(&self) -> String {
        if let Some(body) = self.body() {
            return body.message.clone();
        }
        match self.status() {
            Some(status) => status_fallback_message(status),
            None => self.to_string(),
        }
    }
}

fn describe_body(body: &Option<ErrorBody>) -> String {
    match body {
        Some(b) => format!(": {}", b.message),
        None => String::new(),
    }
}
