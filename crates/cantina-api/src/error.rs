use strum::{Display, IntoStaticStr};
use thiserror::Error;

use crate::envelope::FieldError;

/// Coarse classification of an [`Error`], for consumers that only need to
/// branch on the failure family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    Network,
    Timeout,
    Unauthorized,
    NotFound,
    Validation,
    Http,
    Rejected,
    Decode,
    Config,
}

/// Top-level error type for the `cantina-api` crate.
///
/// Produced exactly once, at the transport boundary. Every downstream layer
/// matches on these variants rather than digging through raw response bodies.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// The API could not be reached (connection refused, DNS failure, reset).
    #[error("Network failure: {0}")]
    Network(#[source] reqwest::Error),

    /// The request exceeded the client-side timeout.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or HTTP client construction failed.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── HTTP status failures ────────────────────────────────────────
    /// HTTP 401. The credential store has already been invalidated.
    #[error("Unauthorized: {}", message.as_deref().unwrap_or("session expired or invalid token"))]
    Unauthorized { message: Option<String> },

    /// HTTP 404.
    #[error("Not found: {}", message.as_deref().unwrap_or("resource not found"))]
    NotFound { message: Option<String> },

    /// Field-level validation failure (HTTP 422, or any response carrying an
    /// `errors` array). `message` holds the `field: message` pairs joined.
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        field_errors: Vec<FieldError>,
    },

    /// Any other non-success HTTP status.
    #[error("HTTP {status}: {}", message.as_deref().unwrap_or("request failed"))]
    Http { status: u16, message: Option<String> },

    // ── Envelope ────────────────────────────────────────────────────
    /// A 2xx response whose envelope reported `status: "error"`.
    #[error("Request rejected: {}", message.as_deref().unwrap_or("no message"))]
    Rejected { message: Option<String> },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) => ErrorKind::Network,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::InvalidUrl(_) | Self::Tls(_) => ErrorKind::Config,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Http { .. } => ErrorKind::Http,
            Self::Rejected { .. } => ErrorKind::Rejected,
            Self::Deserialization { .. } => ErrorKind::Decode,
        }
    }

    /// The human-readable message supplied by the server, if any.
    ///
    /// Transport and decoding failures never carry one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message }
            | Self::NotFound { message }
            | Self::Http { message, .. }
            | Self::Rejected { message } => message.as_deref(),
            Self::Validation { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Field-level validation messages; empty for every other variant.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation { field_errors, .. } => field_errors,
            _ => &[],
        }
    }

    /// HTTP status code, when the failure came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::NotFound { .. } => Some(404),
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if the API was never reached or did not answer in time.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout { .. })
    }
}
