// ── Core error types ──
//
// Transport failures arrive already classified as `cantina_api::Error` and
// pass through untouched. The remaining variants cover local state:
// persisted session data and the storage backend.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── API errors (classified once at the transport) ────────────────
    #[error(transparent)]
    Api(#[from] cantina_api::Error),

    // ── Local state ──────────────────────────────────────────────────
    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Invalid persisted value for `{key}`: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Not authenticated")]
    NotAuthenticated,
}

impl CoreError {
    /// Message suitable for a store's error slot.
    ///
    /// Prefers the server's own wording; falls back to `fallback` for
    /// transport failures and anything the server did not explain.
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            Self::Api(err) => err
                .server_message()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(fallback)
                .to_owned(),
            _ => fallback.to_owned(),
        }
    }

    /// The underlying API error, if this failure came from the transport.
    pub fn as_api(&self) -> Option<&cantina_api::Error> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.as_api().is_some_and(cantina_api::Error::is_not_found)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api(cantina_api::Error::Unauthorized { .. }))
            || matches!(self, Self::NotAuthenticated)
    }
}
