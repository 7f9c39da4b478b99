use std::sync::{PoisonError, RwLock};

use secrecy::SecretString;

/// Source of the bearer token attached to every request.
///
/// The HTTP client reads the token before each request and calls
/// [`invalidate`](Self::invalidate) when the API answers 401, so the owner
/// can drop the stored credential and send the user back to login.
pub trait CredentialStore: Send + Sync {
    /// The current bearer token, if any.
    fn bearer_token(&self) -> Option<SecretString>;

    /// Discard the current token. Called on HTTP 401.
    fn invalidate(&self);
}

/// In-memory credential holder with no persistence.
///
/// Useful for scripts and tests; interactive front ends use a persisted
/// session instead.
#[derive(Debug, Default)]
pub struct StaticToken {
    token: RwLock<Option<SecretString>>,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(SecretString::from(token.into()))),
        }
    }

    pub fn set(&self, token: impl Into<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) =
            Some(SecretString::from(token.into()));
    }

    pub fn is_set(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl CredentialStore for StaticToken {
    fn bearer_token(&self) -> Option<SecretString> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn invalidate(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn invalidate_clears_token() {
        let store = StaticToken::new("abc");
        assert_eq!(
            store.bearer_token().map(|t| t.expose_secret().to_owned()),
            Some("abc".to_owned())
        );
        store.invalidate();
        assert!(!store.is_set());
        assert!(store.bearer_token().is_none());
    }
}
