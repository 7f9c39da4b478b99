use std::sync::Arc;

use cantina_api::HttpClient;

use crate::error::CoreError;
use crate::model::{AuthResponse, LoginRequest, RegisterRequest, VerifyTokenResponse};

/// Authentication endpoints.
///
/// Only talks to the server. Persisting the issued token is the session's
/// job, not this repository's.
#[derive(Clone)]
pub struct AuthRepository {
    http: Arc<HttpClient>,
}

impl AuthRepository {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, CoreError> {
        Ok(self.http.post("auth/login", request).await?)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, CoreError> {
        Ok(self.http.post("auth/register", request).await?)
    }

    /// Check the bearer token currently held by the client's credential
    /// store.
    pub async fn verify(&self) -> Result<VerifyTokenResponse, CoreError> {
        Ok(self.http.post_empty("auth/verify").await?)
    }
}
