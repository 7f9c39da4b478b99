// ── Authentication store ──
//
// Sign-in state lives in the shared `Session`; this store adds the request
// status for login/register and the role checks the UI gates on.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use super::status::{RequestStatus, StatusTracker};
use crate::error::CoreError;
use crate::model::{LoginRequest, RegisterRequest, User};
use crate::repository::AuthRepository;
use crate::session::Session;

pub struct AuthStore {
    repo: AuthRepository,
    session: Arc<Session>,
    status: StatusTracker,
}

impl AuthStore {
    pub fn new(repo: AuthRepository, session: Arc<Session>) -> Self {
        Self {
            repo,
            session,
            status: StatusTracker::new(),
        }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<Arc<User>, CoreError> {
        self.status
            .track("Erro ao fazer login", async {
                let auth = self.repo.login(request).await?;
                self.session.establish(&auth.token, auth.user)
            })
            .await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<Arc<User>, CoreError> {
        self.status
            .track("Erro ao fazer registro", async {
                let auth = self.repo.register(request).await?;
                self.session.establish(&auth.token, auth.user)
            })
            .await
    }

    /// Ask the server whether the held token is still good.
    ///
    /// Without a token this is `false` and makes no request. A token the
    /// server rejects signs the user out. Any other failure (unreachable
    /// server, 5xx) is `false` but keeps the session for a later retry. The
    /// refreshed user is held in memory only.
    pub async fn verify_token(&self) -> bool {
        if !self.session.has_token() {
            return false;
        }
        match self.repo.verify().await {
            Ok(verified) => {
                self.session.refresh_user(verified.into());
                true
            }
            Err(e) if token_rejected(&e) => {
                debug!(error = %e, "token rejected, signing out");
                self.logout();
                false
            }
            Err(e) => {
                debug!(error = %e, "token verification failed, keeping session");
                false
            }
        }
    }

    pub fn logout(&self) {
        if let Err(e) = self.session.end() {
            warn!(error = %e, "failed to clear persisted session");
        }
        self.status.reset();
    }

    /// Restore the persisted session. Returns whether a user was signed in.
    pub fn restore(&self) -> Result<bool, CoreError> {
        self.session.restore()
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn user(&self) -> Option<Arc<User>> {
        self.session.user()
    }

    pub fn subscribe_user(&self) -> watch::Receiver<Option<Arc<User>>> {
        self.session.subscribe_user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.user_can(User::is_admin)
    }

    pub fn is_manager(&self) -> bool {
        self.user_can(User::is_manager)
    }

    pub fn can_manage_products(&self) -> bool {
        self.user_can(User::can_manage_products)
    }

    pub fn can_manage_sales(&self) -> bool {
        self.user_can(User::can_manage_sales)
    }

    pub fn can_manage_inventory(&self) -> bool {
        self.user_can(User::can_manage_inventory)
    }

    pub fn can_view_reports(&self) -> bool {
        self.user_can(User::can_view_reports)
    }

    pub fn status(&self) -> RequestStatus {
        self.status.current()
    }

    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.status.error()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<RequestStatus> {
        self.status.subscribe()
    }

    pub fn clear_error(&self) {
        self.status.clear_error();
    }

    fn user_can(&self, check: impl FnOnce(&User) -> bool) -> bool {
        self.session.user().is_some_and(|u| check(u.as_ref()))
    }
}

/// The server answered and refused the token, as opposed to not answering.
fn token_rejected(err: &CoreError) -> bool {
    err.is_unauthorized()
        || err.as_api().is_some_and(|api| {
            matches!(api, cantina_api::Error::Rejected { .. }) || api.status() == Some(403)
        })
}
