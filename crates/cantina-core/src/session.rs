// ── Authenticated session ──
//
// Holds the bearer token and the signed-in user, persisted through a
// `Storage` backend. The HTTP client reads the token from here on every
// request and calls `invalidate` on a 401, which drops the token and bumps
// the `expired` counter so the front end can route back to login.

use std::sync::{Arc, PoisonError, RwLock};

use cantina_api::CredentialStore;
use secrecy::SecretString;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::User;
use crate::storage::{Storage, keys};

pub struct Session {
    storage: Arc<dyn Storage>,
    token: RwLock<Option<SecretString>>,
    user: watch::Sender<Option<Arc<User>>>,
    expired: watch::Sender<u64>,
}

impl Session {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let (user, _) = watch::channel(None);
        let (expired, _) = watch::channel(0);
        Self {
            storage,
            token: RwLock::new(None),
            user,
            expired,
        }
    }

    /// Load the persisted token and user. Returns whether both were found.
    pub fn restore(&self) -> Result<bool, CoreError> {
        let token = self.storage.get(keys::TOKEN)?;
        let user = match self.storage.get(keys::USER)? {
            Some(raw) => Some(serde_json::from_str::<User>(&raw).map_err(|source| {
                CoreError::Serialization {
                    key: keys::USER.to_owned(),
                    source,
                }
            })?),
            None => None,
        };

        let restored = token.is_some() && user.is_some();
        debug!(restored, "restoring session");
        self.set_token(token.map(SecretString::from));
        self.user.send_replace(user.map(Arc::new));
        Ok(restored)
    }

    /// Persist and adopt a freshly issued token and its user.
    pub fn establish(&self, token: &str, user: User) -> Result<Arc<User>, CoreError> {
        let encoded = encode_user(&user)?;
        self.storage.set(keys::TOKEN, token)?;
        self.storage.set(keys::USER, &encoded)?;

        let user = Arc::new(user);
        self.set_token(Some(SecretString::from(token.to_owned())));
        self.user.send_replace(Some(Arc::clone(&user)));
        Ok(user)
    }

    /// Swap in a user reported by the server, keeping the token. Memory
    /// only: the persisted user from sign-in carries fields a token check
    /// does not return.
    pub fn refresh_user(&self, user: User) -> Arc<User> {
        let user = Arc::new(user);
        self.user.send_replace(Some(Arc::clone(&user)));
        user
    }

    /// Forget the token and user, in memory and in storage.
    pub fn end(&self) -> Result<(), CoreError> {
        self.set_token(None);
        self.user.send_replace(None);
        self.storage.remove(keys::TOKEN)?;
        self.storage.remove(keys::USER)?;
        Ok(())
    }

    pub fn user(&self) -> Option<Arc<User>> {
        self.user.borrow().clone()
    }

    pub fn has_token(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Signed in: holds both a token and a user.
    pub fn is_authenticated(&self) -> bool {
        self.has_token() && self.user.borrow().is_some()
    }

    pub fn subscribe_user(&self) -> watch::Receiver<Option<Arc<User>>> {
        self.user.subscribe()
    }

    /// Counter bumped each time the server rejects the token.
    pub fn subscribe_expired(&self) -> watch::Receiver<u64> {
        self.expired.subscribe()
    }

    fn set_token(&self, token: Option<SecretString>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }
}

fn encode_user(user: &User) -> Result<String, CoreError> {
    serde_json::to_string(user).map_err(|source| CoreError::Serialization {
        key: keys::USER.to_owned(),
        source,
    })
}

impl CredentialStore for Session {
    fn bearer_token(&self) -> Option<SecretString> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn invalidate(&self) {
        self.set_token(None);
        if let Err(e) = self.storage.remove(keys::TOKEN) {
            warn!(error = %e, "failed to remove persisted token");
        }
        self.expired.send_modify(|n| *n += 1);
    }
}
