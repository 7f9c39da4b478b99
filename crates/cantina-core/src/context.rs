// ── Application context ──
//
// One explicitly constructed value owning everything a front end needs:
// the session, the shared HTTP client, preferences, notifications and a
// store per entity. Cloning the `Arc`s out of it is the intended way to
// hand stores to views.

use std::sync::Arc;
use std::time::Duration;

use cantina_api::{CredentialStore, HttpClient, TlsMode, TransportConfig};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::CoreError;
use crate::notify::NotificationCenter;
use crate::preferences::Preferences;
use crate::repository::{
    AccountRepository, AuthRepository, CategoryRepository, CustomerRepository,
    InventoryRepository, PaymentMethodRepository, PersonRepository, ProductRepository,
    SaleRepository,
};
use crate::session::Session;
use crate::storage::Storage;
use crate::store::{
    AccountStore, AuthStore, CategoryStore, CustomerStore, InventoryStore, PaymentMethodStore,
    PersonStore, ProductStore, SaleStore,
};

/// Base URL used when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api/v1";

/// Connection settings for the back-office API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub tls: TlsMode,
}

impl ClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: TransportConfig::default().timeout,
            tls: TlsMode::System,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_tls(mut self, tls: TlsMode) -> Self {
        self.tls = tls;
        self
    }

    fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: self.tls.clone(),
            timeout: self.timeout,
            ..TransportConfig::default()
        }
    }
}

pub struct AppContext {
    pub session: Arc<Session>,
    pub preferences: Arc<Preferences>,
    pub notifications: Arc<NotificationCenter>,
    pub auth: Arc<AuthStore>,
    pub customers: Arc<CustomerStore>,
    pub products: Arc<ProductStore>,
    pub categories: Arc<CategoryStore>,
    pub inventory: Arc<InventoryStore>,
    pub sales: Arc<SaleStore>,
    pub people: Arc<PersonStore>,
    pub payment_methods: Arc<PaymentMethodStore>,
    pub accounts: Arc<AccountStore>,
    http: Arc<HttpClient>,
}

impl AppContext {
    /// Build the context and restore any persisted session.
    ///
    /// A corrupt persisted session is logged and discarded rather than
    /// failing construction.
    pub fn new(config: ClientConfig, storage: Arc<dyn Storage>) -> Result<Self, CoreError> {
        let session = Arc::new(Session::new(Arc::clone(&storage)));
        match session.restore() {
            Ok(restored) => debug!(restored, "session restored"),
            Err(e) => {
                warn!(error = %e, "discarding unreadable session");
                session.end()?;
            }
        }

        let credentials: Arc<dyn CredentialStore> = session.clone();
        let http = Arc::new(HttpClient::new(
            config.base_url.as_str(),
            &config.transport(),
            Some(credentials),
        )?);
        info!(base_url = %http.base_url(), "client ready");

        Ok(Self {
            preferences: Arc::new(Preferences::new(storage)),
            notifications: Arc::new(NotificationCenter::new()),
            auth: Arc::new(AuthStore::new(
                AuthRepository::new(Arc::clone(&http)),
                Arc::clone(&session),
            )),
            customers: Arc::new(CustomerStore::new(CustomerRepository::new(Arc::clone(&http)))),
            products: Arc::new(ProductStore::new(ProductRepository::new(Arc::clone(&http)))),
            categories: Arc::new(CategoryStore::new(CategoryRepository::new(Arc::clone(&http)))),
            inventory: Arc::new(InventoryStore::new(InventoryRepository::new(Arc::clone(&http)))),
            sales: Arc::new(SaleStore::new(SaleRepository::new(Arc::clone(&http)))),
            people: Arc::new(PersonStore::new(PersonRepository::new(Arc::clone(&http)))),
            payment_methods: Arc::new(PaymentMethodStore::new(PaymentMethodRepository::new(
                Arc::clone(&http),
            ))),
            accounts: Arc::new(AccountStore::new(AccountRepository::new(Arc::clone(&http)))),
            session,
            http,
        })
    }

    pub fn http(&self) -> &Arc<HttpClient> {
        &self.http
    }

    /// Sign out and drop every cached collection.
    pub fn logout(&self) {
        self.auth.logout();
        self.reset_stores();
    }

    pub fn reset_stores(&self) {
        self.customers.reset();
        self.products.reset();
        self.categories.reset();
        self.inventory.reset();
        self.sales.reset();
        self.people.reset();
        self.payment_methods.reset();
        self.accounts.reset();
    }

    /// Stop background work. Pending notification timers are cancelled.
    pub fn shutdown(&self) {
        self.notifications.shutdown();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, keys};

    fn config() -> ClientConfig {
        ClientConfig::new(Url::parse(DEFAULT_BASE_URL).unwrap())
    }

    #[test]
    fn default_config_points_at_local_api() {
        let config = config();
        assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.tls, TlsMode::System);
    }

    #[test]
    fn unreadable_session_is_discarded() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::with_values([
            (keys::TOKEN, "tok"),
            (keys::USER, "not json"),
        ]));
        let ctx = AppContext::new(config(), Arc::clone(&storage)).unwrap();
        assert!(!ctx.auth.is_authenticated());
        assert_eq!(storage.get(keys::TOKEN).unwrap(), None);
    }

    #[test]
    fn preferences_are_restored() {
        let storage: Arc<dyn Storage> =
            Arc::new(MemoryStorage::with_values([(keys::THEME, "dark")]));
        let ctx = AppContext::new(config(), storage).unwrap();
        assert!(ctx.preferences.is_dark());
    }
}
