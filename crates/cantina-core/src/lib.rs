//! Reactive data layer between `cantina-api` and back-office front ends.
//!
//! - **[`ResourceStore`]**: generic repository-backed cache built on
//!   `tokio::sync::watch`. Holds the collection, the current item, the
//!   pagination state and the request status of one entity, patched in place
//!   on create/update/delete. Each entity store is an instantiation with its
//!   own cache policy and extension slots.
//!
//! - **Repositories** ([`repository`]): one per entity, each operation
//!   mapping to exactly one HTTP call with per-endpoint reshaping.
//!
//! - **[`AppContext`]**: owns the [`Session`], [`Preferences`], the
//!   [`NotificationCenter`] and every store. Constructed once and passed
//!   around explicitly.
//!
//! - **Domain model** ([`model`]) plus CPF/phone [`validation`] and pt-BR
//!   [`format`] helpers.

pub mod context;
pub mod error;
pub mod format;
pub mod model;
pub mod notify;
pub mod preferences;
pub mod repository;
pub mod session;
pub mod storage;
pub mod store;
pub mod validation;

// ── Primary re-exports ──────────────────────────────────────────────
pub use context::{AppContext, ClientConfig, DEFAULT_BASE_URL};
pub use error::CoreError;
pub use notify::{Notification, NotificationCenter, NotificationLevel};
pub use preferences::{Locale, Preferences, Theme};
pub use session::Session;
pub use storage::{MemoryStorage, Storage};
pub use store::{
    AccountStore, AuthStore, CachePolicy, CategoryStore, CollectionSnapshot, CustomerStore,
    InventoryStore, PaymentMethodStore, PersonStore, ProductStore, RequestStatus, ResourceStore,
    SaleStore, StaleResponsePolicy, StoreStream,
};
pub use validation::Cpf;

pub use model::{Resource, ResourceId};
