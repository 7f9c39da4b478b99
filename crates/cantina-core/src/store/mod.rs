// ── Reactive stores ──
//
// `ResourceStore` is the generic engine: a watch-backed collection cache,
// current-item slot, pagination state and request status around one
// repository. Each entity module instantiates it with its own cache
// policy, fallback messages and extension slots.

mod account;
mod auth;
mod catalog;
mod collection;
mod customer;
mod inventory;
mod payment_method;
mod person;
mod resource;
mod sale;
mod slot;
mod status;
mod stream;

pub use account::AccountStore;
pub use auth::AuthStore;
pub use catalog::{CategoryStore, ProductStore};
pub use collection::{CollectionSnapshot, InsertAt, ResourceCache};
pub use customer::{CustomerExtras, CustomerStore};
pub use inventory::{InventoryExtras, InventoryStore};
pub use payment_method::PaymentMethodStore;
pub use person::{PersonExtras, PersonStore};
pub use resource::{CachePolicy, ResourceStore, StaleResponsePolicy, StoreMessages};
pub use sale::{SaleExtras, SaleStore};
pub use slot::Slot;
pub use status::{InFlight, RequestStatus, StatusTracker};
pub use stream::{SnapshotStream, StoreStream};
