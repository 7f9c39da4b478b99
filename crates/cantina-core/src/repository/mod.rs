// ── Resource repositories ──
//
// One repository per entity. Each operation maps to exactly one HTTP call
// and reshapes the server's response into domain types. Repositories hold
// no state besides the shared client: no caching, no persistence, and
// failures propagate unchanged.

mod account;
mod auth;
mod customer;
mod inventory;
mod payment_method;
mod person;
mod product;
mod query;
mod sale;

use std::future::Future;

use cantina_api::Page;

use crate::error::CoreError;
use crate::model::{Resource, ResourceId};

pub use account::AccountRepository;
pub use auth::AuthRepository;
pub use customer::CustomerRepository;
pub use inventory::InventoryRepository;
pub use payment_method::PaymentMethodRepository;
pub use person::PersonRepository;
pub use product::{CategoryRepository, ProductRepository};
pub use query::{CategoryQuery, DateRange, PersonQuery, ProductQuery, QueryParams, SaleQuery};
pub use sale::SaleRepository;

// ── Capability traits ───────────────────────────────────────────────
//
// Stores are generic over these. A repository implements only the
// capabilities its endpoints support; the store operations light up
// accordingly.

/// Base trait naming the entity a repository serves.
pub trait Repository: Send + Sync + 'static {
    type Item: Resource;
}

pub trait ListRepository: Repository {
    type Query: Send + Sync;

    fn list(
        &self,
        query: &Self::Query,
    ) -> impl Future<Output = Result<Page<Self::Item>, CoreError>> + Send;
}

pub trait FetchRepository: Repository {
    fn get(&self, id: &ResourceId) -> impl Future<Output = Result<Self::Item, CoreError>> + Send;
}

pub trait CreateRepository: Repository {
    type Create: Send + Sync;

    fn create(
        &self,
        request: &Self::Create,
    ) -> impl Future<Output = Result<Self::Item, CoreError>> + Send;
}

pub trait UpdateRepository: Repository {
    type Update: Send + Sync;

    fn update(
        &self,
        id: &ResourceId,
        request: &Self::Update,
    ) -> impl Future<Output = Result<Self::Item, CoreError>> + Send;
}

pub trait DeleteRepository: Repository {
    fn delete(&self, id: &ResourceId) -> impl Future<Output = Result<(), CoreError>> + Send;
}
