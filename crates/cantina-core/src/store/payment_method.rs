// ── Payment method store ──

use std::sync::Arc;

use super::resource::{CachePolicy, ResourceStore, StoreMessages};
use crate::model::PaymentMethod;
use crate::repository::PaymentMethodRepository;

const MESSAGES: StoreMessages =
    StoreMessages::new("payment_method", "Erro ao buscar métodos de pagamento")
        .with_load_one("Erro ao buscar método de pagamento");

pub type PaymentMethodStore = ResourceStore<PaymentMethodRepository>;

impl ResourceStore<PaymentMethodRepository> {
    pub fn new(repo: PaymentMethodRepository) -> Self {
        Self::with_policy(repo, CachePolicy::default(), MESSAGES)
    }

    /// Cached method whose machine name is `name`.
    pub fn find_by_name(&self, name: &str) -> Option<Arc<PaymentMethod>> {
        self.items().iter().find(|pm| pm.name == name).cloned()
    }

    pub fn reset(&self) {
        self.reset_collection();
    }
}
