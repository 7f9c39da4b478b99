// ── Sale store ──

use std::sync::Arc;

use super::resource::{CachePolicy, ResourceStore, StoreMessages};
use super::slot::Slot;
use crate::error::CoreError;
use crate::model::{ResourceId, Sale, SalesSummary};
use crate::repository::{DateRange, SaleRepository};

const MESSAGES: StoreMessages = StoreMessages::new("sale", "Erro ao buscar vendas")
    .with_load_one("Erro ao buscar venda")
    .with_create("Erro ao criar venda");

#[derive(Default)]
pub struct SaleExtras {
    pub summary: Slot<Option<SalesSummary>>,
}

pub type SaleStore = ResourceStore<SaleRepository, SaleExtras>;

impl ResourceStore<SaleRepository, SaleExtras> {
    pub fn new(repo: SaleRepository) -> Self {
        Self::with_policy(repo, CachePolicy::default(), MESSAGES)
    }

    /// Cancel a sale and patch the cached copy with the server's version.
    pub async fn cancel(&self, id: &ResourceId) -> Result<Arc<Sale>, CoreError> {
        let sale = self
            .tracker()
            .track("Erro ao cancelar venda", self.repository().cancel(id))
            .await?;
        let sale = Arc::new(sale);
        self.cache().replace(id, &sale);
        Ok(sale)
    }

    pub async fn load_summary(&self, range: &DateRange) -> Result<SalesSummary, CoreError> {
        let summary = self
            .tracker()
            .track(
                "Erro ao buscar resumo de vendas",
                self.repository().summary(range),
            )
            .await?;
        self.extra().summary.set(Some(summary.clone()));
        Ok(summary)
    }

    pub fn summary(&self) -> Option<SalesSummary> {
        self.extra().summary.get()
    }

    pub fn reset(&self) {
        self.reset_collection();
        self.extra().summary.clear();
    }
}
