// ── Inventory store ──
//
// Besides the generic page, keeps the low-stock list, the movement log of
// the last inspected entry, and the latest report. Stock movements patch
// the cached entry they target; `add_stock` is addressed by product and
// may introduce an entry the page did not hold.

use std::sync::Arc;

use tracing::debug;

use super::collection::InsertAt;
use super::resource::{CachePolicy, ResourceStore, StoreMessages};
use super::slot::Slot;
use crate::error::CoreError;
use crate::model::{
    AddStockRequest, Inventory, InventoryMovement, InventoryReport, LowStockItem, ResourceId,
    StockMovementRequest,
};
use crate::repository::InventoryRepository;

const MESSAGES: StoreMessages = StoreMessages::new("inventory", "Erro ao buscar inventário")
    .with_create("Erro ao criar inventário")
    .with_update("Erro ao atualizar inventário");

#[derive(Default)]
pub struct InventoryExtras {
    pub low_stock: Slot<Vec<LowStockItem>>,
    pub movements: Slot<Vec<InventoryMovement>>,
    pub report: Slot<Option<InventoryReport>>,
}

pub type InventoryStore = ResourceStore<InventoryRepository, InventoryExtras>;

impl ResourceStore<InventoryRepository, InventoryExtras> {
    pub fn new(repo: InventoryRepository) -> Self {
        Self::with_policy(repo, CachePolicy::default(), MESSAGES)
    }

    /// Fetch the entry of `product_id` into the current-item slot.
    pub async fn load_by_product(
        &self,
        product_id: &ResourceId,
    ) -> Result<Arc<Inventory>, CoreError> {
        let entry = self
            .tracker()
            .track(
                "Erro ao buscar inventário",
                self.repository().by_product(product_id),
            )
            .await?;
        let entry = Arc::new(entry);
        self.cache().set_current(Arc::clone(&entry));
        Ok(entry)
    }

    pub async fn load_low_stock(&self) -> Result<Vec<LowStockItem>, CoreError> {
        let items = self
            .tracker()
            .track(
                "Erro ao buscar itens com estoque baixo",
                self.repository().low_stock(),
            )
            .await?;
        self.extra().low_stock.set(items.clone());
        Ok(items)
    }

    pub async fn load_report(&self) -> Result<InventoryReport, CoreError> {
        let report = self
            .tracker()
            .track("Erro ao buscar relatório", self.repository().report())
            .await?;
        self.extra().report.set(Some(report.clone()));
        Ok(report)
    }

    /// Add stock to a product, replacing its cached entry or prepending it
    /// when the page does not hold one.
    pub async fn add_stock(&self, request: &AddStockRequest) -> Result<Arc<Inventory>, CoreError> {
        debug!(product_id = %request.product_id, quantity = request.quantity, "adding stock");
        let entry = self
            .tracker()
            .track("Erro ao adicionar estoque", self.repository().add_stock(request))
            .await?;
        let entry = Arc::new(entry);
        self.cache().replace_where(
            |cached| cached.product_id == request.product_id,
            &entry,
            Some(InsertAt::Front),
        );
        Ok(entry)
    }

    pub async fn restock(
        &self,
        request: &StockMovementRequest,
    ) -> Result<Arc<Inventory>, CoreError> {
        let entry = self
            .tracker()
            .track(
                "Erro ao reabastecer inventário",
                self.repository().restock(request),
            )
            .await?;
        Ok(self.patch(&request.inventory_id, entry))
    }

    pub async fn adjust(&self, request: &StockMovementRequest) -> Result<Arc<Inventory>, CoreError> {
        let entry = self
            .tracker()
            .track("Erro ao ajustar inventário", self.repository().adjust(request))
            .await?;
        Ok(self.patch(&request.inventory_id, entry))
    }

    pub async fn register_loss(
        &self,
        request: &StockMovementRequest,
    ) -> Result<Arc<Inventory>, CoreError> {
        let entry = self
            .tracker()
            .track(
                "Erro ao registrar perda",
                self.repository().register_loss(request),
            )
            .await?;
        Ok(self.patch(&request.inventory_id, entry))
    }

    pub async fn load_movements(
        &self,
        inventory_id: &ResourceId,
    ) -> Result<Vec<InventoryMovement>, CoreError> {
        let movements = self
            .tracker()
            .track(
                "Erro ao buscar movimentações",
                self.repository().movements(inventory_id),
            )
            .await?;
        self.extra().movements.set(movements.clone());
        Ok(movements)
    }

    pub fn low_stock(&self) -> Vec<LowStockItem> {
        self.extra().low_stock.get()
    }

    pub fn movements(&self) -> Vec<InventoryMovement> {
        self.extra().movements.get()
    }

    pub fn report(&self) -> Option<InventoryReport> {
        self.extra().report.get()
    }

    pub fn reset(&self) {
        self.reset_collection();
        self.extra().low_stock.clear();
        self.extra().movements.clear();
        self.extra().report.clear();
    }

    fn patch(&self, id: &ResourceId, entry: Inventory) -> Arc<Inventory> {
        let entry = Arc::new(entry);
        self.cache().replace(id, &entry);
        entry
    }
}
