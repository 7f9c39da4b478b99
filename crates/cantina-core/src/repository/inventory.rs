use std::sync::Arc;

use cantina_api::{HttpClient, Page, PageParams};
use serde::Deserialize;

use super::query::QueryParams;
use super::{CreateRepository, ListRepository, Repository, UpdateRepository};
use crate::error::CoreError;
use crate::model::{
    AddStockRequest, CreateInventoryRequest, Inventory, InventoryMovement, InventoryReport,
    LowStockItem, ResourceId, StockMovementRequest, UpdateInventoryRequest,
};

#[derive(Deserialize)]
struct LowStockBody {
    #[serde(default)]
    inventory: Option<Vec<LowStockItem>>,
}

#[derive(Deserialize)]
struct MovementsBody {
    movements: Vec<InventoryMovement>,
}

/// Stock levels and stock movements.
///
/// Inventory entries are never fetched or deleted by id; entries are looked
/// up by product instead.
#[derive(Clone)]
pub struct InventoryRepository {
    http: Arc<HttpClient>,
}

impl InventoryRepository {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn by_product(&self, product_id: &ResourceId) -> Result<Inventory, CoreError> {
        Ok(self
            .http
            .get(&format!("inventory/product/{product_id}"))
            .await?)
    }

    /// Products at or below their minimum. A body without the array is an
    /// empty result.
    pub async fn low_stock(&self) -> Result<Vec<LowStockItem>, CoreError> {
        let body: Option<LowStockBody> = self.http.get("inventory/low-stock").await?;
        Ok(body.and_then(|b| b.inventory).unwrap_or_default())
    }

    pub async fn report(&self) -> Result<InventoryReport, CoreError> {
        Ok(self.http.get("inventory/report").await?)
    }

    pub async fn add_stock(&self, request: &AddStockRequest) -> Result<Inventory, CoreError> {
        Ok(self.http.post("inventory/add", request).await?)
    }

    pub async fn restock(&self, request: &StockMovementRequest) -> Result<Inventory, CoreError> {
        Ok(self.http.post("inventory/restock", request).await?)
    }

    pub async fn adjust(&self, request: &StockMovementRequest) -> Result<Inventory, CoreError> {
        Ok(self.http.post("inventory/adjust", request).await?)
    }

    pub async fn register_loss(
        &self,
        request: &StockMovementRequest,
    ) -> Result<Inventory, CoreError> {
        Ok(self.http.post("inventory/loss", request).await?)
    }

    pub async fn movements(
        &self,
        inventory_id: &ResourceId,
    ) -> Result<Vec<InventoryMovement>, CoreError> {
        let body: MovementsBody = self
            .http
            .get(&format!("inventory/{inventory_id}/movements"))
            .await?;
        Ok(body.movements)
    }
}

impl Repository for InventoryRepository {
    type Item = Inventory;
}

impl ListRepository for InventoryRepository {
    type Query = PageParams;

    async fn list(&self, query: &PageParams) -> Result<Page<Inventory>, CoreError> {
        Ok(self
            .http
            .get_page("inventory", &query.to_params(), "inventory")
            .await?)
    }
}

impl CreateRepository for InventoryRepository {
    type Create = CreateInventoryRequest;

    async fn create(&self, request: &CreateInventoryRequest) -> Result<Inventory, CoreError> {
        Ok(self.http.post("inventory", request).await?)
    }
}

impl UpdateRepository for InventoryRepository {
    type Update = UpdateInventoryRequest;

    async fn update(
        &self,
        id: &ResourceId,
        request: &UpdateInventoryRequest,
    ) -> Result<Inventory, CoreError> {
        Ok(self.http.put(&format!("inventory/{id}"), request).await?)
    }
}
