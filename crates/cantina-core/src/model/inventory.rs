// ── Inventory domain types ──
//
// Stock status is derived from the quantity thresholds on demand rather
// than stored, so a patched entry can never carry a stale status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::id::{Resource, ResourceId};

/// Stock level of a product relative to its configured thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StockStatus {
    Low,
    Sufficient,
    Excess,
}

impl StockStatus {
    /// Classify `quantity`: at or below `min` is low, at or above `max` is
    /// excess. The low check runs first when the thresholds overlap.
    pub fn classify(quantity: i64, min: i64, max: i64) -> Self {
        if quantity <= min {
            Self::Low
        } else if quantity >= max {
            Self::Excess
        } else {
            Self::Sufficient
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    pub id: ResourceId,
    pub product_id: ResourceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    pub quantity: i64,
    pub min_quantity: i64,
    pub max_quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_restock_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Inventory {
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::classify(self.quantity, self.min_quantity, self.max_quantity)
    }
}

impl Resource for Inventory {
    fn id(&self) -> &ResourceId {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MovementType {
    Restock,
    Adjustment,
    Loss,
    Sale,
}

/// A single recorded change to an inventory entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryMovement {
    pub id: ResourceId,
    pub inventory_id: ResourceId,
    pub product_id: ResourceId,
    pub product_name: String,
    #[serde(rename = "type")]
    pub kind: MovementType,
    pub quantity: i64,
    pub previous_quantity: i64,
    pub new_quantity: i64,
    #[serde(default)]
    pub reason: Option<String>,
    pub user_id: ResourceId,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockItem {
    pub product_id: ResourceId,
    pub product_name: String,
    pub quantity: i64,
    pub min_quantity: i64,
    #[serde(default)]
    pub deficit: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryReport {
    pub total_products: u64,
    pub total_value: f64,
    pub low_stock_count: u64,
    pub out_of_stock_count: u64,
    #[serde(default)]
    pub low_stock_items: Vec<LowStockItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInventoryRequest {
    pub product_id: ResourceId,
    pub quantity: i64,
    pub min_quantity: i64,
    pub max_quantity: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventoryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_quantity: Option<i64>,
}

/// Restock, adjustment or loss against an existing inventory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMovementRequest {
    pub inventory_id: ResourceId,
    #[serde(rename = "type")]
    pub kind: MovementType,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Stock addition addressed by product. The server creates the inventory
/// entry when the product has none yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddStockRequest {
    pub product_id: ResourceId,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
