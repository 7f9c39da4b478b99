// ── Sale domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::id::{Resource, ResourceId};

/// How a sale was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PaymentKind {
    /// Debited from the customer's prepaid balance.
    Credit,
    Cash,
    Pix,
    Card,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SaleStatus {
    Completed,
    Cancelled,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: ResourceId,
    pub customer_id: ResourceId,
    pub customer_name: String,
    pub user_id: ResourceId,
    pub user_name: String,
    pub total_amount: f64,
    pub payment_method: PaymentKind,
    pub status: SaleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub items: Vec<SaleItem>,
}

impl Sale {
    pub fn is_cancelled(&self) -> bool {
        self.status == SaleStatus::Cancelled
    }
}

impl Resource for Sale {
    fn id(&self) -> &ResourceId {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub id: ResourceId,
    pub sale_id: ResourceId,
    pub product_id: ResourceId,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub subtotal: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleRequest {
    pub customer_id: ResourceId,
    pub payment_method: PaymentKind,
    pub items: Vec<CreateSaleItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleItem {
    pub product_id: ResourceId,
    pub quantity: u32,
}

/// Aggregated sales over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub total_sales: u64,
    pub total_amount: f64,
    pub average_ticket: f64,
    #[serde(default)]
    pub sales_by_payment_method: Vec<PaymentBreakdown>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentBreakdown {
    pub payment_method: PaymentKind,
    pub count: u64,
    pub total: f64,
}
