// ── Customer domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::id::{Resource, ResourceId};
use super::sale::Sale;

/// A canteen customer holding a prepaid balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: ResourceId,
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub phone: String,
    pub student_id: String,
    pub balance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsible_id: Option<ResourceId>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resource for Customer {
    fn id(&self) -> &ResourceId {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub phone: String,
    pub student_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible_id: Option<ResourceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_balance: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible_id: Option<ResourceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Amount moved by a credit or debit on a customer balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceChangeRequest {
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl BalanceChangeRequest {
    pub fn new(amount: f64) -> Self {
        Self {
            amount,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BalanceType {
    Credit,
    Debit,
}

/// One line of a customer's balance history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceEntry {
    pub id: ResourceId,
    pub customer_id: ResourceId,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: BalanceType,
    #[serde(default)]
    pub description: Option<String>,
    pub user_id: ResourceId,
    pub created_at: DateTime<Utc>,
}

/// Purchase history of one customer, with aggregate totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSales {
    pub customer_id: ResourceId,
    pub customer_name: String,
    pub total_purchases: u64,
    pub total_spent: f64,
    #[serde(default)]
    pub sales: Vec<Sale>,
}
