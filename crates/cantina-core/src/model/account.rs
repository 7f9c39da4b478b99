// ── Account domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::customer::BalanceType;
use super::id::ResourceId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: ResourceId,
    pub customer_id: ResourceId,
    pub balance: f64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountTransaction {
    pub id: ResourceId,
    pub account_id: ResourceId,
    pub customer_id: ResourceId,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: BalanceType,
    pub description: String,
    #[serde(default)]
    pub user_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCreditRequest {
    pub customer_id: ResourceId,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
