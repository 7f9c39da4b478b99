// ── Payment method domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{Resource, ResourceId};

/// A payment option configured on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub id: ResourceId,
    /// Machine name, e.g. `"pix"`.
    pub name: String,
    pub display_name: String,
    /// Whether the customer must hold an account (prepaid balance).
    pub requires_account: bool,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for PaymentMethod {
    fn id(&self) -> &ResourceId {
        &self.id
    }
}
