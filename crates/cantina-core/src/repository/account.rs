use std::sync::Arc;

use cantina_api::HttpClient;
use serde::Deserialize;

use crate::error::CoreError;
use crate::model::{Account, AccountCreditRequest, AccountTransaction, ResourceId};

#[derive(Deserialize)]
struct HistoryBody {
    transactions: Vec<AccountTransaction>,
}

/// Customer accounts. Accounts are not a cached collection, so this
/// repository implements none of the capability traits.
#[derive(Clone)]
pub struct AccountRepository {
    http: Arc<HttpClient>,
}

impl AccountRepository {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn add_credit(
        &self,
        request: &AccountCreditRequest,
    ) -> Result<AccountTransaction, CoreError> {
        Ok(self.http.post("accounts/credit", request).await?)
    }

    pub async fn history(
        &self,
        customer_id: &ResourceId,
    ) -> Result<Vec<AccountTransaction>, CoreError> {
        let body: HistoryBody = self
            .http
            .get(&format!("accounts/history/{customer_id}"))
            .await?;
        Ok(body.transactions)
    }

    pub async fn by_customer(&self, customer_id: &ResourceId) -> Result<Account, CoreError> {
        Ok(self
            .http
            .get(&format!("accounts/customer/{customer_id}"))
            .await?)
    }
}
