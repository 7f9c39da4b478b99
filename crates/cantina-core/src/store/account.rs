// ── Account store ──
//
// Accounts are looked up per customer and never cached as a collection,
// so this store carries only the request status and the transaction log
// of the last customer inspected.

use tokio::sync::watch;

use super::slot::Slot;
use super::status::{RequestStatus, StatusTracker};
use crate::error::CoreError;
use crate::model::{Account, AccountCreditRequest, AccountTransaction, ResourceId};
use crate::repository::AccountRepository;

pub struct AccountStore {
    repo: AccountRepository,
    status: StatusTracker,
    transactions: Slot<Vec<AccountTransaction>>,
}

impl AccountStore {
    pub fn new(repo: AccountRepository) -> Self {
        Self {
            repo,
            status: StatusTracker::new(),
            transactions: Slot::default(),
        }
    }

    /// Credit a customer's account. The transaction log is not refreshed.
    pub async fn add_credit(
        &self,
        request: &AccountCreditRequest,
    ) -> Result<AccountTransaction, CoreError> {
        self.status
            .track("Erro ao adicionar crédito", self.repo.add_credit(request))
            .await
    }

    pub async fn load_history(
        &self,
        customer_id: &ResourceId,
    ) -> Result<Vec<AccountTransaction>, CoreError> {
        let transactions = self
            .status
            .track("Erro ao buscar histórico", self.repo.history(customer_id))
            .await?;
        self.transactions.set(transactions.clone());
        Ok(transactions)
    }

    pub async fn account_for_customer(
        &self,
        customer_id: &ResourceId,
    ) -> Result<Account, CoreError> {
        self.status
            .track("Erro ao buscar conta", self.repo.by_customer(customer_id))
            .await
    }

    pub fn transactions(&self) -> Vec<AccountTransaction> {
        self.transactions.get()
    }

    pub fn subscribe_transactions(&self) -> watch::Receiver<Vec<AccountTransaction>> {
        self.transactions.subscribe()
    }

    pub fn status(&self) -> RequestStatus {
        self.status.current()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<RequestStatus> {
        self.status.subscribe()
    }

    pub fn clear_error(&self) {
        self.status.clear_error();
    }

    pub fn reset(&self) {
        self.status.reset();
        self.transactions.clear();
    }
}
