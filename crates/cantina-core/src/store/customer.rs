// ── Customer store ──

use std::sync::Arc;

use tracing::debug;

use super::collection::InsertAt;
use super::resource::{CachePolicy, ResourceStore, StoreMessages};
use super::slot::Slot;
use crate::error::CoreError;
use crate::model::{BalanceChangeRequest, BalanceEntry, Customer, CustomerSales, ResourceId, Sale};
use crate::repository::CustomerRepository;

const MESSAGES: StoreMessages = StoreMessages::new("customer", "Erro ao buscar clientes")
    .with_load_one("Erro ao buscar cliente")
    .with_create("Erro ao criar cliente")
    .with_update("Erro ao atualizar cliente")
    .with_delete("Erro ao deletar cliente");

/// Balance history and purchases of the customer last inspected.
#[derive(Default)]
pub struct CustomerExtras {
    pub balance_history: Slot<Vec<BalanceEntry>>,
    pub sales: Slot<Vec<Sale>>,
}

pub type CustomerStore = ResourceStore<CustomerRepository, CustomerExtras>;

impl ResourceStore<CustomerRepository, CustomerExtras> {
    pub fn new(repo: CustomerRepository) -> Self {
        Self::with_policy(
            repo,
            CachePolicy {
                insert_at: InsertAt::Front,
                ..CachePolicy::default()
            },
            MESSAGES,
        )
    }

    /// Credit the customer's balance and patch the cached copy.
    pub async fn add_credit(
        &self,
        id: &ResourceId,
        request: &BalanceChangeRequest,
    ) -> Result<Arc<Customer>, CoreError> {
        debug!(%id, amount = request.amount, "adding credit");
        let customer = self
            .tracker()
            .track(
                "Erro ao adicionar crédito",
                self.repository().add_credit(id, request),
            )
            .await?;
        Ok(self.patch(id, customer))
    }

    /// Debit the customer's balance and patch the cached copy.
    pub async fn debit_credit(
        &self,
        id: &ResourceId,
        request: &BalanceChangeRequest,
    ) -> Result<Arc<Customer>, CoreError> {
        debug!(%id, amount = request.amount, "debiting credit");
        let customer = self
            .tracker()
            .track(
                "Erro ao debitar crédito",
                self.repository().debit_credit(id, request),
            )
            .await?;
        Ok(self.patch(id, customer))
    }

    pub async fn load_balance_history(
        &self,
        id: &ResourceId,
    ) -> Result<Vec<BalanceEntry>, CoreError> {
        let history = self
            .tracker()
            .track(
                "Erro ao buscar histórico",
                self.repository().balance_history(id),
            )
            .await?;
        self.extra().balance_history.set(history.clone());
        Ok(history)
    }

    pub async fn load_sales(&self, id: &ResourceId) -> Result<CustomerSales, CoreError> {
        let sales = self
            .tracker()
            .track("Erro ao buscar vendas", self.repository().sales(id))
            .await?;
        self.extra().sales.set(sales.sales.clone());
        Ok(sales)
    }

    pub fn balance_history(&self) -> Vec<BalanceEntry> {
        self.extra().balance_history.get()
    }

    pub fn customer_sales(&self) -> Vec<Sale> {
        self.extra().sales.get()
    }

    pub fn reset(&self) {
        self.reset_collection();
        self.extra().balance_history.clear();
        self.extra().sales.clear();
    }

    fn patch(&self, id: &ResourceId, customer: Customer) -> Arc<Customer> {
        let customer = Arc::new(customer);
        self.cache().replace(id, &customer);
        customer
    }
}
