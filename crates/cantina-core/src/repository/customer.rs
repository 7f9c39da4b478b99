use std::sync::Arc;

use cantina_api::{HttpClient, Page, PageParams};
use serde::Deserialize;

use super::query::QueryParams;
use super::{
    CreateRepository, DeleteRepository, FetchRepository, ListRepository, Repository,
    UpdateRepository,
};
use crate::error::CoreError;
use crate::model::{
    BalanceChangeRequest, BalanceEntry, CreateCustomerRequest, Customer, CustomerSales,
    ResourceId, UpdateCustomerRequest,
};

#[derive(Deserialize)]
struct BalanceHistoryBody {
    history: Vec<BalanceEntry>,
}

/// Customers and their prepaid balances.
#[derive(Clone)]
pub struct CustomerRepository {
    http: Arc<HttpClient>,
}

impl CustomerRepository {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn add_credit(
        &self,
        id: &ResourceId,
        request: &BalanceChangeRequest,
    ) -> Result<Customer, CoreError> {
        Ok(self
            .http
            .post(&format!("customers/{id}/credit/add"), request)
            .await?)
    }

    pub async fn debit_credit(
        &self,
        id: &ResourceId,
        request: &BalanceChangeRequest,
    ) -> Result<Customer, CoreError> {
        Ok(self
            .http
            .post(&format!("customers/{id}/credit/debit"), request)
            .await?)
    }

    pub async fn balance_history(&self, id: &ResourceId) -> Result<Vec<BalanceEntry>, CoreError> {
        let body: BalanceHistoryBody = self
            .http
            .get(&format!("customers/{id}/balance-history"))
            .await?;
        Ok(body.history)
    }

    pub async fn sales(&self, id: &ResourceId) -> Result<CustomerSales, CoreError> {
        Ok(self.http.get(&format!("customers/{id}/sales")).await?)
    }
}

impl Repository for CustomerRepository {
    type Item = Customer;
}

impl ListRepository for CustomerRepository {
    type Query = PageParams;

    async fn list(&self, query: &PageParams) -> Result<Page<Customer>, CoreError> {
        Ok(self
            .http
            .get_page("customers", &query.to_params(), "customers")
            .await?)
    }
}

impl FetchRepository for CustomerRepository {
    async fn get(&self, id: &ResourceId) -> Result<Customer, CoreError> {
        Ok(self.http.get(&format!("customers/{id}")).await?)
    }
}

impl CreateRepository for CustomerRepository {
    type Create = CreateCustomerRequest;

    async fn create(&self, request: &CreateCustomerRequest) -> Result<Customer, CoreError> {
        Ok(self.http.post("customers", request).await?)
    }
}

impl UpdateRepository for CustomerRepository {
    type Update = UpdateCustomerRequest;

    async fn update(
        &self,
        id: &ResourceId,
        request: &UpdateCustomerRequest,
    ) -> Result<Customer, CoreError> {
        Ok(self.http.put(&format!("customers/{id}"), request).await?)
    }
}

impl DeleteRepository for CustomerRepository {
    async fn delete(&self, id: &ResourceId) -> Result<(), CoreError> {
        Ok(self.http.delete(&format!("customers/{id}")).await?)
    }
}
