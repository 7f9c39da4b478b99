use std::sync::Arc;

use cantina_api::{HttpClient, Page};

use super::{FetchRepository, ListRepository, Repository};
use crate::error::CoreError;
use crate::model::{PaymentMethod, ResourceId};

/// Read-only catalogue of payment methods.
#[derive(Clone)]
pub struct PaymentMethodRepository {
    http: Arc<HttpClient>,
}

impl PaymentMethodRepository {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }
}

impl Repository for PaymentMethodRepository {
    type Item = PaymentMethod;
}

impl ListRepository for PaymentMethodRepository {
    type Query = ();

    /// The endpoint returns a bare array; it is wrapped as a single page.
    async fn list(&self, _query: &()) -> Result<Page<PaymentMethod>, CoreError> {
        let items: Vec<PaymentMethod> = self.http.get("payment-methods").await?;
        Ok(Page::single(items))
    }
}

impl FetchRepository for PaymentMethodRepository {
    async fn get(&self, id: &ResourceId) -> Result<PaymentMethod, CoreError> {
        Ok(self.http.get(&format!("payment-methods/{id}")).await?)
    }
}
