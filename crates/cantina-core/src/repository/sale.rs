use std::sync::Arc;

use cantina_api::{HttpClient, Page};

use super::query::{DateRange, QueryParams, SaleQuery};
use super::{CreateRepository, FetchRepository, ListRepository, Repository};
use crate::error::CoreError;
use crate::model::{CreateSaleRequest, ResourceId, Sale, SalesSummary};

/// Sales. Sales are never edited or deleted, only cancelled.
#[derive(Clone)]
pub struct SaleRepository {
    http: Arc<HttpClient>,
}

impl SaleRepository {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn cancel(&self, id: &ResourceId) -> Result<Sale, CoreError> {
        Ok(self.http.patch_empty(&format!("sales/{id}/cancel")).await?)
    }

    pub async fn summary(&self, range: &DateRange) -> Result<SalesSummary, CoreError> {
        Ok(self
            .http
            .get_with_params("sales/summary", &range.to_params())
            .await?)
    }
}

impl Repository for SaleRepository {
    type Item = Sale;
}

impl ListRepository for SaleRepository {
    type Query = SaleQuery;

    async fn list(&self, query: &SaleQuery) -> Result<Page<Sale>, CoreError> {
        Ok(self
            .http
            .get_page("sales", &query.to_params(), "sales")
            .await?)
    }
}

impl FetchRepository for SaleRepository {
    async fn get(&self, id: &ResourceId) -> Result<Sale, CoreError> {
        Ok(self.http.get(&format!("sales/{id}")).await?)
    }
}

impl CreateRepository for SaleRepository {
    type Create = CreateSaleRequest;

    async fn create(&self, request: &CreateSaleRequest) -> Result<Sale, CoreError> {
        Ok(self.http.post("sales", request).await?)
    }
}
