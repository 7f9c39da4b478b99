use std::sync::Arc;

use cantina_api::{HttpClient, Page};

use super::query::{CategoryQuery, ProductQuery, QueryParams};
use super::{
    CreateRepository, DeleteRepository, FetchRepository, ListRepository, Repository,
    UpdateRepository,
};
use crate::error::CoreError;
use crate::model::{
    Category, CreateCategoryRequest, CreateProductRequest, Product, ResourceId,
    UpdateCategoryRequest, UpdateProductRequest,
};

// ── Products ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct ProductRepository {
    http: Arc<HttpClient>,
}

impl ProductRepository {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }
}

impl Repository for ProductRepository {
    type Item = Product;
}

impl ListRepository for ProductRepository {
    type Query = ProductQuery;

    async fn list(&self, query: &ProductQuery) -> Result<Page<Product>, CoreError> {
        Ok(self
            .http
            .get_page("products", &query.to_params(), "products")
            .await?)
    }
}

impl FetchRepository for ProductRepository {
    async fn get(&self, id: &ResourceId) -> Result<Product, CoreError> {
        Ok(self.http.get(&format!("products/{id}")).await?)
    }
}

impl CreateRepository for ProductRepository {
    type Create = CreateProductRequest;

    async fn create(&self, request: &CreateProductRequest) -> Result<Product, CoreError> {
        Ok(self.http.post("products", request).await?)
    }
}

impl UpdateRepository for ProductRepository {
    type Update = UpdateProductRequest;

    async fn update(
        &self,
        id: &ResourceId,
        request: &UpdateProductRequest,
    ) -> Result<Product, CoreError> {
        Ok(self.http.put(&format!("products/{id}"), request).await?)
    }
}

impl DeleteRepository for ProductRepository {
    async fn delete(&self, id: &ResourceId) -> Result<(), CoreError> {
        Ok(self.http.delete(&format!("products/{id}")).await?)
    }
}

// ── Categories ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct CategoryRepository {
    http: Arc<HttpClient>,
}

impl CategoryRepository {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }
}

impl Repository for CategoryRepository {
    type Item = Category;
}

impl ListRepository for CategoryRepository {
    type Query = CategoryQuery;

    async fn list(&self, query: &CategoryQuery) -> Result<Page<Category>, CoreError> {
        Ok(self
            .http
            .get_page("categories", &query.to_params(), "categories")
            .await?)
    }
}

impl FetchRepository for CategoryRepository {
    async fn get(&self, id: &ResourceId) -> Result<Category, CoreError> {
        Ok(self.http.get(&format!("categories/{id}")).await?)
    }
}

impl CreateRepository for CategoryRepository {
    type Create = CreateCategoryRequest;

    async fn create(&self, request: &CreateCategoryRequest) -> Result<Category, CoreError> {
        Ok(self.http.post("categories", request).await?)
    }
}

impl UpdateRepository for CategoryRepository {
    type Update = UpdateCategoryRequest;

    async fn update(
        &self,
        id: &ResourceId,
        request: &UpdateCategoryRequest,
    ) -> Result<Category, CoreError> {
        Ok(self.http.put(&format!("categories/{id}"), request).await?)
    }
}

impl DeleteRepository for CategoryRepository {
    async fn delete(&self, id: &ResourceId) -> Result<(), CoreError> {
        Ok(self.http.delete(&format!("categories/{id}")).await?)
    }
}
