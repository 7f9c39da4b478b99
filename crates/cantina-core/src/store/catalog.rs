// ── Product and category stores ──
//
// Plain instantiations of the generic engine. Categories append new
// entries so the list keeps creation order; products put them first.

use super::collection::InsertAt;
use super::resource::{CachePolicy, ResourceStore, StoreMessages};
use crate::repository::{CategoryRepository, ProductRepository};

const PRODUCT_MESSAGES: StoreMessages = StoreMessages::new("product", "Erro ao buscar produtos")
    .with_load_one("Erro ao buscar produto")
    .with_create("Erro ao criar produto")
    .with_update("Erro ao atualizar produto")
    .with_delete("Erro ao deletar produto");

const CATEGORY_MESSAGES: StoreMessages = StoreMessages::new("category", "Erro ao buscar categorias")
    .with_load_one("Erro ao buscar categoria")
    .with_create("Erro ao criar categoria")
    .with_update("Erro ao atualizar categoria")
    .with_delete("Erro ao deletar categoria");

pub type ProductStore = ResourceStore<ProductRepository>;
pub type CategoryStore = ResourceStore<CategoryRepository>;

impl ResourceStore<ProductRepository> {
    pub fn new(repo: ProductRepository) -> Self {
        Self::with_policy(repo, CachePolicy::default(), PRODUCT_MESSAGES)
    }

    pub fn reset(&self) {
        self.reset_collection();
    }
}

impl ResourceStore<CategoryRepository> {
    pub fn new(repo: CategoryRepository) -> Self {
        Self::with_policy(
            repo,
            CachePolicy {
                insert_at: InsertAt::Back,
                ..CachePolicy::default()
            },
            CATEGORY_MESSAGES,
        )
    }

    pub fn reset(&self) {
        self.reset_collection();
    }
}
