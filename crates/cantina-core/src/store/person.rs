// ── People store ──
//
// The only store that keeps `pagination.total` in step with local creates
// and deletes.

use std::sync::Arc;

use super::resource::{CachePolicy, ResourceStore, StoreMessages};
use super::slot::Slot;
use crate::error::CoreError;
use crate::model::{Person, ResourceId};
use crate::repository::PersonRepository;

const MESSAGES: StoreMessages = StoreMessages::new("person", "Erro ao carregar pessoas")
    .with_load_one("Erro ao carregar pessoa")
    .with_create("Erro ao criar pessoa")
    .with_update("Erro ao atualizar pessoa")
    .with_delete("Erro ao deletar pessoa");

#[derive(Default)]
pub struct PersonExtras {
    pub dependents: Slot<Vec<Person>>,
}

pub type PersonStore = ResourceStore<PersonRepository, PersonExtras>;

impl ResourceStore<PersonRepository, PersonExtras> {
    pub fn new(repo: PersonRepository) -> Self {
        Self::with_policy(repo, CachePolicy::default().tracking_total(), MESSAGES)
    }

    /// Look a person up by CPF into the current-item slot.
    pub async fn load_by_cpf(&self, cpf: &str) -> Result<Arc<Person>, CoreError> {
        let person = self
            .tracker()
            .track("Pessoa não encontrada", self.repository().by_cpf(cpf))
            .await?;
        let person = Arc::new(person);
        self.cache().set_current(Arc::clone(&person));
        Ok(person)
    }

    /// Run a text search; its result page replaces the cached page. Takes
    /// a page ticket like `load`, so the stale policy orders the two.
    pub async fn search(
        &self,
        text: &str,
        page: u32,
        limit: u32,
    ) -> Result<Arc<Vec<Arc<Person>>>, CoreError> {
        let ticket = self.issue_page_ticket();
        let found = self
            .tracker()
            .track(
                "Erro ao buscar pessoas",
                self.repository().search(text, page, limit),
            )
            .await?;
        let items: Arc<Vec<Arc<Person>>> =
            Arc::new(found.items.into_iter().map(Arc::new).collect());
        self.replace_page_if_current(ticket, Arc::clone(&items), found.pagination);
        Ok(items)
    }

    pub async fn load_dependents(
        &self,
        responsible_id: &ResourceId,
    ) -> Result<Vec<Person>, CoreError> {
        let dependents = self
            .tracker()
            .track(
                "Erro ao carregar dependentes",
                self.repository().dependents(responsible_id),
            )
            .await?;
        self.extra().dependents.set(dependents.clone());
        Ok(dependents)
    }

    pub fn dependents(&self) -> Vec<Person> {
        self.extra().dependents.get()
    }

    pub fn clear_dependents(&self) {
        self.extra().dependents.clear();
    }

    /// Cached people with `active` set.
    pub fn active(&self) -> Vec<Arc<Person>> {
        self.items().iter().filter(|p| p.active).cloned().collect()
    }

    pub fn inactive(&self) -> Vec<Arc<Person>> {
        self.items().iter().filter(|p| !p.active).cloned().collect()
    }

    pub fn has_error(&self) -> bool {
        self.status().has_error()
    }

    pub fn reset(&self) {
        self.reset_collection();
        self.clear_dependents();
    }
}
