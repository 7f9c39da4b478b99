use std::sync::Arc;

use cantina_api::{HttpClient, Page};

use super::query::{PersonQuery, QueryParams};
use super::{
    CreateRepository, DeleteRepository, FetchRepository, ListRepository, Repository,
    UpdateRepository,
};
use crate::error::CoreError;
use crate::model::{CreatePersonRequest, Person, ResourceId, UpdatePersonRequest};
use crate::validation::strip_non_digits;

#[derive(Clone)]
pub struct PersonRepository {
    http: Arc<HttpClient>,
}

impl PersonRepository {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Look a person up by CPF. Formatting characters are stripped first.
    pub async fn by_cpf(&self, cpf: &str) -> Result<Person, CoreError> {
        let digits = strip_non_digits(cpf);
        Ok(self.http.get(&format!("people/cpf/{digits}")).await?)
    }

    /// Free-text search over name, CPF and email.
    pub async fn search(
        &self,
        text: &str,
        page: u32,
        limit: u32,
    ) -> Result<Page<Person>, CoreError> {
        let params = [
            ("q", text.to_owned()),
            ("page", page.to_string()),
            ("limit", limit.to_string()),
        ];
        Ok(self
            .http
            .get_page("people/search", &params, "people")
            .await?)
    }

    pub async fn dependents(&self, responsible_id: &ResourceId) -> Result<Vec<Person>, CoreError> {
        Ok(self
            .http
            .get(&format!("people/{responsible_id}/dependents"))
            .await?)
    }
}

impl Repository for PersonRepository {
    type Item = Person;
}

impl ListRepository for PersonRepository {
    type Query = PersonQuery;

    async fn list(&self, query: &PersonQuery) -> Result<Page<Person>, CoreError> {
        Ok(self
            .http
            .get_page("people", &query.to_params(), "people")
            .await?)
    }
}

impl FetchRepository for PersonRepository {
    async fn get(&self, id: &ResourceId) -> Result<Person, CoreError> {
        Ok(self.http.get(&format!("people/{id}")).await?)
    }
}

impl CreateRepository for PersonRepository {
    type Create = CreatePersonRequest;

    async fn create(&self, request: &CreatePersonRequest) -> Result<Person, CoreError> {
        Ok(self.http.post("people", request).await?)
    }
}

impl UpdateRepository for PersonRepository {
    type Update = UpdatePersonRequest;

    async fn update(
        &self,
        id: &ResourceId,
        request: &UpdatePersonRequest,
    ) -> Result<Person, CoreError> {
        Ok(self.http.put(&format!("people/{id}"), request).await?)
    }
}

impl DeleteRepository for PersonRepository {
    async fn delete(&self, id: &ResourceId) -> Result<(), CoreError> {
        Ok(self.http.delete(&format!("people/{id}")).await?)
    }
}
