use std::sync::Arc;

use serde_json::Value;

use crate::domain::entities::page::{ListPage, PageQuery};
use crate::domain::entities::resource::{LookupOption, Project};
use crate::infra::http::endpoints;
use crate::infra::http::query::QueryString;
use crate::usecase::ports::transport::{ApiError, ApiTransport};
use crate::usecase::services::{decode_envelope, envelope_message};

#[derive(Clone)]
pub struct ProjectService {
    transport: Arc<dyn ApiTransport>,
}

impl ProjectService {
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self { transport }
    }

    pub async fn list(&self, query: &PageQuery, city: &str) -> Result<ListPage<Project>, ApiError> {
        let filters = QueryString::new().filter("City", city);
        let query_string = format!("{}{}", query.to_query_string(), filters.as_str());
        let value = self
            .transport
            .get(endpoints::GET_PROJECTS, &query_string)
            .await?;
        decode_envelope(value)
    }

    pub async fn get_one(&self, id: i64) -> Result<Project, ApiError> {
        let value = self.transport.get_by_id(endpoints::GET_PROJECT, id).await?;
        decode_envelope(value)
    }

    pub async fn create_update(&self, payload: Value) -> Result<String, ApiError> {
        let value = self
            .transport
            .post(endpoints::CREATE_UPDATE_PROJECT, payload)
            .await?;
        envelope_message(value)
    }

    pub async fn delete(&self, id: i64) -> Result<String, ApiError> {
        let value = self
            .transport
            .delete_by_id(endpoints::DELETE_PROJECT, id)
            .await?;
        envelope_message(value)
    }

    // Project-scoped lookups feeding the lead/project forms.

    pub async fn blocks(&self, project_id: i64) -> Result<Vec<LookupOption>, ApiError> {
        self.scoped_lookup(endpoints::GET_PROJECT_BLOCKS, project_id).await
    }

    pub async fn streets(&self, project_id: i64) -> Result<Vec<LookupOption>, ApiError> {
        self.scoped_lookup(endpoints::GET_PROJECT_STREETS, project_id).await
    }

    pub async fn item_types(&self, project_id: i64) -> Result<Vec<LookupOption>, ApiError> {
        self.scoped_lookup(endpoints::GET_PROJECT_ITEM_TYPES, project_id).await
    }

    async fn scoped_lookup(&self, path: &str, project_id: i64) -> Result<Vec<LookupOption>, ApiError> {
        let value = self
            .transport
            .get(path, &format!("?ProjectId={project_id}"))
            .await?;
        decode_envelope(value)
    }
}
