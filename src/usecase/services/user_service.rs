use std::sync::Arc;

use serde_json::Value;

use crate::domain::entities::page::{ListPage, PageQuery};
use crate::domain::entities::resource::{LookupOption, UserAccount};
use crate::infra::http::endpoints;
use crate::infra::http::query::QueryString;
use crate::usecase::ports::transport::{ApiError, ApiTransport};
use crate::usecase::services::{decode_envelope, envelope_message};

#[derive(Clone)]
pub struct UserService {
    transport: Arc<dyn ApiTransport>,
}

impl UserService {
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self { transport }
    }

    pub async fn list(
        &self,
        query: &PageQuery,
        role: &str,
        status: &str,
    ) -> Result<ListPage<UserAccount>, ApiError> {
        let filters = QueryString::new().filter("Role", role).filter("Status", status);
        let query_string = format!("{}{}", query.to_query_string(), filters.as_str());
        let value = self.transport.get(endpoints::GET_USERS, &query_string).await?;
        decode_envelope(value)
    }

    pub async fn create_update(&self, payload: Value) -> Result<String, ApiError> {
        let value = self
            .transport
            .post(endpoints::CREATE_UPDATE_USER, payload)
            .await?;
        envelope_message(value)
    }

    pub async fn delete(&self, id: i64) -> Result<String, ApiError> {
        let value = self.transport.delete_by_id(endpoints::DELETE_USER, id).await?;
        envelope_message(value)
    }

    pub async fn roles(&self) -> Result<Vec<LookupOption>, ApiError> {
        let value = self.transport.get(endpoints::GET_ROLES, "").await?;
        decode_envelope(value)
    }
}
