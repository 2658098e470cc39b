use std::sync::Arc;

use serde_json::{json, Value};

use crate::domain::entities::page::{ListPage, PageQuery};
use crate::domain::entities::resource::Lead;
use crate::infra::http::endpoints;
use crate::infra::http::query::QueryString;
use crate::usecase::ports::transport::{ApiError, ApiTransport, FilePart};
use crate::usecase::services::{decode_envelope, envelope_message};

#[derive(Clone)]
pub struct LeadService {
    transport: Arc<dyn ApiTransport>,
}

impl LeadService {
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self { transport }
    }

    pub async fn list(
        &self,
        query: &PageQuery,
        status: &str,
        project_id: Option<i64>,
    ) -> Result<ListPage<Lead>, ApiError> {
        let filters = QueryString::new()
            .filter("Status", status)
            .filter_id("ProjectId", project_id);
        let query_string = format!("{}{}", query.to_query_string(), filters.as_str());
        let value = self.transport.get(endpoints::GET_LEADS, &query_string).await?;
        decode_envelope(value)
    }

    pub async fn get_one(&self, id: i64) -> Result<Lead, ApiError> {
        let value = self.transport.get_by_id(endpoints::GET_LEAD, id).await?;
        decode_envelope(value)
    }

    pub async fn create_update(&self, payload: Value) -> Result<String, ApiError> {
        let value = self
            .transport
            .post(endpoints::CREATE_UPDATE_LEAD, payload)
            .await?;
        envelope_message(value)
    }

    pub async fn delete(&self, id: i64) -> Result<String, ApiError> {
        let value = self.transport.delete_by_id(endpoints::DELETE_LEAD, id).await?;
        envelope_message(value)
    }

    /// The assignment endpoint takes the target user both as a query
    /// parameter and in the body.
    pub async fn assign_to_user(&self, lead_id: i64, user_id: i64) -> Result<String, ApiError> {
        let path = format!("{}?userId={user_id}", endpoints::ASSIGN_LEAD_USER);
        let value = self
            .transport
            .post(&path, json!({ "leadId": lead_id, "userId": user_id }))
            .await?;
        envelope_message(value)
    }

    /// Follow-ups go up as form data because they may carry an attachment.
    pub async fn add_follow_up(
        &self,
        lead_id: i64,
        note: &str,
        attachment: Option<FilePart>,
    ) -> Result<String, ApiError> {
        let fields = vec![
            ("leadId".to_string(), lead_id.to_string()),
            ("note".to_string(), note.to_string()),
        ];
        let value = self
            .transport
            .post_multipart(endpoints::ADD_LEAD_FOLLOW_UP, fields, attachment)
            .await?;
        envelope_message(value)
    }
}
