use std::sync::Arc;

use serde_json::Value;

use crate::domain::entities::page::{ListPage, PageQuery};
use crate::domain::entities::resource::RouteInfo;
use crate::infra::http::endpoints;
use crate::usecase::ports::transport::{ApiError, ApiTransport};
use crate::usecase::services::{decode_envelope, envelope_message};

#[derive(Clone)]
pub struct RouteService {
    transport: Arc<dyn ApiTransport>,
}

impl RouteService {
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self { transport }
    }

    pub async fn list(&self, query: &PageQuery) -> Result<ListPage<RouteInfo>, ApiError> {
        let value = self
            .transport
            .get(endpoints::GET_ROUTES, &query.to_query_string())
            .await?;
        decode_envelope(value)
    }

    pub async fn get_one(&self, id: i64) -> Result<RouteInfo, ApiError> {
        let value = self.transport.get_by_id(endpoints::GET_ROUTE, id).await?;
        decode_envelope(value)
    }

    pub async fn create_update(&self, payload: Value) -> Result<String, ApiError> {
        let value = self
            .transport
            .post(endpoints::CREATE_UPDATE_ROUTE, payload)
            .await?;
        envelope_message(value)
    }

    pub async fn delete(&self, id: i64) -> Result<String, ApiError> {
        let value = self.transport.delete_by_id(endpoints::DELETE_ROUTE, id).await?;
        envelope_message(value)
    }
}
