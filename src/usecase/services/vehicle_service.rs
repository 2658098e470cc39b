use std::sync::Arc;

use serde_json::Value;

use crate::domain::entities::page::{ListPage, PageQuery};
use crate::domain::entities::resource::Vehicle;
use crate::infra::http::endpoints;
use crate::infra::http::query::QueryString;
use crate::usecase::ports::transport::{ApiError, ApiTransport};
use crate::usecase::services::{decode_envelope, envelope_message};

#[derive(Clone)]
pub struct VehicleService {
    transport: Arc<dyn ApiTransport>,
}

impl VehicleService {
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self { transport }
    }

    pub async fn list(&self, query: &PageQuery, status: &str) -> Result<ListPage<Vehicle>, ApiError> {
        let filters = QueryString::new().filter("Status", status);
        let query_string = format!("{}{}", query.to_query_string(), filters.as_str());
        let value = self.transport.get(endpoints::GET_VEHICLES, &query_string).await?;
        decode_envelope(value)
    }

    pub async fn get_one(&self, id: i64) -> Result<Vehicle, ApiError> {
        let value = self.transport.get_by_id(endpoints::GET_VEHICLE, id).await?;
        decode_envelope(value)
    }

    pub async fn create_update(&self, payload: Value) -> Result<String, ApiError> {
        let value = self
            .transport
            .post(endpoints::CREATE_UPDATE_VEHICLE, payload)
            .await?;
        envelope_message(value)
    }

    pub async fn delete(&self, id: i64) -> Result<String, ApiError> {
        let value = self
            .transport
            .delete_by_id(endpoints::DELETE_VEHICLE, id)
            .await?;
        envelope_message(value)
    }
}
