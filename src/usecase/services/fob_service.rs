use std::sync::Arc;

use serde_json::{json, Value};

use crate::domain::entities::page::{ListPage, PageQuery};
use crate::domain::entities::resource::Fob;
use crate::infra::http::endpoints;
use crate::infra::http::query::QueryString;
use crate::usecase::ports::transport::{ApiError, ApiTransport};
use crate::usecase::services::{decode_envelope, envelope_message};

#[derive(Clone)]
pub struct FobService {
    transport: Arc<dyn ApiTransport>,
}

impl FobService {
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self { transport }
    }

    pub async fn list(
        &self,
        query: &PageQuery,
        vehicle_id: Option<i64>,
    ) -> Result<ListPage<Fob>, ApiError> {
        let filters = QueryString::new().filter_id("VehicleId", vehicle_id);
        let query_string = format!("{}{}", query.to_query_string(), filters.as_str());
        let value = self.transport.get(endpoints::GET_FOBS, &query_string).await?;
        decode_envelope(value)
    }

    pub async fn get_one(&self, id: i64) -> Result<Fob, ApiError> {
        let value = self.transport.get_by_id(endpoints::GET_FOB, id).await?;
        decode_envelope(value)
    }

    pub async fn create_update(&self, payload: Value) -> Result<String, ApiError> {
        let value = self.transport.post(endpoints::CREATE_UPDATE_FOB, payload).await?;
        envelope_message(value)
    }

    pub async fn delete(&self, id: i64) -> Result<String, ApiError> {
        let value = self.transport.delete_by_id(endpoints::DELETE_FOB, id).await?;
        envelope_message(value)
    }

    pub async fn assign_to_vehicle(&self, fob_id: i64, vehicle_id: i64) -> Result<String, ApiError> {
        let value = self
            .transport
            .post(
                endpoints::ASSIGN_FOB_VEHICLE,
                json!({ "fobId": fob_id, "vehicleId": vehicle_id }),
            )
            .await?;
        envelope_message(value)
    }

    pub async fn unassign_from_vehicle(&self, fob_id: i64) -> Result<String, ApiError> {
        let value = self
            .transport
            .post(endpoints::UNASSIGN_FOB_VEHICLE, json!({ "fobId": fob_id }))
            .await?;
        envelope_message(value)
    }
}
