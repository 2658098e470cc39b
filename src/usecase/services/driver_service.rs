use std::sync::Arc;

use serde_json::{json, Value};

use crate::domain::entities::page::{ListPage, PageQuery};
use crate::domain::entities::resource::Driver;
use crate::infra::http::endpoints;
use crate::infra::http::query::QueryString;
use crate::usecase::ports::transport::{ApiError, ApiTransport};
use crate::usecase::services::{decode_envelope, envelope_message};

#[derive(Clone)]
pub struct DriverService {
    transport: Arc<dyn ApiTransport>,
}

impl DriverService {
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self { transport }
    }

    pub async fn list(
        &self,
        query: &PageQuery,
        role: &str,
        status: &str,
    ) -> Result<ListPage<Driver>, ApiError> {
        let filters = QueryString::new().filter("Role", role).filter("Status", status);
        let query_string = format!("{}{}", query.to_query_string(), filters.as_str());
        let value = self.transport.get(endpoints::GET_DRIVERS, &query_string).await?;
        decode_envelope(value)
    }

    pub async fn get_one(&self, id: i64) -> Result<Driver, ApiError> {
        let value = self.transport.get_by_id(endpoints::GET_DRIVER, id).await?;
        decode_envelope(value)
    }

    /// A payload without an `id` field creates; with an `id` it updates.
    /// The caller makes that distinction.
    pub async fn create_update(&self, payload: Value) -> Result<String, ApiError> {
        let value = self
            .transport
            .post(endpoints::CREATE_UPDATE_DRIVER, payload)
            .await?;
        envelope_message(value)
    }

    pub async fn delete(&self, id: i64) -> Result<String, ApiError> {
        let value = self
            .transport
            .delete_by_id(endpoints::DELETE_DRIVER, id)
            .await?;
        envelope_message(value)
    }

    pub async fn assign_vehicle(&self, driver_id: i64, vehicle_id: i64) -> Result<String, ApiError> {
        let value = self
            .transport
            .post(
                endpoints::ASSIGN_DRIVER_VEHICLE,
                json!({ "driverId": driver_id, "vehicleId": vehicle_id }),
            )
            .await?;
        envelope_message(value)
    }

    pub async fn unassign_vehicle(&self, driver_id: i64) -> Result<String, ApiError> {
        let value = self
            .transport
            .post(
                endpoints::UNASSIGN_DRIVER_VEHICLE,
                json!({ "driverId": driver_id }),
            )
            .await?;
        envelope_message(value)
    }
}
