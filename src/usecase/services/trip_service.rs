use std::sync::Arc;

use serde_json::{json, Value};

use crate::domain::entities::page::{ListPage, PageQuery};
use crate::domain::entities::resource::Trip;
use crate::infra::http::endpoints;
use crate::infra::http::query::QueryString;
use crate::usecase::ports::transport::{ApiError, ApiTransport};
use crate::usecase::services::{decode_envelope, envelope_message};

#[derive(Clone)]
pub struct TripService {
    transport: Arc<dyn ApiTransport>,
}

impl TripService {
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self { transport }
    }

    pub async fn list(
        &self,
        query: &PageQuery,
        driver_id: Option<i64>,
        route_id: Option<i64>,
    ) -> Result<ListPage<Trip>, ApiError> {
        let filters = QueryString::new()
            .filter_id("DriverId", driver_id)
            .filter_id("RouteId", route_id);
        let query_string = format!("{}{}", query.to_query_string(), filters.as_str());
        let value = self.transport.get(endpoints::GET_TRIPS, &query_string).await?;
        decode_envelope(value)
    }

    pub async fn get_one(&self, id: i64) -> Result<Trip, ApiError> {
        let value = self.transport.get_by_id(endpoints::GET_TRIP, id).await?;
        decode_envelope(value)
    }

    pub async fn create_update(&self, payload: Value) -> Result<String, ApiError> {
        let value = self
            .transport
            .post(endpoints::CREATE_UPDATE_TRIP, payload)
            .await?;
        envelope_message(value)
    }

    pub async fn delete(&self, id: i64) -> Result<String, ApiError> {
        let value = self.transport.delete_by_id(endpoints::DELETE_TRIP, id).await?;
        envelope_message(value)
    }

    pub async fn assign_driver(&self, trip_id: i64, driver_id: i64) -> Result<String, ApiError> {
        let value = self
            .transport
            .post(
                endpoints::ASSIGN_TRIP_DRIVER,
                json!({ "tripId": trip_id, "driverId": driver_id }),
            )
            .await?;
        envelope_message(value)
    }
}
