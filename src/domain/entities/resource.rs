use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Backend-managed records. The table binding never interprets these beyond
/// what the column definitions project out; the typed shapes below exist for
/// detail fetches and form payloads. Fields the backend may omit stay
/// optional.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub license_number: Option<String>,
    pub status: Option<String>,
    pub assigned_vehicle_id: Option<i64>,
    pub assigned_vehicle_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: i64,
    pub name: Option<String>,
    pub plate_number: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub vin: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fob {
    pub id: i64,
    pub fob_number: Option<String>,
    pub status: Option<String>,
    pub vehicle_id: Option<i64>,
    pub vehicle_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteInfo {
    pub id: i64,
    pub name: Option<String>,
    pub start_location: Option<String>,
    pub end_location: Option<String>,
    pub distance_km: Option<f64>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: i64,
    pub route_id: Option<i64>,
    pub route_name: Option<String>,
    pub driver_id: Option<i64>,
    pub driver_name: Option<String>,
    pub vehicle_id: Option<i64>,
    pub vehicle_name: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub status: Option<String>,
    pub project_id: Option<i64>,
    pub project_name: Option<String>,
    pub assigned_user_id: Option<i64>,
    pub assigned_user_name: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub name: Option<String>,
    pub city: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
}

/// Id/name pair returned by the lookup endpoints that feed selects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupOption {
    pub id: i64,
    pub name: String,
}
