use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::domain::entities::page::{ListPage, PageQuery};
use crate::domain::entities::session::SessionStore;
use crate::ui::state::table::TableCore;
use crate::usecase::ports::transport::{ApiError, ApiTransport, FilePart};
use crate::usecase::services::auth_service::AuthService;
use crate::usecase::services::driver_service::DriverService;
use crate::usecase::services::fob_service::FobService;
use crate::usecase::services::lead_service::LeadService;
use crate::usecase::services::project_service::ProjectService;
use crate::usecase::services::trip_service::TripService;
use crate::usecase::services::vehicle_service::VehicleService;

#[derive(Debug, Clone, PartialEq)]
struct RecordedCall {
    method: &'static str,
    path: String,
    query: String,
    payload: Option<Value>,
}

/// In-process stand-in for the HTTP transport: hands back queued envelope
/// bodies and records every call so tests can assert on the wire shape.
#[derive(Default)]
struct FakeTransport {
    responses: Mutex<VecDeque<Value>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeTransport {
    fn with_responses(responses: Vec<Value>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn record(&self, method: &'static str, path: &str, query: &str, payload: Option<Value>) {
        self.calls
            .lock()
            .expect("calls lock should not be poisoned")
            .push(RecordedCall {
                method,
                path: path.to_string(),
                query: query.to_string(),
                payload,
            });
    }

    fn next_response(&self) -> Result<Value, ApiError> {
        self.responses
            .lock()
            .expect("responses lock should not be poisoned")
            .pop_front()
            .ok_or_else(|| ApiError::Network("no response queued".to_string()))
    }

    fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .expect("calls lock should not be poisoned")
            .clone()
    }
}

#[async_trait]
impl ApiTransport for FakeTransport {
    async fn get(&self, path: &str, query: &str) -> Result<Value, ApiError> {
        self.record("GET", path, query, None);
        self.next_response()
    }

    async fn get_by_id(&self, path: &str, id: i64) -> Result<Value, ApiError> {
        self.record("GET", path, &format!("?id={id}"), None);
        self.next_response()
    }

    async fn post(&self, path: &str, payload: Value) -> Result<Value, ApiError> {
        self.record("POST", path, "", Some(payload));
        self.next_response()
    }

    async fn post_text_plain(&self, path: &str, body: String) -> Result<Value, ApiError> {
        self.record("POST", path, "", Some(Value::String(body)));
        self.next_response()
    }

    async fn post_multipart(
        &self,
        path: &str,
        fields: Vec<(String, String)>,
        file: Option<FilePart>,
    ) -> Result<Value, ApiError> {
        let file = file.map(|part| json!({
            "field": part.field,
            "path": part.path.display().to_string(),
        }));
        self.record("POST", path, "", Some(json!({ "fields": fields, "file": file })));
        self.next_response()
    }

    async fn put(&self, path: &str, payload: Value) -> Result<Value, ApiError> {
        self.record("PUT", path, "", Some(payload));
        self.next_response()
    }

    async fn delete_by_id(&self, path: &str, id: i64) -> Result<Value, ApiError> {
        self.record("DELETE", path, &format!("?id={id}"), None);
        self.next_response()
    }
}

fn empty_list_envelope() -> Value {
    json!({
        "isSuccess": true,
        "message": "",
        "result": { "items": [], "paginationInfo": { "totalPages": 0, "totalCount": 0 } }
    })
}

#[tokio::test]
async fn driver_list_sends_filters_and_omits_empty_ones() {
    let transport = FakeTransport::with_responses(vec![empty_list_envelope()]);
    let drivers = DriverService::new(transport.clone());

    drivers
        .list(&PageQuery::default(), "", "Active")
        .await
        .expect("empty list should decode");

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].path, "/Driver/GetDrivers");
    assert_eq!(
        calls[0].query,
        "?pageNumber=1&pageSize=10&SortOrder=false&Status=Active",
        "empty role filter must leave no trace in the query"
    );
}

#[tokio::test]
async fn driver_list_includes_keyword_only_when_searching() {
    let transport =
        FakeTransport::with_responses(vec![empty_list_envelope(), empty_list_envelope()]);
    let drivers = DriverService::new(transport.clone());

    let mut query = PageQuery::default();
    drivers.list(&query, "", "").await.expect("list should decode");

    query.search_text = "smith".to_string();
    drivers.list(&query, "", "").await.expect("list should decode");

    let calls = transport.calls();
    assert!(!calls[0].query.contains("Keyword"));
    assert!(calls[1].query.contains("&Keyword=smith"));
}

#[tokio::test]
async fn lead_list_scopes_by_status_and_project() {
    let transport = FakeTransport::with_responses(vec![empty_list_envelope()]);
    let leads = LeadService::new(transport.clone());

    leads
        .list(&PageQuery::default(), "New", Some(7))
        .await
        .expect("empty list should decode");

    let calls = transport.calls();
    assert_eq!(
        calls[0].query,
        "?pageNumber=1&pageSize=10&SortOrder=false&Status=New&ProjectId=7"
    );
}

#[tokio::test]
async fn relationship_lists_filter_by_owner_ids() {
    let transport =
        FakeTransport::with_responses(vec![empty_list_envelope(), empty_list_envelope()]);
    let fobs = FobService::new(transport.clone());
    let trips = TripService::new(transport.clone());

    fobs.list(&PageQuery::default(), Some(3))
        .await
        .expect("fob list should decode");
    trips
        .list(&PageQuery::default(), Some(2), None)
        .await
        .expect("trip list should decode");

    let calls = transport.calls();
    assert!(calls[0].query.ends_with("&VehicleId=3"));
    assert!(calls[1].query.ends_with("&DriverId=2"));
    assert!(!calls[1].query.contains("RouteId"), "absent filters leave no trace");
}

#[tokio::test]
async fn rejected_envelope_surfaces_as_typed_error() {
    let transport = FakeTransport::with_responses(vec![json!({
        "isSuccess": false,
        "message": "License number already exists",
        "result": null
    })]);
    let drivers = DriverService::new(transport.clone());

    let outcome = drivers.create_update(json!({ "name": "A" })).await;

    match outcome {
        Err(ApiError::Rejected { message }) => {
            assert_eq!(message, "License number already exists");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert_eq!(transport.calls().len(), 1, "one request, one failure");
}

#[tokio::test]
async fn delete_targets_id_query_parameter() {
    let transport = FakeTransport::with_responses(vec![json!({
        "isSuccess": true,
        "message": "Vehicle deleted"
    })]);
    let vehicles = VehicleService::new(transport.clone());

    let message = vehicles.delete(42).await.expect("delete should succeed");

    assert_eq!(message, "Vehicle deleted");
    let calls = transport.calls();
    assert_eq!(calls[0].method, "DELETE");
    assert_eq!(calls[0].path, "/Vehicle/DeleteVehicle");
    assert_eq!(calls[0].query, "?id=42");
}

#[tokio::test]
async fn lead_assignment_carries_user_in_path_and_body() {
    let transport = FakeTransport::with_responses(vec![json!({
        "isSuccess": true,
        "message": "Lead assigned"
    })]);
    let leads = LeadService::new(transport.clone());

    leads.assign_to_user(7, 12).await.expect("assign should succeed");

    let calls = transport.calls();
    assert_eq!(calls[0].path, "/Lead/AssignLeadToUser?userId=12");
    assert_eq!(
        calls[0].payload,
        Some(json!({ "leadId": 7, "userId": 12 }))
    );
}

#[tokio::test]
async fn follow_up_goes_up_as_form_data_with_the_attachment() {
    let transport = FakeTransport::with_responses(vec![json!({
        "isSuccess": true,
        "message": "Follow-up saved"
    })]);
    let leads = LeadService::new(transport.clone());
    let attachment = FilePart {
        field: "file".to_string(),
        path: "/tmp/site-visit.pdf".into(),
    };

    leads
        .add_follow_up(5, "call back tomorrow", Some(attachment))
        .await
        .expect("follow-up should succeed");

    let calls = transport.calls();
    assert_eq!(calls[0].path, "/Lead/AddFollowUp");
    assert_eq!(
        calls[0].payload,
        Some(json!({
            "fields": [["leadId", "5"], ["note", "call back tomorrow"]],
            "file": { "field": "file", "path": "/tmp/site-visit.pdf" }
        }))
    );
}

#[tokio::test]
async fn password_reset_sends_the_address_as_plain_text() {
    let transport = FakeTransport::with_responses(vec![json!({
        "isSuccess": true,
        "message": "Reset email sent"
    })]);
    let session = Arc::new(SessionStore::in_memory());
    let auth = AuthService::new(transport.clone(), session);

    let message = auth
        .forgot_password("dispatch@fleet.test")
        .await
        .expect("reset should succeed");

    assert_eq!(message, "Reset email sent");
    let calls = transport.calls();
    assert_eq!(calls[0].path, "/Account/ForgotPassword");
    assert_eq!(
        calls[0].payload,
        Some(Value::String("dispatch@fleet.test".to_string()))
    );
}

#[tokio::test]
async fn single_record_fetch_targets_the_id_query() {
    let transport = FakeTransport::with_responses(vec![json!({
        "isSuccess": true,
        "message": "",
        "result": { "id": 3, "name": "Dana", "status": "Active" }
    })]);
    let drivers = DriverService::new(transport.clone());

    let driver = drivers.get_one(3).await.expect("driver should decode");

    assert_eq!(driver.id, 3);
    assert_eq!(driver.name.as_deref(), Some("Dana"));
    let calls = transport.calls();
    assert_eq!(calls[0].path, "/Driver/GetDriver");
    assert_eq!(calls[0].query, "?id=3");
}

#[tokio::test]
async fn project_scoped_lookups_carry_the_project_id() {
    let lookup_envelope = json!({
        "isSuccess": true,
        "message": "",
        "result": [{ "id": 1, "name": "Block A" }]
    });
    let transport = FakeTransport::with_responses(vec![
        lookup_envelope.clone(),
        lookup_envelope.clone(),
        lookup_envelope,
    ]);
    let projects = ProjectService::new(transport.clone());

    projects.blocks(4).await.expect("blocks should decode");
    projects.streets(4).await.expect("streets should decode");
    let item_types = projects.item_types(4).await.expect("item types should decode");

    assert_eq!(item_types[0].name, "Block A");
    let calls = transport.calls();
    assert_eq!(calls[0].path, "/ProjectBlock/GetProjectBlocks");
    assert_eq!(calls[1].path, "/ProjectStreet/GetProjectStreets");
    assert_eq!(calls[2].path, "/ProjectItemType/GetProjectItemTypes");
    for call in calls {
        assert_eq!(call.query, "?ProjectId=4");
    }
}

#[tokio::test]
async fn profile_and_password_change_round_trip() {
    let transport = FakeTransport::with_responses(vec![
        json!({
            "isSuccess": true,
            "message": "",
            "result": { "id": 9, "name": "Dispatcher", "email": "dispatch@fleet.test" }
        }),
        json!({ "isSuccess": true, "message": "Password changed" }),
    ]);
    let session = Arc::new(SessionStore::in_memory());
    let auth = AuthService::new(transport.clone(), session);

    let profile = auth.get_profile().await.expect("profile should decode");
    assert_eq!(profile.name.as_deref(), Some("Dispatcher"));

    let message = auth
        .change_password(json!({ "oldPassword": "a", "newPassword": "b" }))
        .await
        .expect("change should succeed");
    assert_eq!(message, "Password changed");

    let calls = transport.calls();
    assert_eq!(calls[0].path, "/Account/GetProfileSettings");
    assert_eq!(calls[1].path, "/Account/ChangePassword");
}

#[tokio::test]
async fn login_stores_session_for_later_requests() {
    let transport = FakeTransport::with_responses(vec![json!({
        "isSuccess": true,
        "message": "",
        "result": {
            "token": "jwt-token",
            "name": "Dispatcher",
            "email": "dispatch@fleet.test",
            "role": "Admin"
        }
    })]);
    let session = Arc::new(SessionStore::in_memory());
    let auth = AuthService::new(transport.clone(), session.clone());

    let logged_in = auth
        .login("dispatch@fleet.test", "secret")
        .await
        .expect("login should succeed");

    assert_eq!(logged_in.token.as_deref(), Some("jwt-token"));
    assert_eq!(session.token().as_deref(), Some("jwt-token"));
    assert!(session.is_authenticated());

    auth.logout();
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn login_rejection_leaves_session_empty() {
    let transport = FakeTransport::with_responses(vec![json!({
        "isSuccess": false,
        "message": "Invalid credentials",
        "result": null
    })]);
    let session = Arc::new(SessionStore::in_memory());
    let auth = AuthService::new(transport.clone(), session.clone());

    let outcome = auth.login("dispatch@fleet.test", "wrong").await;

    assert!(matches!(outcome, Err(ApiError::Rejected { .. })));
    assert!(!session.is_authenticated());
}

// Drives the table state machine through the same sequence the binding
// performs around a fetch, without a UI attached.
#[test]
fn table_core_paging_round_trip() {
    let mut core = TableCore::new();
    core.enable();
    core.set_page(2);

    let generation = core.begin_fetch();
    assert!(core.fetching);

    let page: ListPage<Value> = serde_json::from_value(json!({
        "items": [
            { "id": 11, "name": "Route A" },
            { "id": 12, "name": "Route B" }
        ],
        "paginationInfo": { "totalPages": 5, "totalCount": 47 }
    }))
    .expect("page should deserialize");

    assert!(core.apply_page(generation, page), "current generation must apply");
    assert!(!core.fetching);
    assert_eq!(core.total_pages, 5);
    assert_eq!(core.total_count, 47);
    assert_eq!(core.summary_text(), "Showing 11 to 20 of 47 entries");
    assert_eq!(core.rows[0].srno, "21", "page 2 rows carry concatenated numbers");
}

#[test]
fn table_core_discards_stale_page() {
    let mut core = TableCore::new();
    core.enable();

    let stale = core.begin_fetch();
    core.set_search_text("abc".to_string());
    let current = core.begin_fetch();

    let page: ListPage<Value> = serde_json::from_value(json!({
        "items": [{ "id": 1 }],
        "paginationInfo": { "totalPages": 1, "totalCount": 1 }
    }))
    .expect("page should deserialize");

    assert!(
        !core.apply_page(stale, page.clone()),
        "an older fetch must never overwrite newer state"
    );
    assert!(core.rows.is_empty());

    assert!(core.apply_page(current, page));
    assert_eq!(core.rows.len(), 1);
}
