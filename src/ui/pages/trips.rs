use std::collections::BTreeMap;

use dioxus::prelude::*;
use serde_json::{json, Value};

use crate::app::{report_error, AppServices, AuthPhase};
use crate::domain::entities::page::PageQuery;
use crate::domain::entities::resource::LookupOption;
use crate::infra::http::endpoints;
use crate::ui::components::confirm::confirm_destructive;
use crate::ui::components::inputs::{SelectInput, SubmitButton, TextInput, TextSelectInput};
use crate::ui::components::table_view::{
    DataTableView, PageSizeSelect, RowAction, RowActionDef,
};
use crate::ui::state::form::{FieldRule, FormState, FormValue};
use crate::ui::state::table::{project_field, ColumnDef, RemoteTable};

const TRIP_COLUMNS: [ColumnDef; 5] = [
    ColumnDef::new("routeName", "Route"),
    ColumnDef::unsorted("driverName", "Driver"),
    ColumnDef::unsorted("vehicleName", "Vehicle"),
    ColumnDef::new("scheduledAt", "Scheduled"),
    ColumnDef::new("status", "Status"),
];

const TRIP_ACTIONS: [RowActionDef; 3] = [
    RowActionDef { key: "edit", label: "Edit" },
    RowActionDef { key: "assign", label: "Assign driver" },
    RowActionDef { key: "delete", label: "Delete" },
];

const TRIP_RULES: [FieldRule; 2] = [
    FieldRule::required("scheduledAt", "Schedule"),
    FieldRule::required("status", "Status"),
];

#[component]
pub fn TripsPage() -> Element {
    let services = use_context::<AppServices>();
    let auth = use_context::<Signal<AuthPhase>>();
    let table = RemoteTable::new(endpoints::GET_TRIPS, "get-trips");
    use_effect(move || table.enable());

    let mut search_input = use_signal(String::new);
    let status_line = use_signal(String::new);
    let mut drawer_open = use_signal(|| false);
    let mut editing = use_signal(|| None::<Value>);
    let mut assigning = use_signal(|| None::<i64>);

    let services_for_actions = services.clone();
    let on_action = move |action: RowAction| match action.action {
        // Edit works off a fresh copy of the record, not the row projection.
        "edit" => {
            let Some(id) = action.row.id() else { return };
            let trips = services_for_actions.trips.clone();
            spawn(async move {
                match trips.get_one(id).await {
                    Ok(trip) => {
                        if let Ok(record) = serde_json::to_value(trip) {
                            editing.set(Some(record));
                            drawer_open.set(true);
                        }
                    }
                    Err(err) => report_error(&err, status_line, auth),
                }
            });
        }
        "assign" => {
            if let Some(id) = action.row.id() {
                assigning.set(Some(id));
            }
        }
        "delete" => {
            let Some(id) = action.row.id() else { return };
            if !confirm_destructive("Are you sure you want to delete this trip?") {
                return;
            }
            let trips = services_for_actions.trips.clone();
            let mut status_line = status_line;
            spawn(async move {
                match trips.delete(id).await {
                    Ok(message) => {
                        status_line.set(message);
                        table.refresh();
                    }
                    Err(err) => report_error(&err, status_line, auth),
                }
            });
        }
        _ => {}
    };

    let status_text = status_line();

    rsx! {
        div {
            div { style: "display: flex; gap: 8px; align-items: center; margin-bottom: 12px; flex-wrap: wrap;",
                h3 { style: "margin: 0 16px 0 0;", "Trips" }
                input {
                    style: "padding: 6px 8px; border: 1px solid #ccc; border-radius: 6px;",
                    placeholder: "Search trips…",
                    value: "{search_input}",
                    oninput: move |event| {
                        search_input.set(event.value());
                        table.set_search_text(event.value());
                    },
                }
                PageSizeSelect { table }
                button {
                    style: "margin-left: auto; padding: 6px 14px; background: #2d6cdf; color: #fff; border: none; border-radius: 6px; cursor: pointer;",
                    onclick: move |_| {
                        editing.set(None);
                        drawer_open.set(true);
                    },
                    "Add trip"
                }
            }

            if !status_text.is_empty() {
                p { style: "font-size: 13px; color: #555;", "{status_text}" }
            }

            DataTableView {
                table,
                columns: TRIP_COLUMNS.to_vec(),
                actions: TRIP_ACTIONS.to_vec(),
                on_action,
            }

            TripDrawer { open: drawer_open, editing, table, status_line }
            AssignDriverDialog { trip_id: assigning, table, status_line }
        }
    }
}

#[component]
fn TripDrawer(
    open: Signal<bool>,
    editing: Signal<Option<Value>>,
    table: RemoteTable,
    status_line: Signal<String>,
) -> Element {
    let services = use_context::<AppServices>();
    let auth = use_context::<Signal<AuthPhase>>();
    let mut form = FormState::provide();
    let mut route_options = use_signal(Vec::<LookupOption>::new);
    let mut loading_routes = use_signal(|| false);

    // Route lookup loads once the drawer opens.
    let services_for_routes = services.clone();
    use_effect(move || {
        if !open() {
            return;
        }
        let routes = services_for_routes.routes.clone();
        let mut status_line = status_line;
        loading_routes.set(true);
        spawn(async move {
            let query = PageQuery { page_size: 100, ..Default::default() };
            match routes.list(&query).await {
                Ok(page) => {
                    let options = page
                        .items
                        .into_iter()
                        .map(|route| LookupOption {
                            id: route.id,
                            name: route.name.unwrap_or_default(),
                        })
                        .collect();
                    route_options.set(options);
                }
                Err(err) => report_error(&err, status_line, auth),
            }
            loading_routes.set(false);
        });
    });

    use_effect(move || {
        let mut values = BTreeMap::new();
        if let Some(record) = editing() {
            for field in ["scheduledAt", "status"] {
                values.insert(
                    field.to_string(),
                    FormValue::Text(project_field(&record, field)),
                );
            }
            let route = record.get("routeId").and_then(Value::as_i64);
            values.insert("routeId".to_string(), FormValue::Choice(route));
        }
        form.load(values);
    });

    let on_submit = move |_| {
        if !form.validate(&TRIP_RULES) {
            return;
        }
        let Some(route_id) = form.value("routeId").as_choice() else {
            form.set_touched("routeId");
            form.set_error("routeId", "Route is required".to_string());
            return;
        };
        let mut payload = json!({
            "routeId": route_id,
            "scheduledAt": form.text("scheduledAt"),
            "status": form.text("status"),
        });
        if let Some(id) = editing().as_ref().and_then(|record| record.get("id")).and_then(Value::as_i64) {
            payload["id"] = json!(id);
        }
        let trips = services.trips.clone();
        let mut open = open;
        let mut status_line = status_line;
        form.set_submitting(true);
        spawn(async move {
            let outcome = trips.create_update(payload).await;
            form.set_submitting(false);
            match outcome {
                Ok(message) => {
                    status_line.set(message);
                    open.set(false);
                    table.refresh();
                }
                Err(err) => report_error(&err, status_line, auth),
            }
        });
    };

    if !open() {
        return rsx! {};
    }

    let title = if editing().is_some() { "Edit trip" } else { "Add trip" };

    rsx! {
        div { style: "position: fixed; top: 0; right: 0; width: 380px; height: 100vh; background: #fff; box-shadow: -2px 0 8px rgba(0,0,0,0.15); padding: 20px; overflow: auto; z-index: 1000;",
            h3 { style: "margin-top: 0;", "{title}" }
            SelectInput {
                name: "routeId",
                label: "Route",
                options: route_options(),
                loading: loading_routes(),
            }
            TextInput { name: "scheduledAt", label: "Scheduled at", placeholder: "2026-08-23T09:00:00Z" }
            TextSelectInput {
                name: "status",
                label: "Status",
                options: vec![
                    "Scheduled".to_string(),
                    "InProgress".to_string(),
                    "Completed".to_string(),
                    "Cancelled".to_string(),
                ],
            }
            div { style: "display: flex; gap: 8px; margin-top: 12px;",
                SubmitButton { label: "Save", on_press: on_submit }
                button {
                    onclick: move |_| open.set(false),
                    "Cancel"
                }
            }
        }
    }
}

#[component]
fn AssignDriverDialog(
    trip_id: Signal<Option<i64>>,
    table: RemoteTable,
    status_line: Signal<String>,
) -> Element {
    let services = use_context::<AppServices>();
    let auth = use_context::<Signal<AuthPhase>>();
    let mut form = FormState::provide();
    let mut driver_options = use_signal(Vec::<LookupOption>::new);
    let mut loading_options = use_signal(|| false);

    let services_for_options = services.clone();
    use_effect(move || {
        if trip_id().is_none() {
            return;
        }
        let drivers = services_for_options.drivers.clone();
        let mut status_line = status_line;
        loading_options.set(true);
        spawn(async move {
            let query = PageQuery { page_size: 100, ..Default::default() };
            match drivers.list(&query, "", "Active").await {
                Ok(page) => {
                    let options = page
                        .items
                        .into_iter()
                        .map(|driver| LookupOption {
                            id: driver.id,
                            name: driver.name.unwrap_or_default(),
                        })
                        .collect();
                    driver_options.set(options);
                }
                Err(err) => report_error(&err, status_line, auth),
            }
            loading_options.set(false);
        });
    });

    let on_submit = move |_| {
        let Some(trip) = trip_id() else { return };
        let Some(driver) = form.value("driverId").as_choice() else {
            form.set_touched("driverId");
            form.set_error("driverId", "Driver is required".to_string());
            return;
        };
        let trips = services.trips.clone();
        let mut trip_id = trip_id;
        let mut status_line = status_line;
        form.set_submitting(true);
        spawn(async move {
            let outcome = trips.assign_driver(trip, driver).await;
            form.set_submitting(false);
            match outcome {
                Ok(message) => {
                    status_line.set(message);
                    trip_id.set(None);
                    table.refresh();
                }
                Err(err) => report_error(&err, status_line, auth),
            }
        });
    };

    if trip_id().is_none() {
        return rsx! {};
    }

    rsx! {
        div { style: "position: fixed; inset: 0; background: rgba(0,0,0,0.3); display: flex; justify-content: center; align-items: center; z-index: 1100;",
            div { style: "width: 340px; background: #fff; border-radius: 8px; padding: 20px;",
                h3 { style: "margin-top: 0;", "Assign driver" }
                SelectInput {
                    name: "driverId",
                    label: "Driver",
                    options: driver_options(),
                    loading: loading_options(),
                }
                div { style: "display: flex; gap: 8px; margin-top: 12px;",
                    SubmitButton { label: "Assign", on_press: on_submit }
                    button {
                        onclick: move |_| trip_id.set(None),
                        "Cancel"
                    }
                }
            }
        }
    }
}
