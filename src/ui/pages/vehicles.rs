use std::collections::BTreeMap;

use dioxus::prelude::*;
use serde_json::{json, Value};

use crate::app::{report_error, AppServices, AuthPhase};
use crate::infra::http::endpoints;
use crate::infra::http::query::QueryString;
use crate::ui::components::confirm::confirm_destructive;
use crate::ui::components::inputs::{SubmitButton, TextInput, TextSelectInput};
use crate::ui::components::table_view::{
    DataTableView, PageSizeSelect, RowAction, RowActionDef,
};
use crate::ui::state::form::{FieldRule, FormState, FormValue};
use crate::ui::state::table::{project_field, ColumnDef, RemoteTable};

const VEHICLE_COLUMNS: [ColumnDef; 6] = [
    ColumnDef::new("name", "Name"),
    ColumnDef::new("plateNumber", "Plate"),
    ColumnDef::new("make", "Make"),
    ColumnDef::new("model", "Model"),
    ColumnDef::new("year", "Year"),
    ColumnDef::new("status", "Status"),
];

const VEHICLE_ACTIONS: [RowActionDef; 2] = [
    RowActionDef { key: "edit", label: "Edit" },
    RowActionDef { key: "delete", label: "Delete" },
];

const VEHICLE_RULES: [FieldRule; 3] = [
    FieldRule::required("name", "Name"),
    FieldRule::required("plateNumber", "Plate number"),
    FieldRule::numeric("year", "Year"),
];

#[component]
pub fn VehiclesPage() -> Element {
    let services = use_context::<AppServices>();
    let auth = use_context::<Signal<AuthPhase>>();
    let table = RemoteTable::new(endpoints::GET_VEHICLES, "get-vehicles");
    use_effect(move || table.enable());

    let mut search_input = use_signal(String::new);
    let mut status_filter = use_signal(String::new);
    let status_line = use_signal(String::new);
    let mut drawer_open = use_signal(|| false);
    let mut editing = use_signal(|| None::<Value>);

    use_effect(move || {
        let payload = QueryString::new()
            .filter("Status", &status_filter())
            .into_string();
        table.set_extra_payload(payload);
    });

    let services_for_actions = services.clone();
    let on_action = move |action: RowAction| match action.action {
        // Edit works off a fresh copy of the record, not the row projection.
        "edit" => {
            let Some(id) = action.row.id() else { return };
            let vehicles = services_for_actions.vehicles.clone();
            spawn(async move {
                match vehicles.get_one(id).await {
                    Ok(vehicle) => {
                        if let Ok(record) = serde_json::to_value(vehicle) {
                            editing.set(Some(record));
                            drawer_open.set(true);
                        }
                    }
                    Err(err) => report_error(&err, status_line, auth),
                }
            });
        }
        "delete" => {
            let Some(id) = action.row.id() else { return };
            if !confirm_destructive("Are you sure you want to delete this vehicle?") {
                return;
            }
            let vehicles = services_for_actions.vehicles.clone();
            let mut status_line = status_line;
            spawn(async move {
                match vehicles.delete(id).await {
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
                h3 { style: "margin: 0 16px 0 0;", "Vehicles" }
                input {
                    style: "padding: 6px 8px; border: 1px solid #ccc; border-radius: 6px;",
                    placeholder: "Search vehicles…",
                    value: "{search_input}",
                    oninput: move |event| {
                        search_input.set(event.value());
                        table.set_search_text(event.value());
                    },
                }
                select {
                    onchange: move |event| status_filter.set(event.value()),
                    option { value: "", "All statuses" }
                    option { value: "Active", "Active" }
                    option { value: "InService", "In service" }
                    option { value: "Retired", "Retired" }
                }
                PageSizeSelect { table }
                button {
                    style: "margin-left: auto; padding: 6px 14px; background: #2d6cdf; color: #fff; border: none; border-radius: 6px; cursor: pointer;",
                    onclick: move |_| {
                        editing.set(None);
                        drawer_open.set(true);
                    },
                    "Add vehicle"
                }
            }

            if !status_text.is_empty() {
                p { style: "font-size: 13px; color: #555;", "{status_text}" }
            }

            DataTableView {
                table,
                columns: VEHICLE_COLUMNS.to_vec(),
                actions: VEHICLE_ACTIONS.to_vec(),
                on_action,
            }

            VehicleDrawer { open: drawer_open, editing, table, status_line }
        }
    }
}

#[component]
fn VehicleDrawer(
    open: Signal<bool>,
    editing: Signal<Option<Value>>,
    table: RemoteTable,
    status_line: Signal<String>,
) -> Element {
    let services = use_context::<AppServices>();
    let auth = use_context::<Signal<AuthPhase>>();
    let mut form = FormState::provide();

    use_effect(move || {
        let mut values = BTreeMap::new();
        if let Some(record) = editing() {
            for field in ["name", "plateNumber", "make", "model", "year", "vin", "status"] {
                values.insert(
                    field.to_string(),
                    FormValue::Text(project_field(&record, field)),
                );
            }
        }
        form.load(values);
    });

    let on_submit = move |_| {
        if !form.validate(&VEHICLE_RULES) {
            return;
        }
        let mut payload = json!({
            "name": form.text("name"),
            "plateNumber": form.text("plateNumber"),
            "make": form.text("make"),
            "model": form.text("model"),
            "vin": form.text("vin"),
            "status": form.text("status"),
        });
        if let Ok(year) = form.text("year").trim().parse::<i32>() {
            payload["year"] = json!(year);
        }
        if let Some(id) = editing().as_ref().and_then(|record| record.get("id")).and_then(Value::as_i64) {
            payload["id"] = json!(id);
        }
        let vehicles = services.vehicles.clone();
        let mut open = open;
        let mut status_line = status_line;
        form.set_submitting(true);
        spawn(async move {
            let outcome = vehicles.create_update(payload).await;
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

    let title = if editing().is_some() { "Edit vehicle" } else { "Add vehicle" };

    rsx! {
        div { style: "position: fixed; top: 0; right: 0; width: 380px; height: 100vh; background: #fff; box-shadow: -2px 0 8px rgba(0,0,0,0.15); padding: 20px; overflow: auto; z-index: 1000;",
            h3 { style: "margin-top: 0;", "{title}" }
            TextInput { name: "name", label: "Name" }
            TextInput { name: "plateNumber", label: "Plate number" }
            TextInput { name: "make", label: "Make" }
            TextInput { name: "model", label: "Model" }
            TextInput { name: "year", label: "Year" }
            TextInput { name: "vin", label: "VIN" }
            TextSelectInput {
                name: "status",
                label: "Status",
                options: vec![
                    "Active".to_string(),
                    "InService".to_string(),
                    "Retired".to_string(),
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
