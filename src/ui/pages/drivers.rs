use std::collections::BTreeMap;

use dioxus::prelude::*;
use serde_json::{json, Value};

use crate::app::{report_error, AppServices, AuthPhase};
use crate::domain::entities::resource::LookupOption;
use crate::infra::http::endpoints;
use crate::infra::http::query::QueryString;
use crate::ui::components::confirm::confirm_destructive;
use crate::ui::components::inputs::{SelectInput, SubmitButton, TextInput, TextSelectInput};
use crate::ui::components::table_view::{
    DataTableView, PageSizeSelect, RowAction, RowActionDef,
};
use crate::ui::state::form::{FieldRule, FormState, FormValue};
use crate::ui::state::table::{project_field, ColumnDef, RemoteTable};

const DRIVER_COLUMNS: [ColumnDef; 5] = [
    ColumnDef::new("name", "Name"),
    ColumnDef::new("email", "Email"),
    ColumnDef::unsorted("phoneNumber", "Phone"),
    ColumnDef::new("licenseNumber", "License"),
    ColumnDef::new("status", "Status"),
];

const DRIVER_ACTIONS: [RowActionDef; 4] = [
    RowActionDef { key: "edit", label: "Edit" },
    RowActionDef { key: "assign", label: "Assign vehicle" },
    RowActionDef { key: "unassign", label: "Unassign vehicle" },
    RowActionDef { key: "delete", label: "Delete" },
];

const DRIVER_RULES: [FieldRule; 4] = [
    FieldRule::required("name", "Name"),
    FieldRule::required("licenseNumber", "License number"),
    FieldRule::email("email", "Email"),
    FieldRule::required("status", "Status"),
];

#[component]
pub fn DriversPage() -> Element {
    let services = use_context::<AppServices>();
    let auth = use_context::<Signal<AuthPhase>>();
    let table = RemoteTable::new(endpoints::GET_DRIVERS, "get-drivers");
    use_effect(move || table.enable());

    let mut search_input = use_signal(String::new);
    let mut status_filter = use_signal(String::new);
    let mut role_filter = use_signal(String::new);
    let status_line = use_signal(String::new);
    let mut drawer_open = use_signal(|| false);
    let mut editing = use_signal(|| None::<Value>);
    let mut assigning = use_signal(|| None::<i64>);

    // Filter selects feed the binding as a pre-formatted payload; empty
    // selections leave no trace in the query.
    use_effect(move || {
        let payload = QueryString::new()
            .filter("Role", &role_filter())
            .filter("Status", &status_filter())
            .into_string();
        table.set_extra_payload(payload);
    });

    let services_for_actions = services.clone();
    let on_action = move |action: RowAction| match action.action {
        // Edit works off a fresh copy of the record, not the row projection.
        "edit" => {
            let Some(id) = action.row.id() else { return };
            let drivers = services_for_actions.drivers.clone();
            spawn(async move {
                match drivers.get_one(id).await {
                    Ok(driver) => {
                        if let Ok(record) = serde_json::to_value(driver) {
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
        "unassign" => {
            let Some(id) = action.row.id() else { return };
            if !confirm_destructive("Unassign the vehicle from this driver?") {
                return;
            }
            let drivers = services_for_actions.drivers.clone();
            let mut status_line = status_line;
            spawn(async move {
                match drivers.unassign_vehicle(id).await {
                    Ok(message) => {
                        status_line.set(message);
                        table.refresh();
                    }
                    Err(err) => report_error(&err, status_line, auth),
                }
            });
        }
        "delete" => {
            let Some(id) = action.row.id() else { return };
            if !confirm_destructive("Are you sure you want to delete this driver?") {
                return;
            }
            let drivers = services_for_actions.drivers.clone();
            let mut status_line = status_line;
            spawn(async move {
                match drivers.delete(id).await {
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
                h3 { style: "margin: 0 16px 0 0;", "Drivers" }
                input {
                    style: "padding: 6px 8px; border: 1px solid #ccc; border-radius: 6px;",
                    placeholder: "Search drivers…",
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
                    option { value: "Inactive", "Inactive" }
                }
                select {
                    onchange: move |event| role_filter.set(event.value()),
                    option { value: "", "All roles" }
                    option { value: "Driver", "Driver" }
                    option { value: "Supervisor", "Supervisor" }
                }
                PageSizeSelect { table }
                button {
                    style: "margin-left: auto; padding: 6px 14px; background: #2d6cdf; color: #fff; border: none; border-radius: 6px; cursor: pointer;",
                    onclick: move |_| {
                        editing.set(None);
                        drawer_open.set(true);
                    },
                    "Add driver"
                }
            }

            if !status_text.is_empty() {
                p { style: "font-size: 13px; color: #555;", "{status_text}" }
            }

            DataTableView {
                table,
                columns: DRIVER_COLUMNS.to_vec(),
                actions: DRIVER_ACTIONS.to_vec(),
                on_action,
            }

            DriverDrawer { open: drawer_open, editing, table, status_line }
            AssignVehicleDialog { driver_id: assigning, table, status_line }
        }
    }
}

#[component]
fn DriverDrawer(
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
            for field in ["name", "email", "phoneNumber", "licenseNumber", "status"] {
                values.insert(
                    field.to_string(),
                    FormValue::Text(project_field(&record, field)),
                );
            }
        }
        form.load(values);
    });

    let on_submit = move |_| {
        if !form.validate(&DRIVER_RULES) {
            return;
        }
        let mut payload = json!({
            "name": form.text("name"),
            "email": form.text("email"),
            "phoneNumber": form.text("phoneNumber"),
            "licenseNumber": form.text("licenseNumber"),
            "status": form.text("status"),
        });
        if let Some(id) = editing().as_ref().and_then(|record| record.get("id")).and_then(Value::as_i64) {
            payload["id"] = json!(id);
        }
        let drivers = services.drivers.clone();
        let mut open = open;
        let mut status_line = status_line;
        form.set_submitting(true);
        spawn(async move {
            let outcome = drivers.create_update(payload).await;
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

    let title = if editing().is_some() { "Edit driver" } else { "Add driver" };

    rsx! {
        div { style: "position: fixed; top: 0; right: 0; width: 380px; height: 100vh; background: #fff; box-shadow: -2px 0 8px rgba(0,0,0,0.15); padding: 20px; overflow: auto; z-index: 1000;",
            h3 { style: "margin-top: 0;", "{title}" }
            TextInput { name: "name", label: "Name" }
            TextInput { name: "email", label: "Email" }
            TextInput { name: "phoneNumber", label: "Phone" }
            TextInput { name: "licenseNumber", label: "License number" }
            TextSelectInput {
                name: "status",
                label: "Status",
                options: vec!["Active".to_string(), "Inactive".to_string()],
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

/// Driver↔vehicle relationship dialog; the vehicle list comes from the
/// vehicle service as a lookup.
#[component]
fn AssignVehicleDialog(
    driver_id: Signal<Option<i64>>,
    table: RemoteTable,
    status_line: Signal<String>,
) -> Element {
    let services = use_context::<AppServices>();
    let auth = use_context::<Signal<AuthPhase>>();
    let mut form = FormState::provide();
    let mut vehicle_options = use_signal(Vec::<LookupOption>::new);
    let mut loading_options = use_signal(|| false);

    let services_for_options = services.clone();
    use_effect(move || {
        if driver_id().is_none() {
            return;
        }
        let vehicles = services_for_options.vehicles.clone();
        let mut status_line = status_line;
        loading_options.set(true);
        spawn(async move {
            let query = crate::domain::entities::page::PageQuery {
                page_size: 100,
                ..Default::default()
            };
            match vehicles.list(&query, "Active").await {
                Ok(page) => {
                    let options = page
                        .items
                        .into_iter()
                        .map(|vehicle| LookupOption {
                            id: vehicle.id,
                            name: vehicle.name.or(vehicle.plate_number).unwrap_or_default(),
                        })
                        .collect();
                    vehicle_options.set(options);
                }
                Err(err) => report_error(&err, status_line, auth),
            }
            loading_options.set(false);
        });
    });

    let on_submit = move |_| {
        let Some(driver) = driver_id() else { return };
        let Some(vehicle) = form.value("vehicleId").as_choice() else {
            form.set_touched("vehicleId");
            form.set_error("vehicleId", "Vehicle is required".to_string());
            return;
        };
        let drivers = services.drivers.clone();
        let mut driver_id = driver_id;
        let mut status_line = status_line;
        form.set_submitting(true);
        spawn(async move {
            let outcome = drivers.assign_vehicle(driver, vehicle).await;
            form.set_submitting(false);
            match outcome {
                Ok(message) => {
                    status_line.set(message);
                    driver_id.set(None);
                    table.refresh();
                }
                Err(err) => report_error(&err, status_line, auth),
            }
        });
    };

    if driver_id().is_none() {
        return rsx! {};
    }

    rsx! {
        div { style: "position: fixed; inset: 0; background: rgba(0,0,0,0.3); display: flex; justify-content: center; align-items: center; z-index: 1100;",
            div { style: "width: 340px; background: #fff; border-radius: 8px; padding: 20px;",
                h3 { style: "margin-top: 0;", "Assign vehicle" }
                SelectInput {
                    name: "vehicleId",
                    label: "Vehicle",
                    options: vehicle_options(),
                    loading: loading_options(),
                }
                div { style: "display: flex; gap: 8px; margin-top: 12px;",
                    SubmitButton { label: "Assign", on_press: on_submit }
                    button {
                        onclick: move |_| driver_id.set(None),
                        "Cancel"
                    }
                }
            }
        }
    }
}
