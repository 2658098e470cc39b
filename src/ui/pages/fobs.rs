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

const FOB_COLUMNS: [ColumnDef; 3] = [
    ColumnDef::new("fobNumber", "Fob number"),
    ColumnDef::new("status", "Status"),
    ColumnDef::unsorted("vehicleName", "Vehicle"),
];

const FOB_ACTIONS: [RowActionDef; 4] = [
    RowActionDef { key: "edit", label: "Edit" },
    RowActionDef { key: "assign", label: "Assign to vehicle" },
    RowActionDef { key: "unassign", label: "Unassign" },
    RowActionDef { key: "delete", label: "Delete" },
];

const FOB_RULES: [FieldRule; 1] = [FieldRule::required("fobNumber", "Fob number")];

#[component]
pub fn FobsPage() -> Element {
    let services = use_context::<AppServices>();
    let auth = use_context::<Signal<AuthPhase>>();
    let table = RemoteTable::new(endpoints::GET_FOBS, "get-fobs");
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
            let fobs = services_for_actions.fobs.clone();
            spawn(async move {
                match fobs.get_one(id).await {
                    Ok(fob) => {
                        if let Ok(record) = serde_json::to_value(fob) {
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
            if !confirm_destructive("Unassign this fob from its vehicle?") {
                return;
            }
            let fobs = services_for_actions.fobs.clone();
            let mut status_line = status_line;
            spawn(async move {
                match fobs.unassign_from_vehicle(id).await {
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
            if !confirm_destructive("Are you sure you want to delete this fob?") {
                return;
            }
            let fobs = services_for_actions.fobs.clone();
            let mut status_line = status_line;
            spawn(async move {
                match fobs.delete(id).await {
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
                h3 { style: "margin: 0 16px 0 0;", "Fobs" }
                input {
                    style: "padding: 6px 8px; border: 1px solid #ccc; border-radius: 6px;",
                    placeholder: "Search fobs…",
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
                    "Add fob"
                }
            }

            if !status_text.is_empty() {
                p { style: "font-size: 13px; color: #555;", "{status_text}" }
            }

            DataTableView {
                table,
                columns: FOB_COLUMNS.to_vec(),
                actions: FOB_ACTIONS.to_vec(),
                on_action,
            }

            FobDrawer { open: drawer_open, editing, table, status_line }
            AssignFobDialog { fob_id: assigning, table, status_line }
        }
    }
}

#[component]
fn FobDrawer(
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
            for field in ["fobNumber", "status"] {
                values.insert(
                    field.to_string(),
                    FormValue::Text(project_field(&record, field)),
                );
            }
        }
        form.load(values);
    });

    let on_submit = move |_| {
        if !form.validate(&FOB_RULES) {
            return;
        }
        let mut payload = json!({
            "fobNumber": form.text("fobNumber"),
            "status": form.text("status"),
        });
        if let Some(id) = editing().as_ref().and_then(|record| record.get("id")).and_then(Value::as_i64) {
            payload["id"] = json!(id);
        }
        let fobs = services.fobs.clone();
        let mut open = open;
        let mut status_line = status_line;
        form.set_submitting(true);
        spawn(async move {
            let outcome = fobs.create_update(payload).await;
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

    let title = if editing().is_some() { "Edit fob" } else { "Add fob" };

    rsx! {
        div { style: "position: fixed; top: 0; right: 0; width: 380px; height: 100vh; background: #fff; box-shadow: -2px 0 8px rgba(0,0,0,0.15); padding: 20px; overflow: auto; z-index: 1000;",
            h3 { style: "margin-top: 0;", "{title}" }
            TextInput { name: "fobNumber", label: "Fob number" }
            TextSelectInput {
                name: "status",
                label: "Status",
                options: vec!["Active".to_string(), "Lost".to_string(), "Disabled".to_string()],
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
fn AssignFobDialog(
    fob_id: Signal<Option<i64>>,
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
        if fob_id().is_none() {
            return;
        }
        let vehicles = services_for_options.vehicles.clone();
        let mut status_line = status_line;
        loading_options.set(true);
        spawn(async move {
            let query = PageQuery { page_size: 100, ..Default::default() };
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
        let Some(fob) = fob_id() else { return };
        let Some(vehicle) = form.value("vehicleId").as_choice() else {
            form.set_touched("vehicleId");
            form.set_error("vehicleId", "Vehicle is required".to_string());
            return;
        };
        let fobs = services.fobs.clone();
        let mut fob_id = fob_id;
        let mut status_line = status_line;
        form.set_submitting(true);
        spawn(async move {
            let outcome = fobs.assign_to_vehicle(fob, vehicle).await;
            form.set_submitting(false);
            match outcome {
                Ok(message) => {
                    status_line.set(message);
                    fob_id.set(None);
                    table.refresh();
                }
                Err(err) => report_error(&err, status_line, auth),
            }
        });
    };

    if fob_id().is_none() {
        return rsx! {};
    }

    rsx! {
        div { style: "position: fixed; inset: 0; background: rgba(0,0,0,0.3); display: flex; justify-content: center; align-items: center; z-index: 1100;",
            div { style: "width: 340px; background: #fff; border-radius: 8px; padding: 20px;",
                h3 { style: "margin-top: 0;", "Assign fob to vehicle" }
                SelectInput {
                    name: "vehicleId",
                    label: "Vehicle",
                    options: vehicle_options(),
                    loading: loading_options(),
                }
                div { style: "display: flex; gap: 8px; margin-top: 12px;",
                    SubmitButton { label: "Assign", on_press: on_submit }
                    button {
                        onclick: move |_| fob_id.set(None),
                        "Cancel"
                    }
                }
            }
        }
    }
}
