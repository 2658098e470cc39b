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

const PROJECT_COLUMNS: [ColumnDef; 3] = [
    ColumnDef::new("name", "Name"),
    ColumnDef::new("city", "City"),
    ColumnDef::new("status", "Status"),
];

const PROJECT_ACTIONS: [RowActionDef; 2] = [
    RowActionDef { key: "edit", label: "Edit" },
    RowActionDef { key: "delete", label: "Delete" },
];

const PROJECT_RULES: [FieldRule; 2] = [
    FieldRule::required("name", "Name"),
    FieldRule::required("city", "City"),
];

#[component]
pub fn ProjectsPage() -> Element {
    let services = use_context::<AppServices>();
    let auth = use_context::<Signal<AuthPhase>>();
    let table = RemoteTable::new(endpoints::GET_PROJECTS, "get-projects");
    use_effect(move || table.enable());

    let mut search_input = use_signal(String::new);
    let mut city_filter = use_signal(String::new);
    let status_line = use_signal(String::new);
    let mut drawer_open = use_signal(|| false);
    let mut editing = use_signal(|| None::<Value>);

    use_effect(move || {
        let payload = QueryString::new()
            .filter("City", &city_filter())
            .into_string();
        table.set_extra_payload(payload);
    });

    let services_for_actions = services.clone();
    let on_action = move |action: RowAction| match action.action {
        // Edit works off a fresh copy of the record, not the row projection.
        "edit" => {
            let Some(id) = action.row.id() else { return };
            let projects = services_for_actions.projects.clone();
            spawn(async move {
                match projects.get_one(id).await {
                    Ok(project) => {
                        if let Ok(record) = serde_json::to_value(project) {
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
            if !confirm_destructive("Are you sure you want to delete this project?") {
                return;
            }
            let projects = services_for_actions.projects.clone();
            let mut status_line = status_line;
            spawn(async move {
                match projects.delete(id).await {
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
                h3 { style: "margin: 0 16px 0 0;", "Projects" }
                input {
                    style: "padding: 6px 8px; border: 1px solid #ccc; border-radius: 6px;",
                    placeholder: "Search projects…",
                    value: "{search_input}",
                    oninput: move |event| {
                        search_input.set(event.value());
                        table.set_search_text(event.value());
                    },
                }
                input {
                    style: "padding: 6px 8px; border: 1px solid #ccc; border-radius: 6px;",
                    placeholder: "Filter by city",
                    value: "{city_filter}",
                    oninput: move |event| city_filter.set(event.value()),
                }
                PageSizeSelect { table }
                button {
                    style: "margin-left: auto; padding: 6px 14px; background: #2d6cdf; color: #fff; border: none; border-radius: 6px; cursor: pointer;",
                    onclick: move |_| {
                        editing.set(None);
                        drawer_open.set(true);
                    },
                    "Add project"
                }
            }

            if !status_text.is_empty() {
                p { style: "font-size: 13px; color: #555;", "{status_text}" }
            }

            DataTableView {
                table,
                columns: PROJECT_COLUMNS.to_vec(),
                actions: PROJECT_ACTIONS.to_vec(),
                on_action,
            }

            ProjectDrawer { open: drawer_open, editing, table, status_line }
        }
    }
}

#[component]
fn ProjectDrawer(
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
            for field in ["name", "city", "status"] {
                values.insert(
                    field.to_string(),
                    FormValue::Text(project_field(&record, field)),
                );
            }
        }
        form.load(values);
    });

    let on_submit = move |_| {
        if !form.validate(&PROJECT_RULES) {
            return;
        }
        let mut payload = json!({
            "name": form.text("name"),
            "city": form.text("city"),
            "status": form.text("status"),
        });
        if let Some(id) = editing().as_ref().and_then(|record| record.get("id")).and_then(Value::as_i64) {
            payload["id"] = json!(id);
        }
        let projects = services.projects.clone();
        let mut open = open;
        let mut status_line = status_line;
        form.set_submitting(true);
        spawn(async move {
            let outcome = projects.create_update(payload).await;
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

    let title = if editing().is_some() { "Edit project" } else { "Add project" };

    rsx! {
        div { style: "position: fixed; top: 0; right: 0; width: 380px; height: 100vh; background: #fff; box-shadow: -2px 0 8px rgba(0,0,0,0.15); padding: 20px; overflow: auto; z-index: 1000;",
            h3 { style: "margin-top: 0;", "{title}" }
            TextInput { name: "name", label: "Name" }
            TextInput { name: "city", label: "City" }
            TextSelectInput {
                name: "status",
                label: "Status",
                options: vec![
                    "Planned".to_string(),
                    "Active".to_string(),
                    "Completed".to_string(),
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
