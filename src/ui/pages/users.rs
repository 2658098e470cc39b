use std::collections::BTreeMap;

use dioxus::prelude::*;
use serde_json::{json, Value};

use crate::app::{report_error, AppServices, AuthPhase};
use crate::domain::entities::resource::LookupOption;
use crate::infra::http::endpoints;
use crate::infra::http::query::QueryString;
use crate::ui::components::confirm::confirm_destructive;
use crate::ui::components::inputs::{SubmitButton, TextInput, TextSelectInput};
use crate::ui::components::table_view::{
    DataTableView, PageSizeSelect, RowAction, RowActionDef,
};
use crate::ui::state::form::{FieldRule, FormState, FormValue};
use crate::ui::state::table::{project_field, ColumnDef, RemoteTable};

const USER_COLUMNS: [ColumnDef; 4] = [
    ColumnDef::new("name", "Name"),
    ColumnDef::new("email", "Email"),
    ColumnDef::new("role", "Role"),
    ColumnDef::new("status", "Status"),
];

const USER_ACTIONS: [RowActionDef; 2] = [
    RowActionDef { key: "edit", label: "Edit" },
    RowActionDef { key: "delete", label: "Delete" },
];

const USER_RULES: [FieldRule; 4] = [
    FieldRule::required("name", "Name"),
    FieldRule::required("email", "Email"),
    FieldRule::email("email", "Email"),
    FieldRule::required("role", "Role"),
];

#[component]
pub fn UsersPage() -> Element {
    let services = use_context::<AppServices>();
    let auth = use_context::<Signal<AuthPhase>>();
    let table = RemoteTable::new(endpoints::GET_USERS, "get-users");
    use_effect(move || table.enable());

    let mut search_input = use_signal(String::new);
    let mut role_filter = use_signal(String::new);
    let mut role_options = use_signal(Vec::<LookupOption>::new);
    let status_line = use_signal(String::new);
    let mut drawer_open = use_signal(|| false);
    let mut editing = use_signal(|| None::<Value>);

    let services_for_roles = services.clone();
    use_effect(move || {
        let users = services_for_roles.users.clone();
        let mut status_line = status_line;
        spawn(async move {
            match users.roles().await {
                Ok(roles) => role_options.set(roles),
                Err(err) => report_error(&err, status_line, auth),
            }
        });
    });

    use_effect(move || {
        let payload = QueryString::new()
            .filter("Role", &role_filter())
            .into_string();
        table.set_extra_payload(payload);
    });

    let services_for_actions = services.clone();
    let on_action = move |action: RowAction| match action.action {
        "edit" => {
            editing.set(Some(action.row.record.clone()));
            drawer_open.set(true);
        }
        "delete" => {
            let Some(id) = action.row.id() else { return };
            if !confirm_destructive("Are you sure you want to delete this user?") {
                return;
            }
            let users = services_for_actions.users.clone();
            let mut status_line = status_line;
            spawn(async move {
                match users.delete(id).await {
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
                h3 { style: "margin: 0 16px 0 0;", "Users" }
                input {
                    style: "padding: 6px 8px; border: 1px solid #ccc; border-radius: 6px;",
                    placeholder: "Search users…",
                    value: "{search_input}",
                    oninput: move |event| {
                        search_input.set(event.value());
                        table.set_search_text(event.value());
                    },
                }
                select {
                    onchange: move |event| role_filter.set(event.value()),
                    option { value: "", "All roles" }
                    for role in role_options() {
                        option { value: "{role.name}", "{role.name}" }
                    }
                }
                PageSizeSelect { table }
                button {
                    style: "margin-left: auto; padding: 6px 14px; background: #2d6cdf; color: #fff; border: none; border-radius: 6px; cursor: pointer;",
                    onclick: move |_| {
                        editing.set(None);
                        drawer_open.set(true);
                    },
                    "Add user"
                }
            }

            if !status_text.is_empty() {
                p { style: "font-size: 13px; color: #555;", "{status_text}" }
            }

            DataTableView {
                table,
                columns: USER_COLUMNS.to_vec(),
                actions: USER_ACTIONS.to_vec(),
                on_action,
            }

            UserDrawer { open: drawer_open, editing, role_options, table, status_line }
        }
    }
}

#[component]
fn UserDrawer(
    open: Signal<bool>,
    editing: Signal<Option<Value>>,
    role_options: Signal<Vec<LookupOption>>,
    table: RemoteTable,
    status_line: Signal<String>,
) -> Element {
    let services = use_context::<AppServices>();
    let auth = use_context::<Signal<AuthPhase>>();
    let mut form = FormState::provide();

    use_effect(move || {
        let mut values = BTreeMap::new();
        if let Some(record) = editing() {
            for field in ["name", "email", "role", "status"] {
                values.insert(
                    field.to_string(),
                    FormValue::Text(project_field(&record, field)),
                );
            }
        }
        form.load(values);
    });

    let on_submit = move |_| {
        if !form.validate(&USER_RULES) {
            return;
        }
        let mut payload = json!({
            "name": form.text("name"),
            "email": form.text("email"),
            "role": form.text("role"),
            "status": form.text("status"),
        });
        if let Some(id) = editing().as_ref().and_then(|record| record.get("id")).and_then(Value::as_i64) {
            payload["id"] = json!(id);
        }
        let users = services.users.clone();
        let mut open = open;
        let mut status_line = status_line;
        form.set_submitting(true);
        spawn(async move {
            let outcome = users.create_update(payload).await;
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

    let title = if editing().is_some() { "Edit user" } else { "Add user" };
    let role_names: Vec<String> = role_options().into_iter().map(|role| role.name).collect();

    rsx! {
        div { style: "position: fixed; top: 0; right: 0; width: 380px; height: 100vh; background: #fff; box-shadow: -2px 0 8px rgba(0,0,0,0.15); padding: 20px; overflow: auto; z-index: 1000;",
            h3 { style: "margin-top: 0;", "{title}" }
            TextInput { name: "name", label: "Name" }
            TextInput { name: "email", label: "Email" }
            TextSelectInput { name: "role", label: "Role", options: role_names }
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
