use std::collections::BTreeMap;

use dioxus::prelude::*;
use serde_json::{json, Value};

use crate::app::{report_error, AppServices, AuthPhase};
use crate::domain::entities::page::PageQuery;
use crate::domain::entities::resource::LookupOption;
use crate::infra::http::endpoints;
use crate::infra::http::query::QueryString;
use crate::ui::components::confirm::confirm_destructive;
use crate::ui::components::inputs::{
    FilePickerInput, MultiSelectInput, SelectInput, SubmitButton, TextInput, TextSelectInput,
};
use crate::ui::components::table_view::{
    DataTableView, PageSizeSelect, RowAction, RowActionDef,
};
use crate::ui::state::form::{FieldRule, FormState, FormValue};
use crate::ui::state::table::{project_field, ColumnDef, RemoteTable};
use crate::usecase::ports::transport::FilePart;

const LEAD_COLUMNS: [ColumnDef; 6] = [
    ColumnDef::new("name", "Name"),
    ColumnDef::new("email", "Email"),
    ColumnDef::unsorted("phoneNumber", "Phone"),
    ColumnDef::new("status", "Status"),
    ColumnDef::unsorted("projectName", "Project"),
    ColumnDef::unsorted("assignedUserName", "Assigned to"),
];

const LEAD_ACTIONS: [RowActionDef; 4] = [
    RowActionDef { key: "edit", label: "Edit" },
    RowActionDef { key: "assign", label: "Assign user" },
    RowActionDef { key: "followup", label: "Follow up" },
    RowActionDef { key: "delete", label: "Delete" },
];

const LEAD_RULES: [FieldRule; 3] = [
    FieldRule::required("name", "Name"),
    FieldRule::email("email", "Email"),
    FieldRule::required("status", "Status"),
];

const LEAD_STATUSES: [&str; 5] = ["New", "Contacted", "Qualified", "Won", "Lost"];

#[component]
pub fn LeadsPage() -> Element {
    let services = use_context::<AppServices>();
    let auth = use_context::<Signal<AuthPhase>>();
    let table = RemoteTable::new(endpoints::GET_LEADS, "get-leads");
    use_effect(move || table.enable());

    let mut search_input = use_signal(String::new);
    let mut status_filter = use_signal(String::new);
    let mut project_filter = use_signal(|| None::<i64>);
    let mut project_options = use_signal(Vec::<LookupOption>::new);
    let status_line = use_signal(String::new);
    let mut drawer_open = use_signal(|| false);
    let mut editing = use_signal(|| None::<Value>);
    let mut assigning = use_signal(|| None::<i64>);
    let mut following_up = use_signal(|| None::<i64>);

    // Project filter options load once per page mount.
    let services_for_projects = services.clone();
    use_effect(move || {
        let projects = services_for_projects.projects.clone();
        let mut status_line = status_line;
        spawn(async move {
            let query = PageQuery { page_size: 100, ..Default::default() };
            match projects.list(&query, "").await {
                Ok(page) => {
                    let options = page
                        .items
                        .into_iter()
                        .map(|project| LookupOption {
                            id: project.id,
                            name: project.name.unwrap_or_default(),
                        })
                        .collect();
                    project_options.set(options);
                }
                Err(err) => report_error(&err, status_line, auth),
            }
        });
    });

    use_effect(move || {
        let payload = QueryString::new()
            .filter("Status", &status_filter())
            .filter_id("ProjectId", project_filter())
            .into_string();
        table.set_extra_payload(payload);
    });

    let services_for_actions = services.clone();
    let on_action = move |action: RowAction| match action.action {
        // Edit works off a fresh copy of the record, not the row projection.
        "edit" => {
            let Some(id) = action.row.id() else { return };
            let leads = services_for_actions.leads.clone();
            spawn(async move {
                match leads.get_one(id).await {
                    Ok(lead) => {
                        if let Ok(record) = serde_json::to_value(lead) {
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
        "followup" => {
            if let Some(id) = action.row.id() {
                following_up.set(Some(id));
            }
        }
        "delete" => {
            let Some(id) = action.row.id() else { return };
            if !confirm_destructive("Are you sure you want to delete this lead?") {
                return;
            }
            let leads = services_for_actions.leads.clone();
            let mut status_line = status_line;
            spawn(async move {
                match leads.delete(id).await {
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
                h3 { style: "margin: 0 16px 0 0;", "Leads" }
                input {
                    style: "padding: 6px 8px; border: 1px solid #ccc; border-radius: 6px;",
                    placeholder: "Search leads…",
                    value: "{search_input}",
                    oninput: move |event| {
                        search_input.set(event.value());
                        table.set_search_text(event.value());
                    },
                }
                select {
                    onchange: move |event| status_filter.set(event.value()),
                    option { value: "", "All statuses" }
                    for status in LEAD_STATUSES {
                        option { value: status, "{status}" }
                    }
                }
                select {
                    onchange: move |event| project_filter.set(event.value().parse::<i64>().ok()),
                    option { value: "", "All projects" }
                    for project in project_options() {
                        option { value: "{project.id}", "{project.name}" }
                    }
                }
                PageSizeSelect { table }
                button {
                    style: "margin-left: auto; padding: 6px 14px; background: #2d6cdf; color: #fff; border: none; border-radius: 6px; cursor: pointer;",
                    onclick: move |_| {
                        editing.set(None);
                        drawer_open.set(true);
                    },
                    "Add lead"
                }
            }

            if !status_text.is_empty() {
                p { style: "font-size: 13px; color: #555;", "{status_text}" }
            }

            DataTableView {
                table,
                columns: LEAD_COLUMNS.to_vec(),
                actions: LEAD_ACTIONS.to_vec(),
                on_action,
            }

            LeadDrawer { open: drawer_open, editing, project_options, table, status_line }
            AssignUserDialog { lead_id: assigning, table, status_line }
            FollowUpDialog { lead_id: following_up, table, status_line }
        }
    }
}

#[component]
fn LeadDrawer(
    open: Signal<bool>,
    editing: Signal<Option<Value>>,
    project_options: Signal<Vec<LookupOption>>,
    table: RemoteTable,
    status_line: Signal<String>,
) -> Element {
    let services = use_context::<AppServices>();
    let auth = use_context::<Signal<AuthPhase>>();
    let mut form = FormState::provide();

    let mut block_options = use_signal(Vec::<LookupOption>::new);
    let mut street_options = use_signal(Vec::<LookupOption>::new);
    let mut item_type_options = use_signal(Vec::<LookupOption>::new);
    let mut category_options = use_signal(Vec::<LookupOption>::new);
    let mut size_options = use_signal(Vec::<LookupOption>::new);
    let mut loaded_project = use_signal(|| None::<i64>);

    use_effect(move || {
        let mut values = BTreeMap::new();
        if let Some(record) = editing() {
            for field in ["name", "email", "phoneNumber", "status", "notes"] {
                values.insert(
                    field.to_string(),
                    FormValue::Text(project_field(&record, field)),
                );
            }
            for field in ["projectId", "blockId", "streetId", "itemCategoryId", "itemSizeId"] {
                let choice = record.get(field).and_then(Value::as_i64);
                values.insert(field.to_string(), FormValue::Choice(choice));
            }
            let item_types = record
                .get("itemTypeIds")
                .and_then(Value::as_array)
                .map(|ids| ids.iter().filter_map(Value::as_i64).collect())
                .unwrap_or_default();
            values.insert("itemTypeIds".to_string(), FormValue::Multi(item_types));
        }
        form.load(values);
    });

    // Item categories and sizes are global lookups, loaded once per mount.
    let services_for_lookups = services.clone();
    use_effect(move || {
        let lookups = services_for_lookups.lookups.clone();
        let mut status_line = status_line;
        spawn(async move {
            match lookups.item_categories().await {
                Ok(options) => category_options.set(options),
                Err(err) => report_error(&err, status_line, auth),
            }
            match lookups.item_sizes().await {
                Ok(options) => size_options.set(options),
                Err(err) => report_error(&err, status_line, auth),
            }
        });
    });

    // Blocks, streets and item types are scoped to the chosen project and
    // reload whenever it changes.
    let services_for_scoped = services.clone();
    use_effect(move || {
        let project = form.value("projectId").as_choice();
        if loaded_project() == project {
            return;
        }
        loaded_project.set(project);
        block_options.set(Vec::new());
        street_options.set(Vec::new());
        item_type_options.set(Vec::new());
        let Some(project) = project else { return };
        let projects = services_for_scoped.projects.clone();
        let mut status_line = status_line;
        spawn(async move {
            match projects.blocks(project).await {
                Ok(options) => block_options.set(options),
                Err(err) => report_error(&err, status_line, auth),
            }
            match projects.streets(project).await {
                Ok(options) => street_options.set(options),
                Err(err) => report_error(&err, status_line, auth),
            }
            match projects.item_types(project).await {
                Ok(options) => item_type_options.set(options),
                Err(err) => report_error(&err, status_line, auth),
            }
        });
    });

    let on_submit = move |_| {
        if !form.validate(&LEAD_RULES) {
            return;
        }
        let mut payload = json!({
            "name": form.text("name"),
            "email": form.text("email"),
            "phoneNumber": form.text("phoneNumber"),
            "status": form.text("status"),
            "notes": form.text("notes"),
        });
        for field in ["projectId", "blockId", "streetId", "itemCategoryId", "itemSizeId"] {
            if let Some(choice) = form.value(field).as_choice() {
                payload[field] = json!(choice);
            }
        }
        let item_types = form.value("itemTypeIds").as_multi().to_vec();
        if !item_types.is_empty() {
            payload["itemTypeIds"] = json!(item_types);
        }
        if let Some(id) = editing().as_ref().and_then(|record| record.get("id")).and_then(Value::as_i64) {
            payload["id"] = json!(id);
        }
        let leads = services.leads.clone();
        let mut open = open;
        let mut status_line = status_line;
        form.set_submitting(true);
        spawn(async move {
            let outcome = leads.create_update(payload).await;
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

    let title = if editing().is_some() { "Edit lead" } else { "Add lead" };

    rsx! {
        div { style: "position: fixed; top: 0; right: 0; width: 380px; height: 100vh; background: #fff; box-shadow: -2px 0 8px rgba(0,0,0,0.15); padding: 20px; overflow: auto; z-index: 1000;",
            h3 { style: "margin-top: 0;", "{title}" }
            TextInput { name: "name", label: "Name" }
            TextInput { name: "email", label: "Email" }
            TextInput { name: "phoneNumber", label: "Phone" }
            TextSelectInput {
                name: "status",
                label: "Status",
                options: LEAD_STATUSES.iter().map(|status| status.to_string()).collect(),
            }
            SelectInput {
                name: "projectId",
                label: "Project",
                options: project_options(),
            }
            SelectInput { name: "blockId", label: "Block", options: block_options() }
            SelectInput { name: "streetId", label: "Street", options: street_options() }
            MultiSelectInput {
                name: "itemTypeIds",
                label: "Item types",
                options: item_type_options(),
            }
            SelectInput {
                name: "itemCategoryId",
                label: "Item category",
                options: category_options(),
            }
            SelectInput { name: "itemSizeId", label: "Item size", options: size_options() }
            TextInput { name: "notes", label: "Notes" }
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
fn AssignUserDialog(
    lead_id: Signal<Option<i64>>,
    table: RemoteTable,
    status_line: Signal<String>,
) -> Element {
    let services = use_context::<AppServices>();
    let auth = use_context::<Signal<AuthPhase>>();
    let mut form = FormState::provide();
    let mut user_options = use_signal(Vec::<LookupOption>::new);
    let mut loading_options = use_signal(|| false);

    let services_for_options = services.clone();
    use_effect(move || {
        if lead_id().is_none() {
            return;
        }
        let users = services_for_options.users.clone();
        let mut status_line = status_line;
        loading_options.set(true);
        spawn(async move {
            let query = PageQuery { page_size: 100, ..Default::default() };
            match users.list(&query, "", "Active").await {
                Ok(page) => {
                    let options = page
                        .items
                        .into_iter()
                        .map(|user| LookupOption {
                            id: user.id,
                            name: user.name.or(user.email).unwrap_or_default(),
                        })
                        .collect();
                    user_options.set(options);
                }
                Err(err) => report_error(&err, status_line, auth),
            }
            loading_options.set(false);
        });
    });

    let on_submit = move |_| {
        let Some(lead) = lead_id() else { return };
        let Some(user) = form.value("userId").as_choice() else {
            form.set_touched("userId");
            form.set_error("userId", "User is required".to_string());
            return;
        };
        let leads = services.leads.clone();
        let mut lead_id = lead_id;
        let mut status_line = status_line;
        form.set_submitting(true);
        spawn(async move {
            let outcome = leads.assign_to_user(lead, user).await;
            form.set_submitting(false);
            match outcome {
                Ok(message) => {
                    status_line.set(message);
                    lead_id.set(None);
                    table.refresh();
                }
                Err(err) => report_error(&err, status_line, auth),
            }
        });
    };

    if lead_id().is_none() {
        return rsx! {};
    }

    rsx! {
        div { style: "position: fixed; inset: 0; background: rgba(0,0,0,0.3); display: flex; justify-content: center; align-items: center; z-index: 1100;",
            div { style: "width: 340px; background: #fff; border-radius: 8px; padding: 20px;",
                h3 { style: "margin-top: 0;", "Assign lead" }
                SelectInput {
                    name: "userId",
                    label: "User",
                    options: user_options(),
                    loading: loading_options(),
                }
                div { style: "display: flex; gap: 8px; margin-top: 12px;",
                    SubmitButton { label: "Assign", on_press: on_submit }
                    button {
                        onclick: move |_| lead_id.set(None),
                        "Cancel"
                    }
                }
            }
        }
    }
}

#[component]
fn FollowUpDialog(
    lead_id: Signal<Option<i64>>,
    table: RemoteTable,
    status_line: Signal<String>,
) -> Element {
    let services = use_context::<AppServices>();
    let auth = use_context::<Signal<AuthPhase>>();
    let mut form = FormState::provide();

    let on_submit = move |_| {
        let Some(lead) = lead_id() else { return };
        let note = form.text("note");
        if note.trim().is_empty() {
            form.set_touched("note");
            form.set_error("note", "Note is required".to_string());
            return;
        }
        let attachment = form.value("attachment").as_file().map(|path| FilePart {
            field: "file".to_string(),
            path: path.clone(),
        });
        let leads = services.leads.clone();
        let mut lead_id = lead_id;
        let mut status_line = status_line;
        form.set_submitting(true);
        spawn(async move {
            let outcome = leads.add_follow_up(lead, &note, attachment).await;
            form.set_submitting(false);
            match outcome {
                Ok(message) => {
                    status_line.set(message);
                    lead_id.set(None);
                    table.refresh();
                }
                Err(err) => report_error(&err, status_line, auth),
            }
        });
    };

    if lead_id().is_none() {
        return rsx! {};
    }

    rsx! {
        div { style: "position: fixed; inset: 0; background: rgba(0,0,0,0.3); display: flex; justify-content: center; align-items: center; z-index: 1100;",
            div { style: "width: 340px; background: #fff; border-radius: 8px; padding: 20px;",
                h3 { style: "margin-top: 0;", "Add follow-up" }
                TextInput { name: "note", label: "Note" }
                FilePickerInput { name: "attachment", label: "Attachment" }
                div { style: "display: flex; gap: 8px; margin-top: 12px;",
                    SubmitButton { label: "Save", on_press: on_submit }
                    button {
                        onclick: move |_| lead_id.set(None),
                        "Cancel"
                    }
                }
            }
        }
    }
}
