use std::path::Path;

use dioxus::prelude::*;
use rfd::FileDialog;

use crate::domain::entities::resource::LookupOption;
use crate::ui::state::form::{FormState, FormValue};

pub const ACCEPTED_FILE_EXTENSIONS: [&str; 8] =
    ["png", "jpg", "jpeg", "pdf", "doc", "docx", "xls", "xlsx"];
pub const MAX_FILE_SIZE_BYTES: u64 = 20 * 1024 * 1024;

const LABEL_STYLE: &str = "font-size: 13px; color: #333;";
const INPUT_STYLE: &str =
    "padding: 6px 8px; border: 1px solid #ccc; border-radius: 6px; font-size: 14px; flex: 1;";
const ERROR_STYLE: &str = "font-size: 12px; color: #c0392b;";
const FIELD_STYLE: &str = "display: flex; flex-direction: column; gap: 4px; margin-bottom: 10px;";

/// Exactly one file, accepted extension, at most 20 MB.
pub fn validate_upload(path: &Path, size: u64) -> Result<(), String> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();
    if !ACCEPTED_FILE_EXTENSIONS.contains(&extension.as_str()) {
        return Err(
            "Only png, jpg, jpeg, pdf, doc, docx, xls, or xlsx files are allowed.".to_string(),
        );
    }
    if size > MAX_FILE_SIZE_BYTES {
        return Err("File size should not exceed 20MB.".to_string());
    }
    Ok(())
}

pub fn format_file_size(size_in_bytes: u64) -> String {
    if size_in_bytes < 1024 {
        format!("{size_in_bytes} B")
    } else if size_in_bytes < 1024 * 1024 {
        format!("{:.2} KB", size_in_bytes as f64 / 1024.0)
    } else {
        format!("{:.2} MB", size_in_bytes as f64 / (1024.0 * 1024.0))
    }
}

#[component]
pub fn TextInput(
    name: &'static str,
    label: &'static str,
    #[props(default = false)] password: bool,
    #[props(default)] placeholder: String,
) -> Element {
    let mut form = FormState::use_form();
    let mut show_password = use_signal(|| false);
    let value = form.text(name);
    let error_text = form.visible_error(name).unwrap_or_default();
    let input_type = if password && !show_password() {
        "password"
    } else {
        "text"
    };

    rsx! {
        div { style: FIELD_STYLE,
            label { style: LABEL_STYLE, "{label}" }
            div { style: "display: flex; gap: 4px; align-items: center;",
                input {
                    r#type: input_type,
                    value: "{value}",
                    placeholder: "{placeholder}",
                    disabled: form.is_submitting(),
                    style: INPUT_STYLE,
                    oninput: move |event| form.set_value(name, FormValue::Text(event.value())),
                    onblur: move |_| form.set_touched(name),
                }
                if password {
                    button {
                        r#type: "button",
                        onclick: move |_| {
                            let visible = show_password();
                            show_password.set(!visible);
                        },
                        if show_password() { "Hide" } else { "Show" }
                    }
                }
            }
            if !error_text.is_empty() {
                span { style: ERROR_STYLE, "{error_text}" }
            }
        }
    }
}

#[component]
pub fn SelectInput(
    name: &'static str,
    label: &'static str,
    options: Vec<LookupOption>,
    #[props(default = false)] loading: bool,
) -> Element {
    let mut form = FormState::use_form();
    let selected = form.value(name).as_choice();
    let error_text = form.visible_error(name).unwrap_or_default();

    rsx! {
        div { style: FIELD_STYLE,
            label { style: LABEL_STYLE, "{label}" }
            select {
                style: INPUT_STYLE,
                disabled: form.is_submitting() || loading,
                onchange: move |event| {
                    let choice = event.value().parse::<i64>().ok();
                    form.set_value(name, FormValue::Choice(choice));
                    form.set_touched(name);
                },
                if loading {
                    option { value: "", selected: true, "Loading options…" }
                } else {
                    option { value: "", selected: selected.is_none(), "-- select --" }
                    for option in options {
                        option {
                            value: "{option.id}",
                            selected: selected == Some(option.id),
                            "{option.name}"
                        }
                    }
                }
            }
            if !error_text.is_empty() {
                span { style: ERROR_STYLE, "{error_text}" }
            }
        }
    }
}

/// Select over plain string options (statuses and the like), stored as text.
#[component]
pub fn TextSelectInput(
    name: &'static str,
    label: &'static str,
    options: Vec<String>,
) -> Element {
    let mut form = FormState::use_form();
    let selected = form.text(name);
    let error_text = form.visible_error(name).unwrap_or_default();

    rsx! {
        div { style: FIELD_STYLE,
            label { style: LABEL_STYLE, "{label}" }
            select {
                style: INPUT_STYLE,
                disabled: form.is_submitting(),
                onchange: move |event| {
                    form.set_value(name, FormValue::Text(event.value()));
                    form.set_touched(name);
                },
                option { value: "", selected: selected.is_empty(), "-- select --" }
                for option in options {
                    option { value: "{option}", selected: selected == option, "{option}" }
                }
            }
            if !error_text.is_empty() {
                span { style: ERROR_STYLE, "{error_text}" }
            }
        }
    }
}

#[component]
pub fn MultiSelectInput(
    name: &'static str,
    label: &'static str,
    options: Vec<LookupOption>,
) -> Element {
    let mut form = FormState::use_form();
    let selected = form.value(name).as_multi().to_vec();
    let error_text = form.visible_error(name).unwrap_or_default();

    rsx! {
        div { style: FIELD_STYLE,
            label { style: LABEL_STYLE, "{label}" }
            div { style: "display: flex; flex-wrap: wrap; gap: 8px;",
                for option in options {
                    label { style: "display: flex; align-items: center; gap: 4px; font-size: 13px;",
                        input {
                            r#type: "checkbox",
                            checked: selected.contains(&option.id),
                            disabled: form.is_submitting(),
                            onchange: move |_| {
                                let mut ids = form.value(name).as_multi().to_vec();
                                match ids.iter().position(|id| *id == option.id) {
                                    Some(pos) => {
                                        ids.remove(pos);
                                    }
                                    None => ids.push(option.id),
                                }
                                form.set_value(name, FormValue::Multi(ids));
                                form.set_touched(name);
                            },
                        }
                        "{option.name}"
                    }
                }
            }
            if !error_text.is_empty() {
                span { style: ERROR_STYLE, "{error_text}" }
            }
        }
    }
}

#[component]
pub fn FilePickerInput(name: &'static str, label: &'static str) -> Element {
    let mut form = FormState::use_form();
    let picked = form.value(name).as_file().cloned();
    let error_text = form.visible_error(name).unwrap_or_default();

    let picked_label = picked
        .as_ref()
        .map(|path| {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let size = std::fs::metadata(path).map(|meta| meta.len()).unwrap_or(0);
            format!("{file_name} ({})", format_file_size(size))
        })
        .unwrap_or_default();

    rsx! {
        div { style: FIELD_STYLE,
            label { style: LABEL_STYLE, "{label}" }
            div { style: "display: flex; gap: 8px; align-items: center;",
                button {
                    r#type: "button",
                    disabled: form.is_submitting(),
                    onclick: move |_| {
                        form.set_touched(name);
                        let Some(path) = FileDialog::new()
                            .add_filter("Documents", &ACCEPTED_FILE_EXTENSIONS)
                            .pick_file()
                        else {
                            return;
                        };
                        let size = std::fs::metadata(&path).map(|meta| meta.len()).unwrap_or(0);
                        match validate_upload(&path, size) {
                            Ok(()) => {
                                form.clear_error(name);
                                form.set_value(name, FormValue::File(Some(path)));
                            }
                            Err(message) => {
                                form.set_error(name, message);
                                form.set_value(name, FormValue::File(None));
                            }
                        }
                    },
                    "Choose file"
                }
                if !picked_label.is_empty() {
                    span { style: "font-size: 13px;", "{picked_label}" }
                    button {
                        r#type: "button",
                        onclick: move |_| {
                            form.set_value(name, FormValue::File(None));
                            form.clear_error(name);
                        },
                        "Remove"
                    }
                }
            }
            if !error_text.is_empty() {
                span { style: ERROR_STYLE, "{error_text}" }
            }
        }
    }
}

#[component]
pub fn SubmitButton(label: &'static str, on_press: EventHandler<()>) -> Element {
    let form = FormState::use_form();
    let submitting = form.is_submitting();

    rsx! {
        button {
            r#type: "button",
            disabled: submitting,
            style: "padding: 8px 16px; border-radius: 6px; border: none; background: #2d6cdf; color: #fff; cursor: pointer;",
            onclick: move |_| on_press.call(()),
            if submitting { "Saving…" } else { "{label}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn upload_accepts_listed_extensions_within_limit() {
        for ext in ACCEPTED_FILE_EXTENSIONS {
            let path = PathBuf::from(format!("report.{ext}"));
            assert!(
                validate_upload(&path, 1024).is_ok(),
                "{ext} should be accepted"
            );
        }
    }

    #[test]
    fn upload_rejects_unlisted_extension_and_case_folds() {
        let err = validate_upload(Path::new("payload.exe"), 10).expect_err("exe must be rejected");
        assert!(err.contains("allowed"));

        assert!(
            validate_upload(Path::new("SCAN.PDF"), 10).is_ok(),
            "extension check should be case-insensitive"
        );
        assert!(validate_upload(Path::new("noextension"), 10).is_err());
    }

    #[test]
    fn upload_rejects_files_over_twenty_megabytes() {
        assert!(validate_upload(Path::new("a.pdf"), MAX_FILE_SIZE_BYTES).is_ok());
        let err = validate_upload(Path::new("a.pdf"), MAX_FILE_SIZE_BYTES + 1)
            .expect_err("oversized file must be rejected");
        assert!(err.contains("20MB"));
    }

    #[test]
    fn file_sizes_format_by_magnitude() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(2048), "2.00 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024), "3.00 MB");
    }
}
