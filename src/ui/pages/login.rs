use dioxus::prelude::*;

use crate::app::{AppServices, AuthPhase};
use crate::ui::components::inputs::{SubmitButton, TextInput};
use crate::ui::state::form::{FieldRule, FormState};

const LOGIN_RULES: [FieldRule; 3] = [
    FieldRule::required("email", "Email"),
    FieldRule::email("email", "Email"),
    FieldRule::required("password", "Password"),
];

#[component]
pub fn LoginPage(auth: Signal<AuthPhase>) -> Element {
    let services = use_context::<AppServices>();
    let mut form = FormState::provide();
    let mut error_line = use_signal(String::new);
    let mut notice_line = use_signal(String::new);

    let services_for_reset = services.clone();
    let on_forgot = move |_| {
        let email = form.text("email");
        if email.trim().is_empty() {
            form.set_touched("email");
            form.set_error("email", "Enter your email to reset the password".to_string());
            return;
        }
        let auth_service = services_for_reset.auth.clone();
        spawn(async move {
            match auth_service.forgot_password(&email).await {
                Ok(message) => notice_line.set(message),
                Err(err) => error_line.set(err.display_message()),
            }
        });
    };

    let on_submit = move |_| {
        if !form.validate(&LOGIN_RULES) {
            return;
        }
        let email = form.text("email");
        let password = form.text("password");
        let auth_service = services.auth.clone();
        let mut auth = auth;
        form.set_submitting(true);
        spawn(async move {
            let outcome = auth_service.login(&email, &password).await;
            form.set_submitting(false);
            match outcome {
                Ok(_) => {
                    error_line.set(String::new());
                    auth.set(AuthPhase::LoggedIn);
                }
                Err(err) => error_line.set(err.display_message()),
            }
        });
    };

    let error_text = error_line();
    let notice_text = notice_line();

    rsx! {
        div { style: "display: flex; justify-content: center; align-items: center; min-height: 100vh; background: #f2f4f8;",
            div { style: "width: 360px; background: #fff; padding: 24px; border-radius: 8px; box-shadow: 0 2px 8px rgba(0,0,0,0.08);",
                h2 { style: "margin-top: 0;", "Fleet Console" }
                TextInput { name: "email", label: "Email", placeholder: "you@company.com" }
                TextInput { name: "password", label: "Password", password: true }
                if !error_text.is_empty() {
                    p { style: "color: #c0392b; font-size: 13px;", "{error_text}" }
                }
                if !notice_text.is_empty() {
                    p { style: "color: #1e7b34; font-size: 13px;", "{notice_text}" }
                }
                div { style: "display: flex; gap: 8px; align-items: center;",
                    SubmitButton { label: "Sign in", on_press: on_submit }
                    button {
                        r#type: "button",
                        style: "border: none; background: none; color: #2d6cdf; cursor: pointer; font-size: 13px;",
                        onclick: on_forgot,
                        "Forgot password?"
                    }
                }
            }
        }
    }
}
