use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use services::ProgressError;

use crate::context::AppContext;
use crate::routes::Route;

const AGE_RANGE: std::ops::RangeInclusive<u8> = 6..=12;

#[derive(Clone, Debug, PartialEq, Eq)]
enum RegisterState {
    Idle,
    Submitting,
    Error(String),
}

#[component]
pub fn RegisterView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut age = use_signal(String::new);
    let state = use_signal(|| RegisterState::Idle);

    let on_submit = {
        let ctx = ctx.clone();
        use_callback(move |()| {
            let ctx = ctx.clone();
            let progress = ctx.progress();
            let mut state = state;
            let name = username().trim().to_string();
            let pass = password();
            let raw_age = age().trim().to_string();
            if name.is_empty() || pass.is_empty() {
                state.set(RegisterState::Error("Please fill in every field".into()));
                return;
            }
            let Some(parsed_age) = raw_age
                .parse::<u8>()
                .ok()
                .filter(|value| AGE_RANGE.contains(value))
            else {
                state.set(RegisterState::Error(
                    "Age must be a whole number between 6 and 12".into(),
                ));
                return;
            };
            spawn(async move {
                state.set(RegisterState::Submitting);
                match progress.register(&name, &pass, parsed_age).await {
                    Ok(()) => {
                        ctx.set_username(Some(name));
                        state.set(RegisterState::Idle);
                        let _ = navigator.push(Route::Home {});
                    }
                    Err(ProgressError::Rejected(reason)) => {
                        state.set(RegisterState::Error(reason));
                    }
                    Err(_) => {
                        state.set(RegisterState::Error(
                            "The server is napping. Try again soon!".into(),
                        ));
                    }
                }
            });
        })
    };

    let submitting = state() == RegisterState::Submitting;
    rsx! {
        div { class: "page register-page",
            header { class: "view-header",
                h2 { class: "view-title", "🐾 Make an account" }
                p { class: "view-subtitle", "Mati keeps your points safe between visits." }
            }
            div { class: "view-divider" }
            form { class: "auth-form",
                onsubmit: move |evt| {
                    evt.prevent_default();
                    on_submit.call(());
                },
                label { class: "auth-label", "Name"
                    input {
                        class: "auth-input",
                        r#type: "text",
                        value: "{username()}",
                        oninput: move |evt| username.set(evt.value()),
                    }
                }
                label { class: "auth-label", "Password"
                    input {
                        class: "auth-input",
                        r#type: "password",
                        value: "{password()}",
                        oninput: move |evt| password.set(evt.value()),
                    }
                }
                label { class: "auth-label", "Age (6 to 12)"
                    input {
                        class: "auth-input",
                        r#type: "number",
                        min: "6",
                        max: "12",
                        value: "{age()}",
                        oninput: move |evt| age.set(evt.value()),
                    }
                }
                if let RegisterState::Error(reason) = state() {
                    p { class: "auth-notice", "{reason}" }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: submitting,
                    if submitting { "Creating..." } else { "Create account" }
                }
            }
            p { class: "view-hint",
                "Already have one? "
                Link { to: Route::Login {}, "Sign in" }
            }
        }
    }
}
