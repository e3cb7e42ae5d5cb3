use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use services::LoginOutcome;

use crate::context::AppContext;
use crate::routes::Route;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LoginState {
    Idle,
    Checking,
}

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let notice = use_signal(|| None::<&'static str>);
    let state = use_signal(|| LoginState::Idle);

    let on_submit = {
        let ctx = ctx.clone();
        use_callback(move |()| {
            let ctx = ctx.clone();
            let progress = ctx.progress();
            let mut notice = notice;
            let mut state = state;
            let name = username().trim().to_string();
            let pass = password();
            if name.is_empty() || pass.is_empty() {
                notice.set(Some("Please fill in both fields"));
                return;
            }
            spawn(async move {
                state.set(LoginState::Checking);
                let result = progress.check_login(&name, &pass).await;
                state.set(LoginState::Idle);
                match result {
                    Ok(LoginOutcome::Ok) => {
                        ctx.set_username(Some(name));
                        notice.set(None);
                        let _ = navigator.push(Route::Home {});
                    }
                    Ok(LoginOutcome::NoUser) => {
                        notice.set(Some("No cat by that name. Want to register?"));
                    }
                    Ok(LoginOutcome::BadPassword) => {
                        notice.set(Some("That password is not right, try again"));
                    }
                    Err(_) => {
                        notice.set(Some("The server is napping. Try again soon!"));
                    }
                }
            });
        })
    };

    rsx! {
        div { class: "page login-page",
            header { class: "view-header",
                h2 { class: "view-title", "😺 Sign in" }
                p { class: "view-subtitle", "Tell Mati who you are to collect points." }
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
                if let Some(text) = notice() {
                    p { class: "auth-notice", "{text}" }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: state() == LoginState::Checking,
                    if state() == LoginState::Checking { "Checking..." } else { "Sign in" }
                }
            }
            p { class: "view-hint",
                "New here? "
                Link { to: Route::Register {}, "Make an account" }
                " or "
                Link { to: Route::Home {}, "practice without one" }
                "."
            }
        }
    }
}
