use dioxus::prelude::*;
use dioxus_router::Link;

use mathcat_core::ops::OperationKind;

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::{operation_emoji, operation_label};

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let greeting = match ctx.username() {
        Some(name) => format!("Hi {name}! What do you want to practice today?"),
        None => "What do you want to practice today?".to_string(),
    };

    rsx! {
        div { class: "page home-page",
            header { class: "view-header",
                h2 { class: "view-title", "😺 Welcome to MathCat" }
                p { class: "view-subtitle", "{greeting}" }
            }
            div { class: "view-divider" }
            div { class: "home-grid",
                for kind in OperationKind::ALL {
                    Link { class: "home-card", to: Route::practice(kind),
                        span { class: "home-card-emoji", "{operation_emoji(kind)}" }
                        span { class: "home-card-label", "{operation_label(kind)}" }
                    }
                }
            }
            if ctx.username().is_none() {
                p { class: "view-hint",
                    "You can practice right away. "
                    Link { to: Route::Login {}, "Sign in" }
                    " to collect points!"
                }
            }
        }
    }
}
