use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use mathcat_core::ops::OperationKind;

use crate::context::AppContext;
use crate::views::{HomeView, LoginView, PracticeView, RegisterView, StoryView};
use crate::vm::operation_label;

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", LoginView)] Login {},
        #[route("/home", HomeView)] Home {},
        #[route("/register", RegisterView)] Register {},
        #[route("/practice/:kind", PracticeView)] Practice { kind: String },
        #[route("/story", StoryView)] Story {},
}

impl Route {
    #[must_use]
    pub fn practice(kind: OperationKind) -> Self {
        Route::Practice {
            kind: kind.as_str().to_string(),
        }
    }
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let account_label = match ctx.username() {
        Some(name) => format!("😺 {name}"),
        None => "Sign in".to_string(),
    };
    rsx! {
        nav { class: "sidebar",
            h1 { "MathCat" }
            ul {
                li { Link { to: Route::Home {}, "Home" } }
                for kind in OperationKind::ALL {
                    li {
                        Link { to: Route::practice(kind), "{operation_label(kind)}" }
                    }
                }
                li { Link { to: Route::Login {}, "{account_label}" } }
            }
        }
    }
}
