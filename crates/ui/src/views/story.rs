use dioxus::prelude::*;
use dioxus_router::Link;

use services::story_service::StoryRequest;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[component]
pub fn StoryView() -> Element {
    let ctx = use_context::<AppContext>();
    // The handoff is one-shot; grab it before the first await so a re-render
    // cannot consume it twice.
    let request = use_signal(|| ctx.take_pending_story());

    let resource = {
        let ctx = ctx.clone();
        use_resource(move || {
            let ctx = ctx.clone();
            async move {
                let Some(req) = request() else {
                    return Ok(None);
                };
                let text = ctx.narrator().tell(&req);
                // Deposit the text so the practice view can pick it up when
                // the learner goes back.
                ctx.session_store()
                    .put_story(&text)
                    .await
                    .map_err(|_| ViewError::Unknown)?;
                Ok::<_, ViewError>(Some((req, text)))
            }
        })
    };

    let state = view_state_from_resource(resource);
    rsx! {
        div { class: "page story-page",
            header { class: "view-header",
                h2 { class: "view-title", "😺 Story time" }
            }
            div { class: "view-divider" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Mati is thinking..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
                ViewState::Ready(None) => rsx! {
                    p { "Mati has no story right now. Solve an exercise first!" }
                    p { class: "view-hint",
                        Link { to: Route::Home {}, "Back home" }
                    }
                },
                ViewState::Ready(Some((req, text))) => rsx! {
                    StoryBody { request: req, text }
                },
            }
        }
    }
}

#[component]
fn StoryBody(request: StoryRequest, text: String) -> Element {
    rsx! {
        div { class: "story-card",
            for line in text.lines() {
                p { class: "story-line", "{line}" }
            }
        }
        p { class: "view-hint",
            Link { to: Route::practice(request.kind), "Back to practice" }
        }
    }
}
