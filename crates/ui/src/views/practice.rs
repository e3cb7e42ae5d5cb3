#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;
use std::str::FromStr;
use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use mathcat_core::ops::OperationKind;
use services::{ADVANCE_DELAY, AnswerOutcome, Clock, PracticeSession};
use storage::SessionStore;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{map_practice, operation_emoji, operation_label};

/// How long the cat celebrates or sulks before going back to idle.
const FX_RESET: Duration = Duration::from_millis(900);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CatFx {
    Idle,
    Celebrate,
    Sad,
}

fn cat_face(fx: CatFx) -> &'static str {
    match fx {
        CatFx::Idle => "😺",
        CatFx::Celebrate => "😸",
        CatFx::Sad => "😿",
    }
}

#[component]
pub fn PracticeView(kind: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let parsed = OperationKind::from_str(&kind).ok();

    let session = use_signal(|| None::<PracticeSession>);
    let story_text = use_signal(|| None::<String>);
    let fx = use_signal(|| CatFx::Idle);
    let fx_epoch = use_signal(|| 0u64);
    let advance_epoch = use_signal(|| 0u64);
    let pending_input = use_signal(|| None::<String>);
    let view_error = use_signal(|| None::<ViewError>);

    let resource = {
        let ctx = ctx.clone();
        use_resource(move || {
            let ctx = ctx.clone();
            let parsed = parsed;
            let mut session = session;
            let mut story_text = story_text;
            async move {
                let Some(kind) = parsed else {
                    return Err(ViewError::Unknown);
                };
                let store = ctx.session_store();
                let progress = ctx.progress();
                let started = PracticeSession::start(
                    kind.strategy(),
                    ctx.username(),
                    Clock::default_clock(),
                    store.as_ref(),
                    progress.as_ref(),
                )
                .await;
                // A story written while we were away is picked up exactly once.
                let pending = started
                    .absorb_story(store.as_ref())
                    .await
                    .map_err(|_| ViewError::Unknown)?;
                story_text.set(pending);
                session.set(Some(started));
                Ok::<_, ViewError>(())
            }
        })
    };

    let on_input = {
        let ctx = ctx.clone();
        use_callback(move |text: String| {
            let store = ctx.session_store();
            let mut session = session;
            let mut pending_input = pending_input;
            let mut view_error = view_error;
            let snapshot = {
                let mut guard = session.write();
                match guard.as_mut() {
                    Some(current) => {
                        current.set_input(text);
                        Some(current.clone())
                    }
                    None => {
                        // Another task has the session out right now; the
                        // text is applied when it comes back.
                        pending_input.set(Some(text));
                        None
                    }
                }
            };
            let Some(snapshot) = snapshot else { return };
            spawn(async move {
                if snapshot.save_draft(store.as_ref()).await.is_err() {
                    view_error.set(Some(ViewError::Unknown));
                }
            });
        })
    };

    let on_check = {
        let ctx = ctx.clone();
        use_callback(move |()| {
            let store = ctx.session_store();
            let progress = ctx.progress();
            let mut session = session;
            let mut fx = fx;
            let mut fx_epoch = fx_epoch;
            let mut advance_epoch = advance_epoch;
            let mut view_error = view_error;
            // Any earlier pending auto-advance is superseded by this
            // submission.
            let generation = advance_epoch() + 1;
            advance_epoch.set(generation);
            spawn(async move {
                let taken = { session.write().take() };
                let Some(mut current) = taken else { return };
                let result = current.check_answer(store.as_ref()).await;
                put_back_session(session, pending_input, view_error, store.as_ref(), current)
                    .await;

                match result {
                    Ok(AnswerOutcome::Correct { report }) => {
                        view_error.set(None);
                        if let Some(report) = report {
                            // Detached: a slow server must not hold up the
                            // celebration or the auto-advance.
                            spawn(async move {
                                let _ = report.send(progress.as_ref()).await;
                            });
                        }
                        fx.set(CatFx::Celebrate);
                        fx_epoch.set(fx_epoch() + 1);

                        // The success message stays on screen for a beat, then
                        // the next question is dealt. A newer action cancels
                        // this pending advance.
                        tokio::time::sleep(ADVANCE_DELAY).await;
                        if advance_epoch() != generation {
                            return;
                        }
                        let taken = { session.write().take() };
                        let Some(mut current) = taken else { return };
                        let advanced = current.advance(store.as_ref()).await;
                        put_back_session(
                            session,
                            pending_input,
                            view_error,
                            store.as_ref(),
                            current,
                        )
                        .await;
                        fx.set(CatFx::Idle);
                        if advanced.is_err() {
                            view_error.set(Some(ViewError::Unknown));
                        }
                    }
                    Ok(AnswerOutcome::Incorrect) => {
                        view_error.set(None);
                        fx.set(CatFx::Sad);
                        let generation = fx_epoch() + 1;
                        fx_epoch.set(generation);
                        tokio::time::sleep(FX_RESET).await;
                        if fx_epoch() == generation {
                            fx.set(CatFx::Idle);
                        }
                    }
                    Ok(AnswerOutcome::Rejected) => {
                        view_error.set(None);
                    }
                    Err(_) => {
                        view_error.set(Some(ViewError::Unknown));
                    }
                }
            });
        })
    };

    let on_advance = {
        let ctx = ctx.clone();
        use_callback(move |()| {
            let store = ctx.session_store();
            let mut session = session;
            let mut story_text = story_text;
            let mut fx = fx;
            let mut advance_epoch = advance_epoch;
            let mut view_error = view_error;
            // Cancels any pending auto-advance and ends the celebration.
            advance_epoch.set(advance_epoch() + 1);
            fx.set(CatFx::Idle);
            spawn(async move {
                let taken = { session.write().take() };
                let Some(mut current) = taken else { return };
                let result = current.advance(store.as_ref()).await;
                put_back_session(session, pending_input, view_error, store.as_ref(), current)
                    .await;
                story_text.set(None);
                if result.is_err() {
                    view_error.set(Some(ViewError::Unknown));
                }
            });
        })
    };

    let on_story = {
        let ctx = ctx.clone();
        use_callback(move |()| {
            let ctx = ctx.clone();
            let store = ctx.session_store();
            let mut session = session;
            let mut fx = fx;
            let mut advance_epoch = advance_epoch;
            let mut view_error = view_error;
            // The detour cancels any pending auto-advance and ends the
            // celebration.
            advance_epoch.set(advance_epoch() + 1);
            fx.set(CatFx::Idle);
            spawn(async move {
                let taken = { session.write().take() };
                let Some(mut current) = taken else { return };
                let result = current.request_story(store.as_ref()).await;
                put_back_session(session, pending_input, view_error, store.as_ref(), current)
                    .await;
                match result {
                    Ok(request) => {
                        ctx.set_pending_story(request);
                        let _ = navigator.push(Route::Story {});
                    }
                    Err(_) => view_error.set(Some(ViewError::Unknown)),
                }
            });
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<PracticeTestHandles>() {
                handles.register(on_input, on_check, on_advance, on_story, session, fx);
            }
        }
    }

    let state = view_state_from_resource(resource);
    let vm = session.read().as_ref().map(map_practice);
    let heading = parsed.map_or_else(
        || "Practice".to_string(),
        |kind| format!("{} {}", operation_emoji(kind), operation_label(kind)),
    );

    rsx! {
        div { class: "page practice-page",
            header { class: "view-header",
                h2 { class: "view-title", "{heading}" }
            }
            div { class: "view-divider" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
                ViewState::Ready(()) => rsx! {
                    if let Some(vm) = vm {
                        div { class: "practice-card",
                            div { class: "practice-topline",
                                span { class: "practice-level-badge", "{vm.level_badge}" }
                                span { class: "practice-cat", "{cat_face(fx())}" }
                            }
                            p { class: "practice-prompt", "{vm.prompt}" }
                            form { class: "practice-answer",
                                onsubmit: move |evt| {
                                    evt.prevent_default();
                                    on_check.call(());
                                },
                                input {
                                    class: "practice-input",
                                    r#type: "text",
                                    inputmode: "numeric",
                                    placeholder: "Your answer",
                                    value: "{vm.input}",
                                    oninput: move |evt| on_input.call(evt.value()),
                                }
                                button { class: "btn btn-primary", r#type: "submit", "Check" }
                                button {
                                    class: "btn btn-secondary",
                                    r#type: "button",
                                    onclick: move |_| on_advance.call(()),
                                    "Next question"
                                }
                            }
                            if !vm.message.is_empty() {
                                p { class: "practice-message", "{vm.message}" }
                            }
                            if let Some(err) = view_error() {
                                p { class: "practice-error", "{err.message()}" }
                            }
                            details { class: "practice-guide",
                                summary { "{vm.guide_title}" }
                                p { "{vm.guide_body}" }
                            }
                            div { class: "practice-story-row",
                                button {
                                    class: "btn btn-secondary",
                                    r#type: "button",
                                    disabled: vm.scoring_suppressed,
                                    onclick: move |_| on_story.call(()),
                                    "Tell me a story, Mati 😺"
                                }
                                if vm.scoring_suppressed {
                                    span { class: "practice-story-note",
                                        "This one is just for fun, no points."
                                    }
                                }
                            }
                            if let Some(text) = story_text() {
                                div { class: "practice-story",
                                    h3 { "Mati's story" }
                                    for line in text.lines() {
                                        p { "{line}" }
                                    }
                                }
                            }
                        }
                    }
                },
            }
            p { class: "view-hint",
                Link { to: Route::Home {}, "Back home" }
            }
        }
    }
}

/// Hand the session back to the view. A keystroke that arrived while the
/// session was out is applied now, and the draft catches up with it.
async fn put_back_session(
    mut session: Signal<Option<PracticeSession>>,
    mut pending_input: Signal<Option<String>>,
    mut view_error: Signal<Option<ViewError>>,
    store: &dyn SessionStore,
    mut current: PracticeSession,
) {
    let pending = { pending_input.write().take() };
    let snapshot = pending.map(|text| {
        current.set_input(text);
        current.clone()
    });
    {
        let mut guard = session.write();
        *guard = Some(current);
    }
    if let Some(snapshot) = snapshot {
        if snapshot.save_draft(store).await.is_err() {
            view_error.set(Some(ViewError::Unknown));
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct PracticeTestHandles {
    input: Rc<RefCell<Option<Callback<String>>>>,
    check: Rc<RefCell<Option<Callback<()>>>>,
    advance: Rc<RefCell<Option<Callback<()>>>>,
    story: Rc<RefCell<Option<Callback<()>>>>,
    session: Rc<RefCell<Option<Signal<Option<PracticeSession>>>>>,
    fx: Rc<RefCell<Option<Signal<CatFx>>>>,
}

#[cfg(test)]
impl PracticeTestHandles {
    pub(crate) fn register(
        &self,
        input: Callback<String>,
        check: Callback<()>,
        advance: Callback<()>,
        story: Callback<()>,
        session: Signal<Option<PracticeSession>>,
        fx: Signal<CatFx>,
    ) {
        *self.input.borrow_mut() = Some(input);
        *self.check.borrow_mut() = Some(check);
        *self.advance.borrow_mut() = Some(advance);
        *self.story.borrow_mut() = Some(story);
        *self.session.borrow_mut() = Some(session);
        *self.fx.borrow_mut() = Some(fx);
    }

    pub(crate) fn input(&self) -> Callback<String> {
        (*self.input.borrow()).expect("input callback registered")
    }

    pub(crate) fn check(&self) -> Callback<()> {
        (*self.check.borrow()).expect("check callback registered")
    }

    pub(crate) fn advance(&self) -> Callback<()> {
        (*self.advance.borrow()).expect("advance callback registered")
    }

    pub(crate) fn story(&self) -> Callback<()> {
        (*self.story.borrow()).expect("story callback registered")
    }

    pub(crate) fn session(&self) -> Signal<Option<PracticeSession>> {
        (*self.session.borrow()).expect("session signal registered")
    }

    pub(crate) fn fx(&self) -> Signal<CatFx> {
        (*self.fx.borrow()).expect("fx signal registered")
    }
}
