use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use mathcat_core::ops::OperationKind;
use services::story_service::Narrator;
use services::{InMemoryProgress, ProgressStore, StoryTeller};
use storage::{InMemorySessionStore, SessionStore};

use crate::context::{AppContext, UiApp, build_app_context};
use crate::views::{HomeView, LoginView, PracticeView, RegisterView, StoryView};

use super::practice::PracticeTestHandles;

struct TestApp {
    username: Option<String>,
    session_store: Arc<InMemorySessionStore>,
    progress: Arc<InMemoryProgress>,
}

impl UiApp for TestApp {
    fn initial_username(&self) -> Option<String> {
        self.username.clone()
    }

    fn session_store(&self) -> Arc<dyn SessionStore> {
        Arc::clone(&self.session_store) as Arc<dyn SessionStore>
    }

    fn progress(&self) -> Arc<dyn ProgressStore> {
        Arc::clone(&self.progress) as Arc<dyn ProgressStore>
    }

    fn narrator(&self) -> Arc<dyn Narrator> {
        Arc::new(StoryTeller)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Login,
    Home,
    Register,
    Practice(OperationKind),
    PracticeUnknown,
    Story,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    context: AppContext,
    view: ViewKind,
    practice_handles: PracticeTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    use_context_provider(|| props.context.clone());
    use_context_provider(|| props.view);
    use_context_provider(|| props.practice_handles.clone());
    rsx! { Router::<TestRoute> {} }
}

// Mirrors the app's paths so in-test navigation always lands on a view.
#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")] Root {},
    #[route("/home")] HomeRoot {},
    #[route("/register")] RegisterRoot {},
    #[route("/practice/:kind")] PracticeRoot { kind: String },
    #[route("/story")] StoryRoot {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Login => rsx! { LoginView {} },
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Register => rsx! { RegisterView {} },
        ViewKind::Practice(kind) => rsx! { PracticeView { kind: kind.as_str().to_string() } },
        ViewKind::PracticeUnknown => rsx! { PracticeView { kind: "algebra".to_string() } },
        ViewKind::Story => rsx! { StoryView {} },
    }
}

#[component]
fn HomeRoot() -> Element {
    rsx! { HomeView {} }
}

#[component]
fn RegisterRoot() -> Element {
    rsx! { RegisterView {} }
}

#[component]
fn PracticeRoot(kind: String) -> Element {
    rsx! { PracticeView { kind } }
}

#[component]
fn StoryRoot() -> Element {
    rsx! { StoryView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub context: AppContext,
    pub store: Arc<InMemorySessionStore>,
    pub progress: Arc<InMemoryProgress>,
    pub practice_handles: PracticeTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, username: Option<&str>) -> ViewHarness {
    let store = Arc::new(InMemorySessionStore::new());
    let progress = Arc::new(InMemoryProgress::new());
    let app: Arc<dyn UiApp> = Arc::new(TestApp {
        username: username.map(str::to_string),
        session_store: Arc::clone(&store),
        progress: Arc::clone(&progress),
    });
    let context = build_app_context(&app);
    let practice_handles = PracticeTestHandles::default();

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            context: context.clone(),
            view,
            practice_handles: practice_handles.clone(),
        },
    );

    ViewHarness {
        dom,
        context,
        store,
        progress,
        practice_handles,
    }
}
