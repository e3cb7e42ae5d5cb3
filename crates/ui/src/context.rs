use std::sync::{Arc, Mutex};

use services::story_service::{Narrator, StoryRequest};
use services::ProgressStore;
use storage::SessionStore;

/// What the composition root must provide to the UI.
pub trait UiApp: Send + Sync {
    /// Username restored from the environment, if any. Login can replace it.
    fn initial_username(&self) -> Option<String>;

    fn session_store(&self) -> Arc<dyn SessionStore>;
    fn progress(&self) -> Arc<dyn ProgressStore>;
    fn narrator(&self) -> Arc<dyn Narrator>;
}

#[derive(Clone)]
pub struct AppContext {
    username: Arc<Mutex<Option<String>>>,
    session_store: Arc<dyn SessionStore>,
    progress: Arc<dyn ProgressStore>,
    narrator: Arc<dyn Narrator>,

    // Handoff slot between the practice view and the story view. Written by
    // the practice view right before navigating, consumed exactly once on
    // the other side.
    pending_story: Arc<Mutex<Option<StoryRequest>>>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            username: Arc::new(Mutex::new(app.initial_username())),
            session_store: app.session_store(),
            progress: app.progress(),
            narrator: app.narrator(),
            pending_story: Arc::new(Mutex::new(None)),
        }
    }

    #[must_use]
    pub fn username(&self) -> Option<String> {
        self.username.lock().ok().and_then(|guard| guard.clone())
    }

    pub fn set_username(&self, username: Option<String>) {
        if let Ok(mut guard) = self.username.lock() {
            *guard = username;
        }
    }

    #[must_use]
    pub fn session_store(&self) -> Arc<dyn SessionStore> {
        Arc::clone(&self.session_store)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<dyn ProgressStore> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn narrator(&self) -> Arc<dyn Narrator> {
        Arc::clone(&self.narrator)
    }

    pub fn set_pending_story(&self, request: StoryRequest) {
        if let Ok(mut guard) = self.pending_story.lock() {
            *guard = Some(request);
        }
    }

    #[must_use]
    pub fn take_pending_story(&self) -> Option<StoryRequest> {
        self.pending_story.lock().ok().and_then(|mut guard| guard.take())
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
