use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

use mathcat_core::model::SessionDraft;
use mathcat_core::ops::OperationKind;

/// Key of the one-shot narrative slot.
pub const STORY_SLOT_KEY: &str = "cat_story_text";

/// Errors surfaced by session-store adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Session-scoped key-value store backing practice continuity.
///
/// Holds one JSON-serialized [`SessionDraft`] per practice type plus the
/// one-shot narrative slot. Entries live for a single session: drafts are
/// overwritten on every input change and answer check and deleted on
/// advance; the narrative slot is written once and consumed once.
///
/// Malformed draft entries are treated as absent on load, never surfaced.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Fetch the draft for a practice type, if a well-formed one exists.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only for adapter failures; a corrupt entry is
    /// reported as `Ok(None)`.
    async fn load_draft(&self, kind: OperationKind)
    -> Result<Option<SessionDraft>, StorageError>;

    /// Persist or overwrite the draft for a practice type.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the draft cannot be encoded.
    async fn save_draft(&self, kind: OperationKind, draft: &SessionDraft)
    -> Result<(), StorageError>;

    /// Delete the draft for a practice type. Deleting a missing draft is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the adapter fails.
    async fn clear_draft(&self, kind: OperationKind) -> Result<(), StorageError>;

    /// Deposit narrative text into the one-shot slot, replacing any pending
    /// text.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the adapter fails.
    async fn put_story(&self, text: &str) -> Result<(), StorageError>;

    /// Consume the pending narrative text, leaving the slot empty.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the adapter fails.
    async fn take_story(&self) -> Result<Option<String>, StorageError>;

    /// Drop any pending narrative text without reading it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the adapter fails.
    async fn clear_story(&self) -> Result<(), StorageError>;
}

/// In-memory session store for the desktop shell and for tests.
///
/// Entries are kept as raw JSON strings so corrupt data is representable,
/// mirroring what a browser's `sessionStorage` would hold.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Insert a raw entry, bypassing serialization. Test hook for seeding
    /// malformed data.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn insert_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load_draft(
        &self,
        kind: OperationKind,
    ) -> Result<Option<SessionDraft>, StorageError> {
        let guard = self.lock()?;
        let Some(raw) = guard.get(&kind.draft_key()) else {
            return Ok(None);
        };
        // A draft that no longer parses is ignored, not an error.
        Ok(serde_json::from_str(raw).ok())
    }

    async fn save_draft(
        &self,
        kind: OperationKind,
        draft: &SessionDraft,
    ) -> Result<(), StorageError> {
        let raw = serde_json::to_string(draft)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.lock()?.insert(kind.draft_key(), raw);
        Ok(())
    }

    async fn clear_draft(&self, kind: OperationKind) -> Result<(), StorageError> {
        self.lock()?.remove(&kind.draft_key());
        Ok(())
    }

    async fn put_story(&self, text: &str) -> Result<(), StorageError> {
        self.lock()?
            .insert(STORY_SLOT_KEY.to_string(), text.to_string());
        Ok(())
    }

    async fn take_story(&self) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.remove(STORY_SLOT_KEY))
    }

    async fn clear_story(&self) -> Result<(), StorageError> {
        self.lock()?.remove(STORY_SLOT_KEY);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mathcat_core::model::{Level, Question};
    use mathcat_core::time::fixed_now;

    fn build_draft() -> SessionDraft {
        SessionDraft {
            level: Level::Beginner,
            question: Question::new(3, 2, 6),
            input: "6".to_string(),
            message: String::new(),
            scoring_suppressed: false,
            saved_at: fixed_now(),
        }
    }

    #[tokio::test]
    async fn save_then_load_is_idempotent() {
        let store = InMemorySessionStore::new();
        let draft = build_draft();

        store
            .save_draft(OperationKind::Multiplication, &draft)
            .await
            .unwrap();
        let restored = store
            .load_draft(OperationKind::Multiplication)
            .await
            .unwrap();

        assert_eq!(restored, Some(draft));
    }

    #[tokio::test]
    async fn drafts_are_keyed_per_practice_type() {
        let store = InMemorySessionStore::new();
        let draft = build_draft();

        store
            .save_draft(OperationKind::Multiplication, &draft)
            .await
            .unwrap();

        let other = store.load_draft(OperationKind::Percent).await.unwrap();
        assert_eq!(other, None);
    }

    #[tokio::test]
    async fn clear_removes_the_draft() {
        let store = InMemorySessionStore::new();
        store
            .save_draft(OperationKind::Addition, &build_draft())
            .await
            .unwrap();

        store.clear_draft(OperationKind::Addition).await.unwrap();

        assert_eq!(store.load_draft(OperationKind::Addition).await.unwrap(), None);
    }

    #[tokio::test]
    async fn malformed_draft_is_ignored_not_an_error() {
        let store = InMemorySessionStore::new();
        store
            .insert_raw(&OperationKind::Division.draft_key(), "{not json")
            .unwrap();

        let restored = store.load_draft(OperationKind::Division).await.unwrap();
        assert_eq!(restored, None);
    }

    #[tokio::test]
    async fn story_slot_is_single_shot() {
        let store = InMemorySessionStore::new();
        store.put_story("Mati counted three fish.").await.unwrap();

        let first = store.take_story().await.unwrap();
        let second = store.take_story().await.unwrap();

        assert_eq!(first.as_deref(), Some("Mati counted three fish."));
        assert_eq!(second, None);
    }

    #[tokio::test]
    async fn put_story_replaces_pending_text() {
        let store = InMemorySessionStore::new();
        store.put_story("first").await.unwrap();
        store.put_story("second").await.unwrap();

        assert_eq!(store.take_story().await.unwrap().as_deref(), Some("second"));
    }
}
