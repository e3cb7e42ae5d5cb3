use std::fmt;
use std::time::Duration;

use mathcat_core::model::{Level, LevelGuide, Question, SessionDraft};
use mathcat_core::ops::{Operation, OperationKind};
use mathcat_core::time::Clock;
use storage::session_store::SessionStore;

use crate::error::PracticeError;
use crate::progress_client::ProgressStore;
use crate::story_service::StoryRequest;

/// How long a correct answer stays on screen before auto-advancing.
pub const ADVANCE_DELAY: Duration = Duration::from_millis(1000);

pub const MSG_TYPE_A_NUMBER: &str = "Type a number";
pub const MSG_CORRECT: &str = "✅ Correct!";
pub const MSG_CORRECT_NO_POINTS: &str = "✅ Correct! (no points for a story question)";
pub const MSG_INCORRECT: &str = "❌ Not quite, try again";

/// Result of checking the learner's input against the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Input was empty or not a finite number. Nothing changed; the
    /// question stays and the learner can fix the input.
    Rejected,
    /// Right answer. When the question scores, `report` carries the single
    /// pending increment for the caller to dispatch; suppressed questions
    /// and anonymous practice carry `None`.
    Correct { report: Option<ScoreReport> },
    /// Wrong answer. Question and input remain so the learner can retry.
    Incorrect,
}

/// A pending score increment for a correctly answered question.
///
/// Handed back instead of sent inline so a slow or unreachable server
/// never delays the answer flow; the caller dispatches [`ScoreReport::send`]
/// from a detached task. Single attempt, failures never surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreReport {
    username: String,
    kind: OperationKind,
}

impl ScoreReport {
    /// Deliver the increment. Returns whether the backend acknowledged it.
    pub async fn send(self, progress: &dyn ProgressStore) -> bool {
        progress.report_score(&self.username, self.kind).await
    }
}

/// One learner's practice session for a single operation.
///
/// Drives the `Active → (Correct | Incorrect) → Active'` state machine with
/// the optional story detour, persisting a [`SessionDraft`] across every
/// mutation so navigation away and back restores the exact state. The UI
/// layer owns the auto-advance timer; this type owns everything else.
#[derive(Clone)]
pub struct PracticeSession {
    operation: &'static dyn Operation,
    username: Option<String>,
    clock: Clock,
    level: Level,
    question: Question,
    input: String,
    message: String,
    scoring_suppressed: bool,
}

impl PracticeSession {
    /// Restore an in-flight session or start a fresh one.
    ///
    /// A saved draft always wins over a freshly fetched proficiency
    /// counter; a malformed or unreadable draft counts as absent. Without a
    /// draft the level is derived from the learner's counter, and fetch
    /// failures or anonymous practice silently default to the easiest
    /// level.
    pub async fn start(
        operation: &'static dyn Operation,
        username: Option<String>,
        clock: Clock,
        store: &dyn SessionStore,
        progress: &dyn ProgressStore,
    ) -> Self {
        let kind = operation.kind();
        if let Some(draft) = store.load_draft(kind).await.ok().flatten() {
            return Self {
                operation,
                username,
                clock,
                level: draft.level,
                question: draft.question,
                input: draft.input,
                message: draft.message,
                scoring_suppressed: draft.scoring_suppressed,
            };
        }

        let level = match username.as_deref() {
            Some(name) => Level::from_proficiency(progress.fetch_proficiency(name, kind).await),
            None => Level::default(),
        };
        Self {
            operation,
            username,
            clock,
            level,
            question: fresh_question(operation, level),
            input: String::new(),
            message: String::new(),
            scoring_suppressed: false,
        }
    }

    #[must_use]
    pub fn kind(&self) -> OperationKind {
        self.operation.kind()
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn question(&self) -> Question {
        self.question
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn scoring_suppressed(&self) -> bool {
        self.scoring_suppressed
    }

    #[must_use]
    pub fn prompt(&self) -> String {
        self.operation.prompt(&self.question)
    }

    #[must_use]
    pub fn guide(&self) -> LevelGuide {
        self.operation.guide(self.level)
    }

    /// Record a keystroke. Synchronous so edits can never queue up behind
    /// storage writes; the caller persists with [`PracticeSession::save_draft`].
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Validate and evaluate the current input.
    ///
    /// A correct, non-suppressed answer yields a [`ScoreReport`] inside the
    /// outcome; the caller dispatches it detached so the learner never
    /// waits on the server. The caller is also responsible for scheduling
    /// the [`ADVANCE_DELAY`] auto-advance after a `Correct` outcome.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::Storage` if the draft cannot be written.
    pub async fn check_answer(
        &mut self,
        store: &dyn SessionStore,
    ) -> Result<AnswerOutcome, PracticeError> {
        let raw = self.input.trim();
        let parsed = raw.parse::<f64>().ok().filter(|v| v.is_finite());
        let Some(value) = parsed else {
            self.message = MSG_TYPE_A_NUMBER.to_string();
            self.save_draft(store).await?;
            return Ok(AnswerOutcome::Rejected);
        };

        // Generators guarantee integer answers, so exact equality is the
        // contract; no tolerance is wanted.
        #[allow(clippy::cast_precision_loss, clippy::float_cmp)]
        let correct = value == self.question.answer() as f64;

        if correct {
            self.message = if self.scoring_suppressed {
                MSG_CORRECT_NO_POINTS
            } else {
                MSG_CORRECT
            }
            .to_string();
            self.save_draft(store).await?;

            let report = match (self.scoring_suppressed, self.username.as_deref()) {
                (false, Some(name)) => Some(ScoreReport {
                    username: name.to_string(),
                    kind: self.kind(),
                }),
                _ => None,
            };
            return Ok(AnswerOutcome::Correct { report });
        }

        self.message = MSG_INCORRECT.to_string();
        self.save_draft(store).await?;
        Ok(AnswerOutcome::Incorrect)
    }

    /// Discard the draft and any pending story, then deal a fresh question
    /// at the current level.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::Storage` if the store cannot be updated.
    pub async fn advance(&mut self, store: &dyn SessionStore) -> Result<(), PracticeError> {
        store.clear_draft(self.kind()).await?;
        store.clear_story().await?;
        self.input.clear();
        self.message.clear();
        self.scoring_suppressed = false;
        self.question = fresh_question(self.operation, self.level);
        Ok(())
    }

    /// Flag the current question as non-scoring and build the handoff for
    /// the narrative collaborator.
    ///
    /// The suppression is persisted immediately so a reload before
    /// returning from the story keeps it.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::Storage` if the draft cannot be written.
    pub async fn request_story(
        &mut self,
        store: &dyn SessionStore,
    ) -> Result<StoryRequest, PracticeError> {
        self.scoring_suppressed = true;
        self.save_draft(store).await?;
        Ok(StoryRequest {
            kind: self.kind(),
            operands: self.question.operands(),
            symbol: self.operation.symbol(),
        })
    }

    /// Consume narrative text deposited by the story flow, if any.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::Storage` if the store cannot be read.
    pub async fn absorb_story(
        &self,
        store: &dyn SessionStore,
    ) -> Result<Option<String>, PracticeError> {
        Ok(store.take_story().await?)
    }

    /// Persist the current state as the session draft.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::Storage` if the draft cannot be written.
    pub async fn save_draft(&self, store: &dyn SessionStore) -> Result<(), PracticeError> {
        let draft = SessionDraft {
            level: self.level,
            question: self.question,
            input: self.input.clone(),
            message: self.message.clone(),
            scoring_suppressed: self.scoring_suppressed,
            saved_at: self.clock.now(),
        };
        store.save_draft(self.kind(), &draft).await?;
        Ok(())
    }
}

impl fmt::Debug for PracticeSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PracticeSession")
            .field("kind", &self.kind())
            .field("level", &self.level)
            .field("question", &self.question)
            .field("input", &self.input)
            .field("scoring_suppressed", &self.scoring_suppressed)
            .finish_non_exhaustive()
    }
}

fn fresh_question(operation: &'static dyn Operation, level: Level) -> Question {
    let mut rng = rand::rng();
    operation.generate(level, &mut rng)
}
