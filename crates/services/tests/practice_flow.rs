use std::time::Duration;

use async_trait::async_trait;
use mathcat_core::model::Level;
use mathcat_core::ops::OperationKind;
use mathcat_core::time::fixed_clock;
use services::story_service::Narrator;
use services::{
    AnswerOutcome, InMemoryProgress, LoginOutcome, PracticeSession, ProgressError, ProgressStore,
    StoryTeller,
};
use storage::{InMemorySessionStore, SessionStore};
use tokio::time::Instant;

async fn start(
    kind: OperationKind,
    store: &InMemorySessionStore,
    progress: &InMemoryProgress,
) -> PracticeSession {
    PracticeSession::start(
        kind.strategy(),
        Some("dana".to_string()),
        fixed_clock(),
        store,
        progress,
    )
    .await
}

#[tokio::test]
async fn correct_answer_scores_once_and_advances_to_a_fresh_question() {
    let store = InMemorySessionStore::new();
    let progress = InMemoryProgress::new();
    let mut session = start(OperationKind::Multiplication, &store, &progress).await;

    let question = session.question();
    session.set_input(question.answer().to_string());
    session.save_draft(&store).await.expect("save draft");

    let outcome = session.check_answer(&store).await.expect("check answer");
    let AnswerOutcome::Correct { report } = outcome else {
        panic!("expected a correct outcome, got {outcome:?}");
    };
    let report = report.expect("signed-in practice hands back a score report");
    assert_eq!(progress.score_calls(OperationKind::Multiplication), 0);
    assert!(report.send(&progress).await);
    assert_eq!(progress.score_calls(OperationKind::Multiplication), 1);

    session.advance(&store).await.expect("advance");
    assert!(session.input().is_empty());
    assert!(session.message().is_empty());
    assert!(!session.scoring_suppressed());
    assert!(
        store
            .load_draft(OperationKind::Multiplication)
            .await
            .expect("load draft")
            .is_none(),
        "advance must discard the draft"
    );
}

#[tokio::test]
async fn wrong_answer_keeps_the_question_and_hands_back_no_report() {
    let store = InMemorySessionStore::new();
    let progress = InMemoryProgress::new();
    let mut session = start(OperationKind::Addition, &store, &progress).await;

    let question = session.question();
    let wrong = question.answer() + 1;
    session.set_input(wrong.to_string());

    let outcome = session.check_answer(&store).await.expect("check answer");
    assert_eq!(outcome, AnswerOutcome::Incorrect);
    assert_eq!(session.question(), question);
    assert_eq!(session.input(), wrong.to_string());
    assert_eq!(progress.score_calls(OperationKind::Addition), 0);
}

#[tokio::test]
async fn empty_input_is_rejected_without_a_transition() {
    let store = InMemorySessionStore::new();
    let progress = InMemoryProgress::new();
    let mut session = start(OperationKind::Subtraction, &store, &progress).await;

    let question = session.question();
    session.set_input("   ");

    let outcome = session.check_answer(&store).await.expect("check answer");
    assert_eq!(outcome, AnswerOutcome::Rejected);
    assert_eq!(session.message(), services::practice_service::MSG_TYPE_A_NUMBER);
    assert_eq!(session.question(), question);
    assert_eq!(progress.score_calls(OperationKind::Subtraction), 0);
}

#[tokio::test]
async fn story_detour_suppresses_scoring_across_a_restart() {
    let store = InMemorySessionStore::new();
    let progress = InMemoryProgress::new();
    let mut session = start(OperationKind::Division, &store, &progress).await;

    let request = session.request_story(&store).await.expect("request story");
    assert_eq!(request.operands, session.question().operands());

    // The story flow deposits its text for a later pickup.
    let story = StoryTeller.tell(&request);
    store.put_story(&story).await.expect("put story");

    // A restart in the middle of the detour keeps the suppression.
    let mut reloaded = start(OperationKind::Division, &store, &progress).await;
    assert!(reloaded.scoring_suppressed());
    assert_eq!(reloaded.question(), session.question());

    let picked_up = reloaded.absorb_story(&store).await.expect("absorb story");
    assert_eq!(picked_up.as_deref(), Some(story.as_str()));
    assert_eq!(
        reloaded.absorb_story(&store).await.expect("absorb again"),
        None,
        "the story slot is one-shot"
    );

    let answer = reloaded.question().answer();
    reloaded.set_input(answer.to_string());
    let outcome = reloaded.check_answer(&store).await.expect("check answer");
    assert_eq!(outcome, AnswerOutcome::Correct { report: None });
    assert_eq!(progress.score_calls(OperationKind::Division), 0);

    // The next question scores normally again.
    reloaded.advance(&store).await.expect("advance");
    assert!(!reloaded.scoring_suppressed());
}

#[tokio::test]
async fn draft_restore_beats_a_changed_proficiency_counter() {
    let store = InMemorySessionStore::new();
    let progress = InMemoryProgress::new();
    progress.set_proficiency("dana", OperationKind::Percent, 0.0);

    let mut session = start(OperationKind::Percent, &store, &progress).await;
    assert_eq!(session.level(), Level::Beginner);
    session.set_input("25");
    session.save_draft(&store).await.expect("save draft");

    // The counter moving up must not re-level an in-flight question.
    progress.set_proficiency("dana", OperationKind::Percent, 7.0);
    let restored = start(OperationKind::Percent, &store, &progress).await;
    assert_eq!(restored.level(), Level::Beginner);
    assert_eq!(restored.question(), session.question());
    assert_eq!(restored.input(), "25");
}

#[tokio::test]
async fn latest_input_wins_when_edits_outpace_saves() {
    let store = InMemorySessionStore::new();
    let progress = InMemoryProgress::new();
    let mut session = start(OperationKind::Addition, &store, &progress).await;

    // A fast burst of keystrokes mutates in place; one save catches up.
    session.set_input("1");
    session.set_input("12");
    session.set_input("123");
    session.save_draft(&store).await.expect("save draft");

    let restored = start(OperationKind::Addition, &store, &progress).await;
    assert_eq!(restored.input(), "123");
}

#[tokio::test]
async fn malformed_draft_falls_back_to_a_fresh_session() {
    let store = InMemorySessionStore::new();
    let progress = InMemoryProgress::new();
    progress.set_proficiency("dana", OperationKind::Multiplication, 2.0);
    store
        .insert_raw(
            &OperationKind::Multiplication.draft_key(),
            "{not json at all",
        )
        .expect("seed raw entry");

    let session = start(OperationKind::Multiplication, &store, &progress).await;
    assert_eq!(session.level(), Level::Advanced);
    assert!(session.input().is_empty());
}

#[tokio::test]
async fn drafts_are_independent_per_operation() {
    let store = InMemorySessionStore::new();
    let progress = InMemoryProgress::new();

    let mut addition = start(OperationKind::Addition, &store, &progress).await;
    addition.set_input("7");
    addition.save_draft(&store).await.expect("save draft");

    let division = start(OperationKind::Division, &store, &progress).await;
    assert!(division.input().is_empty());

    let addition_again = start(OperationKind::Addition, &store, &progress).await;
    assert_eq!(addition_again.input(), "7");
}

/// A scoreboard whose acknowledgements take longer than the whole answer
/// flow is allowed to.
struct SleepyScoreboard {
    inner: InMemoryProgress,
}

#[async_trait]
impl ProgressStore for SleepyScoreboard {
    async fn fetch_proficiency(&self, username: &str, kind: OperationKind) -> Option<f64> {
        self.inner.fetch_proficiency(username, kind).await
    }

    async fn report_score(&self, username: &str, kind: OperationKind) -> bool {
        tokio::time::sleep(Duration::from_millis(1500)).await;
        self.inner.report_score(username, kind).await
    }

    async fn check_login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginOutcome, ProgressError> {
        self.inner.check_login(username, password).await
    }

    async fn register(&self, username: &str, password: &str, age: u8) -> Result<(), ProgressError> {
        self.inner.register(username, password, age).await
    }
}

#[tokio::test(start_paused = true)]
async fn slow_scoreboard_never_delays_the_answer_flow() {
    let store = InMemorySessionStore::new();
    let progress = SleepyScoreboard {
        inner: InMemoryProgress::new(),
    };
    let mut session = PracticeSession::start(
        OperationKind::Multiplication.strategy(),
        Some("dana".to_string()),
        fixed_clock(),
        &store,
        &progress,
    )
    .await;

    let answer = session.question().answer();
    session.set_input(answer.to_string());

    let before = Instant::now();
    let outcome = session.check_answer(&store).await.expect("check answer");
    assert!(
        before.elapsed() < Duration::from_millis(100),
        "checking waited {:?} on the scoreboard",
        before.elapsed()
    );

    let AnswerOutcome::Correct { report: Some(report) } = outcome else {
        panic!("expected a scoring outcome, got {outcome:?}");
    };
    assert_eq!(progress.inner.score_calls(OperationKind::Multiplication), 0);
    assert!(report.send(&progress).await);
    assert_eq!(progress.inner.score_calls(OperationKind::Multiplication), 1);
}
