use std::time::Duration;

use dioxus::prelude::*;
use mathcat_core::ops::OperationKind;
use services::story_service::StoryRequest;
use services::ADVANCE_DELAY;
use storage::SessionStore;

use super::practice::CatFx;
use super::test_harness::{ViewKind, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn login_view_smoke_renders_the_form() {
    let mut harness = setup_view_harness(ViewKind::Login, None);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Sign in"), "missing submit label in {html}");
    assert!(html.contains("Make an account"), "missing register link in {html}");
    assert!(html.contains("practice without one"), "missing anonymous hint in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_greets_and_lists_operations() {
    let mut harness = setup_view_harness(ViewKind::Home, Some("dana"));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Hi dana!"), "missing greeting in {html}");
    assert!(html.contains("Multiplication"), "missing operation card in {html}");
    assert!(html.contains("Percentages"), "missing operation card in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn register_view_smoke_renders_age_bounds() {
    let mut harness = setup_view_harness(ViewKind::Register, None);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Age (6 to 12)"), "missing age field in {html}");
    assert!(html.contains("Create account"), "missing submit label in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_deals_a_question() {
    let mut harness = setup_view_harness(ViewKind::Practice(OperationKind::Addition), None);
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Beginners 😺"), "missing level badge in {html}");
    assert!(html.contains("= ?"), "missing prompt in {html}");
    assert!(html.contains("Check"), "missing check button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_shows_error_for_unknown_operation() {
    let mut harness = setup_view_harness(ViewKind::PracticeUnknown, None);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Something went wrong"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn story_view_smoke_tells_and_deposits_the_story() {
    let mut harness = setup_view_harness(ViewKind::Story, None);
    harness.context.set_pending_story(StoryRequest {
        kind: OperationKind::Multiplication,
        operands: (3, 2),
        symbol: "×",
    });
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Back to practice"), "missing return link in {html}");

    let deposited = harness.store.take_story().await.expect("read story slot");
    let deposited = deposited.expect("story deposited for later pickup");
    assert!(!deposited.is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn story_view_smoke_without_a_pending_request() {
    let mut harness = setup_view_harness(ViewKind::Story, None);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("Solve an exercise first"),
        "missing empty-state hint in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn manual_advance_cancels_the_pending_auto_advance_timer() {
    let mut harness = setup_view_harness(ViewKind::Practice(OperationKind::Addition), None);
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let handles = harness.practice_handles.clone();
    let session = handles.session();
    let answer = {
        let guard = session.read();
        guard.as_ref().expect("session started").question().answer()
    };

    handles.input().call(answer.to_string());
    harness.drive_async().await;
    handles.check().call(());
    harness.drive_async().await;
    assert!(
        harness.render().contains("Correct"),
        "the correct answer shows its message"
    );

    // Supersede the pending auto-advance right away, then type into the
    // freshly dealt question.
    handles.advance().call(());
    harness.drive_async().await;
    handles.input().call("7".to_string());
    harness.drive_async().await;

    tokio::time::sleep(ADVANCE_DELAY + Duration::from_millis(200)).await;
    harness.drive_async().await;
    harness.drive_async().await;

    let session = handles.session();
    let guard = session.read();
    let active = guard.as_ref().expect("session present");
    assert_eq!(
        active.input(),
        "7",
        "a superseded auto-advance must not reset the next question"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn story_detour_calms_the_celebrating_cat() {
    let mut harness = setup_view_harness(ViewKind::Practice(OperationKind::Multiplication), None);
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let handles = harness.practice_handles.clone();
    let session = handles.session();
    let answer = {
        let guard = session.read();
        guard.as_ref().expect("session started").question().answer()
    };

    handles.input().call(answer.to_string());
    harness.drive_async().await;
    handles.check().call(());
    harness.drive_async().await;
    let fx = handles.fx();
    assert_eq!(*fx.read(), CatFx::Celebrate, "a correct answer celebrates");

    // The detour cancels the celebration before navigating away.
    handles.story().call(());
    assert_eq!(*fx.read(), CatFx::Idle, "the detour ends the celebration");
}
