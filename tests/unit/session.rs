use super::*;
use crate::render::progress::{NoProgress, ProgressLog};

#[tokio::test]
async fn parse_moves_created_to_parsed() {
    let mut session = Session::new("a|b");
    assert_eq!(session.state(), SessionState::Created);
    session.parse().await.unwrap();
    assert_eq!(session.state(), SessionState::Parsed);
    assert_eq!(session.tree().unwrap().regexp.alternatives.len(), 2);
}

#[tokio::test]
async fn syntax_error_fails_parse_and_leaves_state_untouched() {
    let err = parse("(a").await.unwrap_err();
    assert!(matches!(err, RailyardError::Syntax(_)));

    let mut session = Session::new("(a");
    assert!(session.parse().await.is_err());
    assert_eq!(session.state(), SessionState::ParseFailed);
    assert!(session.tree().is_none());
    let state = session.render_state();
    assert_eq!(state.group_counter(), 1);
    assert_eq!(state.render_counter(), 0);
    assert_eq!(state.max_counter(), 0);
    assert!(state.warnings().is_empty());

    let err = session.render(&mut NoProgress).await.unwrap_err();
    assert!(matches!(err, RailyardError::Validation(_)));
    assert_eq!(session.state(), SessionState::ParseFailed);
}

#[tokio::test]
async fn newlines_are_parsed_as_escapes() {
    let session = parse("a\nb").await.unwrap();
    assert_eq!(session.source(), "a\nb");
    assert_eq!(session.tree().unwrap().regexp.alternatives[0].fragments.len(), 3);
}

#[tokio::test]
async fn cancel_before_parse_tick_skips_the_grammar() {
    let mut session = Session::new("(a");
    session.cancel();
    session.parse().await.unwrap();
    assert_eq!(session.state(), SessionState::Cancelled);
    assert!(session.tree().is_none());
}

#[tokio::test]
async fn cancel_before_render_yields_cancelled_outcome() {
    let mut session = parse("abc").await.unwrap();
    session.cancel();
    session.cancel();
    let outcome = session.render(&mut NoProgress).await.unwrap();
    assert!(outcome.is_cancelled());
    assert_eq!(session.state(), SessionState::Cancelled);
    assert_eq!(session.render_state().render_counter(), 0);

    let again = session.render(&mut NoProgress).await.unwrap();
    assert!(again.is_cancelled());
}

#[tokio::test]
async fn render_completes_and_cannot_repeat() {
    let mut session = parse("x(y)").await.unwrap();
    let mut log = ProgressLog::new();
    let outcome = session.render(&mut log).await.unwrap();
    let doc = outcome.rendered().unwrap();
    assert!(doc.width() > 20.0);
    assert_eq!(session.state(), SessionState::Rendered);
    assert!(session.state().is_terminal());
    assert_eq!(log.last(), Some(1.0));

    let err = session.render(&mut NoProgress).await.unwrap_err();
    assert!(matches!(err, RailyardError::Validation(_)));
}

#[tokio::test]
async fn cancel_after_completion_has_no_effect() {
    let mut session = parse("()").await.unwrap();
    session.render(&mut NoProgress).await.unwrap();
    let before = session.warnings().to_vec();
    session.cancel();
    assert_eq!(session.state(), SessionState::Rendered);
    assert_eq!(session.warnings(), before.as_slice());
    assert_eq!(session.warnings(), session.warnings());
}

#[test]
fn blocking_helpers() {
    let mut session = parse_blocking("a+").unwrap();
    let outcome = session.render_blocking(&mut NoProgress).unwrap();
    assert!(outcome.rendered().is_some());
}

#[test]
fn parse_twice_is_rejected() {
    let mut session = parse_blocking("a").unwrap();
    let err = pollster::block_on(session.parse()).unwrap_err();
    assert!(matches!(err, RailyardError::Validation(_)));
}
