use super::*;

#[test]
fn fresh_state_matches_session_defaults() {
    let s = RenderState::default();
    assert_eq!(s.group_counter(), 1);
    assert_eq!(s.render_counter(), 0);
    assert_eq!(s.max_counter(), 0);
    assert!(!s.cancel_requested());
    assert!(s.warnings().is_empty());
    assert_eq!(s.progress(), 0.0);
}

#[test]
fn group_numbers_are_unique_and_increasing() {
    let mut s = RenderState::default();
    assert_eq!(s.next_group(), 1);
    assert_eq!(s.next_group(), 2);
    assert_eq!(s.group_counter(), 3);
}

#[test]
fn advance_reports_fraction_and_refuses_overflow() {
    let mut s = RenderState::default();
    s.begin(4);
    assert_eq!(s.advance(1).unwrap(), 0.25);
    assert_eq!(s.advance(0).unwrap(), 0.25);
    assert_eq!(s.advance(3).unwrap(), 1.0);
    assert!(s.advance(1).is_err());
    assert_eq!(s.render_counter(), 4);
}

#[test]
fn token_clones_share_one_flag() {
    let token = CancellationToken::new();
    let s = RenderState::new(token.clone());
    assert!(!s.cancel_requested());
    token.cancel();
    token.cancel();
    assert!(s.cancel_requested());
    assert!(s.cancel_token().is_cancelled());
}

#[test]
fn warnings_append_in_order() {
    let mut s = RenderState::default();
    s.warn("first".to_owned());
    s.warn("second".to_owned());
    assert_eq!(s.warnings(), ["first".to_owned(), "second".to_owned()]);
}
