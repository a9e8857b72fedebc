use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        RailyardError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        RailyardError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        RailyardError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert_eq!(RailyardError::Cancelled.to_string(), "render cancelled");
}

#[test]
fn syntax_errors_convert_and_keep_position() {
    let err: RailyardError = SyntaxError::new(3, "unterminated group").into();
    match &err {
        RailyardError::Syntax(inner) => assert_eq!(inner.position, 3),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("syntax error:"));
}

#[test]
fn only_the_marker_reports_cancelled() {
    assert!(RailyardError::Cancelled.is_cancelled());
    assert!(!RailyardError::render("boom").is_cancelled());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = RailyardError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
