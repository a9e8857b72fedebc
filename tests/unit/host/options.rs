use super::*;

#[test]
fn camel_case_key() {
    let opts = RenderOptions::from_json(r#"{"keepContent": true}"#).unwrap();
    assert!(opts.keep_content);
}

#[test]
fn missing_key_defaults_to_replace() {
    assert_eq!(RenderOptions::from_json("{}").unwrap(), RenderOptions::default());
}

#[test]
fn unknown_keys_are_rejected() {
    let err = RenderOptions::from_json(r#"{"keep_content": true}"#).unwrap_err();
    assert!(matches!(err, RailyardError::Serde(_)));
    assert!(err.to_string().contains("keep_content"));
}

#[test]
fn serializes_back_to_camel_case() {
    let json = serde_json::to_string(&RenderOptions { keep_content: true }).unwrap();
    assert_eq!(json, r#"{"keepContent":true}"#);
}
