use serde_json::Value;
use std::time::Duration;

use crate::error::Error;

pub fn client(timeout: Duration) -> Result<reqwest::Client, Error> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;

    Ok(client)
}

/// Pulls a human readable message out of a provider's error body.
///
/// Tries `error.message`, `error` and `message` in that order and falls back
/// to the raw body. Nested objects are flattened to their JSON text.
pub fn upstream_message(body: &str) -> String {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => return body.trim().to_string(),
    };

    let candidates = [
        value.pointer("/error/message"),
        value.get("error"),
        value.get("message"),
    ];

    // Bound so the borrowing iterator is dropped before `value`.
    let message = candidates
        .into_iter()
        .flatten()
        .find(|v| !v.is_null())
        .map(flatten)
        .unwrap_or_else(|| body.trim().to_string());

    message
}

fn flatten(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Providers disagree on whether coordinates are numbers or strings.
pub fn number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[test]
fn message_prefers_nested_error_message() {
    let body = r#"{"error":{"code":2010,"message":"Could not find routable point"}}"#;
    assert_eq!(upstream_message(body), "Could not find routable point");
}

#[test]
fn message_falls_back_through_known_fields() {
    assert_eq!(upstream_message(r#"{"error":"Access denied"}"#), "Access denied");
    assert_eq!(upstream_message(r#"{"message":"Not Authorized"}"#), "Not Authorized");
    assert_eq!(upstream_message("Bad Gateway\n"), "Bad Gateway");
}

#[test]
fn nested_error_objects_are_stringified() {
    let message = upstream_message(r#"{"error":{"code":403}}"#);
    assert_eq!(message, r#"{"code":403}"#);
}

#[test]
fn numbers_accept_strings() {
    use serde_json::json;

    assert_eq!(number(Some(&json!(-23.5))), Some(-23.5));
    assert_eq!(number(Some(&json!("-46.63"))), Some(-46.63));
    assert_eq!(number(Some(&json!(""))), None);
    assert_eq!(number(Some(&json!(null))), None);
    assert_eq!(number(None), None);
}
