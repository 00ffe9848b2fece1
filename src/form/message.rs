use serde_json::Value;

/// Pulls a human-readable `message` out of an error response body.
///
/// Returns `None` unless the body is a JSON object with a non-empty string
/// `message` field.
pub fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}
