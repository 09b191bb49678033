//! Shared HTTP utilities for the gateway implementation.

/// Extracts the `detail` field from a FastAPI-style error body.
///
/// Validation errors carry a list of objects; their `msg` fields are joined.
pub(super) fn extract_detail(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    let detail = value.get("detail")?;
    if let Some(text) = detail.as_str() {
        return Some(text.to_owned());
    }
    let messages: Vec<&str> = detail
        .as_array()?
        .iter()
        .filter_map(|entry| entry.get("msg").and_then(serde_json::Value::as_str))
        .collect();
    if messages.is_empty() {
        None
    } else {
        Some(messages.join("; "))
    }
}

/// Shortens a response body for inclusion in an error message.
pub(super) fn truncate_for_message(body: &str, max_chars: usize) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_owned();
    }
    let mut shortened: String = trimmed.chars().take(max_chars).collect();
    shortened.push_str("...");
    shortened
}
