//! JSON builders for feedback records served by the stub backend.

use serde_json::{Value, json};

/// Builds a feedback record as the backend serialises it.
pub fn feedback_json(id: u64, name: &str, rating: u8, sentiment: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": null,
        "rating": rating,
        "message": format!("Catatan dari {name}"),
        "sentiment": sentiment,
        "created_at": "2025-03-01T08:30:00"
    })
}
