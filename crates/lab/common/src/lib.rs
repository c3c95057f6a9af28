#![allow(clippy::must_use_candidate)]

pub mod args;
pub mod tracing;

use serde_json::{
    Value,
    json,
};

/// Wraps a command payload in the `--json` success envelope.
pub fn success_json(payload: Value) -> Value {
    let mut envelope = json!({ "status": "success" });
    if let (Some(envelope), Value::Object(fields)) = (envelope.as_object_mut(), payload) {
        envelope.extend(fields);
    }
    envelope
}

/// The `--json` envelope printed to stderr when a command fails.
pub fn error_json(message: impl Into<String>) -> Value {
    json!({
        "status": "error",
        "error": {
            "message": message.into(),
        }
    })
}
