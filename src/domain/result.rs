use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Uniform outcome of a submission attempt: success, failure, and dry-run
/// all share this shape. A failed result never carries a `resp` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub ok: bool,
    pub message: String,
    #[serde(default)]
    pub meta: Map<String, Value>,
}

impl SubmissionResult {
    pub fn success(message: impl Into<String>, meta: Map<String, Value>) -> Self {
        Self {
            ok: true,
            message: message.into(),
            meta,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            meta: Map::new(),
        }
    }
}
