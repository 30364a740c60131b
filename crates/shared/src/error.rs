use serde::{Deserialize, Serialize};

/// Error body a backend attaches to a non-success response.
///
/// `message` is a message key the UI can resolve; `code` is the backend's
/// own error identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiError {
    pub fn code_only(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: None,
        }
    }
}
