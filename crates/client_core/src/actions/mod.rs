//! Externally callable operations. Each resolves to the resulting domain
//! value or to a message key naming the user-facing error.

use thiserror::Error;
use tracing::debug;

use crate::error::RepositoryError;

mod group;
mod note;
mod project;
mod screenshot;
mod setting;
mod test_target;

pub use group::DeleteGroupAction;
pub use note::{MoveBugAction, MoveNoticeAction, MOVE_NOTE_FAILED_MESSAGE_KEY};
pub use project::ReadProjectAction;
pub use screenshot::ExportScreenshotsAction;
pub use setting::SaveSettingAction;
pub use test_target::AddNewTestTargetAction;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("action failed: {message_key}")]
pub struct ActionFailure {
    pub message_key: String,
}

impl ActionFailure {
    pub fn new(message_key: impl Into<String>) -> Self {
        Self {
            message_key: message_key.into(),
        }
    }

    /// Prefers the key the failure itself carries over `fallback`.
    fn from_repository(err: &RepositoryError, fallback: &str) -> Self {
        debug!(
            status = ?err.status(),
            code = err.api_error().map(|error| error.code.as_str()),
            "actions: repository failure"
        );
        Self::new(err.message_key().unwrap_or(fallback))
    }
}

pub type ActionResult<T> = Result<T, ActionFailure>;

/// Resolves a service-relative path (as the backend returns for files)
/// against the service URL. Absolute URLs pass through.
pub fn resolve_service_path(service_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        service_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
#[path = "../tests/action_tests.rs"]
mod tests;
