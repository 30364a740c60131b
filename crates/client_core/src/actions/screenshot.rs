use shared::domain::TestResultId;

use super::{resolve_service_path, ActionFailure, ActionResult};
use crate::repository::{HasScreenshotRepository, HasServiceUrl};

const SAVE_SCREENSHOTS_FAILED_MESSAGE_KEY: &str = "error.operation_history.save_screenshots_failed";

pub struct ExportScreenshotsAction<'a, R> {
    repositories: &'a R,
}

impl<'a, R> ExportScreenshotsAction<'a, R>
where
    R: HasScreenshotRepository + HasServiceUrl,
{
    pub fn new(repositories: &'a R) -> Self {
        Self { repositories }
    }

    /// Returns the absolute URL of the screenshot archive.
    pub async fn export_screenshots(&self, test_result_id: &TestResultId) -> ActionResult<String> {
        let archive = self
            .repositories
            .screenshot_repository()
            .get_screenshots(test_result_id)
            .await
            .map_err(|_| ActionFailure::new(SAVE_SCREENSHOTS_FAILED_MESSAGE_KEY))?;
        Ok(resolve_service_path(
            self.repositories.service_url(),
            &archive.url,
        ))
    }
}
