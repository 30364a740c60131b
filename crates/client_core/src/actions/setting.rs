use shared::domain::{ProjectId, Settings};
use tracing::warn;

use super::{ActionFailure, ActionResult};
use crate::repository::HasSettingRepository;

const SAVE_SETTING_FAILED_MESSAGE_KEY: &str = "error.common.save_settings_failed";

pub struct SaveSettingAction<'a, R> {
    repositories: &'a R,
}

impl<'a, R: HasSettingRepository> SaveSettingAction<'a, R> {
    pub fn new(repositories: &'a R) -> Self {
        Self { repositories }
    }

    pub async fn save_settings(
        &self,
        project_id: &ProjectId,
        settings: &Settings,
    ) -> ActionResult<Settings> {
        self.repositories
            .setting_repository()
            .put_settings(project_id, settings)
            .await
            .map_err(|err| {
                warn!(project_id = %project_id, error = %err, "settings: save failed");
                ActionFailure::new(SAVE_SETTING_FAILED_MESSAGE_KEY)
            })
    }
}
