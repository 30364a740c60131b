//! Runs actions against the backend and reconciles their results into the
//! local store.

use shared::{
    domain::{ProjectId, Settings, TestMatrix, TestResultId, TestTarget},
    protocol::{
        AddNewTestTargetPayload, DeleteGroupPayload, MovedBug, MovedNotice, NoteDestination,
        NoteLocation, ProjectData,
    },
};
use tracing::{info, warn};

use crate::{
    actions::{
        ActionFailure, ActionResult, AddNewTestTargetAction, DeleteGroupAction,
        ExportScreenshotsAction, MoveBugAction, MoveNoticeAction, ReadProjectAction,
        SaveSettingAction,
    },
    repository::{
        HasNoteRepository, HasProjectRepository, HasScreenshotRepository, HasServiceUrl,
        HasSettingRepository, HasTestMatrixRepository, HasTestStepRepository,
        HasTestTargetGroupRepository, HasTestTargetRepository,
    },
    store::TestManagementStore,
};

const SAVE_SETTINGS_FAILED_MESSAGE_KEY: &str = "error.common.save_settings_failed";

pub struct TestManagementService<R> {
    repositories: R,
    store: TestManagementStore,
}

impl<R> TestManagementService<R> {
    pub fn new(repositories: R) -> Self {
        Self {
            repositories,
            store: TestManagementStore::new(),
        }
    }

    pub fn store(&self) -> &TestManagementStore {
        &self.store
    }

    pub fn repositories(&self) -> &R {
        &self.repositories
    }

    /// Reads the project and adopts it wholesale as the managed data.
    pub async fn load_project(&mut self, project_id: &ProjectId) -> ActionResult<ProjectData>
    where
        R: HasProjectRepository,
    {
        let project = ReadProjectAction::new(&self.repositories)
            .read_project(project_id)
            .await?;
        self.store.set_project_id(project.id.clone());
        self.store.set_managed_data(
            Some(project.stories.clone()),
            project.test_matrices.clone(),
        );
        info!(
            project_id = %project.id,
            test_matrices = project.test_matrices.len(),
            "test management: project loaded"
        );
        Ok(project)
    }

    pub async fn add_new_test_target(
        &mut self,
        payload: &AddNewTestTargetPayload,
    ) -> ActionResult<TestTarget>
    where
        R: HasTestTargetRepository,
    {
        let test_target = AddNewTestTargetAction::new(&self.repositories)
            .add_new_test_target(payload)
            .await?;
        self.store.add_test_target(
            &payload.test_matrix_id,
            &payload.group_id,
            test_target.clone(),
        );
        Ok(test_target)
    }

    pub async fn delete_group(&mut self, payload: &DeleteGroupPayload) -> ActionResult<TestMatrix>
    where
        R: HasTestTargetGroupRepository + HasTestMatrixRepository,
    {
        let test_matrix = DeleteGroupAction::new(&self.repositories)
            .delete_group(payload)
            .await?;
        self.store.update_test_matrices(vec![test_matrix.clone()]);
        Ok(test_matrix)
    }

    /// Saves settings for the loaded project.
    pub async fn save_settings(&self, settings: &Settings) -> ActionResult<Settings>
    where
        R: HasSettingRepository,
    {
        let Some(project_id) = self.store.project_id() else {
            warn!("settings: no project loaded");
            return Err(ActionFailure::new(SAVE_SETTINGS_FAILED_MESSAGE_KEY));
        };
        SaveSettingAction::new(&self.repositories)
            .save_settings(project_id, settings)
            .await
    }

    pub async fn move_bug(
        &self,
        test_result_id: &TestResultId,
        from: &NoteLocation,
        dest: &NoteDestination,
    ) -> ActionResult<MovedBug>
    where
        R: HasTestStepRepository + HasNoteRepository + HasServiceUrl,
    {
        MoveBugAction::new(&self.repositories)
            .move_bug(test_result_id, from, dest)
            .await
    }

    pub async fn move_notice(
        &self,
        test_result_id: &TestResultId,
        from: &NoteLocation,
        dest: &NoteDestination,
    ) -> ActionResult<MovedNotice>
    where
        R: HasTestStepRepository + HasNoteRepository + HasServiceUrl,
    {
        MoveNoticeAction::new(&self.repositories)
            .move_notice(test_result_id, from, dest)
            .await
    }

    pub async fn export_screenshots(&self, test_result_id: &TestResultId) -> ActionResult<String>
    where
        R: HasScreenshotRepository + HasServiceUrl,
    {
        ExportScreenshotsAction::new(&self.repositories)
            .export_screenshots(test_result_id)
            .await
    }
}

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod tests;
