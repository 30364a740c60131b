//! In-memory backend implementing every repository, with per-call failure
//! injection.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use shared::{
    domain::{
        Group, GroupId, Note, NoteId, ProjectId, Settings, TestMatrix, TestMatrixId, TestResultId,
        TestStep, TestStepId, TestTarget, TestTargetId,
    },
    protocol::{NewTestTarget, ProjectData, ScreenshotsArchive, TestStepPatch},
};
use tokio::sync::Mutex;

use crate::{
    error::{RepositoryError, RepositoryResult},
    repository::{
        HasNoteRepository, HasProjectRepository, HasScreenshotRepository, HasServiceUrl,
        HasSettingRepository, HasTestMatrixRepository, HasTestStepRepository,
        HasTestTargetGroupRepository, HasTestTargetRepository, NoteRepository, ProjectRepository,
        ScreenshotRepository, SettingRepository, TestMatrixRepository, TestStepRepository,
        TestTargetGroupRepository, TestTargetRepository,
    },
};

pub const SERVICE_URL: &str = "http://backend.test";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FailPoint {
    GetTestStep(TestStepId),
    PatchTestStep(TestStepId),
    GetNote(NoteId),
    PutSettings,
    PostTestTarget,
    DeleteTestTargetGroup(GroupId),
    GetTestMatrix(TestMatrixId),
    GetProject,
    GetScreenshots,
}

#[derive(Default)]
struct BackendState {
    test_steps: HashMap<TestStepId, TestStep>,
    notes: HashMap<NoteId, Note>,
    test_matrices: Vec<TestMatrix>,
    settings: Option<Settings>,
    failures: HashMap<FailPoint, RepositoryError>,
    calls: Vec<String>,
    next_id: u32,
}

#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<BackendState>,
}

pub fn not_found() -> RepositoryError {
    RepositoryError::AccessFailure {
        status: 404,
        error: None,
    }
}

pub fn step(id: &str, bugs: &[&str], notices: &[&str]) -> TestStep {
    TestStep {
        id: TestStepId::from(id),
        operation: serde_json::Value::Null,
        intention: None,
        bugs: bugs.iter().map(|b| NoteId::from(*b)).collect(),
        notices: notices.iter().map(|n| NoteId::from(*n)).collect(),
    }
}

pub fn note(id: &str, image_file_url: Option<&str>) -> Note {
    Note {
        id: NoteId::from(id),
        value: format!("note {id}"),
        details: String::new(),
        image_file_url: image_file_url.map(str::to_string),
        tags: Vec::new(),
        timestamp: Utc
            .timestamp_millis_opt(1_700_000_000_000)
            .single()
            .expect("timestamp"),
    }
}

pub fn target(id: &str, index: i64) -> TestTarget {
    TestTarget {
        id: TestTargetId::from(id),
        name: format!("target {id}"),
        index,
        plans: Vec::new(),
    }
}

pub fn group(id: &str, index: i64, test_targets: Vec<TestTarget>) -> Group {
    Group {
        id: GroupId::from(id),
        name: format!("group {id}"),
        index,
        test_targets,
    }
}

pub fn matrix(id: &str, index: i64, groups: Vec<Group>) -> TestMatrix {
    TestMatrix {
        id: TestMatrixId::from(id),
        name: format!("matrix {id}"),
        index,
        groups,
        view_points: Vec::new(),
    }
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_step(&self, test_step: TestStep) {
        self.state
            .lock()
            .await
            .test_steps
            .insert(test_step.id.clone(), test_step);
    }

    pub async fn insert_note(&self, note: Note) {
        self.state.lock().await.notes.insert(note.id.clone(), note);
    }

    pub async fn insert_matrix(&self, test_matrix: TestMatrix) {
        self.state.lock().await.test_matrices.push(test_matrix);
    }

    pub async fn fail(&self, point: FailPoint, error: RepositoryError) {
        self.state.lock().await.failures.insert(point, error);
    }

    pub async fn step(&self, id: &str) -> TestStep {
        self.state
            .lock()
            .await
            .test_steps
            .get(&TestStepId::from(id))
            .cloned()
            .expect("test step")
    }

    pub async fn calls(&self) -> Vec<String> {
        self.state.lock().await.calls.clone()
    }

    pub async fn settings(&self) -> Option<Settings> {
        self.state.lock().await.settings.clone()
    }

    async fn enter(&self, call: String, point: FailPoint) -> RepositoryResult<tokio::sync::MutexGuard<'_, BackendState>> {
        let mut guard = self.state.lock().await;
        guard.calls.push(call);
        if let Some(err) = guard.failures.get(&point) {
            return Err(err.clone());
        }
        Ok(guard)
    }
}

#[async_trait]
impl TestStepRepository for FakeBackend {
    async fn get_test_step(
        &self,
        _test_result_id: &TestResultId,
        test_step_id: &TestStepId,
    ) -> RepositoryResult<TestStep> {
        let guard = self
            .enter(
                format!("get_test_step {test_step_id}"),
                FailPoint::GetTestStep(test_step_id.clone()),
            )
            .await?;
        guard.test_steps.get(test_step_id).cloned().ok_or_else(not_found)
    }

    async fn patch_test_step(
        &self,
        _test_result_id: &TestResultId,
        test_step_id: &TestStepId,
        patch: &TestStepPatch,
    ) -> RepositoryResult<TestStep> {
        let mut guard = self
            .enter(
                format!("patch_test_step {test_step_id}"),
                FailPoint::PatchTestStep(test_step_id.clone()),
            )
            .await?;
        let test_step = guard.test_steps.get_mut(test_step_id).ok_or_else(not_found)?;
        match patch {
            TestStepPatch::Intention(intention) => test_step.intention = intention.clone(),
            TestStepPatch::Bugs(bugs) => test_step.bugs = bugs.clone(),
            TestStepPatch::Notices(notices) => test_step.notices = notices.clone(),
        }
        Ok(test_step.clone())
    }
}

#[async_trait]
impl NoteRepository for FakeBackend {
    async fn get_note(
        &self,
        _test_result_id: &TestResultId,
        note_id: &NoteId,
    ) -> RepositoryResult<Note> {
        let guard = self
            .enter(format!("get_note {note_id}"), FailPoint::GetNote(note_id.clone()))
            .await?;
        guard.notes.get(note_id).cloned().ok_or_else(not_found)
    }
}

#[async_trait]
impl SettingRepository for FakeBackend {
    async fn put_settings(
        &self,
        _project_id: &ProjectId,
        settings: &Settings,
    ) -> RepositoryResult<Settings> {
        let mut guard = self
            .enter("put_settings".to_string(), FailPoint::PutSettings)
            .await?;
        guard.settings = Some(settings.clone());
        Ok(settings.clone())
    }
}

#[async_trait]
impl TestTargetRepository for FakeBackend {
    async fn post_test_target(&self, test_target: &NewTestTarget) -> RepositoryResult<TestTarget> {
        let mut guard = self
            .enter("post_test_target".to_string(), FailPoint::PostTestTarget)
            .await?;
        guard.next_id += 1;
        let id = TestTargetId::new(format!("new-target-{}", guard.next_id));
        let group = guard
            .test_matrices
            .iter_mut()
            .flat_map(|test_matrix| test_matrix.groups.iter_mut())
            .find(|group| group.id == test_target.test_target_group_id)
            .ok_or_else(not_found)?;
        let created = TestTarget {
            id,
            name: test_target.name.clone(),
            index: group.test_targets.len() as i64,
            plans: Vec::new(),
        };
        group.test_targets.push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl TestTargetGroupRepository for FakeBackend {
    async fn delete_test_target_group(&self, group_id: &GroupId) -> RepositoryResult<()> {
        let mut guard = self
            .enter(
                format!("delete_test_target_group {group_id}"),
                FailPoint::DeleteTestTargetGroup(group_id.clone()),
            )
            .await?;
        for test_matrix in guard.test_matrices.iter_mut() {
            test_matrix.groups.retain(|group| &group.id != group_id);
        }
        Ok(())
    }
}

#[async_trait]
impl TestMatrixRepository for FakeBackend {
    async fn get_test_matrix(&self, test_matrix_id: &TestMatrixId) -> RepositoryResult<TestMatrix> {
        let guard = self
            .enter(
                format!("get_test_matrix {test_matrix_id}"),
                FailPoint::GetTestMatrix(test_matrix_id.clone()),
            )
            .await?;
        guard
            .test_matrices
            .iter()
            .find(|test_matrix| &test_matrix.id == test_matrix_id)
            .cloned()
            .ok_or_else(not_found)
    }
}

#[async_trait]
impl ProjectRepository for FakeBackend {
    async fn get_project(&self, project_id: &ProjectId) -> RepositoryResult<ProjectData> {
        let guard = self
            .enter(format!("get_project {project_id}"), FailPoint::GetProject)
            .await?;
        Ok(ProjectData {
            id: project_id.clone(),
            name: "project".to_string(),
            test_matrices: guard.test_matrices.clone(),
            stories: Vec::new(),
        })
    }
}

#[async_trait]
impl ScreenshotRepository for FakeBackend {
    async fn get_screenshots(
        &self,
        test_result_id: &TestResultId,
    ) -> RepositoryResult<ScreenshotsArchive> {
        let _guard = self
            .enter(
                format!("get_screenshots {test_result_id}"),
                FailPoint::GetScreenshots,
            )
            .await?;
        Ok(ScreenshotsArchive {
            url: format!("exports/{test_result_id}.zip"),
        })
    }
}

impl HasServiceUrl for FakeBackend {
    fn service_url(&self) -> &str {
        SERVICE_URL
    }
}

macro_rules! fake_capability {
    ($capability:ident, $accessor:ident, $repository:ident) => {
        impl $capability for FakeBackend {
            fn $accessor(&self) -> &dyn $repository {
                self
            }
        }
    };
}

fake_capability!(HasTestStepRepository, test_step_repository, TestStepRepository);
fake_capability!(HasNoteRepository, note_repository, NoteRepository);
fake_capability!(HasSettingRepository, setting_repository, SettingRepository);
fake_capability!(HasTestTargetRepository, test_target_repository, TestTargetRepository);
fake_capability!(
    HasTestTargetGroupRepository,
    test_target_group_repository,
    TestTargetGroupRepository
);
fake_capability!(HasTestMatrixRepository, test_matrix_repository, TestMatrixRepository);
fake_capability!(HasProjectRepository, project_repository, ProjectRepository);
fake_capability!(HasScreenshotRepository, screenshot_repository, ScreenshotRepository);
