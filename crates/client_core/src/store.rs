//! The mirrored test-management state and its named mutation entry points.

use shared::{
    domain::{
        Group, GroupId, ProjectId, Session, Story, TestMatrix, TestMatrixId, TestTarget,
        TestTargetId,
    },
    protocol::StoreMutation,
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::reconcile::{delete_by_identity, find_by_identity_mut, merge_by_identity};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestManagementState {
    pub project_id: Option<ProjectId>,
    pub stories: Vec<Story>,
    pub test_matrices: Vec<TestMatrix>,
    /// Story currently being edited, detached from `stories`.
    pub temp_story: Option<Story>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("story index {index} is out of range ({len} stories)")]
    StoryIndexOutOfRange { index: usize, len: usize },
    #[error("session index {index} is out of range for story {story_index} ({len} sessions)")]
    SessionIndexOutOfRange {
        story_index: usize,
        index: usize,
        len: usize,
    },
}

#[derive(Debug, Default)]
pub struct TestManagementStore {
    state: TestManagementState,
}

impl TestManagementStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &TestManagementState {
        &self.state
    }

    pub fn project_id(&self) -> Option<&ProjectId> {
        self.state.project_id.as_ref()
    }

    pub fn stories(&self) -> &[Story] {
        &self.state.stories
    }

    pub fn test_matrices(&self) -> &[TestMatrix] {
        &self.state.test_matrices
    }

    pub fn temp_story(&self) -> Option<&Story> {
        self.state.temp_story.as_ref()
    }

    pub fn test_matrix(&self, test_matrix_id: &TestMatrixId) -> Option<&TestMatrix> {
        self.state
            .test_matrices
            .iter()
            .find(|test_matrix| &test_matrix.id == test_matrix_id)
    }

    pub fn apply(&mut self, mutation: StoreMutation) -> Result<(), StoreError> {
        match mutation {
            StoreMutation::SetProjectId { project_id } => self.set_project_id(project_id),
            StoreMutation::SetManagedData {
                stories,
                test_matrices,
            } => self.set_managed_data(stories, test_matrices),
            StoreMutation::SetStoriesData { stories } => self.set_stories_data(stories),
            StoreMutation::AddStory { data } => self.add_story(data),
            StoreMutation::SetStory { index, data } => return self.set_story(index, data),
            StoreMutation::SetSession {
                story_index,
                session_index,
                data,
            } => return self.set_session(story_index, session_index, data),
            StoreMutation::SetTempStory { story } => self.set_temp_story(story),
            StoreMutation::ClearTempStory => self.clear_temp_story(),
            StoreMutation::AddTestMatrix { test_matrix } => self.add_test_matrix(test_matrix),
            StoreMutation::UpdateTestMatrices { test_matrices } => {
                self.update_test_matrices(test_matrices)
            }
            StoreMutation::DeleteTestMatrix { test_matrix_id } => {
                self.delete_test_matrix(&test_matrix_id)
            }
            StoreMutation::AddGroup {
                test_matrix_id,
                group,
            } => self.add_group(&test_matrix_id, group),
            StoreMutation::UpdateGroups {
                test_matrix_id,
                groups,
            } => self.update_groups(&test_matrix_id, groups),
            StoreMutation::DeleteGroup {
                test_matrix_id,
                group_id,
            } => self.delete_group(&test_matrix_id, &group_id),
            StoreMutation::AddTestTarget {
                test_matrix_id,
                group_id,
                test_target,
            } => self.add_test_target(&test_matrix_id, &group_id, test_target),
            StoreMutation::UpdateTestTargets {
                test_matrix_id,
                group_id,
                test_targets,
            } => self.update_test_targets(&test_matrix_id, &group_id, test_targets),
            StoreMutation::DeleteTestTarget {
                test_matrix_id,
                group_id,
                test_target_id,
            } => self.delete_test_target(&test_matrix_id, &group_id, &test_target_id),
        }
        Ok(())
    }

    pub fn set_project_id(&mut self, project_id: ProjectId) {
        self.state.project_id = Some(project_id);
    }

    /// Adopts a server snapshot verbatim. Stories are kept when omitted.
    pub fn set_managed_data(&mut self, stories: Option<Vec<Story>>, test_matrices: Vec<TestMatrix>) {
        if let Some(stories) = stories {
            self.state.stories = stories;
        }
        self.state.test_matrices = test_matrices;
        debug!(
            stories = self.state.stories.len(),
            test_matrices = self.state.test_matrices.len(),
            "store: managed data replaced"
        );
    }

    pub fn set_stories_data(&mut self, stories: Vec<Story>) {
        self.state.stories = stories;
    }

    pub fn add_story(&mut self, story: Story) {
        self.state.stories.push(story);
    }

    pub fn set_story(&mut self, index: usize, story: Story) -> Result<(), StoreError> {
        let len = self.state.stories.len();
        let slot = self
            .state
            .stories
            .get_mut(index)
            .ok_or(StoreError::StoryIndexOutOfRange { index, len })?;
        *slot = story;
        Ok(())
    }

    pub fn set_session(
        &mut self,
        story_index: usize,
        session_index: usize,
        session: Session,
    ) -> Result<(), StoreError> {
        let len = self.state.stories.len();
        let story = self
            .state
            .stories
            .get_mut(story_index)
            .ok_or(StoreError::StoryIndexOutOfRange {
                index: story_index,
                len,
            })?;
        let len = story.sessions.len();
        let slot = story
            .sessions
            .get_mut(session_index)
            .ok_or(StoreError::SessionIndexOutOfRange {
                story_index,
                index: session_index,
                len,
            })?;
        *slot = session;
        Ok(())
    }

    pub fn set_temp_story(&mut self, story: Story) {
        self.state.temp_story = Some(story);
    }

    pub fn clear_temp_story(&mut self) {
        self.state.temp_story = None;
    }

    pub fn add_test_matrix(&mut self, test_matrix: TestMatrix) {
        merge_by_identity(&mut self.state.test_matrices, vec![test_matrix]);
    }

    pub fn update_test_matrices(&mut self, test_matrices: Vec<TestMatrix>) {
        merge_by_identity(&mut self.state.test_matrices, test_matrices);
    }

    pub fn delete_test_matrix(&mut self, test_matrix_id: &TestMatrixId) {
        if !delete_by_identity(&mut self.state.test_matrices, test_matrix_id) {
            debug!(test_matrix_id = %test_matrix_id, "store: test matrix already absent");
        }
    }

    pub fn add_group(&mut self, test_matrix_id: &TestMatrixId, group: Group) {
        self.update_groups(test_matrix_id, vec![group]);
    }

    pub fn update_groups(&mut self, test_matrix_id: &TestMatrixId, groups: Vec<Group>) {
        let Some(test_matrix) = find_by_identity_mut(&mut self.state.test_matrices, test_matrix_id)
        else {
            warn!(test_matrix_id = %test_matrix_id, "store: groups update for unknown test matrix ignored");
            return;
        };
        merge_by_identity(&mut test_matrix.groups, groups);
    }

    pub fn delete_group(&mut self, test_matrix_id: &TestMatrixId, group_id: &GroupId) {
        let Some(test_matrix) = find_by_identity_mut(&mut self.state.test_matrices, test_matrix_id)
        else {
            warn!(test_matrix_id = %test_matrix_id, "store: group delete for unknown test matrix ignored");
            return;
        };
        delete_by_identity(&mut test_matrix.groups, group_id);
    }

    pub fn add_test_target(
        &mut self,
        test_matrix_id: &TestMatrixId,
        group_id: &GroupId,
        test_target: TestTarget,
    ) {
        self.update_test_targets(test_matrix_id, group_id, vec![test_target]);
    }

    pub fn update_test_targets(
        &mut self,
        test_matrix_id: &TestMatrixId,
        group_id: &GroupId,
        test_targets: Vec<TestTarget>,
    ) {
        let Some(group) = self.group_mut(test_matrix_id, group_id) else {
            warn!(
                test_matrix_id = %test_matrix_id,
                group_id = %group_id,
                "store: test targets update for unknown group ignored"
            );
            return;
        };
        merge_by_identity(&mut group.test_targets, test_targets);
    }

    pub fn delete_test_target(
        &mut self,
        test_matrix_id: &TestMatrixId,
        group_id: &GroupId,
        test_target_id: &TestTargetId,
    ) {
        let Some(group) = self.group_mut(test_matrix_id, group_id) else {
            warn!(
                test_matrix_id = %test_matrix_id,
                group_id = %group_id,
                "store: test target delete for unknown group ignored"
            );
            return;
        };
        delete_by_identity(&mut group.test_targets, test_target_id);
    }

    fn group_mut(&mut self, test_matrix_id: &TestMatrixId, group_id: &GroupId) -> Option<&mut Group> {
        let test_matrix = find_by_identity_mut(&mut self.state.test_matrices, test_matrix_id)?;
        find_by_identity_mut(&mut test_matrix.groups, group_id)
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
