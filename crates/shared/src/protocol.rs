use serde::{Deserialize, Serialize};

use crate::domain::{
    Group, GroupId, Note, NoteId, ProjectId, Session, Story, TestMatrix, TestMatrixId, TestStepId,
    TestTarget, TestTargetId,
};

/// Sparse update for a test step. A request carries exactly one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestStepPatch {
    Intention(Option<NoteId>),
    Bugs(Vec<NoteId>),
    Notices(Vec<NoteId>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTestTarget {
    pub test_target_group_id: GroupId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
    pub id: ProjectId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub test_matrices: Vec<TestMatrix>,
    #[serde(default)]
    pub stories: Vec<Story>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenshotsArchive {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddNewTestTargetPayload {
    pub test_matrix_id: TestMatrixId,
    pub group_id: GroupId,
    pub test_target_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteGroupPayload {
    pub test_matrix_id: TestMatrixId,
    pub group_id: GroupId,
}

/// Position of a note inside a test step's list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteLocation {
    pub test_step_id: TestStepId,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDestination {
    pub test_step_id: TestStepId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovedBug {
    pub bug: Note,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovedNotice {
    pub notice: Note,
    pub index: usize,
}

/// A mutation of the mirrored test-management state, keyed by the same
/// field names the state itself uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum StoreMutation {
    SetProjectId {
        project_id: ProjectId,
    },
    SetManagedData {
        #[serde(default)]
        stories: Option<Vec<Story>>,
        test_matrices: Vec<TestMatrix>,
    },
    SetStoriesData {
        stories: Vec<Story>,
    },
    AddStory {
        data: Story,
    },
    SetStory {
        index: usize,
        data: Story,
    },
    SetSession {
        story_index: usize,
        session_index: usize,
        data: Session,
    },
    SetTempStory {
        story: Story,
    },
    ClearTempStory,
    AddTestMatrix {
        test_matrix: TestMatrix,
    },
    UpdateTestMatrices {
        test_matrices: Vec<TestMatrix>,
    },
    DeleteTestMatrix {
        test_matrix_id: TestMatrixId,
    },
    AddGroup {
        test_matrix_id: TestMatrixId,
        group: Group,
    },
    UpdateGroups {
        test_matrix_id: TestMatrixId,
        groups: Vec<Group>,
    },
    DeleteGroup {
        test_matrix_id: TestMatrixId,
        group_id: GroupId,
    },
    AddTestTarget {
        test_matrix_id: TestMatrixId,
        group_id: GroupId,
        test_target: TestTarget,
    },
    UpdateTestTargets {
        test_matrix_id: TestMatrixId,
        group_id: GroupId,
        test_targets: Vec<TestTarget>,
    },
    DeleteTestTarget {
        test_matrix_id: TestMatrixId,
        group_id: GroupId,
        test_target_id: TestTargetId,
    },
}
