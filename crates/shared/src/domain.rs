use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

id_newtype!(ProjectId);
id_newtype!(TestMatrixId);
id_newtype!(GroupId);
id_newtype!(TestTargetId);
id_newtype!(ViewPointId);
id_newtype!(StoryId);
id_newtype!(SessionId);
id_newtype!(TestResultId);
id_newtype!(TestStepId);
id_newtype!(NoteId);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewPoint {
    pub id: ViewPointId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestMatrix {
    pub id: TestMatrixId,
    pub name: String,
    pub index: i64,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub view_points: Vec<ViewPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub index: i64,
    #[serde(default)]
    pub test_targets: Vec<TestTarget>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub view_point_id: ViewPointId,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestTarget {
    pub id: TestTargetId,
    pub name: String,
    pub index: i64,
    #[serde(default)]
    pub plans: Vec<Plan>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryStatus {
    #[default]
    OutOfScope,
    Ng,
    Ok,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: StoryId,
    pub test_matrix_id: TestMatrixId,
    pub test_target_id: TestTargetId,
    pub view_point_id: ViewPointId,
    #[serde(default)]
    pub status: StoryStatus,
    #[serde(default)]
    pub sessions: Vec<Session>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: SessionId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_done: bool,
    #[serde(default)]
    pub done_date: String,
    #[serde(default)]
    pub test_item: String,
    #[serde(default)]
    pub tester_name: String,
    #[serde(default)]
    pub memo: String,
}

/// A recorded step of a test result with the notes attached to it.
///
/// `operation` is carried through untouched; nothing in the client core
/// interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestStep {
    pub id: TestStepId,
    #[serde(default)]
    pub operation: serde_json::Value,
    #[serde(default)]
    pub intention: Option<NoteId>,
    #[serde(default)]
    pub bugs: Vec<NoteId>,
    #[serde(default)]
    pub notices: Vec<NoteId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub value: String,
    #[serde(default)]
    pub details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_file_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

/// Project settings document.
///
/// Only the keys the client reads are typed; everything else round-trips
/// through `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub locale: String,
    #[serde(default)]
    pub mode: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
