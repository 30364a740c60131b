//! Moves one entry of a list-valued reference from one owner to another.
//!
//! There is no transaction spanning the two owners. The forward steps run
//! strictly in order and stop at the first failure without compensation:
//!
//! 1. fetch the source list
//! 2. write the source list without the entry
//! 3. fetch the destination list
//! 4. write the destination list with the entry appended
//!
//! A failure after step 2 leaves the entry removed from the source and absent
//! from the destination. [`RelocationError::source_committed`] reports that
//! state to the caller.

use std::fmt;

use async_trait::async_trait;
use shared::{
    domain::{NoteId, TestResultId, TestStep, TestStepId},
    protocol::TestStepPatch,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    error::{RepositoryError, RepositoryResult},
    repository::TestStepRepository,
};

/// An aggregate owning a list that entries can be relocated out of or into.
#[async_trait]
pub trait ListOwner: Send + Sync {
    type Key: fmt::Display + Send + Sync;
    type Item: Clone + Send + Sync;

    async fn fetch_list(&self, key: &Self::Key) -> RepositoryResult<Vec<Self::Item>>;
    async fn write_list(&self, key: &Self::Key, items: Vec<Self::Item>) -> RepositoryResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelocationStage {
    FetchSource,
    WriteSource,
    FetchDestination,
    WriteDestination,
}

impl fmt::Display for RelocationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FetchSource => "fetch_source",
            Self::WriteSource => "write_source",
            Self::FetchDestination => "fetch_destination",
            Self::WriteDestination => "write_destination",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelocationError {
    #[error("source index {index} is out of range for a list of {len} entries")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("relocation stopped at {stage} (source committed: {source_committed})")]
    Step {
        stage: RelocationStage,
        source_committed: bool,
        #[source]
        cause: RepositoryError,
    },
}

impl RelocationError {
    /// True when the source list was already written without the entry.
    pub fn source_committed(&self) -> bool {
        match self {
            Self::IndexOutOfRange { .. } => false,
            Self::Step {
                source_committed, ..
            } => *source_committed,
        }
    }

    pub fn stage(&self) -> Option<RelocationStage> {
        match self {
            Self::IndexOutOfRange { .. } => None,
            Self::Step { stage, .. } => Some(*stage),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocated<T> {
    pub item: T,
    /// Position of the item in the destination list.
    pub index: usize,
}

pub async fn relocate<S, D>(
    source: &S,
    source_key: &S::Key,
    index: usize,
    destination: &D,
    destination_key: &D::Key,
) -> Result<Relocated<S::Item>, RelocationError>
where
    S: ListOwner + ?Sized,
    D: ListOwner<Item = S::Item> + ?Sized,
{
    let mut remaining = source
        .fetch_list(source_key)
        .await
        .map_err(|cause| step_failed(RelocationStage::FetchSource, false, cause))?;

    if index >= remaining.len() {
        return Err(RelocationError::IndexOutOfRange {
            index,
            len: remaining.len(),
        });
    }
    let item = remaining.remove(index);

    source
        .write_list(source_key, remaining)
        .await
        .map_err(|cause| step_failed(RelocationStage::WriteSource, false, cause))?;
    info!(source = %source_key, index, "relocation: source list committed");

    let mut destination_list = destination
        .fetch_list(destination_key)
        .await
        .map_err(|cause| step_failed(RelocationStage::FetchDestination, true, cause))?;
    let new_index = destination_list.len();
    destination_list.push(item.clone());

    destination
        .write_list(destination_key, destination_list)
        .await
        .map_err(|cause| step_failed(RelocationStage::WriteDestination, true, cause))?;
    info!(
        source = %source_key,
        destination = %destination_key,
        new_index,
        "relocation: destination list committed"
    );

    Ok(Relocated {
        item,
        index: new_index,
    })
}

fn step_failed(stage: RelocationStage, source_committed: bool, cause: RepositoryError) -> RelocationError {
    warn!(%stage, source_committed, error = %cause, "relocation: step failed");
    RelocationError::Step {
        stage,
        source_committed,
        cause,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteListKind {
    Bugs,
    Notices,
}

/// The bug or notice list of the test steps of one test result.
pub struct TestStepNoteList<'a> {
    repository: &'a dyn TestStepRepository,
    test_result_id: &'a TestResultId,
    kind: NoteListKind,
}

impl<'a> TestStepNoteList<'a> {
    pub fn new(
        repository: &'a dyn TestStepRepository,
        test_result_id: &'a TestResultId,
        kind: NoteListKind,
    ) -> Self {
        Self {
            repository,
            test_result_id,
            kind,
        }
    }

    fn extract(&self, test_step: TestStep) -> Vec<NoteId> {
        match self.kind {
            NoteListKind::Bugs => test_step.bugs,
            NoteListKind::Notices => test_step.notices,
        }
    }

    fn patch(&self, items: Vec<NoteId>) -> TestStepPatch {
        match self.kind {
            NoteListKind::Bugs => TestStepPatch::Bugs(items),
            NoteListKind::Notices => TestStepPatch::Notices(items),
        }
    }
}

#[async_trait]
impl<'a> ListOwner for TestStepNoteList<'a> {
    type Key = TestStepId;
    type Item = NoteId;

    async fn fetch_list(&self, key: &TestStepId) -> RepositoryResult<Vec<NoteId>> {
        let test_step = self
            .repository
            .get_test_step(self.test_result_id, key)
            .await?;
        Ok(self.extract(test_step))
    }

    async fn write_list(&self, key: &TestStepId, items: Vec<NoteId>) -> RepositoryResult<()> {
        self.repository
            .patch_test_step(self.test_result_id, key, &self.patch(items))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/relocation_tests.rs"]
mod tests;
