use shared::{
    domain::{Note, TestResultId},
    protocol::{MovedBug, MovedNotice, NoteDestination, NoteLocation},
};
use tracing::{info, warn};

use super::{resolve_service_path, ActionFailure, ActionResult};
use crate::{
    error::RepositoryError,
    relocation::{relocate, NoteListKind, RelocationError, TestStepNoteList},
    repository::{HasNoteRepository, HasServiceUrl, HasTestStepRepository},
};

pub const MOVE_NOTE_FAILED_MESSAGE_KEY: &str = "error.operation_history.move_note_failed";

#[derive(Debug)]
enum MoveNoteError {
    Relocation(RelocationError),
    ReadNote(RepositoryError),
}

/// Relocates one note reference between test steps and reads the moved note
/// back with its image URL made absolute.
async fn move_note<R>(
    repositories: &R,
    kind: NoteListKind,
    test_result_id: &TestResultId,
    from: &NoteLocation,
    dest: &NoteDestination,
) -> ActionResult<(Note, usize)>
where
    R: HasTestStepRepository + HasNoteRepository + HasServiceUrl,
{
    let outcome = async {
        let list = TestStepNoteList::new(repositories.test_step_repository(), test_result_id, kind);
        let relocated = relocate(&list, &from.test_step_id, from.index, &list, &dest.test_step_id)
            .await
            .map_err(MoveNoteError::Relocation)?;
        let mut note = repositories
            .note_repository()
            .get_note(test_result_id, &relocated.item)
            .await
            .map_err(MoveNoteError::ReadNote)?;
        note.image_file_url = note
            .image_file_url
            .map(|url| resolve_service_path(repositories.service_url(), &url));
        Ok::<_, MoveNoteError>((note, relocated.index))
    }
    .await;

    match outcome {
        Ok((note, index)) => {
            info!(
                ?kind,
                note_id = %note.id,
                from = %from.test_step_id,
                to = %dest.test_step_id,
                index,
                "operation history: note moved"
            );
            Ok((note, index))
        }
        Err(MoveNoteError::Relocation(err)) => {
            warn!(
                ?kind,
                source_committed = err.source_committed(),
                error = %err,
                "operation history: note move failed"
            );
            Err(ActionFailure::new(MOVE_NOTE_FAILED_MESSAGE_KEY))
        }
        Err(MoveNoteError::ReadNote(err)) => {
            warn!(?kind, error = %err, "operation history: moved note could not be read");
            Err(ActionFailure::new(MOVE_NOTE_FAILED_MESSAGE_KEY))
        }
    }
}

pub struct MoveBugAction<'a, R> {
    repositories: &'a R,
}

impl<'a, R> MoveBugAction<'a, R>
where
    R: HasTestStepRepository + HasNoteRepository + HasServiceUrl,
{
    pub fn new(repositories: &'a R) -> Self {
        Self { repositories }
    }

    pub async fn move_bug(
        &self,
        test_result_id: &TestResultId,
        from: &NoteLocation,
        dest: &NoteDestination,
    ) -> ActionResult<MovedBug> {
        let (bug, index) =
            move_note(self.repositories, NoteListKind::Bugs, test_result_id, from, dest).await?;
        Ok(MovedBug { bug, index })
    }
}

pub struct MoveNoticeAction<'a, R> {
    repositories: &'a R,
}

impl<'a, R> MoveNoticeAction<'a, R>
where
    R: HasTestStepRepository + HasNoteRepository + HasServiceUrl,
{
    pub fn new(repositories: &'a R) -> Self {
        Self { repositories }
    }

    pub async fn move_notice(
        &self,
        test_result_id: &TestResultId,
        from: &NoteLocation,
        dest: &NoteDestination,
    ) -> ActionResult<MovedNotice> {
        let (notice, index) =
            move_note(self.repositories, NoteListKind::Notices, test_result_id, from, dest).await?;
        Ok(MovedNotice { notice, index })
    }
}
