use std::sync::Arc;

use async_trait::async_trait;
use shared::domain::{Note, NoteId, TestResultId};

use crate::{
    error::{classify, RepositoryResult, STATUS_OK},
    transport::{RestClient, RestRequest},
};

#[async_trait]
pub trait NoteRepository: Send + Sync {
    async fn get_note(&self, test_result_id: &TestResultId, note_id: &NoteId)
        -> RepositoryResult<Note>;
}

pub struct NoteRepositoryImpl {
    rest_client: Arc<dyn RestClient>,
}

impl NoteRepositoryImpl {
    pub fn new(rest_client: Arc<dyn RestClient>) -> Self {
        Self { rest_client }
    }
}

#[async_trait]
impl NoteRepository for NoteRepositoryImpl {
    async fn get_note(
        &self,
        test_result_id: &TestResultId,
        note_id: &NoteId,
    ) -> RepositoryResult<Note> {
        let outcome = self
            .rest_client
            .send(RestRequest::get(format!(
                "/test-results/{test_result_id}/notes/{note_id}"
            )))
            .await;
        classify(outcome, STATUS_OK)
    }
}
