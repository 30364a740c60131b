use std::sync::Arc;

use async_trait::async_trait;
use shared::{
    domain::{TestResultId, TestStep, TestStepId},
    protocol::TestStepPatch,
};

use crate::{
    error::{classify, RepositoryResult, STATUS_OK},
    transport::{send_json, HttpMethod, RestClient, RestRequest},
};

#[async_trait]
pub trait TestStepRepository: Send + Sync {
    async fn get_test_step(
        &self,
        test_result_id: &TestResultId,
        test_step_id: &TestStepId,
    ) -> RepositoryResult<TestStep>;

    /// Applies a sparse update and returns the step as the server stored it.
    async fn patch_test_step(
        &self,
        test_result_id: &TestResultId,
        test_step_id: &TestStepId,
        patch: &TestStepPatch,
    ) -> RepositoryResult<TestStep>;
}

pub struct TestStepRepositoryImpl {
    rest_client: Arc<dyn RestClient>,
}

impl TestStepRepositoryImpl {
    pub fn new(rest_client: Arc<dyn RestClient>) -> Self {
        Self { rest_client }
    }
}

fn test_step_path(test_result_id: &TestResultId, test_step_id: &TestStepId) -> String {
    format!("/test-results/{test_result_id}/test-steps/{test_step_id}")
}

#[async_trait]
impl TestStepRepository for TestStepRepositoryImpl {
    async fn get_test_step(
        &self,
        test_result_id: &TestResultId,
        test_step_id: &TestStepId,
    ) -> RepositoryResult<TestStep> {
        let outcome = self
            .rest_client
            .send(RestRequest::get(test_step_path(test_result_id, test_step_id)))
            .await;
        classify(outcome, STATUS_OK)
    }

    async fn patch_test_step(
        &self,
        test_result_id: &TestResultId,
        test_step_id: &TestStepId,
        patch: &TestStepPatch,
    ) -> RepositoryResult<TestStep> {
        let outcome = send_json(
            self.rest_client.as_ref(),
            HttpMethod::Patch,
            test_step_path(test_result_id, test_step_id),
            patch,
        )
        .await;
        classify(outcome, STATUS_OK)
    }
}
