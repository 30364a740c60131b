use std::sync::Arc;

use async_trait::async_trait;
use shared::{domain::TestTarget, protocol::NewTestTarget};

use crate::{
    error::{classify, RepositoryResult, STATUS_OK},
    transport::{send_json, HttpMethod, RestClient},
};

#[async_trait]
pub trait TestTargetRepository: Send + Sync {
    /// Creates a test target; the returned value carries the server-assigned id.
    async fn post_test_target(&self, test_target: &NewTestTarget) -> RepositoryResult<TestTarget>;
}

pub struct TestTargetRepositoryImpl {
    rest_client: Arc<dyn RestClient>,
}

impl TestTargetRepositoryImpl {
    pub fn new(rest_client: Arc<dyn RestClient>) -> Self {
        Self { rest_client }
    }
}

#[async_trait]
impl TestTargetRepository for TestTargetRepositoryImpl {
    async fn post_test_target(&self, test_target: &NewTestTarget) -> RepositoryResult<TestTarget> {
        let outcome = send_json(
            self.rest_client.as_ref(),
            HttpMethod::Post,
            "/test-targets",
            test_target,
        )
        .await;
        classify(outcome, STATUS_OK)
    }
}
