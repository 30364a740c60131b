use std::sync::Arc;

use async_trait::async_trait;
use shared::domain::GroupId;

use crate::{
    error::{classify, RepositoryResult, STATUS_NO_CONTENT},
    transport::{RestClient, RestRequest},
};

#[async_trait]
pub trait TestTargetGroupRepository: Send + Sync {
    async fn delete_test_target_group(&self, group_id: &GroupId) -> RepositoryResult<()>;
}

pub struct TestTargetGroupRepositoryImpl {
    rest_client: Arc<dyn RestClient>,
}

impl TestTargetGroupRepositoryImpl {
    pub fn new(rest_client: Arc<dyn RestClient>) -> Self {
        Self { rest_client }
    }
}

#[async_trait]
impl TestTargetGroupRepository for TestTargetGroupRepositoryImpl {
    async fn delete_test_target_group(&self, group_id: &GroupId) -> RepositoryResult<()> {
        let outcome = self
            .rest_client
            .send(RestRequest::delete(format!("/test-target-groups/{group_id}")))
            .await;
        classify(outcome, STATUS_NO_CONTENT)
    }
}
