use std::sync::Arc;

use async_trait::async_trait;
use shared::{domain::TestResultId, protocol::ScreenshotsArchive};

use crate::{
    error::{classify, RepositoryResult, STATUS_OK},
    transport::{RestClient, RestRequest},
};

#[async_trait]
pub trait ScreenshotRepository: Send + Sync {
    /// Returns the service-relative URL of the screenshot archive.
    async fn get_screenshots(
        &self,
        test_result_id: &TestResultId,
    ) -> RepositoryResult<ScreenshotsArchive>;
}

pub struct ScreenshotRepositoryImpl {
    rest_client: Arc<dyn RestClient>,
}

impl ScreenshotRepositoryImpl {
    pub fn new(rest_client: Arc<dyn RestClient>) -> Self {
        Self { rest_client }
    }
}

#[async_trait]
impl ScreenshotRepository for ScreenshotRepositoryImpl {
    async fn get_screenshots(
        &self,
        test_result_id: &TestResultId,
    ) -> RepositoryResult<ScreenshotsArchive> {
        let outcome = self
            .rest_client
            .send(RestRequest::get(format!(
                "/test-results/{test_result_id}/screenshots"
            )))
            .await;
        classify(outcome, STATUS_OK)
    }
}
