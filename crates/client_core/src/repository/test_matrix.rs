use std::sync::Arc;

use async_trait::async_trait;
use shared::domain::{TestMatrix, TestMatrixId};

use crate::{
    error::{classify, RepositoryResult, STATUS_OK},
    transport::{RestClient, RestRequest},
};

#[async_trait]
pub trait TestMatrixRepository: Send + Sync {
    async fn get_test_matrix(&self, test_matrix_id: &TestMatrixId) -> RepositoryResult<TestMatrix>;
}

pub struct TestMatrixRepositoryImpl {
    rest_client: Arc<dyn RestClient>,
}

impl TestMatrixRepositoryImpl {
    pub fn new(rest_client: Arc<dyn RestClient>) -> Self {
        Self { rest_client }
    }
}

#[async_trait]
impl TestMatrixRepository for TestMatrixRepositoryImpl {
    async fn get_test_matrix(&self, test_matrix_id: &TestMatrixId) -> RepositoryResult<TestMatrix> {
        let outcome = self
            .rest_client
            .send(RestRequest::get(format!("/test-matrices/{test_matrix_id}")))
            .await;
        classify(outcome, STATUS_OK)
    }
}
