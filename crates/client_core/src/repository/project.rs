use std::sync::Arc;

use async_trait::async_trait;
use shared::{domain::ProjectId, protocol::ProjectData};

use crate::{
    error::{classify, RepositoryResult, STATUS_OK},
    transport::{RestClient, RestRequest},
};

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn get_project(&self, project_id: &ProjectId) -> RepositoryResult<ProjectData>;
}

pub struct ProjectRepositoryImpl {
    rest_client: Arc<dyn RestClient>,
}

impl ProjectRepositoryImpl {
    pub fn new(rest_client: Arc<dyn RestClient>) -> Self {
        Self { rest_client }
    }
}

#[async_trait]
impl ProjectRepository for ProjectRepositoryImpl {
    async fn get_project(&self, project_id: &ProjectId) -> RepositoryResult<ProjectData> {
        let outcome = self
            .rest_client
            .send(RestRequest::get(format!("/projects/{project_id}")))
            .await;
        classify(outcome, STATUS_OK)
    }
}
