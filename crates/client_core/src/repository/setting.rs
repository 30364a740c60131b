use std::sync::Arc;

use async_trait::async_trait;
use shared::domain::{ProjectId, Settings};

use crate::{
    error::{classify, RepositoryResult, STATUS_OK},
    transport::{send_json, HttpMethod, RestClient},
};

#[async_trait]
pub trait SettingRepository: Send + Sync {
    async fn put_settings(
        &self,
        project_id: &ProjectId,
        settings: &Settings,
    ) -> RepositoryResult<Settings>;
}

pub struct SettingRepositoryImpl {
    rest_client: Arc<dyn RestClient>,
}

impl SettingRepositoryImpl {
    pub fn new(rest_client: Arc<dyn RestClient>) -> Self {
        Self { rest_client }
    }
}

#[async_trait]
impl SettingRepository for SettingRepositoryImpl {
    async fn put_settings(
        &self,
        project_id: &ProjectId,
        settings: &Settings,
    ) -> RepositoryResult<Settings> {
        let outcome = send_json(
            self.rest_client.as_ref(),
            HttpMethod::Put,
            format!("/projects/{project_id}/configs"),
            settings,
        )
        .await;
        classify(outcome, STATUS_OK)
    }
}
