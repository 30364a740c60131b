use shared::{domain::ProjectId, protocol::ProjectData};

use super::{ActionFailure, ActionResult};
use crate::repository::HasProjectRepository;

const READ_PROJECT_FAILED_MESSAGE_KEY: &str = "error.test_management.read_project_failed";

pub struct ReadProjectAction<'a, R> {
    repositories: &'a R,
}

impl<'a, R: HasProjectRepository> ReadProjectAction<'a, R> {
    pub fn new(repositories: &'a R) -> Self {
        Self { repositories }
    }

    pub async fn read_project(&self, project_id: &ProjectId) -> ActionResult<ProjectData> {
        self.repositories
            .project_repository()
            .get_project(project_id)
            .await
            .map_err(|err| ActionFailure::from_repository(&err, READ_PROJECT_FAILED_MESSAGE_KEY))
    }
}
