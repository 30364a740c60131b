use shared::{domain::TestMatrix, protocol::DeleteGroupPayload};
use tracing::info;

use super::{ActionFailure, ActionResult};
use crate::repository::{HasTestMatrixRepository, HasTestTargetGroupRepository};

const DELETE_GROUP_FAILED_MESSAGE_KEY: &str = "error.test_management.delete_group_failed";

pub struct DeleteGroupAction<'a, R> {
    repositories: &'a R,
}

impl<'a, R> DeleteGroupAction<'a, R>
where
    R: HasTestTargetGroupRepository + HasTestMatrixRepository,
{
    pub fn new(repositories: &'a R) -> Self {
        Self { repositories }
    }

    /// Deletes the group and returns its test matrix as the server now has it.
    pub async fn delete_group(&self, payload: &DeleteGroupPayload) -> ActionResult<TestMatrix> {
        self.repositories
            .test_target_group_repository()
            .delete_test_target_group(&payload.group_id)
            .await
            .map_err(|err| ActionFailure::from_repository(&err, DELETE_GROUP_FAILED_MESSAGE_KEY))?;
        info!(group_id = %payload.group_id, "test management: group deleted");

        self.repositories
            .test_matrix_repository()
            .get_test_matrix(&payload.test_matrix_id)
            .await
            .map_err(|err| ActionFailure::from_repository(&err, DELETE_GROUP_FAILED_MESSAGE_KEY))
    }
}
