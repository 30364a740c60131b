use shared::{
    domain::TestTarget,
    protocol::{AddNewTestTargetPayload, NewTestTarget},
};
use tracing::info;

use super::{ActionFailure, ActionResult};
use crate::repository::HasTestTargetRepository;

const ADD_TEST_TARGET_FAILED_MESSAGE_KEY: &str = "error.test_management.add_test_target_failed";
const TEST_TARGET_NAME_EMPTY_MESSAGE_KEY: &str = "error.test_management.test_target_name_empty";

pub struct AddNewTestTargetAction<'a, R> {
    repositories: &'a R,
}

impl<'a, R: HasTestTargetRepository> AddNewTestTargetAction<'a, R> {
    pub fn new(repositories: &'a R) -> Self {
        Self { repositories }
    }

    pub async fn add_new_test_target(
        &self,
        payload: &AddNewTestTargetPayload,
    ) -> ActionResult<TestTarget> {
        let name = payload.test_target_name.trim();
        if name.is_empty() {
            return Err(ActionFailure::new(TEST_TARGET_NAME_EMPTY_MESSAGE_KEY));
        }

        let test_target = self
            .repositories
            .test_target_repository()
            .post_test_target(&NewTestTarget {
                test_target_group_id: payload.group_id.clone(),
                name: name.to_string(),
            })
            .await
            .map_err(|err| ActionFailure::from_repository(&err, ADD_TEST_TARGET_FAILED_MESSAGE_KEY))?;

        info!(
            group_id = %payload.group_id,
            test_target_id = %test_target.id,
            "test management: test target created"
        );
        Ok(test_target)
    }
}
