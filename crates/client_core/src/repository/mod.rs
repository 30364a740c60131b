//! Narrow remote operations, one round trip each, every outcome classified.
//!
//! Actions never see the whole [`RepositoryContainer`]; they name the
//! repositories they need through the `Has*` capability traits, so an action
//! cannot reach a repository outside its declared bounds.

use std::sync::Arc;

mod note;
mod project;
mod screenshot;
mod setting;
mod test_matrix;
mod test_step;
mod test_target;
mod test_target_group;

pub use note::{NoteRepository, NoteRepositoryImpl};
pub use project::{ProjectRepository, ProjectRepositoryImpl};
pub use screenshot::{ScreenshotRepository, ScreenshotRepositoryImpl};
pub use setting::{SettingRepository, SettingRepositoryImpl};
pub use test_matrix::{TestMatrixRepository, TestMatrixRepositoryImpl};
pub use test_step::{TestStepRepository, TestStepRepositoryImpl};
pub use test_target::{TestTargetRepository, TestTargetRepositoryImpl};
pub use test_target_group::{TestTargetGroupRepository, TestTargetGroupRepositoryImpl};

use crate::transport::RestClient;

pub trait HasServiceUrl {
    fn service_url(&self) -> &str;
}

macro_rules! repository_capability {
    ($capability:ident, $accessor:ident, $repository:ident) => {
        pub trait $capability {
            fn $accessor(&self) -> &dyn $repository;
        }

        impl $capability for RepositoryContainer {
            fn $accessor(&self) -> &dyn $repository {
                self.$accessor.as_ref()
            }
        }
    };
}

repository_capability!(HasTestStepRepository, test_step_repository, TestStepRepository);
repository_capability!(HasNoteRepository, note_repository, NoteRepository);
repository_capability!(HasSettingRepository, setting_repository, SettingRepository);
repository_capability!(HasTestTargetRepository, test_target_repository, TestTargetRepository);
repository_capability!(
    HasTestTargetGroupRepository,
    test_target_group_repository,
    TestTargetGroupRepository
);
repository_capability!(HasTestMatrixRepository, test_matrix_repository, TestMatrixRepository);
repository_capability!(HasProjectRepository, project_repository, ProjectRepository);
repository_capability!(HasScreenshotRepository, screenshot_repository, ScreenshotRepository);

pub struct RepositoryContainer {
    service_url: String,
    test_step_repository: Arc<dyn TestStepRepository>,
    note_repository: Arc<dyn NoteRepository>,
    setting_repository: Arc<dyn SettingRepository>,
    test_target_repository: Arc<dyn TestTargetRepository>,
    test_target_group_repository: Arc<dyn TestTargetGroupRepository>,
    test_matrix_repository: Arc<dyn TestMatrixRepository>,
    project_repository: Arc<dyn ProjectRepository>,
    screenshot_repository: Arc<dyn ScreenshotRepository>,
}

impl RepositoryContainer {
    pub fn new(rest_client: Arc<dyn RestClient>) -> Self {
        Self {
            service_url: rest_client.service_url().to_string(),
            test_step_repository: Arc::new(TestStepRepositoryImpl::new(Arc::clone(&rest_client))),
            note_repository: Arc::new(NoteRepositoryImpl::new(Arc::clone(&rest_client))),
            setting_repository: Arc::new(SettingRepositoryImpl::new(Arc::clone(&rest_client))),
            test_target_repository: Arc::new(TestTargetRepositoryImpl::new(Arc::clone(
                &rest_client,
            ))),
            test_target_group_repository: Arc::new(TestTargetGroupRepositoryImpl::new(
                Arc::clone(&rest_client),
            )),
            test_matrix_repository: Arc::new(TestMatrixRepositoryImpl::new(Arc::clone(
                &rest_client,
            ))),
            project_repository: Arc::new(ProjectRepositoryImpl::new(Arc::clone(&rest_client))),
            screenshot_repository: Arc::new(ScreenshotRepositoryImpl::new(rest_client)),
        }
    }
}

impl HasServiceUrl for RepositoryContainer {
    fn service_url(&self) -> &str {
        &self.service_url
    }
}
