//! Client core for the test-management mirror: classified repository access,
//! identity-keyed reconciliation of the mirrored state, cross-aggregate
//! relocation and the actions built on top of them.

pub mod actions;
pub mod config;
pub mod error;
pub mod reconcile;
pub mod relocation;
pub mod repository;
pub mod service;
pub mod store;
pub mod transport;

#[cfg(test)]
mod testing;

use std::sync::Arc;

pub use actions::{ActionFailure, ActionResult};
pub use config::ClientSettings;
pub use error::{RepositoryError, RepositoryResult, TransportError};
pub use repository::RepositoryContainer;
pub use service::TestManagementService;
pub use store::{StoreError, TestManagementState, TestManagementStore};
pub use transport::{HttpRestClient, RestClient};

/// Builds a service talking HTTP to the configured backend.
pub fn connect(settings: &ClientSettings) -> anyhow::Result<TestManagementService<RepositoryContainer>> {
    let rest_client: Arc<dyn RestClient> = Arc::new(HttpRestClient::new(
        settings.service_url.clone(),
        settings.request_timeout(),
    )?);
    Ok(TestManagementService::new(RepositoryContainer::new(rest_client)))
}
