use serde::de::DeserializeOwned;
use shared::error::ApiError;
use thiserror::Error;
use tracing::warn;

use crate::transport::RestResponse;

pub const CANNOT_REACH_SERVER_MESSAGE_KEY: &str = "error.common.cannot_reach_server";
pub const MALFORMED_RESPONSE_CODE: &str = "malformed_response";

pub const STATUS_OK: u16 = 200;
pub const STATUS_NO_CONTENT: u16 = 204;

/// The transport gave up before any response arrived.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport failure: {message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(value: reqwest::Error) -> Self {
        Self::new(value.to_string())
    }
}

/// Classified failure of a single remote operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// A response arrived with a status other than the expected one.
    #[error("repository access failed with status {status}")]
    AccessFailure {
        status: u16,
        error: Option<ApiError>,
    },
    #[error("connection refused")]
    ConnectionRefused,
}

impl RepositoryError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AccessFailure { status, .. } => Some(*status),
            Self::ConnectionRefused => None,
        }
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::AccessFailure { error, .. } => error.as_ref(),
            Self::ConnectionRefused => None,
        }
    }

    /// Message key to show the user, if the failure carries one.
    pub fn message_key(&self) -> Option<&str> {
        match self {
            Self::AccessFailure { error, .. } => {
                error.as_ref().and_then(|error| error.message.as_deref())
            }
            Self::ConnectionRefused => Some(CANNOT_REACH_SERVER_MESSAGE_KEY),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Turns a transport outcome into a repository outcome.
pub fn classify<T: DeserializeOwned>(
    outcome: Result<RestResponse, TransportError>,
    expected_status: u16,
) -> RepositoryResult<T> {
    let response = match outcome {
        Ok(response) => response,
        Err(err) => {
            warn!(error = %err, "repository: connection refused");
            return Err(RepositoryError::ConnectionRefused);
        }
    };

    let status = response.status;
    if response.truncated {
        warn!(status, expected_status, "repository: response body incomplete");
        let error = (status == expected_status)
            .then(|| ApiError::code_only(MALFORMED_RESPONSE_CODE));
        return Err(RepositoryError::AccessFailure { status, error });
    }

    if status != expected_status {
        let error = serde_json::from_value::<ApiError>(response.body).ok();
        warn!(
            status,
            expected_status,
            code = error.as_ref().map(|e| e.code.as_str()).unwrap_or_default(),
            "repository: unexpected response status"
        );
        return Err(RepositoryError::AccessFailure { status, error });
    }

    serde_json::from_value(response.body).map_err(|err| {
        warn!(status, error = %err, "repository: malformed response body");
        RepositoryError::AccessFailure {
            status,
            error: Some(ApiError::code_only(MALFORMED_RESPONSE_CODE)),
        }
    })
}
