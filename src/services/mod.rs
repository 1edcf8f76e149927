pub mod cd_service;
pub mod auth_service;
pub mod catalog;

pub use cd_service::CdService;
pub use auth_service::AuthenticationService;
pub use catalog::CatalogService;

use std::time::Duration;

use reqwest::blocking::Client;

use crate::{domain::policy::AccessDenied, mappers::MappingError, repository::RepositoryError, utils::config::ApiConfig};

pub const FETCH_ERROR: &str = "CD fetch failed.";
pub const FETCH_DETAIL_ERROR: &str = "CD detail fetch failed.";
pub const ADD_ERROR: &str = "CD add failed.";
pub const UPDATE_ERROR: &str = "CD update failed.";
pub const DELETE_ERROR: &str = "CD delete failed.";
pub const LOGIN_ERROR: &str = "Login not successful.";
pub const LOGOUT_ERROR: &str = "Logout not successful.";

/* Remote call errors */
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Check your network connection or retry later.")]
    Connection(#[source] reqwest::Error),

    #[error(transparent)]
    PermissionDenied(AccessDenied),

    #[error("{message} (HTTP {status})")]
    OperationFailed { message: &'static str, status: u16 },

    #[error("The server sent a body that could not be read: {0}")]
    InvalidBody(#[source] reqwest::Error),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error("Failed to set up the HTTP client: {0}")]
    ClientSetup(#[source] reqwest::Error)
}

/* Backend catalog errors */
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    AccessDenied(#[from] AccessDenied),

    #[error(transparent)]
    RepositoryError(#[from] RepositoryError)
}

pub(crate) fn build_client(config: &ApiConfig) -> Result<Client, ApiError> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(ApiError::ClientSetup)
}
