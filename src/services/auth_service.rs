use reqwest::{blocking::Client, header::AUTHORIZATION};
use serde_json::json;

use crate::{
    domain::{AuthenticatedUser, Password, Username},
    mappers::SessionPayload,
    utils::config::ApiConfig
};
use super::{build_client, ApiError, LOGIN_ERROR, LOGOUT_ERROR};

pub struct AuthenticationService {
    client: Client,
    auth_endpoint: String
}

impl AuthenticationService {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        Ok(
            Self {
                client: build_client(config)?,
                auth_endpoint: config.auth_endpoint.clone()
            }
        )
    }

    /// Exchanges credentials for a session token and the user's role flags.
    pub fn login(&self, username: &Username, password: &Password) -> Result<AuthenticatedUser, ApiError> {
        let url = format!("{}login/", self.auth_endpoint);
        log::debug!("POST {} for {}", url, username);

        let response = self.client.post(url)
            .json(&json!({ "username": username.as_str(), "password": password.expose() }))
            .send()
            .map_err(ApiError::Connection)?;

        if !response.status().is_success() {
            log::warn!("Login of {} answered {}", username, response.status());
            return Err(ApiError::OperationFailed { message: LOGIN_ERROR, status: response.status().as_u16() });
        }

        let payload: SessionPayload = response.json().map_err(ApiError::InvalidBody)?;
        let user = AuthenticatedUser::try_from(payload)?;

        log::info!("Logged in as {}", user);
        Ok(user)
    }

    pub fn logout(&self, user: &AuthenticatedUser) -> Result<(), ApiError> {
        let url = format!("{}logout/", self.auth_endpoint);
        log::debug!("POST {} for {}", url, user.username());

        let response = self.client.post(url)
            .header(AUTHORIZATION, format!("Token {}", user.key()))
            .send()
            .map_err(ApiError::Connection)?;

        if !response.status().is_success() {
            log::warn!("Logout of {} answered {}", user.username(), response.status());
            return Err(ApiError::OperationFailed { message: LOGOUT_ERROR, status: response.status().as_u16() });
        }

        log::info!("{} logged out", user.username());
        Ok(())
    }
}
