use reqwest::{blocking::{Client, RequestBuilder, Response}, header::AUTHORIZATION, StatusCode};

use crate::{
    domain::{policy::AccessDenied, Artist, AuthenticatedUser, Cd, Id, Name, Username},
    mappers::{CdPayload, CdSubmission},
    utils::config::ApiConfig
};
use super::{build_client, ApiError, ADD_ERROR, DELETE_ERROR, FETCH_DETAIL_ERROR, FETCH_ERROR, UPDATE_ERROR};

/// Client side of the CD resource.
///
/// Every method performs exactly one blocking request and translates the outcome:
/// a transport failure becomes [`ApiError::Connection`], `403` on a write becomes
/// [`ApiError::PermissionDenied`], any other non-2xx status becomes
/// [`ApiError::OperationFailed`] with a message naming the operation. Nothing is retried.
pub struct CdService {
    client: Client,
    music_endpoint: String
}

impl CdService {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        Ok(
            Self {
                client: build_client(config)?,
                music_endpoint: config.music_endpoint.clone()
            }
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.music_endpoint, path)
    }

    fn authorized(request: RequestBuilder, user: &AuthenticatedUser) -> RequestBuilder {
        request.header(AUTHORIZATION, format!("Token {}", user.key()))
    }

    fn send(request: RequestBuilder) -> Result<Response, ApiError> {
        request.send().map_err(ApiError::Connection)
    }

    fn check_status(response: &Response, message: &'static str, on_forbidden: Option<AccessDenied>) -> Result<(), ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        log::warn!("{} {} answered {}", response.url().path(), message, status);
        match on_forbidden {
            Some(denied) if status == StatusCode::FORBIDDEN => Err(ApiError::PermissionDenied(denied)),
            _ => Err(ApiError::OperationFailed { message, status: status.as_u16() })
        }
    }

    fn read_cd(response: Response) -> Result<Cd, ApiError> {
        let payload: CdPayload = response.json().map_err(ApiError::InvalidBody)?;
        Ok(Cd::try_from(payload)?)
    }

    fn fetch_list(&self, request: RequestBuilder) -> Result<Vec<Cd>, ApiError> {
        let response = Self::send(request)?;
        Self::check_status(&response, FETCH_ERROR, None)?;

        let payloads: Vec<CdPayload> = response.json().map_err(ApiError::InvalidBody)?;
        let cds = payloads.into_iter()
            .map(Cd::try_from)
            .collect::<Result<Vec<Cd>, _>>()?;

        log::debug!("Fetched {} CDs", cds.len());
        Ok(cds)
    }

    pub fn fetch_cd_list(&self) -> Result<Vec<Cd>, ApiError> {
        log::debug!("GET {}", self.music_endpoint);
        self.fetch_list(self.client.get(&self.music_endpoint))
    }

    pub fn fetch_cd_detail(&self, id: &Id) -> Result<Cd, ApiError> {
        let url = self.url(&format!("{}/", id));
        log::debug!("GET {}", url);

        let response = Self::send(self.client.get(url))?;
        Self::check_status(&response, FETCH_DETAIL_ERROR, None)?;

        Self::read_cd(response)
    }

    /// Creates `cd` on the server and returns the stored record, with the id,
    /// owner and timestamps the server assigned.
    pub fn add_cd(&self, cd: &Cd, user: &AuthenticatedUser) -> Result<Cd, ApiError> {
        log::debug!("POST {} as {}", self.music_endpoint, user.username());

        let request = Self::authorized(self.client.post(&self.music_endpoint), user)
            .json(&CdSubmission::for_create(cd, user));
        let response = Self::send(request)?;
        Self::check_status(&response, ADD_ERROR, Some(AccessDenied::NotPublisher))?;

        let stored = Self::read_cd(response)?;
        log::info!("CD {} added by {}", stored.id(), user.username());
        Ok(stored)
    }

    /// Replaces the editable fields of the CD with `cd.id()`. The server keeps the original owner.
    pub fn update_cd(&self, cd: &Cd, user: &AuthenticatedUser) -> Result<Cd, ApiError> {
        let url = self.url(&format!("{}/", cd.id()));
        log::debug!("PUT {} as {}", url, user.username());

        let request = Self::authorized(self.client.put(url), user)
            .json(&CdSubmission::for_update(cd, user));
        let response = Self::send(request)?;
        Self::check_status(&response, UPDATE_ERROR, Some(AccessDenied::NotOwner))?;

        let stored = Self::read_cd(response)?;
        log::info!("CD {} updated by {}", stored.id(), user.username());
        Ok(stored)
    }

    pub fn remove_cd(&self, id: &Id, user: &AuthenticatedUser) -> Result<(), ApiError> {
        let url = self.url(&format!("{}/", id));
        log::debug!("DELETE {} as {}", url, user.username());

        let response = Self::send(Self::authorized(self.client.delete(url), user))?;
        Self::check_status(&response, DELETE_ERROR, Some(AccessDenied::NotOwner))?;

        log::info!("CD {} deleted by {}", id, user.username());
        Ok(())
    }

    pub fn fetch_cds_by_artist(&self, artist: &Artist) -> Result<Vec<Cd>, ApiError> {
        self.fetch_list(self.client.get(self.url("byartist")).query(&[("artist", artist.as_str())]))
    }

    pub fn fetch_cds_by_name(&self, name: &Name) -> Result<Vec<Cd>, ApiError> {
        self.fetch_list(self.client.get(self.url("byname")).query(&[("name", name.as_str())]))
    }

    pub fn fetch_cds_by_published_by(&self, published_by: &Username) -> Result<Vec<Cd>, ApiError> {
        self.fetch_list(self.client.get(self.url("by_published_by")).query(&[("publishedby", published_by.as_str())]))
    }
}
