use serde::Deserialize;

use crate::domain::{AuthenticatedUser, Id, Username};
use super::MappingError;

/// Login response of the auth endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionPayload {
    pub key: String,
    pub user: SessionUserPayload
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionUserPayload {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default)]
    pub groups: Vec<GroupPayload>
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupPayload {
    pub name: String
}

impl TryFrom<SessionPayload> for AuthenticatedUser {
    type Error = MappingError;

    fn try_from(payload: SessionPayload) -> Result<Self, Self::Error> {
        let user = payload.user;

        Ok(
            AuthenticatedUser::new(
                payload.key,
                Id::new(user.id).map_err(MappingError::field("user.id"))?,
                Username::new(user.username).map_err(MappingError::field("user.username"))?,
                user.is_superuser,
                user.groups.into_iter().map(|group| group.name)
            )
        )
    }
}
