use std::collections::BTreeSet;
use std::fmt::Display;

use super::{Id, Username};

/// Role granting creation and mutation of owned CD records.
pub const PUBLISHERS_ROLE: &str = "publishers";

/// The logged in user, as returned by the auth endpoint. Lives until logout or process end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    key: String,
    id: Id,
    username: Username,
    is_superuser: bool,
    roles: BTreeSet<String>
}

impl AuthenticatedUser {

    pub fn new<K, I, R>(key: K, id: Id, username: Username, is_superuser: bool, roles: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = R>,
        R: Into<String>
    {
        Self {
            key: key.into(),
            id,
            username,
            is_superuser,
            roles: roles.into_iter().map(Into::into).collect()
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn is_superuser(&self) -> bool {
        self.is_superuser
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    pub fn is_publisher(&self) -> bool {
        self.has_role(PUBLISHERS_ROLE)
    }

    pub fn is_authorized(&self) -> bool {
        self.is_superuser || self.is_publisher()
    }
}

impl Display for AuthenticatedUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (id {}, authorized: {})", self.username, self.id, self.is_authorized())
    }
}
