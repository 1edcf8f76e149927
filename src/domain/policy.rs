//! Who may read, create, update or delete a CD.
//!
//! Reading is open to everyone, anonymous callers included. Creating needs the
//! publisher role or a superuser. Updating and deleting additionally need the
//! caller to own the record, unless the caller is a superuser.

use super::{AuthenticatedUser, Cd, Username};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Create,
    Update,
    Delete
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessDenied {
    #[error("You must be logged in.")]
    NotAuthenticated,

    #[error("You must be a publisher to add a CD.")]
    NotPublisher,

    #[error("You must be the publisher of this record.")]
    NotOwner
}

/// Resources with a single owning user.
pub trait OwnedByUser {
    fn owner(&self) -> &Username;

    fn is_owned_by(&self, username: &Username) -> bool {
        self.owner() == username
    }
}

impl OwnedByUser for Cd {
    fn owner(&self) -> &Username {
        self.published_by()
    }
}

pub fn may_read(_actor: Option<&AuthenticatedUser>) -> bool {
    true
}

pub fn may_create(actor: Option<&AuthenticatedUser>) -> bool {
    actor.is_some_and(AuthenticatedUser::is_authorized)
}

/// Update and delete rule.
pub fn may_mutate<R>(actor: Option<&AuthenticatedUser>, record: &R) -> bool
where R: OwnedByUser + ?Sized
{
    match actor {
        Some(user) if user.is_superuser() => true,
        Some(user) => user.is_publisher() && record.is_owned_by(user.username()),
        None => false
    }
}

/// Same decision as the `may_*` functions, with the reason of a denial.
///
/// `record` is only consulted for `Update` and `Delete`. Those need the stored
/// record: without one ownership cannot be proven and the call is denied.
pub fn authorize<R>(actor: Option<&AuthenticatedUser>, operation: Operation, record: Option<&R>) -> Result<(), AccessDenied>
where R: OwnedByUser + ?Sized
{
    if operation == Operation::Read {
        return Ok(());
    }

    let user = actor.ok_or(AccessDenied::NotAuthenticated)?;
    if !user.is_authorized() {
        return Err(AccessDenied::NotPublisher);
    }

    match (operation, record) {
        (Operation::Update | Operation::Delete, Some(record)) if may_mutate(Some(user), record) => Ok(()),
        (Operation::Update | Operation::Delete, _) => Err(AccessDenied::NotOwner),
        _ => Ok(())
    }
}
