pub mod cds_repo;

pub use cds_repo::InMemoryCdsRepository;

use crate::domain::Id;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("CD with id <{0}> was not found.")]
    IdNotFound(Id),

    #[error("CD with id <{0}> already exists.")]
    IdAlreadyExists(Id),

    #[error("No ids left to assign.")]
    IdsExhausted
}
