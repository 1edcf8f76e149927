use chrono::Utc;

use crate::{
    domain::{policy::{authorize, AccessDenied, Operation}, Artist, AuthenticatedUser, Cd, Id, Name, Username},
    repository::{InMemoryCdsRepository, RepositoryError}
};
use super::CatalogError;

/// Server side of the CD resource, backed by an in-memory repository.
///
/// Every write goes through the access policy first. The owner of a record is
/// always the user who created it: whatever `published_by` a caller submits is
/// replaced on create and ignored on update.
#[derive(Debug, Default)]
pub struct CatalogService {
    repo: InMemoryCdsRepository
}

impl CatalogService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> Vec<Cd> {
        self.repo.fetch_all()
    }

    pub fn get(&self, id: &Id) -> Result<Cd, CatalogError> {
        self.repo.by_id_fetch(id)
            .cloned()
            .ok_or(CatalogError::RepositoryError(RepositoryError::IdNotFound(*id)))
    }

    pub fn create(&mut self, actor: Option<&AuthenticatedUser>, cd: Cd) -> Result<Cd, CatalogError> {
        authorize::<Cd>(actor, Operation::Create, None)?;
        let owner = actor.ok_or(AccessDenied::NotAuthenticated)?.username().clone();

        let now = Utc::now();
        let cd = cd.with_id(self.repo.next_id()?)
            .with_publisher(owner)
            .with_timestamps(now, now);

        let stored = self.repo.save(cd)?;
        log::info!("Catalog: CD {} created by {}", stored.id(), stored.published_by());
        Ok(stored)
    }

    /// Replaces the editable fields of the stored record with id `cd.id()`.
    pub fn update(&mut self, actor: Option<&AuthenticatedUser>, cd: Cd) -> Result<Cd, CatalogError> {
        let existing = self.get(cd.id())?;
        authorize(actor, Operation::Update, Some(&existing))?;

        let cd = cd.with_publisher(existing.published_by().clone())
            .with_timestamps(*existing.created_at(), Utc::now());

        let stored = self.repo.update(cd)?;
        log::info!("Catalog: CD {} updated", stored.id());
        Ok(stored)
    }

    pub fn delete(&mut self, actor: Option<&AuthenticatedUser>, id: &Id) -> Result<Cd, CatalogError> {
        let existing = self.get(id)?;
        authorize(actor, Operation::Delete, Some(&existing))?;

        let removed = self.repo.delete_by_id(id)?;
        log::info!("Catalog: CD {} deleted", id);
        Ok(removed)
    }

    pub fn by_artist(&self, artist: &Artist) -> Vec<Cd> {
        self.repo.filter_contains(artist.as_str(), |cd| cd.artist().as_str())
    }

    pub fn by_name(&self, name: &Name) -> Vec<Cd> {
        self.repo.filter_contains(name.as_str(), |cd| cd.name().as_str())
    }

    pub fn by_publisher(&self, published_by: &Username) -> Vec<Cd> {
        self.repo.filter_contains(published_by.as_str(), |cd| cd.published_by().as_str())
    }
}
