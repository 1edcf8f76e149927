use std::collections::BTreeMap;

use crate::domain::{Cd, Id};
use super::RepositoryError;

/// CD store keyed by id. Ids are the only unique key: two records may share an EAN code.
#[derive(Debug, Default)]
pub struct InMemoryCdsRepository {
    records: BTreeMap<Id, Cd>,
    last_id: Option<Id>
}

impl InMemoryCdsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> Result<Id, RepositoryError> {
        let next = match self.last_id {
            Some(last) => last.next().ok_or(RepositoryError::IdsExhausted)?,
            None => Id::from(1)
        };

        self.last_id = Some(next);
        Ok(next)
    }

    pub fn save<C>(&mut self, cd: C) -> Result<Cd, RepositoryError>
    where C: AsRef<Cd>
    {
        let cd = cd.as_ref();
        if self.records.contains_key(cd.id()) {
            return Err(RepositoryError::IdAlreadyExists(*cd.id()));
        }

        self.last_id = self.last_id.max(Some(*cd.id()));
        self.records.insert(*cd.id(), cd.clone());

        Ok(cd.clone())
    }

    pub fn update<C>(&mut self, cd: C) -> Result<Cd, RepositoryError>
    where C: AsRef<Cd>
    {
        let cd = cd.as_ref();
        match self.records.get_mut(cd.id()) {
            Some(stored) => {
                *stored = cd.clone();
                Ok(cd.clone())
            },
            None => Err(RepositoryError::IdNotFound(*cd.id()))
        }
    }

    pub fn by_id_fetch(&self, id: &Id) -> Option<&Cd> {
        self.records.get(id)
    }

    pub fn fetch_all(&self) -> Vec<Cd> {
        self.records.values().cloned().collect()
    }

    pub fn delete_by_id(&mut self, id: &Id) -> Result<Cd, RepositoryError> {
        self.records.remove(id).ok_or(RepositoryError::IdNotFound(*id))
    }

    /// Records whose selected attribute contains `needle`, ignoring case.
    pub fn filter_contains<F>(&self, needle: &str, attribute: F) -> Vec<Cd>
    where F: Fn(&Cd) -> &str
    {
        let needle = needle.to_lowercase();

        self.records.values()
            .filter(|cd| attribute(cd).to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}
