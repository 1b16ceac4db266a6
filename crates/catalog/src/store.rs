//! Shared, lockable access to the catalog plus the commit hook.

use crate::error::Result;
use crate::types::Catalog;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::path::{Path, PathBuf};

/// The persistence collaborator the service layer talks to.
///
/// Readers share the lock; a writer holds it for its whole
/// validate-upsert-commit sequence. With a data directory configured,
/// `commit` rewrites `ratings.dat` there; a purely in-memory store commits
/// nothing.
#[derive(Debug)]
pub struct CatalogStore {
    catalog: RwLock<Catalog>,
    data_dir: Option<PathBuf>,
}

impl CatalogStore {
    /// A store that lives only in memory
    pub fn in_memory(catalog: Catalog) -> Self {
        Self {
            catalog: RwLock::new(catalog),
            data_dir: None,
        }
    }

    /// Load a store from a data directory and commit back to it
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        let catalog = Catalog::load_from_dir(&data_dir)?;
        Ok(Self {
            catalog: RwLock::new(catalog),
            data_dir: Some(data_dir),
        })
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Catalog> {
        self.catalog.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Catalog> {
        self.catalog.write()
    }

    /// Persist the ratings of `catalog`.
    ///
    /// Takes the catalog explicitly so callers commit while still holding
    /// their write guard.
    pub fn commit(&self, catalog: &Catalog) -> Result<()> {
        match &self.data_dir {
            Some(dir) => catalog.save_ratings(dir),
            None => Ok(()),
        }
    }
}
