//! Migration plan: the report of packages to move into an isolated content tree.

use crate::closure::Closure;
use crate::package::PackageId;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    #[error("no files were found to move")]
    NothingToMigrate,
    #[error("package is not part of the migration plan: {0}")]
    NotInPlan(PackageId),
}

/// One row of the migration report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationEntry {
    pub package: PackageId,
    /// Destination relative to the plan's content root, without extension.
    pub destination: PathBuf,
    pub migrate: bool,
}

/// Packages to migrate, sorted by package id.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationPlan {
    pub destination_root: PathBuf,
    pub entries: Vec<MigrationEntry>,
}

impl MigrationPlan {
    /// Build a plan covering every package in the closure, seeds included.
    ///
    /// A package's root scope is replaced by `destination_root`:
    /// `/Game/Props/Crate` → `<destination_root>/Props/Crate`.
    pub fn from_closure(
        closure: &Closure,
        destination_root: impl AsRef<Path>,
    ) -> Result<Self, MigrateError> {
        if closure.is_empty() {
            return Err(MigrateError::NothingToMigrate);
        }
        let destination_root = destination_root.as_ref().to_path_buf();
        let entries = closure
            .all()
            .iter()
            .map(|package| MigrationEntry {
                destination: destination_root.join(package.relative_to_root()),
                package: package.clone(),
                migrate: true,
            })
            .collect();
        Ok(Self {
            destination_root,
            entries,
        })
    }

    /// Uncheck a package in the report so it is left behind.
    pub fn exclude(&mut self, package: &PackageId) -> Result<(), MigrateError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| &e.package == package)
            .ok_or_else(|| MigrateError::NotInPlan(package.clone()))?;
        entry.migrate = false;
        Ok(())
    }

    pub fn selected(&self) -> impl Iterator<Item = &MigrationEntry> {
        self.entries.iter().filter(|e| e.migrate)
    }

    pub fn selected_count(&self) -> usize {
        self.selected().count()
    }
}
