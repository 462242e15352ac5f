//! Saved-copy planning: which packages get a suffixed duplicate before export.

use crate::closure::Closure;
use crate::package::PackageId;
use serde::Serialize;
use std::collections::BTreeSet;

pub const DEFAULT_SAVED_SUFFIX: &str = "_Saved";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedCopy {
    pub source: PackageId,
    pub copy: PackageId,
}

/// Plans duplicates, never copying a package twice or copying a copy.
#[derive(Debug, Clone)]
pub struct CopyPlanner {
    suffix: String,
    planned: BTreeSet<String>,
    copies: Vec<SavedCopy>,
}

impl Default for CopyPlanner {
    fn default() -> Self {
        Self::new(DEFAULT_SAVED_SUFFIX)
    }
}

impl CopyPlanner {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            planned: BTreeSet::new(),
            copies: Vec::new(),
        }
    }

    /// Plan a copy of `source`. Returns `None` when `source`, or `source` with
    /// every occurrence of the suffix removed, has already been planned.
    pub fn plan(&mut self, source: &PackageId) -> Option<SavedCopy> {
        let name = source.as_str();
        let unsuffixed = name.replace(&self.suffix, "");
        if self.planned.contains(name) || self.planned.contains(&unsuffixed) {
            tracing::debug!("copy of {} already planned", source);
            return None;
        }

        let copy = SavedCopy {
            source: source.clone(),
            copy: PackageId::new(format!("{}{}", name, self.suffix)),
        };
        self.planned.insert(name.to_string());
        self.copies.push(copy.clone());
        Some(copy)
    }

    /// Plan every package of a closure, seeds included. Returns the newly planned copies.
    pub fn plan_closure(&mut self, closure: &Closure) -> Vec<SavedCopy> {
        closure
            .all()
            .iter()
            .filter_map(|package| self.plan(package))
            .collect()
    }

    pub fn copies(&self) -> &[SavedCopy] {
        &self.copies
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}
