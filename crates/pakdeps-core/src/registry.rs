//! Registry snapshot: a persisted copy of the host asset registry's
//! direct-dependency answers, used as the oracle outside the editor.

use crate::oracle::{DependencyOracle, OracleError};
use crate::package::PackageId;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use globset::GlobBuilder;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Package → direct dependencies, as reported by the asset registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registry {
    pub version: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Free-form label of the content tree the snapshot was taken from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub packages: BTreeMap<PackageId, Vec<PackageId>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            version: crate::schema::CURRENT_VERSION.to_string(),
            created_at: now,
            updated_at: now,
            source: None,
            packages: BTreeMap::new(),
        }
    }

    /// Register a package, replacing any previous dependency list.
    pub fn insert_package(
        &mut self,
        package: impl Into<PackageId>,
        dependencies: impl IntoIterator<Item = PackageId>,
    ) {
        self.packages
            .insert(package.into(), dependencies.into_iter().collect());
    }

    /// Append one edge, creating the source entry if needed. Duplicate edges are ignored.
    pub fn add_dependency(&mut self, from: impl Into<PackageId>, to: impl Into<PackageId>) {
        let to = to.into();
        let deps = self.packages.entry(from.into()).or_default();
        if !deps.contains(&to) {
            deps.push(to);
        }
    }

    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    pub fn dependency_count(&self) -> usize {
        self.packages.values().map(Vec::len).sum()
    }

    /// Packages grouped by root scope, with their counts.
    pub fn roots(&self) -> BTreeMap<String, usize> {
        let mut roots = BTreeMap::new();
        for id in self.packages.keys() {
            *roots.entry(id.root_scope()).or_insert(0) += 1;
        }
        roots
    }

    /// Dependency targets that have no entry of their own, with the packages
    /// referencing them.
    pub fn dangling_references(&self) -> BTreeMap<PackageId, BTreeSet<PackageId>> {
        let mut dangling: BTreeMap<PackageId, BTreeSet<PackageId>> = BTreeMap::new();
        for (from, deps) in &self.packages {
            for dep in deps {
                if !self.packages.contains_key(dep) {
                    dangling.entry(dep.clone()).or_default().insert(from.clone());
                }
            }
        }
        dangling
    }

    /// Packages whose id matches `pattern`. `*` stays within one path segment,
    /// `**` crosses segments.
    pub fn select(&self, pattern: &str) -> Result<Vec<PackageId>> {
        let matcher = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .with_context(|| format!("invalid package pattern: {}", pattern))?
            .compile_matcher();
        Ok(self
            .packages
            .keys()
            .filter(|id| matcher.is_match(id.as_str()))
            .cloned()
            .collect())
    }
}

impl DependencyOracle for Registry {
    fn direct_dependencies(&self, package: &PackageId) -> Result<Vec<PackageId>, OracleError> {
        self.packages
            .get(package)
            .cloned()
            .ok_or_else(|| OracleError::UnknownPackage(package.clone()))
    }
}
