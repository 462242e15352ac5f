//! The dependency oracle: "what does package P directly reference?"

use crate::package::PackageId;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("unknown package: {0}")]
    UnknownPackage(PackageId),
    #[error("dependency lookup unavailable: {0}")]
    Unavailable(String),
}

/// Answers direct-dependency queries, discovered lazily during traversal.
pub trait DependencyOracle {
    fn direct_dependencies(&self, package: &PackageId) -> Result<Vec<PackageId>, OracleError>;
}

impl<T: DependencyOracle + ?Sized> DependencyOracle for &T {
    fn direct_dependencies(&self, package: &PackageId) -> Result<Vec<PackageId>, OracleError> {
        (**self).direct_dependencies(package)
    }
}

impl DependencyOracle for HashMap<PackageId, Vec<PackageId>> {
    fn direct_dependencies(&self, package: &PackageId) -> Result<Vec<PackageId>, OracleError> {
        self.get(package)
            .cloned()
            .ok_or_else(|| OracleError::UnknownPackage(package.clone()))
    }
}

impl DependencyOracle for BTreeMap<PackageId, Vec<PackageId>> {
    fn direct_dependencies(&self, package: &PackageId) -> Result<Vec<PackageId>, OracleError> {
        self.get(package)
            .cloned()
            .ok_or_else(|| OracleError::UnknownPackage(package.clone()))
    }
}

/// Adapts a closure into an oracle.
pub struct FnOracle<F>(pub F);

impl<F> DependencyOracle for FnOracle<F>
where
    F: Fn(&PackageId) -> Result<Vec<PackageId>, OracleError>,
{
    fn direct_dependencies(&self, package: &PackageId) -> Result<Vec<PackageId>, OracleError> {
        (self.0)(package)
    }
}
