//! Exclusion policy applied to every discovered dependency.

use crate::package::PackageId;
use serde::{Deserialize, Serialize};

/// Prefixes of engine-internal and script/reflection packages.
pub const DEFAULT_EXCLUDED_PREFIXES: &[&str] = &["/Engine", "/Script"];

/// Outcome of testing one dependency against the policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Admitted,
    /// Matched an excluded prefix (the prefix is carried for logging).
    Excluded(String),
    /// Outside the root scope of the seed being expanded.
    OutOfRoot,
}

/// Which dependencies may join a closure.
///
/// Prefix tests are plain string-prefix tests: `/GameData/X` is inside the
/// `/Game` root. Matching ignores ASCII case unless `case_sensitive` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionPolicy {
    prefixes: Vec<String>,
    case_sensitive: bool,
}

impl Default for ExclusionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_PREFIXES.iter().copied())
    }
}

impl ExclusionPolicy {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
            case_sensitive: false,
        }
    }

    /// A policy that only applies root scoping.
    pub fn none() -> Self {
        Self::new(std::iter::empty::<String>())
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.push(prefix.into());
        self
    }

    #[must_use]
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// The first excluded prefix `package` starts with, if any.
    pub fn excluded_by(&self, package: &PackageId) -> Option<&str> {
        self.prefixes
            .iter()
            .find(|p| package.starts_with(p, self.case_sensitive))
            .map(String::as_str)
    }

    pub fn is_excluded(&self, package: &PackageId) -> bool {
        self.excluded_by(package).is_some()
    }

    /// Excluded prefixes are tested first, then the root scope.
    pub fn check(&self, package: &PackageId, root: &str) -> Verdict {
        if let Some(prefix) = self.excluded_by(package) {
            return Verdict::Excluded(prefix.to_string());
        }
        if !package.starts_with(root, self.case_sensitive) {
            return Verdict::OutOfRoot;
        }
        Verdict::Admitted
    }

    pub fn admits(&self, package: &PackageId, root: &str) -> bool {
        self.check(package, root) == Verdict::Admitted
    }
}
