//! Package identifiers: hierarchical, path-like content names.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Opaque path-like package name, e.g. `/Game/Meshes/Crate`.
///
/// Identity is exact and case-sensitive: `/Game/Tex` and `/game/tex` are two
/// packages. Only prefix tests (see [`starts_with`](Self::starts_with)) may
/// ignore case. Snapshots are expected to carry the registry's canonical
/// spelling.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageId(String);

impl PackageId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The mount point this package lives under: the first `/`-delimited
    /// segment, re-prefixed with `/`.
    ///
    /// `/Game/Foo/Bar` → `/Game`. A package with no second segment (`/Game`)
    /// has the empty segment as its root, so the scope is `/` and admits
    /// every rooted path.
    pub fn root_scope(&self) -> String {
        let path = self.0.strip_prefix('/').unwrap_or(&self.0);
        match path.split_once('/') {
            Some((first, _)) => format!("/{}", first),
            None => "/".to_string(),
        }
    }

    /// Path below the root scope: `/Game/Foo/Bar` → `Foo/Bar`.
    pub fn relative_to_root(&self) -> &str {
        let path = self.0.strip_prefix('/').unwrap_or(&self.0);
        match path.split_once('/') {
            Some((_, rest)) => rest,
            None => path,
        }
    }

    /// Plain string-prefix test, optionally ignoring ASCII case.
    pub fn starts_with(&self, prefix: &str, case_sensitive: bool) -> bool {
        if case_sensitive {
            return self.0.starts_with(prefix);
        }
        self.0
            .as_bytes()
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix.as_bytes()))
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PackageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PackageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for PackageId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl AsRef<str> for PackageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PackageId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
