//! Core types for package dependency-closure resolution.
//!
//! Provides package identifiers ([`package::PackageId`]), the exclusion policy,
//! the dependency oracle seam, the closure resolver ([`closure::ClosureResolver`]),
//! registry snapshots with JSON persistence, and the migration/copy planners
//! that consume a computed closure.

pub mod closure;
pub mod config;
pub mod copies;
pub mod export;
pub mod migrate;
pub mod oracle;
pub mod package;
pub mod policy;
pub mod registry;
pub mod schema;
pub mod storage;
