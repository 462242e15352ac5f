//! JSON schema validation and version handling for registry snapshots.

use crate::registry::Registry;
use anyhow::{Context, Result};

pub const CURRENT_VERSION: &str = "1.0.0";

/// Validate a snapshot's schema version.
pub fn validate_version(registry: &Registry) -> Result<()> {
    if registry.version != CURRENT_VERSION {
        anyhow::bail!(
            "registry version mismatch: expected {}, found {}",
            CURRENT_VERSION,
            registry.version
        );
    }
    Ok(())
}

/// Serialize a snapshot to a pretty-printed JSON string.
pub fn to_json(registry: &Registry) -> Result<String> {
    serde_json::to_string_pretty(registry).context("failed to serialize registry to JSON")
}

/// Deserialize a snapshot from a JSON string.
pub fn from_json(json: &str) -> Result<Registry> {
    let registry: Registry =
        serde_json::from_str(json).context("failed to deserialize registry from JSON")?;
    validate_version(&registry)?;
    Ok(registry)
}
