//! Configuration for closure resolution and migration planning.
//!
//! Load order: `.pakdeps/config.toml` → environment variables → defaults.

use crate::policy::{DEFAULT_EXCLUDED_PREFIXES, ExclusionPolicy};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level pakdeps configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PakdepsConfig {
    pub closure: ClosureConfig,
    pub migration: MigrationConfig,
}

/// Dependency-closure settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClosureConfig {
    /// Dependencies starting with any of these are dropped and not expanded.
    pub excluded_prefixes: Vec<String>,
    /// Compare prefixes case-sensitively. The host editor ignores case.
    pub case_sensitive: bool,
}

/// Migration and saved-copy settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// Content folder packages are migrated into.
    pub destination_root: PathBuf,
    /// Suffix appended to duplicated package names.
    pub saved_suffix: String,
}

impl Default for ClosureConfig {
    fn default() -> Self {
        Self {
            excluded_prefixes: DEFAULT_EXCLUDED_PREFIXES
                .iter()
                .map(|p| (*p).to_string())
                .collect(),
            case_sensitive: false,
        }
    }
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            destination_root: PathBuf::from("Export/Content"),
            saved_suffix: "_Saved".to_string(),
        }
    }
}

impl ClosureConfig {
    /// The configured policy plus `extra` prefixes, each validated like the
    /// configured ones.
    pub fn policy_with(&self, extra: &[String]) -> Result<ExclusionPolicy> {
        let mut policy = self.policy();
        for prefix in extra {
            validate_prefix(prefix)?;
            policy = policy.with_prefix(prefix.clone());
        }
        Ok(policy)
    }

    pub fn policy(&self) -> ExclusionPolicy {
        ExclusionPolicy::new(self.excluded_prefixes.iter().cloned())
            .case_sensitive(self.case_sensitive)
    }
}

/// Excluded prefixes are rooted package paths; anything else never matches.
pub fn validate_prefix(prefix: &str) -> Result<()> {
    if !prefix.starts_with('/') {
        anyhow::bail!("excluded prefix must start with '/': {}", prefix);
    }
    Ok(())
}

/// Helper to parse an env var and apply it to a config field.
fn env_override<T: std::str::FromStr>(var: &str, target: &mut T) {
    if let Ok(v) = std::env::var(var)
        && let Ok(n) = v.parse()
    {
        *target = n;
    }
}

impl PakdepsConfig {
    /// Load config from `.pakdeps/config.toml` in the project root, with env var overrides.
    /// Falls back to defaults if no config file exists.
    pub fn load(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join(".pakdeps").join("config.toml");

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };

        if let Ok(v) = std::env::var("PAKDEPS_EXCLUDED_PREFIXES") {
            config.closure.excluded_prefixes = v
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect();
        }
        env_override(
            "PAKDEPS_CASE_SENSITIVE",
            &mut config.closure.case_sensitive,
        );
        env_override(
            "PAKDEPS_DESTINATION_ROOT",
            &mut config.migration.destination_root,
        );
        env_override("PAKDEPS_SAVED_SUFFIX", &mut config.migration.saved_suffix);

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for prefix in &self.closure.excluded_prefixes {
            validate_prefix(prefix)?;
        }
        if self.migration.saved_suffix.is_empty() {
            anyhow::bail!("saved_suffix must not be empty");
        }
        Ok(())
    }
}
