//! Read/write registry snapshots from disk.

use crate::registry::Registry;
use crate::schema;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const PAKDEPS_DIR: &str = ".pakdeps";
const REGISTRY_FILE: &str = "registry.json";

/// Get the path to the pakdeps directory for a given project root.
pub fn pakdeps_dir(project_root: &Path) -> PathBuf {
    project_root.join(PAKDEPS_DIR)
}

/// Get the path to the registry snapshot for a given project root.
pub fn registry_file(project_root: &Path) -> PathBuf {
    pakdeps_dir(project_root).join(REGISTRY_FILE)
}

/// Check if a registry snapshot exists for the given project root.
pub fn registry_exists(project_root: &Path) -> bool {
    registry_file(project_root).exists()
}

/// Load the project's registry snapshot.
pub fn load(project_root: &Path) -> Result<Registry> {
    load_from(&registry_file(project_root))
}

/// Load a registry snapshot from an explicit file.
pub fn load_from(path: &Path) -> Result<Registry> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read registry from {}", path.display()))?;
    schema::from_json(&json)
}

/// Save the project's registry snapshot, creating the .pakdeps directory if needed.
pub fn save(project_root: &Path, registry: &Registry) -> Result<()> {
    save_to(&registry_file(project_root), registry)
}

/// Save a registry snapshot to an explicit file, creating parent directories.
pub fn save_to(path: &Path, registry: &Registry) -> Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
    }

    let json = schema::to_json(registry)?;
    fs::write(path, json)
        .with_context(|| format!("failed to write registry to {}", path.display()))?;

    Ok(())
}
