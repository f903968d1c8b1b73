//! # File I/O Module
//!
//! Handles project file operations with safety features:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Version validation**: Ensure schema compatibility
//!
//! ## File Format
//!
//! Projects are saved as `.json` files containing the serialized
//! [`Project`](crate::project::Project).
//!
//! ## Example
//!
//! ```rust,no_run
//! use roof_core::file_io::{save_project, load_project};
//! use roof_core::project::Project;
//! use std::path::Path;
//!
//! let project = Project::new("Smith residence");
//! let path = Path::new("myroof.json");
//!
//! // Save with atomic write
//! save_project(&project, path).unwrap();
//!
//! let loaded = load_project(path).unwrap();
//! assert_eq!(loaded.meta.name, "Smith residence");
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::errors::{RoofError, RoofResult};
use crate::project::{Project, SCHEMA_VERSION};

/// Save a project to a file with atomic write semantics.
///
/// The save process:
/// 1. Serialize project to JSON
/// 2. Write to a temporary file (.tmp)
/// 3. Sync to disk (fsync)
/// 4. Rename .tmp to the final name (atomic on most filesystems)
///
/// This prevents corruption if the process is interrupted during write.
///
/// # Example
///
/// ```rust,no_run
/// use roof_core::file_io::save_project;
/// use roof_core::project::Project;
/// use std::path::Path;
///
/// let project = Project::new("Smith residence");
/// save_project(&project, Path::new("myroof.json"))?;
/// # Ok::<(), roof_core::errors::RoofError>(())
/// ```
pub fn save_project(project: &Project, path: &Path) -> RoofResult<()> {
    let json = serde_json::to_string_pretty(project).map_err(|e| RoofError::SerializationError {
        reason: e.to_string(),
    })?;

    let tmp_path = path.with_extension("json.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        RoofError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        RoofError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        RoofError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        // Clean up temp file if rename fails
        let _ = fs::remove_file(&tmp_path);
        RoofError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Load a project from a file.
///
/// # Returns
///
/// * `Ok(Project)` - Successfully loaded project
/// * `Err(RoofError::VersionMismatch)` - File version is incompatible
/// * `Err(RoofError::SerializationError)` - Invalid JSON
/// * `Err(RoofError::FileError)` - I/O error
pub fn load_project(path: &Path) -> RoofResult<Project> {
    let mut file = File::open(path)
        .map_err(|e| RoofError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| RoofError::file_error("read", path.display().to_string(), e.to_string()))?;

    let project: Project =
        serde_json::from_str(&contents).map_err(|e| RoofError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    validate_version(&project.meta.version)?;

    Ok(project)
}

/// Path for the silently auto-saved "last used" project.
///
/// Lives under the platform data directory (`APPDATA` on Windows,
/// `$XDG_DATA_HOME` or `~/.local/share` elsewhere) in a `roof-takeoff`
/// subdirectory, which is created if missing.
pub fn last_project_path() -> RoofResult<PathBuf> {
    let base = data_dir().ok_or_else(|| {
        RoofError::file_error(
            "resolve data dir",
            "last project".to_string(),
            "No data directory available (HOME/APPDATA not set)".to_string(),
        )
    })?;

    let app_dir = base.join("roof-takeoff");
    fs::create_dir_all(&app_dir).map_err(|e| {
        RoofError::file_error("create data dir", app_dir.display().to_string(), e.to_string())
    })?;

    Ok(app_dir.join("LastProject.json"))
}

fn data_dir() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        std::env::var_os("APPDATA").map(PathBuf::from)
    }
    #[cfg(not(windows))]
    {
        std::env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".local/share"))
            })
    }
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> RoofResult<()> {
    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(RoofError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(RoofError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }

    // For 0.x versions, a newer minor version is a breaking change
    if current_parts[0] == 0 && file_parts.len() > 1 && current_parts.len() > 1 {
        if file_parts[1] > current_parts[1] {
            return Err(RoofError::VersionMismatch {
                file_version: file_version.to_string(),
                expected_version: SCHEMA_VERSION.to_string(),
            });
        }
    }

    Ok(())
}
