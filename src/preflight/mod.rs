//! Preflight checks run before anything is written.
//!
//! The pack name doubles as the staging directory name and the archive file
//! name, so it has to be usable as a single path component.
//!
//! # Example
//!
//! ```rust
//! use skinpack_builder::preflight::check_package_name;
//!
//! assert!(check_package_name("Demo").is_ok());
//! assert!(check_package_name("../escape").is_err());
//! ```

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

use crate::error::PackError;

/// Check that `name` can be used as a directory and file name.
pub fn check_package_name(name: &str) -> Result<()> {
    let reason = if name.trim().is_empty() {
        Some("name is empty")
    } else if name != name.trim() {
        Some("name has leading or trailing whitespace")
    } else if name == "." || name == ".." {
        Some("name is a relative directory reference")
    } else if name.contains(['/', '\\']) {
        Some("name contains a path separator")
    } else if name.chars().any(char::is_control) {
        Some("name contains control characters")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(PackError::InvalidName(name.to_string(), reason).into()),
        None => Ok(()),
    }
}

/// Check that the texture source is an existing directory.
pub fn check_source_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    Err(PackError::MissingSource(dir.to_path_buf()).into())
}

/// Check that the staging directory is neither `source` nor one of its
/// ancestors.
///
/// `staging` usually does not exist yet, so its parent is resolved instead
/// and the final component appended. A staging directory inside `source` is
/// fine.
pub fn check_staging_dir(staging: &Path, source: &Path) -> Result<()> {
    let source_abs = source
        .canonicalize()
        .with_context(|| format!("resolving source directory '{}'", source.display()))?;
    let staging_abs = resolve_maybe_missing(staging)?;

    if source_abs.starts_with(&staging_abs) {
        return Err(PackError::StagingOverlapsSource {
            staging: staging_abs,
            source_dir: source_abs,
        }
        .into());
    }
    Ok(())
}

fn resolve_maybe_missing(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return path
            .canonicalize()
            .with_context(|| format!("resolving '{}'", path.display()));
    }
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let name = path
        .file_name()
        .ok_or_else(|| anyhow!("'{}' has no final component", path.display()))?;
    let parent_abs = parent
        .canonicalize()
        .with_context(|| format!("resolving output directory '{}'", parent.display()))?;
    Ok(parent_abs.join(name))
}
