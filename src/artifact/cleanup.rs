//! Removal of the staging directory.

use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Remove the staged tree at `root`.
///
/// Removing a tree that is already gone succeeds. Callers treat any other
/// failure as a warning: by the time cleanup runs the archive either exists or
/// the run has already failed for another reason.
pub fn remove(root: &Path) -> Result<()> {
    match fs::remove_dir_all(root) {
        Ok(()) => {
            tracing::info!("removed temporary directory: {}", root.display());
            Ok(())
        }
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err)
            .with_context(|| format!("removing temporary directory '{}'", root.display())),
    }
}
