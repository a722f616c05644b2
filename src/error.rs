//! Failure conditions callers need to tell apart.
//!
//! Everything else travels as a plain `anyhow::Error` with context. These
//! variants are raised through anyhow as well and can be recovered with
//! `err.downcast_ref::<PackError>()`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackError {
    /// The source directory holds no `.png` textures. Nothing was written.
    #[error("no .png textures found in '{}'; add some textures and try again", .0.display())]
    NoTextures(PathBuf),

    /// The pack name cannot be used as a directory and file name.
    #[error("invalid pack name '{0}': {1}")]
    InvalidName(String, &'static str),

    /// The source directory does not exist or is not a directory.
    #[error("source directory '{}' does not exist or is not a directory", .0.display())]
    MissingSource(PathBuf),

    /// The staging directory would be the source directory or contain it.
    /// Staging there would overwrite the textures and cleanup would delete them.
    #[error(
        "staging directory '{}' overlaps source directory '{}'; choose another pack name or texture directory",
        .staging.display(),
        .source_dir.display()
    )]
    StagingOverlapsSource { staging: PathBuf, source_dir: PathBuf },
}
