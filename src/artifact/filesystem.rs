//! Filesystem helpers shared by the staging and archiving steps.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Write `contents` to `path`, creating missing parent directories.
pub fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

/// Copy a single file byte-for-byte, returning the number of bytes copied.
pub fn copy_file(src: &Path, dst: &Path) -> Result<u64> {
    fs::copy(src, dst)
        .with_context(|| format!("Failed to copy {} to {}", src.display(), dst.display()))
}

/// Move a file by renaming, with fallback to copy+delete.
///
/// Used to put a finished archive in place only once it is complete.
pub fn atomic_move(src: &Path, dst: &Path) -> Result<()> {
    match fs::rename(src, dst) {
        Ok(()) => Ok(()),
        Err(_) => {
            // Different filesystem
            fs::copy(src, dst)
                .with_context(|| format!("Failed to copy {} to {}", src.display(), dst.display()))?;
            fs::remove_file(src)
                .with_context(|| format!("Failed to remove {}", src.display()))?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_file_creates_parents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("texts/nested/en_US.lang");

        write_file(&path, "key=value\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "key=value\n");
    }

    #[test]
    fn test_copy_file_is_byte_exact() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("skin.png");
        let dst = temp.path().join("copy.png");
        let payload: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
        fs::write(&src, &payload).unwrap();

        let copied = copy_file(&src, &dst).unwrap();

        assert_eq!(copied, payload.len() as u64);
        assert_eq!(fs::read(&dst).unwrap(), payload);
    }

    #[test]
    fn test_copy_file_missing_source_errors() {
        let temp = TempDir::new().unwrap();
        let err = copy_file(&temp.path().join("nope.png"), &temp.path().join("x.png"));
        assert!(err.is_err());
    }

    #[test]
    fn test_atomic_move() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src.txt");
        let dst = temp.path().join("dst.txt");

        fs::write(&src, "content").unwrap();
        atomic_move(&src, &dst).unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read_to_string(&dst).unwrap(), "content");
    }
}
