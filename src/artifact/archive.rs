//! Zip the staged tree into the `.mcpack` the game imports.
//!
//! Entry names are paths relative to the staging root with `/` separators.
//! The game reads them directly, so the layout written by the stager is the
//! layout inside the archive. Only the files the stager recorded are packed;
//! anything else lying in the staging directory stays out.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::filesystem::atomic_move;
use super::stage::StagedTree;

/// Extension of a Bedrock skin pack archive.
pub const PACK_EXTENSION: &str = "mcpack";

/// `<package_name>.mcpack`
pub fn archive_filename(package_name: &str) -> String {
    format!("{package_name}.{PACK_EXTENSION}")
}

/// Write the files of `staged` into a deflated zip at `out_path`.
///
/// The archive is built next to `out_path` and moved into place once
/// complete, so a failure never leaves a file at `out_path`. Returns the
/// number of entries written.
pub fn archive(staged: &StagedTree, out_path: &Path) -> Result<usize> {
    let partial = partial_path(out_path);
    let result = write_zip(staged, &partial).and_then(|count| {
        atomic_move(&partial, out_path)?;
        Ok(count)
    });
    if result.is_err() && partial.exists() {
        if let Err(rm_err) = fs::remove_file(&partial) {
            tracing::warn!(
                "failed to remove partial archive '{}': {rm_err}",
                partial.display()
            );
        }
    }
    result
}

fn partial_path(out_path: &Path) -> PathBuf {
    let mut name = out_path.as_os_str().to_os_string();
    name.push(".partial");
    PathBuf::from(name)
}

fn write_zip(staged: &StagedTree, out_path: &Path) -> Result<usize> {
    let out = File::create(out_path)
        .with_context(|| format!("Failed to create {}", out_path.display()))?;
    let mut writer = ZipWriter::new(out);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    // Deterministic entry order.
    let mut files: Vec<&Path> = staged.files().iter().map(PathBuf::as_path).collect();
    files.sort();

    for rel_path in &files {
        let rel = entry_name(rel_path);
        let path = staged.root().join(rel_path);
        writer
            .start_file(rel.as_str(), options)
            .with_context(|| format!("starting archive entry '{rel}'"))?;
        let mut file =
            File::open(&path).with_context(|| format!("Failed to open {}", path.display()))?;
        io::copy(&mut file, &mut writer)
            .with_context(|| format!("writing archive entry '{rel}'"))?;
        tracing::info!("added to .{PACK_EXTENSION}: {rel}");
    }

    writer
        .finish()
        .with_context(|| format!("finalizing archive '{}'", out_path.display()))?;
    Ok(files.len())
}

fn entry_name(rel_path: &Path) -> String {
    rel_path.to_string_lossy().replace('\\', "/")
}

/// Hex SHA-256 of a finished archive, reported alongside the pack.
pub fn sha256_file(path: &Path) -> Result<String> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = reader
            .read(&mut buf)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}
