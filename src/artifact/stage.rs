//! Staging: lay out the pack on disk exactly as it will appear in the archive.
//!
//! ```text
//! <root>/
//!   manifest.json
//!   skins.json
//!   texts/en_US.lang
//!   <texture>.png ...
//! ```

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::filesystem::{copy_file, write_file};
use crate::catalog::CatalogEntry;
use crate::document::{to_pretty_json, Catalog, LocalizationTable, PackageHeader};

pub const MANIFEST_FILENAME: &str = "manifest.json";
pub const SKINS_FILENAME: &str = "skins.json";
pub const TEXTS_DIRNAME: &str = "texts";
pub const LANG_FILENAME: &str = "en_US.lang";

/// Everything the stager writes.
#[derive(Debug)]
pub struct StageInputs<'a> {
    pub header: &'a PackageHeader,
    pub catalog: &'a Catalog,
    pub localization: &'a LocalizationTable,
    /// Directory the textures named by `entries` are copied from.
    pub source_dir: &'a Path,
    pub entries: &'a [CatalogEntry],
}

/// A populated staging directory.
///
/// The tree is owned by the current run. It is not removed on drop; call
/// [`super::cleanup::remove`] once the archive has been written.
#[derive(Debug, Clone)]
pub struct StagedTree {
    root: PathBuf,
    files: Vec<PathBuf>,
}

impl StagedTree {
    /// Wrap an already-populated tree. `files` are relative to `root`.
    pub fn new(root: impl Into<PathBuf>, files: Vec<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Paths relative to the root, in the order they were written.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }
}

/// Path of the localization file relative to the staging root.
pub fn lang_relative_path() -> PathBuf {
    Path::new(TEXTS_DIRNAME).join(LANG_FILENAME)
}

/// Materialize the pack under `root`.
///
/// A pre-existing `root` is reused. Files already in it that this run does
/// not write are reported and left out of [`StagedTree::files`]. On error
/// the partially written tree is left in place for cleanup.
pub fn stage(root: &Path, inputs: &StageInputs<'_>) -> Result<StagedTree> {
    let leftovers = existing_files(root)?;
    fs::create_dir_all(root)
        .with_context(|| format!("creating staging directory '{}'", root.display()))?;
    tracing::info!("created output directory: {}", root.display());

    let mut files = Vec::with_capacity(inputs.entries.len() + 3);

    let manifest_path = root.join(MANIFEST_FILENAME);
    write_file(&manifest_path, to_pretty_json(inputs.header)?)?;
    tracing::info!("saved {MANIFEST_FILENAME} to: {}", manifest_path.display());
    files.push(PathBuf::from(MANIFEST_FILENAME));

    let skins_path = root.join(SKINS_FILENAME);
    write_file(&skins_path, to_pretty_json(inputs.catalog)?)?;
    tracing::info!("saved {SKINS_FILENAME} to: {}", skins_path.display());
    files.push(PathBuf::from(SKINS_FILENAME));

    let lang_rel = lang_relative_path();
    let lang_path = root.join(&lang_rel);
    write_file(&lang_path, inputs.localization.render())?;
    tracing::info!("saved {LANG_FILENAME} to: {}", lang_path.display());
    files.push(lang_rel);

    for entry in inputs.entries {
        let src = inputs.source_dir.join(&entry.texture);
        let dst = root.join(&entry.texture);
        copy_file(&src, &dst)?;
        tracing::info!("copied texture: {} to {}", entry.texture, dst.display());
        files.push(PathBuf::from(&entry.texture));
    }

    for stale in leftovers.iter().filter(|rel| !files.contains(*rel)) {
        tracing::warn!(
            "ignoring leftover file in staging directory: {}",
            stale.display()
        );
    }

    Ok(StagedTree::new(root, files))
}

/// Regular files already under `root`, relative to it.
fn existing_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Ok(Vec::new());
    }
    let mut found = Vec::new();
    for ent in WalkDir::new(root).follow_links(false) {
        let ent =
            ent.with_context(|| format!("scanning staging directory '{}'", root.display()))?;
        if !ent.file_type().is_file() {
            continue;
        }
        if let Ok(rel) = ent.path().strip_prefix(root) {
            found.push(rel.to_path_buf());
        }
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{build_catalog, build_header, build_localization, PackVersion};
    use tempfile::TempDir;
    use uuid::Uuid;

    fn fixture(temp: &TempDir) -> (PathBuf, Vec<CatalogEntry>) {
        let source = temp.path().join("src");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("red_cape.png"), b"\x89PNG red").unwrap();
        fs::write(source.join("blue-hat.png"), b"\x89PNG blue").unwrap();
        let entries = crate::catalog::discover(&source, "Demo").unwrap();
        (source, entries)
    }

    #[test]
    fn test_stage_writes_full_layout() {
        let temp = TempDir::new().unwrap();
        let (source, entries) = fixture(&temp);
        let header = build_header("Demo", PackVersion::new(2, 1, 0), Uuid::new_v4(), Uuid::new_v4());
        let catalog = build_catalog("Demo", &entries);
        let localization = build_localization("Demo", &entries);
        let root = temp.path().join("Demo");

        let staged = stage(
            &root,
            &StageInputs {
                header: &header,
                catalog: &catalog,
                localization: &localization,
                source_dir: &source,
                entries: &entries,
            },
        )
        .unwrap();

        assert_eq!(staged.root(), root.as_path());
        assert_eq!(staged.files().len(), 5);
        assert!(root.join("manifest.json").is_file());
        assert!(root.join("skins.json").is_file());
        assert_eq!(
            fs::read_to_string(root.join("texts/en_US.lang")).unwrap(),
            localization.render()
        );
        assert_eq!(fs::read(root.join("red_cape.png")).unwrap(), b"\x89PNG red");
        assert_eq!(fs::read(root.join("blue-hat.png")).unwrap(), b"\x89PNG blue");

        let manifest: PackageHeader =
            serde_json::from_slice(&fs::read(root.join("manifest.json")).unwrap()).unwrap();
        assert_eq!(manifest, header);
    }

    #[test]
    fn test_stage_reuses_existing_root() {
        let temp = TempDir::new().unwrap();
        let (source, entries) = fixture(&temp);
        let header = build_header("Demo", PackVersion::default(), Uuid::new_v4(), Uuid::new_v4());
        let catalog = build_catalog("Demo", &entries);
        let localization = build_localization("Demo", &entries);
        let root = temp.path().join("Demo");
        fs::create_dir_all(root.join("texts")).unwrap();
        fs::write(root.join("removed_skin.png"), b"old").unwrap();
        fs::write(root.join("texts/de_DE.lang"), b"old").unwrap();

        let inputs = StageInputs {
            header: &header,
            catalog: &catalog,
            localization: &localization,
            source_dir: &source,
            entries: &entries,
        };
        let staged = stage(&root, &inputs).unwrap();

        assert_eq!(staged.files().len(), 5);
        assert!(!staged.files().contains(&PathBuf::from("removed_skin.png")));
        assert!(!staged.files().contains(&Path::new("texts").join("de_DE.lang")));
    }

    #[test]
    fn test_stage_missing_texture_fails() {
        let temp = TempDir::new().unwrap();
        let (source, entries) = fixture(&temp);
        fs::remove_file(source.join("red_cape.png")).unwrap();
        let header = build_header("Demo", PackVersion::default(), Uuid::new_v4(), Uuid::new_v4());
        let catalog = build_catalog("Demo", &entries);
        let localization = build_localization("Demo", &entries);

        let inputs = StageInputs {
            header: &header,
            catalog: &catalog,
            localization: &localization,
            source_dir: &source,
            entries: &entries,
        };
        assert!(stage(&temp.path().join("Demo"), &inputs).is_err());
    }
}
