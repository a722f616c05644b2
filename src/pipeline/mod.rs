//! End-to-end pack assembly.
//!
//! ```text
//! preflight -> discover -> ids -> documents -> stage -> archive -> cleanup
//! ```
//!
//! Zero textures stops the run before anything touches the disk. Once staging
//! has started, the staging directory is removed whether or not the run
//! succeeds; a failed removal is only a warning.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::artifact::{archive, cleanup, stage};
use crate::catalog;
use crate::document::{self, PackVersion};
use crate::error::PackError;
use crate::identity::new_id;
use crate::preflight;

/// Inputs for one run.
#[derive(Debug, Clone)]
pub struct PackRequest {
    pub name: String,
    /// Raw `x.y.z` text; malformed input falls back to `1.0.0`.
    pub version_input: String,
    /// Directory scanned for textures.
    pub source_dir: PathBuf,
    /// Directory receiving the staging tree and the final archive.
    pub output_dir: PathBuf,
}

impl PackRequest {
    /// Scan and write in the same directory, as the interactive tool does.
    pub fn in_dir(name: impl Into<String>, version_input: impl Into<String>, dir: &Path) -> Self {
        Self {
            name: name.into(),
            version_input: version_input.into(),
            source_dir: dir.to_path_buf(),
            output_dir: dir.to_path_buf(),
        }
    }

    pub fn staging_dir(&self) -> PathBuf {
        self.output_dir.join(&self.name)
    }

    pub fn archive_path(&self) -> PathBuf {
        self.output_dir.join(archive::archive_filename(&self.name))
    }
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct PackOutcome {
    pub archive_path: PathBuf,
    pub archive_sha256: String,
    pub version: PackVersion,
    /// The version input was rejected and `1.0.0` was used instead.
    pub version_defaulted: bool,
    pub skin_count: usize,
    pub entries_written: usize,
    /// Set when the staging directory could not be removed.
    pub cleanup_warning: Option<String>,
}

/// Build `<output_dir>/<name>.mcpack` from the textures in `source_dir`.
pub fn run(request: &PackRequest) -> Result<PackOutcome> {
    run_with_cleanup(request, cleanup::remove)
}

fn run_with_cleanup<F>(request: &PackRequest, remove_staging: F) -> Result<PackOutcome>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let name = request.name.as_str();
    tracing::info!("skin pack name: {name}");
    preflight::check_package_name(name)?;
    preflight::check_source_dir(&request.source_dir)?;
    let staging_dir = request.staging_dir();
    preflight::check_staging_dir(&staging_dir, &request.source_dir)?;

    tracing::info!("version input: {}", request.version_input);
    let parsed = document::parse_version(&request.version_input);

    let entries = catalog::discover(&request.source_dir, name)?;
    if entries.is_empty() {
        tracing::error!("no .png files found in '{}'", request.source_dir.display());
        return Err(PackError::NoTextures(request.source_dir.clone()).into());
    }
    tracing::info!("found {} texture(s)", entries.len());

    let header = document::build_header(name, parsed.version, new_id(), new_id());
    let skins = document::build_catalog(name, &entries);
    let localization = document::build_localization(name, &entries);

    let archive_path = request.archive_path();
    let inputs = stage::StageInputs {
        header: &header,
        catalog: &skins,
        localization: &localization,
        source_dir: &request.source_dir,
        entries: &entries,
    };

    tracing::info!(
        "creating .{} file: {}",
        archive::PACK_EXTENSION,
        archive_path.display()
    );
    let built = stage::stage(&staging_dir, &inputs)
        .and_then(|staged| archive::archive(&staged, &archive_path));

    tracing::info!("cleaning up temporary files...");
    let cleanup_warning = match remove_staging(&staging_dir) {
        Ok(()) => None,
        Err(err) => {
            tracing::warn!("error during cleanup: {err:#}");
            Some(format!("{err:#}"))
        }
    };

    let entries_written = built?;
    let archive_sha256 = archive::sha256_file(&archive_path)?;
    tracing::info!(
        "skin pack '{name}' created successfully: {} (sha256 {archive_sha256})",
        archive_path.display()
    );

    Ok(PackOutcome {
        archive_path,
        archive_sha256,
        version: parsed.version,
        version_defaulted: parsed.defaulted,
        skin_count: entries.len(),
        entries_written,
        cleanup_warning,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Catalog, PackageHeader};
    use std::fs::{self, File};
    use std::io::Read;
    use tempfile::TempDir;
    use zip::ZipArchive;

    fn read_entry(zip: &mut ZipArchive<File>, name: &str) -> Vec<u8> {
        let mut buf = Vec::new();
        zip.by_name(name).unwrap().read_to_end(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_run_demo_pack() {
        crate::logging::init_test_logging();
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("red_cape.png"), b"red").unwrap();
        fs::write(temp.path().join("blue-hat.png"), b"blue").unwrap();

        let request = PackRequest::in_dir("Demo", "2.1.0", temp.path());
        let outcome = run(&request).unwrap();

        assert_eq!(outcome.archive_path, temp.path().join("Demo.mcpack"));
        assert_eq!(outcome.version, PackVersion::new(2, 1, 0));
        assert!(!outcome.version_defaulted);
        assert_eq!(outcome.skin_count, 2);
        assert_eq!(outcome.entries_written, 5);
        assert!(outcome.cleanup_warning.is_none());
        assert_eq!(outcome.archive_sha256.len(), 64);
        assert!(!temp.path().join("Demo").exists());

        let mut zip = ZipArchive::new(File::open(&outcome.archive_path).unwrap()).unwrap();
        assert_eq!(zip.len(), 5);

        let header: PackageHeader =
            serde_json::from_slice(&read_entry(&mut zip, "manifest.json")).unwrap();
        assert_eq!(header.header.name, "Demo");
        assert_eq!(header.header.version, PackVersion::new(2, 1, 0));
        assert_eq!(header.modules[0].version, PackVersion::new(2, 1, 0));
        assert_ne!(header.header.uuid, header.modules[0].uuid);

        let skins: Catalog = serde_json::from_slice(&read_entry(&mut zip, "skins.json")).unwrap();
        let names: Vec<_> = skins.skins.iter().map(|s| s.localization_name.as_str()).collect();
        assert_eq!(names, vec!["Blue Hat", "Red Cape"]);
        let geometry: Vec<_> = skins.skins.iter().map(|s| s.geometry.as_str()).collect();
        assert_eq!(geometry, vec!["geometry.Demo.Blue Hat", "geometry.Demo.Red Cape"]);
        assert_eq!(skins.serialize_name, "Demo");

        let lang = String::from_utf8(read_entry(&mut zip, "texts/en_US.lang")).unwrap();
        assert_eq!(
            lang,
            "skinpack.Demo=Demo\nskin.Demo.Blue Hat=Blue Hat\nskin.Demo.Red Cape=Red Cape\n"
        );

        assert_eq!(read_entry(&mut zip, "red_cape.png"), b"red");
        assert_eq!(read_entry(&mut zip, "blue-hat.png"), b"blue");
    }

    #[test]
    fn test_archived_documents_reserialize_identically() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("knight.png"), b"k").unwrap();

        let outcome = run(&PackRequest::in_dir("Demo", "1.2.3", temp.path())).unwrap();
        let mut zip = ZipArchive::new(File::open(&outcome.archive_path).unwrap()).unwrap();

        let manifest = read_entry(&mut zip, "manifest.json");
        let header: PackageHeader = serde_json::from_slice(&manifest).unwrap();
        assert_eq!(document::to_pretty_json(&header).unwrap(), manifest);

        let skins = read_entry(&mut zip, "skins.json");
        let catalog: Catalog = serde_json::from_slice(&skins).unwrap();
        assert_eq!(document::to_pretty_json(&catalog).unwrap(), skins);
    }

    #[test]
    fn test_run_bad_version_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("knight.png"), b"k").unwrap();

        let outcome = run(&PackRequest::in_dir("Demo", "abc", temp.path())).unwrap();

        assert!(outcome.version_defaulted);
        assert_eq!(outcome.version, PackVersion::new(1, 0, 0));
    }

    #[test]
    fn test_run_without_textures_writes_nothing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("readme.txt"), b"no textures").unwrap();

        let err = run(&PackRequest::in_dir("Demo", "1.0.0", temp.path())).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<PackError>(),
            Some(PackError::NoTextures(_))
        ));
        assert!(!temp.path().join("Demo").exists());
        assert!(!temp.path().join("Demo.mcpack").exists());
    }

    #[test]
    fn test_run_separate_output_dir() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("textures");
        let output = temp.path().join("dist");
        fs::create_dir_all(&source).unwrap();
        fs::create_dir_all(&output).unwrap();
        fs::write(source.join("knight.png"), b"k").unwrap();

        let request = PackRequest {
            name: "Demo".to_string(),
            version_input: "1.0.0".to_string(),
            source_dir: source.clone(),
            output_dir: output.clone(),
        };
        let outcome = run(&request).unwrap();

        assert_eq!(outcome.archive_path, output.join("Demo.mcpack"));
        assert!(!output.join("Demo").exists());
        assert!(source.join("knight.png").exists());
    }

    #[test]
    fn test_run_failure_still_cleans_staging() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("knight.png"), b"k").unwrap();
        // A directory squatting on the archive path makes the final move fail.
        fs::create_dir_all(temp.path().join("Demo.mcpack/occupied")).unwrap();

        let result = run(&PackRequest::in_dir("Demo", "1.0.0", temp.path()));

        assert!(result.is_err());
        assert!(!temp.path().join("Demo").exists());
        assert!(!temp.path().join("Demo.mcpack.partial").exists());
    }

    #[test]
    fn test_run_rejects_bad_name_before_writing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("knight.png"), b"k").unwrap();

        let err = run(&PackRequest::in_dir("../Demo", "1.0.0", temp.path())).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<PackError>(),
            Some(PackError::InvalidName(..))
        ));
    }

    #[test]
    fn test_run_rejects_staging_over_source() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("MyPack");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("knight.png"), b"precious").unwrap();

        let request = PackRequest {
            name: "MyPack".to_string(),
            version_input: "1.0.0".to_string(),
            source_dir: source.clone(),
            output_dir: temp.path().to_path_buf(),
        };
        let err = run(&request).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<PackError>(),
            Some(PackError::StagingOverlapsSource { .. })
        ));
        assert_eq!(fs::read(source.join("knight.png")).unwrap(), b"precious");
        assert!(!temp.path().join("MyPack.mcpack").exists());
    }

    #[test]
    fn test_run_leftover_staging_files_stay_out_of_archive() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("knight.png"), b"k").unwrap();
        fs::create_dir_all(temp.path().join("Demo")).unwrap();
        fs::write(temp.path().join("Demo/removed_skin.png"), b"old").unwrap();

        let outcome = run(&PackRequest::in_dir("Demo", "1.0.0", temp.path())).unwrap();

        assert_eq!(outcome.skin_count, 1);
        assert_eq!(outcome.entries_written, 4);
        let zip = ZipArchive::new(File::open(&outcome.archive_path).unwrap()).unwrap();
        let mut names: Vec<_> = zip.file_names().map(str::to_string).collect();
        names.sort();
        assert_eq!(
            names,
            vec!["knight.png", "manifest.json", "skins.json", "texts/en_US.lang"]
        );
        assert!(!temp.path().join("Demo").exists());
    }

    #[test]
    fn test_run_cleanup_failure_is_only_a_warning() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("knight.png"), b"k").unwrap();

        let request = PackRequest::in_dir("Demo", "1.0.0", temp.path());
        let outcome = run_with_cleanup(&request, |dir| {
            Err(anyhow::anyhow!("removing '{}': permission denied", dir.display()))
        })
        .unwrap();

        assert!(outcome.archive_path.is_file());
        assert_eq!(outcome.entries_written, 4);
        let warning = outcome.cleanup_warning.unwrap();
        assert!(warning.contains("permission denied"), "{warning}");
        assert!(temp.path().join("Demo").exists());
    }
}
