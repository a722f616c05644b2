//! Build Minecraft Bedrock skin packs from a directory of PNG textures.
//!
//! Each `.png` becomes one skin. The crate synthesizes the pack documents,
//! stages them next to copies of the textures and zips the result into
//! `<name>.mcpack`:
//!
//! ```text
//! <name>.mcpack
//!   manifest.json        package header (name, uuid, version, skin_pack module)
//!   skins.json           one entry per texture
//!   texts/en_US.lang     localization lines
//!   *.png                the textures, byte-for-byte
//! ```
//!
//! # Modules
//!
//! - [`catalog`] - texture discovery and per-skin entries
//! - [`document`] - version parsing, `manifest.json`, `skins.json`, `.lang`
//! - [`identity`] - UUIDs for the manifest
//! - [`artifact`] - staging, archiving, cleanup
//! - [`pipeline`] - the whole run, end to end
//! - [`preflight`] - input checks before anything is written
//! - [`config`] - optional `skinpack.toml` defaults
//! - [`logging`] - subscriber setup for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use skinpack_builder::pipeline::{run, PackRequest};
//! use std::path::Path;
//!
//! let outcome = run(&PackRequest::in_dir("Demo", "2.1.0", Path::new(".")))?;
//! println!("wrote {}", outcome.archive_path.display());
//! ```

pub mod artifact;
pub mod catalog;
pub mod config;
pub mod document;
pub mod error;
pub mod identity;
pub mod logging;
pub mod pipeline;
pub mod preflight;

pub use catalog::CatalogEntry;
pub use document::{Catalog, LocalizationTable, PackVersion, PackageHeader, ParsedVersion};
pub use error::PackError;
pub use pipeline::{run, PackOutcome, PackRequest};
