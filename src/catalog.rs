//! Texture discovery and catalog entries.
//!
//! Every `.png` in the source directory becomes one skin. Its display name is
//! derived from the file name (`cool_skin-1.png` -> `Cool Skin 1`) and its
//! geometry reference is `geometry.<pack>.<display name>`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Extension a file must carry (case-sensitive) to be treated as a texture.
pub const TEXTURE_EXTENSION: &str = "png";

/// Skin type written for every entry. Paid skins are not supported.
pub const SKIN_TYPE_FREE: &str = "free";

/// One skin in `skins.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogEntry {
    pub localization_name: String,
    pub geometry: String,
    pub texture: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl CatalogEntry {
    /// Build the entry for a texture file belonging to `package_name`.
    pub fn for_texture(package_name: &str, file_name: &str) -> Self {
        let localization_name = display_name(file_name);
        Self {
            geometry: geometry_ref(package_name, &localization_name),
            localization_name,
            texture: file_name.to_string(),
            kind: SKIN_TYPE_FREE.to_string(),
        }
    }
}

/// Derive the human-readable skin name from a texture file name.
///
/// Strips the last extension, turns `_` and `-` into spaces and title-cases
/// each word.
pub fn display_name(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file_name);
    title_case(&stem.replace(['_', '-'], " "))
}

/// `geometry.<package>.<display name>`
pub fn geometry_ref(package_name: &str, display_name: &str) -> String {
    format!("geometry.{package_name}.{display_name}")
}

/// Upper-case a letter that starts a run of letters, lower-case the rest.
///
/// A "word" is any run of alphabetic characters, so `2nd` becomes `2Nd` and
/// `o'neil` becomes `O'Neil`.
fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_cased = false;
    for ch in input.chars() {
        if ch.is_alphabetic() {
            if prev_cased {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_cased = true;
        } else {
            out.push(ch);
            prev_cased = false;
        }
    }
    out
}

/// Scan `directory` (non-recursively) for textures and build one entry each.
///
/// Entries are sorted by file name so repeated runs produce identical packs.
/// An empty result is not an error here; the caller decides.
pub fn discover(directory: &Path, package_name: &str) -> Result<Vec<CatalogEntry>> {
    let mut textures = Vec::new();
    for entry in fs::read_dir(directory)
        .with_context(|| format!("reading texture directory '{}'", directory.display()))?
    {
        let entry = entry.with_context(|| {
            format!("iterating texture directory '{}'", directory.display())
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some(TEXTURE_EXTENSION) {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            tracing::warn!("skipping texture with non UTF-8 name: {}", path.display());
            continue;
        };
        textures.push(file_name.to_string());
    }
    textures.sort();

    let entries = textures
        .iter()
        .map(|texture| {
            let entry = CatalogEntry::for_texture(package_name, texture);
            tracing::info!(
                "processed texture {}, skin name: {}, geometry: {}",
                entry.texture,
                entry.localization_name,
                entry.geometry
            );
            entry
        })
        .collect();
    Ok(entries)
}
