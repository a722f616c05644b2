//! Pack documents: `manifest.json`, `skins.json` and the localization table.
//!
//! Everything here is pure. The shapes and key order of the two JSON documents
//! are what the game expects and must not change.

use anyhow::{Context, Result};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::catalog::CatalogEntry;

/// `format_version` written into `manifest.json`.
pub const MANIFEST_FORMAT_VERSION: u32 = 1;

/// Module type for a skin pack.
pub const SKIN_PACK_MODULE_TYPE: &str = "skin_pack";

/// Pack version, serialized as `[major, minor, patch]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl PackVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Default for PackVersion {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

impl std::fmt::Display for PackVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl Serialize for PackVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(3)?;
        tuple.serialize_element(&self.major)?;
        tuple.serialize_element(&self.minor)?;
        tuple.serialize_element(&self.patch)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for PackVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (major, minor, patch) = <(u32, u32, u32)>::deserialize(deserializer)?;
        Ok(Self::new(major, minor, patch))
    }
}

/// Result of validating user version input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedVersion {
    pub version: PackVersion,
    /// True when the input was rejected and the default was substituted.
    pub defaulted: bool,
}

/// Parse `x.y.z`, falling back to `1.0.0` for anything else.
///
/// Exactly three dot-separated non-negative integers are accepted; whitespace
/// around the input or a component is ignored. The fallback is not an error,
/// but it is logged and reported through [`ParsedVersion::defaulted`].
pub fn parse_version(input: &str) -> ParsedVersion {
    match parse_triple(input.trim()) {
        Some(version) => {
            tracing::info!("validated version: {version}");
            ParsedVersion {
                version,
                defaulted: false,
            }
        }
        None => {
            let version = PackVersion::default();
            tracing::warn!("invalid version format '{input}'; using default version {version}");
            ParsedVersion {
                version,
                defaulted: true,
            }
        }
    }
}

fn parse_triple(input: &str) -> Option<PackVersion> {
    let parts = input
        .split('.')
        .map(|part| part.trim().parse::<u32>().ok())
        .collect::<Option<Vec<_>>>()?;
    match parts.as_slice() {
        [major, minor, patch] => Some(PackVersion::new(*major, *minor, *patch)),
        _ => None,
    }
}

/// `header` block of `manifest.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeaderRecord {
    pub name: String,
    pub uuid: Uuid,
    pub version: PackVersion,
}

/// One entry of the `modules` list in `manifest.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub uuid: Uuid,
    pub version: PackVersion,
}

/// The package header document (`manifest.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageHeader {
    pub format_version: u32,
    pub header: HeaderRecord,
    pub modules: Vec<ModuleRecord>,
}

/// The catalog document (`skins.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    pub skins: Vec<CatalogEntry>,
    pub serialize_name: String,
    pub localization_name: String,
}

/// Ordered `key=value` pairs for `texts/en_US.lang`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizationTable {
    entries: Vec<(String, String)>,
}

impl LocalizationTable {
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    /// One `key=value` line per entry, each newline-terminated.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|(key, value)| format!("{key}={value}\n"))
            .collect()
    }
}

pub fn build_header(
    name: &str,
    version: PackVersion,
    header_id: Uuid,
    module_id: Uuid,
) -> PackageHeader {
    PackageHeader {
        format_version: MANIFEST_FORMAT_VERSION,
        header: HeaderRecord {
            name: name.to_string(),
            uuid: header_id,
            version,
        },
        modules: vec![ModuleRecord {
            kind: SKIN_PACK_MODULE_TYPE.to_string(),
            uuid: module_id,
            version,
        }],
    }
}

pub fn build_catalog(name: &str, entries: &[CatalogEntry]) -> Catalog {
    Catalog {
        skins: entries.to_vec(),
        serialize_name: name.to_string(),
        localization_name: name.to_string(),
    }
}

/// The pack title line followed by one line per skin, in catalog order.
pub fn build_localization(name: &str, entries: &[CatalogEntry]) -> LocalizationTable {
    let mut table = LocalizationTable::default();
    table.push(format!("skinpack.{name}"), name);
    for entry in entries {
        table.push(
            format!("skin.{name}.{}", entry.localization_name),
            entry.localization_name.as_str(),
        );
    }
    table
}

/// Serialize with four-space indentation and no trailing newline.
///
/// This is the only formatting used for pack documents, so reading a document
/// back and writing it again reproduces the same bytes.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value
        .serialize(&mut serializer)
        .context("serializing pack document")?;
    Ok(out)
}
