//! Serializable types stored alongside the state inside an `.avz` archive.
//!
//! The state itself is written verbatim as `project.json`; the manifest
//! records which format and build produced it and a digest of those bytes.

use serde::{Deserialize, Serialize};

/// The only archive format version this build reads and writes.
pub const SCHEMA_VERSION: u32 = 1;

/// Contents of `manifest.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectManifest {
    pub schema_version: u32,
    /// Crate version that wrote the archive (`CARGO_PKG_VERSION`).
    pub app_version: String,
    /// RFC 3339 UTC timestamp of the save.
    pub saved_at: String,
    /// Lowercase hex SHA-256 of the `project.json` entry.
    pub state_sha256: String,
}
