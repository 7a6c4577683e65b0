//! Atomic save and validated load for the `.avz` project file format.
//!
//! # Save
//! 1. Serialize the [`AppState`] to `project.json` and hash it.
//! 2. Write a complete ZIP archive with `manifest.json` and `project.json` to
//!    `<target>.tmp` (same directory, so same filesystem as the final path).
//! 3. Atomically rename the temp file over the target.
//! On any failure the temp file is deleted and the original is left intact.
//!
//! # Load
//! 1. Sniff the ZIP magic. Archives must carry a `manifest.json` with
//!    `schemaVersion == 1` whose digest matches `project.json`; anything else
//!    is read as a bare `project.json` document.
//! 2. Parse the state strictly and run the semantic checks in
//!    [`super::validation`].

use std::io::{Cursor, Read, Write};
use std::path::Path;

use sha2::{Digest, Sha256};
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;

use super::types::{ProjectManifest, SCHEMA_VERSION};
use super::ValidatedProject;
use crate::error::AppError;
use crate::state::AppState;

/// Name of the state document inside every `.avz` ZIP.
const PROJECT_JSON: &str = "project.json";
const MANIFEST_JSON: &str = "manifest.json";

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Version embedded in every saved file.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Save `state` to an `.avz` file at `path` using an atomic write.
///
/// The ZIP is written to `<path>.tmp` in the same directory, then renamed over
/// `path`. On any error the temp file is removed and `path` is left unchanged.
pub fn save(state: &AppState, path: &Path) -> Result<(), AppError> {
    let file_name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned();
    let tmp_path = path.with_file_name(format!("{file_name}.tmp"));

    if let Err(e) = write_archive(state, &tmp_path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e);
    }

    std::fs::rename(&tmp_path, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp_path);
        AppError::ProjectSave(format!("rename to final path failed: {e}"))
    })?;

    tracing::info!(path = %path.display(), "project saved");
    Ok(())
}

/// Load a project from `path`, either an `.avz` archive or a bare
/// `project.json` document.
///
/// Returns [`AppError::Io`] if the file cannot be read and
/// [`AppError::InvalidProjectFile`] for everything wrong with its contents.
pub fn load(path: &Path) -> Result<ValidatedProject, AppError> {
    let bytes = std::fs::read(path)?;

    let project = if bytes.starts_with(ZIP_MAGIC) {
        let json = read_archive(bytes)?;
        super::parse_project_json(&json)?
    } else {
        let json = std::str::from_utf8(&bytes)
            .map_err(|e| AppError::InvalidProjectFile(format!("not UTF-8 text: {e}")))?;
        super::parse_project_json(json)?
    };

    tracing::info!(path = %path.display(), mode = project.mode.label(), "project loaded");
    Ok(project)
}

/// Lowercase hex SHA-256 of `bytes`.
fn digest_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Extract and verify `project.json` from an archive held in memory.
fn read_archive(bytes: Vec<u8>) -> Result<String, AppError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| AppError::InvalidProjectFile(format!("not a valid ZIP archive: {e}")))?;

    let manifest_json = read_entry(&mut archive, MANIFEST_JSON)?;
    let manifest: ProjectManifest = serde_json::from_str(&manifest_json)
        .map_err(|e| AppError::InvalidProjectFile(format!("cannot parse {MANIFEST_JSON}: {e}")))?;

    if manifest.schema_version != SCHEMA_VERSION {
        return Err(AppError::InvalidProjectFile(format!(
            "unsupported schema version {}; only schema version {SCHEMA_VERSION} is supported",
            manifest.schema_version
        )));
    }

    let json = read_entry(&mut archive, PROJECT_JSON)?;
    let actual = digest_hex(json.as_bytes());
    if !actual.eq_ignore_ascii_case(&manifest.state_sha256) {
        return Err(AppError::InvalidProjectFile(format!(
            "{PROJECT_JSON} digest mismatch: manifest says {}, content is {actual}",
            manifest.state_sha256
        )));
    }
    Ok(json)
}

fn read_entry(
    archive: &mut zip::ZipArchive<Cursor<Vec<u8>>>,
    name: &str,
) -> Result<String, AppError> {
    let mut entry = archive
        .by_name(name)
        .map_err(|e| AppError::InvalidProjectFile(format!("{name} not found in archive: {e}")))?;
    let mut s = String::new();
    entry
        .read_to_string(&mut s)
        .map_err(|e| AppError::InvalidProjectFile(format!("cannot read {name}: {e}")))?;
    Ok(s)
}

/// Write the ZIP archive to `path` (the temp file location).
///
/// Separated from [`save`] so that cleanup on error is handled entirely by
/// the caller.
fn write_archive(state: &AppState, path: &Path) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(state)
        .map_err(|e| AppError::ProjectSave(format!("cannot serialize project: {e}")))?;

    let manifest = ProjectManifest {
        schema_version: SCHEMA_VERSION,
        app_version: APP_VERSION.to_string(),
        saved_at: chrono::Utc::now().to_rfc3339(),
        state_sha256: digest_hex(json.as_bytes()),
    };
    let manifest_json = serde_json::to_string_pretty(&manifest)
        .map_err(|e| AppError::ProjectSave(format!("cannot serialize manifest: {e}")))?;

    let file = std::fs::File::create(path)
        .map_err(|e| AppError::ProjectSave(format!("cannot create temp file: {e}")))?;
    let mut zip = zip::ZipWriter::new(file);
    let opts = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, contents) in [(MANIFEST_JSON, &manifest_json), (PROJECT_JSON, &json)] {
        zip.start_file(name, opts)
            .map_err(|e| AppError::ProjectSave(format!("cannot create {name} entry: {e}")))?;
        zip.write_all(contents.as_bytes())
            .map_err(|e| AppError::ProjectSave(format!("cannot write {name}: {e}")))?;
    }

    zip.finish()
        .map_err(|e| AppError::ProjectSave(format!("cannot finalize ZIP: {e}")))?;

    Ok(())
}
