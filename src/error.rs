//! Application-level error type.
//!
//! `AppError` is serialized to `{ kind, message }` JSON payloads so a
//! front-end host can pattern-match on a stable `kind` string.
//!
//! The reducer itself never fails; these errors come from the boundaries
//! around it: parsing actions, loading or saving projects, reading config and
//! starting a generation.

/// Top-level error returned across the library boundary.
///
/// Serialized with serde's adjacently-tagged representation:
/// `{ "kind": "<variant>", "message": "<human-readable text>" }`
#[derive(Debug, thiserror::Error, serde::Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum AppError {
    /// A project file or `LOAD_PROJECT` payload failed schema validation.
    #[error("invalid project file: {0}")]
    InvalidProjectFile(String),

    /// The project file could not be written.
    #[error("{0}")]
    ProjectSave(String),

    /// A generic I/O error; the inner [`std::io::Error`] is converted to a
    /// string at the system boundary so it remains serializable.
    #[error("{0}")]
    Io(String),

    /// The configuration file could not be read or holds invalid values.
    #[error("config error: {0}")]
    Config(String),

    /// An action envelope was malformed (bad JSON, missing `type`, or a
    /// payload that does not match the action's schema).
    #[error("invalid action: {0}")]
    InvalidAction(String),

    /// Generation was requested without an uploaded image.
    #[error("no image uploaded")]
    NoImage,

    /// Generation was requested while another one is still running.
    #[error("a generation is already in progress")]
    GenerationInProgress,

    /// The generation task ended abnormally (panicked or was aborted).
    #[error("{0}")]
    Generation(String),
}

impl From<std::io::Error> for AppError {
    /// Convert an [`std::io::Error`] into an [`AppError::Io`].
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_project_file_serializes_to_kind_message() {
        let err = AppError::InvalidProjectFile("missing field `mode`".to_string());
        let value = serde_json::to_value(&err).expect("serialize AppError");
        assert_eq!(value["kind"], "InvalidProjectFile");
        assert_eq!(value["message"], "missing field `mode`");
    }

    #[test]
    fn unit_variants_serialize_with_kind_only() {
        let value = serde_json::to_value(AppError::NoImage).expect("serialize");
        assert_eq!(value["kind"], "NoImage");
        assert!(value.get("message").is_none());

        let value = serde_json::to_value(AppError::GenerationInProgress).expect("serialize");
        assert_eq!(value["kind"], "GenerationInProgress");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let app_err = AppError::from(io_err);
        assert!(matches!(app_err, AppError::Io(_)));
        let value = serde_json::to_value(&app_err).expect("serialize");
        assert_eq!(value["kind"], "Io");
    }

    #[test]
    fn app_error_display_is_human_readable() {
        assert_eq!(AppError::NoImage.to_string(), "no image uploaded");
        assert_eq!(
            AppError::InvalidProjectFile("bad".to_string()).to_string(),
            "invalid project file: bad"
        );
        assert_eq!(
            AppError::ProjectSave("write failed".to_string()).to_string(),
            "write failed"
        );
    }
}
