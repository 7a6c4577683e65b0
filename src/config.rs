//! Runtime configuration.
//!
//! Read from a TOML file; every key is optional. A missing file yields the
//! defaults:
//!
//! ```toml
//! [prompt]
//! debounce_ms = 200
//!
//! [generation]
//! tick_ms = 50
//! step = 2
//!
//! [video]
//! access_code = "studio"
//!
//! [logging]
//! filter = "info"
//! # directory = "/var/log/archviz-studio"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::AppError;
use crate::generation::GenerationConfig;

/// Directory name used under the OS config and data directories.
pub const APP_DIR: &str = "archviz-studio";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StudioConfig {
    pub prompt: PromptConfig,
    pub generation: GenerationSection,
    pub video: VideoConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PromptConfig {
    /// Quiet period before the prompt is recomputed.
    pub debounce_ms: u64,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self { debounce_ms: 200 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationSection {
    pub tick_ms: u64,
    pub step: u8,
}

impl Default for GenerationSection {
    fn default() -> Self {
        Self { tick_ms: 50, step: 2 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VideoConfig {
    /// Code that unlocks the video workflow. Empty disables unlocking.
    pub access_code: String,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            access_code: "studio".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// Log directory; defaults to the OS local data directory.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            directory: None,
        }
    }
}

impl StudioConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, AppError> {
        let config: Self = toml::from_str(text).map_err(|e| AppError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml(&text)
    }

    /// Read `<config_dir>/archviz-studio/config.toml` if it exists, otherwise
    /// return the defaults.
    pub fn load_or_default() -> Result<Self, AppError> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.generation.tick_ms == 0 {
            return Err(AppError::Config("generation.tick_ms must be positive".to_string()));
        }
        if self.generation.step == 0 || self.generation.step > 100 {
            return Err(AppError::Config(
                "generation.step must be between 1 and 100".to_string(),
            ));
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.prompt.debounce_ms)
    }

    pub fn generation(&self) -> GenerationConfig {
        GenerationConfig {
            tick: Duration::from_millis(self.generation.tick_ms),
            step: self.generation.step,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = StudioConfig::from_toml("").expect("parse");
        assert_eq!(config, StudioConfig::default());
        assert_eq!(config.debounce(), Duration::from_millis(200));
        assert_eq!(config.generation(), GenerationConfig::default());
        assert_eq!(config.video.access_code, "studio");
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = StudioConfig::from_toml(
            r#"
            [generation]
            step = 10

            [logging]
            directory = "/tmp/avz-logs"
            "#,
        )
        .expect("parse");
        assert_eq!(config.generation.step, 10);
        assert_eq!(config.generation.tick_ms, 50);
        assert_eq!(config.logging.filter, "info");
        assert_eq!(
            config.logging.directory.as_deref(),
            Some(Path::new("/tmp/avz-logs"))
        );
    }

    #[test]
    fn zero_step_is_rejected() {
        let result = StudioConfig::from_toml("[generation]\nstep = 0\n");
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn zero_tick_is_rejected() {
        let result = StudioConfig::from_toml("[generation]\ntick_ms = 0\n");
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = StudioConfig::from_toml("[prompt]\ndebounce = 5\n");
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn load_missing_file_is_config_error() {
        let result = StudioConfig::load(Path::new("/nonexistent/archviz/config.toml"));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn load_reads_file() {
        let path = std::env::temp_dir().join(format!("avz_config_{}.toml", std::process::id()));
        std::fs::write(&path, "[video]\naccess_code = \"open-sesame\"\n").unwrap();
        let config = StudioConfig::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(config.expect("load").video.access_code, "open-sesame");
    }
}
