//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Report generation settings
    #[serde(default)]
    pub reader: ReaderConfig,

    /// Authors, keywords, and categories of interest
    #[serde(default)]
    pub interests: InterestsConfig,

    /// Persistent record archive
    #[serde(default)]
    pub archive: ArchiveConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Serialize the configuration back to TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.reader.outfile.trim().is_empty() {
            return Err(AppError::validation("reader.outfile is empty"));
        }
        if StrftimeItems::new(&self.reader.outfile).any(|item| matches!(item, Item::Error)) {
            return Err(AppError::validation(format!(
                "reader.outfile '{}' is not a valid strftime pattern",
                self.reader.outfile
            )));
        }
        if self.reader.report_title.trim().is_empty() {
            return Err(AppError::validation("reader.report_title is empty"));
        }
        if self.archive.enabled && self.archive.path.as_os_str().is_empty() {
            return Err(AppError::validation(
                "archive.path must be set when the archive is enabled",
            ));
        }
        if self.logging.level.parse::<log::LevelFilter>().is_err() {
            return Err(AppError::validation(format!(
                "logging.level '{}' is not a log level",
                self.logging.level
            )));
        }
        Ok(())
    }
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Whether records matching no interest get their own report section
    #[serde(default)]
    pub include_remaining: bool,

    /// Report file name, formatted with the local time (strftime syntax)
    #[serde(default = "defaults::outfile")]
    pub outfile: String,

    /// Heading used for the report title
    #[serde(default = "defaults::report_title")]
    pub report_title: String,

    /// Open the written report with the system's default viewer
    #[serde(default = "defaults::open_outfile")]
    pub open_outfile: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            include_remaining: false,
            outfile: defaults::outfile(),
            report_title: defaults::report_title(),
            open_outfile: defaults::open_outfile(),
        }
    }
}

/// Interest lists, given inline and/or as line files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterestsConfig {
    /// Author masks such as "J. Roos"
    #[serde(default)]
    pub authors: Vec<String>,

    /// Keywords searched in title and abstract
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Category tokens such as "math.CA"
    #[serde(default)]
    pub categories: Vec<String>,

    /// File with one author mask per line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors_file: Option<PathBuf>,

    /// File with one keyword per line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords_file: Option<PathBuf>,

    /// File with one category per line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories_file: Option<PathBuf>,
}

/// Persistent archive settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Keep records across runs
    #[serde(default)]
    pub enabled: bool,

    /// JSON file holding the archive
    #[serde(default = "defaults::archive_path")]
    pub path: PathBuf,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: defaults::archive_path(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level (error, warn, info, debug, trace)
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    pub fn outfile() -> String {
        "Report%Y-%m-%d_%H%M%S.html".into()
    }
    pub fn report_title() -> String {
        "ArXiv news report".into()
    }
    pub fn open_outfile() -> bool {
        true
    }
    pub fn archive_path() -> PathBuf {
        PathBuf::from("archive.json")
    }
    pub fn log_level() -> String {
        "info".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_outfile() {
        let mut config = Config::default();
        config.reader.outfile = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_outfile_pattern() {
        let mut config = Config::default();
        config.reader.outfile = "Report%Q.html".to_string();
        assert!(matches!(config.validate(), Err(AppError::Validation(_))));

        config.reader.outfile = "reports/%Y/%m-%d.html".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_unknown_level() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_enabled_archive_without_path() {
        let mut config = Config::default();
        config.archive.enabled = true;
        config.archive.path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [reader]
            include_remaining = true

            [interests]
            authors = ["J. Roos"]
            keywords = ["maximal function"]
            "#,
        )
        .unwrap();

        assert!(config.reader.include_remaining);
        assert!(config.reader.open_outfile);
        assert_eq!(config.reader.outfile, "Report%Y-%m-%d_%H%M%S.html");
        assert_eq!(config.interests.authors, vec!["J. Roos"]);
        assert!(config.interests.categories.is_empty());
        assert!(!config.archive.enabled);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut config = Config::default();
        config.interests.categories = vec!["math.CA".to_string()];
        let text = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.interests.categories, vec!["math.CA"]);
    }
}
