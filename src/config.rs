use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    Read {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    Parse {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub spacing: SpacingConfig,
    pub page: PageConfig,
    pub font: FontConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SpacingConfig {
    /// Gap before a heading
    pub large: u32,
    /// Gap between any other pair of blocks
    pub medium: u32,
    /// Space under a heading
    pub heading_bottom: u32,
    /// Gap between items of one list
    pub item_gap: u32,
    /// Gap between nested bullets and around the nested list
    pub nested_gap: u32,
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self {
            large: 28,
            medium: 22,
            heading_bottom: 10,
            item_gap: 14,
            nested_gap: 10,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PageConfig {
    pub paper: String,
    pub numbers: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            paper: "a4".to_string(),
            numbers: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FontConfig {
    /// Body text size in pt
    pub size: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self { size: 14 }
    }
}

impl Config {
    /// The configuration bundled with the crate (validated by the build script).
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file, or return the compiled defaults if it is
    /// missing or unreadable.
    pub fn load(path: &Path) -> Self {
        match Self::load_from_path(path) {
            Ok(config) => config,
            Err(ConfigError::Read { .. }) => Self::compiled_default(),
            Err(e) => {
                log::warn!("{e}; using defaults");
                Self::compiled_default()
            }
        }
    }

    /// Load config from a TOML file, reporting read and parse failures.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            config_path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            config_path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn compiled_default_matches_default_impl() {
        assert_eq!(Config::compiled_default(), Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[spacing]\nmedium = 16").unwrap();

        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(config.spacing.medium, 16);
        assert_eq!(config.spacing.large, 28);
        assert_eq!(config.page, PageConfig::default());
    }

    #[test]
    fn lenient_load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[page]\nnumbers = true").unwrap();

        let config = Config::load(file.path());
        assert!(config.page.numbers);
        assert_eq!(config.spacing, SpacingConfig::default());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(matches!(
            Config::load_from_path(&path),
            Err(ConfigError::Read { .. })
        ));
        assert_eq!(Config::load(&path), Config::compiled_default());
    }

    #[test]
    fn invalid_file_falls_back_in_lenient_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[spacing\nmedium = ").unwrap();

        assert!(matches!(
            Config::load_from_path(file.path()),
            Err(ConfigError::Parse { .. })
        ));
        assert_eq!(Config::load(file.path()), Config::compiled_default());
    }
}
