//! Configuration file support for confgen.
//!
//! confgen reads two configuration file locations:
//! - Global: `~/.confgen/config.toml` - User-wide defaults
//! - Project: `.confgen/config.toml` - Overrides for the working directory
//!
//! Project config takes precedence over global config, and command-line
//! flags take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Directory holding confgen configuration, both globally and per project.
pub const CONFIG_DIR_NAME: &str = ".confgen";

/// Configuration file name inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// confgen configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output settings
    pub output: OutputConfig,

    /// Generation settings
    pub generate: GenerateConfig,
}

/// How reports are printed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Report format: "human" or "json"
    pub format: Option<String>,

    /// Color mode: "auto", "always" or "never"
    pub color: Option<String>,
}

/// Defaults for `confgen generate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Worker threads used to evaluate configurations
    pub jobs: Option<usize>,

    /// Print the unconstrained "all configurations" section
    pub show_all: Option<bool>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file is missing
    /// or broken.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.output.format.is_some() {
            self.output.format = other.output.format;
        }
        if other.output.color.is_some() {
            self.output.color = other.output.color;
        }

        if other.generate.jobs.is_some() {
            self.generate.jobs = other.generate.jobs;
        }
        if other.generate.show_all.is_some() {
            self.generate.show_all = other.generate.show_all;
        }
    }

    /// Whether reports default to JSON.
    pub fn json_output(&self) -> bool {
        self.output
            .format
            .as_deref()
            .is_some_and(|f| f.eq_ignore_ascii_case("json"))
    }

    /// Whether the all-configurations section is printed. Defaults to true.
    pub fn show_all(&self) -> bool {
        self.generate.show_all.unwrap_or(true)
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.confgen/config.toml)
/// 2. Global config (~/.confgen/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

/// `~/.confgen`, if a home directory can be determined.
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(CONFIG_DIR_NAME))
}

/// `~/.confgen/config.toml`
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|d| d.join(CONFIG_FILE_NAME))
}

/// `<project_root>/.confgen/config.toml`
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, text: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILE_NAME);
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.output.format.is_none());
        assert!(config.generate.jobs.is_none());
        assert!(!config.json_output());
        assert!(config.show_all());
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let path = write(
            tmp.path(),
            r#"
[output]
format = "json"
color = "never"

[generate]
jobs = 8
show_all = false
"#,
        );

        let config = Config::load(&path).unwrap();
        assert_eq!(config.output.format, Some("json".to_string()));
        assert_eq!(config.output.color, Some("never".to_string()));
        assert_eq!(config.generate.jobs, Some(8));
        assert!(config.json_output());
        assert!(!config.show_all());
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.output.format = Some("human".to_string());
        base.generate.jobs = Some(4);

        let mut override_cfg = Config::default();
        override_cfg.output.format = Some("json".to_string());

        base.merge(override_cfg);

        assert_eq!(base.output.format, Some("json".to_string()));
        assert_eq!(base.generate.jobs, Some(4)); // Not overridden
    }

    #[test]
    fn test_broken_config_falls_back_to_default() {
        let tmp = TempDir::new().unwrap();
        let path = write(tmp.path(), "[generate]\njobs = \"many\"\n");

        assert!(Config::load(&path).is_err());
        assert_eq!(Config::load_or_default(&path), Config::default());
    }

    #[test]
    fn test_load_config_precedence() {
        let global = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();

        let global_path = write(
            global.path(),
            "[output]\nformat = \"json\"\n\n[generate]\njobs = 2\n",
        );
        let project_path = write(project.path(), "[generate]\njobs = 6\n");

        let config = load_config(Some(&global_path), &project_path);
        assert!(config.json_output());
        assert_eq!(config.generate.jobs, Some(6));
    }

    #[test]
    fn test_load_config_missing_files() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(None, &project_config_path(tmp.path()));
        assert_eq!(config, Config::default());
    }
}
