//! CLI configuration.
//!
//! An optional `quizmark.toml` in the working directory (or a `--config`
//! path) supplies defaults for the `run` command. Everything has a sane
//! fallback, so the file is never required.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Where session reports are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Report format(s) used when `--format` is not given.
    #[serde(default = "default_format")]
    pub default_format: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./quizmark-results")
}

fn default_format() -> String {
    "json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            default_format: default_format(),
        }
    }
}

/// Load config from an explicit path, `./quizmark.toml` if present, or
/// defaults.
pub fn load_config_from(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let default = PathBuf::from("quizmark.toml");
            if !default.exists() {
                return Ok(Config::default());
            }
            default
        }
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_no_file() {
        let config = load_config_from(None).unwrap();
        assert_eq!(config.default_format, "json");
        assert_eq!(config.output_dir, PathBuf::from("./quizmark-results"));
    }

    #[test]
    fn explicit_file_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizmark.toml");
        std::fs::write(&path, "output_dir = \"/tmp/reports\"\ndefault_format = \"html\"\n")
            .unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/reports"));
        assert_eq!(config.default_format, "html");
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizmark.toml");
        std::fs::write(&path, "default_format = \"all\"\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.default_format, "all");
        assert_eq!(config.output_dir, PathBuf::from("./quizmark-results"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizmark.toml");
        std::fs::write(&path, "not toml [").unwrap();

        assert!(load_config_from(Some(&path)).is_err());
    }
}
