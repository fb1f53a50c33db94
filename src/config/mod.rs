//! Configuration management for docemit
//!
//! Settings come from an optional config.toml. Lookup order is the
//! `--config` flag (or `DOCEMIT_CONFIG`), then the platform config directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::emitter::ErrorPolicy;
use crate::render::Footer;

pub const DEFAULT_BASE_DIR: &str = "DOC";
pub const DEFAULT_VERSION: &str = "0.26.13";
pub const DEFAULT_UPDATED: &str = "21. Februar 2026";
pub const DEFAULT_FOOTER_LABEL: &str = "Letzte Aktualisierung";
/// `footer.updated` value that stamps the run date instead of a fixed one
pub const TODAY_STAMP: &str = "today";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory the documentation tree is written under
    pub base_dir: PathBuf,
    /// Stop at the first failed file instead of continuing
    pub strict: bool,
    pub footer: FooterConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
            strict: false,
            footer: FooterConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    pub label: String,
    pub version: String,
    /// Date stamp, or `"today"` for the current local date
    pub updated: String,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            label: DEFAULT_FOOTER_LABEL.to_string(),
            version: DEFAULT_VERSION.to_string(),
            updated: DEFAULT_UPDATED.to_string(),
        }
    }
}

impl Config {
    pub fn footer(&self) -> Footer {
        let FooterConfig {
            label,
            version,
            updated,
        } = &self.footer;
        if updated == TODAY_STAMP {
            Footer::today(label, version)
        } else {
            Footer::new(label, version, updated)
        }
    }

    pub fn policy(&self) -> ErrorPolicy {
        if self.strict {
            ErrorPolicy::Strict
        } else {
            ErrorPolicy::Continue
        }
    }
}

/// Returns the default config file location (<config dir>/docemit/config.toml)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("docemit").join("config.toml"))
}

/// Explicit path wins, otherwise the platform default
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path(),
    }
}

/// Load configuration from disk. A missing file yields defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match resolve_config_path(path) {
        Some(path) if path.exists() => path,
        _ => return Ok(Config::default()),
    };
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Save configuration to disk, creating the parent directory if needed
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(Some(&temp.path().join("absent.toml"))).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.base_dir, PathBuf::from("DOC"));
        assert_eq!(config.policy(), ErrorPolicy::Continue);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "strict = true\n\n[footer]\nupdated = \"1. März 2026\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert!(config.strict);
        assert_eq!(config.policy(), ErrorPolicy::Strict);
        assert_eq!(config.base_dir, PathBuf::from(DEFAULT_BASE_DIR));
        assert_eq!(config.footer.version, DEFAULT_VERSION);

        let footer = config.footer();
        assert_eq!(footer.updated, "1. März 2026");
        assert_eq!(footer.label, DEFAULT_FOOTER_LABEL);
    }

    #[test]
    fn test_default_footer_is_fixed_stamp() {
        let footer = Config::default().footer();
        assert_eq!(
            footer.to_markdown(),
            "\n---\n\n*Letzte Aktualisierung: 21. Februar 2026 – Version 0.26.13*\n"
        );
        assert_eq!(Config::default().footer(), footer);
    }

    #[test]
    fn test_today_stamp_is_opt_in() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[footer]\nupdated = \"today\"\n").unwrap();

        let footer = load_config(Some(&path)).unwrap().footer();
        assert_eq!(
            footer.updated,
            crate::render::german_date(chrono::Local::now().date_naive())
        );
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/config.toml");

        let mut config = Config::default();
        config.base_dir = PathBuf::from("/srv/docs");
        config.footer.updated = "1. März 2026".to_string();
        save_config(&config, &path).unwrap();

        assert_eq!(load_config(Some(&path)).unwrap(), config);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "strict = \"maybe\"").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
