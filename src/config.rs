// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Moneyboard", "moneyboard"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    pub upload_delay_ms: u64,
    pub processing_delay_ms: u64,
    pub success_rate: f64,
}

impl Default for ImportSettings {
    fn default() -> Self {
        ImportSettings {
            upload_delay_ms: 1000,
            processing_delay_ms: 2000,
            success_rate: 0.8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub currency: String,
    /// Budget assumed for categories that do not define one.
    pub default_budget: Decimal,
    pub fallback_color: String,
    pub recent_limit: usize,
    pub trend_months: usize,
    pub data_path: Option<PathBuf>,
    pub import: ImportSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            currency: "USD".to_string(),
            default_budget: Decimal::from(1000),
            fallback_color: crate::aggregate::DEFAULT_COLOR.to_string(),
            recent_limit: 5,
            trend_months: 6,
            data_path: None,
            import: ImportSettings::default(),
        }
    }
}

impl Settings {
    pub fn default_config_path() -> Result<PathBuf> {
        let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
            .context("Could not determine platform-specific config dir")?;
        Ok(proj.config_dir().join("config.json"))
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        debug!(path = %path.display(), "Loaded config");
        Ok(settings)
    }

    /// An explicit path must exist. Without one, the default location is used
    /// if present, else the built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(p) = explicit {
            return Self::load_from_path(p);
        }
        let path = Self::default_config_path()?;
        if path.exists() {
            Self::load_from_path(&path)
        } else {
            debug!(path = %path.display(), "No config file, using defaults");
            Ok(Settings::default())
        }
    }

    /// Writes the defaults to `path`, refusing to overwrite an existing file.
    pub fn write_default(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Configuration file already exists at {}", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let body = serde_json::to_string_pretty(&Settings::default())?;
        fs::write(path, body)
            .with_context(|| format!("Failed to write config file to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn partial_config_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "currency": "BRL", "import": { "success_rate": 1.0 } }"#).unwrap();

        let s = Settings::load(Some(path.as_path())).unwrap();
        assert_eq!(s.currency, "BRL");
        assert_eq!(s.default_budget, Decimal::from(1000));
        assert_eq!(s.recent_limit, 5);
        assert_eq!(s.import.success_rate, 1.0);
        assert_eq!(s.import.upload_delay_ms, 1000);
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let dir = tempdir().unwrap();
        let err = Settings::load(Some(dir.path().join("nope.json").as_path())).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn write_default_round_trips_and_refuses_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        Settings::write_default(&path).unwrap();
        assert_eq!(Settings::load_from_path(&path).unwrap(), Settings::default());
        assert!(Settings::write_default(&path).is_err());
    }
}
