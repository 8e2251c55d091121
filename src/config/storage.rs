//! Persists the chart configuration and parse mode to a JSON file.

use crate::config::ChartConfig;
use crate::data::DataMode;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "./.chart_studio.json";
const SETTINGS_ENV: &str = "CHART_STUDIO_SETTINGS";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub config: ChartConfig,
    pub mode: DataMode,
}

/// `$CHART_STUDIO_SETTINGS`, or a dotfile in the working directory.
pub fn settings_path() -> PathBuf {
    std::env::var_os(SETTINGS_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE))
}

pub fn load(path: &Path) -> anyhow::Result<Settings> {
    let file = File::open(path)
        .with_context(|| format!("could not open settings file {}", path.display()))?;
    let settings: Settings = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("could not parse settings file {}", path.display()))?;
    Ok(Settings {
        config: settings.config.normalized(),
        mode: settings.mode,
    })
}

pub fn save(path: &Path, settings: &Settings) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("could not create settings file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, settings)
        .context("could not write settings as json")?;
    writer.flush().context("could not flush settings file")?;
    log::debug!("saved settings to {}", path.display());
    Ok(())
}

/// Startup helper: a missing or broken file falls back to defaults.
pub fn load_or_default(path: &Path) -> Settings {
    if !path.exists() {
        return Settings::default();
    }
    match load(path) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("{e:#}; using default settings");
            Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChartKind, ConfigUpdate};

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = Settings::default();
        settings.config.apply(ConfigUpdate::Kind(ChartKind::Line));
        settings.config.apply(ConfigUpdate::Title("Revenue".into()));
        settings.mode = DataMode::Single;

        save(&path, &settings).unwrap();
        assert_eq!(load(&path).unwrap(), settings);
    }

    #[test]
    fn test_load_clamps_and_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"config": {"bar_width": 500.0, "title": "T"}}"#).unwrap();

        let settings = load(&path).unwrap();
        assert_eq!(settings.config.bar_width, 30.0);
        assert_eq!(settings.config.title, "T");
        assert_eq!(settings.config.y_axis_label, "Y");
        assert_eq!(settings.mode, DataMode::Multi);
    }

    #[test]
    fn test_broken_file_falls_back() {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(load(&path).is_err());
        assert_eq!(load_or_default(&path), Settings::default());
        assert_eq!(
            load_or_default(&dir.path().join("absent.json")),
            Settings::default()
        );
    }
}
