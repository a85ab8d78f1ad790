use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use storage::MEMORY_KEY;

const DEFAULT_CONFIG_FILE: &str = "panel.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub store_dir: PathBuf,
    pub memory_key: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            memory_key: MEMORY_KEY.into(),
            log_filter: "info".into(),
        }
    }
}

fn default_store_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|base| base.join("pdp12_panel"))
        .unwrap_or_else(|| PathBuf::from("./data"))
}

/// Defaults, then `panel.toml` (or `config_path`), then environment variables.
pub fn load_settings(config_path: Option<&Path>) -> Settings {
    let mut settings = Settings::default();

    let path = config_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    if let Ok(raw) = fs::read_to_string(path) {
        if let Err(err) = apply_file_overrides(&mut settings, &raw) {
            tracing::warn!(path = %path.display(), "ignoring unreadable config file: {err}");
        }
    }

    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    settings
}

pub(crate) fn apply_file_overrides(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg = toml::from_str::<HashMap<String, String>>(raw)?;
    if let Some(v) = file_cfg.get("store_dir") {
        settings.store_dir = PathBuf::from(v);
    }
    if let Some(v) = file_cfg.get("memory_key") {
        settings.memory_key = v.clone();
    }
    if let Some(v) = file_cfg.get("log_filter") {
        settings.log_filter = v.clone();
    }
    Ok(())
}

pub(crate) fn apply_env_overrides(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("PANEL_STORE_DIR") {
        settings.store_dir = PathBuf::from(v);
    }
    if let Some(v) = var("APP__STORE_DIR") {
        settings.store_dir = PathBuf::from(v);
    }

    if let Some(v) = var("PANEL_MEMORY_KEY") {
        settings.memory_key = v;
    }
    if let Some(v) = var("APP__MEMORY_KEY") {
        settings.memory_key = v;
    }

    if let Some(v) = var("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
