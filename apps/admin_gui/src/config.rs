use std::{collections::HashMap, fs, path::Path, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "admin.toml";
pub const SETTINGS_STORAGE_KEY: &str = "admin_gui.settings";

#[derive(Parser, Debug, Default)]
#[command(name = "admin_gui", about = "Dictionary release administration")]
pub struct Args {
    /// Base URL of the dictionary API.
    #[arg(long)]
    pub api_url: Option<String>,
    #[arg(long)]
    pub api_token: Option<String>,
    /// Dictionary to open on startup, e.g. /users/alice/collections/MAL/
    #[arg(long)]
    pub dictionary: Option<String>,
    #[arg(long)]
    pub log_level: Option<String>,
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub dictionary_url: Option<String>,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000".into(),
            api_token: None,
            dictionary_url: None,
            log_level: "info".into(),
        }
    }
}

/// UI state remembered between runs, kept in eframe's app storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedAdminSettings {
    #[serde(default)]
    pub last_dictionary_url: Option<String>,
}

impl PersistedAdminSettings {
    pub fn read(storage: &dyn eframe::Storage) -> Option<Self> {
        storage
            .get_string(SETTINGS_STORAGE_KEY)
            .and_then(|text| serde_json::from_str::<Self>(&text).ok())
    }

    pub fn write(&self, storage: &mut dyn eframe::Storage) {
        if let Ok(serialized) = serde_json::to_string(self) {
            storage.set_string(SETTINGS_STORAGE_KEY, serialized);
        }
    }
}

/// Defaults, then the config file, then `APP__*` environment variables,
/// then command-line flags.
pub fn load_settings(args: &Args) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();
    apply_file(&mut settings, &args.config)?;
    apply_env(&mut settings, |key| std::env::var(key).ok());
    apply_args(&mut settings, args);
    Ok(settings)
}

fn apply_file(settings: &mut Settings, path: &Path) -> anyhow::Result<()> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read '{}'", path.display()))
        }
    };
    let file_cfg = toml::from_str::<HashMap<String, String>>(&raw)
        .with_context(|| format!("failed to parse '{}'", path.display()))?;

    if let Some(v) = file_cfg.get("api_url") {
        settings.api_base_url = v.clone();
    }
    if let Some(v) = file_cfg.get("api_token") {
        settings.api_token = Some(v.clone());
    }
    if let Some(v) = file_cfg.get("dictionary_url") {
        settings.dictionary_url = Some(v.clone());
    }
    if let Some(v) = file_cfg.get("log_level") {
        settings.log_level = v.clone();
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("APP__API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = lookup("APP__API_TOKEN") {
        settings.api_token = Some(v);
    }
    if let Some(v) = lookup("APP__DICTIONARY_URL") {
        settings.dictionary_url = Some(v);
    }
    if let Some(v) = lookup("APP__LOG_LEVEL") {
        settings.log_level = v;
    }
}

fn apply_args(settings: &mut Settings, args: &Args) {
    if let Some(v) = &args.api_url {
        settings.api_base_url = v.clone();
    }
    if let Some(v) = &args.api_token {
        settings.api_token = Some(v.clone());
    }
    if let Some(v) = &args.dictionary {
        settings.dictionary_url = Some(v.clone());
    }
    if let Some(v) = &args.log_level {
        settings.log_level = v.clone();
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
