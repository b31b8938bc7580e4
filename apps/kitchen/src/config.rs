use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use client_core::{FileTokenStore, DEFAULT_AUTH_SCHEME, DEFAULT_BASE_URL};
use tracing::warn;

pub const CONFIG_FILE: &str = "kitchen.toml";
const APP_NAME: &str = "kitchen";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub auth_scheme: String,
    pub token_path: PathBuf,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.into(),
            auth_scheme: DEFAULT_AUTH_SCHEME.into(),
            token_path: FileTokenStore::default_path(APP_NAME)
                .unwrap_or_else(|| PathBuf::from(".kitchen").join("auth_token")),
            log_filter: "warn".into(),
        }
    }
}

pub fn load_settings(config_path: Option<&Path>) -> Settings {
    let path = config_path.unwrap_or_else(|| Path::new(CONFIG_FILE));
    load_settings_with(path, |key| std::env::var(key).ok())
}

/// Defaults, then the flat `key = "value"` file, then environment.
pub fn load_settings_with(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<HashMap<String, String>>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("api_base_url") {
                    settings.api_base_url = v.clone();
                }
                if let Some(v) = file_cfg.get("auth_scheme") {
                    settings.auth_scheme = v.clone();
                }
                if let Some(v) = file_cfg.get("token_path") {
                    settings.token_path = PathBuf::from(v);
                }
                if let Some(v) = file_cfg.get("log_filter") {
                    settings.log_filter = v.clone();
                }
            }
            Err(err) => warn!(path = %path.display(), error = %err, "ignoring malformed config file"),
        }
    }

    if let Some(v) = env("KITCHEN_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = env("APP__AUTH_SCHEME") {
        settings.auth_scheme = v;
    }

    if let Some(v) = env("APP__TOKEN_PATH") {
        settings.token_path = PathBuf::from(v);
    }

    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    settings
}
