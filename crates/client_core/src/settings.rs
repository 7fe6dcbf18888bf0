use std::{fs, path::Path};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

pub const SETTINGS_FILE_NAME: &str = "predictor.toml";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

const API_URL_ENV_VARS: [&str; 2] = ["PREDICTOR_API_URL", "APP__API_BASE_URL"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Prediction service root, without a trailing slash.
    pub api_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    api_base_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid prediction service url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl Settings {
    /// Applies a command-line override on top of already loaded settings.
    pub fn with_api_base_url(mut self, api_base_url: Option<&str>) -> Result<Self, SettingsError> {
        if let Some(raw) = api_base_url {
            self.api_base_url = normalize_base_url(raw)?;
        }
        Ok(self)
    }
}

/// Loads settings from `path` (when it exists) and the process environment.
pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let file_contents = match fs::read_to_string(path) {
        Ok(raw) => Some(raw),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.display().to_string(),
                source,
            })
        }
    };

    resolve_settings(file_contents.as_deref(), |name| std::env::var(name).ok())
}

/// Layers defaults, then the settings file, then environment overrides.
pub fn resolve_settings(
    file_contents: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Settings, SettingsError> {
    let mut settings = Settings::default();

    if let Some(raw) = file_contents {
        let file_cfg: SettingsFile = toml::from_str(raw)?;
        if let Some(v) = file_cfg.api_base_url {
            settings.api_base_url = normalize_base_url(&v)?;
        }
    }

    for name in API_URL_ENV_VARS {
        if let Some(v) = env(name).filter(|v| !v.trim().is_empty()) {
            settings.api_base_url = normalize_base_url(&v)?;
        }
    }

    Ok(settings)
}

pub fn normalize_base_url(raw: &str) -> Result<String, SettingsError> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed).map_err(|err| SettingsError::InvalidUrl {
        url: trimmed.to_string(),
        reason: err.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(SettingsError::InvalidUrl {
            url: trimmed.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(SettingsError::InvalidUrl {
            url: trimmed.to_string(),
            reason: "query strings and fragments are not allowed".into(),
        });
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}
