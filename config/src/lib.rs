//! Configuration loading for Cupid.
//!
//! Reads `~/.cupid/config.toml`. Every section is optional and a missing file
//! means defaults throughout.

use std::{
    env, fmt, fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use cupid_types::ui::UiOptions;

/// Where shared links point when `[app] base_url` is not set.
pub const DEFAULT_BASE_URL: &str = "https://cupidon.example/";
/// EmailJS REST origin used when `[notify] endpoint` is not set.
pub const DEFAULT_NOTIFY_ENDPOINT: &str = "https://api.emailjs.com";

#[derive(Debug, Default, Deserialize)]
pub struct CupidConfig {
    pub app: Option<AppConfig>,
    /// Acceptance email. Without this section no notification is sent.
    pub notify: Option<NotifyConfig>,
    pub reply: Option<ReplyConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("base_url {value:?} is not a valid URL: {source}")]
    InvalidBaseUrl {
        value: String,
        source: url::ParseError,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => Some(path),
            ConfigError::InvalidBaseUrl { .. } => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Origin and path of the shared link.
    pub base_url: Option<String>,
    /// Use ASCII-only glyphs for hearts and markers.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
    /// Keep the background still.
    #[serde(default)]
    pub reduced_motion: bool,
}

#[derive(Deserialize)]
pub struct NotifyConfig {
    pub service_id: String,
    pub template_id: String,
    /// EmailJS public key. Supports `${VAR}` expansion.
    pub public_key: String,
    pub endpoint: Option<String>,
}

// Manual Debug impl to keep the public key out of logs.
impl fmt::Debug for NotifyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifyConfig")
            .field("service_id", &self.service_id)
            .field("template_id", &self.template_id)
            .field("public_key", &"[REDACTED]")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl NotifyConfig {
    /// Public key after environment expansion, or `None` if it ends up blank.
    #[must_use]
    pub fn resolved_public_key(&self) -> Option<String> {
        let key = expand_env_vars(&self.public_key);
        let key = key.trim();
        if key.is_empty() {
            None
        } else {
            Some(key.to_string())
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.endpoint
            .as_deref()
            .map(str::trim)
            .filter(|endpoint| !endpoint.is_empty())
            .unwrap_or(DEFAULT_NOTIFY_ENDPOINT)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ReplyConfig {
    /// Messaging host for the reply deep link.
    pub host: Option<String>,
}

/// Replace `${VAR}` with the variable's value. Unset variables become empty.
#[must_use]
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start + 2..].find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let var = &rest[start + 2..start + 2 + len];
        if !var.is_empty() {
            out.push_str(&env::var(var).unwrap_or_default());
        }
        rest = &rest[start + 2 + len + 1..];
    }

    out.push_str(rest);
    out
}

impl CupidConfig {
    /// Load the user's config file. `Ok(None)` when there is none.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// Base URL for shared links.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let value = self
            .app
            .as_ref()
            .and_then(|app| app.base_url.as_deref())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_BASE_URL);
        Url::parse(value).map_err(|source| ConfigError::InvalidBaseUrl {
            value: value.to_string(),
            source,
        })
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.app
            .as_ref()
            .map(|app| UiOptions {
                ascii_only: app.ascii_only,
                high_contrast: app.high_contrast,
                reduced_motion: app.reduced_motion,
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn reply_host(&self) -> Option<&str> {
        self.reply
            .as_ref()
            .and_then(|reply| reply.host.as_deref())
            .map(str::trim)
            .filter(|host| !host.is_empty())
    }
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".cupid").join("config.toml"))
}
