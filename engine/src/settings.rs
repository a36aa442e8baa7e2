//! Resolved runtime settings, built from the optional config file.

use url::Url;

use cupid_config::{ConfigError, CupidConfig, DEFAULT_BASE_URL};
use cupid_core::{DEFAULT_REPLY_HOST, EvadeProfile};
use cupid_notify::{EmailJsClient, EmailJsSettings};
use cupid_types::ui::UiOptions;

#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Origin and path every share link starts with.
    pub base_url: Url,
    pub reply_host: String,
    pub ui: UiOptions,
    pub evade: EvadeProfile,
}

impl AppSettings {
    /// Defaults with no config file.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::from_config(&CupidConfig::default())
    }

    /// An unparseable `base_url` is logged and replaced by the default.
    pub fn from_config(config: &CupidConfig) -> Result<Self, ConfigError> {
        let base_url = match config.base_url() {
            Ok(url) => url,
            Err(err) => {
                tracing::warn!(error = %err, "Falling back to default base URL");
                Url::parse(DEFAULT_BASE_URL).map_err(|source| ConfigError::InvalidBaseUrl {
                    value: DEFAULT_BASE_URL.to_string(),
                    source,
                })?
            }
        };

        Ok(Self {
            base_url,
            reply_host: config
                .reply_host()
                .unwrap_or(DEFAULT_REPLY_HOST)
                .to_string(),
            ui: config.ui_options(),
            evade: EvadeProfile::TERMINAL,
        })
    }
}

/// Build the EmailJS client from `[notify]`, if the section is usable.
#[must_use]
pub fn notifier_from_config(config: &CupidConfig) -> Option<EmailJsClient> {
    let notify = config.notify.as_ref()?;
    let Some(public_key) = notify.resolved_public_key() else {
        tracing::warn!("[notify] public_key is empty; acceptance emails are disabled");
        return None;
    };

    let settings = EmailJsSettings {
        endpoint: notify.endpoint().to_string(),
        service_id: notify.service_id.clone(),
        template_id: notify.template_id.clone(),
        public_key,
    };
    match EmailJsClient::new(settings) {
        Ok(client) => Some(client),
        Err(err) => {
            tracing::warn!(error = %err, "Acceptance emails are disabled");
            None
        }
    }
}
