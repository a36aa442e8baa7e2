//! EmailJS REST client.

use std::{fmt, time::Duration};

use serde::Serialize;

use cupid_core::Notification;

use crate::{Notifier, NotifyError};

/// Path of the send endpoint, relative to the EmailJS origin.
pub const SEND_PATH: &str = "/api/v1.0/email/send";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Clone)]
pub struct EmailJsSettings {
    /// Origin such as `https://api.emailjs.com`.
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

// Manual Debug impl to keep the public key out of logs.
impl fmt::Debug for EmailJsSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailJsSettings")
            .field("endpoint", &self.endpoint)
            .field("service_id", &self.service_id)
            .field("template_id", &self.template_id)
            .field("public_key", &"[REDACTED]")
            .finish()
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

#[derive(Serialize)]
struct TemplateParams<'a> {
    to_name: &'a str,
    to_email: &'a str,
    from_name: &'a str,
    message: &'a str,
}

#[derive(Debug)]
pub struct EmailJsClient {
    http: reqwest::Client,
    settings: EmailJsSettings,
    send_url: String,
}

impl EmailJsClient {
    pub fn new(settings: EmailJsSettings) -> Result<Self, NotifyError> {
        for (value, field) in [
            (&settings.service_id, "service_id is empty"),
            (&settings.template_id, "template_id is empty"),
            (&settings.public_key, "public_key is empty"),
        ] {
            if value.trim().is_empty() {
                return Err(NotifyError::Config(field));
            }
        }

        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        let send_url = format!("{}{SEND_PATH}", settings.endpoint.trim().trim_end_matches('/'));

        Ok(Self {
            http,
            settings,
            send_url,
        })
    }

    #[must_use]
    pub fn send_url(&self) -> &str {
        &self.send_url
    }
}

impl Notifier for EmailJsClient {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let body = SendRequest {
            service_id: &self.settings.service_id,
            template_id: &self.settings.template_id,
            user_id: &self.settings.public_key,
            template_params: TemplateParams {
                to_name: &notification.recipient_name,
                to_email: &notification.recipient_email,
                from_name: &notification.sender_name,
                message: &notification.message,
            },
        };

        // Single attempt: a failed notification is logged, never retried.
        let response = self.http.post(&self.send_url).json(&body).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(NotifyError::Rejected { status, body })
    }
}
