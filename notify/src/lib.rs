//! Acceptance notifications.
//!
//! When the recipient says yes, the card tells the sender by email. Delivery
//! is fire-and-forget: [`dispatch`] spawns the send and returns at once, and
//! a failure only ever reaches the log.

use std::{future::Future, sync::Arc};

use reqwest::StatusCode;
use thiserror::Error;
use tokio::task::JoinHandle;

use cupid_core::Notification;

mod emailjs;

pub use emailjs::{EmailJsClient, EmailJsSettings, SEND_PATH};

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("notification rejected with {status}: {body}")]
    Rejected { status: StatusCode, body: String },
    #[error("notification is not configured: {0}")]
    Config(&'static str),
}

/// Something that can deliver an acceptance [`Notification`].
pub trait Notifier: Send + Sync + 'static {
    fn send(
        &self,
        notification: &Notification,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

/// Send in the background. The caller never waits on the result.
pub fn dispatch<N: Notifier>(notifier: Arc<N>, notification: Notification) -> JoinHandle<()> {
    tokio::spawn(async move {
        match notifier.send(&notification).await {
            Ok(()) => tracing::info!("Acceptance notification sent"),
            Err(err) => tracing::warn!(error = %err, "Acceptance notification failed"),
        }
    })
}
