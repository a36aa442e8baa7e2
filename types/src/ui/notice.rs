//! Short-lived status line shown under the active screen.

use std::time::Duration;

use super::EffectTimer;

/// How long a notice stays on screen.
pub const NOTICE_LIFETIME: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct Notice {
    kind: NoticeKind,
    text: String,
    timer: EffectTimer,
}

impl Notice {
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, text)
    }

    #[must_use]
    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Warning, text)
    }

    fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            timer: EffectTimer::new(NOTICE_LIFETIME),
        }
    }

    pub fn advance(&mut self, delta: Duration) {
        self.timer.advance(delta);
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.timer.is_finished()
    }

    /// True during the last quarter of the notice's lifetime.
    #[must_use]
    pub fn is_fading(&self) -> bool {
        self.timer.progress() >= 0.75
    }

    #[must_use]
    pub fn kind(&self) -> NoticeKind {
        self.kind
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}
