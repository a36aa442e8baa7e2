//! UI state types for the TUI layer.
//!
//! Pure data types with no IO, no async, no ratatui dependency.
//! Used by both the engine (state ownership) and tui (rendering/input).

mod animation;
mod notice;

pub use animation::EffectTimer;
pub use notice::{NOTICE_LIFETIME, Notice, NoticeKind};

/// UI configuration options derived from config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    pub ascii_only: bool,
    pub high_contrast: bool,
    /// Disable background motion (floating hearts).
    pub reduced_motion: bool,
}
