//! Color theme and glyphs for the Cupid TUI.
//!
//! Rose and pink on a deep plum background, with an optional high-contrast
//! override.

use ratatui::style::{Color, Modifier, Style};

use cupid_types::ui::UiOptions;

mod colors {
    use super::Color;

    // === Backgrounds ===
    pub const BG: Color = Color::Rgb(36, 14, 30);
    pub const BG_CARD: Color = Color::Rgb(54, 22, 45);
    pub const BG_HIGHLIGHT: Color = Color::Rgb(82, 33, 66);

    // === Foregrounds ===
    pub const TEXT_PRIMARY: Color = Color::Rgb(255, 236, 242);
    pub const TEXT_MUTED: Color = Color::Rgb(190, 140, 165);

    // === Brand ===
    pub const ROSE: Color = Color::Rgb(244, 63, 94);
    pub const PINK: Color = Color::Rgb(236, 72, 153);
    pub const BLUSH: Color = Color::Rgb(251, 207, 232);
    pub const HEART_DIM: Color = Color::Rgb(120, 40, 80);

    // === Semantic ===
    pub const SUCCESS: Color = Color::Rgb(134, 239, 172);
    pub const WARNING: Color = Color::Rgb(253, 224, 71);
}

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub bg_card: Color,
    pub bg_highlight: Color,
    pub text_primary: Color,
    pub text_muted: Color,
    pub rose: Color,
    pub pink: Color,
    pub blush: Color,
    pub heart_dim: Color,
    pub success: Color,
    pub warning: Color,
}

impl Palette {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            bg: colors::BG,
            bg_card: colors::BG_CARD,
            bg_highlight: colors::BG_HIGHLIGHT,
            text_primary: colors::TEXT_PRIMARY,
            text_muted: colors::TEXT_MUTED,
            rose: colors::ROSE,
            pink: colors::PINK,
            blush: colors::BLUSH,
            heart_dim: colors::HEART_DIM,
            success: colors::SUCCESS,
            warning: colors::WARNING,
        }
    }

    #[must_use]
    pub fn high_contrast() -> Self {
        Self {
            bg: Color::Black,
            bg_card: Color::Black,
            bg_highlight: Color::DarkGray,
            text_primary: Color::White,
            text_muted: Color::Gray,
            rose: Color::LightRed,
            pink: Color::LightMagenta,
            blush: Color::White,
            heart_dim: Color::DarkGray,
            success: Color::Green,
            warning: Color::Yellow,
        }
    }
}

#[must_use]
pub fn palette(options: UiOptions) -> Palette {
    if options.high_contrast {
        Palette::high_contrast()
    } else {
        Palette::standard()
    }
}

/// ASCII/Unicode glyphs. Every entry is one cell wide.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    /// Background hearts, indexed by heart style.
    pub hearts: [&'static str; 3],
    pub heart: &'static str,
    pub selected: &'static str,
    pub bullet: &'static str,
}

#[must_use]
pub fn glyphs(options: UiOptions) -> Glyphs {
    if options.ascii_only {
        Glyphs {
            hearts: ["*", "+", "o"],
            heart: "<3",
            selected: ">",
            bullet: "-",
        }
    } else {
        Glyphs {
            hearts: ["♥", "❤", "♡"],
            heart: "❤",
            selected: "▸",
            bullet: "·",
        }
    }
}

/// Pre-defined styles for common UI elements.
pub mod styles {
    use super::{Modifier, Palette, Style};

    #[must_use]
    pub fn title(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.rose)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn label(palette: &Palette) -> Style {
        Style::default().fg(palette.blush)
    }

    #[must_use]
    pub fn input(palette: &Palette, focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(palette.text_primary)
                .bg(palette.bg_highlight)
        } else {
            Style::default().fg(palette.text_primary)
        }
    }

    #[must_use]
    pub fn placeholder(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.text_muted)
            .add_modifier(Modifier::ITALIC)
    }

    #[must_use]
    pub fn accept_button(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.text_primary)
            .bg(palette.rose)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn decline_button(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted).bg(palette.bg_card)
    }

    #[must_use]
    pub fn choice(palette: &Palette, highlighted: bool) -> Style {
        if highlighted {
            Style::default()
                .fg(palette.bg)
                .bg(palette.pink)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.blush)
        }
    }

    #[must_use]
    pub fn key_hint(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn key_highlight(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.pink)
            .add_modifier(Modifier::BOLD)
    }
}
