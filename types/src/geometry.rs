//! Plain geometry used to place the decline control.
//!
//! Units are whatever the caller measures in: CSS pixels for the web
//! profile, terminal cells for the TUI.

/// Visible area the decline control must stay inside.
///
/// Non-finite or negative sizes are stored as zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f64,
    height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.height
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

/// Size of the control being placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub width: f64,
    pub height: f64,
}

impl Footprint {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Top-left corner of the decline control after an evade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonPlacement {
    pub x: f64,
    pub y: f64,
}
