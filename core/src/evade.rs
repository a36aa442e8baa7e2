//! Placement for the decline control when it runs away from the pointer.
//!
//! The control lands anywhere inside the viewport minus a margin on every
//! side and a band at the top that holds the question. When the viewport is
//! too small for that, the range collapses onto its minimum instead of
//! inverting, so the control is pinned at `(margin, top_band)`.

use cupid_types::{ButtonPlacement, Footprint, Viewport};

/// Sizes used to keep the control on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvadeProfile {
    /// Viewports narrower than this use the compact footprint.
    pub compact_below: f64,
    pub compact: Footprint,
    pub regular: Footprint,
    pub margin: f64,
    pub top_band: f64,
}

impl EvadeProfile {
    /// Browser layout, in CSS pixels.
    pub const WEB: Self = Self {
        compact_below: 768.0,
        compact: Footprint::new(150.0, 55.0),
        regular: Footprint::new(160.0, 70.0),
        margin: 30.0,
        top_band: 100.0,
    };

    /// Terminal layout, in cells.
    pub const TERMINAL: Self = Self {
        compact_below: 80.0,
        compact: Footprint::new(25.0, 3.0),
        regular: Footprint::new(26.0, 3.0),
        margin: 1.0,
        top_band: 6.0,
    };

    #[must_use]
    pub fn footprint(&self, viewport: Viewport) -> Footprint {
        if viewport.width() < self.compact_below {
            self.compact
        } else {
            self.regular
        }
    }

    #[must_use]
    pub fn bounds(&self, viewport: Viewport) -> EvadeBounds {
        let footprint = self.footprint(viewport);
        let min_x = self.margin;
        let min_y = self.top_band;
        EvadeBounds {
            min_x,
            max_x: min_x.max(viewport.width() - footprint.width - self.margin),
            min_y,
            max_y: min_y.max(viewport.height() - footprint.height - self.margin),
        }
    }
}

/// Allowed range for the control's top-left corner.
///
/// Invariant: `min_x <= max_x` and `min_y <= max_y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvadeBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl EvadeBounds {
    /// Map two unit samples onto the allowed range.
    ///
    /// Samples outside `[0, 1]` are clamped; non-finite samples count as 0.
    #[must_use]
    pub fn place(&self, rx: f64, ry: f64) -> ButtonPlacement {
        ButtonPlacement {
            x: lerp(self.min_x, self.max_x, unit(rx)),
            y: lerp(self.min_y, self.max_y, unit(ry)),
        }
    }

    #[must_use]
    pub fn contains(&self, placement: ButtonPlacement) -> bool {
        (self.min_x..=self.max_x).contains(&placement.x)
            && (self.min_y..=self.max_y).contains(&placement.y)
    }
}

fn unit(sample: f64) -> f64 {
    if sample.is_finite() {
        sample.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn lerp(min: f64, max: f64, t: f64) -> f64 {
    // Rounding can overshoot `max` by an ulp; pull it back in.
    (min + t * (max - min)).min(max).max(min)
}

/// Pick a fresh random spot for the decline control.
#[must_use]
pub fn evade(viewport: Viewport, profile: &EvadeProfile) -> ButtonPlacement {
    profile
        .bounds(viewport)
        .place(rand::random::<f64>(), rand::random::<f64>())
}

#[cfg(test)]
mod tests {
    use super::{EvadeBounds, EvadeProfile, evade};
    use crate::phrases::{DECLINE_PHRASES, DEFAULT_DECLINE_LABEL};
    use cupid_types::{ButtonPlacement, Viewport};

    const SAMPLES: [f64; 5] = [0.0, 0.25, 0.5, 0.999_999, 1.0];

    #[test]
    fn desktop_bounds_match_layout() {
        let bounds = EvadeProfile::WEB.bounds(Viewport::new(1280.0, 800.0));
        assert_eq!(
            bounds,
            EvadeBounds {
                min_x: 30.0,
                max_x: 1280.0 - 160.0 - 30.0,
                min_y: 100.0,
                max_y: 800.0 - 70.0 - 30.0,
            }
        );
    }

    #[test]
    fn narrow_viewport_uses_compact_footprint() {
        let bounds = EvadeProfile::WEB.bounds(Viewport::new(375.0, 667.0));
        assert!((bounds.max_x - (375.0 - 150.0 - 30.0)).abs() < f64::EPSILON);
        assert!((bounds.max_y - (667.0 - 55.0 - 30.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn tiny_viewport_collapses_to_minimum() {
        let bounds = EvadeProfile::WEB.bounds(Viewport::new(1.0, 1.0));
        assert!((bounds.max_x - bounds.min_x).abs() < f64::EPSILON);
        assert!((bounds.max_y - bounds.min_y).abs() < f64::EPSILON);
        assert_eq!(bounds.place(0.7, 0.3), ButtonPlacement { x: 30.0, y: 100.0 });
    }

    #[test]
    fn placement_is_contained_for_every_viewport() {
        for profile in [EvadeProfile::WEB, EvadeProfile::TERMINAL] {
            for width in [1.0, 2.0, 50.0, 79.0, 80.0, 200.0, 767.0, 768.0, 1920.0] {
                for height in [1.0, 3.0, 24.0, 100.0, 180.0, 1080.0] {
                    let bounds = profile.bounds(Viewport::new(width, height));
                    assert!(bounds.min_x <= bounds.max_x);
                    assert!(bounds.min_y <= bounds.max_y);
                    for rx in SAMPLES {
                        for ry in SAMPLES {
                            let placement = bounds.place(rx, ry);
                            assert!(
                                bounds.contains(placement),
                                "{placement:?} escaped {bounds:?} for {width}x{height}"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn out_of_range_samples_are_clamped() {
        let bounds = EvadeProfile::WEB.bounds(Viewport::new(1280.0, 800.0));
        assert!(bounds.contains(bounds.place(-3.0, 7.5)));
        assert!(bounds.contains(bounds.place(f64::NAN, f64::INFINITY)));
        assert_eq!(bounds.place(-1.0, -1.0), ButtonPlacement { x: 30.0, y: 100.0 });
    }

    #[test]
    fn random_evade_stays_inside() {
        let viewport = Viewport::new(390.0, 844.0);
        let bounds = EvadeProfile::WEB.bounds(viewport);
        for _ in 0..500 {
            assert!(bounds.contains(evade(viewport, &EvadeProfile::WEB)));
        }
    }

    #[test]
    fn terminal_button_fits_every_label() {
        let longest = DECLINE_PHRASES
            .iter()
            .chain([&DEFAULT_DECLINE_LABEL])
            .map(|label| label.chars().count())
            .max()
            .unwrap();
        for footprint in [EvadeProfile::TERMINAL.compact, EvadeProfile::TERMINAL.regular] {
            // two border cells
            assert!(footprint.width - 2.0 >= longest as f64, "{footprint:?}");
        }
    }

    #[test]
    fn degenerate_viewport_never_panics() {
        let viewport = Viewport::new(f64::NAN, 0.0);
        let placement = evade(viewport, &EvadeProfile::TERMINAL);
        assert_eq!(placement, ButtonPlacement { x: 1.0, y: 6.0 });
    }
}
