//! Scroll-linked rotation for the dashboard preview.

use serde::{Deserialize, Serialize};

/// How far an element has travelled through the viewport, in `[0, 1]`.
///
/// 0 when the element's top edge sits at the bottom of the viewport, 1 when
/// its bottom edge reaches the top. `element_top` is relative to the viewport.
pub fn scroll_progress(viewport_height: f64, element_top: f64, element_height: f64) -> f64 {
    let travel = viewport_height + element_height;
    if travel <= 0.0 {
        return 0.0;
    }
    ((viewport_height - element_top) / travel).clamp(0.0, 1.0)
}

/// Linear map from scroll progress to a rotation angle in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollRotation {
    pub from_deg: f64,
    pub to_deg: f64,
}

impl Default for ScrollRotation {
    fn default() -> Self {
        Self {
            from_deg: 25.0,
            to_deg: -25.0,
        }
    }
}

impl ScrollRotation {
    /// Angle for `progress`, which is clamped to `[0, 1]` first.
    pub fn angle(&self, progress: f64) -> f64 {
        let t = progress.clamp(0.0, 1.0);
        self.from_deg + (self.to_deg - self.from_deg) * t
    }

    /// Angle for an element at `element_top` in a viewport of `viewport_height`.
    pub fn angle_for(&self, viewport_height: f64, element_top: f64, element_height: f64) -> f64 {
        self.angle(scroll_progress(viewport_height, element_top, element_height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_endpoints_and_midpoint() {
        let r = ScrollRotation::default();
        assert_eq!(r.angle(0.0), 25.0);
        assert_eq!(r.angle(1.0), -25.0);
        assert_eq!(r.angle(0.5), 0.0);
    }

    #[test]
    fn angle_clamps_progress() {
        let r = ScrollRotation::default();
        assert_eq!(r.angle(-3.0), 25.0);
        assert_eq!(r.angle(7.0), -25.0);
    }

    #[test]
    fn progress_follows_element_through_viewport() {
        // 800px viewport, 400px element.
        assert_eq!(scroll_progress(800.0, 800.0, 400.0), 0.0);
        assert_eq!(scroll_progress(800.0, -400.0, 400.0), 1.0);
        assert_eq!(scroll_progress(800.0, 200.0, 400.0), 0.5);
        assert_eq!(scroll_progress(800.0, 2000.0, 400.0), 0.0);
    }

    #[test]
    fn degenerate_viewport_reports_zero() {
        assert_eq!(scroll_progress(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn angle_for_combines_both_steps() {
        let r = ScrollRotation::default();
        assert_eq!(r.angle_for(800.0, 200.0, 400.0), 0.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn angle_stays_between_endpoints(p in -10.0_f64..10.0) {
                let a = ScrollRotation::default().angle(p);
                prop_assert!((-25.0..=25.0).contains(&a));
            }

            #[test]
            fn progress_is_monotonic_in_scroll(
                vh in 1.0_f64..2000.0,
                eh in 0.0_f64..2000.0,
                top in -3000.0_f64..3000.0,
                delta in 0.0_f64..500.0,
            ) {
                // Scrolling down moves the element up (smaller top).
                prop_assert!(scroll_progress(vh, top - delta, eh) >= scroll_progress(vh, top, eh));
            }
        }
    }
}
