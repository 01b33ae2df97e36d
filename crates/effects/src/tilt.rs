//! Pointer-following 3D tilt for feature cards.

use landing_motion_core::{DVec2, Rect, Throttle};
use serde::{Deserialize, Serialize};

/// Tilt limits and presentation constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltConfig {
    /// Rotation about X (degrees) when the pointer is at the top or bottom edge.
    pub max_angle_x: f64,
    /// Rotation about Y (degrees) when the pointer is at the left or right edge.
    pub max_angle_y: f64,
    pub perspective_px: f64,
    /// Scale applied while tilted.
    pub scale: f64,
    pub transition_ms: f64,
    /// Minimum spacing between accepted pointer moves.
    pub throttle_ms: f64,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            max_angle_x: 15.0,
            max_angle_y: 15.0,
            perspective_px: 1000.0,
            scale: 1.02,
            transition_ms: 400.0,
            throttle_ms: 100.0,
        }
    }
}

/// Tilt state for one card.
#[derive(Debug, Clone)]
pub struct TiltCard {
    config: TiltConfig,
    /// Degrees about X and Y.
    rotation: DVec2,
    throttle: Throttle,
}

impl Default for TiltCard {
    fn default() -> Self {
        Self::new(TiltConfig::default())
    }
}

impl TiltCard {
    pub fn new(config: TiltConfig) -> Self {
        Self {
            config,
            rotation: DVec2::ZERO,
            throttle: Throttle::new(config.throttle_ms),
        }
    }

    /// Pointer moved over the card. Returns whether the rotation was updated.
    ///
    /// Moves arriving within the throttle window are dropped. Degenerate
    /// (zero-sized) cards are ignored.
    pub fn pointer_move(&mut self, bounds: Rect, pointer: DVec2, now: f64) -> bool {
        if bounds.width <= 0.0 || bounds.height <= 0.0 || !self.throttle.accept(now) {
            return false;
        }
        let local = bounds.to_local(pointer);
        let center = bounds.half_extent();
        self.rotation = DVec2::new(
            (local.y - center.y) / center.y * self.config.max_angle_x,
            (center.x - local.x) / center.x * self.config.max_angle_y,
        );
        true
    }

    /// Pointer left the card: flatten it again.
    pub fn pointer_leave(&mut self) {
        self.rotation = DVec2::ZERO;
    }

    /// `(rotate_x, rotate_y)` in degrees.
    pub fn rotation(&self) -> DVec2 {
        self.rotation
    }

    pub fn is_tilted(&self) -> bool {
        self.rotation != DVec2::ZERO
    }

    pub fn scale(&self) -> f64 {
        if self.is_tilted() {
            self.config.scale
        } else {
            1.0
        }
    }

    /// CSS `transform` value for the card.
    pub fn transform(&self) -> String {
        format!(
            "perspective({}px) rotateX({}deg) rotateY({}deg) scale({})",
            self.config.perspective_px,
            self.rotation.x,
            self.rotation.y,
            self.scale()
        )
    }

    /// CSS `transition` value for the card.
    pub fn transition(&self) -> String {
        format!(
            "transform {}ms cubic-bezier(0.03, 0.98, 0.52, 0.99)",
            self.config.transition_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn card() -> (TiltCard, Rect) {
        (TiltCard::default(), Rect::new(100.0, 50.0, 200.0, 100.0))
    }

    #[test]
    fn centre_is_flat() {
        let (mut t, r) = card();
        assert!(t.pointer_move(r, DVec2::new(200.0, 100.0), 0.0));
        assert_eq!(t.rotation(), DVec2::ZERO);
        assert_eq!(t.scale(), 1.0);
    }

    #[test]
    fn corners_reach_max_angles() {
        let (mut t, r) = card();
        // bottom-left corner
        t.pointer_move(r, DVec2::new(100.0, 150.0), 0.0);
        assert!((t.rotation().x - 15.0).abs() < EPS);
        assert!((t.rotation().y - 15.0).abs() < EPS);
        // top-right corner
        t.pointer_move(r, DVec2::new(300.0, 50.0), 200.0);
        assert!((t.rotation().x + 15.0).abs() < EPS);
        assert!((t.rotation().y + 15.0).abs() < EPS);
        assert_eq!(t.scale(), 1.02);
    }

    #[test]
    fn moves_inside_throttle_window_are_dropped() {
        let (mut t, r) = card();
        assert!(t.pointer_move(r, DVec2::new(100.0, 150.0), 1000.0));
        let first = t.rotation();
        assert!(!t.pointer_move(r, DVec2::new(300.0, 50.0), 1050.0));
        assert_eq!(t.rotation(), first);
        assert!(t.pointer_move(r, DVec2::new(300.0, 50.0), 1100.0));
        assert_ne!(t.rotation(), first);
    }

    #[test]
    fn leave_resets_rotation() {
        let (mut t, r) = card();
        t.pointer_move(r, DVec2::new(120.0, 60.0), 0.0);
        assert!(t.is_tilted());
        t.pointer_leave();
        assert!(!t.is_tilted());
        assert_eq!(t.transform(), "perspective(1000px) rotateX(0deg) rotateY(0deg) scale(1)");
    }

    #[test]
    fn zero_sized_card_is_ignored() {
        let mut t = TiltCard::default();
        assert!(!t.pointer_move(Rect::new(0.0, 0.0, 0.0, 10.0), DVec2::ZERO, 0.0));
        assert!(!t.is_tilted());
    }

    #[test]
    fn transition_uses_configured_duration() {
        let t = TiltCard::new(TiltConfig {
            transition_ms: 250.0,
            ..Default::default()
        });
        assert!(t.transition().starts_with("transform 250ms"));
    }
}
