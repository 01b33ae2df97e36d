//! A single particle and the per-axis motion rules applied to it each frame.

use landing_motion_core::DVec2;
use serde::{Deserialize, Serialize};

/// One moving point in the field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Stable identity, `0..count`, preserved across frames.
    pub id: usize,
    pub position: DVec2,
    /// Displacement applied per frame.
    pub velocity: DVec2,
    /// Diameter in pixels, fixed at creation.
    pub size: f64,
}

/// Which motion regime the field is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldMode {
    /// Free, undamped motion reflecting off the viewport edges.
    #[default]
    Scattering,
    /// Every particle steers toward the tracked pointer.
    Attracting,
}

impl FieldMode {
    pub fn toggled(self) -> Self {
        match self {
            FieldMode::Scattering => FieldMode::Attracting,
            FieldMode::Attracting => FieldMode::Scattering,
        }
    }
}

/// Velocity that steers `position` toward `target`.
///
/// The magnitude is `min(distance / falloff, max_force)`, so force grows
/// linearly with distance and saturates at `falloff * max_force`. Returns
/// `None` at zero distance, where the direction is undefined.
pub fn attraction(position: DVec2, target: DVec2, falloff: f64, max_force: f64) -> Option<DVec2> {
    let delta = target - position;
    let distance = delta.length();
    if distance > 0.0 {
        let force = (distance / falloff).min(max_force);
        Some(delta / distance * force)
    } else {
        None
    }
}

/// Negates each velocity component whose coordinate sits on or past an edge
/// of `[0, extent]`.
pub fn reflect(position: DVec2, velocity: DVec2, extent: DVec2) -> DVec2 {
    let bounce = |p: f64, v: f64, max: f64| if p <= 0.0 || p >= max { -v } else { v };
    DVec2::new(
        bounce(position.x, velocity.x, extent.x),
        bounce(position.y, velocity.y, extent.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn toggled_flips_between_modes() {
        assert_eq!(FieldMode::Scattering.toggled(), FieldMode::Attracting);
        assert_eq!(FieldMode::Attracting.toggled(), FieldMode::Scattering);
        assert_eq!(FieldMode::default(), FieldMode::Scattering);
    }

    #[test]
    fn attraction_is_none_at_zero_distance() {
        let p = DVec2::new(42.0, 17.0);
        assert_eq!(attraction(p, p, 100.0, 2.0), None);
    }

    #[test]
    fn attraction_saturates_beyond_cap_distance() {
        let v = attraction(DVec2::ZERO, DVec2::new(150.0, 200.0), 100.0, 2.0).unwrap();
        assert!((v.length() - 2.0).abs() < EPS, "magnitude {}", v.length());
        assert!((v.x - 1.2).abs() < EPS && (v.y - 1.6).abs() < EPS, "direction {v}");
    }

    #[test]
    fn attraction_is_linear_below_cap() {
        let v = attraction(DVec2::new(100.0, 100.0), DVec2::new(100.0, 150.0), 100.0, 2.0).unwrap();
        assert!((v - DVec2::new(0.0, 0.5)).length() < EPS, "got {v}");
    }

    #[test]
    fn reflect_flips_only_axes_at_the_edge() {
        let extent = DVec2::new(800.0, 600.0);
        let v = DVec2::new(-0.5, 0.25);
        assert_eq!(reflect(DVec2::new(0.0, 300.0), v, extent), DVec2::new(0.5, 0.25));
        assert_eq!(reflect(DVec2::new(400.0, 600.0), v, extent), DVec2::new(-0.5, -0.25));
        assert_eq!(reflect(DVec2::new(400.0, 300.0), v, extent), v);
    }

    #[test]
    fn reflect_treats_overshoot_like_the_edge() {
        let extent = DVec2::new(10.0, 10.0);
        let out = reflect(DVec2::new(12.0, -1.0), DVec2::new(1.0, -1.0), extent);
        assert_eq!(out, DVec2::new(-1.0, 1.0));
    }
}
