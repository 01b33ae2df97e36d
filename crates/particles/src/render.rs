//! What the field looks like on a given frame, independent of the surface.

use crate::particle::FieldMode;
use serde::{Deserialize, Serialize};

/// Opacity of every dot while scattering.
pub const SCATTERING_OPACITY: f64 = 0.3;
/// Opacity of every dot while attracting, brighter to signal the mode change.
pub const ATTRACTING_OPACITY: f64 = 0.6;

/// A filled circle to draw, centred on `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    /// Diameter in pixels.
    pub size: f64,
    pub opacity: f64,
}

impl FieldMode {
    pub fn opacity(self) -> f64 {
        match self {
            FieldMode::Scattering => SCATTERING_OPACITY,
            FieldMode::Attracting => ATTRACTING_OPACITY,
        }
    }
}
