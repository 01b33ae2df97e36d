//! Viewport and rectangle geometry in CSS pixel units.
//!
//! Positions are [`DVec2`] with the origin at the top-left corner of the
//! viewport, x growing right and y growing down.

use crate::error::MotionError;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// The visible area a component lays itself out in.
///
/// Extents are finite and non-negative. A zero extent is allowed (a collapsed
/// window); every coordinate then clamps to 0 on that axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    width: f64,
    height: f64,
}

impl Viewport {
    /// Creates a viewport, rejecting negative or non-finite extents.
    pub fn new(width: f64, height: f64) -> Result<Self, MotionError> {
        let valid = |v: f64| v.is_finite() && v >= 0.0;
        if !valid(width) || !valid(height) {
            return Err(MotionError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// `(width, height)` as a vector.
    pub fn extent(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    /// Clamps `p` into `[0, width] x [0, height]`.
    pub fn clamp(&self, p: DVec2) -> DVec2 {
        p.clamp(DVec2::ZERO, self.extent())
    }

    /// True if `p` lies inside the closed viewport rectangle.
    pub fn contains(&self, p: DVec2) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }
}

/// An axis-aligned box, as returned by a bounding-client-rect query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Centre of the box relative to its own top-left corner.
    pub fn half_extent(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Converts a viewport point into box-local coordinates.
    pub fn to_local(&self, p: DVec2) -> DVec2 {
        p - DVec2::new(self.left, self.top)
    }
}
