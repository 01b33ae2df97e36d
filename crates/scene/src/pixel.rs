//! Pure-computation rasterisation of particle sprites into an RGBA8 buffer.
//!
//! Always available (no feature gate) so that both the PNG snapshot path and
//! any `ImageData` path share the same conversion.

use landing_motion_core::{DVec2, MotionError};
use landing_motion_particles::{ParticleField, Sprite};

/// Page background behind the field.
pub const BACKGROUND: [u8; 3] = [0x0b, 0x0b, 0x12];
/// Dot colour.
pub const INK: [u8; 3] = [0xff, 0xff, 0xff];

/// Largest raster side accepted, the browser canvas limit.
pub const MAX_SIDE: usize = 32_767;

/// Radius of the pointer ring drawn while attracting.
pub const INDICATOR_RADIUS: f64 = 8.0;
/// Stroke width of the pointer ring.
pub const INDICATOR_STROKE: f64 = 2.0;
/// Opacity of the pointer ring.
pub const INDICATOR_OPACITY: f64 = 0.5;

/// An RGBA8 image, row-major, opaque background.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Raster {
    /// A `width x height` image filled with `background`.
    ///
    /// Returns `MotionError::InvalidViewport` if a side exceeds [`MAX_SIDE`]
    /// or the RGBA buffer length overflows `usize`.
    pub fn new(width: usize, height: usize, background: [u8; 3]) -> Result<Self, MotionError> {
        let invalid = MotionError::InvalidViewport {
            width: width as f64,
            height: height as f64,
        };
        if width > MAX_SIDE || height > MAX_SIDE {
            return Err(invalid);
        }
        let pixels = width
            .checked_mul(height)
            .filter(|n| n.checked_mul(4).is_some())
            .ok_or(invalid)?;
        let [r, g, b] = background;
        Ok(Self {
            width,
            height,
            data: [r, g, b, 255].repeat(pixels),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// RGBA at `(x, y)`. Panics when out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * 4;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    fn blend(&mut self, x: usize, y: usize, color: [u8; 3], alpha: f64) {
        let i = (y * self.width + x) * 4;
        let a = alpha.clamp(0.0, 1.0);
        for (c, &src) in self.data[i..i + 3].iter_mut().zip(color.iter()) {
            *c = (f64::from(*c) * (1.0 - a) + f64::from(src) * a).round() as u8;
        }
    }

    /// Blends every pixel whose centre satisfies `inside` within the given
    /// bounding box.
    fn fill_where<F>(&mut self, center: DVec2, reach: f64, color: [u8; 3], alpha: f64, inside: F)
    where
        F: Fn(f64) -> bool,
    {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let max_x = (self.width - 1) as f64;
        let max_y = (self.height - 1) as f64;
        let x0 = (center.x - reach).floor().clamp(0.0, max_x) as usize;
        let x1 = (center.x + reach).ceil().clamp(0.0, max_x) as usize;
        let y0 = (center.y - reach).floor().clamp(0.0, max_y) as usize;
        let y1 = (center.y + reach).ceil().clamp(0.0, max_y) as usize;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = DVec2::new(x as f64 + 0.5, y as f64 + 0.5).distance(center);
                if inside(d) {
                    self.blend(x, y, color, alpha);
                }
            }
        }
    }

    /// Draws a filled circle of diameter `size`. Dots smaller than a pixel
    /// still cover the pixel containing their centre.
    pub fn fill_circle(&mut self, center: DVec2, size: f64, color: [u8; 3], alpha: f64) {
        let r = (size / 2.0).max(std::f64::consts::FRAC_1_SQRT_2);
        self.fill_where(center, r, color, alpha, |d| d <= r);
    }

    /// Draws a ring of outer radius `radius` and the given stroke width.
    pub fn stroke_circle(&mut self, center: DVec2, radius: f64, stroke: f64, color: [u8; 3], alpha: f64) {
        let inner = (radius - stroke).max(0.0);
        self.fill_where(center, radius, color, alpha, |d| d <= radius && d >= inner);
    }
}

/// Rasterises `sprites` over `background`.
pub fn sprites_to_raster(
    sprites: &[Sprite],
    width: usize,
    height: usize,
    background: [u8; 3],
) -> Result<Raster, MotionError> {
    let mut raster = Raster::new(width, height, background)?;
    for s in sprites {
        raster.fill_circle(DVec2::new(s.x, s.y), s.size, INK, s.opacity);
    }
    Ok(raster)
}

/// Renders the whole field at its viewport size, including the pointer ring
/// while attracting.
pub fn field_to_raster(field: &ParticleField) -> Result<Raster, MotionError> {
    let vp = field.viewport();
    let (w, h) = (vp.width().ceil() as usize, vp.height().ceil() as usize);
    let mut raster = sprites_to_raster(&field.sprites(), w, h, BACKGROUND)?;
    if let Some(p) = field.cursor_indicator() {
        raster.stroke_circle(p, INDICATOR_RADIUS, INDICATOR_STROKE, INK, INDICATOR_OPACITY);
    }
    Ok(raster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use landing_motion_core::Viewport;
    use landing_motion_particles::{ClickTarget, ParticleFieldConfig};

    fn sprite(x: f64, y: f64, size: f64, opacity: f64) -> Sprite {
        Sprite {
            id: 0,
            x,
            y,
            size,
            opacity,
        }
    }

    #[test]
    fn raster_has_expected_length_and_opaque_background() {
        let r = sprites_to_raster(&[], 8, 4, BACKGROUND).unwrap();
        assert_eq!(r.data().len(), 8 * 4 * 4);
        assert!(r.data().chunks(4).all(|px| px == [0x0b, 0x0b, 0x12, 255]));
    }

    #[test]
    fn dot_blends_toward_ink_by_opacity() {
        let r = sprites_to_raster(&[sprite(5.5, 5.5, 4.0, 0.5)], 12, 12, [0, 0, 0]).unwrap();
        assert_eq!(r.pixel(5, 5), [128, 128, 128, 255]);
        assert_eq!(r.pixel(0, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn tiny_dot_still_covers_its_pixel() {
        let r = sprites_to_raster(&[sprite(2.5, 2.5, 0.1, 1.0)], 5, 5, [0, 0, 0]).unwrap();
        assert_eq!(r.pixel(2, 2), [255, 255, 255, 255]);
        assert_eq!(r.pixel(0, 2), [0, 0, 0, 255]);
    }

    #[test]
    fn dots_on_the_edge_are_clipped_not_panicking() {
        let r = sprites_to_raster(&[sprite(0.0, 0.0, 4.0, 1.0), sprite(10.0, 10.0, 4.0, 1.0)], 10, 10, [0, 0, 0]).unwrap();
        assert_eq!(r.pixel(0, 0), [255, 255, 255, 255]);
        assert_eq!(r.pixel(9, 9), [255, 255, 255, 255]);
    }

    #[test]
    fn zero_sized_raster_is_empty() {
        let r = sprites_to_raster(&[sprite(0.0, 0.0, 4.0, 1.0)], 0, 0, BACKGROUND).unwrap();
        assert!(r.data().is_empty());
    }

    #[test]
    fn overflowing_dimensions_are_an_error_not_a_panic() {
        assert!(matches!(
            Raster::new(usize::MAX, 2, BACKGROUND),
            Err(MotionError::InvalidViewport { .. })
        ));
        assert!(Raster::new(MAX_SIDE + 1, 1, BACKGROUND).is_err());
        assert!(Raster::new(MAX_SIDE, 1, BACKGROUND).is_ok());
        let vp = Viewport::new(4.0e9, 4.0e9).unwrap();
        let config = ParticleFieldConfig {
            count: 0,
            ..Default::default()
        };
        let field = ParticleField::new(vp, config, 1).unwrap();
        assert!(matches!(field_to_raster(&field), Err(MotionError::InvalidViewport { .. })));
    }

    #[test]
    fn ring_leaves_its_centre_untouched() {
        let mut r = Raster::new(32, 32, [0, 0, 0]).unwrap();
        r.stroke_circle(DVec2::new(16.0, 16.0), 8.0, 2.0, INK, 1.0);
        assert_eq!(r.pixel(16, 16), [0, 0, 0, 255]);
        assert_eq!(r.pixel(16 + 7, 16), [255, 255, 255, 255]);
    }

    #[test]
    fn field_raster_matches_viewport_and_draws_ring_when_attracting() {
        let vp = Viewport::new(64.0, 48.0).unwrap();
        let config = ParticleFieldConfig {
            count: 0,
            ..Default::default()
        };
        let mut field = ParticleField::new(vp, config, 1).unwrap();
        let plain = field_to_raster(&field).unwrap();
        assert_eq!((plain.width(), plain.height()), (64, 48));

        field.click(ClickTarget::Background);
        field.set_pointer(DVec2::new(32.0, 24.0));
        let ringed = field_to_raster(&field).unwrap();
        assert_ne!(plain, ringed);
    }
}
