//! PNG output of a rendered particle field.
//!
//! Feature-gated behind `png` (default on) so that WASM builds can depend on
//! this crate without pulling in `image`. The rasterisation itself lives in
//! [`crate::pixel`].

use crate::pixel::{field_to_raster, Raster};
use landing_motion_core::MotionError;
use landing_motion_particles::ParticleField;
use std::path::Path;

/// Writes a raster as a PNG image.
///
/// Returns `MotionError::InvalidViewport` if the dimensions overflow `u32`,
/// or `MotionError::Io` on encode or write failure.
pub fn write_png(raster: &Raster, path: &Path) -> Result<(), MotionError> {
    let invalid = || MotionError::InvalidViewport {
        width: raster.width() as f64,
        height: raster.height() as f64,
    };
    let w = u32::try_from(raster.width()).map_err(|_| invalid())?;
    let h = u32::try_from(raster.height()).map_err(|_| invalid())?;
    let img = image::RgbaImage::from_raw(w, h, raster.data().to_vec())
        .ok_or_else(|| MotionError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| MotionError::Io(e.to_string()))?;
    tracing::debug!(path = %path.display(), width = w, height = h, "snapshot written");
    Ok(())
}

/// Renders `field` at its viewport size and writes it to `path`.
pub fn write_field_png(field: &ParticleField, path: &Path) -> Result<(), MotionError> {
    write_png(&field_to_raster(field)?, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use landing_motion_core::Viewport;
    use landing_motion_particles::ParticleFieldConfig;

    #[test]
    fn write_field_png_round_trip() {
        let vp = Viewport::new(32.0, 24.0).unwrap();
        let field = ParticleField::new(vp, ParticleFieldConfig::default(), 42).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("field.png");

        write_field_png(&field, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 32);
        assert_eq!(img.height(), 24);
    }

    #[test]
    fn oversized_viewport_fails_without_writing() {
        let vp = Viewport::new(4.0e9, 4.0e9).unwrap();
        let config = ParticleFieldConfig {
            count: 0,
            ..Default::default()
        };
        let field = ParticleField::new(vp, config, 1).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.png");
        assert!(matches!(
            write_field_png(&field, &path),
            Err(MotionError::InvalidViewport { .. })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        let raster = Raster::new(2, 2, [0, 0, 0]).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.png");
        assert!(matches!(write_png(&raster, &path), Err(MotionError::Io(_))));
    }
}
