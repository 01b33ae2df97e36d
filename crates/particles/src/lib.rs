#![deny(unsafe_code)]
//! Ambient particle field for the landing page background.
//!
//! A fixed population of dots drifts across the viewport. In the default
//! scattering regime each dot moves freely and reflects off the edges; a click
//! on the bare background switches every dot to steer toward the pointer, with
//! speed proportional to distance and capped at a saturation value. The whole
//! population is regenerated when the viewport is resized.
//!
//! The field is driven one frame at a time by a host (see
//! [`landing_motion_core::FrameLoop`]) and renders to a list of [`Sprite`]s.

pub mod field;
pub mod particle;
pub mod render;

pub use field::{ClickTarget, FieldEvent, ParticleField, ParticleFieldConfig, MAX_COUNT};
pub use particle::{FieldMode, Particle};
pub use render::Sprite;
