#![deny(unsafe_code)]
//! Component registry, headless timelines and CPU-side rendering.
//!
//! This crate sits between the component crates (`landing-motion-particles`,
//! `landing-motion-carousel`) and the front ends. The CLI uses it to look up
//! components by name, replay timelines on a [`VirtualHost`] and write PNG
//! snapshots; the browser binding shares the pixel conversion.
//!
//! [`VirtualHost`]: landing_motion_core::VirtualHost

pub mod pixel;
pub mod timeline;

#[cfg(feature = "png")]
pub mod snapshot;

use landing_motion_carousel::{featured_products, Carousel, Product};
use landing_motion_core::{Component, MotionError, Viewport};
use landing_motion_particles::ParticleField;
use serde_json::Value;

/// All registered component names.
const COMPONENT_NAMES: &[&str] = &["particles", "carousel"];

/// Every interactive component the page hosts.
///
/// Use [`ComponentKind::from_name`] for string-based construction.
#[derive(Debug)]
pub enum ComponentKind {
    /// Ambient particle background.
    Particles(ParticleField),
    /// Product carousel over the featured products.
    Carousel(Carousel<Product>),
}

impl ComponentKind {
    /// Constructs a component by name.
    ///
    /// Returns `MotionError::UnknownComponent` if the name is not registered.
    pub fn from_name(
        name: &str,
        viewport: Viewport,
        seed: u64,
        params: &Value,
    ) -> Result<Self, MotionError> {
        match name {
            "particles" => Ok(ComponentKind::Particles(ParticleField::from_json(
                viewport, seed, params,
            )?)),
            "carousel" => Ok(ComponentKind::Carousel(Carousel::from_json(
                featured_products(),
                params,
            )?)),
            _ => Err(MotionError::UnknownComponent(name.to_string())),
        }
    }

    /// Returns a slice of all registered component names.
    pub fn list_components() -> &'static [&'static str] {
        COMPONENT_NAMES
    }
}

impl Component for ComponentKind {
    fn name(&self) -> &'static str {
        match self {
            ComponentKind::Particles(c) => c.name(),
            ComponentKind::Carousel(c) => c.name(),
        }
    }

    fn params(&self) -> Value {
        match self {
            ComponentKind::Particles(c) => c.params(),
            ComponentKind::Carousel(c) => c.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            ComponentKind::Particles(c) => c.param_schema(),
            ComponentKind::Carousel(c) => c.param_schema(),
        }
    }

    fn state(&self) -> Value {
        match self {
            ComponentKind::Particles(c) => c.state(),
            ComponentKind::Carousel(c) => c.state(),
        }
    }
}
