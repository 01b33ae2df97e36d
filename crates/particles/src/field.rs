//! The particle field: a fixed-size population animated once per frame.

use crate::particle::{attraction, reflect, FieldMode, Particle};
use crate::render::Sprite;
use landing_motion_core::{Component, DVec2, MotionError, Viewport};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Default population size.
const DEFAULT_COUNT: usize = 50;
/// Largest population a field accepts.
pub const MAX_COUNT: usize = 10_000;
/// Default bound for each initial velocity component, in pixels per frame.
const DEFAULT_MAX_SPEED: f64 = 1.0;
/// Default smallest dot diameter.
const DEFAULT_MIN_SIZE: f64 = 1.0;
/// Default largest dot diameter.
const DEFAULT_MAX_SIZE: f64 = 4.0;
/// Default distance over which attraction force grows by one unit.
const DEFAULT_ATTRACTION_FALLOFF: f64 = 100.0;
/// Default saturation cap on attraction speed.
const DEFAULT_MAX_FORCE: f64 = 2.0;

/// Tunable constants of the field.
///
/// Deserialises from a partial JSON object; missing keys take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParticleFieldConfig {
    /// Number of particles, fixed for the lifetime of the field.
    pub count: usize,
    /// Initial velocity components are drawn from `[-max_speed, max_speed]`.
    pub max_speed: f64,
    pub min_size: f64,
    pub max_size: f64,
    /// Distance at which attraction speed reaches 1.
    pub attraction_falloff: f64,
    /// Upper bound on attraction speed.
    pub max_force: f64,
}

impl Default for ParticleFieldConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            max_speed: DEFAULT_MAX_SPEED,
            min_size: DEFAULT_MIN_SIZE,
            max_size: DEFAULT_MAX_SIZE,
            attraction_falloff: DEFAULT_ATTRACTION_FALLOFF,
            max_force: DEFAULT_MAX_FORCE,
        }
    }
}

impl ParticleFieldConfig {
    /// Decodes a params object, falling back to defaults for missing keys.
    pub fn from_json(params: &Value) -> Result<Self, MotionError> {
        let config: Self = serde_json::from_value(params.clone())?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the sampler or the attraction rule cannot use.
    pub fn validate(&self) -> Result<(), MotionError> {
        if self.count > MAX_COUNT {
            return Err(MotionError::InvalidParams(format!(
                "count must be at most {MAX_COUNT}, got {}",
                self.count
            )));
        }
        let finite_non_negative = |v: f64| v.is_finite() && v >= 0.0;
        if !finite_non_negative(self.max_speed) {
            return Err(MotionError::InvalidParams(format!(
                "max_speed must be finite and non-negative, got {}",
                self.max_speed
            )));
        }
        if !finite_non_negative(self.min_size) || !self.max_size.is_finite() || self.min_size > self.max_size {
            return Err(MotionError::InvalidParams(format!(
                "size range [{}, {}] is not a valid non-negative interval",
                self.min_size, self.max_size
            )));
        }
        if !(self.attraction_falloff.is_finite() && self.attraction_falloff > 0.0) {
            return Err(MotionError::InvalidParams(format!(
                "attraction_falloff must be positive, got {}",
                self.attraction_falloff
            )));
        }
        if !finite_non_negative(self.max_force) {
            return Err(MotionError::InvalidParams(format!(
                "max_force must be finite and non-negative, got {}",
                self.max_force
            )));
        }
        Ok(())
    }
}

/// Where a click landed relative to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickTarget {
    /// The field's own background surface.
    Background,
    /// Foreground content layered above the field; the click bubbled up.
    Content,
}

impl ClickTarget {
    /// Classifies a click by comparing the event target with the element the
    /// listener is attached to.
    pub fn from_targets<T: PartialEq + ?Sized>(target: &T, current_target: &T) -> Self {
        if target == current_target {
            ClickTarget::Background
        } else {
            ClickTarget::Content
        }
    }
}

/// Inputs the field reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldEvent {
    PointerMoved(DVec2),
    Clicked(ClickTarget),
    Resized(Viewport),
    Frame,
}

/// A population of particles bouncing around or chasing the pointer.
///
/// Positions stay inside `[0, width] x [0, height]` at all times. The
/// population is regenerated wholesale whenever the viewport changes.
#[derive(Debug, Clone)]
pub struct ParticleField {
    viewport: Viewport,
    config: ParticleFieldConfig,
    mode: FieldMode,
    pointer: DVec2,
    particles: Vec<Particle>,
    rng: StdRng,
}

impl ParticleField {
    /// Creates a field of `config.count` randomly placed particles.
    pub fn new(viewport: Viewport, config: ParticleFieldConfig, seed: u64) -> Result<Self, MotionError> {
        config.validate()?;
        let mut field = Self {
            viewport,
            config,
            mode: FieldMode::default(),
            pointer: DVec2::ZERO,
            particles: Vec::with_capacity(config.count),
            rng: StdRng::seed_from_u64(seed),
        };
        field.populate();
        Ok(field)
    }

    /// Creates a field from a JSON params object.
    pub fn from_json(viewport: Viewport, seed: u64, params: &Value) -> Result<Self, MotionError> {
        Self::new(viewport, ParticleFieldConfig::from_json(params)?, seed)
    }

    fn populate(&mut self) {
        let ParticleFieldConfig {
            count,
            max_speed,
            min_size,
            max_size,
            ..
        } = self.config;
        let (w, h) = (self.viewport.width(), self.viewport.height());
        let rng = &mut self.rng;
        self.particles = (0..count)
            .map(|id| Particle {
                id,
                position: DVec2::new(rng.random_range(0.0..=w), rng.random_range(0.0..=h)),
                velocity: DVec2::new(
                    rng.random_range(-max_speed..=max_speed),
                    rng.random_range(-max_speed..=max_speed),
                ),
                size: rng.random_range(min_size..=max_size),
            })
            .collect();
        tracing::debug!(count, width = w, height = h, "particle field populated");
    }

    /// Replaces every particle with a fresh random one sized for `viewport`.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.populate();
    }

    /// Records the latest pointer position. Only read while attracting.
    pub fn set_pointer(&mut self, pointer: DVec2) {
        self.pointer = pointer;
    }

    /// Toggles the mode if the click hit the bare background.
    ///
    /// Returns whether the mode changed.
    pub fn click(&mut self, target: ClickTarget) -> bool {
        match target {
            ClickTarget::Background => {
                self.mode = self.mode.toggled();
                tracing::debug!(mode = ?self.mode, "field mode toggled");
                true
            }
            ClickTarget::Content => false,
        }
    }

    /// Advances every particle by one frame.
    pub fn update(&mut self) {
        let extent = self.viewport.extent();
        for p in &mut self.particles {
            match self.mode {
                FieldMode::Attracting => {
                    if let Some(v) = attraction(
                        p.position,
                        self.pointer,
                        self.config.attraction_falloff,
                        self.config.max_force,
                    ) {
                        p.velocity = v;
                    }
                }
                FieldMode::Scattering => {
                    p.velocity = reflect(p.position, p.velocity, extent);
                }
            }
            p.position = self.viewport.clamp(p.position + p.velocity);
        }
        tracing::trace!(mode = ?self.mode, "particle frame");
    }

    /// Applies one event. Returns true when the field needs redrawing.
    pub fn dispatch(&mut self, event: FieldEvent) -> bool {
        match event {
            FieldEvent::PointerMoved(p) => {
                self.set_pointer(p);
                self.mode == FieldMode::Attracting
            }
            FieldEvent::Clicked(target) => self.click(target),
            FieldEvent::Resized(viewport) => {
                self.resize(viewport);
                true
            }
            FieldEvent::Frame => {
                self.update();
                true
            }
        }
    }

    /// One sprite per particle, in id order.
    pub fn sprites(&self) -> Vec<Sprite> {
        let opacity = self.mode.opacity();
        self.particles
            .iter()
            .map(|p| Sprite {
                id: p.id,
                x: p.position.x,
                y: p.position.y,
                size: p.size,
                opacity,
            })
            .collect()
    }

    /// Where to draw the pointer ring, present only while attracting.
    pub fn cursor_indicator(&self) -> Option<DVec2> {
        (self.mode == FieldMode::Attracting).then_some(self.pointer)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn mode(&self) -> FieldMode {
        self.mode
    }

    pub fn pointer(&self) -> DVec2 {
        self.pointer
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &ParticleFieldConfig {
        &self.config
    }
}

impl Component for ParticleField {
    fn name(&self) -> &'static str {
        "particles"
    }

    fn params(&self) -> Value {
        json!({
            "count": self.config.count,
            "max_speed": self.config.max_speed,
            "min_size": self.config.min_size,
            "max_size": self.config.max_size,
            "attraction_falloff": self.config.attraction_falloff,
            "max_force": self.config.max_force,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "count": {
                "type": "integer",
                "default": DEFAULT_COUNT,
                "min": 0,
                "max": MAX_COUNT,
                "description": "Number of particles, fixed for the field's lifetime"
            },
            "max_speed": {
                "type": "number",
                "default": DEFAULT_MAX_SPEED,
                "min": 0.0,
                "description": "Initial velocity components are drawn from [-max_speed, max_speed]"
            },
            "min_size": {
                "type": "number",
                "default": DEFAULT_MIN_SIZE,
                "min": 0.0,
                "description": "Smallest dot diameter in pixels"
            },
            "max_size": {
                "type": "number",
                "default": DEFAULT_MAX_SIZE,
                "min": 0.0,
                "description": "Largest dot diameter in pixels"
            },
            "attraction_falloff": {
                "type": "number",
                "default": DEFAULT_ATTRACTION_FALLOFF,
                "min": 0.0,
                "description": "Distance at which attraction speed reaches 1"
            },
            "max_force": {
                "type": "number",
                "default": DEFAULT_MAX_FORCE,
                "min": 0.0,
                "description": "Saturation cap on attraction speed"
            }
        })
    }

    fn state(&self) -> Value {
        json!({
            "mode": self.mode,
            "pointer": [self.pointer.x, self.pointer.y],
            "viewport": [self.viewport.width(), self.viewport.height()],
            "count": self.particles.len(),
        })
    }
}
