//! Cyclic slide index with a timer-driven auto-advance that pauses on hover.

use landing_motion_core::{Component, IntervalTimer, MotionError, TimerHandle};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Default auto-advance period in milliseconds.
const DEFAULT_INTERVAL_MS: f64 = 4000.0;
/// Shortest accepted auto-advance period in milliseconds.
pub const MIN_INTERVAL_MS: f64 = 1.0;

/// Carousel timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Time between automatic advances while running.
    pub interval_ms: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

impl CarouselConfig {
    /// Decodes a params object, falling back to defaults for missing keys.
    pub fn from_json(params: &Value) -> Result<Self, MotionError> {
        let config: Self = serde_json::from_value(params.clone())?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MotionError> {
        if !(self.interval_ms.is_finite() && self.interval_ms >= MIN_INTERVAL_MS) {
            return Err(MotionError::InvalidParams(format!(
                "interval_ms must be finite and at least {MIN_INTERVAL_MS}, got {}",
                self.interval_ms
            )));
        }
        Ok(())
    }
}

/// Whether the carousel is advancing on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Playback {
    /// Not mounted: no timer, no progress.
    Idle,
    /// Timer live, index advances every interval.
    Running,
    /// Pointer is over the carousel; the timer is stopped.
    Paused,
}

/// Inputs the carousel reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselEvent {
    PointerEntered,
    PointerLeft,
    Tick(TimerHandle),
    Next,
    Previous,
    GoTo(usize),
}

/// The three slides on screen: the current one flanked by its neighbours.
#[derive(Debug, PartialEq)]
pub struct Visible<'a, T> {
    pub previous: &'a T,
    pub current: &'a T,
    pub next: &'a T,
}

/// A fixed, non-empty list of items with a wrapping current index.
///
/// While mounted and not hovered a repeating timer advances the index. The
/// timer is cancelled when the pointer enters and a new one is started when it
/// leaves, so a tick can never land during a pause.
#[derive(Debug, Clone)]
pub struct Carousel<T> {
    items: Vec<T>,
    config: CarouselConfig,
    current: usize,
    mounted: bool,
    hovered: bool,
    timer: Option<TimerHandle>,
    /// When the running phase or the last auto-advance began.
    phase_start: f64,
}

impl<T> Carousel<T> {
    /// Creates an unmounted carousel at index 0.
    pub fn new(items: Vec<T>, config: CarouselConfig) -> Result<Self, MotionError> {
        if items.is_empty() {
            return Err(MotionError::EmptyCarousel);
        }
        config.validate()?;
        Ok(Self {
            items,
            config,
            current: 0,
            mounted: false,
            hovered: false,
            timer: None,
            phase_start: 0.0,
        })
    }

    /// Creates a carousel from a JSON params object.
    pub fn from_json(items: Vec<T>, params: &Value) -> Result<Self, MotionError> {
        Self::new(items, CarouselConfig::from_json(params)?)
    }

    /// Attaches to the host and starts auto-advance unless already hovered.
    pub fn mount<H: IntervalTimer + ?Sized>(&mut self, timers: &mut H, now: f64) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.current = 0;
        if !self.hovered {
            self.start_timer(timers, now);
        }
    }

    /// Detaches from the host, cancelling the timer.
    pub fn unmount<H: IntervalTimer + ?Sized>(&mut self, timers: &mut H) {
        self.stop_timer(timers);
        self.mounted = false;
    }

    fn start_timer<H: IntervalTimer + ?Sized>(&mut self, timers: &mut H, now: f64) {
        self.stop_timer(timers);
        let handle = timers.start_interval(self.config.interval_ms);
        tracing::debug!(?handle, interval_ms = self.config.interval_ms, "carousel timer started");
        self.timer = Some(handle);
        self.phase_start = now;
    }

    fn stop_timer<H: IntervalTimer + ?Sized>(&mut self, timers: &mut H) {
        if let Some(handle) = self.timer.take() {
            timers.cancel_interval(handle);
            tracing::debug!(?handle, "carousel timer stopped");
        }
    }

    /// Pointer entered the hover region. Returns whether playback changed.
    pub fn pointer_enter<H: IntervalTimer + ?Sized>(&mut self, timers: &mut H) -> bool {
        if self.hovered {
            return false;
        }
        self.hovered = true;
        self.stop_timer(timers);
        self.mounted
    }

    /// Pointer left the hover region. Returns whether playback changed.
    pub fn pointer_leave<H: IntervalTimer + ?Sized>(&mut self, timers: &mut H, now: f64) -> bool {
        if !self.hovered {
            return false;
        }
        self.hovered = false;
        if self.mounted {
            self.start_timer(timers, now);
        }
        self.mounted
    }

    /// Handles a timer tick. Only the live timer advances the index.
    pub fn on_tick(&mut self, handle: TimerHandle, now: f64) -> bool {
        if self.timer != Some(handle) || self.playback() != Playback::Running {
            tracing::trace!(?handle, "ignoring stale carousel tick");
            return false;
        }
        self.next();
        self.phase_start = now;
        true
    }

    /// Moves to the following item, wrapping to the first.
    pub fn next(&mut self) {
        self.current = (self.current + 1) % self.items.len();
    }

    /// Moves to the preceding item, wrapping to the last.
    pub fn previous(&mut self) {
        self.current = self.previous_index();
    }

    /// Jumps to `index`. Out-of-range indices are rejected and leave the
    /// carousel unchanged.
    pub fn go_to(&mut self, index: usize) -> Result<(), MotionError> {
        if index >= self.items.len() {
            return Err(MotionError::SlideOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        self.current = index;
        Ok(())
    }

    /// Applies one event. Returns true when the carousel needs redrawing.
    pub fn dispatch<H: IntervalTimer + ?Sized>(
        &mut self,
        event: CarouselEvent,
        timers: &mut H,
        now: f64,
    ) -> Result<bool, MotionError> {
        Ok(match event {
            CarouselEvent::PointerEntered => self.pointer_enter(timers),
            CarouselEvent::PointerLeft => self.pointer_leave(timers, now),
            CarouselEvent::Tick(handle) => self.on_tick(handle, now),
            CarouselEvent::Next => {
                self.next();
                true
            }
            CarouselEvent::Previous => {
                self.previous();
                true
            }
            CarouselEvent::GoTo(index) => {
                self.go_to(index)?;
                true
            }
        })
    }

    pub fn playback(&self) -> Playback {
        match (self.mounted, self.hovered) {
            (false, _) => Playback::Idle,
            (true, false) => Playback::Running,
            (true, true) => Playback::Paused,
        }
    }

    /// Fraction of the current interval elapsed, in `[0, 1]`. Zero unless running.
    pub fn progress(&self, now: f64) -> f64 {
        if self.playback() != Playback::Running {
            return 0.0;
        }
        ((now - self.phase_start) / self.config.interval_ms).clamp(0.0, 1.0)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn previous_index(&self) -> usize {
        (self.current + self.items.len() - 1) % self.items.len()
    }

    pub fn next_index(&self) -> usize {
        (self.current + 1) % self.items.len()
    }

    pub fn current(&self) -> &T {
        &self.items[self.current]
    }

    /// The previous, current and next items, derived from the current index.
    pub fn visible(&self) -> Visible<'_, T> {
        Visible {
            previous: &self.items[self.previous_index()],
            current: &self.items[self.current],
            next: &self.items[self.next_index()],
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false: construction rejects empty lists.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// The live auto-advance timer, if any.
    pub fn timer(&self) -> Option<TimerHandle> {
        self.timer
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }
}

impl<T> Component for Carousel<T> {
    fn name(&self) -> &'static str {
        "carousel"
    }

    fn params(&self) -> Value {
        json!({ "interval_ms": self.config.interval_ms })
    }

    fn param_schema(&self) -> Value {
        json!({
            "interval_ms": {
                "type": "number",
                "default": DEFAULT_INTERVAL_MS,
                "min": MIN_INTERVAL_MS,
                "description": "Milliseconds between automatic advances"
            }
        })
    }

    fn state(&self) -> Value {
        json!({
            "current": self.current,
            "len": self.items.len(),
            "playback": self.playback(),
        })
    }
}
