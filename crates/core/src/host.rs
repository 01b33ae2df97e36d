//! Host scheduling primitives and a deterministic in-memory host.
//!
//! Components never own a clock. They ask a host for frames and repeating
//! timers through [`FrameScheduler`] and [`IntervalTimer`], and the host
//! later delivers the matching handle back to them. The browser binding
//! implements these traits on top of `requestAnimationFrame` and
//! `setInterval`; [`VirtualHost`] implements them over a manual clock so that
//! tests and the CLI can replay timelines exactly.
//!
//! All times are milliseconds as `f64`, the unit of `performance.now()`.

use serde::{Deserialize, Serialize};

/// Identifies one outstanding frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FrameHandle(pub u64);

/// Identifies one running repeating timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerHandle(pub u64);

/// "Invoke me once before the next repaint", plus cancellation.
pub trait FrameScheduler {
    /// Requests a single frame callback.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancels a pending request. Cancelling an already-fired or unknown
    /// handle is a no-op.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// "Invoke me every `period_ms`", plus cancellation.
pub trait IntervalTimer {
    /// Starts a repeating timer whose first tick is one period from now.
    fn start_interval(&mut self, period_ms: f64) -> TimerHandle;

    /// Stops a timer. No tick for `handle` is delivered afterwards.
    fn cancel_interval(&mut self, handle: TimerHandle);
}

/// A self-rescheduling animation loop.
///
/// Holds at most one outstanding frame request. Each delivered frame runs one
/// update and requests the next; [`FrameLoop::cancel`] withdraws the request,
/// after which no update runs even if the host still delivers the old handle.
#[derive(Debug, Default)]
pub struct FrameLoop {
    pending: Option<FrameHandle>,
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the first frame. Calling `start` on a running loop does nothing.
    pub fn start<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if self.pending.is_none() {
            let handle = scheduler.request_frame();
            tracing::debug!(?handle, "frame loop started");
            self.pending = Some(handle);
        }
    }

    /// Handles a delivered frame.
    ///
    /// Runs `update` and requests the next frame only when `handle` is the
    /// loop's outstanding request. Returns whether `update` ran.
    pub fn on_frame<S, F>(&mut self, handle: FrameHandle, scheduler: &mut S, update: F) -> bool
    where
        S: FrameScheduler + ?Sized,
        F: FnOnce(),
    {
        if self.pending != Some(handle) {
            return false;
        }
        update();
        self.frames += 1;
        self.pending = Some(scheduler.request_frame());
        true
    }

    /// Cancels the outstanding request, stopping the loop.
    pub fn cancel<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
            tracing::debug!(?handle, frames = self.frames, "frame loop cancelled");
        }
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of updates run since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Something a host delivers to a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostEvent {
    Frame(FrameHandle),
    Tick(TimerHandle),
}

#[derive(Debug, Clone, Copy)]
struct Interval {
    handle: TimerHandle,
    period: f64,
    due: f64,
}

/// A manual-clock host that delivers frames and ticks in time order.
///
/// Frames requested at time `t` fire at `t + frame_interval`. Intervals fire
/// every `period` from the time they were started. Events due at the same
/// instant are delivered in request order.
#[derive(Debug)]
pub struct VirtualHost {
    now: f64,
    frame_interval: f64,
    next_id: u64,
    frames: Vec<(FrameHandle, f64)>,
    intervals: Vec<Interval>,
}

/// One frame at 60 Hz.
pub const DEFAULT_FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

impl Default for VirtualHost {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_INTERVAL_MS)
    }
}

impl VirtualHost {
    /// Creates a host at time 0 with the given frame spacing.
    pub fn new(frame_interval: f64) -> Self {
        Self {
            now: 0.0,
            frame_interval,
            next_id: 1,
            frames: Vec::new(),
            intervals: Vec::new(),
        }
    }

    /// Current clock value.
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn active_intervals(&self) -> usize {
        self.intervals.len()
    }

    fn allocate(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Pops the earliest event due at or before `until`, moving the clock to
    /// its due time. When nothing is due, moves the clock to `until` (never
    /// backwards) and returns `None`.
    ///
    /// Drain with `while let Some(ev) = host.next_event(t)` so that requests
    /// made while handling an event are still delivered within the window.
    pub fn next_event(&mut self, until: f64) -> Option<(f64, HostEvent)> {
        let frame = self
            .frames
            .iter()
            .enumerate()
            .min_by(|a, b| a.1 .1.total_cmp(&b.1 .1).then(a.1 .0.cmp(&b.1 .0)))
            .map(|(i, &(h, due))| (due, h.0, HostEvent::Frame(h), i));
        let tick = self
            .intervals
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.due.total_cmp(&b.1.due).then(a.1.handle.cmp(&b.1.handle)))
            .map(|(i, iv)| (iv.due, iv.handle.0, HostEvent::Tick(iv.handle), i));

        let earliest = match (frame, tick) {
            (Some(f), Some(t)) => {
                if (f.0, f.1) <= (t.0, t.1) {
                    Some(f)
                } else {
                    Some(t)
                }
            }
            (f, t) => f.or(t),
        };

        match earliest {
            Some((due, _, event, idx)) if due <= until => {
                self.now = self.now.max(due);
                match event {
                    HostEvent::Frame(_) => {
                        self.frames.remove(idx);
                    }
                    HostEvent::Tick(_) => {
                        let iv = &mut self.intervals[idx];
                        iv.due += iv.period;
                    }
                }
                Some((due, event))
            }
            _ => {
                self.now = self.now.max(until);
                None
            }
        }
    }
}

impl FrameScheduler for VirtualHost {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.allocate());
        self.frames.push((handle, self.now + self.frame_interval));
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frames.retain(|(h, _)| *h != handle);
    }
}

impl IntervalTimer for VirtualHost {
    fn start_interval(&mut self, period_ms: f64) -> TimerHandle {
        let handle = TimerHandle(self.allocate());
        self.intervals.push(Interval {
            handle,
            period: period_ms,
            due: self.now + period_ms,
        });
        handle
    }

    fn cancel_interval(&mut self, handle: TimerHandle) {
        self.intervals.retain(|iv| iv.handle != handle);
    }
}
