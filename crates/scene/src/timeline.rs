//! Headless replays of components on a [`VirtualHost`].
//!
//! The browser drives components from real frames, timers and pointer
//! events; these helpers drive the same components from a manual clock and a
//! scripted list of pointer events so the results can be reported or tested.

use landing_motion_carousel::{Carousel, CarouselConfig, Product};
use landing_motion_core::{FrameLoop, HostEvent, MotionError, VirtualHost};
use landing_motion_particles::ParticleField;
use serde::Serialize;
use std::str::FromStr;

/// An interval during which the pointer rests on the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HoverWindow {
    pub start_ms: f64,
    pub end_ms: f64,
}

impl HoverWindow {
    pub fn new(start_ms: f64, end_ms: f64) -> Result<Self, MotionError> {
        if !(start_ms.is_finite() && end_ms.is_finite() && 0.0 <= start_ms && start_ms <= end_ms) {
            return Err(MotionError::InvalidParams(format!(
                "hover window {start_ms}..{end_ms} must satisfy 0 <= start <= end"
            )));
        }
        Ok(Self { start_ms, end_ms })
    }
}

impl FromStr for HoverWindow {
    type Err = MotionError;

    /// Parses `START..END` in milliseconds, e.g. `5000..9000`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once("..")
            .ok_or_else(|| MotionError::InvalidParams(format!("expected START..END, got '{s}'")))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .map_err(|e| MotionError::InvalidParams(format!("bad time '{v}': {e}")))
        };
        Self::new(parse(start)?, parse(end)?)
    }
}

/// Why the carousel's visible state changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cause {
    Mounted,
    AutoAdvance,
    Paused,
    Resumed,
}

/// One line of a carousel timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarouselStep {
    pub at_ms: f64,
    pub cause: Cause,
    pub index: usize,
    pub title: String,
}

/// Upper bound on auto-advances a single replay may record.
pub const MAX_ADVANCES: f64 = 100_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Pointer {
    Enter,
    Leave,
}

/// Mounts a carousel at t=0, applies the hover script and runs the clock to
/// `duration_ms`, recording every advance and every pause/resume.
///
/// `duration_ms` must be finite and non-negative, and may span at most
/// [`MAX_ADVANCES`] intervals.
pub fn simulate_carousel(
    items: Vec<Product>,
    config: CarouselConfig,
    duration_ms: f64,
    hovers: &[HoverWindow],
) -> Result<Vec<CarouselStep>, MotionError> {
    let mut carousel = Carousel::new(items, config)?;
    if !(duration_ms.is_finite() && duration_ms >= 0.0) {
        return Err(MotionError::InvalidParams(format!(
            "duration must be finite and non-negative, got {duration_ms}"
        )));
    }
    if duration_ms / config.interval_ms > MAX_ADVANCES {
        return Err(MotionError::InvalidParams(format!(
            "duration {duration_ms} ms spans more than {MAX_ADVANCES} intervals of {} ms",
            config.interval_ms
        )));
    }
    let mut host = VirtualHost::default();
    let mut steps = Vec::new();

    let record = |c: &Carousel<Product>, at_ms: f64, cause: Cause, steps: &mut Vec<CarouselStep>| {
        steps.push(CarouselStep {
            at_ms,
            cause,
            index: c.current_index(),
            title: c.current().title.clone(),
        });
    };

    carousel.mount(&mut host, 0.0);
    record(&carousel, 0.0, Cause::Mounted, &mut steps);

    let mut script: Vec<(f64, Pointer)> = hovers
        .iter()
        .flat_map(|w| [(w.start_ms, Pointer::Enter), (w.end_ms, Pointer::Leave)])
        .filter(|(at, _)| *at <= duration_ms)
        .collect();
    script.sort_by(|a, b| a.0.total_cmp(&b.0));

    let drain = |carousel: &mut Carousel<Product>, host: &mut VirtualHost, until: f64, steps: &mut Vec<CarouselStep>| {
        while let Some((at, event)) = host.next_event(until) {
            if let HostEvent::Tick(handle) = event {
                if carousel.on_tick(handle, at) {
                    record(&*carousel, at, Cause::AutoAdvance, steps);
                }
            }
        }
    };

    for (at, action) in script {
        drain(&mut carousel, &mut host, at, &mut steps);
        let changed = match action {
            Pointer::Enter => carousel.pointer_enter(&mut host),
            Pointer::Leave => carousel.pointer_leave(&mut host, at),
        };
        if changed {
            let cause = match action {
                Pointer::Enter => Cause::Paused,
                Pointer::Leave => Cause::Resumed,
            };
            record(&carousel, at, cause, &mut steps);
        }
    }
    drain(&mut carousel, &mut host, duration_ms, &mut steps);
    carousel.unmount(&mut host);

    Ok(steps)
}

/// Runs `frames` updates of `field` through a [`FrameLoop`] on a virtual
/// 60 Hz host, then cancels the loop. Returns the number of updates run.
pub fn run_frames(field: &mut ParticleField, frames: u64) -> u64 {
    let mut host = VirtualHost::default();
    let mut frame_loop = FrameLoop::new();
    frame_loop.start(&mut host);
    while frame_loop.frames() < frames {
        match host.next_event(f64::INFINITY) {
            Some((_, HostEvent::Frame(handle))) => {
                frame_loop.on_frame(handle, &mut host, || field.update());
            }
            Some(_) => {}
            None => break,
        }
    }
    frame_loop.cancel(&mut host);
    frame_loop.frames()
}

#[cfg(test)]
mod tests {
    use super::*;
    use landing_motion_carousel::{featured_products, numbered_slides};
    use landing_motion_core::Viewport;
    use landing_motion_particles::ParticleFieldConfig;

    fn indices(steps: &[CarouselStep]) -> Vec<(f64, Cause, usize)> {
        steps.iter().map(|s| (s.at_ms, s.cause, s.index)).collect()
    }

    #[test]
    fn hover_window_parses() {
        let w: HoverWindow = "5000..9000".parse().unwrap();
        assert_eq!(w, HoverWindow::new(5000.0, 9000.0).unwrap());
        assert!("9000..5000".parse::<HoverWindow>().is_err());
        assert!("5000-9000".parse::<HoverWindow>().is_err());
        assert!("a..b".parse::<HoverWindow>().is_err());
    }

    #[test]
    fn unhovered_carousel_advances_every_four_seconds() {
        let steps = simulate_carousel(featured_products(), CarouselConfig::default(), 12_500.0, &[]).unwrap();
        assert_eq!(
            indices(&steps),
            vec![
                (0.0, Cause::Mounted, 0),
                (4000.0, Cause::AutoAdvance, 1),
                (8000.0, Cause::AutoAdvance, 2),
                (12000.0, Cause::AutoAdvance, 0),
            ]
        );
        assert_eq!(steps[1].title, "Knowledge Base Miner");
    }

    #[test]
    fn hover_suspends_and_resume_restarts_interval() {
        let hovers = [HoverWindow::new(5000.0, 11_000.0).unwrap()];
        let steps = simulate_carousel(numbered_slides(3), CarouselConfig::default(), 16_000.0, &hovers).unwrap();
        assert_eq!(
            indices(&steps),
            vec![
                (0.0, Cause::Mounted, 0),
                (4000.0, Cause::AutoAdvance, 1),
                (5000.0, Cause::Paused, 1),
                (11000.0, Cause::Resumed, 1),
                (15000.0, Cause::AutoAdvance, 2),
            ]
        );
    }

    #[test]
    fn overlapping_windows_do_not_double_pause() {
        let hovers = [
            HoverWindow::new(1000.0, 3000.0).unwrap(),
            HoverWindow::new(2000.0, 6000.0).unwrap(),
        ];
        let steps = simulate_carousel(numbered_slides(2), CarouselConfig::default(), 7000.0, &hovers).unwrap();
        let paused = steps.iter().filter(|s| s.cause == Cause::Paused).count();
        assert_eq!(paused, 1);
    }

    #[test]
    fn empty_item_list_is_rejected() {
        let r = simulate_carousel(Vec::new(), CarouselConfig::default(), 1000.0, &[]);
        assert!(matches!(r, Err(MotionError::EmptyCarousel)));
    }

    #[test]
    fn unbounded_durations_are_rejected() {
        for duration in [f64::INFINITY, f64::NAN, -1.0] {
            let r = simulate_carousel(numbered_slides(2), CarouselConfig::default(), duration, &[]);
            assert!(matches!(r, Err(MotionError::InvalidParams(_))), "{duration}");
        }
        let config = CarouselConfig { interval_ms: 1.0 };
        let r = simulate_carousel(numbered_slides(2), config, MAX_ADVANCES * 2.0, &[]);
        assert!(matches!(r, Err(MotionError::InvalidParams(_))));
        let steps = simulate_carousel(numbered_slides(2), config, MAX_ADVANCES, &[]).unwrap();
        assert_eq!(steps.len(), MAX_ADVANCES as usize + 1);
    }

    #[test]
    fn run_frames_runs_exactly_the_requested_count() {
        let vp = Viewport::new(200.0, 100.0).unwrap();
        let mut field = ParticleField::new(vp, ParticleFieldConfig::default(), 3).unwrap();
        let before = field.particles().to_vec();
        assert_eq!(run_frames(&mut field, 30), 30);
        assert_ne!(field.particles(), before.as_slice());
        assert_eq!(run_frames(&mut field, 0), 0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn unhovered_index_counts_whole_intervals(
                len in 1_usize..8,
                interval in 100.0_f64..5000.0,
                duration in 0.0_f64..60_000.0,
            ) {
                let config = CarouselConfig { interval_ms: interval };
                let steps = simulate_carousel(numbered_slides(len), config, duration, &[]).unwrap();
                let advances = steps.iter().filter(|s| s.cause == Cause::AutoAdvance).count();
                prop_assert_eq!(advances, (duration / interval).floor() as usize);
                prop_assert_eq!(steps.last().unwrap().index, advances % len);
            }
        }
    }
}
