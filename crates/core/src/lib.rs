#![deny(unsafe_code)]
//! Core types for the landing-motion interactive page engines.
//!
//! Provides the `Component` trait, `MotionError`, viewport geometry, the host
//! scheduling traits (`FrameScheduler`, `IntervalTimer`) with the
//! self-rescheduling `FrameLoop` and the deterministic `VirtualHost`, and the
//! per-use `Throttle` gate.

pub mod component;
pub mod error;
pub mod geometry;
pub mod host;
pub mod throttle;

pub use component::Component;
pub use error::MotionError;
pub use geometry::{Rect, Viewport};
pub use glam::DVec2;
pub use host::{
    FrameHandle, FrameLoop, FrameScheduler, HostEvent, IntervalTimer, TimerHandle, VirtualHost,
};
pub use throttle::{Throttle, Throttled};
