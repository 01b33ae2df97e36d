#![deny(unsafe_code)]
//! Auto-advancing product carousel.
//!
//! A wrapping index over a fixed list, advanced by a host-provided repeating
//! timer while the pointer is outside the carousel. Hovering cancels the
//! timer; leaving starts a fresh one, which keeps the progress indicator and
//! the actual advance in step.

pub mod carousel;
pub mod products;

pub use carousel::{Carousel, CarouselConfig, CarouselEvent, Playback, Visible, MIN_INTERVAL_MS};
pub use products::{featured_products, numbered_slides, Product};
