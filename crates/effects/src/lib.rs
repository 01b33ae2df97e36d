#![deny(unsafe_code)]
//! Small pointer- and scroll-driven effects used around the landing page.
//!
//! - [`tilt::TiltCard`]: 3D tilt that follows the pointer over a card,
//!   throttled so layout queries stay cheap.
//! - [`navbar::NavbarState`]: scrolled styling threshold and the mobile menu.
//! - [`scroll::ScrollRotation`]: maps a section's scroll progress to a
//!   rotation angle.

pub mod navbar;
pub mod scroll;
pub mod tilt;

pub use navbar::{NavLink, NavbarState};
pub use scroll::{scroll_progress, ScrollRotation};
pub use tilt::{TiltCard, TiltConfig};
