#![deny(unsafe_code)]
//! Browser bindings for the landing page components.
//!
//! Each exported type owns one component plus the browser resources that
//! drive it (frame requests, interval timers, event listeners). `unmount`
//! (or dropping the value from JS via `free()`) releases all of them.

mod background;
mod carousel;
mod effects;

pub use background::ParticleBackground;
pub use carousel::CarouselController;
pub use effects::{dashboard_tilt, NavbarController, TiltController};

use landing_motion_core::{MotionError, Viewport};
use wasm_bindgen::JsValue;
use web_sys::Window;

fn to_js(e: MotionError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

/// Milliseconds from `performance.now()`, 0 when unavailable.
fn now_ms(window: &Window) -> f64 {
    window.performance().map(|p| p.now()).unwrap_or(0.0)
}

/// The window's inner size as a viewport.
fn window_viewport(window: &Window) -> Result<Viewport, JsValue> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Viewport::new(width, height).map_err(to_js)
}
