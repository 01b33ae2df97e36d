//! Thin wrappers over the stateless-ish page effects.
//!
//! These hold no browser resources; JS forwards its own events and applies
//! the returned style strings.

use crate::{now_ms, window};
use landing_motion_core::{DVec2, Rect};
use landing_motion_effects::{NavbarState, ScrollRotation, TiltCard};
use wasm_bindgen::prelude::*;

/// Tilt state for one feature card.
#[wasm_bindgen]
#[derive(Default)]
pub struct TiltController {
    card: TiltCard,
}

#[wasm_bindgen]
impl TiltController {
    #[wasm_bindgen(constructor)]
    pub fn new() -> TiltController {
        TiltController::default()
    }

    /// Feeds a pointer move (client coordinates) over a card whose bounding
    /// rect is given. Returns whether the style needs updating.
    pub fn pointer_move(&mut self, left: f64, top: f64, width: f64, height: f64, x: f64, y: f64) -> bool {
        let now = window().map(|w| now_ms(&w)).unwrap_or(0.0);
        self.card
            .pointer_move(Rect::new(left, top, width, height), DVec2::new(x, y), now)
    }

    pub fn pointer_leave(&mut self) {
        self.card.pointer_leave();
    }

    pub fn transform(&self) -> String {
        self.card.transform()
    }

    pub fn transition(&self) -> String {
        self.card.transition()
    }
}

#[wasm_bindgen]
#[derive(Default)]
pub struct NavbarController {
    state: NavbarState,
}

#[wasm_bindgen]
impl NavbarController {
    #[wasm_bindgen(constructor)]
    pub fn new() -> NavbarController {
        NavbarController::default()
    }

    /// Returns whether the scrolled style flipped.
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        self.state.on_scroll(scroll_y)
    }

    pub fn toggle_menu(&mut self) {
        self.state.toggle_menu();
    }

    pub fn select_link(&mut self) {
        self.state.select_link();
    }

    pub fn is_scrolled(&self) -> bool {
        self.state.is_scrolled()
    }

    pub fn is_menu_open(&self) -> bool {
        self.state.is_menu_open()
    }

    pub fn menu_entry_delay_ms(&self, index: usize) -> f64 {
        self.state.menu_entry_delay_ms(index)
    }
}

/// `rotateX` degrees for the dashboard preview given its bounding rect.
#[wasm_bindgen]
pub fn dashboard_tilt(viewport_height: f64, element_top: f64, element_height: f64) -> f64 {
    ScrollRotation::default().angle_for(viewport_height, element_top, element_height)
}
