//! Product carousel driven by `setInterval`.

use crate::{now_ms, to_js, window};
use landing_motion_carousel::{featured_products, Carousel, CarouselConfig, Playback, Product};
use landing_motion_core::{IntervalTimer, TimerHandle};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

struct LiveInterval {
    handle: TimerHandle,
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

/// `setInterval` behind the [`IntervalTimer`] seam. Each interval gets its own
/// callback that reports its handle back to the owning carousel.
struct BrowserTimers {
    window: Window,
    owner: Weak<RefCell<Inner>>,
    next_id: u64,
    live: Vec<LiveInterval>,
}

impl IntervalTimer for BrowserTimers {
    fn start_interval(&mut self, period_ms: f64) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        let owner = self.owner.clone();
        let clock = self.window.clone();
        let callback = Closure::<dyn FnMut()>::new(move || {
            if let Some(inner) = owner.upgrade() {
                Inner::tick(&inner, handle, now_ms(&clock));
            }
        });
        match self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                period_ms.round() as i32,
            ) {
            Ok(id) => self.live.push(LiveInterval {
                handle,
                id,
                _callback: callback,
            }),
            Err(e) => tracing::warn!(?e, "setInterval failed"),
        }
        handle
    }

    fn cancel_interval(&mut self, handle: TimerHandle) {
        if let Some(pos) = self.live.iter().position(|l| l.handle == handle) {
            let live = self.live.swap_remove(pos);
            self.window.clear_interval_with_handle(live.id);
        }
    }
}

struct Inner {
    carousel: Carousel<Product>,
    timers: BrowserTimers,
    on_change: Option<js_sys::Function>,
}

impl Inner {
    fn tick(inner: &Rc<RefCell<Inner>>, handle: TimerHandle, now: f64) {
        let notify = {
            let mut this = inner.borrow_mut();
            if this.carousel.on_tick(handle, now) {
                this.on_change.clone()
            } else {
                None
            }
        };
        // The listener may call back into the controller, so no borrow is held.
        if let Some(f) = notify {
            if let Err(e) = f.call0(&JsValue::NULL) {
                tracing::warn!(?e, "carousel change listener threw");
            }
        }
    }
}

/// The featured-products carousel: auto-advances while the pointer is away.
#[wasm_bindgen]
pub struct CarouselController {
    inner: Rc<RefCell<Inner>>,
    window: Window,
}

#[wasm_bindgen]
impl CarouselController {
    /// Builds an unmounted carousel over the featured products.
    #[wasm_bindgen(constructor)]
    pub fn new(interval_ms: f64) -> Result<CarouselController, JsValue> {
        let window = window()?;
        let carousel = Carousel::new(featured_products(), CarouselConfig { interval_ms }).map_err(to_js)?;
        let timer_window = window.clone();
        let inner = Rc::new_cyclic(|owner| {
            RefCell::new(Inner {
                carousel,
                timers: BrowserTimers {
                    window: timer_window,
                    owner: owner.clone(),
                    next_id: 0,
                    live: Vec::new(),
                },
                on_change: None,
            })
        });
        Ok(CarouselController { inner, window })
    }

    /// Registers a function called after every auto-advance.
    pub fn on_change(&self, f: js_sys::Function) {
        self.inner.borrow_mut().on_change = Some(f);
    }

    pub fn mount(&self) {
        let now = now_ms(&self.window);
        let mut inner = self.inner.borrow_mut();
        let Inner {
            carousel, timers, ..
        } = &mut *inner;
        carousel.mount(timers, now);
    }

    pub fn unmount(&self) {
        let mut inner = self.inner.borrow_mut();
        let Inner {
            carousel, timers, ..
        } = &mut *inner;
        carousel.unmount(timers);
    }

    pub fn pointer_enter(&self) -> bool {
        let mut inner = self.inner.borrow_mut();
        let Inner {
            carousel, timers, ..
        } = &mut *inner;
        carousel.pointer_enter(timers)
    }

    pub fn pointer_leave(&self) -> bool {
        let now = now_ms(&self.window);
        let mut inner = self.inner.borrow_mut();
        let Inner {
            carousel, timers, ..
        } = &mut *inner;
        carousel.pointer_leave(timers, now)
    }

    pub fn next(&self) {
        self.inner.borrow_mut().carousel.next();
    }

    pub fn previous(&self) {
        self.inner.borrow_mut().carousel.previous();
    }

    pub fn go_to(&self, index: usize) -> Result<(), JsValue> {
        self.inner.borrow_mut().carousel.go_to(index).map_err(to_js)
    }

    pub fn current(&self) -> usize {
        self.inner.borrow().carousel.current_index()
    }

    pub fn previous_index(&self) -> usize {
        self.inner.borrow().carousel.previous_index()
    }

    pub fn next_index(&self) -> usize {
        self.inner.borrow().carousel.next_index()
    }

    pub fn slide_count(&self) -> usize {
        self.inner.borrow().carousel.len()
    }

    pub fn title(&self, index: usize) -> Option<String> {
        self.inner.borrow().carousel.items().get(index).map(|p| p.title.clone())
    }

    pub fn description(&self, index: usize) -> Option<String> {
        self.inner
            .borrow()
            .carousel
            .items()
            .get(index)
            .map(|p| p.description.clone())
    }

    pub fn accent(&self, index: usize) -> Option<String> {
        self.inner.borrow().carousel.items().get(index).map(|p| p.accent.clone())
    }

    /// Fraction of the current interval elapsed, for a progress bar.
    pub fn progress(&self) -> f64 {
        self.inner.borrow().carousel.progress(now_ms(&self.window))
    }

    pub fn is_paused(&self) -> bool {
        self.inner.borrow().carousel.playback() == Playback::Paused
    }
}

impl Drop for CarouselController {
    fn drop(&mut self) {
        self.unmount();
    }
}
