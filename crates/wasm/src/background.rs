//! Full-window particle background drawn on a 2D canvas.

use crate::{now_ms, to_js, window, window_viewport};
use landing_motion_core::{DVec2, FrameHandle, FrameLoop, FrameScheduler, Viewport};
use landing_motion_particles::{ClickTarget, FieldEvent, ParticleField, ParticleFieldConfig};
use landing_motion_scene::pixel::{INDICATOR_OPACITY, INDICATOR_RADIUS, INDICATOR_STROKE, INK};
use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, MouseEvent, Window};

/// Handle bookkeeping for `requestAnimationFrame`.
///
/// The browser callback carries no request id, so this remembers which
/// handle the single outstanding request belongs to.
#[derive(Debug, Default)]
struct RafRequests {
    next_id: u64,
    live: Option<(FrameHandle, i32)>,
}

impl RafRequests {
    fn issue(&mut self) -> FrameHandle {
        self.next_id += 1;
        FrameHandle(self.next_id)
    }

    /// Records that `handle` is queued in the browser under `raf_id`.
    fn queued(&mut self, handle: FrameHandle, raf_id: i32) {
        self.live = Some((handle, raf_id));
    }

    /// The browser id to cancel for `handle`. Stale handles yield `None`
    /// and leave the live request alone.
    fn cancel(&mut self, handle: FrameHandle) -> Option<i32> {
        match self.live {
            Some((live, id)) if live == handle => {
                self.live = None;
                Some(id)
            }
            _ => None,
        }
    }

    /// Consumes the live request when its frame fires.
    fn fire(&mut self) -> Option<FrameHandle> {
        self.live.take().map(|(handle, _)| handle)
    }
}

/// `requestAnimationFrame` behind the [`FrameScheduler`] seam.
struct RafScheduler {
    window: Window,
    callback: Option<js_sys::Function>,
    requests: RafRequests,
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = self.requests.issue();
        if let Some(cb) = &self.callback {
            match self.window.request_animation_frame(cb) {
                Ok(id) => self.requests.queued(handle, id),
                Err(e) => tracing::warn!(?e, "requestAnimationFrame failed"),
            }
        }
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Some(id) = self.requests.cancel(handle) {
            // Only fails for a detached window; the request dies with it.
            let _ = self.window.cancel_animation_frame(id);
        }
    }
}

struct State {
    field: ParticleField,
    frame_loop: FrameLoop,
    scheduler: RafScheduler,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    ink: String,
}

impl State {
    fn on_frame(&mut self) {
        let Some(handle) = self.scheduler.requests.fire() else {
            return;
        };
        let State {
            field,
            frame_loop,
            scheduler,
            ctx,
            ink,
            ..
        } = self;
        if frame_loop.on_frame(handle, scheduler, || field.update()) {
            if let Err(e) = draw(ctx, field, ink) {
                tracing::warn!(?e, "particle draw failed");
            }
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        fit_canvas(&self.canvas, viewport);
        self.field.dispatch(FieldEvent::Resized(viewport));
    }
}

fn fit_canvas(canvas: &HtmlCanvasElement, viewport: Viewport) {
    canvas.set_width(viewport.width().ceil() as u32);
    canvas.set_height(viewport.height().ceil() as u32);
}

fn draw(ctx: &CanvasRenderingContext2d, field: &ParticleField, ink: &str) -> Result<(), JsValue> {
    let vp = field.viewport();
    ctx.clear_rect(0.0, 0.0, vp.width(), vp.height());
    ctx.set_fill_style_str(ink);
    for s in field.sprites() {
        ctx.set_global_alpha(s.opacity);
        ctx.begin_path();
        ctx.arc(s.x, s.y, s.size / 2.0, 0.0, TAU)?;
        ctx.fill();
    }
    if let Some(p) = field.cursor_indicator() {
        ctx.set_global_alpha(INDICATOR_OPACITY);
        ctx.set_stroke_style_str(ink);
        ctx.set_line_width(INDICATOR_STROKE);
        ctx.begin_path();
        ctx.arc(p.x, p.y, INDICATOR_RADIUS - INDICATOR_STROKE / 2.0, 0.0, TAU)?;
        ctx.stroke();
    }
    ctx.set_global_alpha(1.0);
    Ok(())
}

struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        kind: &'static str,
        callback: Closure<dyn FnMut(Event)>,
    ) -> Result<Self, JsValue> {
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }

    fn detach(self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// The ambient dot field behind the landing page.
///
/// Pointer moves anywhere in the window are tracked; a click on the canvas
/// itself (not on content layered above it) toggles attraction.
#[wasm_bindgen]
pub struct ParticleBackground {
    state: Rc<RefCell<State>>,
    frame: Option<Closure<dyn FnMut(f64)>>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl ParticleBackground {
    /// Sizes `canvas` to the window, populates the field and starts drawing.
    pub fn mount(canvas: HtmlCanvasElement, seed: u64) -> Result<ParticleBackground, JsValue> {
        let window = window()?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let viewport = window_viewport(&window)?;
        fit_canvas(&canvas, viewport);
        let field = ParticleField::new(viewport, ParticleFieldConfig::default(), seed).map_err(to_js)?;
        let [r, g, b] = INK;

        let state = Rc::new(RefCell::new(State {
            field,
            frame_loop: FrameLoop::new(),
            scheduler: RafScheduler {
                window: window.clone(),
                callback: None,
                requests: RafRequests::default(),
            },
            canvas: canvas.clone(),
            ctx,
            ink: format!("rgb({r}, {g}, {b})"),
        }));

        let weak = Rc::downgrade(&state);
        let frame = Closure::<dyn FnMut(f64)>::new(move |_timestamp: f64| {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().on_frame();
            }
        });
        {
            let mut s = state.borrow_mut();
            s.scheduler.callback = Some(frame.as_ref().unchecked_ref::<js_sys::Function>().clone());
            let State {
                frame_loop,
                scheduler,
                ..
            } = &mut *s;
            frame_loop.start(scheduler);
        }

        let mut listeners = Vec::with_capacity(3);
        let window_target: &EventTarget = window.as_ref();

        let weak = Rc::downgrade(&state);
        listeners.push(Listener::attach(
            window_target,
            "mousemove",
            Closure::new(move |e: Event| {
                let (Some(state), Some(e)) = (weak.upgrade(), e.dyn_ref::<MouseEvent>()) else {
                    return;
                };
                let p = DVec2::new(f64::from(e.client_x()), f64::from(e.client_y()));
                state.borrow_mut().field.dispatch(FieldEvent::PointerMoved(p));
            }),
        )?);

        let weak = Rc::downgrade(&state);
        listeners.push(Listener::attach(
            canvas.as_ref(),
            "click",
            Closure::new(move |e: Event| {
                let Some(state) = weak.upgrade() else {
                    return;
                };
                let target: JsValue = e.target().map(Into::into).unwrap_or(JsValue::NULL);
                let current: JsValue = e.current_target().map(Into::into).unwrap_or(JsValue::NULL);
                let click = ClickTarget::from_targets(&target, &current);
                state.borrow_mut().field.dispatch(FieldEvent::Clicked(click));
            }),
        )?);

        let weak = Rc::downgrade(&state);
        let resize_window = window.clone();
        listeners.push(Listener::attach(
            window_target,
            "resize",
            Closure::new(move |_e: Event| {
                let Some(state) = weak.upgrade() else {
                    return;
                };
                match window_viewport(&resize_window) {
                    Ok(vp) => state.borrow_mut().resize(vp),
                    Err(e) => tracing::warn!(?e, "ignoring resize with unreadable window size"),
                }
            }),
        )?);

        tracing::debug!(seed, at = now_ms(&window), "particle background mounted");
        Ok(ParticleBackground {
            state,
            frame: Some(frame),
            listeners,
        })
    }

    /// Stops the frame loop and removes every listener. Safe to call twice.
    pub fn unmount(&mut self) {
        {
            let mut s = self.state.borrow_mut();
            let State {
                frame_loop,
                scheduler,
                ..
            } = &mut *s;
            frame_loop.cancel(scheduler);
            scheduler.callback = None;
        }
        for l in self.listeners.drain(..) {
            l.detach();
        }
        self.frame = None;
    }

    pub fn is_attracting(&self) -> bool {
        self.state.borrow().field.mode() == landing_motion_particles::FieldMode::Attracting
    }

    /// Number of frames drawn so far.
    pub fn frames(&self) -> f64 {
        self.state.borrow().frame_loop.frames() as f64
    }
}

impl Drop for ParticleBackground {
    fn drop(&mut self) {
        self.unmount();
    }
}
