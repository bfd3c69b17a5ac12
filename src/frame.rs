use crate::audio::AnalyserSource;
use crate::canvas::CanvasSurface;
use crate::meter::{FrameOutcome, PlayStatus, SpectrumMeter};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub meter: SpectrumMeter,
    pub surface: CanvasSurface,
    pub analyser: AnalyserSource,
    pub status: Rc<Cell<PlayStatus>>,
}

impl FrameContext {
    pub fn frame(&mut self) -> FrameOutcome {
        self.meter
            .draw_frame(&self.analyser, self.status.get(), &mut self.surface)
    }
}

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Owner of the single requestAnimationFrame loop of a widget.
#[derive(Default)]
pub struct FrameLoop {
    tick: Tick,
    handle: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    /// Start drawing; any loop already in flight is cancelled first.
    pub fn start(&mut self, frame_ctx: FrameContext) {
        self.stop();
        let frame_ctx = Rc::new(RefCell::new(frame_ctx));
        let tick_clone = self.tick.clone();
        let handle = self.handle.clone();

        *self.tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let outcome = frame_ctx.borrow_mut().frame();
            if outcome == FrameOutcome::Finished {
                handle.set(None);
                log::debug!("[frame] caps settled, loop finished");
                return;
            }
            handle.set(request_frame(&tick_clone));
        }) as Box<dyn FnMut()>));

        self.handle.set(request_frame(&self.tick));
    }

    pub fn stop(&mut self) {
        if let Some(id) = self.handle.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        // Dropping the closure here is safe: stop never runs from inside a frame.
        self.tick.borrow_mut().take();
    }
}

fn request_frame(tick: &Tick) -> Option<i32> {
    let w = web::window()?;
    let tick = tick.borrow();
    let cb = tick.as_ref()?;
    match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(e) => {
            log::error!("requestAnimationFrame error: {:?}", e);
            None
        }
    }
}
