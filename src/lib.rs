#![cfg(target_arch = "wasm32")]
//! Real-time audio spectrum meter for the browser.
//!
//! An [`AudioSpectrum`] owns a `<canvas>` and listens to `play`/`pause` on an
//! `<audio>` element. While playing it samples an `AnalyserNode` once per
//! animation frame and paints one bar per meter, topped by a falling cap.
use crate::audio::AudioGraph;
use crate::canvas::CanvasSurface;
use crate::events::MediaListeners;
use crate::frame::{FrameContext, FrameLoop};
use crate::meter::{MeterLayout, PlayStatus, SpectrumMeter};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use web_sys as web;

mod audio;
mod canvas;
mod color;
mod config;
mod constants;
mod dom;
mod events;
mod frame;
mod id;
mod meter;
mod routing;

pub use color::{ColorStop, MeterColor};
pub use config::{ConfigError, SpectrumOptions};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("audio-spectrum loaded");
    Ok(())
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// `undefined`/`null` mean "all defaults"; anything else goes through JSON.
fn json_from_js(value: &JsValue) -> anyhow::Result<String> {
    if value.is_undefined() || value.is_null() {
        return Ok(String::new());
    }
    js_sys::JSON::stringify(value)
        .map_err(|e| anyhow::anyhow!("JSON.stringify error: {:?}", e))?
        .as_string()
        .ok_or_else(|| anyhow::anyhow!("options are not JSON-serializable"))
}

fn options_from_js(value: &JsValue) -> Result<SpectrumOptions, JsValue> {
    let text = json_from_js(value).map_err(|e| js_err(format!("{e:#}")))?;
    let opts = SpectrumOptions::from_json(&text).map_err(js_err)?;
    opts.validate().map_err(js_err)?;
    Ok(opts)
}

struct Inner {
    id: String,
    options: SpectrumOptions,
    canvas: web::HtmlCanvasElement,
    supplied_audio: Option<web::HtmlAudioElement>,
    graph: AudioGraph,
    listeners: Option<MediaListeners>,
    status: Rc<Cell<PlayStatus>>,
    frames: FrameLoop,
}

impl Inner {
    /// `audioId` wins over a directly supplied element.
    fn resolve_audio(&self) -> Option<web::HtmlAudioElement> {
        if let Some(audio_id) = &self.options.audio_id {
            return dom::window_document().and_then(|d| dom::audio_by_id(&d, audio_id));
        }
        self.supplied_audio.clone()
    }

    fn on_play(&mut self) {
        self.status.set(PlayStatus::Playing);
        log::info!("[spectrum {}] play", self.id);
        if let Err(e) = self.start_drawing() {
            log::error!("[spectrum {}] {:#}", self.id, e);
        }
    }

    fn on_pause(&mut self) {
        self.status.set(PlayStatus::Paused);
        log::info!("[spectrum {}] pause", self.id);
    }

    fn start_drawing(&mut self) -> anyhow::Result<()> {
        let audio_ele = self
            .listeners
            .as_ref()
            .map(|l| l.target().clone())
            .ok_or_else(|| anyhow::anyhow!("Audio element is not found"))?;
        let analyser = self.graph.setup(&audio_ele, &self.options)?;
        let surface = CanvasSurface::new(&self.canvas, &self.options)?;
        let meter = SpectrumMeter::new(MeterLayout::from_options(&self.options));
        self.frames.start(FrameContext {
            meter,
            surface,
            analyser,
            status: self.status.clone(),
        });
        Ok(())
    }

    /// Pick up new colors or geometry without touching the media element.
    fn restart_if_playing(&mut self) {
        if self.status.get() == PlayStatus::Playing {
            log::debug!("[spectrum {}] restarting draw loop", self.id);
            if let Err(e) = self.start_drawing() {
                log::error!("[spectrum {}] {:#}", self.id, e);
            }
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.frames.stop();
    }
}

fn with_inner(weak: &Weak<RefCell<Inner>>, f: impl FnOnce(&mut Inner)) {
    if let Some(inner) = weak.upgrade() {
        match inner.try_borrow_mut() {
            Ok(mut i) => f(&mut i),
            Err(_) => log::error!("[spectrum] widget busy, media event dropped"),
        }
    }
}

/// (Re)bind listeners to whichever audio element the options currently point at.
fn retarget(this: &Rc<RefCell<Inner>>) {
    let target = this.borrow().resolve_audio();
    {
        let inner = this.borrow();
        if let (Some(l), Some(t)) = (&inner.listeners, &target) {
            if l.target() == t {
                return;
            }
        }
    }

    let mut inner = this.borrow_mut();
    inner.frames.stop();
    inner.listeners = None;
    inner.graph.release_analyser();
    inner.status.set(PlayStatus::Paused);

    let Some(target) = target else {
        log::error!("Target audio not found.");
        return;
    };

    let weak_play = Rc::downgrade(this);
    let weak_pause = Rc::downgrade(this);
    inner.listeners = Some(MediaListeners::wire(
        &target,
        move || with_inner(&weak_play, Inner::on_play),
        move || with_inner(&weak_pause, Inner::on_pause),
    ));
    log::info!("[spectrum {}] attached to audio element", inner.id);

    if !target.paused() {
        inner.on_play();
    }
}

/// Spectrum meter widget bound to one canvas and one audio element.
#[wasm_bindgen]
pub struct AudioSpectrum {
    inner: Rc<RefCell<Inner>>,
}

#[wasm_bindgen]
impl AudioSpectrum {
    /// Mount a new canvas under `parent` and bind it to the target audio.
    ///
    /// `audio_context` lets several widgets share one context; a context
    /// supplied this way is left open on `destroy`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        parent: &web::Element,
        options: JsValue,
        audio_element: Option<web::HtmlAudioElement>,
        audio_context: Option<web::AudioContext>,
    ) -> Result<AudioSpectrum, JsValue> {
        let options = options_from_js(&options)?;
        let document = dom::window_document().ok_or_else(|| js_err("no document"))?;
        let id = options.resolved_id(&mut rand::thread_rng());
        let canvas =
            dom::create_canvas(&document, &id, &options).map_err(|e| js_err(format!("{e:#}")))?;
        parent.append_child(&canvas)?;
        log::info!(
            "[spectrum {}] mounted {}x{} meters={}",
            id,
            options.width,
            options.height,
            options.meter_count
        );

        let inner = Rc::new(RefCell::new(Inner {
            id,
            options,
            canvas,
            supplied_audio: audio_element,
            graph: AudioGraph::new(audio_context),
            listeners: None,
            status: Rc::new(Cell::new(PlayStatus::Paused)),
            frames: FrameLoop::default(),
        }));
        retarget(&inner);
        Ok(AudioSpectrum { inner })
    }

    #[wasm_bindgen(getter)]
    pub fn id(&self) -> String {
        self.inner.borrow().id.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn canvas(&self) -> web::HtmlCanvasElement {
        self.inner.borrow().canvas.clone()
    }

    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.inner.borrow().status.get() == PlayStatus::Playing
    }

    #[wasm_bindgen(js_name = setMeterColor)]
    pub fn set_meter_color(&self, color: JsValue) -> Result<(), JsValue> {
        let text = json_from_js(&color).map_err(|e| js_err(format!("{e:#}")))?;
        let color: MeterColor = serde_json::from_str(&text).map_err(js_err)?;
        color.validate().map_err(js_err)?;

        let mut inner = self.inner.borrow_mut();
        if inner.options.meter_color == color {
            return Ok(());
        }
        inner.options.meter_color = color;
        inner.restart_if_playing();
        Ok(())
    }

    #[wasm_bindgen(js_name = setOptions)]
    pub fn set_options(&self, options: JsValue) -> Result<(), JsValue> {
        let mut next = options_from_js(&options)?;
        let audio_changed = {
            let mut inner = self.inner.borrow_mut();
            if next.id.as_deref().is_some_and(|id| id != inner.id) {
                log::warn!("[spectrum {}] id cannot change after mount", inner.id);
            }
            next.id = Some(inner.id.clone());

            let prev = std::mem::replace(&mut inner.options, next);
            dom::apply_canvas_options(&inner.canvas, &inner.options, Some(&prev));
            inner.graph.apply_analysis_options(&inner.options);
            if prev.visuals_differ(&inner.options) {
                inner.restart_if_playing();
            }
            prev.audio_id != inner.options.audio_id
        };
        if audio_changed {
            retarget(&self.inner);
        }
        Ok(())
    }

    #[wasm_bindgen(js_name = setAudioElement)]
    pub fn set_audio_element(&self, audio_element: Option<web::HtmlAudioElement>) {
        self.inner.borrow_mut().supplied_audio = audio_element;
        retarget(&self.inner);
    }

    /// Stop drawing, unhook the audio element and remove the canvas.
    pub fn destroy(self) {
        let mut inner = self.inner.borrow_mut();
        inner.frames.stop();
        inner.listeners = None;
        inner.graph.close();
        inner.canvas.remove();
        log::info!("[spectrum {}] destroyed", inner.id);
    }
}
