use crate::config::{is_reserved_attribute, SpectrumOptions};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn create_canvas(
    document: &web::Document,
    id: &str,
    opts: &SpectrumOptions,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("createElement error: {:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    canvas.set_id(id);
    apply_canvas_options(&canvas, opts, None);
    Ok(canvas)
}

/// Size the backing store and forward extra attributes (class, style, aria-*, ...).
///
/// Attributes forwarded from `previous` but missing from `opts` are removed.
pub fn apply_canvas_options(
    canvas: &web::HtmlCanvasElement,
    opts: &SpectrumOptions,
    previous: Option<&SpectrumOptions>,
) {
    canvas.set_width(opts.width);
    canvas.set_height(opts.height);
    if let Some(prev) = previous {
        for name in prev.dropped_attributes(opts) {
            if let Err(e) = canvas.remove_attribute(name) {
                log::error!("removeAttribute({}) error: {:?}", name, e);
            }
        }
    }
    for (name, value) in &opts.attributes {
        if is_reserved_attribute(name) {
            log::debug!("[dom] ignoring reserved attribute {}", name);
            continue;
        }
        if let Err(e) = canvas.set_attribute(name, value) {
            log::error!("setAttribute({}) error: {:?}", name, e);
        }
    }
}

/// Look up the target audio element by id; `None` when missing or not an `<audio>`.
pub fn audio_by_id(document: &web::Document, audio_id: &str) -> Option<web::HtmlAudioElement> {
    document
        .get_element_by_id(audio_id)
        .and_then(|el| el.dyn_into::<web::HtmlAudioElement>().ok())
}
