use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// `play`/`pause` listeners attached to one media element.
///
/// Listeners are removed again when this value is dropped, so re-targeting the
/// widget never leaves stale handlers on the previous element.
pub struct MediaListeners {
    target: web::HtmlAudioElement,
    on_play: Closure<dyn FnMut()>,
    on_pause: Closure<dyn FnMut()>,
}

impl MediaListeners {
    pub fn wire(
        target: &web::HtmlAudioElement,
        mut on_play: impl FnMut() + 'static,
        mut on_pause: impl FnMut() + 'static,
    ) -> Self {
        let on_play = Closure::wrap(Box::new(move || on_play()) as Box<dyn FnMut()>);
        let on_pause = Closure::wrap(Box::new(move || on_pause()) as Box<dyn FnMut()>);
        if let Err(e) =
            target.add_event_listener_with_callback("play", on_play.as_ref().unchecked_ref())
        {
            log::error!("play listener error: {:?}", e);
        }
        if let Err(e) =
            target.add_event_listener_with_callback("pause", on_pause.as_ref().unchecked_ref())
        {
            log::error!("pause listener error: {:?}", e);
        }
        Self {
            target: target.clone(),
            on_play,
            on_pause,
        }
    }

    pub fn target(&self) -> &web::HtmlAudioElement {
        &self.target
    }
}

impl Drop for MediaListeners {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback("play", self.on_play.as_ref().unchecked_ref());
        _ = self
            .target
            .remove_event_listener_with_callback("pause", self.on_pause.as_ref().unchecked_ref());
    }
}
