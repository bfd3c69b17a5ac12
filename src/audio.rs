use crate::config::SpectrumOptions;
use crate::meter::FrequencySource;
use crate::routing::{Activation, SourceCache};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// `AnalyserNode` adapter for the meter loop.
#[derive(Clone)]
pub struct AnalyserSource(pub web::AnalyserNode);

impl FrequencySource for AnalyserSource {
    fn bin_count(&self) -> usize {
        self.0.frequency_bin_count() as usize
    }

    fn byte_frequency_data(&self, out: &mut [u8]) {
        self.0.get_byte_frequency_data(out);
    }
}

/// Lazily built audio graph: media element -> analyser, media element -> destination.
///
/// The context may be handed in from outside; in that case it is never closed here.
/// Captured elements keep their path to `destination` for the lifetime of the
/// context, so re-targeting only moves the analyser edge.
pub struct AudioGraph {
    ctx: Option<web::AudioContext>,
    owns_ctx: bool,
    analyser: Option<web::AnalyserNode>,
    sources: SourceCache<web::HtmlAudioElement, web::MediaElementAudioSourceNode>,
}

impl AudioGraph {
    pub fn new(external_ctx: Option<web::AudioContext>) -> Self {
        Self {
            ctx: external_ctx,
            owns_ctx: false,
            analyser: None,
            sources: SourceCache::default(),
        }
    }

    pub fn ensure_context(&mut self) -> anyhow::Result<&web::AudioContext> {
        if self.ctx.is_none() {
            match web::AudioContext::new() {
                Ok(ctx) => {
                    log::debug!("[audio] created AudioContext");
                    self.ctx = Some(ctx);
                    self.owns_ctx = true;
                }
                Err(e) => {
                    log::error!("Your browser does not support AudioContext");
                    log::error!("{:?}", e);
                    return Err(anyhow::anyhow!("AudioContext unavailable: {:?}", e));
                }
            }
        }
        let ctx = self
            .ctx
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("no AudioContext"))?;
        if ctx.state() == web::AudioContextState::Suspended {
            resume_in_background(ctx);
        }
        Ok(ctx)
    }

    /// Create the analyser once and route `audio_ele` into it.
    ///
    /// An element seen before reuses its existing media source.
    pub fn setup(
        &mut self,
        audio_ele: &web::HtmlAudioElement,
        opts: &SpectrumOptions,
    ) -> anyhow::Result<AnalyserSource> {
        let ctx = self.ensure_context()?.clone();

        if self.analyser.is_none() {
            let analyser = ctx
                .create_analyser()
                .map_err(|e| anyhow::anyhow!("AnalyserNode error: {:?}", e))?;
            analyser.set_smoothing_time_constant(opts.smoothing_time_constant);
            analyser.set_fft_size(opts.fft_size);
            self.analyser = Some(analyser);
        }
        let analyser = self
            .analyser
            .clone()
            .ok_or_else(|| anyhow::anyhow!("analyser missing"))?;

        let index = self.sources.capture(audio_ele, |ele| -> anyhow::Result<_> {
            let source = ctx
                .create_media_element_source(ele)
                .map_err(|e| anyhow::anyhow!("MediaElementAudioSourceNode error: {:?}", e))?;
            source
                .connect_with_audio_node(&ctx.destination())
                .map_err(|e| anyhow::anyhow!("connect destination: {:?}", e))?;
            Ok(source)
        })?;

        if let Activation::Switched { index, previous } = self.sources.activate(index) {
            if let Some(prev) = previous.and_then(|p| self.sources.source(p)) {
                _ = prev.disconnect_with_audio_node(&analyser);
            }
            let source = self
                .sources
                .source(index)
                .ok_or_else(|| anyhow::anyhow!("media source missing"))?;
            source
                .connect_with_audio_node(&analyser)
                .map_err(|e| anyhow::anyhow!("connect analyser: {:?}", e))?;
            log::info!(
                "[audio] source wired fft={} bins={} captured={}",
                analyser.fft_size(),
                analyser.frequency_bin_count(),
                self.sources.len()
            );
        }

        Ok(AnalyserSource(analyser))
    }

    pub fn apply_analysis_options(&self, opts: &SpectrumOptions) {
        if let Some(a) = &self.analyser {
            if a.fft_size() != opts.fft_size {
                a.set_fft_size(opts.fft_size);
            }
            if a.smoothing_time_constant() != opts.smoothing_time_constant {
                a.set_smoothing_time_constant(opts.smoothing_time_constant);
            }
        }
    }

    /// Unhook the current element from the analyser; it keeps playing out loud.
    pub fn release_analyser(&mut self) {
        let Some(analyser) = &self.analyser else {
            return;
        };
        if let Some(src) = self.sources.deactivate().and_then(|i| self.sources.source(i)) {
            _ = src.disconnect_with_audio_node(analyser);
            log::debug!("[audio] media source released from analyser");
        }
    }

    /// Tear down the analysis side.
    ///
    /// A context the widget created is only closed when no element was ever
    /// captured by it; otherwise closing would silence those players.
    pub fn close(&mut self) {
        self.release_analyser();
        if let Some(a) = self.analyser.take() {
            _ = a.disconnect();
        }
        if self.owns_ctx && !self.sources.has_captured() {
            if let Some(ctx) = self.ctx.take() {
                _ = ctx.close();
            }
            self.owns_ctx = false;
        } else if self.sources.has_captured() {
            log::info!(
                "[audio] keeping AudioContext open for {} captured element(s)",
                self.sources.len()
            );
        }
    }
}

fn resume_in_background(ctx: &web::AudioContext) {
    match ctx.resume() {
        Ok(promise) => spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::error!("AudioContext resume failed: {:?}", e);
            }
        }),
        Err(e) => log::error!("AudioContext resume failed: {:?}", e),
    }
}
