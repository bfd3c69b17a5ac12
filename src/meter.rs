use crate::config::SpectrumOptions;
use crate::constants::{CAP_FALL_PER_FRAME, METER_VALUE_SCALE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayStatus {
    Paused,
    Playing,
}

/// Whether the animation loop should schedule another frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Finished,
}

/// Anything that can hand out byte frequency magnitudes, e.g. an `AnalyserNode`.
pub trait FrequencySource {
    fn bin_count(&self) -> usize;
    fn byte_frequency_data(&self, out: &mut [u8]);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fill {
    Cap,
    Meter,
}

/// Minimal 2D drawing surface the meter paints onto.
pub trait Surface {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn fill_rect(&mut self, fill: Fill, x: f64, y: f64, w: f64, h: f64);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeterLayout {
    pub width: f64,
    pub height: f64,
    pub cap_height: f64,
    pub meter_width: f64,
    pub gap: f64,
    pub meter_count: usize,
    pub show_caps: bool,
}

impl MeterLayout {
    pub fn from_options(opts: &SpectrumOptions) -> Self {
        Self {
            width: opts.width as f64,
            height: opts.height as f64,
            cap_height: opts.cap_height,
            meter_width: opts.meter_width,
            gap: opts.gap,
            meter_count: opts.meter_count as usize,
            show_caps: !opts.disable_caps,
        }
    }

    /// Height available to bars once the cap strip is reserved.
    #[inline]
    pub fn drawable_height(&self) -> f64 {
        self.height - self.cap_height
    }

    /// Top edge of a bar (or cap) for a byte magnitude.
    #[inline]
    pub fn y_for(&self, value: u8) -> f64 {
        (METER_VALUE_SCALE - value as f64) * self.drawable_height() / METER_VALUE_SCALE
    }

    #[inline]
    pub fn x_for(&self, index: usize) -> f64 {
        index as f64 * (self.meter_width + self.gap)
    }

    /// Stride through the frequency bins so `meter_count` meters span the data.
    #[inline]
    pub fn bin_step(&self, bins: usize) -> usize {
        (bins as f64 / self.meter_count as f64).round() as usize
    }
}

/// Per-loop meter state: falling caps plus the reusable bin buffer.
///
/// A fresh `SpectrumMeter` is built each time playback (re)starts, so caps are
/// seeded from the first frame drawn.
pub struct SpectrumMeter {
    layout: MeterLayout,
    caps: Vec<u8>,
    bins: Vec<u8>,
}

impl SpectrumMeter {
    pub fn new(layout: MeterLayout) -> Self {
        Self {
            layout,
            caps: Vec::with_capacity(layout.meter_count),
            bins: Vec::new(),
        }
    }

    pub fn caps(&self) -> &[u8] {
        &self.caps
    }

    fn caps_at_rest(&self) -> bool {
        !self.caps.iter().any(|&c| c > 0)
    }

    pub fn draw_frame<F, S>(
        &mut self,
        source: &F,
        status: PlayStatus,
        surface: &mut S,
    ) -> FrameOutcome
    where
        F: FrequencySource + ?Sized,
        S: Surface + ?Sized,
    {
        let layout = self.layout;
        let bin_count = source.bin_count();
        if self.bins.len() != bin_count {
            self.bins.resize(bin_count, 0);
        }
        source.byte_frequency_data(&mut self.bins);

        if status == PlayStatus::Paused {
            self.bins.fill(0);
            if !layout.show_caps || self.caps_at_rest() {
                surface.clear_rect(0.0, 0.0, layout.width, layout.height);
                return FrameOutcome::Finished;
            }
        }

        let step = layout.bin_step(self.bins.len());
        let drawable_h = layout.drawable_height();
        surface.clear_rect(0.0, 0.0, layout.width, layout.height);

        for i in 0..layout.meter_count {
            // Bins past the end (huge meter counts) read as silence
            let value = self.bins.get(i * step).copied().unwrap_or(0);
            if self.caps.len() <= i {
                self.caps.push(value);
            }
            let x = layout.x_for(i);

            let cap_value = if value < self.caps[i] {
                self.caps[i] = self.caps[i].saturating_sub(CAP_FALL_PER_FRAME);
                self.caps[i]
            } else {
                self.caps[i] = value;
                value
            };
            if layout.show_caps {
                surface.fill_rect(
                    Fill::Cap,
                    x,
                    layout.y_for(cap_value),
                    layout.meter_width,
                    layout.cap_height,
                );
            }

            let y = layout.y_for(value) + layout.cap_height;
            surface.fill_rect(Fill::Meter, x, y, layout.meter_width, drawable_h);
        }
        FrameOutcome::Continue
    }
}
