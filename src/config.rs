use crate::color::{ColorError, MeterColor};
use crate::constants::*;
use crate::id::random_id;
use rand::Rng;
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Widget properties as handed over from JavaScript.
///
/// Every key is optional; missing keys fall back to the defaults below.
/// `attributes` is forwarded verbatim onto the `<canvas>` element.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpectrumOptions {
    pub id: Option<String>,
    pub width: u32,
    pub height: u32,
    pub audio_id: Option<String>,
    pub cap_color: String,
    pub cap_height: f64,
    pub meter_width: f64,
    pub meter_count: u32,
    pub meter_color: MeterColor,
    pub gap: f64,
    pub smoothing_time_constant: f64,
    pub fft_size: u32,
    pub disable_caps: bool,
    pub attributes: BTreeMap<String, String>,
}

impl Default for SpectrumOptions {
    fn default() -> Self {
        Self {
            id: None,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            audio_id: None,
            cap_color: DEFAULT_CAP_COLOR.to_string(),
            cap_height: DEFAULT_CAP_HEIGHT,
            meter_width: DEFAULT_METER_WIDTH,
            meter_count: DEFAULT_METER_COUNT,
            meter_color: MeterColor::default(),
            gap: DEFAULT_GAP,
            smoothing_time_constant: DEFAULT_SMOOTHING_TIME_CONSTANT,
            fft_size: DEFAULT_FFT_SIZE,
            disable_caps: false,
            attributes: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid options: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("fftSize must be a power of two between 32 and 32768, got {0}")]
    FftSize(u32),
    #[error("smoothingTimeConstant must be within 0..=1, got {0}")]
    Smoothing(f64),
    #[error("meterCount must be between 1 and 16384, got {0}")]
    MeterCount(u32),
    #[error("canvas must be at least 1x1, got {width}x{height}")]
    CanvasSize { width: u32, height: u32 },
    #[error("{field} must be a finite, non-negative number, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("meterWidth must be positive, got {0}")]
    MeterWidth(f64),
    #[error("capHeight {cap_height} leaves no room in a canvas {height}px tall")]
    CapTooTall { cap_height: f64, height: u32 },
    #[error(transparent)]
    MeterColor(#[from] ColorError),
}

impl SpectrumOptions {
    /// Parse options from JSON text. An empty string or `null` yields defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(trimmed)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fft_size.is_power_of_two()
            || !(FFT_SIZE_MIN..=FFT_SIZE_MAX).contains(&self.fft_size)
        {
            return Err(ConfigError::FftSize(self.fft_size));
        }
        if !(0.0..=1.0).contains(&self.smoothing_time_constant) {
            return Err(ConfigError::Smoothing(self.smoothing_time_constant));
        }
        if self.meter_count == 0 || self.meter_count > METER_COUNT_MAX {
            return Err(ConfigError::MeterCount(self.meter_count));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::CanvasSize {
                width: self.width,
                height: self.height,
            });
        }
        for (field, value) in [("capHeight", self.cap_height), ("gap", self.gap)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        if !self.meter_width.is_finite() || self.meter_width <= 0.0 {
            return Err(ConfigError::MeterWidth(self.meter_width));
        }
        if self.cap_height >= self.height as f64 {
            return Err(ConfigError::CapTooTall {
                cap_height: self.cap_height,
                height: self.height,
            });
        }
        self.meter_color.validate()?;
        Ok(())
    }

    /// Configured id, or a freshly generated one.
    pub fn resolved_id<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        match &self.id {
            Some(id) if !id.is_empty() => id.clone(),
            _ => random_id(rng, RANDOM_ID_LEN),
        }
    }

    /// Forwarded attributes present in `self` but gone from `next`.
    pub fn dropped_attributes<'a>(
        &'a self,
        next: &'a SpectrumOptions,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.attributes
            .keys()
            .filter(move |k| !next.attributes.contains_key(*k) && !is_reserved_attribute(k))
            .map(String::as_str)
    }

    /// True when the change needs a fresh gradient or geometry in the draw loop.
    pub fn visuals_differ(&self, other: &SpectrumOptions) -> bool {
        self.width != other.width
            || self.height != other.height
            || self.cap_color != other.cap_color
            || self.cap_height != other.cap_height
            || self.meter_width != other.meter_width
            || self.meter_count != other.meter_count
            || self.meter_color != other.meter_color
            || self.gap != other.gap
            || self.disable_caps != other.disable_caps
    }
}

/// Attributes the widget manages itself and never forwards.
pub fn is_reserved_attribute(name: &str) -> bool {
    matches!(name, "id" | "width" | "height")
}
