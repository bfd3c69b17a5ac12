use serde::Deserialize;
use smallvec::SmallVec;
use thiserror::Error;

/// A single gradient stop for the meter fill.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ColorStop {
    pub stop: f32,
    pub color: String,
}

impl ColorStop {
    pub fn new(stop: f32, color: impl Into<String>) -> Self {
        Self {
            stop,
            color: color.into(),
        }
    }
}

/// Meter fill: either one CSS color or a vertical gradient.
///
/// Accepts both `"#0CD7FD"` and `[{"stop": 0, "color": "#f00"}, ...]`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MeterColor {
    Solid(String),
    Stops(Vec<ColorStop>),
}

impl Default for MeterColor {
    fn default() -> Self {
        MeterColor::Stops(vec![
            ColorStop::new(0.0, "#f00"),
            ColorStop::new(0.5, "#0CD7FD"),
            ColorStop::new(1.0, "red"),
        ])
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ColorError {
    #[error("meter color is empty")]
    EmptyColor,
    #[error("meter color has no gradient stops")]
    NoStops,
    #[error("gradient stop {index} has offset {offset}, expected 0..=1")]
    StopOutOfRange { index: usize, offset: f32 },
}

impl MeterColor {
    /// Stops to feed into `addColorStop`; a solid color becomes a single stop at 0.
    pub fn gradient_stops(&self) -> SmallVec<[ColorStop; 4]> {
        match self {
            MeterColor::Solid(c) => smallvec::smallvec![ColorStop::new(0.0, c.clone())],
            MeterColor::Stops(stops) => stops.iter().cloned().collect(),
        }
    }

    pub fn validate(&self) -> Result<(), ColorError> {
        match self {
            MeterColor::Solid(c) if c.trim().is_empty() => Err(ColorError::EmptyColor),
            MeterColor::Solid(_) => Ok(()),
            MeterColor::Stops(stops) if stops.is_empty() => Err(ColorError::NoStops),
            MeterColor::Stops(stops) => {
                for (index, s) in stops.iter().enumerate() {
                    if !s.stop.is_finite() || !(0.0..=1.0).contains(&s.stop) {
                        return Err(ColorError::StopOutOfRange {
                            index,
                            offset: s.stop,
                        });
                    }
                    if s.color.trim().is_empty() {
                        return Err(ColorError::EmptyColor);
                    }
                }
                Ok(())
            }
        }
    }
}
