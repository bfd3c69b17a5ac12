/// Rendering and widget tuning constants.
///
/// These keep the magic numbers of the meter math in one place so the
/// frame loop reads as geometry rather than arithmetic.
// Byte magnitude that maps to the very top of the drawable area
pub const METER_VALUE_SCALE: f64 = 270.0;

// Meter gradient runs from y=0 to this height regardless of canvas size
pub const GRADIENT_HEIGHT_PX: f64 = 300.0;

// Caps fall one magnitude unit per frame once the bar drops below them
pub const CAP_FALL_PER_FRAME: u8 = 1;

// Generated canvas ids
pub const RANDOM_ID_LEN: usize = 50;
pub const RANDOM_ID_CHARSET: &str =
    "1234567890-qwertyuiopasdfghjklzxcvbnmQWERTYUIOPASDFGHJKLZXCVBNM";

// AnalyserNode accepted FFT sizes (powers of two within this range)
pub const FFT_SIZE_MIN: u32 = 32;
pub const FFT_SIZE_MAX: u32 = 32768;

// One meter per frequency bin of the largest FFT is the most that can differ
pub const METER_COUNT_MAX: u32 = FFT_SIZE_MAX / 2;

// Widget defaults
pub const DEFAULT_WIDTH: u32 = 300;
pub const DEFAULT_HEIGHT: u32 = 200;
pub const DEFAULT_CAP_COLOR: &str = "#FFF";
pub const DEFAULT_CAP_HEIGHT: f64 = 2.0;
pub const DEFAULT_METER_WIDTH: f64 = 2.0;
pub const DEFAULT_METER_COUNT: u32 = 40 * (2 + 2);
pub const DEFAULT_GAP: f64 = 10.0;
pub const DEFAULT_SMOOTHING_TIME_CONSTANT: f64 = 0.8;
pub const DEFAULT_FFT_SIZE: u32 = 2048;
