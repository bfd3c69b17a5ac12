// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn meter_scale_covers_byte_range() {
    // Full-scale bins (255) must still leave a gap above the tallest bar
    assert!(METER_VALUE_SCALE > u8::MAX as f64);
    assert!(GRADIENT_HEIGHT_PX > 0.0);
    assert!(CAP_FALL_PER_FRAME >= 1);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn fft_bounds_are_powers_of_two() {
    assert!(FFT_SIZE_MIN.is_power_of_two());
    assert!(FFT_SIZE_MAX.is_power_of_two());
    assert!(FFT_SIZE_MIN < FFT_SIZE_MAX);
    assert!(DEFAULT_FFT_SIZE.is_power_of_two());
    assert!((FFT_SIZE_MIN..=FFT_SIZE_MAX).contains(&DEFAULT_FFT_SIZE));
    assert!(DEFAULT_METER_COUNT <= METER_COUNT_MAX);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn defaults_are_consistent() {
    assert!(DEFAULT_CAP_HEIGHT < DEFAULT_HEIGHT as f64);
    assert!(DEFAULT_METER_WIDTH > 0.0);
    assert!(DEFAULT_GAP >= 0.0);
    assert!((0.0..=1.0).contains(&DEFAULT_SMOOTHING_TIME_CONSTANT));
    assert_eq!(DEFAULT_METER_COUNT, 160);
}

#[test]
fn id_charset_has_no_duplicates() {
    let mut seen = std::collections::HashSet::new();
    for c in RANDOM_ID_CHARSET.chars() {
        assert!(seen.insert(c), "duplicate {c}");
    }
    assert_eq!(RANDOM_ID_LEN, 50);
}
