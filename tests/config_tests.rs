// Host-side tests for widget options, meter colors and id generation.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod color {
    include!("../src/color.rs");
}
mod id {
    include!("../src/id.rs");
}
mod config {
    include!("../src/config.rs");
}

use color::{ColorError, ColorStop, MeterColor};
use config::{ConfigError, SpectrumOptions};
use constants::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn defaults_match_widget_props() {
    let o = SpectrumOptions::default();
    assert_eq!(o.width, 300);
    assert_eq!(o.height, 200);
    assert_eq!(o.cap_color, "#FFF");
    assert_eq!(o.cap_height, 2.0);
    assert_eq!(o.meter_width, 2.0);
    assert_eq!(o.meter_count, 160);
    assert_eq!(o.gap, 10.0);
    assert_eq!(o.smoothing_time_constant, 0.8);
    assert_eq!(o.fft_size, 2048);
    assert!(!o.disable_caps);
    assert!(o.id.is_none());
    assert!(o.audio_id.is_none());
    assert!(o.validate().is_ok());

    let stops = o.meter_color.gradient_stops();
    assert_eq!(stops.len(), 3);
    assert_eq!(stops[1], ColorStop::new(0.5, "#0CD7FD"));
}

#[test]
fn empty_and_null_json_yield_defaults() {
    assert_eq!(
        SpectrumOptions::from_json("").unwrap(),
        SpectrumOptions::default()
    );
    assert_eq!(
        SpectrumOptions::from_json("null").unwrap(),
        SpectrumOptions::default()
    );
    assert_eq!(
        SpectrumOptions::from_json("{}").unwrap(),
        SpectrumOptions::default()
    );
}

#[test]
fn camel_case_keys_override_defaults() {
    let o = SpectrumOptions::from_json(
        r##"{
            "id": "spectrum",
            "width": 640,
            "audioId": "player",
            "capColor": "#abc",
            "meterCount": 64,
            "fftSize": 1024,
            "smoothingTimeConstant": 0.3,
            "disableCaps": true,
            "attributes": {"class": "viz", "aria-label": "spectrum"},
            "onClick": "ignored"
        }"##,
    )
    .unwrap();
    assert_eq!(o.id.as_deref(), Some("spectrum"));
    assert_eq!(o.width, 640);
    assert_eq!(o.height, DEFAULT_HEIGHT);
    assert_eq!(o.audio_id.as_deref(), Some("player"));
    assert_eq!(o.cap_color, "#abc");
    assert_eq!(o.meter_count, 64);
    assert_eq!(o.fft_size, 1024);
    assert_eq!(o.smoothing_time_constant, 0.3);
    assert!(o.disable_caps);
    assert_eq!(o.attributes.get("class").map(String::as_str), Some("viz"));
    assert!(o.validate().is_ok());
}

#[test]
fn meter_color_accepts_string_or_stops() {
    let o = SpectrumOptions::from_json(r##"{"meterColor": "#0f0"}"##).unwrap();
    assert_eq!(o.meter_color, MeterColor::Solid("#0f0".into()));
    let stops = o.meter_color.gradient_stops();
    assert_eq!(stops.as_slice(), &[ColorStop::new(0.0, "#0f0")]);

    let o = SpectrumOptions::from_json(
        r##"{"meterColor": [{"stop": 0, "color": "blue"}, {"stop": 1, "color": "white"}]}"##,
    )
    .unwrap();
    assert_eq!(
        o.meter_color,
        MeterColor::Stops(vec![
            ColorStop::new(0.0, "blue"),
            ColorStop::new(1.0, "white")
        ])
    );
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = SpectrumOptions::from_json(r#"{"width": "wide"}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn fft_size_must_be_power_of_two_in_range() {
    for ok in [32, 256, 2048, 32768] {
        let o = SpectrumOptions {
            fft_size: ok,
            ..Default::default()
        };
        assert!(o.validate().is_ok(), "fftSize {ok} rejected");
    }
    for bad in [0, 16, 1000, 65536] {
        let o = SpectrumOptions {
            fft_size: bad,
            ..Default::default()
        };
        assert!(matches!(o.validate(), Err(ConfigError::FftSize(v)) if v == bad));
    }
}

#[test]
fn smoothing_must_be_unit_interval() {
    for bad in [-0.1, 1.5, f64::NAN] {
        let o = SpectrumOptions {
            smoothing_time_constant: bad,
            ..Default::default()
        };
        assert!(matches!(o.validate(), Err(ConfigError::Smoothing(_))));
    }
    let o = SpectrumOptions {
        smoothing_time_constant: 0.0,
        ..Default::default()
    };
    assert!(o.validate().is_ok());
}

#[test]
fn geometry_is_validated() {
    let zero_meters = SpectrumOptions {
        meter_count: 0,
        ..Default::default()
    };
    assert!(matches!(
        zero_meters.validate(),
        Err(ConfigError::MeterCount(0))
    ));

    let huge = SpectrumOptions {
        meter_count: METER_COUNT_MAX + 1,
        ..Default::default()
    };
    assert!(matches!(huge.validate(), Err(ConfigError::MeterCount(_))));
    let max = SpectrumOptions {
        meter_count: METER_COUNT_MAX,
        ..Default::default()
    };
    assert!(max.validate().is_ok());

    let flat = SpectrumOptions {
        height: 0,
        ..Default::default()
    };
    assert!(matches!(flat.validate(), Err(ConfigError::CanvasSize { .. })));

    let neg_gap = SpectrumOptions {
        gap: -1.0,
        ..Default::default()
    };
    assert!(matches!(
        neg_gap.validate(),
        Err(ConfigError::Negative { field: "gap", .. })
    ));

    let thin = SpectrumOptions {
        meter_width: 0.0,
        ..Default::default()
    };
    assert!(matches!(thin.validate(), Err(ConfigError::MeterWidth(_))));

    let tall_caps = SpectrumOptions {
        height: 10,
        cap_height: 10.0,
        ..Default::default()
    };
    assert!(matches!(
        tall_caps.validate(),
        Err(ConfigError::CapTooTall { .. })
    ));
}

#[test]
fn color_stops_are_validated() {
    assert_eq!(
        MeterColor::Stops(vec![]).validate(),
        Err(ColorError::NoStops)
    );
    assert_eq!(
        MeterColor::Solid("  ".into()).validate(),
        Err(ColorError::EmptyColor)
    );
    assert_eq!(
        MeterColor::Stops(vec![ColorStop::new(0.0, "red"), ColorStop::new(1.2, "blue")])
            .validate(),
        Err(ColorError::StopOutOfRange {
            index: 1,
            offset: 1.2
        })
    );

    let o = SpectrumOptions {
        meter_color: MeterColor::Stops(vec![]),
        ..Default::default()
    };
    assert!(matches!(o.validate(), Err(ConfigError::MeterColor(_))));
}

#[test]
fn resolved_id_prefers_configured_value() {
    let mut rng = StdRng::seed_from_u64(7);
    let o = SpectrumOptions {
        id: Some("my-canvas".into()),
        ..Default::default()
    };
    assert_eq!(o.resolved_id(&mut rng), "my-canvas");
}

#[test]
fn generated_ids_use_charset_and_length() {
    let mut rng = StdRng::seed_from_u64(42);
    let o = SpectrumOptions {
        id: Some(String::new()),
        ..Default::default()
    };
    let a = o.resolved_id(&mut rng);
    let b = o.resolved_id(&mut rng);
    assert_eq!(a.len(), RANDOM_ID_LEN);
    assert!(a.chars().all(|c| RANDOM_ID_CHARSET.contains(c)));
    assert_ne!(a, b);

    let short = id::random_id(&mut rng, 4);
    assert_eq!(short.len(), 4);
    assert!(id::random_id(&mut rng, 0).is_empty());
}

#[test]
fn dropped_attributes_are_reported_for_removal() {
    let prev = SpectrumOptions::from_json(
        r#"{"attributes": {"class": "viz", "title": "spectrum", "width": "9"}}"#,
    )
    .unwrap();
    let next = SpectrumOptions::from_json(r#"{"attributes": {"title": "bars"}}"#).unwrap();

    // Reserved names are never forwarded, so they are never removed either
    let dropped: Vec<&str> = prev.dropped_attributes(&next).collect();
    assert_eq!(dropped, vec!["class"]);

    assert_eq!(next.dropped_attributes(&next).count(), 0);
    assert!(config::is_reserved_attribute("id"));
    assert!(!config::is_reserved_attribute("class"));
}

#[test]
fn visual_changes_are_detected() {
    let base = SpectrumOptions::default();
    let same_visuals = SpectrumOptions {
        fft_size: 512,
        audio_id: Some("other".into()),
        ..base.clone()
    };
    assert!(!base.visuals_differ(&same_visuals));

    let recolored = SpectrumOptions {
        meter_color: MeterColor::Solid("#123".into()),
        ..base.clone()
    };
    assert!(base.visuals_differ(&recolored));
}
