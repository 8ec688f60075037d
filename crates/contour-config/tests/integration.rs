//! Integration tests for contour-config.
//!
//! These tests verify end-to-end functionality across modules: presets on
//! disk, validation, and detector banks driving real followers.

use contour_config::{
    ConfigError, Detector, DetectorBank, DetectorConfig, DetectorKind, DetectorOutput,
    DetectorPreset, ValidationError, factory_presets, get_factory_preset,
};
use contour_core::{FastRmsEnvelopeFollowerDb, Follower};
use tempfile::TempDir;

fn sine(freq: f32, amplitude: f32, len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| (i as f32 * freq * 2.0 * std::f32::consts::PI / 48000.0).sin() * amplitude)
        .collect()
}

/// Test creating a bank from a programmatic preset and processing audio.
#[test]
fn test_preset_to_bank_processing() {
    let preset = DetectorPreset::new("Integration Test")
        .with_description("Test preset for integration testing")
        .with_detector(DetectorConfig::envelope(2.0, 50.0).with_label("env"))
        .with_detector(DetectorConfig::fast(5.0).with_label("fast"))
        .with_detector(DetectorConfig::rms_db(5.0).with_label("rms"));

    let mut bank = DetectorBank::from_preset(&preset).expect("should create bank from preset");
    assert_eq!(bank.len(), 3);

    let outputs = bank.process_block(&sine(440.0, 0.5, 4800)).to_vec();
    assert!(outputs.iter().all(|o| o.to_linear().is_finite()));

    let fast = bank.level("fast").unwrap().to_linear();
    assert!(fast > 0.49 && fast <= 0.5, "fast follower read {fast}");

    // The staircase holds the peak of x², so a steady sine reads its
    // amplitude: -6.02 dB for 0.5
    let rms_db = bank.level("rms").unwrap().to_decibel().value();
    assert!((rms_db - (-6.02)).abs() < 0.1, "rms read {rms_db} dB");
}

/// Test factory presets all build into banks that process audio.
#[test]
fn test_factory_presets_to_banks() {
    let presets = factory_presets();
    assert!(!presets.is_empty(), "should have factory presets");

    for preset in presets {
        let mut bank = DetectorBank::from_preset(&preset).unwrap_or_else(|e| {
            panic!("factory preset '{}' should build: {e}", preset.name)
        });
        for output in bank.process_block(&sine(220.0, 0.3, 2400)) {
            assert!(
                output.to_linear().is_finite(),
                "preset '{}' produced non-finite output",
                preset.name
            );
        }
    }
}

/// A configured detector behaves exactly like the follower built directly.
#[test]
fn test_detector_matches_direct_follower() {
    let preset = get_factory_preset("compressor_sidechain").expect("preset should exist");
    let config = preset.find("level").expect("level detector");
    let mut detector = Detector::from_config(config, preset.sample_rate).unwrap();
    let mut direct =
        FastRmsEnvelopeFollowerDb::new(config.hold().expect("hold"), preset.sample_rate as f32);

    for sample in sine(100.0, 0.7, 4800) {
        let DetectorOutput::Decibel(level) = Follower::process(&mut detector, sample) else {
            panic!("rms_db detector should report decibels");
        };
        assert_eq!(level, direct.process(sample));
    }
}

/// Test preset save/load roundtrip through the filesystem.
#[test]
fn test_preset_save_load_roundtrip() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let preset_path = temp_dir.path().join("nested").join("sidechain.toml");

    let original = DetectorPreset::new("Roundtrip Test")
        .with_description("Testing save/load")
        .with_sample_rate(44100)
        .with_detector(DetectorConfig::rms_db(10.0).with_label("level"))
        .with_detector(DetectorConfig::peak(80.0).with_label("key"));

    original.save(&preset_path).expect("should save preset");
    let loaded = DetectorPreset::load(&preset_path).expect("should load preset");
    assert_eq!(loaded, original);

    // Both should build identical banks
    let mut bank1 = DetectorBank::from_preset(&original).unwrap();
    let mut bank2 = DetectorBank::from_preset(&loaded).unwrap();
    for sample in sine(300.0, 0.4, 1000) {
        assert_eq!(bank1.process(sample), bank2.process(sample));
    }
}

/// Test hand-written TOML with mixed detector kinds.
#[test]
fn test_hand_written_preset_file() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = temp_dir.path().join("onset.toml");
    std::fs::write(
        &path,
        r#"
name = "Hand Written"

[[detectors]]
kind = "smoothed_fast"
label = "body"
hold_ms = 12

[[detectors]]
kind = "envelope"
attack_ms = 1
release_ms = 250.5
"#,
    )
    .unwrap();

    let preset = DetectorPreset::load(&path).expect("should load");
    assert_eq!(preset.sample_rate, 48000);
    assert_eq!(preset.labels(), vec!["body", "envelope"]);

    let bank = DetectorBank::from_preset(&preset).unwrap();
    assert_eq!(
        bank.get("envelope").map(Detector::kind),
        Some(DetectorKind::Envelope)
    );
}

/// Test that a missing file produces a read error naming the path.
#[test]
fn test_load_missing_file() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = temp_dir.path().join("absent.toml");

    match DetectorPreset::load(&path) {
        Err(ConfigError::ReadFile { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected ReadFile error, got {other:?}"),
    }
}

/// Test that malformed TOML produces a parse error.
#[test]
fn test_load_malformed_file() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = temp_dir.path().join("bad.toml");
    std::fs::write(&path, "name = \n[[detectors]\n").unwrap();

    assert!(matches!(
        DetectorPreset::load(&path),
        Err(ConfigError::TomlParse(_))
    ));
}

/// Test that validation problems surface through bank construction.
#[test]
fn test_invalid_preset_reports_every_problem() {
    let preset = DetectorPreset::new("Bad Preset")
        .with_detector(DetectorConfig::new(DetectorKind::Envelope).with_attack_ms(5.0))
        .with_detector(DetectorConfig::rms(0.0));

    match DetectorBank::from_preset(&preset) {
        Err(ConfigError::Validation(ValidationError::Multiple(errors))) => {
            assert_eq!(errors.len(), 2);
        }
        other => panic!("expected multiple validation errors, got {other:?}"),
    }
}

/// Test the gate preset: key opens instantly and closes after the release.
#[test]
fn test_gate_preset_key_behavior() {
    let preset = get_factory_preset("gate").expect("gate preset should exist");
    let mut bank = DetectorBank::from_preset(&preset).unwrap();

    bank.process(0.8);
    assert_eq!(bank.level("key"), Some(DetectorOutput::Linear(0.8)));

    // 50 ms release: after 250 ms of silence the key is far below threshold
    bank.process_block(&[0.0; 12000]);
    assert!(bank.level("key").unwrap().to_linear() < 1e-3);
    assert!(bank.level("level").unwrap().to_decibel().value() < -99.0);
}
