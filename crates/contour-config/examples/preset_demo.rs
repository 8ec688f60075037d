//! Preset and configuration demo: detector configs, factory presets, and banks.
//!
//! Run with: cargo run -p contour-config --example preset_demo

use contour_config::{
    DetectorBank, DetectorConfig, DetectorKind, DetectorPreset, factory_preset_names,
    get_factory_preset, is_factory_preset, validate_preset,
};

fn main() {
    // --- DetectorConfig basics ---
    println!("=== Detector Configuration ===\n");

    println!("{:<14} {:>8} {:>8} {:>8}", "Kind", "attack", "release", "hold");
    println!("{:-<14} {:->8} {:->8} {:->8}", "", "", "", "");
    for kind in DetectorKind::ALL {
        let mark = |used: bool| if used { "ms" } else { "-" };
        println!(
            "{:<14} {:>8} {:>8} {:>8}",
            kind.as_str(),
            mark(kind.uses_attack()),
            mark(kind.uses_release()),
            mark(kind.uses_hold())
        );
    }

    // --- Preset creation ---
    println!("\n=== Preset Creation ===\n");

    let preset = DetectorPreset::new("Bass Compressor")
        .with_description("Level detector tuned for a bass guitar down to E1")
        .with_sample_rate(48000)
        .with_detector(DetectorConfig::rms_db(12.5).with_label("level"))
        .with_detector(DetectorConfig::envelope(8.0, 200.0).rectified().with_label("program"));

    println!("Preset: {}", preset.name);
    println!("Description: {}", preset.description.as_deref().unwrap_or("none"));
    println!("Sample rate: {}", preset.sample_rate);
    println!("Detectors ({}): {:?}", preset.len(), preset.labels());

    println!("\n--- Serialized TOML ---");
    match preset.to_toml() {
        Ok(toml) => println!("{toml}"),
        Err(e) => println!("serialization failed: {e}"),
    }

    // --- Validation ---
    println!("=== Validation ===\n");

    let broken = DetectorPreset::new("Broken")
        .with_detector(DetectorConfig::fast(0.02))
        .with_detector(DetectorConfig::peak(50.0).with_hold_ms(5.0));
    match validate_preset(&broken.clone().with_sample_rate(8000)) {
        Ok(()) => println!("unexpectedly valid"),
        Err(e) => println!("{e}"),
    }

    // --- Factory presets ---
    println!("\n=== Factory Presets ===\n");

    for name in factory_preset_names() {
        let Some(preset) = get_factory_preset(name) else {
            continue;
        };
        let kinds: Vec<_> = preset.iter().map(|d| d.kind.as_str()).collect();
        println!(
            "  {:<22} - {} [{}]",
            name,
            preset.description.as_deref().unwrap_or(""),
            kinds.join(", ")
        );
    }
    println!("\nIs 'gate' a factory preset? {}", is_factory_preset("gate"));
    println!("Is 'my_custom' a factory preset? {}", is_factory_preset("my_custom"));

    // --- Detector bank ---
    println!("\n=== Detector Bank ===\n");

    let Some(sidechain) = get_factory_preset("compressor_sidechain") else {
        return;
    };
    let mut bank = match DetectorBank::from_preset(&sidechain) {
        Ok(bank) => bank,
        Err(e) => {
            println!("failed to build bank: {e}");
            return;
        }
    };

    // A 110 Hz tone that steps down 12 dB halfway through
    let threshold_db = -18.0;
    let ratio = 4.0;
    for n in 0..9600 {
        let amplitude = if n < 4800 { 0.8 } else { 0.2 };
        let input = (2.0 * std::f32::consts::PI * 110.0 * n as f32 / 48000.0).sin() * amplitude;
        bank.process(input);

        let level_db = bank.level("level").map_or(-100.0, |l| l.to_decibel().value());
        let program = bank.level("program").map_or(0.0, |l| l.to_linear());
        if n % 1200 == 0 {
            let over = (level_db - threshold_db).max(0.0);
            println!(
                "  {:>5.1} ms  level {:>7.2} dB  program {:.3}  reduction {:>5.2} dB",
                n as f32 / 48.0,
                level_db,
                program,
                over * (1.0 - 1.0 / ratio)
            );
        }
    }

    println!("\nPreset demo complete.");
}
