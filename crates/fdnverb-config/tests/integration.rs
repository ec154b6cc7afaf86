//! Integration tests for fdnverb-config.
//!
//! Presets on disk, preset resolution and building working reverbs.

use fdnverb_config::{ConfigError, Preset, factory_presets, resolve_preset};
use fdnverb_reverb::{LineCount, ReverbParams};
use tempfile::TempDir;

#[test]
fn save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("room.toml");

    let preset = Preset::new("Saved Room")
        .with_description("written by a test")
        .with_params(ReverbParams {
            roomsize: 0.45,
            damping: 0.2,
            width: 0.9,
            level: 0.75,
        });
    preset.save(&path).unwrap();
    assert!(path.exists());

    let loaded = Preset::load(&path).unwrap();
    assert_eq!(loaded, preset);
}

#[test]
fn load_missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    let err = Preset::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn resolve_prefers_files_over_factory_names() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hall");
    Preset::new("My Hall")
        .with_params(ReverbParams {
            roomsize: 0.1,
            ..ReverbParams::default()
        })
        .save(&path)
        .unwrap();

    let from_file = resolve_preset(path.to_str().unwrap()).unwrap();
    assert_eq!(from_file.name, "My Hall");

    let factory = resolve_preset("hall").unwrap();
    assert_eq!(factory.name, "Hall");
    assert_eq!(factory.config.line_count, LineCount::Twelve);

    assert!(matches!(
        resolve_preset("no-such-preset"),
        Err(ConfigError::PresetNotFound(_))
    ));
}

#[test]
fn every_factory_preset_renders() {
    for preset in factory_presets() {
        let mut reverb = preset.build(48000.0).unwrap();
        let mut input = vec![0.0f32; 4096];
        input[0] = 1.0;
        let mut left = vec![0.0f32; 4096];
        let mut right = vec![0.0f32; 4096];
        reverb.process_replace(&input, &mut left, &mut right);

        assert!(
            left.iter().chain(&right).all(|s| s.is_finite()),
            "{}: non-finite output",
            preset.name
        );
        assert!(
            left.iter().any(|s| s.abs() > 1e-4),
            "{}: silent output",
            preset.name
        );
    }
}

#[test]
fn factory_decay_times_increase_with_size() {
    let small = resolve_preset("small-room").unwrap().build(44100.0).unwrap();
    let hall = resolve_preset("hall").unwrap().build(44100.0).unwrap();
    let cathedral = resolve_preset("cathedral").unwrap().build(44100.0).unwrap();
    assert!(small.decay_time() < hall.decay_time());
    assert!(hall.decay_time() < cathedral.decay_time());
}
