//! Factory presets bundled with the library.
//!
//! Always available without external files; embedded as TOML so they read
//! exactly like user presets.

use crate::Preset;

/// Internal names of the factory presets.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "small-room",
    "medium-room",
    "hall",
    "cathedral",
    "dark-plate",
];

static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("small-room", SMALL_ROOM_PRESET),
    ("medium-room", MEDIUM_ROOM_PRESET),
    ("hall", HALL_PRESET),
    ("cathedral", CATHEDRAL_PRESET),
    ("dark-plate", DARK_PLATE_PRESET),
];

const SMALL_ROOM_PRESET: &str = r#"
name = "Small Room"
description = "Short, bright ambience for drums and plucks"

[params]
roomsize = 0.1
damping = 0.2
width = 0.8
level = 0.7
"#;

const MEDIUM_ROOM_PRESET: &str = r#"
name = "Medium Room"
description = "General-purpose room, the engine defaults with a little damping"

[params]
roomsize = 0.35
damping = 0.3
width = 1.0
level = 0.8
"#;

const HALL_PRESET: &str = r#"
name = "Hall"
description = "Concert hall with a dense twelve-line tail"

[params]
roomsize = 0.7
damping = 0.35
width = 1.0
level = 0.85

[config]
lines = 12
"#;

const CATHEDRAL_PRESET: &str = r#"
name = "Cathedral"
description = "Very long, slowly darkening wash"

[params]
roomsize = 0.95
damping = 0.5
width = 1.5
level = 0.8

[config]
lines = 12
mod_depth = 6
mod_freq = 0.6
"#;

const DARK_PLATE_PRESET: &str = r#"
name = "Dark Plate"
description = "Linear-response plate with heavy high-frequency loss"

[params]
roomsize = 0.3
damping = 0.8
width = 1.2
level = 0.9

[config]
response = "linear"
mod_rate = 25
"#;

/// Get all factory presets.
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by internal or display name.
///
/// The match is case-insensitive.
///
/// # Example
///
/// ```rust
/// use fdnverb_config::get_factory_preset;
///
/// let hall = get_factory_preset("hall").unwrap();
/// assert_eq!(hall.name, "Hall");
/// assert!(get_factory_preset("Dark Plate").is_some());
/// ```
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    let name_lower = name.to_lowercase();

    for (preset_name, toml) in FACTORY_PRESETS_TOML {
        if *preset_name == name_lower {
            return Preset::from_toml(toml).ok();
        }
    }

    factory_presets()
        .into_iter()
        .find(|preset| preset.name.to_lowercase() == name_lower)
}

/// Internal names of all factory presets.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|(name, _)| *name).collect()
}

/// Whether `name` matches a factory preset (case-insensitive).
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}
