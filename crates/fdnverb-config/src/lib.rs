//! Preset management for the fdnverb reverb.
//!
//! A [`Preset`] bundles the four user parameters with the construction-time
//! network configuration, stored as TOML.
//!
//! # Features
//!
//! - **Preset files**: Load, validate and save presets as TOML
//! - **Factory presets**: Built-in rooms, halls and plates
//! - **Resolution**: [`resolve_preset`] accepts either a file path or a
//!   factory preset name
//!
//! # Example
//!
//! ```rust,no_run
//! use fdnverb_config::{Preset, get_factory_preset};
//!
//! let preset = Preset::load("my_room.toml").unwrap();
//! let mut reverb = preset.build(48000.0).unwrap();
//!
//! let hall = get_factory_preset("hall").unwrap();
//! hall.apply(&mut reverb);
//! hall.save("presets/hall.toml").unwrap();
//! ```

mod error;
mod preset;

/// Factory presets bundled with the library.
pub mod factory_presets;

use std::path::Path;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
pub use preset::Preset;

/// Load a preset from a file path or a factory preset name.
///
/// An existing file wins over a factory preset of the same name.
pub fn resolve_preset(name_or_path: &str) -> Result<Preset, ConfigError> {
    let path = Path::new(name_or_path);
    if path.is_file() {
        return Preset::load(path);
    }
    get_factory_preset(name_or_path)
        .ok_or_else(|| ConfigError::PresetNotFound(name_or_path.to_string()))
}
