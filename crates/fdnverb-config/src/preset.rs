//! Preset file format and operations.

use fdnverb_reverb::{ParamMask, ReverbConfig, ReverbModel, ReverbParams};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// A named reverb setting: user parameters plus network configuration.
///
/// # TOML Format
///
/// ```toml
/// name = "Hall"
/// description = "Large concert hall"
/// sample_rate = 48000
///
/// [params]
/// roomsize = 0.8
/// damping = 0.35
/// width = 1.0
/// level = 0.9
///
/// [config]
/// lines = 12
/// response = "concave"
/// mod_depth = 4
/// mod_rate = 50
/// mod_freq = 1.0
/// ```
///
/// Every table and field except `name` is optional and falls back to the
/// engine defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Sample rate the preset was tuned at, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,

    /// User parameters.
    #[serde(default)]
    pub params: ReverbParams,

    /// Network configuration.
    #[serde(default)]
    pub config: ReverbConfig,
}

impl Preset {
    /// Create a preset with default parameters and configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            sample_rate: None,
            params: ReverbParams::default(),
            config: ReverbConfig::default(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the sample rate hint.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = Some(sample_rate);
        self
    }

    /// Set the user parameters.
    pub fn with_params(mut self, params: ReverbParams) -> Self {
        self.params = params;
        self
    }

    /// Set the network configuration.
    pub fn with_config(mut self, config: ReverbConfig) -> Self {
        self.config = config;
        self
    }

    /// Load and validate a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let preset = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), name = %preset.name, "loaded preset");
        Ok(preset)
    }

    /// Parse and validate a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let preset: Preset = toml::from_str(toml_str)?;
        preset.validate()?;
        Ok(preset)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        tracing::debug!(path = %path.display(), name = %self.name, "saved preset");
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every value against the range the engine accepts.
    ///
    /// The engine itself clamps silently; a preset file with a value out of
    /// range is almost certainly a typo, so it is rejected here instead.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.params;
        check_range("roomsize", p.roomsize, 1.0, "expected 0..=1")?;
        check_range("damping", p.damping, 1.0, "expected 0..=1")?;
        check_range("width", p.width, ReverbParams::WIDTH_MAX, "expected 0..=100")?;
        check_range("level", p.level, 1.0, "expected 0..=1")?;

        let c = &self.config;
        if c.mod_rate == 0 {
            return Err(ConfigError::invalid("mod_rate", 0.0, "expected at least 1"));
        }
        check_range("mod_freq", c.mod_freq, 100.0, "expected 0..=100 Hz")?;
        Ok(())
    }

    /// Build a reverb at `sample_rate` configured and parameterized by this preset.
    pub fn build(&self, sample_rate: f32) -> Result<ReverbModel, ConfigError> {
        let mut reverb = ReverbModel::with_config(sample_rate, self.config)?;
        reverb.set_parameters(&self.params, ParamMask::ALL);
        Ok(reverb)
    }

    /// Apply this preset's parameters to an existing reverb.
    ///
    /// The configuration is construction-time only and is not applied.
    pub fn apply(&self, reverb: &mut ReverbModel) {
        reverb.set_parameters(&self.params, ParamMask::ALL);
    }
}

fn check_range(
    param: &'static str,
    value: f32,
    max: f32,
    reason: &'static str,
) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(param, value, reason))
    }
}
