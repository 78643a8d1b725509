//! Configuration snapshot for the halo clock.
//!
//! A [`Config`] is a plain value. The engine receives a copy of it every
//! time it changes; nothing mutates a shared instance behind its back.

mod error;

pub use error::ConfigError;

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use halo_core::{Palette, Rgb, RingKind, TimeFormat};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};

/// File name of the configuration inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Per-ring geometry, color and radius wobble.
///
/// Fields missing from a ring table in the config file keep that ring's
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingConfig {
    /// Orbit radius of the numerals.
    pub radius: f32,
    /// Depth of the ring plane.
    pub z: f32,
    /// Color of non-highlighted numerals.
    pub color: Rgb,
    /// Time scale of the noise field sampling.
    pub noise_frequency: f32,
    /// Relative radius change at noise value 1.
    pub noise_amplitude: f32,
}

impl RingConfig {
    /// Default settings for a ring.
    pub fn for_ring(kind: RingKind) -> Self {
        let (radius, z, noise_frequency, noise_amplitude) = match kind {
            RingKind::Seconds => (1.8, 0.0, 0.1, 0.05),
            RingKind::Minutes => (1.4, -0.1, 0.08, 0.08),
            RingKind::Hours => (1.0, -0.2, 0.05, 0.1),
        };
        Self {
            radius,
            z,
            color: Palette::Classic.ring_color(kind),
            noise_frequency,
            noise_amplitude,
        }
    }

    fn sanitized(self, defaults: RingConfig) -> Self {
        Self {
            radius: clamp_or(self.radius, 0.5, 3.0, defaults.radius),
            z: clamp_or(self.z, -10.0, 10.0, defaults.z),
            color: self.color,
            noise_frequency: clamp_or(self.noise_frequency, 0.0, 1.0, defaults.noise_frequency),
            noise_amplitude: clamp_or(self.noise_amplitude, 0.0, 0.5, defaults.noise_amplitude),
        }
    }
}

/// A ring table as written in the config file, every field optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RingTable {
    radius: Option<f32>,
    z: Option<f32>,
    color: Option<Rgb>,
    noise_frequency: Option<f32>,
    noise_amplitude: Option<f32>,
}

impl RingTable {
    fn over(self, defaults: RingConfig) -> RingConfig {
        RingConfig {
            radius: self.radius.unwrap_or(defaults.radius),
            z: self.z.unwrap_or(defaults.z),
            color: self.color.unwrap_or(defaults.color),
            noise_frequency: self.noise_frequency.unwrap_or(defaults.noise_frequency),
            noise_amplitude: self.noise_amplitude.unwrap_or(defaults.noise_amplitude),
        }
    }
}

fn ring_table<'de, D: Deserializer<'de>>(
    kind: RingKind,
    deserializer: D,
) -> Result<RingConfig, D::Error> {
    RingTable::deserialize(deserializer).map(|table| table.over(RingConfig::for_ring(kind)))
}

fn seconds_table<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RingConfig, D::Error> {
    ring_table(RingKind::Seconds, deserializer)
}

fn minutes_table<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RingConfig, D::Error> {
    ring_table(RingKind::Minutes, deserializer)
}

fn hours_table<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RingConfig, D::Error> {
    ring_table(RingKind::Hours, deserializer)
}

/// Angular push applied to neighbours of the highlighted numeral.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushConfig {
    /// Radians of push per unit of highlight scale above 1.
    pub factor: f32,
    /// Geometric falloff per step of distance from the highlight.
    pub decay: f32,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            factor: 0.03,
            decay: 0.9,
        }
    }
}

/// Damped spring driving numeral scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub stiffness: f32,
    /// Fraction of velocity removed every frame.
    pub damping: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 150.0,
            damping: 0.9,
        }
    }
}

/// Per-frame interpolation rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Rate at which numeral angle offsets follow their push target.
    pub offset_lerp: f32,
    /// Rate at which the minutes and hours rings follow their target angle.
    pub angle_lerp: f32,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            offset_lerp: 0.1,
            angle_lerp: 0.1,
        }
    }
}

/// Closed curve threaded through each ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplineConfig {
    /// Fraction of the center-to-numeral distance kept by curve points.
    pub pull: f32,
    /// Number of curve segments after resampling.
    pub samples: usize,
}

impl Default for SplineConfig {
    fn default() -> Self {
        Self {
            pull: 0.92,
            samples: 120,
        }
    }
}

/// Full set of tunables for the clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub time_format: TimeFormat,
    pub highlight_color: Rgb,
    /// Target scale of the highlighted numeral.
    pub highlight_scale: f32,
    /// Seed for the noise fields. A random seed is drawn when unset.
    pub noise_seed: Option<u32>,
    /// Target frames per second of the driver loop.
    pub frame_rate: u32,
    #[serde(deserialize_with = "seconds_table")]
    pub seconds: RingConfig,
    #[serde(deserialize_with = "minutes_table")]
    pub minutes: RingConfig,
    #[serde(deserialize_with = "hours_table")]
    pub hours: RingConfig,
    pub push: PushConfig,
    pub spring: SpringConfig,
    pub smoothing: SmoothingConfig,
    pub spline: SplineConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_format: TimeFormat::default(),
            highlight_color: Palette::Classic.highlight(),
            highlight_scale: 3.0,
            noise_seed: None,
            frame_rate: 60,
            seconds: RingConfig::for_ring(RingKind::Seconds),
            minutes: RingConfig::for_ring(RingKind::Minutes),
            hours: RingConfig::for_ring(RingKind::Hours),
            push: PushConfig::default(),
            spring: SpringConfig::default(),
            smoothing: SmoothingConfig::default(),
            spline: SplineConfig::default(),
        }
    }
}

impl Config {
    /// Settings for one ring.
    pub fn ring(&self, kind: RingKind) -> &RingConfig {
        match kind {
            RingKind::Seconds => &self.seconds,
            RingKind::Minutes => &self.minutes,
            RingKind::Hours => &self.hours,
        }
    }

    /// Mutable settings for one ring.
    pub fn ring_mut(&mut self, kind: RingKind) -> &mut RingConfig {
        match kind {
            RingKind::Seconds => &mut self.seconds,
            RingKind::Minutes => &mut self.minutes,
            RingKind::Hours => &mut self.hours,
        }
    }

    /// Return a copy with the palette's colors applied.
    pub fn with_palette(&self, palette: Palette) -> Self {
        let mut config = self.clone();
        for kind in RingKind::ALL {
            config.ring_mut(kind).color = palette.ring_color(kind);
        }
        config.highlight_color = palette.highlight();
        config
    }

    /// Return a copy with every tunable clamped to its supported range.
    ///
    /// Non-finite values are replaced by their default.
    pub fn sanitized(&self) -> Self {
        let defaults = Config::default();
        let sanitized = Self {
            time_format: self.time_format,
            highlight_color: self.highlight_color,
            highlight_scale: clamp_or(self.highlight_scale, 1.0, 6.0, defaults.highlight_scale),
            noise_seed: self.noise_seed,
            frame_rate: self.frame_rate.clamp(1, 240),
            seconds: self.seconds.sanitized(defaults.seconds),
            minutes: self.minutes.sanitized(defaults.minutes),
            hours: self.hours.sanitized(defaults.hours),
            push: PushConfig {
                factor: clamp_or(self.push.factor, 0.0, 0.2, defaults.push.factor),
                decay: clamp_or(self.push.decay, 0.0, 1.0, defaults.push.decay),
            },
            spring: SpringConfig {
                stiffness: clamp_or(self.spring.stiffness, 10.0, 500.0, defaults.spring.stiffness),
                damping: clamp_or(self.spring.damping, 0.0, 1.0, defaults.spring.damping),
            },
            smoothing: SmoothingConfig {
                offset_lerp: clamp_or(
                    self.smoothing.offset_lerp,
                    0.01,
                    0.5,
                    defaults.smoothing.offset_lerp,
                ),
                angle_lerp: clamp_or(
                    self.smoothing.angle_lerp,
                    0.01,
                    0.5,
                    defaults.smoothing.angle_lerp,
                ),
            },
            spline: SplineConfig {
                pull: clamp_or(self.spline.pull, 0.5, 1.0, defaults.spline.pull),
                samples: self.spline.samples.clamp(8, 1024),
            },
        };
        if sanitized != *self {
            warn!("configuration values out of range were clamped");
        }
        sanitized
    }

    /// Default location of the configuration file.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        ProjectDirs::from("", "", "halo")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load from the default location, falling back to defaults when the
    /// file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        if !path.exists() {
            info!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse TOML text. Missing keys take their default.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Serialize to TOML text.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        info!(path = %path.display(), "saved config");
        Ok(())
    }
}

fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_tuning_panel() {
        let config = Config::default();
        assert_eq!(config.seconds.radius, 1.8);
        assert_eq!(config.minutes.z, -0.1);
        assert_eq!(config.hours.noise_amplitude, 0.1);
        assert_eq!(config.highlight_color, Rgb::from_hex(0xffaa00));
        assert_eq!(config.spring.stiffness, 150.0);
        assert_eq!(config.time_format, TimeFormat::TwelveHour);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r##"
            time_format = "twenty-four-hour"
            highlight_color = "#00ff00"

            [push]
            factor = 0.05

            [hours]
            radius = 0.8
            z = -0.3
            "##,
        )
        .unwrap();
        assert_eq!(config.time_format, TimeFormat::TwentyFourHour);
        assert_eq!(config.highlight_color, Rgb::new(0, 0xff, 0));
        assert_eq!(config.push.factor, 0.05);
        assert_eq!(config.push.decay, 0.9);
        assert_eq!(config.hours.radius, 0.8);
        assert_eq!(config.hours.z, -0.3);
        assert_eq!(config.hours.noise_amplitude, 0.1);
        assert_eq!(config.minutes, RingConfig::for_ring(RingKind::Minutes));
    }

    #[test]
    fn test_partial_ring_table_keeps_ring_defaults() {
        let config = Config::from_toml("[seconds]\nradius = 2.0\n").unwrap();
        let defaults = RingConfig::for_ring(RingKind::Seconds);
        assert_eq!(config.seconds.radius, 2.0);
        assert_eq!(config.seconds.z, defaults.z);
        assert_eq!(config.seconds.color, defaults.color);
        assert_eq!(config.seconds.noise_frequency, defaults.noise_frequency);
        assert_eq!(config.seconds.noise_amplitude, defaults.noise_amplitude);

        let config = Config::from_toml("[hours]\nnoise_amplitude = 0.2\n").unwrap();
        assert_eq!(config.hours.noise_amplitude, 0.2);
        assert_eq!(config.hours.radius, RingConfig::for_ring(RingKind::Hours).radius);
    }

    #[test]
    fn test_invalid_color_is_parse_error() {
        let err = Config::from_toml("highlight_color = \"orange\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir()
            .join(format!("halo-config-test-{}", std::process::id()))
            .join(CONFIG_FILE);
        let config = Config {
            noise_seed: Some(7),
            ..Config::default()
        }
        .with_palette(Palette::Ocean);

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_sanitized_clamps_and_replaces_non_finite() {
        let mut config = Config::default();
        config.push.factor = 5.0;
        config.spring.damping = f32::NAN;
        config.seconds.radius = 0.0;
        config.spline.samples = 0;
        config.frame_rate = 0;

        let sanitized = config.sanitized();
        assert_eq!(sanitized.push.factor, 0.2);
        assert_eq!(sanitized.spring.damping, 0.9);
        assert_eq!(sanitized.seconds.radius, 0.5);
        assert_eq!(sanitized.spline.samples, 8);
        assert_eq!(sanitized.frame_rate, 1);
    }

    #[test]
    fn test_with_palette() {
        let config = Config::default().with_palette(Palette::Mono);
        assert_eq!(config.highlight_color, Palette::Mono.highlight());
        assert_eq!(config.hours.color, Palette::Mono.ring_color(RingKind::Hours));
    }
}
