//! Configuration types for loading two-body scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`ParametersConfig`] – step size, step count, physical constants
//! - [`BodyConfig`]       – initial state for the primary and the secondary
//! - [`RenderConfig`]     – presentation options for the viewer and GIF export
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! Every field is optional. Missing values fall back to the Earth/Moon system.
//!
//! # YAML format
//!
//! ```yaml
//! parameters:
//!   G: 6.67430e-11          # gravitational constant
//!   dt: 3600.0              # fixed step size (s)
//!   steps: 500              # number of steps
//!   separation: 3.844e8     # initial distance, secondary placed on +x
//!
//! primary:
//!   m: 5.972e24
//!   radius: 6.371e6
//!   v: [0.0, 0.0, 0.0]
//!
//! secondary:
//!   m: 7.348e22
//!   radius: 1.737e6
//!   v: [0.0, 1022.0, 0.0]
//!   # x: [3.844e8, 0.0, 0.0] # overrides `separation`
//!
//! render:
//!   frame_interval_ms: 50
//!   fps: 20
//!   rotation_period: 86400.0
//! ```
//!
//! [`crate::Scenario::build_scenario`] validates this and maps it into the
//! runtime types.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_G: f64 = 6.67430e-11;
pub const DEFAULT_DT: f64 = 3600.0;
pub const DEFAULT_STEPS: usize = 500;
pub const DEFAULT_SEPARATION: f64 = 3.844e8;

pub const EARTH_MASS: f64 = 5.972e24;
pub const EARTH_RADIUS: f64 = 6.371e6;
pub const MOON_MASS: f64 = 7.348e22;
pub const MOON_RADIUS: f64 = 1.737e6;
pub const MOON_ORBITAL_SPEED: f64 = 1022.0;
pub const EARTH_ROTATION_PERIOD: f64 = 24.0 * 3600.0;

/// Global numerical and physical parameters for a scenario
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ParametersConfig {
    pub G: f64, // gravitational constant
    pub dt: f64, // time step size
    pub steps: usize, // number of steps
    pub separation: f64, // initial distance between the bodies
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            G: DEFAULT_G,
            dt: DEFAULT_DT,
            steps: DEFAULT_STEPS,
            separation: DEFAULT_SEPARATION,
        }
    }
}

/// Configuration for a single body's initial state.
/// Unset fields take the defaults of whichever body this describes.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct BodyConfig {
    pub x: Option<[f64; 3]>, // initial position (m)
    pub v: Option<[f64; 3]>, // initial velocity (m/s)
    pub m: Option<f64>, // mass (kg)
    pub radius: Option<f64>, // radius (m), used for drawing only
}

/// Fully resolved initial state of one body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedBody {
    pub x: [f64; 3],
    pub v: [f64; 3],
    pub m: f64,
    pub radius: f64,
}

impl BodyConfig {
    pub fn resolve(&self, defaults: ResolvedBody) -> ResolvedBody {
        ResolvedBody {
            x: self.x.unwrap_or(defaults.x),
            v: self.v.unwrap_or(defaults.v),
            m: self.m.unwrap_or(defaults.m),
            radius: self.radius.unwrap_or(defaults.radius),
        }
    }
}

/// Presentation options shared by the 3D viewer and the GIF exporter
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub frame_interval_ms: u64, // viewer: time between trajectory frames
    pub fps: u32, // GIF frame rate
    pub x_limits: [f64; 2], // visible range (m)
    pub y_limits: [f64; 2],
    pub z_limits: [f64; 2],
    pub radius_scale: f64, // radius exaggeration so bodies are visible at orbit scale
    pub rotation_period: f64, // primary spin period (s), cosmetic
    pub primary_color: [u8; 3],
    pub secondary_color: [u8; 3],
    pub primary_texture: Option<String>, // image under the bevy assets dir
    pub gif_size: [u32; 2], // width, height in pixels
    pub looping: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 50,
            fps: 20,
            x_limits: [-5e8, 5e8],
            y_limits: [-5e8, 5e8],
            z_limits: [-2e8, 2e8],
            radius_scale: 10.0,
            rotation_period: EARTH_ROTATION_PERIOD,
            primary_color: [0, 200, 0],
            secondary_color: [255, 255, 255],
            primary_texture: None,
            gif_size: [480, 480],
            looping: true,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ScenarioConfig {
    pub parameters: ParametersConfig,
    pub primary: BodyConfig,
    pub secondary: BodyConfig,
    pub render: RenderConfig,
}

impl ScenarioConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        Self::from_yaml_str(&text)
    }

    /// Primary at rest at the origin unless configured otherwise
    pub fn primary_body(&self) -> ResolvedBody {
        self.primary.resolve(ResolvedBody {
            x: [0.0, 0.0, 0.0],
            v: [0.0, 0.0, 0.0],
            m: EARTH_MASS,
            radius: EARTH_RADIUS,
        })
    }

    /// Secondary on the +x axis at `separation` from the primary's position
    pub fn secondary_body(&self) -> ResolvedBody {
        let p = self.primary_body().x;
        self.secondary.resolve(ResolvedBody {
            x: [p[0] + self.parameters.separation, p[1], p[2]],
            v: [0.0, MOON_ORBITAL_SPEED, 0.0],
            m: MOON_MASS,
            radius: MOON_RADIUS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_earth_moon_defaults() {
        let cfg = ScenarioConfig::from_yaml_str("{}").unwrap();
        assert_eq!(cfg, ScenarioConfig::default());
        assert_eq!(cfg.parameters.steps, 500);
        assert_eq!(cfg.parameters.dt, 3600.0);

        let moon = cfg.secondary_body();
        assert_eq!(moon.x, [3.844e8, 0.0, 0.0]);
        assert_eq!(moon.v, [0.0, 1022.0, 0.0]);
        assert_eq!(moon.m, 7.348e22);
        assert_eq!(cfg.primary_body().m, 5.972e24);
    }

    #[test]
    fn partial_body_keeps_other_defaults() {
        let yaml = "
parameters:
  steps: 10
secondary:
  v: [0.0, -1022.0, 0.0]
";
        let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(cfg.parameters.steps, 10);
        assert_eq!(cfg.parameters.G, DEFAULT_G);
        let moon = cfg.secondary_body();
        assert_eq!(moon.v, [0.0, -1022.0, 0.0]);
        assert_eq!(moon.radius, MOON_RADIUS);
        assert_eq!(cfg.render.fps, 20);
    }

    #[test]
    fn explicit_position_overrides_separation() {
        let yaml = "
parameters:
  separation: 1.0
primary:
  x: [10.0, 0.0, 0.0]
secondary:
  x: [0.0, 5.0, 0.0]
";
        let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(cfg.secondary_body().x, [0.0, 5.0, 0.0]);

        let cfg = ScenarioConfig::from_yaml_str("parameters: {separation: 1.0}\nprimary: {x: [10.0, 0.0, 0.0]}").unwrap();
        assert_eq!(cfg.secondary_body().x, [11.0, 0.0, 0.0]);
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = ScenarioConfig::from_yaml_str("parameters: {steps: many}").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
