// src/sim/scene.rs

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants::{
    CONTACT_DAMPING_N_S_M, CONTACT_STIFFNESS_N_M, DEFAULT_PHYSICS_DT_S, DEFAULT_RESET_PERIOD,
    DEFAULT_RESET_VELOCITY, DEFAULT_SAMPLE_PERIOD, DEFAULT_SENSOR_JOINT,
};
use crate::sim::cycle::{CycleSchedule, ScheduleError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read scene config: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse scene config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid scene config: {0}")]
    Invalid(String),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub dt: f64,
    pub camera_eye: [f64; 3],
    pub camera_target: [f64; 3],
    /// Stop after this many physics steps. Runs until interrupted when absent.
    pub max_steps: Option<u64>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            dt: DEFAULT_PHYSICS_DT_S,
            camera_eye: [0.5, 0.5, 0.5],
            camera_target: [0.0, 0.0, 0.0],
            max_steps: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundPlaneConfig {
    pub prim_path: String,
    pub height: f64,
    pub color: [f64; 3],
}

impl Default for GroundPlaneConfig {
    fn default() -> Self {
        Self {
            prim_path: "/World/defaultGroundPlane".to_string(),
            height: -0.795,
            color: [0.40, 0.26, 0.13],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomeLightConfig {
    pub prim_path: String,
    pub intensity: f64,
    pub color: [f64; 3],
}

impl Default for DomeLightConfig {
    fn default() -> Self {
        Self {
            prim_path: "/World/Light".to_string(),
            intensity: 3000.0,
            color: [0.75, 0.75, 0.75],
        }
    }
}

/// The F/T sensor asset, anchored to the world by one fixed joint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    pub prim_path: String,
    pub usd_path: PathBuf,
    pub scale: [f64; 3],
    pub position: [f64; 3],
    /// Half extents of the sensing pad after scaling, used by the built-in backend.
    /// The default footprint reaches past the sphere's drop point at the origin.
    pub pad_half_extents: [f64; 3],
    pub joint_name: String,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            prim_path: "/World/tactile_sensor".to_string(),
            usd_path: PathBuf::from("asset").join("coinft_prototype.usd"),
            scale: [10.0, 10.0, 10.0],
            position: [0.0, -0.25, 0.05],
            pad_half_extents: [0.4, 0.4, 0.05],
            joint_name: DEFAULT_SENSOR_JOINT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereConfig {
    pub prim_path: String,
    pub radius: f64,
    pub mass: f64,
    pub color: [f64; 3],
    pub position: [f64; 3],
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            prim_path: "/World/sphere".to_string(),
            radius: 0.15,
            mass: 10.0,
            color: [1.0, 0.0, 0.0],
            position: [0.0, 0.0, 1.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepperSettings {
    pub reset_period: u64,
    pub sample_period: u64,
    /// Linear then angular velocity written to the sphere on reset.
    pub reset_velocity: [f64; 6],
}

impl Default for StepperSettings {
    fn default() -> Self {
        Self {
            reset_period: DEFAULT_RESET_PERIOD,
            sample_period: DEFAULT_SAMPLE_PERIOD,
            reset_velocity: DEFAULT_RESET_VELOCITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSettings {
    pub stiffness: f64,
    pub damping: f64,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            stiffness: CONTACT_STIFFNESS_N_M,
            damping: CONTACT_DAMPING_N_S_M,
        }
    }
}

/// Scene description: ground plane, dome light, sensor asset, falling sphere.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub simulation: SimulationSettings,
    pub ground: GroundPlaneConfig,
    pub dome_light: DomeLightConfig,
    pub sensor: SensorConfig,
    pub sphere: SphereConfig,
    pub stepper: StepperSettings,
    pub contact: ContactSettings,
}

impl SceneConfig {
    /// Reads a TOML scene file. Missing sections keep their defaults and a
    /// relative asset path is resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&text)?;
        if config.sensor.usd_path.is_relative() {
            if let Some(dir) = path.parent() {
                config.sensor.usd_path = dir.join(&config.sensor.usd_path);
            }
        }
        log::info!("Loaded scene config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |name: &str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")))
            }
        };
        positive("simulation.dt", self.simulation.dt)?;
        positive("sphere.radius", self.sphere.radius)?;
        positive("sphere.mass", self.sphere.mass)?;
        positive("contact.stiffness", self.contact.stiffness)?;
        if self.contact.damping < 0.0 {
            return Err(ConfigError::Invalid("contact.damping must not be negative".to_string()));
        }
        if self.sensor.pad_half_extents.iter().any(|&h| h.is_nan() || h < 0.0) {
            return Err(ConfigError::Invalid(
                "sensor.pad_half_extents must not be negative".to_string(),
            ));
        }
        self.schedule()?;
        Ok(())
    }

    pub fn schedule(&self) -> Result<CycleSchedule, ScheduleError> {
        CycleSchedule::new(self.stepper.reset_period, self.stepper.sample_period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_prototype_scene() {
        let config = SceneConfig::default();
        assert_eq!(config.simulation.dt, 0.01);
        assert_eq!(config.ground.height, -0.795);
        assert_eq!(config.sphere.mass, 10.0);
        assert_eq!(config.sensor.position, [0.0, -0.25, 0.05]);
        assert_eq!(config.sensor.pad_half_extents, [0.4, 0.4, 0.05]);
        assert_eq!(config.stepper.reset_velocity, [0.0, 0.0, 0.0, 1.0, -2.0, 3.0]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn default_pad_lies_under_the_sphere() {
        let config = SceneConfig::default();
        let (pad, half) = (config.sensor.position, config.sensor.pad_half_extents);
        for axis in 0..2 {
            let drop = config.sphere.position[axis];
            assert!((drop - pad[axis]).abs() < half[axis], "axis {axis}");
        }
        assert!(config.sphere.position[2] - config.sphere.radius > pad[2] + half[2]);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = SceneConfig::from_toml_str(
            r#"
            [stepper]
            reset_period = 200

            [sphere]
            radius = 0.1
            "#,
        )
        .unwrap();
        assert_eq!(config.stepper.reset_period, 200);
        assert_eq!(config.stepper.sample_period, 5);
        assert_eq!(config.sphere.radius, 0.1);
        assert_eq!(config.sphere.mass, 10.0);
    }

    #[test]
    fn zero_period_is_invalid() {
        let err = SceneConfig::from_toml_str("[stepper]\nsample_period = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Schedule(_)));
    }

    #[test]
    fn negative_mass_is_invalid() {
        let err = SceneConfig::from_toml_str("[sphere]\nmass = -1.0\n").unwrap_err();
        assert!(err.to_string().contains("sphere.mass"));
    }
}

// src/sim/scene.rs
