//! Simulation constants and their validation.
//!
//! Every tunable number of the model lives in [`ModelConfig`]. The defaults
//! reproduce the stock simulation; a host may load overrides from JSON.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use thiserror::Error;
use units::{Amount, AmountRate, Volume, VolumeRate};

use crate::bounds::Bounds;

/// Errors produced while loading or validating a [`ModelConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(
        "invalid range for {name}: expected 0 <= min ({min}) <= default ({default}) <= max ({max})"
    )]
    InvalidRange {
        name: &'static str,
        min: f64,
        default: f64,
        max: f64,
    },

    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("shaker drag bounds are empty")]
    EmptyDragBounds,
}

/// A closed interval with a default value inside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange<T> {
    pub min: T,
    pub max: T,
    pub default: T,
}

impl<T: Copy + PartialOrd> ValueRange<T> {
    pub fn new(min: T, max: T, default: T) -> Self {
        Self { min, max, default }
    }

    /// Nearest value inside `[min, max]`.
    pub fn clamp(&self, value: T) -> T {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Beaker placement: `position` is the bottom-center of the beaker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeakerConfig {
    pub position: [f64; 2],
    pub width: f64,
    pub height: f64,
    pub volume: Volume,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaucetConfig {
    /// Center of the spout outlet
    pub position: [f64; 2],
    /// x coordinate where the pipe starts (off-screen)
    pub pipe_min_x: f64,
    pub spout_width: f64,
    pub max_flow_rate: VolumeRate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropperConfig {
    /// Tip of the dropper
    pub position: [f64; 2],
    pub stream_width: f64,
    pub max_flow_rate: VolumeRate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaporatorConfig {
    pub max_evaporation_rate: VolumeRate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShakerConfig {
    pub position: [f64; 2],
    /// Emission direction in radians
    pub orientation: f64,
    pub max_dispensing_rate: AmountRate,
    pub drag_bounds: Bounds,
}

/// Ballistic constants for particles leaving the shaker. These were tuned
/// against the two-state dispensing model; change them together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShakerParticleConfig {
    pub initial_speed: f64,
    pub gravitational_acceleration: f64,
    pub max_x_offset: f64,
    pub max_y_offset: f64,
}

/// Complete model configuration.
///
/// # Examples
///
/// ```
/// use concentration::config::ModelConfig;
///
/// let config = ModelConfig::from_json(r#"{ "seed": 7 }"#).unwrap();
/// assert_eq!(config.seed, 7);
/// assert_eq!(config.solution_volume, ModelConfig::default().solution_volume);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModelConfig {
    pub solution_volume: ValueRange<Volume>,
    pub solute_amount: ValueRange<Amount>,
    pub beaker: BeakerConfig,
    pub solvent_faucet: FaucetConfig,
    pub drain_faucet: FaucetConfig,
    pub dropper: DropperConfig,
    pub evaporator: EvaporatorConfig,
    pub shaker: ShakerConfig,
    pub shaker_particles: ShakerParticleConfig,
    pub meter_position: [f64; 2],
    /// Seed for particle placement
    pub seed: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            solution_volume: ValueRange::new(
                Volume::zero(),
                Volume::from_liters(1.0),
                Volume::from_liters(0.5),
            ),
            solute_amount: ValueRange::new(Amount::zero(), Amount::from_moles(5.0), Amount::zero()),
            beaker: BeakerConfig {
                position: [350.0, 550.0],
                width: 600.0,
                height: 300.0,
                volume: Volume::from_liters(1.0),
            },
            solvent_faucet: FaucetConfig {
                position: [155.0, 220.0],
                pipe_min_x: -400.0,
                spout_width: 45.0,
                max_flow_rate: VolumeRate::from_liters_per_second(0.25),
            },
            drain_faucet: FaucetConfig {
                position: [750.0, 630.0],
                pipe_min_x: 1000.0,
                spout_width: 45.0,
                max_flow_rate: VolumeRate::from_liters_per_second(0.25),
            },
            dropper: DropperConfig {
                position: [410.0, 225.0],
                stream_width: 15.0,
                max_flow_rate: VolumeRate::from_liters_per_second(0.05),
            },
            evaporator: EvaporatorConfig {
                max_evaporation_rate: VolumeRate::from_liters_per_second(0.25),
            },
            shaker: ShakerConfig {
                position: [340.0, 170.0],
                orientation: 0.75 * PI,
                max_dispensing_rate: AmountRate::from_moles_per_second(0.2),
                drag_bounds: Bounds::new(250.0, 20.0, 575.0, 170.0),
            },
            shaker_particles: ShakerParticleConfig {
                initial_speed: 100.0,
                gravitational_acceleration: 150.0,
                max_x_offset: 20.0,
                max_y_offset: 5.0,
            },
            meter_position: [785.0, 210.0],
            seed: 42,
        }
    }
}

impl ModelConfig {
    /// Parse a configuration from JSON. Missing top-level fields fall back to
    /// [`ModelConfig::default`]. The result is validated before it is returned.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ModelConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let volume = &self.solution_volume;
        check_range(
            "solutionVolume",
            volume.min.to_liters(),
            volume.default.to_liters(),
            volume.max.to_liters(),
        )?;

        let amount = &self.solute_amount;
        check_range(
            "soluteAmount",
            amount.min.to_moles(),
            amount.default.to_moles(),
            amount.max.to_moles(),
        )?;

        check_positive("beaker.width", self.beaker.width)?;
        check_positive("beaker.height", self.beaker.height)?;
        check_positive("beaker.volume", self.beaker.volume.to_liters())?;

        check_non_negative(
            "solventFaucet.maxFlowRate",
            self.solvent_faucet.max_flow_rate.to_liters_per_second(),
        )?;
        check_non_negative("solventFaucet.spoutWidth", self.solvent_faucet.spout_width)?;
        check_non_negative(
            "drainFaucet.maxFlowRate",
            self.drain_faucet.max_flow_rate.to_liters_per_second(),
        )?;
        check_non_negative("drainFaucet.spoutWidth", self.drain_faucet.spout_width)?;
        check_non_negative(
            "dropper.maxFlowRate",
            self.dropper.max_flow_rate.to_liters_per_second(),
        )?;
        check_non_negative("dropper.streamWidth", self.dropper.stream_width)?;
        check_non_negative(
            "evaporator.maxEvaporationRate",
            self.evaporator.max_evaporation_rate.to_liters_per_second(),
        )?;
        check_non_negative(
            "shaker.maxDispensingRate",
            self.shaker.max_dispensing_rate.to_moles_per_second(),
        )?;

        if self.shaker.drag_bounds.is_empty() {
            return Err(ConfigError::EmptyDragBounds);
        }

        let particles = &self.shaker_particles;
        check_non_negative("shakerParticles.initialSpeed", particles.initial_speed)?;
        check_non_negative(
            "shakerParticles.gravitationalAcceleration",
            particles.gravitational_acceleration,
        )?;
        check_non_negative("shakerParticles.maxXOffset", particles.max_x_offset)?;
        check_non_negative("shakerParticles.maxYOffset", particles.max_y_offset)?;

        Ok(())
    }
}

fn check_range(name: &'static str, min: f64, default: f64, max: f64) -> Result<(), ConfigError> {
    if min >= 0.0 && min <= default && default <= max {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange {
            name,
            min,
            default,
            max,
        })
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn check_non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}
