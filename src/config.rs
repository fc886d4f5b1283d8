//! Tunable constants for the layout strategies and engine
//!
//! Every struct implements `Default` with the reference constants, and every
//! field is `#[serde(default)]` so partial config files only override what
//! they name.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::strategy::StrategyKind;

/// Configuration for the force-directed simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceConfig {
    /// Fixed number of simulation passes
    pub iterations: usize,
    /// Coulomb constant for pairwise repulsion
    pub repulsion_strength: f64,
    /// Spring constant for edge attraction (scaled by edge strength)
    pub attraction_strength: f64,
    /// Velocity multiplier applied after each integration step
    pub damping: f64,
    /// Initial positions are drawn from `[-extent, extent]` per axis
    pub initial_extent: f64,
    /// Start nodes from their previous positions when available.
    ///
    /// Only `recompute` warm starts; `reset` always re-randomizes every node.
    pub warm_start: bool,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            repulsion_strength: 50.0,
            attraction_strength: 0.01,
            damping: 0.9,
            initial_extent: 10.0,
            warm_start: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereConfig {
    pub radius: f64,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self { radius: 10.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelixConfig {
    pub radius: f64,
    /// Total vertical span, centered on the origin
    pub height: f64,
    pub turns: f64,
}

impl Default for HelixConfig {
    fn default() -> Self {
        Self {
            radius: 8.0,
            height: 20.0,
            turns: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Distance between neighbouring grid cells
    pub spacing: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { spacing: 3.0 }
    }
}

/// Camera framing limits used when fitting a snapshot into view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FramingConfig {
    /// Vertical field of view in radians
    pub fov: f64,
    pub min_distance: f64,
    pub max_distance: f64,
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            fov: std::f64::consts::FRAC_PI_4,
            min_distance: 5.0,
            max_distance: 50.0,
        }
    }
}

/// A configuration value the strategies cannot work with
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("{field} must be in {range}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        range: &'static str,
    },

    #[error("framing.min_distance ({min}) exceeds framing.max_distance ({max})")]
    DistanceBounds { min: f64, max: f64 },
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Strategy the engine starts with
    pub strategy: StrategyKind,
    pub force: ForceConfig,
    pub sphere: SphereConfig,
    pub helix: HelixConfig,
    pub grid: GridConfig,
    pub framing: FramingConfig,
    /// Seed for the engine's random source; `None` seeds from entropy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl LayoutConfig {
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.force.iterations = iterations;
        self
    }

    /// Reject values that would make a strategy panic or emit non-finite
    /// positions. Reports the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let force = &self.force;
        finite("force.repulsion_strength", force.repulsion_strength)?;
        finite("force.attraction_strength", force.attraction_strength)?;
        finite("force.initial_extent", force.initial_extent)?;
        if !(0.0..=1.0).contains(&force.damping) {
            return Err(ConfigError::OutOfRange {
                field: "force.damping",
                value: force.damping,
                range: "[0, 1]",
            });
        }

        finite("sphere.radius", self.sphere.radius)?;
        finite("helix.radius", self.helix.radius)?;
        finite("helix.height", self.helix.height)?;
        finite("helix.turns", self.helix.turns)?;
        finite("grid.spacing", self.grid.spacing)?;

        let framing = &self.framing;
        if !(framing.fov > 0.0 && framing.fov < std::f64::consts::PI) {
            return Err(ConfigError::OutOfRange {
                field: "framing.fov",
                value: framing.fov,
                range: "(0, pi)",
            });
        }
        finite("framing.min_distance", framing.min_distance)?;
        finite("framing.max_distance", framing.max_distance)?;
        if framing.min_distance > framing.max_distance {
            return Err(ConfigError::DistanceBounds {
                min: framing.min_distance,
                max: framing.max_distance,
            });
        }

        Ok(())
    }
}
