//! Worm bodies: movement limits fixed at birth.
//!
//! A body caps how far a worm can move in one tick and defines the
//! interval its heading changes by when it turns. The interval is
//! `[bias - range, bias + range]`, so a non-zero turning bias makes a
//! worm favour one direction.

use std::f64::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};
use wormfarm_world::geometry;

use crate::error::AgentError;

/// Mean and standard deviation of a normally distributed parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalParams {
    /// Distribution mean.
    pub mean: f64,
    /// Standard deviation; zero makes every sample equal to the mean.
    #[serde(default)]
    pub std_dev: f64,
}

impl NormalParams {
    /// A distribution with the given mean and standard deviation.
    pub const fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }

    /// A degenerate distribution that always yields `value`.
    pub const fn fixed(value: f64) -> Self {
        Self::new(value, 0.0)
    }

    /// Draw one sample.
    pub fn sample(&self, rng: &mut impl Rng) -> f64 {
        geometry::normal(rng, self.mean, self.std_dev)
    }

    /// Check that both parameters are finite and the deviation is not negative.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InvalidParameter`] naming `what` otherwise.
    pub fn validate(&self, what: &str) -> Result<(), AgentError> {
        if !self.mean.is_finite() || !self.std_dev.is_finite() {
            return Err(AgentError::InvalidParameter {
                reason: format!("{what}: mean and std_dev must be finite"),
            });
        }
        if self.std_dev < 0.0 {
            return Err(AgentError::InvalidParameter {
                reason: format!("{what}: std_dev must not be negative, got {}", self.std_dev),
            });
        }
        Ok(())
    }
}

/// Distributions founder bodies are sampled from. Angles are in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyDistribution {
    /// Maximum step length per tick.
    pub max_step: NormalParams,
    /// Half-width of the turning interval, clamped to `[0, 2*PI]`.
    pub turning_range: NormalParams,
    /// Center of the turning interval.
    pub turning_bias: NormalParams,
}

impl BodyDistribution {
    /// Validate all three distributions.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InvalidParameter`] for the first invalid one.
    pub fn validate(&self) -> Result<(), AgentError> {
        self.max_step.validate("max_step")?;
        self.turning_range.validate("turning_range")?;
        self.turning_bias.validate("turning_bias")
    }
}

/// Movement limits of a single worm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Longest forward step the worm can take in one tick.
    pub max_step: f64,
    /// Lower end of the turning interval (radians).
    pub min_turn: f64,
    /// Upper end of the turning interval (radians).
    pub max_turn: f64,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            max_step: 1.0,
            min_turn: 0.0,
            max_turn: 0.0,
        }
    }
}

impl Body {
    /// A body with explicit limits.
    pub const fn new(max_step: f64, min_turn: f64, max_turn: f64) -> Self {
        Self {
            max_step,
            min_turn,
            max_turn,
        }
    }

    /// Sample a body: step, then range, then bias.
    pub fn sample(dist: &BodyDistribution, rng: &mut impl Rng) -> Self {
        let max_step = dist.max_step.sample(rng);
        let turning_range = dist.turning_range.sample(rng).clamp(0.0, TAU);
        let turning_bias = dist.turning_bias.sample(rng);
        Self {
            max_step,
            min_turn: turning_bias - turning_range,
            max_turn: turning_bias + turning_range,
        }
    }

    /// Clamp a requested step to this body's maximum.
    pub fn clamp_step(&self, requested: f64) -> f64 {
        if requested < self.max_step {
            requested
        } else {
            self.max_step
        }
    }

    /// Sample a heading change from the turning interval.
    pub fn turn_offset(&self, rng: &mut impl Rng) -> f64 {
        geometry::uniform_interval(rng, self.min_turn, self.max_turn)
    }
}
