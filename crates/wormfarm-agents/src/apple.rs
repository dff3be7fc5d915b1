//! Apples: the food worms forage for.
//!
//! An apple is created once per generation, can be eaten exactly once,
//! and is discarded with its generation. Its intensity is fixed at
//! creation and drives the scent it emits.

use rand::Rng;
use serde::{Deserialize, Serialize};
use wormfarm_types::{AppleId, Point};
use wormfarm_world::{Arena, geometry};

use crate::error::AgentError;

/// A single food source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Apple {
    id: AppleId,
    position: Point,
    intensity: f64,
    eaten: bool,
    eaten_tick: Option<u64>,
}

impl Apple {
    /// A fresh, uneaten apple.
    pub fn new(position: Point, intensity: f64) -> Self {
        Self {
            id: AppleId::new(),
            position,
            intensity,
            eaten: false,
            eaten_tick: None,
        }
    }

    /// Unique identifier.
    pub const fn id(&self) -> AppleId {
        self.id
    }

    /// Where the apple lies.
    pub const fn position(&self) -> Point {
        self.position
    }

    /// Scent magnitude, fixed at creation.
    pub const fn intensity(&self) -> f64 {
        self.intensity
    }

    /// Whether a worm has eaten this apple.
    pub const fn is_eaten(&self) -> bool {
        self.eaten
    }

    /// Tick at which the apple was eaten, if it was.
    pub const fn eaten_tick(&self) -> Option<u64> {
        self.eaten_tick
    }

    /// Mark the apple eaten at `tick`.
    ///
    /// Returns `true` if this call ate the apple. Later calls leave both
    /// the flag and the recorded tick untouched and return `false`.
    pub const fn mark_eaten(&mut self, tick: u64) -> bool {
        if self.eaten {
            return false;
        }
        self.eaten = true;
        self.eaten_tick = Some(tick);
        true
    }

    /// Scent sensed at `point`.
    ///
    /// Computed as `intensity / dx^2 + dy^2`. Only the horizontal offset
    /// divides the intensity; this is the sensing model stimulus-driven
    /// brains are calibrated against and must not be changed to a true
    /// inverse-square law. Eaten apples emit nothing.
    pub fn scent(&self, point: Point) -> f64 {
        if self.eaten {
            return 0.0;
        }
        let dx = self.position.x - point.x;
        let dy = self.position.y - point.y;
        self.intensity / dx.powi(2) + dy.powi(2)
    }
}

/// Scatter `count` apples across the arena.
///
/// For each apple the intensity is drawn uniformly from
/// `[min_intensity, max_intensity)` before its position is sampled.
///
/// # Errors
///
/// Returns [`AgentError::World`] if a position cannot be sampled.
pub fn random_apples(
    count: u32,
    arena: &Arena,
    min_intensity: f64,
    max_intensity: f64,
    rng: &mut impl Rng,
) -> Result<Vec<Apple>, AgentError> {
    (0..count)
        .map(|_| {
            let intensity = geometry::uniform_interval(rng, min_intensity, max_intensity);
            let position = arena.sample_point(rng)?;
            Ok(Apple::new(position, intensity))
        })
        .collect()
}
