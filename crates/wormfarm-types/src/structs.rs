//! Plain data structs shared by every layer of the simulation.

use serde::{Deserialize, Serialize};

/// A position in the arena plane.
///
/// The arena uses screen-style coordinates: `x` grows to the right and
/// `y` grows downward, so an azimuth of `PI / 2` points "down".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a point from its coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// The point reached by travelling `step` along `azimuth` (radians).
    pub fn advanced(self, step: f64, azimuth: f64) -> Self {
        Self {
            x: step.mul_add(azimuth.cos(), self.x),
            y: step.mul_add(azimuth.sin(), self.y),
        }
    }
}

/// The output of a brain for one tick.
///
/// When `turn` is set the worm only rotates this tick. Otherwise it
/// tries to move forward by `step`, which the body clamps to its own
/// maximum; a step of `f64::INFINITY` means "as far as the body allows".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Whether the worm turns instead of moving.
    pub turn: bool,
    /// Requested step length.
    pub step: f64,
}

impl Decision {
    /// A forward move of the given length.
    pub const fn forward(step: f64) -> Self {
        Self { turn: false, step }
    }

    /// A turn in place.
    pub const fn turn() -> Self {
        Self {
            turn: true,
            step: 0.0,
        }
    }
}

/// One record of the name pool.
///
/// First and last names of a worm are drawn independently, so a worm's
/// name pair usually comes from two different records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRecord {
    /// Given name.
    pub first_name: String,
    /// Family name, inherited by offspring.
    pub last_name: String,
}

impl NameRecord {
    /// Create a name record.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}
