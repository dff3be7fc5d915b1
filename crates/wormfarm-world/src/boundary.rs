//! Boundary policies: which positions the arena accepts.
//!
//! A policy is a pure predicate over points. It is consulted twice: when
//! a worm tries to move (rejected moves leave the worm where it is) and
//! when spawning worms and apples (rejected candidates are resampled).

use serde::{Deserialize, Serialize};
use wormfarm_types::Point;

use crate::error::WorldError;
use crate::geometry;

/// Axis-aligned box used as the sampling domain for spawn positions.
///
/// Spawn candidates are drawn uniformly from this box and then filtered
/// through the [`Boundary`]. In the game scenario the box is the canvas
/// shrunk by a padding, so new worms never appear hugging the wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Smallest accepted `x`.
    pub min_x: f64,
    /// Largest accepted `x`.
    pub max_x: f64,
    /// Smallest accepted `y`.
    pub min_y: f64,
    /// Largest accepted `y`.
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a bounding box from its extents.
    pub const fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// A `width` x `height` canvas shrunk by `padding` on every side.
    pub fn padded(width: f64, height: f64, padding: f64) -> Self {
        Self::new(padding, width - padding, padding, height - padding)
    }

    /// Check that the box is finite and has positive area.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidBounds`] otherwise.
    pub fn validate(&self) -> Result<(), WorldError> {
        let extents = [self.min_x, self.max_x, self.min_y, self.max_y];
        if extents.iter().any(|v| !v.is_finite()) {
            return Err(WorldError::InvalidBounds {
                reason: "extents must be finite".to_owned(),
            });
        }
        if self.min_x >= self.max_x || self.min_y >= self.max_y {
            return Err(WorldError::InvalidBounds {
                reason: format!(
                    "box [{}, {}] x [{}, {}] has no area",
                    self.min_x, self.max_x, self.min_y, self.max_y
                ),
            });
        }
        Ok(())
    }

    /// Whether `point` lies inside the closed box.
    pub fn contains(&self, point: Point) -> bool {
        geometry::inside_rectangle(self.min_x, self.max_x, self.min_y, self.max_y, point)
    }
}

/// Shape of the region worms are allowed to occupy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Boundary {
    /// Axis-aligned rectangle, edges included.
    Rectangle {
        /// Smallest accepted `x`.
        min_x: f64,
        /// Largest accepted `x`.
        max_x: f64,
        /// Smallest accepted `y`.
        min_y: f64,
        /// Largest accepted `y`.
        max_y: f64,
    },
    /// Disc around a center, rim included.
    Circle {
        /// Center `x`.
        center_x: f64,
        /// Center `y`.
        center_y: f64,
        /// Radius of the disc.
        radius: f64,
    },
}

impl Boundary {
    /// Whether `point` lies in the allowed region.
    pub fn contains(&self, point: Point) -> bool {
        match *self {
            Self::Rectangle {
                min_x,
                max_x,
                min_y,
                max_y,
            } => geometry::inside_rectangle(min_x, max_x, min_y, max_y, point),
            Self::Circle {
                center_x,
                center_y,
                radius,
            } => geometry::inside_circle(Point::new(center_x, center_y), radius, point),
        }
    }

    /// Check that the region is finite and has positive area.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidBoundary`] otherwise.
    pub fn validate(&self) -> Result<(), WorldError> {
        match *self {
            Self::Rectangle {
                min_x,
                max_x,
                min_y,
                max_y,
            } => {
                BoundingBox::new(min_x, max_x, min_y, max_y)
                    .validate()
                    .map_err(|source| WorldError::InvalidBoundary {
                        reason: source.to_string(),
                    })
            }
            Self::Circle {
                center_x,
                center_y,
                radius,
            } => {
                if !(center_x.is_finite() && center_y.is_finite() && radius.is_finite()) {
                    return Err(WorldError::InvalidBoundary {
                        reason: "circle parameters must be finite".to_owned(),
                    });
                }
                if radius <= 0.0 {
                    return Err(WorldError::InvalidBoundary {
                        reason: format!("circle radius must be positive, got {radius}"),
                    });
                }
                Ok(())
            }
        }
    }

    /// Whether the region shares a positive area with `bounds`.
    ///
    /// Rejection sampling over `bounds` terminates with probability one
    /// exactly when this holds.
    pub fn overlaps(&self, bounds: &BoundingBox) -> bool {
        match *self {
            Self::Rectangle {
                min_x,
                max_x,
                min_y,
                max_y,
            } => {
                let width = max_x.min(bounds.max_x) - min_x.max(bounds.min_x);
                let height = max_y.min(bounds.max_y) - min_y.max(bounds.min_y);
                width > 0.0 && height > 0.0
            }
            Self::Circle {
                center_x,
                center_y,
                radius,
            } => {
                // Nearest point of the box to the center; the disc overlaps
                // the box with positive area iff it is strictly inside.
                let nearest = Point::new(
                    center_x.clamp(bounds.min_x, bounds.max_x),
                    center_y.clamp(bounds.min_y, bounds.max_y),
                );
                nearest.distance_to(Point::new(center_x, center_y)) < radius
            }
        }
    }
}

/// Apply an optional boundary: an absent policy accepts every point.
pub fn allows(boundary: Option<&Boundary>, point: Point) -> bool {
    boundary.is_none_or(|b| b.contains(point))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> BoundingBox {
        BoundingBox::padded(800.0, 600.0, 50.0)
    }

    #[test]
    fn padded_box_extents() {
        let b = canvas();
        assert!((b.min_x - 50.0).abs() < f64::EPSILON);
        assert!((b.max_x - 750.0).abs() < f64::EPSILON);
        assert!((b.max_y - 550.0).abs() < f64::EPSILON);
        assert!(b.validate().is_ok());
    }

    #[test]
    fn inverted_box_is_rejected() {
        let b = BoundingBox::new(10.0, 0.0, 0.0, 10.0);
        assert!(matches!(b.validate(), Err(WorldError::InvalidBounds { .. })));
    }

    #[test]
    fn rectangle_contains_edges() {
        let r = Boundary::Rectangle {
            min_x: 0.0,
            max_x: 10.0,
            min_y: 0.0,
            max_y: 10.0,
        };
        assert!(r.contains(Point::new(0.0, 10.0)));
        assert!(!r.contains(Point::new(-0.5, 5.0)));
    }

    #[test]
    fn circle_contains() {
        let c = Boundary::Circle {
            center_x: 400.0,
            center_y: 400.0,
            radius: 100.0,
        };
        assert!(c.contains(Point::new(450.0, 450.0)));
        assert!(!c.contains(Point::new(490.0, 490.0)));
    }

    #[test]
    fn zero_radius_is_invalid() {
        let c = Boundary::Circle {
            center_x: 0.0,
            center_y: 0.0,
            radius: 0.0,
        };
        assert!(matches!(c.validate(), Err(WorldError::InvalidBoundary { .. })));
    }

    #[test]
    fn overlap_detection() {
        let inside = Boundary::Circle {
            center_x: 400.0,
            center_y: 400.0,
            radius: 266.0,
        };
        assert!(inside.overlaps(&canvas()));

        let far = Boundary::Circle {
            center_x: 5000.0,
            center_y: 5000.0,
            radius: 10.0,
        };
        assert!(!far.overlaps(&canvas()));

        let touching = Boundary::Rectangle {
            min_x: 750.0,
            max_x: 900.0,
            min_y: 0.0,
            max_y: 600.0,
        };
        assert!(!touching.overlaps(&canvas()));
    }

    #[test]
    fn absent_boundary_allows_everything() {
        assert!(allows(None, Point::new(-1e9, 1e9)));
    }

    #[test]
    fn boundary_serde_is_tagged() {
        let json = r#"{"shape":"circle","center_x":1.0,"center_y":2.0,"radius":3.0}"#;
        let parsed: Result<Boundary, _> = serde_json::from_str(json);
        assert!(matches!(parsed, Ok(Boundary::Circle { .. })));
    }
}
