//! The arena: spawn bounds plus an optional boundary policy.

use rand::Rng;
use serde::Serialize;
use tracing::warn;
use wormfarm_types::Point;

use crate::boundary::{self, Boundary, BoundingBox};
use crate::error::WorldError;
use crate::geometry;

/// Upper bound on rejection-sampling attempts for a single position.
///
/// Validation already guarantees the accepted region has positive area,
/// so this only trips for regions that are vanishingly small relative to
/// the spawn box.
pub const MAX_SPAWN_ATTEMPTS: u32 = 1_000_000;

/// Where things may spawn and where worms may move.
///
/// Constructed through [`Arena::new`], which rejects configurations whose
/// rejection sampling could never terminate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Arena {
    bounds: BoundingBox,
    boundary: Option<Boundary>,
}

impl Arena {
    /// Build a validated arena.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidBounds`] or [`WorldError::InvalidBoundary`]
    /// for degenerate shapes, and [`WorldError::DisjointRegion`] when the
    /// boundary and the spawn box share no area.
    pub fn new(bounds: BoundingBox, boundary: Option<Boundary>) -> Result<Self, WorldError> {
        bounds.validate()?;
        if let Some(b) = &boundary {
            b.validate()?;
            if !b.overlaps(&bounds) {
                return Err(WorldError::DisjointRegion);
            }
        }
        Ok(Self { bounds, boundary })
    }

    /// The spawn sampling box.
    pub const fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// The boundary policy, if any.
    pub const fn boundary(&self) -> Option<&Boundary> {
        self.boundary.as_ref()
    }

    /// Whether the boundary policy accepts `point`.
    pub fn allows(&self, point: Point) -> bool {
        boundary::allows(self.boundary.as_ref(), point)
    }

    /// Rejection-sample a position: uniform in the spawn box, accepted by
    /// the boundary policy.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::SpawnExhausted`] after [`MAX_SPAWN_ATTEMPTS`]
    /// rejected candidates.
    pub fn sample_point(&self, rng: &mut impl Rng) -> Result<Point, WorldError> {
        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let x = geometry::uniform_interval(rng, self.bounds.min_x, self.bounds.max_x);
            let y = geometry::uniform_interval(rng, self.bounds.min_y, self.bounds.max_y);
            let candidate = Point::new(x, y);
            if self.allows(candidate) {
                return Ok(candidate);
            }
        }
        warn!(
            attempts = MAX_SPAWN_ATTEMPTS,
            boundary = ?self.boundary,
            "Spawn rejection sampling exhausted"
        );
        Err(WorldError::SpawnExhausted {
            attempts: MAX_SPAWN_ATTEMPTS,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn disjoint_region_is_rejected() {
        let bounds = BoundingBox::new(0.0, 100.0, 0.0, 100.0);
        let boundary = Boundary::Circle {
            center_x: 500.0,
            center_y: 500.0,
            radius: 10.0,
        };
        assert!(matches!(
            Arena::new(bounds, Some(boundary)),
            Err(WorldError::DisjointRegion)
        ));
    }

    #[test]
    fn samples_satisfy_circle_policy() {
        let bounds = BoundingBox::padded(1000.0, 800.0, 50.0);
        let boundary = Boundary::Circle {
            center_x: 500.0,
            center_y: 500.0,
            radius: 333.0,
        };
        let arena = Arena::new(bounds, Some(boundary)).unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..500 {
            let p = arena.sample_point(&mut rng).unwrap();
            assert!(boundary.contains(p));
            assert!(bounds.contains(p));
        }
    }

    #[test]
    fn unbounded_arena_samples_inside_box() {
        let bounds = BoundingBox::new(-1.0, 1.0, -1.0, 1.0);
        let arena = Arena::new(bounds, None).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            let p = arena.sample_point(&mut rng).unwrap();
            assert!(bounds.contains(p));
        }
    }
}
