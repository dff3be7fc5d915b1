//! Error types for the `wormfarm-world` crate.

/// Errors that can occur while building or sampling an arena.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The spawn bounding box is empty, inverted, or not finite.
    #[error("invalid spawn bounds: {reason}")]
    InvalidBounds {
        /// Explanation of what is wrong with the bounds.
        reason: String,
    },

    /// The boundary policy describes an empty or non-finite region.
    #[error("invalid boundary: {reason}")]
    InvalidBoundary {
        /// Explanation of what is wrong with the boundary.
        reason: String,
    },

    /// The boundary region and the spawn box share no area, so rejection
    /// sampling could never accept a point.
    #[error("boundary region does not overlap the spawn bounds")]
    DisjointRegion,

    /// Rejection sampling gave up without finding an accepted point.
    #[error("no position accepted by the boundary after {attempts} attempts")]
    SpawnExhausted {
        /// Number of candidates that were sampled and rejected.
        attempts: u32,
    },
}
