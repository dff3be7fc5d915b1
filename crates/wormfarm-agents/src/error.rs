//! Error types for the `wormfarm-agents` crate.
//!
//! Agent logic itself is total; the failures here come from spawning
//! (the arena could not place a worm or apple) and from parameter sets
//! that would make sampling meaningless.

/// Errors that can occur while creating or breeding agents.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// Placing an agent in the arena failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: wormfarm_world::WorldError,
    },

    /// A worm needs a name but the name pool is empty.
    #[error("name pool is empty")]
    EmptyNamePool,

    /// A sampling parameter is out of its valid range.
    #[error("invalid parameter: {reason}")]
    InvalidParameter {
        /// Explanation of what is wrong.
        reason: String,
    },
}
