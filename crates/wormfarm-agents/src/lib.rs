//! Worms, apples, decision policies, founder spawning, and breeding for
//! the Wormfarm simulation.
//!
//! This crate is the agent layer: everything that operates on a single
//! worm or apple, plus the breeding step that turns an ended generation
//! into the next one. It sits between `wormfarm-world` (geometry and
//! boundary policies) and `wormfarm-core` (the generation loop).
//!
//! # Modules
//!
//! - [`apple`] -- [`Apple`] food sources, scent, and batch creation.
//! - [`body`] -- [`Body`] movement limits and their sampling distributions.
//! - [`brain`] -- [`Brain`] decision policies and the [`BrainSpec`] used to build them.
//! - [`breeding`] -- Fitness-proportional parent selection and offspring creation.
//! - [`error`] -- Error types for agent creation ([`AgentError`]).
//! - [`names`] -- Built-in name pool and name picking.
//! - [`spawner`] -- Random founder creation ([`SpawnParams`]).
//! - [`worm`] -- [`Worm`] state, per-tick movement, and naming.

pub mod apple;
pub mod body;
pub mod brain;
pub mod breeding;
pub mod error;
pub mod names;
pub mod spawner;
pub mod worm;

pub use apple::{Apple, random_apples};
pub use body::{Body, BodyDistribution, NormalParams};
pub use brain::{Brain, BrainSpec, RandomWalk, Senses};
pub use breeding::{BreedingOutcome, BreedingParams, breed_next_generation};
pub use error::AgentError;
pub use names::default_names;
pub use spawner::{SpawnParams, create_founder, spawn_founders};
pub use worm::{Identity, Movement, SCORE_FLASH_DRAWS, Size, Worm};
