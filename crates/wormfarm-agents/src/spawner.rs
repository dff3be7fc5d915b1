//! Random founder creation.
//!
//! Founders are worms with no parent: they start a new lineage, either
//! in the first generation or as immigrants filling the slots breeding
//! leaves open.

use rand::Rng;
use tracing::debug;
use wormfarm_types::NameRecord;
use wormfarm_world::{Arena, geometry};

use crate::body::{Body, BodyDistribution};
use crate::brain::BrainSpec;
use crate::error::AgentError;
use crate::names::pick_name;
use crate::worm::{Identity, Size, Worm};

/// Everything needed to create a worm from scratch.
#[derive(Debug, Clone)]
pub struct SpawnParams {
    /// Where worms may be placed.
    pub arena: Arena,
    /// Footprint given to every worm.
    pub worm_size: Size,
    /// Distributions founder bodies are sampled from.
    pub body: BodyDistribution,
    /// How founder brains are built.
    pub brain: BrainSpec,
    /// Name pool; must not be empty.
    pub names: Vec<NameRecord>,
}

impl SpawnParams {
    /// Check the sampling parameters and the name pool.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::EmptyNamePool`] or
    /// [`AgentError::InvalidParameter`].
    pub fn validate(&self) -> Result<(), AgentError> {
        if self.names.is_empty() {
            return Err(AgentError::EmptyNamePool);
        }
        self.body.validate()?;
        self.brain.validate()
    }
}

/// Create one random founder.
///
/// Randomness is drawn in a fixed order: position, heading, first name,
/// last name, body, brain.
///
/// # Errors
///
/// Fails if no spawn position can be sampled or the name pool is empty.
pub fn create_founder(
    params: &SpawnParams,
    generation: u32,
    ancestor_generation: u32,
    rng: &mut impl Rng,
) -> Result<Worm, AgentError> {
    let position = params.arena.sample_point(rng)?;
    let azimuth = geometry::random_angle(rng);
    let first_name = pick_name(&params.names, rng)?.first_name.clone();
    let last_name = pick_name(&params.names, rng)?.last_name.clone();
    let body = Body::sample(&params.body, rng);
    let brain = params.brain.build(rng);

    let worm = Worm::new(
        position,
        azimuth,
        params.worm_size,
        body,
        brain,
        Identity {
            first_name,
            last_name,
            generation,
            ancestor_generation,
        },
    );
    debug!(
        worm_id = %worm.id,
        name = %worm.full_name(),
        brain = worm.brain.label(),
        "Founder created"
    );
    Ok(worm)
}

/// Create `count` founders of generation 0.
///
/// # Errors
///
/// Propagates the first [`create_founder`] failure.
pub fn spawn_founders(
    params: &SpawnParams,
    count: u32,
    ancestor_generation: u32,
    rng: &mut impl Rng,
) -> Result<Vec<Worm>, AgentError> {
    (0..count)
        .map(|_| create_founder(params, 0, ancestor_generation, rng))
        .collect()
}
