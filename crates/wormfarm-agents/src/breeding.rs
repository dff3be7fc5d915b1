//! Fitness-proportional breeding.
//!
//! At the end of a generation every worm that ate at least one apple
//! becomes a candidate parent. Candidates are ranked by belly and each
//! one earns a number of parent slots proportional to its share of the
//! total food eaten, rounded up. The slot queue is then cut short so a
//! fraction of the next population is reserved for random immigrants.
//!
//! Offspring are asexual copies of one parent: same body, same brain,
//! same family name, a fresh first name, and a fresh spawn position.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;
use wormfarm_world::geometry;

use crate::error::AgentError;
use crate::names::pick_name;
use crate::spawner::{SpawnParams, create_founder};
use crate::worm::{Identity, Worm};

/// Population-level breeding parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreedingParams {
    /// Size of every generation.
    pub population_size: u32,
    /// Share of the population reserved for random founders, in `[0, 1]`.
    pub random_worm_fraction: f64,
    /// Mutation strength. Recorded with the run; offspring currently
    /// inherit body and brain unchanged.
    pub mutation_level: f64,
}

impl BreedingParams {
    /// Check the population size and fraction.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InvalidParameter`] for a zero population,
    /// a fraction outside `[0, 1]`, or a negative or non-finite mutation level.
    pub fn validate(&self) -> Result<(), AgentError> {
        if self.population_size == 0 {
            return Err(AgentError::InvalidParameter {
                reason: "population_size must be at least 1".to_owned(),
            });
        }
        if !(0.0..=1.0).contains(&self.random_worm_fraction) {
            return Err(AgentError::InvalidParameter {
                reason: format!(
                    "random_worm_fraction must be within [0, 1], got {}",
                    self.random_worm_fraction
                ),
            });
        }
        if !self.mutation_level.is_finite() || self.mutation_level < 0.0 {
            return Err(AgentError::InvalidParameter {
                reason: format!(
                    "mutation_level must be finite and non-negative, got {}",
                    self.mutation_level
                ),
            });
        }
        Ok(())
    }

    /// Number of parent slots kept after truncation: `floor(N * (1 - R))`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn offspring_capacity(&self) -> usize {
        let keep = 1.0 - self.random_worm_fraction.clamp(0.0, 1.0);
        // Non-negative and at most population_size; fits in usize.
        (f64::from(self.population_size) * keep).floor() as usize
    }
}

/// Result of one breeding round.
#[derive(Debug, Clone)]
pub struct BreedingOutcome {
    /// The new population, exactly `population_size` worms.
    pub worms: Vec<Worm>,
    /// How many of them descend from a parent.
    pub offspring: usize,
    /// How many are random founders.
    pub founders: usize,
}

/// Parent slots earned by a worm: `ceil(belly / total * n)`.
///
/// Computed in integers so equal shares never round differently.
/// Returns zero when `total` is zero.
pub fn parent_slots(belly: u32, total: u64, n: u32) -> u64 {
    if total == 0 {
        return 0;
    }
    u64::from(belly)
        .saturating_mul(u64::from(n))
        .div_ceil(total)
}

/// Build the truncated parent queue.
///
/// Worms with an empty belly are dropped; the rest are stably sorted by
/// belly, highest first, and repeated according to [`parent_slots`].
pub fn parent_queue<'a>(worms: &'a [Worm], params: &BreedingParams) -> Vec<&'a Worm> {
    let mut survivors: Vec<&Worm> = worms.iter().filter(|w| w.belly > 0).collect();
    survivors.sort_by(|a, b| b.belly.cmp(&a.belly));

    let total: u64 = survivors.iter().map(|w| u64::from(w.belly)).sum();
    let capacity = params.offspring_capacity();

    let mut queue = Vec::with_capacity(capacity);
    for worm in survivors {
        let slots = parent_slots(worm.belly, total, params.population_size);
        for _ in 0..slots {
            if queue.len() >= capacity {
                return queue;
            }
            queue.push(worm);
        }
    }
    queue
}

/// Create one offspring of `parent`.
///
/// Randomness is drawn in a fixed order: position, heading, first name.
///
/// # Errors
///
/// Fails if no spawn position can be sampled or the name pool is empty.
pub fn breed_offspring(
    parent: &Worm,
    spawn: &SpawnParams,
    rng: &mut impl Rng,
) -> Result<Worm, AgentError> {
    let position = spawn.arena.sample_point(rng)?;
    let azimuth = geometry::random_angle(rng);
    let first_name = pick_name(&spawn.names, rng)?.first_name.clone();

    // TODO: perturb inherited body and brain parameters by mutation_level.
    Ok(Worm::new(
        position,
        azimuth,
        parent.size,
        parent.body,
        parent.brain,
        Identity {
            first_name,
            last_name: parent.identity.last_name.clone(),
            generation: parent.identity.generation.saturating_add(1),
            ancestor_generation: parent.identity.ancestor_generation,
        },
    ))
}

/// Produce the next generation from an ended one.
///
/// Slot `i` holds an offspring of the `i`-th queued parent, or a random
/// founder (generation 0, ancestor generation `current_generation`) once
/// the queue is exhausted. When nobody ate, every slot is a founder.
///
/// # Errors
///
/// Propagates spawning failures.
pub fn breed_next_generation(
    worms: &[Worm],
    params: &BreedingParams,
    spawn: &SpawnParams,
    current_generation: u32,
    rng: &mut impl Rng,
) -> Result<BreedingOutcome, AgentError> {
    let queue = parent_queue(worms, params);
    let mut next = Vec::with_capacity(usize::try_from(params.population_size).unwrap_or(0));
    let mut slots = queue.iter();
    let mut founders = 0_usize;

    for _ in 0..params.population_size {
        let worm = match slots.next() {
            Some(parent) => breed_offspring(parent, spawn, rng)?,
            None => {
                founders = founders.saturating_add(1);
                create_founder(spawn, 0, current_generation, rng)?
            }
        };
        next.push(worm);
    }

    let offspring = next.len().saturating_sub(founders);
    info!(
        generation = current_generation,
        parents = queue.len(),
        offspring,
        founders,
        "Next generation bred"
    );

    Ok(BreedingOutcome {
        worms: next,
        offspring,
        founders,
    })
}
