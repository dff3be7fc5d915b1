//! Generation driver.
//!
//! [`Simulation`] owns the seeded random source and the current
//! [`GenerationState`]. A run alternates two phases:
//!
//! - **Evaluation**: tick the generation until it ends, then collect
//!   [`GenerationStats`] and append them to the [`RunHistory`].
//! - **Breeding**: build the next population from the ended one, scatter
//!   a fresh batch of apples, and start the next generation.
//!
//! All randomness flows from one `ChaCha8Rng` seeded from the
//! configuration, so a run is reproducible from its config alone.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use wormfarm_agents::{
    AgentError, Apple, BreedingParams, SpawnParams, breed_next_generation, random_apples,
    spawn_founders,
};

use crate::config::{ConfigError, SimulationConfig};
use crate::generation::{GenerationError, GenerationRules, GenerationState, TickSummary};
use crate::stats::{AncestorCount, DEFAULT_TOP_N, GenerationStats, RunHistory, top_ancestors};

/// Errors that can occur while driving the simulation.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The configuration was rejected.
    #[error("config error: {source}")]
    Config {
        /// The underlying configuration error.
        #[from]
        source: ConfigError,
    },

    /// Creating worms or apples failed.
    #[error("agent error: {source}")]
    Agent {
        /// The underlying agent error.
        #[from]
        source: AgentError,
    },

    /// A tick could not run.
    #[error("generation error: {source}")]
    Generation {
        /// The underlying generation error.
        #[from]
        source: GenerationError,
    },

    /// Breeding was requested before the current generation ended.
    #[error("generation {generation} is still running")]
    GenerationInProgress {
        /// Index of the running generation.
        generation: u32,
    },
}

/// What breeding produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreedingReport {
    /// Index of the generation that was just created.
    pub generation: u32,
    /// Worms descending from a parent.
    pub offspring: usize,
    /// Random founders.
    pub founders: usize,
    /// Most common family names in the new population.
    pub top_ancestors: Vec<AncestorCount>,
}

/// Everything reported for one evaluated generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Evaluation statistics.
    pub stats: GenerationStats,
    /// Breeding that followed, absent for the last generation of a run.
    pub breeding: Option<BreedingReport>,
}

/// Result of [`Simulation::run`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// One report per evaluated generation.
    pub generations: Vec<GenerationReport>,
    /// Series across the whole run.
    pub history: RunHistory,
}

/// Hooks invoked while the simulation runs.
///
/// Presentation layers implement this to draw worms, count down score
/// flashes, or plot the history. Only `on_tick` is required.
pub trait GenerationCallback {
    /// Called after every tick. The state is mutable so a presentation
    /// layer can consume per-draw bookkeeping such as score flashes.
    fn on_tick(&mut self, summary: &TickSummary, state: &mut GenerationState);

    /// Called once a generation has ended and its statistics are known.
    fn on_generation_end(&mut self, _stats: &GenerationStats) {}

    /// Called after the next generation has been bred.
    fn on_breed(&mut self, _report: &BreedingReport) {}
}

/// A no-op callback.
pub struct NoOpCallback;

impl GenerationCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _state: &mut GenerationState) {}
}

/// The simulation driver.
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    spawn: SpawnParams,
    breeding: BreedingParams,
    rules: GenerationRules,
    rng: ChaCha8Rng,
    state: GenerationState,
    history: RunHistory,
}

impl Simulation {
    /// Validate `config`, seed the random source, and create generation 0.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Config`] for an invalid configuration and
    /// [`RunnerError::Agent`] if the initial population cannot be spawned.
    pub fn new(config: SimulationConfig) -> Result<Self, RunnerError> {
        config.validate()?;
        let spawn = config.spawn_params()?;
        let breeding = config.breeding_params()?;
        let rules = config.generation_rules();
        let mut rng = ChaCha8Rng::seed_from_u64(config.world.seed);

        let worms = spawn_founders(&spawn, breeding.population_size, 0, &mut rng)?;
        let apples = Self::scatter_apples(&config, &spawn, &mut rng)?;
        let state = GenerationState::new(0, worms, apples, rules);

        info!(
            seed = config.world.seed,
            scenario = ?config.world.scenario,
            population = breeding.population_size,
            apples = config.apples.count,
            max_ticks = rules.max_ticks,
            mutation_level = breeding.mutation_level,
            "Simulation initialized"
        );

        Ok(Self {
            config,
            spawn,
            breeding,
            rules,
            rng,
            state,
            history: RunHistory::default(),
        })
    }

    fn scatter_apples(
        config: &SimulationConfig,
        spawn: &SpawnParams,
        rng: &mut ChaCha8Rng,
    ) -> Result<Vec<Apple>, AgentError> {
        random_apples(
            config.apples.count,
            &spawn.arena,
            config.apples.min_intensity,
            config.apples.max_intensity,
            rng,
        )
    }

    /// The configuration the run was built from.
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The current generation.
    pub const fn state(&self) -> &GenerationState {
        &self.state
    }

    /// Mutable access to the current generation.
    pub const fn state_mut(&mut self) -> &mut GenerationState {
        &mut self.state
    }

    /// Per-generation series recorded so far.
    pub const fn history(&self) -> &RunHistory {
        &self.history
    }

    /// Run one tick of the current generation.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Generation`] if the generation already ended.
    pub fn tick(&mut self) -> Result<TickSummary, RunnerError> {
        let boundary = self.spawn.arena.boundary();
        Ok(self.state.step(boundary, &mut self.rng)?)
    }

    /// Tick the current generation until it ends and record its statistics.
    ///
    /// # Errors
    ///
    /// Propagates tick failures.
    pub fn run_generation(
        &mut self,
        callback: &mut dyn GenerationCallback,
    ) -> Result<GenerationStats, RunnerError> {
        while self.state.end_reason().is_none() {
            let summary = self.tick()?;
            callback.on_tick(&summary, &mut self.state);
        }

        let stats = GenerationStats::collect(&self.state, DEFAULT_TOP_N);
        self.history.record(&stats);
        info!(
            generation = stats.generation,
            ticks = stats.ticks,
            reason = ?stats.end_reason,
            apples_eaten = stats.apples_eaten,
            percent_eaten = stats.percent_eaten,
            food_per_worm = stats.food_per_worm,
            "Generation ended"
        );
        for (rank, worm) in stats.top_worms.iter().enumerate() {
            debug!(rank, name = %worm.full_name, belly = worm.belly, "Top worm");
        }
        callback.on_generation_end(&stats);
        Ok(stats)
    }

    /// Breed the ended generation and start the next one.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::GenerationInProgress`] if the current
    /// generation has not ended, or [`RunnerError::Agent`] if spawning fails.
    pub fn advance_generation(&mut self) -> Result<BreedingReport, RunnerError> {
        if self.state.end_reason().is_none() {
            return Err(RunnerError::GenerationInProgress {
                generation: self.state.index(),
            });
        }

        let current = self.state.index();
        let outcome = breed_next_generation(
            self.state.worms(),
            &self.breeding,
            &self.spawn,
            current,
            &mut self.rng,
        )?;
        let apples = Self::scatter_apples(&self.config, &self.spawn, &mut self.rng)?;

        let next = current.saturating_add(1);
        let report = BreedingReport {
            generation: next,
            offspring: outcome.offspring,
            founders: outcome.founders,
            top_ancestors: top_ancestors(&outcome.worms, DEFAULT_TOP_N),
        };
        self.state = GenerationState::new(next, outcome.worms, apples, self.rules);
        Ok(report)
    }

    /// Evaluate `generations` generations, breeding between them.
    ///
    /// # Errors
    ///
    /// Propagates the first evaluation or breeding failure.
    pub fn run(
        &mut self,
        generations: u32,
        callback: &mut dyn GenerationCallback,
    ) -> Result<RunResult, RunnerError> {
        let mut reports = Vec::new();
        for remaining in (0..generations).rev() {
            let stats = self.run_generation(callback)?;
            let breeding = if remaining > 0 {
                let report = self.advance_generation()?;
                callback.on_breed(&report);
                Some(report)
            } else {
                None
            };
            reports.push(GenerationReport { stats, breeding });
        }

        info!(
            generations = reports.len(),
            best_food_per_worm = ?self.history.best_food_per_worm(),
            "Run finished"
        );
        Ok(RunResult {
            generations: reports,
            history: self.history.clone(),
        })
    }
}
