//! Configuration, generation loop, foraging, statistics, and run driver
//! for the Wormfarm simulation.
//!
//! This crate ties the agent layer together into a runnable simulation:
//! it loads and validates the YAML configuration, steps a generation tick
//! by tick, applies the foraging rule, and breeds one generation into the
//! next.
//!
//! # Modules
//!
//! - [`config`] -- YAML configuration ([`SimulationConfig`]) and validation.
//! - [`forage`] -- The foraging rule and [`ForagingPolicy`].
//! - [`generation`] -- Per-generation tick loop ([`GenerationState`]).
//! - [`runner`] -- The seeded run driver ([`Simulation`]) and callbacks.
//! - [`stats`] -- Generation statistics and the [`RunHistory`].

pub mod config;
pub mod forage;
pub mod generation;
pub mod runner;
pub mod stats;

pub use config::{ConfigError, MUTATION_LEVELS, Scenario, SimulationConfig};
pub use forage::{ForagingPolicy, forage};
pub use generation::{
    GenerationEndReason, GenerationError, GenerationRules, GenerationState, TickSummary,
};
pub use runner::{
    BreedingReport, GenerationCallback, GenerationReport, NoOpCallback, RunResult, RunnerError,
    Simulation,
};
pub use stats::{AncestorCount, GenerationStats, RunHistory, WormStanding, top_ancestors, top_worms};
