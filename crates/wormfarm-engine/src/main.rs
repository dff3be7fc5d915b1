//! Headless driver for the Wormfarm simulation.
//!
//! Loads the configuration, runs a fixed number of generations, and logs
//! the statistics of each one. Rendering is out of scope; a JSON report
//! of the whole run can be written to stdout instead.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `wormfarm-config.yaml` (or `WORMFARM_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Validate the configuration and spawn generation 0
//! 4. Run `WORMFARM_GENERATIONS` generations (default 10)
//! 5. Log the result, and print a JSON report if `WORMFARM_REPORT=json`
//!
//! `RUST_LOG` overrides the configured log level.

mod error;
mod progress_callback;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wormfarm_core::{RunResult, Simulation, SimulationConfig};

use crate::error::EngineError;
use crate::progress_callback::{ProgressCallback, format_elapsed};

const DEFAULT_CONFIG_PATH: &str = "wormfarm-config.yaml";
const DEFAULT_GENERATIONS: u32 = 10;

/// Report written to stdout in JSON mode.
#[derive(Debug, Serialize)]
struct RunReport {
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
    elapsed: String,
    seed: u64,
    #[serde(flatten)]
    result: RunResult,
}

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration loading, validation, or the
/// simulation itself fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config = load_config()?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("wormfarm-engine starting");
    info!(
        seed = config.world.seed,
        scenario = ?config.world.scenario,
        population = config.generation.population_size,
        apples = config.apples.count,
        "Configuration loaded"
    );

    let generations = generations_from_env()?;
    let json_report = std::env::var("WORMFARM_REPORT").is_ok_and(|v| v == "json");
    let seed = config.world.seed;

    // 3. Spawn generation 0.
    let mut simulation = Simulation::new(config).map_err(EngineError::from)?;

    // 4. Run.
    let started_at = Utc::now();
    let mut callback = ProgressCallback::new(started_at);
    let result = simulation
        .run(generations, &mut callback)
        .map_err(EngineError::from)?;
    let finished_at = Utc::now();
    let elapsed = format_elapsed(finished_at.signed_duration_since(started_at));

    // 5. Report.
    info!(
        generations = result.generations.len(),
        elapsed = %elapsed,
        best_food_per_worm = ?result.history.best_food_per_worm(),
        "wormfarm-engine finished"
    );

    if json_report {
        let report = RunReport {
            started_at,
            finished_at,
            elapsed,
            seed,
            result,
        };
        let json = serde_json::to_string_pretty(&report).map_err(EngineError::from)?;
        println!("{json}");
    }

    Ok(())
}

/// Load the simulation configuration.
///
/// Reads `WORMFARM_CONFIG` if set, otherwise `wormfarm-config.yaml`
/// relative to the working directory. A missing default file means
/// defaults; a missing explicit file is an error.
fn load_config() -> Result<SimulationConfig, EngineError> {
    if let Ok(path) = std::env::var("WORMFARM_CONFIG") {
        return Ok(SimulationConfig::from_file(&PathBuf::from(path))?);
    }
    let config_path = PathBuf::from(DEFAULT_CONFIG_PATH);
    if config_path.exists() {
        Ok(SimulationConfig::from_file(&config_path)?)
    } else {
        Ok(SimulationConfig::default())
    }
}

/// Number of generations to run, from `WORMFARM_GENERATIONS`.
fn generations_from_env() -> Result<u32, EngineError> {
    std::env::var("WORMFARM_GENERATIONS")
        .ok()
        .map_or(Ok(DEFAULT_GENERATIONS), |value| {
            parse_generations("WORMFARM_GENERATIONS", value)
        })
}

/// Parse a generation count, keeping the rejected text in the error.
fn parse_generations(name: &'static str, value: String) -> Result<u32, EngineError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|source| EngineError::InvalidEnv {
            name,
            value,
            source,
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn parses_generation_count() {
        let parsed = parse_generations("WORMFARM_GENERATIONS", " 25 ".to_owned()).unwrap();
        assert_eq!(parsed, 25);
    }

    #[test]
    fn bad_generation_count_keeps_parse_error() {
        let err = parse_generations("WORMFARM_GENERATIONS", "ten".to_owned()).unwrap_err();
        assert!(matches!(
            &err,
            EngineError::InvalidEnv { name: "WORMFARM_GENERATIONS", value, .. } if value == "ten"
        ));
        assert!(err.source().is_some());
    }
}
