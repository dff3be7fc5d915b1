//! Configuration loading and typed config structures for the Wormfarm simulation.
//!
//! The canonical configuration lives in `wormfarm-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror
//! the YAML structure, a loader, and [`SimulationConfig::validate`],
//! which rejects parameter sets the simulation cannot run with.
//!
//! Angular body parameters are written in degrees and converted to
//! radians when the spawn parameters are built.

use std::path::Path;

use serde::Deserialize;
use wormfarm_agents::{
    BodyDistribution, BrainSpec, BreedingParams, NormalParams, Size, SpawnParams, default_names,
};
use wormfarm_types::NameRecord;
use wormfarm_world::geometry::degrees_to_radians;
use wormfarm_world::{Arena, Boundary, BoundingBox};

use crate::forage::ForagingPolicy;
use crate::generation::GenerationRules;

/// Selectable mutation strengths, weakest first.
pub const MUTATION_LEVELS: [f64; 6] = [0.0, 1e-13, 1e-10, 1e-7, 1e-4, 1e-1];

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but describes an impossible simulation.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

fn invalid(reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        reason: reason.into(),
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `wormfarm-config.yaml`. Every section is
/// optional and falls back to the game scenario defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Arena dimensions, scenario, and seed.
    #[serde(default)]
    pub world: WorldConfig,

    /// Population and termination parameters.
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Apple batch parameters.
    #[serde(default)]
    pub apples: ApplesConfig,

    /// Founder body distributions.
    #[serde(default)]
    pub body: BodyConfig,

    /// Founder brain selector and parameters.
    #[serde(default = "default_brain")]
    pub brain: BrainSpec,

    /// Name pool; defaults to the built-in list.
    #[serde(default = "default_names")]
    pub names: Vec<NameRecord>,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            generation: GenerationConfig::default(),
            apples: ApplesConfig::default(),
            body: BodyConfig::default(),
            brain: default_brain(),
            names: default_names(),
            logging: LoggingConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// The title-screen scenario: a single random walker in a circular
    /// arena with a sparse, fainter batch of apples.
    pub fn start_screen() -> Self {
        Self {
            world: WorldConfig {
                scenario: Scenario::StartScreen,
                ..WorldConfig::default()
            },
            generation: GenerationConfig {
                population_size: 1,
                ..GenerationConfig::default()
            },
            apples: ApplesConfig {
                count: 50,
                min_intensity: 2e5,
                max_intensity: 8e5,
            },
            body: BodyConfig {
                max_step: NormalParams::fixed(3.0),
                turning_range_degrees: NormalParams::fixed(90.0),
                turning_bias_degrees: NormalParams::fixed(0.0),
            },
            brain: BrainSpec::RandomWalk {
                turning_chance: NormalParams::fixed(0.1),
            },
            ..Self::default()
        }
    }

    /// Check every parameter the run depends on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.generation;
        if g.max_ticks == 0 {
            return Err(invalid("generation.max_ticks must be at least 1"));
        }
        if g.eaten_all_countdown == 0 {
            return Err(invalid("generation.eaten_all_countdown must be at least 1"));
        }
        if !g.eat_distance.is_finite() || g.eat_distance < 0.0 {
            return Err(invalid(format!(
                "generation.eat_distance must be finite and non-negative, got {}",
                g.eat_distance
            )));
        }

        let a = &self.apples;
        if !a.min_intensity.is_finite() || !a.max_intensity.is_finite() {
            return Err(invalid("apples intensity bounds must be finite"));
        }
        if a.min_intensity > a.max_intensity {
            return Err(invalid(format!(
                "apples.min_intensity ({}) exceeds apples.max_intensity ({})",
                a.min_intensity, a.max_intensity
            )));
        }

        self.breeding_params()?;
        self.spawn_params()?;
        Ok(())
    }

    /// The mutation strength in effect: the explicit value if given,
    /// otherwise the entry of [`MUTATION_LEVELS`] at the configured index.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the index is out of range.
    pub fn mutation_level(&self) -> Result<f64, ConfigError> {
        if let Some(level) = self.generation.mutation_level {
            return Ok(level);
        }
        let index = self.generation.mutation_level_index;
        MUTATION_LEVELS.get(index).copied().ok_or_else(|| {
            invalid(format!(
                "generation.mutation_level_index {index} is out of range (0..{})",
                MUTATION_LEVELS.len()
            ))
        })
    }

    /// Build the validated arena for the configured scenario.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for degenerate or disjoint regions.
    pub fn arena(&self) -> Result<Arena, ConfigError> {
        let w = &self.world;
        let bounds = BoundingBox::padded(w.width, w.height, w.padding);
        Arena::new(bounds, Some(w.scenario.boundary(w.width, w.height)))
            .map_err(|e| invalid(e.to_string()))
    }

    /// Parameters for creating founders and offspring.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an invalid arena, an empty
    /// name pool, or unusable body or brain distributions.
    pub fn spawn_params(&self) -> Result<SpawnParams, ConfigError> {
        let params = SpawnParams {
            arena: self.arena()?,
            worm_size: self.world.scenario.worm_size(),
            body: self.body.to_distribution(),
            brain: self.brain,
            names: self.names.clone(),
        };
        params.validate().map_err(|e| invalid(e.to_string()))?;
        Ok(params)
    }

    /// Parameters for the breeding step.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero population, a random
    /// fraction outside `[0, 1]`, or an unknown mutation level.
    pub fn breeding_params(&self) -> Result<BreedingParams, ConfigError> {
        let params = BreedingParams {
            population_size: self.generation.population_size,
            random_worm_fraction: self.generation.random_worm_fraction,
            mutation_level: self.mutation_level()?,
        };
        params.validate().map_err(|e| invalid(e.to_string()))?;
        Ok(params)
    }

    /// Per-generation rules for the tick loop.
    pub const fn generation_rules(&self) -> GenerationRules {
        GenerationRules {
            max_ticks: self.generation.max_ticks,
            eat_distance: self.generation.eat_distance,
            eaten_all_countdown: self.generation.eaten_all_countdown,
            foraging: self.generation.foraging,
        }
    }
}

/// Arena layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Rectangle covering the whole arena; spawns stay inside the padding.
    #[default]
    Game,
    /// Circle below the arena center with a third of the width as radius.
    StartScreen,
}

impl Scenario {
    /// The boundary policy for an arena of the given size.
    pub fn boundary(self, width: f64, height: f64) -> Boundary {
        match self {
            Self::Game => Boundary::Rectangle {
                min_x: 0.0,
                max_x: width,
                min_y: 0.0,
                max_y: height,
            },
            Self::StartScreen => Boundary::Circle {
                center_x: width / 2.0,
                center_y: height / 2.0 + 100.0,
                radius: width / 3.0,
            },
        }
    }

    /// Worm footprint used by the scenario.
    pub const fn worm_size(self) -> Size {
        match self {
            Self::Game => Size {
                width: 60.0,
                height: 20.0,
            },
            Self::StartScreen => Size {
                width: 240.0,
                height: 80.0,
            },
        }
    }
}

/// Arena dimensions, scenario, and seed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorldConfig {
    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Arena width.
    #[serde(default = "default_width")]
    pub width: f64,

    /// Arena height.
    #[serde(default = "default_height")]
    pub height: f64,

    /// Margin between the arena edge and the spawn box.
    #[serde(default = "default_padding")]
    pub padding: f64,

    /// Arena layout.
    #[serde(default)]
    pub scenario: Scenario,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            width: default_width(),
            height: default_height(),
            padding: default_padding(),
            scenario: Scenario::default(),
        }
    }
}

/// Population and termination parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenerationConfig {
    /// Worms per generation.
    #[serde(default = "default_population_size")]
    pub population_size: u32,

    /// Tick limit per generation.
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,

    /// A worm closer than this to an apple eats it.
    #[serde(default = "default_eat_distance")]
    pub eat_distance: f64,

    /// Ticks a generation continues after every apple is eaten.
    #[serde(default = "default_eaten_all_countdown")]
    pub eaten_all_countdown: u32,

    /// Share of each new generation filled with random founders.
    #[serde(default = "default_random_worm_fraction")]
    pub random_worm_fraction: f64,

    /// Index into [`MUTATION_LEVELS`].
    #[serde(default)]
    pub mutation_level_index: usize,

    /// Explicit mutation strength; overrides the index when set.
    #[serde(default)]
    pub mutation_level: Option<f64>,

    /// How apples are credited when several worms are in range.
    #[serde(default)]
    pub foraging: ForagingPolicy,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            population_size: default_population_size(),
            max_ticks: default_max_ticks(),
            eat_distance: default_eat_distance(),
            eaten_all_countdown: default_eaten_all_countdown(),
            random_worm_fraction: default_random_worm_fraction(),
            mutation_level_index: 0,
            mutation_level: None,
            foraging: ForagingPolicy::default(),
        }
    }
}

/// Apple batch parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApplesConfig {
    /// Apples per generation.
    #[serde(default = "default_apple_count")]
    pub count: u32,

    /// Lower bound of the intensity range.
    #[serde(default = "default_min_intensity")]
    pub min_intensity: f64,

    /// Upper bound of the intensity range.
    #[serde(default = "default_max_intensity")]
    pub max_intensity: f64,
}

impl Default for ApplesConfig {
    fn default() -> Self {
        Self {
            count: default_apple_count(),
            min_intensity: default_min_intensity(),
            max_intensity: default_max_intensity(),
        }
    }
}

/// Founder body distributions. Angles are in degrees.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BodyConfig {
    /// Maximum step length.
    #[serde(default = "default_max_step")]
    pub max_step: NormalParams,

    /// Half-width of the turning interval.
    #[serde(default = "default_turning_range")]
    pub turning_range_degrees: NormalParams,

    /// Center of the turning interval.
    #[serde(default = "default_turning_bias")]
    pub turning_bias_degrees: NormalParams,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            max_step: default_max_step(),
            turning_range_degrees: default_turning_range(),
            turning_bias_degrees: default_turning_bias(),
        }
    }
}

impl BodyConfig {
    /// Convert to the radian-based distribution used for sampling.
    pub fn to_distribution(&self) -> BodyDistribution {
        let radians = |p: NormalParams| {
            NormalParams::new(degrees_to_radians(p.mean), degrees_to_radians(p.std_dev))
        };
        BodyDistribution {
            max_step: self.max_step,
            turning_range: radians(self.turning_range_degrees),
            turning_bias: radians(self.turning_bias_degrees),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions for serde
// ---------------------------------------------------------------------------

const fn default_seed() -> u64 {
    42
}

const fn default_width() -> f64 {
    1200.0
}

const fn default_height() -> f64 {
    800.0
}

const fn default_padding() -> f64 {
    50.0
}

const fn default_population_size() -> u32 {
    50
}

const fn default_max_ticks() -> u64 {
    2000
}

const fn default_eat_distance() -> f64 {
    20.0
}

const fn default_eaten_all_countdown() -> u32 {
    50
}

const fn default_random_worm_fraction() -> f64 {
    0.1
}

const fn default_apple_count() -> u32 {
    100
}

const fn default_min_intensity() -> f64 {
    5e5
}

const fn default_max_intensity() -> f64 {
    1e6
}

const fn default_max_step() -> NormalParams {
    NormalParams::new(5.0, 1.0)
}

const fn default_turning_range() -> NormalParams {
    NormalParams::new(45.0, 10.0)
}

const fn default_turning_bias() -> NormalParams {
    NormalParams::new(0.0, 5.0)
}

const fn default_brain() -> BrainSpec {
    BrainSpec::RandomWalk {
        turning_chance: NormalParams::new(0.1, 0.05),
    }
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SimulationConfig::default();
        assert_eq!(config.world.seed, 42);
        assert_eq!(config.generation.population_size, 50);
        assert_eq!(config.generation.eaten_all_countdown, 50);
        assert_eq!(config.world.scenario, Scenario::Game);
        assert_eq!(config.generation.foraging, ForagingPolicy::AllInRange);
        config.validate().unwrap();
    }

    #[test]
    fn start_screen_preset_is_valid() {
        let config = SimulationConfig::start_screen();
        config.validate().unwrap();
        assert_eq!(config.generation.population_size, 1);
        assert_eq!(config.apples.count, 50);
        let arena = config.arena().unwrap();
        assert!(matches!(
            arena.boundary(),
            Some(Boundary::Circle { center_x, center_y, radius })
                if (*center_x - 600.0).abs() < 1e-9
                    && (*center_y - 500.0).abs() < 1e-9
                    && (*radius - 400.0).abs() < 1e-9
        ));
    }

    #[test]
    fn parse_partial_yaml() {
        let yaml = r"
world:
  seed: 7
  scenario: start_screen
generation:
  population_size: 12
  random_worm_fraction: 0.25
  mutation_level_index: 3
  foraging: first_match
apples:
  count: 30
body:
  max_step: { mean: 4.0, std_dev: 0.5 }
  turning_range_degrees: { mean: 90.0 }
brain:
  algorithm: random_walk
  turning_chance: { mean: 0.2, std_dev: 0.1 }
names:
  - { first_name: Ada, last_name: Lovelace }
logging:
  level: debug
";
        let config = SimulationConfig::parse(yaml).unwrap();
        assert_eq!(config.world.seed, 7);
        assert_eq!(config.world.scenario, Scenario::StartScreen);
        assert!((config.world.width - 1200.0).abs() < f64::EPSILON);
        assert_eq!(config.generation.population_size, 12);
        assert_eq!(config.generation.max_ticks, 2000);
        assert_eq!(config.generation.foraging, ForagingPolicy::FirstMatch);
        assert_eq!(config.apples.count, 30);
        assert!((config.apples.min_intensity - 5e5).abs() < f64::EPSILON);
        assert_eq!(config.names.len(), 1);
        assert_eq!(config.logging.level, "debug");
        assert!((config.mutation_level().unwrap() - 1e-7).abs() < f64::EPSILON);

        let dist = config.body.to_distribution();
        assert!((dist.turning_range.mean - FRAC_PI_2).abs() < 1e-12);
        assert!(dist.turning_range.std_dev.abs() < f64::EPSILON);
        config.validate().unwrap();
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let config =
            SimulationConfig::parse(include_str!("../../../wormfarm-config.yaml")).unwrap();
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn empty_yaml_gives_defaults() {
        let config = SimulationConfig::parse("{}").unwrap();
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn explicit_mutation_level_wins() {
        let mut config = SimulationConfig::default();
        config.generation.mutation_level_index = 99;
        assert!(config.mutation_level().is_err());
        config.generation.mutation_level = Some(0.5);
        assert!((config.mutation_level().unwrap() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_invalid_parameters() {
        let cases: [fn(&mut SimulationConfig); 8] = [
            |c| c.generation.population_size = 0,
            |c| c.generation.random_worm_fraction = 1.5,
            |c| c.generation.max_ticks = 0,
            |c| c.generation.eaten_all_countdown = 0,
            |c| {
                c.apples.min_intensity = 2.0;
                c.apples.max_intensity = 1.0;
            },
            |c| c.names.clear(),
            |c| c.world.padding = 700.0,
            |c| c.body.max_step = NormalParams::new(f64::NAN, 0.0),
        ];
        for mutate in cases {
            let mut config = SimulationConfig::default();
            mutate(&mut config);
            assert!(matches!(
                config.validate(),
                Err(ConfigError::Invalid { .. })
            ));
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = SimulationConfig::from_file(Path::new("/nonexistent/wormfarm.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn malformed_yaml_is_yaml_error() {
        let result = SimulationConfig::parse("generation: [1, 2");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }
}
