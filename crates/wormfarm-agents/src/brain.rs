//! Decision policies ("brains").
//!
//! A brain turns what a worm senses into a [`Decision`]: turn in place,
//! or step forward. The set of brains is closed; each variant carries its
//! own parameter struct. Brains never move the worm themselves -- the
//! worm applies the decision through its body.
//!
//! [`BrainSpec`] is the configuration-side counterpart: it describes how
//! to sample a brain for a new founder.

use rand::Rng;
use serde::{Deserialize, Serialize};
use wormfarm_types::{Decision, Point};
use wormfarm_world::geometry;

use crate::apple::Apple;
use crate::body::NormalParams;
use crate::error::AgentError;

/// Everything a worm can sense when its brain is consulted.
#[derive(Debug, Clone, Copy)]
pub struct Senses<'a> {
    /// The worm's own position.
    pub position: Point,
    /// The worm's heading in radians.
    pub azimuth: f64,
    /// All apples of the current generation, eaten ones included.
    pub apples: &'a [Apple],
}

/// Parameters of the random-walk brain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RandomWalk {
    /// Probability of turning on any given tick, in `[0, 1]`.
    pub turning_chance: f64,
}

/// A worm's decision policy.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum Brain {
    /// Never turns, always asks for a unit step.
    #[default]
    NoBrain,
    /// Turns with a fixed probability, otherwise moves as far as the body allows.
    RandomWalk(RandomWalk),
}

impl Brain {
    /// Decide what to do this tick.
    ///
    /// Only [`Brain::RandomWalk`] consumes randomness (one draw per call).
    /// Neither variant reads the apples yet.
    pub fn think(&self, _senses: &Senses<'_>, rng: &mut impl Rng) -> Decision {
        match self {
            Self::NoBrain => Decision::forward(1.0),
            Self::RandomWalk(params) => {
                if geometry::chance(rng, params.turning_chance) {
                    Decision::turn()
                } else {
                    Decision::forward(f64::INFINITY)
                }
            }
        }
    }

    /// Human-readable algorithm name.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NoBrain => "No Brain",
            Self::RandomWalk(_) => "Random Walk",
        }
    }
}

/// How to build the brain of a new founder.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum BrainSpec {
    /// Founders get [`Brain::NoBrain`].
    #[default]
    NoBrain,
    /// Founders get a random walk whose turning chance is sampled from a
    /// normal distribution and clamped to `[0, 1]`.
    RandomWalk {
        /// Distribution of the turning chance.
        turning_chance: NormalParams,
    },
}

impl BrainSpec {
    /// Sample a brain.
    pub fn build(&self, rng: &mut impl Rng) -> Brain {
        match self {
            Self::NoBrain => Brain::NoBrain,
            Self::RandomWalk { turning_chance } => Brain::RandomWalk(RandomWalk {
                turning_chance: turning_chance.sample(rng).clamp(0.0, 1.0),
            }),
        }
    }

    /// Check the distribution parameters.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InvalidParameter`] for non-finite or negative
    /// deviation parameters.
    pub fn validate(&self) -> Result<(), AgentError> {
        match self {
            Self::NoBrain => Ok(()),
            Self::RandomWalk { turning_chance } => turning_chance.validate("turning_chance"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn senses(apples: &[Apple]) -> Senses<'_> {
        Senses {
            position: Point::new(0.0, 0.0),
            azimuth: 0.0,
            apples,
        }
    }

    #[test]
    fn no_brain_steps_one_forward() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let d = Brain::NoBrain.think(&senses(&[]), &mut rng);
        assert!(!d.turn);
        assert!((d.step - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn random_walk_never_turns_at_zero_chance() {
        let brain = Brain::RandomWalk(RandomWalk {
            turning_chance: 0.0,
        });
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            let d = brain.think(&senses(&[]), &mut rng);
            assert!(!d.turn);
            assert!(d.step.is_infinite());
        }
    }

    #[test]
    fn random_walk_always_turns_at_full_chance() {
        let brain = Brain::RandomWalk(RandomWalk {
            turning_chance: 1.0,
        });
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..100 {
            assert!(brain.think(&senses(&[]), &mut rng).turn);
        }
    }

    #[test]
    fn random_walk_turn_rate_matches_chance() {
        let brain = Brain::RandomWalk(RandomWalk {
            turning_chance: 0.3,
        });
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let turns = (0..10_000)
            .filter(|_| brain.think(&senses(&[]), &mut rng).turn)
            .count();
        assert!((2_700..3_300).contains(&turns), "turned {turns} times");
    }

    #[test]
    fn built_turning_chance_is_clamped() {
        let brain_spec = BrainSpec::RandomWalk {
            turning_chance: NormalParams::fixed(1.7),
        };
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        assert_eq!(
            brain_spec.build(&mut rng),
            Brain::RandomWalk(RandomWalk {
                turning_chance: 1.0
            })
        );
    }

    #[test]
    fn brain_serde_uses_algorithm_tag() {
        let brain = Brain::RandomWalk(RandomWalk {
            turning_chance: 0.1,
        });
        let json = serde_json::to_string(&brain).unwrap();
        assert_eq!(json, r#"{"algorithm":"random_walk","turning_chance":0.1}"#);
        let back: Brain = serde_json::from_str(&json).unwrap();
        assert_eq!(back, brain);

        let none: Brain = serde_json::from_str(r#"{"algorithm":"no_brain"}"#).unwrap();
        assert_eq!(none, Brain::NoBrain);
    }
}
