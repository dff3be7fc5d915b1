//! Worms: the foraging agents.
//!
//! A worm lives for exactly one generation. Each tick it consults its
//! brain and either turns in place or tries to step forward; a step that
//! would leave the arena boundary is dropped while the heading is kept.
//! The number of apples eaten (the belly) is the worm's fitness.

use rand::Rng;
use serde::{Deserialize, Serialize};
use wormfarm_types::{Point, WormId};
use wormfarm_world::{Boundary, boundary};

use crate::apple::Apple;
use crate::body::Body;
use crate::brain::{Brain, Senses};

/// Number of draws a worm stays highlighted after eating.
pub const SCORE_FLASH_DRAWS: u8 = 10;

/// Footprint of a worm. Only used by presentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Width along the heading.
    pub width: f64,
    /// Height across the heading.
    pub height: f64,
}

impl Default for Size {
    fn default() -> Self {
        Self {
            width: 60.0,
            height: 20.0,
        }
    }
}

/// Names and lineage of a worm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Given name, drawn fresh for every worm.
    pub first_name: String,
    /// Family name, inherited from the parent.
    pub last_name: String,
    /// Number of breeding rounds between this worm and its founder.
    pub generation: u32,
    /// Generation index in which the founding ancestor was created.
    pub ancestor_generation: u32,
}

impl Identity {
    /// Display name, e.g. `"Ada Lovelace III"`. Founders carry no numeral.
    pub fn full_name(&self) -> String {
        let numeral = romanize(self.generation);
        if numeral.is_empty() {
            format!("{} {}", self.first_name, self.last_name)
        } else {
            format!("{} {} {numeral}", self.first_name, self.last_name)
        }
    }
}

/// What a worm did during one update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Movement {
    /// Heading changed, position kept.
    Turned,
    /// Moved to the candidate position.
    Moved,
    /// The candidate was outside the boundary; only the heading was set.
    Blocked,
}

/// A single foraging agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worm {
    /// Unique identifier.
    pub id: WormId,
    /// Current position.
    pub position: Point,
    /// Current heading in radians.
    pub azimuth: f64,
    /// Footprint.
    pub size: Size,
    /// Movement limits.
    pub body: Body,
    /// Decision policy.
    pub brain: Brain,
    /// Names and lineage.
    pub identity: Identity,
    /// Apples eaten this generation.
    pub belly: u32,
    score_flash: u8,
}

impl Worm {
    /// A worm with an empty belly.
    pub fn new(
        position: Point,
        azimuth: f64,
        size: Size,
        body: Body,
        brain: Brain,
        identity: Identity,
    ) -> Self {
        Self {
            id: WormId::new(),
            position,
            azimuth,
            size,
            body,
            brain,
            identity,
            belly: 0,
            score_flash: 0,
        }
    }

    /// Run one tick of behaviour.
    ///
    /// The brain is consulted first. A turn adds a sample from the body's
    /// turning interval to the heading; a forward decision is clamped to
    /// the body's maximum step and applied through [`Worm::move_to`].
    pub fn update(
        &mut self,
        apples: &[Apple],
        boundary: Option<&Boundary>,
        rng: &mut impl Rng,
    ) -> Movement {
        let senses = Senses {
            position: self.position,
            azimuth: self.azimuth,
            apples,
        };
        let decision = self.brain.think(&senses, rng);

        if decision.turn {
            self.azimuth += self.body.turn_offset(rng);
            return Movement::Turned;
        }

        let step = self.body.clamp_step(decision.step);
        if self.move_to(step, self.azimuth, boundary) {
            Movement::Moved
        } else {
            Movement::Blocked
        }
    }

    /// Try to move `step` along `azimuth`.
    ///
    /// The heading is always set to `azimuth`. The position changes only
    /// if the boundary accepts the candidate. Returns whether it moved.
    pub fn move_to(&mut self, step: f64, azimuth: f64, boundary: Option<&Boundary>) -> bool {
        self.azimuth = azimuth;
        let candidate = self.position.advanced(step, azimuth);
        if boundary::allows(boundary, candidate) {
            self.position = candidate;
            true
        } else {
            false
        }
    }

    /// Credit one eaten apple and start the score flash.
    pub const fn feed(&mut self) {
        self.belly = self.belly.saturating_add(1);
        self.score_flash = SCORE_FLASH_DRAWS;
    }

    /// Whether the worm ate recently enough to be highlighted.
    pub const fn just_scored(&self) -> bool {
        self.score_flash > 0
    }

    /// Count down one draw of the score flash. Returns whether the worm
    /// was still highlighted for this draw.
    pub const fn consume_score_flash(&mut self) -> bool {
        if self.score_flash == 0 {
            return false;
        }
        self.score_flash = self.score_flash.saturating_sub(1);
        true
    }

    /// Display name with generation numeral.
    pub fn full_name(&self) -> String {
        self.identity.full_name()
    }
}

const NUMERALS: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Roman numeral for `n`; empty for zero.
pub fn romanize(n: u32) -> String {
    let mut remaining = n;
    let mut out = String::new();
    for (value, symbol) in NUMERALS {
        while remaining >= value {
            out.push_str(symbol);
            remaining = remaining.saturating_sub(value);
        }
    }
    out
}
