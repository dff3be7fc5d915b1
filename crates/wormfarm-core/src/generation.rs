//! One generation of the simulation: the tick loop state.
//!
//! A [`GenerationState`] owns the worms and apples of a single
//! generation. Each call to [`GenerationState::step`] runs one tick:
//!
//! 1. Every worm updates (brain, then body) in population order.
//! 2. The foraging rule is applied.
//! 3. If every apple is eaten, the eaten-all countdown drops by one.
//! 4. The tick counter advances.
//!
//! The generation ends when the tick counter reaches the limit or the
//! countdown reaches zero, whichever comes first.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use wormfarm_agents::{Apple, Movement, Worm};
use wormfarm_world::Boundary;

use crate::forage::{ForagingPolicy, forage};

/// Errors from driving a generation.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// A tick was requested after the generation ended.
    #[error("generation {generation} already ended: {reason:?}")]
    AlreadyEnded {
        /// Index of the ended generation.
        generation: u32,
        /// Why it ended.
        reason: GenerationEndReason,
    },
}

/// Why a generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationEndReason {
    /// The tick counter reached `max_ticks`.
    MaxTicksReached,
    /// Every apple was eaten and the grace countdown ran out.
    AllFoodEaten,
}

/// Fixed rules of the tick loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationRules {
    /// Tick limit.
    pub max_ticks: u64,
    /// Eating threshold distance (strict).
    pub eat_distance: f64,
    /// Ticks allowed after all apples are eaten.
    pub eaten_all_countdown: u32,
    /// Apple crediting policy.
    pub foraging: ForagingPolicy,
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickSummary {
    /// The tick that just ran (0-based).
    pub tick: u64,
    /// Worms that turned.
    pub turned: u32,
    /// Worms that moved.
    pub moved: u32,
    /// Worms whose step was rejected by the boundary.
    pub blocked: u32,
    /// Apples eaten during this tick.
    pub apples_eaten: u32,
    /// Apples eaten so far this generation.
    pub apples_eaten_total: u32,
}

/// The mutable state of one generation.
#[derive(Debug, Clone)]
pub struct GenerationState {
    index: u32,
    tick: u64,
    worms: Vec<Worm>,
    apples: Vec<Apple>,
    eaten_all_countdown: u32,
    rules: GenerationRules,
}

impl GenerationState {
    /// Start generation `index` with a fresh countdown.
    pub fn new(index: u32, worms: Vec<Worm>, apples: Vec<Apple>, rules: GenerationRules) -> Self {
        Self {
            index,
            tick: 0,
            worms,
            apples,
            eaten_all_countdown: rules.eaten_all_countdown,
            rules,
        }
    }

    /// Generation index.
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// Ticks run so far.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// The population.
    pub fn worms(&self) -> &[Worm] {
        &self.worms
    }

    /// Mutable access to the population, for presentation bookkeeping
    /// such as consuming score flashes.
    pub fn worms_mut(&mut self) -> &mut [Worm] {
        &mut self.worms
    }

    /// Count down every worm's score flash by one draw.
    ///
    /// Returns how many worms were still flashing before the draw.
    pub fn consume_score_flashes(&mut self) -> usize {
        self.worms
            .iter_mut()
            .map(Worm::consume_score_flash)
            .filter(|flashing| *flashing)
            .count()
    }

    /// This generation's apples.
    pub fn apples(&self) -> &[Apple] {
        &self.apples
    }

    /// Remaining ticks of the eaten-all countdown.
    pub const fn eaten_all_countdown(&self) -> u32 {
        self.eaten_all_countdown
    }

    /// The rules this generation runs under.
    pub const fn rules(&self) -> &GenerationRules {
        &self.rules
    }

    /// Number of eaten apples.
    pub fn apples_eaten(&self) -> u32 {
        let eaten = self.apples.iter().filter(|a| a.is_eaten()).count();
        u32::try_from(eaten).unwrap_or(u32::MAX)
    }

    /// Whether no uneaten apple remains. True for an empty batch.
    pub fn all_eaten(&self) -> bool {
        self.apples.iter().all(Apple::is_eaten)
    }

    /// Why the generation is over, or `None` while it is still running.
    pub const fn end_reason(&self) -> Option<GenerationEndReason> {
        if self.tick >= self.rules.max_ticks {
            Some(GenerationEndReason::MaxTicksReached)
        } else if self.eaten_all_countdown == 0 {
            Some(GenerationEndReason::AllFoodEaten)
        } else {
            None
        }
    }

    /// Run one tick.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::AlreadyEnded`] if the generation is over.
    pub fn step(
        &mut self,
        boundary: Option<&Boundary>,
        rng: &mut impl Rng,
    ) -> Result<TickSummary, GenerationError> {
        if let Some(reason) = self.end_reason() {
            return Err(GenerationError::AlreadyEnded {
                generation: self.index,
                reason,
            });
        }

        let mut summary = TickSummary {
            tick: self.tick,
            ..TickSummary::default()
        };

        for worm in &mut self.worms {
            let counter = match worm.update(&self.apples, boundary, rng) {
                Movement::Turned => &mut summary.turned,
                Movement::Moved => &mut summary.moved,
                Movement::Blocked => &mut summary.blocked,
            };
            *counter = counter.saturating_add(1);
        }

        summary.apples_eaten = forage(
            &mut self.worms,
            &mut self.apples,
            self.rules.eat_distance,
            self.tick,
            self.rules.foraging,
        );
        summary.apples_eaten_total = self.apples_eaten();

        if self.all_eaten() {
            self.eaten_all_countdown = self.eaten_all_countdown.saturating_sub(1);
        }
        self.tick = self.tick.saturating_add(1);

        if summary.apples_eaten > 0 {
            debug!(
                generation = self.index,
                tick = summary.tick,
                eaten = summary.apples_eaten,
                total = summary.apples_eaten_total,
                "Apples eaten"
            );
        }
        Ok(summary)
    }

    /// Consume the state, yielding the evaluated population.
    pub fn into_worms(self) -> Vec<Worm> {
        self.worms
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use wormfarm_agents::{Body, Brain, Identity, Size};
    use wormfarm_types::Point;

    use super::*;

    fn rules(max_ticks: u64, countdown: u32) -> GenerationRules {
        GenerationRules {
            max_ticks,
            eat_distance: 20.0,
            eaten_all_countdown: countdown,
            foraging: ForagingPolicy::AllInRange,
        }
    }

    fn still_worm(x: f64, y: f64) -> Worm {
        Worm::new(
            Point::new(x, y),
            0.0,
            Size::default(),
            Body::new(0.0, 0.0, 0.0),
            Brain::NoBrain,
            Identity {
                first_name: "Motoo".to_owned(),
                last_name: "Kimura".to_owned(),
                generation: 0,
                ancestor_generation: 0,
            },
        )
    }

    #[test]
    fn stops_at_max_ticks() {
        let mut state = GenerationState::new(
            0,
            vec![still_worm(0.0, 0.0)],
            vec![Apple::new(Point::new(500.0, 500.0), 1.0)],
            rules(5, 50),
        );
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut ticks = 0;
        while state.end_reason().is_none() {
            state.step(None, &mut rng).unwrap();
            ticks += 1;
        }
        assert_eq!(ticks, 5);
        assert_eq!(state.end_reason(), Some(GenerationEndReason::MaxTicksReached));
        assert!(matches!(
            state.step(None, &mut rng),
            Err(GenerationError::AlreadyEnded { .. })
        ));
    }

    #[test]
    fn countdown_starts_once_all_food_is_eaten() {
        let mut state = GenerationState::new(
            2,
            vec![still_worm(0.0, 0.0)],
            vec![Apple::new(Point::new(1.0, 1.0), 1.0)],
            rules(1000, 3),
        );
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let first = state.step(None, &mut rng).unwrap();
        assert_eq!(first.apples_eaten, 1);
        assert_eq!(state.eaten_all_countdown(), 2);
        assert_eq!(state.apples()[0].eaten_tick(), Some(0));

        state.step(None, &mut rng).unwrap();
        state.step(None, &mut rng).unwrap();
        assert_eq!(state.tick(), 3);
        assert_eq!(state.end_reason(), Some(GenerationEndReason::AllFoodEaten));
        assert_eq!(state.worms()[0].belly, 1);
    }

    #[test]
    fn score_flashes_fade_after_fixed_draws() {
        let mut state = GenerationState::new(
            0,
            vec![still_worm(0.0, 0.0), still_worm(400.0, 400.0)],
            vec![Apple::new(Point::new(1.0, 1.0), 1.0)],
            rules(1000, 50),
        );
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        state.step(None, &mut rng).unwrap();
        assert!(state.worms()[0].just_scored());
        assert!(!state.worms()[1].just_scored());

        let mut draws = 0;
        while state.consume_score_flashes() > 0 {
            draws += 1;
        }
        assert_eq!(draws, usize::from(wormfarm_agents::SCORE_FLASH_DRAWS));
        assert!(state.worms().iter().all(|w| !w.just_scored()));
    }

    #[test]
    fn empty_apple_batch_counts_as_all_eaten() {
        let mut state = GenerationState::new(0, vec![still_worm(0.0, 0.0)], vec![], rules(100, 2));
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        assert!(state.all_eaten());
        state.step(None, &mut rng).unwrap();
        state.step(None, &mut rng).unwrap();
        assert_eq!(state.end_reason(), Some(GenerationEndReason::AllFoodEaten));
    }

    #[test]
    fn summary_counts_movements() {
        let wall = Boundary::Rectangle {
            min_x: -10.0,
            max_x: 10.0,
            min_y: -10.0,
            max_y: 10.0,
        };
        let mut mover = still_worm(0.0, 0.0);
        mover.body = Body::new(1.0, 0.0, 0.0);
        let mut blocked = still_worm(10.0, 0.0);
        blocked.body = Body::new(1.0, 0.0, 0.0);

        let mut state = GenerationState::new(0, vec![mover, blocked], vec![], rules(10, 10));
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let summary = state.step(Some(&wall), &mut rng).unwrap();
        assert_eq!(summary.moved, 1);
        assert_eq!(summary.blocked, 1);
        assert_eq!(summary.turned, 0);
        assert!((state.worms()[0].position.x - 1.0).abs() < 1e-12);
        assert!((state.worms()[1].position.x - 10.0).abs() < 1e-12);
    }
}
