//! The foraging rule: worms eat apples they come close enough to.
//!
//! Applied once per tick, after every worm has moved. Apples are visited
//! in order and each uneaten apple checks the worms in population order.

use serde::{Deserialize, Serialize};
use tracing::trace;
use wormfarm_agents::{Apple, Worm};

/// How an apple is credited when several worms reach it on the same tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForagingPolicy {
    /// Every worm in range is fed, so one apple can raise several bellies.
    #[default]
    AllInRange,
    /// Only the first worm in range (population order) is fed.
    FirstMatch,
}

/// Apply one tick of foraging. Returns the number of apples eaten.
///
/// The apple's eaten tick is recorded by the first worm that reaches it;
/// under [`ForagingPolicy::AllInRange`] later worms in range are still fed.
pub fn forage(
    worms: &mut [Worm],
    apples: &mut [Apple],
    eat_distance: f64,
    tick: u64,
    policy: ForagingPolicy,
) -> u32 {
    let mut eaten = 0_u32;
    for apple in apples.iter_mut().filter(|a| !a.is_eaten()) {
        for worm in worms.iter_mut() {
            if worm.position.distance_to(apple.position()) >= eat_distance {
                continue;
            }
            worm.feed();
            if apple.mark_eaten(tick) {
                eaten = eaten.saturating_add(1);
                trace!(worm_id = %worm.id, apple_id = %apple.id(), tick, "Apple eaten");
            }
            if policy == ForagingPolicy::FirstMatch {
                break;
            }
        }
    }
    eaten
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use wormfarm_agents::{Body, Brain, Identity, Size};
    use wormfarm_types::Point;

    use super::*;

    fn worm_at(x: f64, y: f64) -> Worm {
        Worm::new(
            Point::new(x, y),
            0.0,
            Size::default(),
            Body::default(),
            Brain::NoBrain,
            Identity {
                first_name: "Lynn".to_owned(),
                last_name: "Margulis".to_owned(),
                generation: 0,
                ancestor_generation: 0,
            },
        )
    }

    #[test]
    fn all_in_range_credits_every_nearby_worm() {
        let mut worms = vec![worm_at(0.0, 0.0), worm_at(5.0, 0.0), worm_at(100.0, 0.0)];
        let mut apples = vec![Apple::new(Point::new(2.0, 0.0), 1.0)];

        let eaten = forage(&mut worms, &mut apples, 20.0, 3, ForagingPolicy::AllInRange);

        assert_eq!(eaten, 1);
        assert_eq!(worms.iter().map(|w| w.belly).collect::<Vec<_>>(), [1, 1, 0]);
        assert!(worms[0].just_scored() && worms[1].just_scored());
        assert_eq!(apples[0].eaten_tick(), Some(3));
    }

    #[test]
    fn first_match_credits_one_worm() {
        let mut worms = vec![worm_at(0.0, 0.0), worm_at(5.0, 0.0)];
        let mut apples = vec![Apple::new(Point::new(2.0, 0.0), 1.0)];

        forage(&mut worms, &mut apples, 20.0, 0, ForagingPolicy::FirstMatch);

        assert_eq!(worms[0].belly, 1);
        assert_eq!(worms[1].belly, 0);
    }

    #[test]
    fn threshold_is_strict_and_eaten_apples_are_skipped() {
        let mut worms = vec![worm_at(0.0, 0.0)];
        let mut apples = vec![
            Apple::new(Point::new(20.0, 0.0), 1.0),
            Apple::new(Point::new(0.0, 19.0), 1.0),
        ];

        assert_eq!(forage(&mut worms, &mut apples, 20.0, 1, ForagingPolicy::AllInRange), 1);
        assert!(!apples[0].is_eaten());
        assert!(apples[1].is_eaten());

        assert_eq!(forage(&mut worms, &mut apples, 20.0, 2, ForagingPolicy::AllInRange), 0);
        assert_eq!(worms[0].belly, 1);
        assert_eq!(apples[1].eaten_tick(), Some(1));
    }
}
