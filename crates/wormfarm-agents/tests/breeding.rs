//! Integration tests for breeding and worm movement in `wormfarm-agents`.
//!
//! These exercise the public API the generation loop relies on: building
//! the next population from an ended one, and replaying worm movement
//! from serialized bodies and brains.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::missing_panics_doc
)]

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wormfarm_agents::breeding::parent_queue;
use wormfarm_agents::{
    Body, BodyDistribution, Brain, BrainSpec, BreedingParams, Identity, NormalParams, RandomWalk,
    Size, SpawnParams, Worm, breed_next_generation, default_names, spawn_founders,
};
use wormfarm_types::Point;
use wormfarm_world::{Arena, Boundary, BoundingBox};

fn spawn_params() -> SpawnParams {
    let bounds = BoundingBox::padded(1200.0, 800.0, 50.0);
    let boundary = Boundary::Rectangle {
        min_x: 0.0,
        max_x: 1200.0,
        min_y: 0.0,
        max_y: 800.0,
    };
    SpawnParams {
        arena: Arena::new(bounds, Some(boundary)).unwrap(),
        worm_size: Size::default(),
        body: BodyDistribution {
            max_step: NormalParams::new(4.0, 1.0),
            turning_range: NormalParams::new(1.0, 0.3),
            turning_bias: NormalParams::new(0.0, 0.2),
        },
        brain: BrainSpec::RandomWalk {
            turning_chance: NormalParams::new(0.2, 0.05),
        },
        names: default_names(),
    }
}

fn population(bellies: &[u32], rng: &mut ChaCha8Rng) -> Vec<Worm> {
    let count = u32::try_from(bellies.len()).unwrap();
    let mut worms = spawn_founders(&spawn_params(), count, 0, rng).unwrap();
    for (worm, belly) in worms.iter_mut().zip(bellies) {
        worm.belly = *belly;
    }
    worms
}

fn params(n: u32, r: f64) -> BreedingParams {
    BreedingParams {
        population_size: n,
        random_worm_fraction: r,
        mutation_level: 0.0,
    }
}

#[test]
fn zero_fitness_yields_only_founders() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let worms = population(&[0; 10], &mut rng);

    let outcome =
        breed_next_generation(&worms, &params(10, 0.2), &spawn_params(), 3, &mut rng).unwrap();

    assert_eq!(outcome.worms.len(), 10);
    assert_eq!(outcome.founders, 10);
    assert_eq!(outcome.offspring, 0);
    for w in &outcome.worms {
        assert_eq!(w.identity.generation, 0);
        assert_eq!(w.identity.ancestor_generation, 3);
        assert_eq!(w.belly, 0);
    }
}

#[test]
fn proportional_slots_for_three_to_one() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let worms = population(&[1, 3], &mut rng);
    let a = worms[1].clone();
    let b = worms[0].clone();

    let queue = parent_queue(&worms, &params(4, 0.0));
    let ids: Vec<_> = queue.iter().map(|w| w.id).collect();
    assert_eq!(ids, vec![a.id, a.id, a.id, b.id]);

    let outcome =
        breed_next_generation(&worms, &params(4, 0.0), &spawn_params(), 0, &mut rng).unwrap();
    assert_eq!(outcome.worms.len(), 4);
    assert_eq!(outcome.offspring, 4);
    assert_eq!(outcome.founders, 0);

    let from_a = outcome.worms.iter().filter(|w| w.body == a.body).count();
    let from_b = outcome.worms.iter().filter(|w| w.body == b.body).count();
    assert_eq!(from_a, 3);
    assert_eq!(from_b, 1);
}

#[test]
fn offspring_inherit_lineage_and_respect_boundary() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut worms = population(&[5], &mut rng);
    worms[0].identity.generation = 2;
    worms[0].identity.ancestor_generation = 1;
    let parent = worms[0].clone();
    let spawn = spawn_params();

    let outcome = breed_next_generation(&worms, &params(6, 0.0), &spawn, 4, &mut rng).unwrap();
    for child in &outcome.worms {
        assert_eq!(child.identity.generation, 3);
        assert_eq!(child.identity.ancestor_generation, 1);
        assert_eq!(child.identity.last_name, parent.identity.last_name);
        assert_eq!(child.body, parent.body);
        assert_eq!(child.brain, parent.brain);
        assert_eq!(child.belly, 0);
        assert_ne!(child.id, parent.id);
        assert!(spawn.arena.allows(child.position));
    }
}

#[test]
fn population_size_is_exact_and_offspring_bounded() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let bellies = [9, 0, 4, 4, 1, 0, 7, 2, 0, 3, 1, 1, 6];
    let worms = population(&bellies, &mut rng);

    for (n, r) in [(13, 0.0), (13, 0.3), (20, 0.5), (5, 0.1), (1, 0.0), (8, 1.0)] {
        let p = params(n, r);
        let outcome = breed_next_generation(&worms, &p, &spawn_params(), 1, &mut rng).unwrap();
        assert_eq!(outcome.worms.len(), usize::try_from(n).unwrap());
        assert!(outcome.offspring <= p.offspring_capacity());
        assert_eq!(outcome.offspring + outcome.founders, outcome.worms.len());
    }
}

#[test]
fn higher_belly_never_gets_fewer_slots() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let worms = population(&[8, 5, 5, 2, 1], &mut rng);
    let queue = parent_queue(&worms, &params(30, 0.0));

    let count = |id| queue.iter().filter(|w| w.id == id).count();
    let counts: Vec<usize> = worms.iter().map(|w| count(w.id)).collect();
    for pair in counts.windows(2) {
        assert!(pair[0] >= pair[1], "slot counts not monotone: {counts:?}");
    }
}

#[test]
fn replay_from_serialized_body_and_brain_is_deterministic() {
    let body = Body::new(5.0, -0.7, 0.9);
    let brain = Brain::RandomWalk(RandomWalk {
        turning_chance: 0.25,
    });
    let body_json = serde_json::to_string(&body).unwrap();
    let brain_json = serde_json::to_string(&brain).unwrap();

    let boundary = Boundary::Circle {
        center_x: 0.0,
        center_y: 0.0,
        radius: 40.0,
    };

    let trace = |seed: u64| {
        let body: Body = serde_json::from_str(&body_json).unwrap();
        let brain: Brain = serde_json::from_str(&brain_json).unwrap();
        let mut worm = Worm::new(
            Point::new(0.0, 0.0),
            0.0,
            Size::default(),
            body,
            brain,
            Identity {
                first_name: "Gregor".to_owned(),
                last_name: "Mendel".to_owned(),
                generation: 0,
                ancestor_generation: 0,
            },
        );
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..500)
            .map(|_| {
                worm.update(&[], Some(&boundary), &mut rng);
                worm.position
            })
            .collect::<Vec<_>>()
    };

    let first = trace(99);
    assert_eq!(first, trace(99));
    assert!(first.iter().all(|p| boundary.contains(*p)));
    assert_ne!(first, trace(100));
}
