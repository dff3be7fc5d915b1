//! Pure geometry helpers and random sampling primitives.
//!
//! Every sampling function takes the random source explicitly. The
//! simulation threads one seeded generator through all of them so a run
//! is reproducible from its seed alone.

use std::f64::consts::{PI, TAU};

use rand::Rng;
use wormfarm_types::Point;

/// Convert an angle in degrees to radians.
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Convert an angle in radians to degrees.
pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * 180.0 / PI
}

/// Sample uniformly from `[min, max)`.
///
/// Unlike `Rng::random_range` this is total: `min == max` returns `min`
/// and an inverted interval samples from `(max, min]`.
pub fn uniform_interval(rng: &mut impl Rng, min: f64, max: f64) -> f64 {
    let unit: f64 = rng.random();
    unit.mul_add(max - min, min)
}

/// Sample a heading uniformly from `[0, 2*PI)`.
pub fn random_angle(rng: &mut impl Rng) -> f64 {
    let unit: f64 = rng.random();
    unit * TAU
}

/// Sample from a normal distribution using the Box-Muller transform.
///
/// A standard deviation of zero always returns `mean`.
pub fn normal(rng: &mut impl Rng, mean: f64, std_dev: f64) -> f64 {
    // 1 - [0, 1) keeps u1 away from zero so the logarithm stays finite.
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random();
    let z = (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos();
    z.mul_add(std_dev, mean)
}

/// Bernoulli trial with success probability `p`, clamped to `[0, 1]`.
pub fn chance(rng: &mut impl Rng, p: f64) -> bool {
    let unit: f64 = rng.random();
    unit < p.clamp(0.0, 1.0)
}

/// Whether `point` lies in the closed rectangle `[min_x, max_x] x [min_y, max_y]`.
pub fn inside_rectangle(min_x: f64, max_x: f64, min_y: f64, max_y: f64, point: Point) -> bool {
    point.x >= min_x && point.x <= max_x && point.y >= min_y && point.y <= max_y
}

/// Whether `point` lies in the closed disc of `radius` around `center`.
pub fn inside_circle(center: Point, radius: f64, point: Point) -> bool {
    center.distance_to(point) <= radius
}
