/*
 * Physics Module
 *
 * This module drives one simulation tick for both populations:
 * - the flock: all steering rules from a single pre-tick snapshot,
 *   then every boid integrates its own motion
 * - the bubble field: independent rise, wobble and respawn, plus
 *   stochastic spawning
 *
 * Populations are owned by the caller and passed in explicitly. The
 * step functions hold no state between calls.
 */

use std::time::Duration;

use rand::Rng;
use tracing::{debug, trace};

use crate::boid::Boid;
use crate::bubble::Bubble;
use crate::error::{Result, SimError};
use crate::params::{BubbleParams, FlockParams};
use crate::rules;

/// Size of the simulation plane. Origin is the top-left corner, y grows downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    width: f32,
    height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Result<Self> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if valid(width) && valid(height) {
            Ok(Self { width, height })
        } else {
            Err(SimError::InvalidBounds { width, height })
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Elapsed time for one tick, in seconds. Always positive and finite.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct TimeStep(f32);

impl TimeStep {
    pub fn new(seconds: f32) -> Result<Self> {
        if seconds.is_finite() && seconds > 0.0 {
            Ok(Self(seconds))
        } else {
            Err(SimError::InvalidTimeStep(seconds))
        }
    }

    pub fn from_duration(elapsed: Duration) -> Result<Self> {
        Self::new(elapsed.as_secs_f32())
    }

    pub fn seconds(&self) -> f32 {
        self.0
    }
}

// Advance the flock by one tick: rules first, then integration
pub fn step_flock(
    boids: &mut [Boid],
    dt: TimeStep,
    bounds: Bounds,
    params: &FlockParams,
    rng: &mut impl Rng,
) {
    rules::apply_rules(boids, bounds, params);

    for boid in boids.iter_mut() {
        boid.next_frame(dt, bounds, params, rng);
    }

    trace!(boids = boids.len(), dt = dt.seconds(), "flock stepped");
}

// Rise, wobble and recycle every bubble
pub fn step_particles(
    bubbles: &mut [Bubble],
    dt: TimeStep,
    bounds: Bounds,
    params: &BubbleParams,
    rng: &mut impl Rng,
) {
    for bubble in bubbles.iter_mut() {
        bubble.update(dt, bounds, params, rng);
    }
}

// Maybe add one bubble at the bottom edge. Returns whether one was added.
pub fn spawn_bubbles(
    bubbles: &mut Vec<Bubble>,
    bounds: Bounds,
    params: &BubbleParams,
    rng: &mut impl Rng,
) -> bool {
    let chance = params.spawn_chance;
    if chance.is_nan() || chance <= 0.0 || bubbles.len() >= params.max_bubbles {
        return false;
    }
    if !rng.gen_bool(f64::from(chance.min(1.0))) {
        return false;
    }
    bubbles.push(Bubble::spawn_at_bottom(bounds, params, rng));
    true
}

/// Grow by appending entities built by `factory`, or shrink by truncation.
///
/// Survivors keep their order and state. Must not be called while a tick
/// is in progress; the `&mut` borrow already rules that out.
pub fn resize_population<T>(collection: &mut Vec<T>, target: usize, factory: impl FnMut() -> T) {
    let before = collection.len();
    collection.resize_with(target, factory);
    if before != target {
        debug!(from = before, to = target, "population resized");
    }
}

// Population requests from outside may be negative; those mean "none"
pub fn clamp_population(requested: i64) -> usize {
    usize::try_from(requested.max(0)).unwrap_or(usize::MAX)
}

// Apply a new speed to every boid
pub fn set_speed(boids: &mut [Boid], speed: f32) {
    for boid in boids {
        boid.speed = speed;
    }
}
