/*
 * Rules Module
 *
 * The steering rules of the school. Each rule looks at one boid and a
 * snapshot of the whole flock and returns a heading change in degrees:
 * 1. Separation: turn away from neighbours that are too close
 * 2. Cohesion: turn towards the weighted centre of nearby neighbours
 * 3. Alignment: turn towards the weighted mean heading of neighbours
 * 4. Boundary: turn back inside when close to an edge
 *
 * Neighbours are found by scanning every other boid. Closer neighbours
 * weigh more: a neighbour at distance d within radius r has weight
 * (1 - d / r). Boids at exactly the same position are ignored.
 *
 * All rules read the snapshot taken before the tick, so the result for
 * a boid does not depend on where it sits in the flock list.
 */

use nannou::prelude::*;

use crate::angle::{heading_to_vector, steer_towards, vector_to_heading};
use crate::boid::Boid;
use crate::params::FlockParams;
use crate::physics::Bounds;

/// What the rules need to know about a boid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoidState {
    pub position: Vec2,
    pub heading: f32,
}

pub fn snapshot(boids: &[Boid]) -> Vec<BoidState> {
    boids.iter().map(Boid::state).collect()
}

// Every other boid strictly inside `radius`, with its distance-based weight
fn neighbors(
    states: &[BoidState],
    index: usize,
    radius: f32,
) -> impl Iterator<Item = (&BoidState, f32, f32)> + '_ {
    let origin = states.get(index).map(|s| s.position);
    states
        .iter()
        .enumerate()
        .filter(move |&(j, _)| j != index)
        .filter_map(move |(_, other)| {
            let d = origin?.distance(other.position);
            if d > 0.0 && d < radius {
                Some((other, d, 1.0 - d / radius))
            } else {
                None
            }
        })
}

// Turn away from crowding neighbours
pub fn separation(states: &[BoidState], index: usize, radius: f32, gain: f32) -> f32 {
    let Some(me) = states.get(index) else {
        return 0.0;
    };

    let mut push = Vec2::ZERO;
    for (other, d, weight) in neighbors(states, index, radius) {
        push += (me.position - other.position) / d * weight;
    }

    if push.length_squared() == 0.0 {
        return 0.0;
    }
    steer_towards(me.heading, vector_to_heading(push), gain)
}

/// Turn towards the weighted centroid of neighbours.
///
/// The gain grows with the distance to the centroid and reaches
/// `max_gain` one full radius away, so a boid that is already near the
/// centre barely turns.
pub fn cohesion(states: &[BoidState], index: usize, radius: f32, max_gain: f32) -> f32 {
    let Some(me) = states.get(index) else {
        return 0.0;
    };

    let mut weighted = Vec2::ZERO;
    let mut total_weight = 0.0;
    for (other, _, weight) in neighbors(states, index, radius) {
        weighted += other.position * weight;
        total_weight += weight;
    }

    if total_weight <= 0.0 {
        return 0.0;
    }

    let offset = weighted / total_weight - me.position;
    let distance = offset.length();
    if distance == 0.0 {
        return 0.0;
    }

    let gain = max_gain * (distance / radius).min(1.0);
    steer_towards(me.heading, vector_to_heading(offset), gain)
}

// Turn towards the weighted circular mean of neighbour headings
pub fn alignment(states: &[BoidState], index: usize, radius: f32, gain: f32) -> f32 {
    let Some(me) = states.get(index) else {
        return 0.0;
    };

    let mut sum = Vec2::ZERO;
    let mut total_weight = 0.0;
    for (other, _, weight) in neighbors(states, index, radius) {
        sum += heading_to_vector(other.heading) * weight;
        total_weight += weight;
    }

    if total_weight <= 0.0 {
        return 0.0;
    }

    // Opposite headings cancel out and leave nothing to align with
    let mean = sum / total_weight;
    if mean.length_squared() <= f32::EPSILON {
        return 0.0;
    }
    steer_towards(me.heading, vector_to_heading(mean), gain)
}

// Turn back towards the interior when within `margin` of an edge
pub fn boundary_avoidance(state: &BoidState, bounds: Bounds, margin: f32, gain: f32) -> f32 {
    if margin <= 0.0 {
        return 0.0;
    }

    let p = state.position;
    // Opposite margins overlap in small windows, so their pushes are summed
    let steer = vec2(
        penetration(p.x, margin) - penetration(bounds.width() - p.x, margin),
        penetration(p.y, margin) - penetration(bounds.height() - p.y, margin),
    );

    if steer == Vec2::ZERO {
        return 0.0;
    }

    // Deeper penetration turns harder, up to the full gain
    let strength = steer.length().min(1.0);
    steer_towards(state.heading, vector_to_heading(steer), gain * strength)
}

// How far into the margin a boid is, given its distance to the edge
fn penetration(distance: f32, margin: f32) -> f32 {
    ((margin - distance) / margin).max(0.0)
}

// Total heading change for one boid from all four rules
pub fn heading_adjustment(
    states: &[BoidState],
    index: usize,
    bounds: Bounds,
    params: &FlockParams,
) -> f32 {
    let Some(state) = states.get(index) else {
        return 0.0;
    };

    separation(states, index, params.separation_radius, params.separation_gain)
        + cohesion(states, index, params.cohesion_radius, params.cohesion_max_gain)
        + alignment(states, index, params.alignment_radius, params.alignment_gain)
        + boundary_avoidance(state, bounds, params.boundary_margin, params.boundary_gain)
}

// Run all rules over the flock from one snapshot
pub fn apply_rules(boids: &mut [Boid], bounds: Bounds, params: &FlockParams) {
    let states = snapshot(boids);
    for (i, boid) in boids.iter_mut().enumerate() {
        boid.heading += heading_adjustment(&states, i, bounds, params);
    }
}

pub fn apply_separation(boids: &mut [Boid], radius: f32, gain: f32) {
    apply_single(boids, |states, i| separation(states, i, radius, gain));
}

pub fn apply_cohesion(boids: &mut [Boid], radius: f32, max_gain: f32) {
    apply_single(boids, |states, i| cohesion(states, i, radius, max_gain));
}

pub fn apply_alignment(boids: &mut [Boid], radius: f32, gain: f32) {
    apply_single(boids, |states, i| alignment(states, i, radius, gain));
}

pub fn apply_boundary(boids: &mut [Boid], bounds: Bounds, margin: f32, gain: f32) {
    apply_single(boids, |states, i| {
        boundary_avoidance(&states[i], bounds, margin, gain)
    });
}

fn apply_single(boids: &mut [Boid], rule: impl Fn(&[BoidState], usize) -> f32) {
    let states = snapshot(boids);
    for (i, boid) in boids.iter_mut().enumerate() {
        boid.heading += rule(&states, i);
    }
}
