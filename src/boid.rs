/*
 * Boid Module
 *
 * This module defines the Boid struct and its own motion.
 * Steering comes from the rules module; a boid only integrates:
 * 1. Move along its heading at its speed
 * 2. Record the new position in its fading trail
 * 3. Wrap around any edge it has fully left
 * 4. Wander a little for a more natural look
 */

use std::collections::VecDeque;

use nannou::prelude::*;
use rand::Rng;

use crate::angle::heading_to_vector;
use crate::params::FlockParams;
use crate::physics::{Bounds, TimeStep};
use crate::rules::BoidState;

/// One past position of a boid, fading as it ages.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
    pub position: Vec2,
    pub alpha: f32,
}

#[derive(Clone, Debug)]
pub struct Boid {
    pub position: Vec2,
    /// Degrees, 0 = up the screen, clockwise positive. Not wrapped.
    pub heading: f32,
    pub speed: f32,
    pub size: f32,
    pub color: Rgb<u8>,
    // Oldest point at the front
    trail: VecDeque<TrailPoint>,
}

impl Boid {
    pub fn new(position: Vec2, heading: f32, speed: f32, size: f32) -> Self {
        Self {
            position,
            heading,
            speed,
            size,
            color: rgb(220, 220, 220),
            trail: VecDeque::new(),
        }
    }

    // Random position inside the bounds, random heading
    pub fn random(bounds: Bounds, params: &FlockParams, rng: &mut impl Rng) -> Self {
        let x = rng.gen_range(0.0..bounds.width());
        let y = rng.gen_range(0.0..bounds.height());
        let heading = rng.gen_range(0.0..360.0);
        Self::new(pt2(x, y), heading, params.speed, params.boid_size)
    }

    pub fn state(&self) -> BoidState {
        BoidState {
            position: self.position,
            heading: self.heading,
        }
    }

    pub fn trail(&self) -> &VecDeque<TrailPoint> {
        &self.trail
    }

    // Integrate one tick. Headings must already carry this tick's steering.
    pub fn next_frame(
        &mut self,
        dt: TimeStep,
        bounds: Bounds,
        params: &FlockParams,
        rng: &mut impl Rng,
    ) {
        self.position += heading_to_vector(self.heading) * self.speed * dt.seconds();

        self.record_trail(params.trail_length, params.trail_decay);
        self.wrap_edges(bounds);

        if params.jitter.is_finite() && params.jitter > 0.0 {
            self.heading += rng.gen_range(-params.jitter..=params.jitter);
        }
    }

    // Fade what is there, then push the current position
    fn record_trail(&mut self, max_len: usize, decay: f32) {
        let decay = if decay.is_nan() { 0.0 } else { decay.clamp(0.0, 1.0) };
        for point in &mut self.trail {
            point.alpha *= decay;
        }

        if max_len == 0 {
            self.trail.clear();
            return;
        }

        self.trail.push_back(TrailPoint {
            position: self.position,
            alpha: 1.0,
        });
        while self.trail.len() > max_len {
            self.trail.pop_front();
        }
    }

    // A boid reappears on the opposite side once it is fully off screen
    pub fn wrap_edges(&mut self, bounds: Bounds) {
        let half_size = self.size / 2.0;

        if self.position.x < -half_size {
            self.position.x = bounds.width() + half_size;
        } else if self.position.x > bounds.width() + half_size {
            self.position.x = -half_size;
        }

        if self.position.y < -half_size {
            self.position.y = bounds.height() + half_size;
        } else if self.position.y > bounds.height() + half_size {
            self.position.y = -half_size;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn calm() -> FlockParams {
        FlockParams {
            jitter: 0.0,
            ..FlockParams::default()
        }
    }

    fn bounds() -> Bounds {
        Bounds::new(200.0, 100.0).unwrap()
    }

    #[test]
    fn moves_along_heading() {
        let mut rng = StdRng::seed_from_u64(3);
        let dt = TimeStep::new(0.5).unwrap();

        let mut up = Boid::new(pt2(50.0, 50.0), 0.0, 20.0, 10.0);
        up.next_frame(dt, bounds(), &calm(), &mut rng);
        assert!((up.position.x - 50.0).abs() < 1e-4);
        assert!((up.position.y - 40.0).abs() < 1e-4);

        let mut right = Boid::new(pt2(50.0, 50.0), 90.0, 20.0, 10.0);
        right.next_frame(dt, bounds(), &calm(), &mut rng);
        assert!((right.position.x - 60.0).abs() < 1e-4);
        assert!((right.position.y - 50.0).abs() < 1e-4);
    }

    #[test]
    fn wraps_each_axis_independently() {
        let mut boid = Boid::new(pt2(-6.0, 50.0), 0.0, 0.0, 10.0);
        boid.wrap_edges(bounds());
        assert_eq!(boid.position, pt2(205.0, 50.0));

        let mut boid = Boid::new(pt2(100.0, 106.0), 0.0, 0.0, 10.0);
        boid.wrap_edges(bounds());
        assert_eq!(boid.position, pt2(100.0, -5.0));

        let mut boid = Boid::new(pt2(206.0, -6.0), 0.0, 0.0, 10.0);
        boid.wrap_edges(bounds());
        assert_eq!(boid.position, pt2(-5.0, 105.0));

        // Partially visible boids stay put
        let mut boid = Boid::new(pt2(-4.0, 104.0), 0.0, 0.0, 10.0);
        boid.wrap_edges(bounds());
        assert_eq!(boid.position, pt2(-4.0, 104.0));
    }

    #[test]
    fn trail_is_bounded_and_fades() {
        let mut rng = StdRng::seed_from_u64(9);
        let params = FlockParams {
            trail_length: 5,
            trail_decay: 0.8,
            ..calm()
        };
        let dt = TimeStep::new(0.1).unwrap();
        let mut boid = Boid::new(pt2(100.0, 50.0), 90.0, 10.0, 10.0);

        boid.next_frame(dt, bounds(), &params, &mut rng);
        let first = boid.trail()[0];
        assert_eq!(first.alpha, 1.0);

        let mut last_alpha = first.alpha;
        for _ in 0..4 {
            boid.next_frame(dt, bounds(), &params, &mut rng);
            let tracked = boid.trail()[0];
            assert_eq!(tracked.position, first.position);
            assert!(tracked.alpha <= last_alpha);
            last_alpha = tracked.alpha;
        }
        assert_eq!(boid.trail().len(), 5);

        for _ in 0..10 {
            boid.next_frame(dt, bounds(), &params, &mut rng);
            assert!(boid.trail().len() <= 5);
        }
        assert_eq!(boid.trail().back().map(|p| p.alpha), Some(1.0));
    }

    #[test]
    fn zero_trail_length_keeps_no_history() {
        let mut rng = StdRng::seed_from_u64(2);
        let params = FlockParams {
            trail_length: 0,
            ..calm()
        };
        let mut boid = Boid::new(pt2(10.0, 10.0), 45.0, 10.0, 10.0);
        boid.next_frame(TimeStep::new(0.1).unwrap(), bounds(), &params, &mut rng);
        assert!(boid.trail().is_empty());
    }

    #[test]
    fn jitter_is_bounded() {
        let mut rng = StdRng::seed_from_u64(11);
        let params = FlockParams {
            jitter: 2.0,
            ..FlockParams::default()
        };
        let dt = TimeStep::new(0.01).unwrap();
        let mut boid = Boid::new(pt2(100.0, 50.0), 30.0, 0.0, 10.0);
        for _ in 0..100 {
            let before = boid.heading;
            boid.next_frame(dt, bounds(), &params, &mut rng);
            assert!((boid.heading - before).abs() <= 2.0);
        }
    }

    #[test]
    fn unchecked_params_neither_panic_nor_brighten_the_trail() {
        let mut rng = StdRng::seed_from_u64(4);
        let params = FlockParams {
            jitter: f32::INFINITY,
            trail_length: 4,
            trail_decay: 1.5,
            ..FlockParams::default()
        };
        let dt = TimeStep::new(0.1).unwrap();
        let mut boid = Boid::new(pt2(100.0, 50.0), 30.0, 10.0, 10.0);
        for _ in 0..6 {
            boid.next_frame(dt, bounds(), &params, &mut rng);
            assert_eq!(boid.heading, 30.0);
            assert!(boid.trail().iter().all(|p| p.alpha <= 1.0));
        }
    }

    #[test]
    fn random_boids_start_inside_bounds() {
        let mut rng = StdRng::seed_from_u64(5);
        let params = FlockParams::default();
        for _ in 0..50 {
            let boid = Boid::random(bounds(), &params, &mut rng);
            assert!((0.0..200.0).contains(&boid.position.x));
            assert!((0.0..100.0).contains(&boid.position.y));
            assert_eq!(boid.speed, params.speed);
            assert!(boid.trail().is_empty());
        }
    }
}
