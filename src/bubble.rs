/*
 * Bubble Module
 *
 * Ambient bubbles rising through the water. Bubbles never interact with
 * each other or with the school. Radius, rise speed and opacity are
 * drawn once; a bubble that leaves through the top is recycled at the
 * bottom with the same look.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::params::BubbleParams;
use crate::physics::{Bounds, TimeStep};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bubble {
    pub position: Vec2,
    radius: f32,
    speed: f32,
    opacity: f32,
}

impl Bubble {
    pub fn new(position: Vec2, radius: f32, speed: f32, opacity: f32) -> Self {
        Self {
            position,
            radius,
            speed,
            opacity,
        }
    }

    // Anywhere inside the bounds, used when the field is first filled
    pub fn random(bounds: Bounds, params: &BubbleParams, rng: &mut impl Rng) -> Self {
        let mut bubble = Self::with_random_look(params, rng);
        bubble.position = pt2(
            rng.gen_range(0.0..bounds.width()),
            rng.gen_range(0.0..bounds.height()),
        );
        bubble
    }

    // Just below the bottom edge
    pub fn spawn_at_bottom(bounds: Bounds, params: &BubbleParams, rng: &mut impl Rng) -> Self {
        let mut bubble = Self::with_random_look(params, rng);
        bubble.respawn(bounds, rng);
        bubble
    }

    fn with_random_look(params: &BubbleParams, rng: &mut impl Rng) -> Self {
        Self::new(
            Vec2::ZERO,
            rng.gen_range(params.min_radius..=params.max_radius),
            rng.gen_range(params.min_speed..=params.max_speed),
            rng.gen_range(params.min_opacity..=params.max_opacity),
        )
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    // Rise, drift sideways with height, recycle past the top
    pub fn update(
        &mut self,
        dt: TimeStep,
        bounds: Bounds,
        params: &BubbleParams,
        rng: &mut impl Rng,
    ) {
        let dt = dt.seconds();
        self.position.y -= self.speed * dt;
        self.position.x +=
            (self.position.y * params.wobble_frequency).sin() * params.wobble_amplitude * dt;

        if self.position.y < -self.radius {
            self.respawn(bounds, rng);
        }
    }

    fn respawn(&mut self, bounds: Bounds, rng: &mut impl Rng) {
        self.position = pt2(
            rng.gen_range(0.0..bounds.width()),
            bounds.height() + self.radius,
        );
    }
}
