/*
 * Angle Module
 *
 * Heading helpers shared by the rules and the integration step.
 * Headings are in degrees: 0 points up the screen (negative y), and
 * positive angles turn clockwise. Stored headings are unbounded, so
 * every comparison goes through `normalize_angle` first.
 */

use nannou::prelude::*;

// Map any angle into (-180, 180]
pub fn normalize_angle(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Shortest signed turn from `from` to `to`, in (-180, 180].
pub fn angle_difference(from: f32, to: f32) -> f32 {
    normalize_angle(to - from)
}

// Unit vector for a heading in screen space (y grows downward)
pub fn heading_to_vector(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    vec2(rad.sin(), -rad.cos())
}

// Heading pointing along `v`. A zero vector yields 0.
pub fn vector_to_heading(v: Vec2) -> f32 {
    v.x.atan2(-v.y).to_degrees()
}

// Heading change that turns `current` a fraction `gain` of the way to `target`
pub fn steer_towards(current: f32, target: f32, gain: f32) -> f32 {
    angle_difference(current, target) * gain
}
