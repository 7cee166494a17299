/*
 * Simulation Parameters Module
 *
 * This module defines the tunable parameters of the school simulation.
 * The simulation core never stores them: the caller hands the current
 * values to every step. The UI edits them live, a JSON file can
 * override the defaults at start-up, and change detection tells the
 * app when a population has to be resized.
 */

use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, SimError};
use crate::DEFAULT_BOID_SIZE;

// Flocking rules, integration and trails
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlockParams {
    pub separation_radius: f32,
    /// Fraction of the angular error corrected per tick.
    pub separation_gain: f32,
    pub cohesion_radius: f32,
    /// Upper bound of the cohesion gain, reached when the centroid is a full radius away.
    pub cohesion_max_gain: f32,
    pub alignment_radius: f32,
    pub alignment_gain: f32,
    pub boundary_margin: f32,
    pub boundary_gain: f32,
    /// Units per second.
    pub speed: f32,
    pub boid_size: f32,
    /// Maximum random heading change per tick, in degrees.
    pub jitter: f32,
    pub trail_length: usize,
    /// Multiplier applied to every trail alpha each tick.
    pub trail_decay: f32,
}

impl Default for FlockParams {
    fn default() -> Self {
        Self {
            separation_radius: 30.0,
            separation_gain: 0.1,
            cohesion_radius: 150.0,
            cohesion_max_gain: 0.02,
            alignment_radius: 60.0,
            alignment_gain: 0.05,
            boundary_margin: 50.0,
            boundary_gain: 0.05,
            speed: 100.0,
            boid_size: DEFAULT_BOID_SIZE,
            jitter: 1.0,
            trail_length: 20,
            trail_decay: 0.9,
        }
    }
}

impl FlockParams {
    pub fn validate(&self) -> Result<()> {
        non_negative("separation_radius", self.separation_radius)?;
        non_negative("cohesion_radius", self.cohesion_radius)?;
        non_negative("alignment_radius", self.alignment_radius)?;
        non_negative("boundary_margin", self.boundary_margin)?;
        unit_interval("separation_gain", self.separation_gain)?;
        unit_interval("cohesion_max_gain", self.cohesion_max_gain)?;
        unit_interval("alignment_gain", self.alignment_gain)?;
        unit_interval("boundary_gain", self.boundary_gain)?;
        non_negative("speed", self.speed)?;
        positive("boid_size", self.boid_size)?;
        non_negative("jitter", self.jitter)?;
        // Alphas may only fade
        if !(self.trail_decay > 0.0 && self.trail_decay <= 1.0) {
            return Err(invalid("trail_decay", self.trail_decay));
        }
        Ok(())
    }
}

// Ambient bubble field
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BubbleParams {
    pub max_bubbles: usize,
    /// Probability of spawning one extra bubble on a tick.
    pub spawn_chance: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_opacity: f32,
    pub max_opacity: f32,
    pub wobble_amplitude: f32,
    pub wobble_frequency: f32,
}

impl Default for BubbleParams {
    fn default() -> Self {
        Self {
            max_bubbles: 60,
            spawn_chance: 0.05,
            min_radius: 2.0,
            max_radius: 8.0,
            min_speed: 20.0,
            max_speed: 60.0,
            min_opacity: 0.1,
            max_opacity: 0.5,
            wobble_amplitude: 15.0,
            wobble_frequency: 0.05,
        }
    }
}

impl BubbleParams {
    pub fn validate(&self) -> Result<()> {
        unit_interval("spawn_chance", self.spawn_chance)?;
        positive("min_radius", self.min_radius)?;
        ordered("max_radius", self.min_radius, self.max_radius)?;
        non_negative("min_speed", self.min_speed)?;
        ordered("max_speed", self.min_speed, self.max_speed)?;
        unit_interval("min_opacity", self.min_opacity)?;
        unit_interval("max_opacity", self.max_opacity)?;
        ordered("max_opacity", self.min_opacity, self.max_opacity)?;
        non_negative("wobble_amplitude", self.wobble_amplitude)?;
        non_negative("wobble_frequency", self.wobble_frequency)?;
        Ok(())
    }
}

// Parameters for the simulation that can be adjusted via UI
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub num_boids: usize,
    pub num_bubbles: usize,
    pub flock: FlockParams,
    pub bubbles: BubbleParams,
    pub target_fps: f32,
    pub show_debug: bool,
    pub pause_simulation: bool,

    // Internal state for tracking changes
    #[serde(skip)]
    previous_values: Option<ParamSnapshot>,
}

// A snapshot of the values whose change needs action outside the step functions
#[derive(Clone, Debug, PartialEq)]
struct ParamSnapshot {
    num_boids: usize,
    num_bubbles: usize,
    target_fps: f32,
    flock: FlockParams,
    bubbles: BubbleParams,
    show_debug: bool,
    pause_simulation: bool,
}

/// What changed between `take_snapshot` and `detect_changes`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParamChanges {
    pub num_boids_changed: bool,
    pub num_bubbles_changed: bool,
    pub speed_changed: bool,
    pub target_fps_changed: bool,
    pub any_changed: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            num_boids: 50,
            num_bubbles: 30,
            flock: FlockParams::default(),
            bubbles: BubbleParams::default(),
            target_fps: 30.0,
            show_debug: false,
            pause_simulation: false,
            previous_values: None,
        }
    }
}

impl SimulationParams {
    // Read a JSON parameter file; missing fields keep their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| SimError::Config(format!("{}: {}", path.display(), e)))?;
        let params = Self::from_json(&text)?;
        debug!(path = %path.display(), "loaded simulation parameters");
        Ok(params)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let params: Self =
            serde_json::from_str(text).map_err(|e| SimError::Config(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    /// Rejects values the step functions cannot work with.
    ///
    /// Radii, speeds and sizes must be finite and non-negative, gains lie
    /// in [0, 1], and every min/max pair must be ordered.
    pub fn validate(&self) -> Result<()> {
        self.flock.validate()?;
        self.bubbles.validate()?;
        positive("target_fps", self.target_fps)?;
        Ok(())
    }

    // Take a snapshot of current parameter values for change detection
    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(ParamSnapshot {
            num_boids: self.num_boids,
            num_bubbles: self.num_bubbles,
            target_fps: self.target_fps,
            flock: self.flock.clone(),
            bubbles: self.bubbles.clone(),
            show_debug: self.show_debug,
            pause_simulation: self.pause_simulation,
        });
    }

    // Compare against the last snapshot. Without a snapshot nothing has changed.
    pub fn detect_changes(&self) -> ParamChanges {
        let Some(prev) = &self.previous_values else {
            return ParamChanges::default();
        };

        let mut changes = ParamChanges {
            num_boids_changed: self.num_boids != prev.num_boids,
            num_bubbles_changed: self.num_bubbles != prev.num_bubbles,
            speed_changed: self.flock.speed != prev.flock.speed,
            target_fps_changed: self.target_fps != prev.target_fps,
            any_changed: false,
        };
        changes.any_changed = changes.num_boids_changed
            || changes.num_bubbles_changed
            || changes.speed_changed
            || changes.target_fps_changed
            || self.flock != prev.flock
            || self.bubbles != prev.bubbles
            || self.show_debug != prev.show_debug
            || self.pause_simulation != prev.pause_simulation;
        changes
    }

    // Get parameter ranges for UI sliders
    pub fn get_num_boids_range() -> RangeInclusive<usize> {
        0..=500
    }

    pub fn get_num_bubbles_range() -> RangeInclusive<usize> {
        0..=300
    }

    pub fn get_speed_range() -> RangeInclusive<f32> {
        0.0..=400.0
    }

    pub fn get_radius_range() -> RangeInclusive<f32> {
        0.0..=400.0
    }

    pub fn get_gain_range() -> RangeInclusive<f32> {
        0.0..=0.5
    }

    pub fn get_margin_range() -> RangeInclusive<f32> {
        0.0..=200.0
    }

    pub fn get_jitter_range() -> RangeInclusive<f32> {
        0.0..=10.0
    }

    pub fn get_trail_length_range() -> RangeInclusive<usize> {
        0..=60
    }

    pub fn get_trail_decay_range() -> RangeInclusive<f32> {
        0.5..=1.0
    }

    pub fn get_spawn_chance_range() -> RangeInclusive<f32> {
        0.0..=1.0
    }

    pub fn get_target_fps_range() -> RangeInclusive<f32> {
        5.0..=120.0
    }
}

fn invalid(name: &'static str, value: f32) -> SimError {
    warn!(parameter = name, value, "rejected simulation parameter");
    SimError::InvalidParameter { name, value }
}

fn non_negative(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(name, value))
    }
}

fn positive(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(name, value))
    }
}

fn unit_interval(name: &'static str, value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(name, value))
    }
}

// `max` must be finite and not below `min`
fn ordered(name: &'static str, min: f32, max: f32) -> Result<()> {
    if max.is_finite() && max >= min {
        Ok(())
    } else {
        Err(invalid(name, max))
    }
}
