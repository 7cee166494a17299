/*
 * Application Module
 *
 * This module defines the main application model and the per-frame
 * update of the nannou harness. Each frame it:
 * - runs the UI and applies parameter changes (population sizes, speed,
 *   frame rate) before any simulation work
 * - asks the frame throttle whether this frame runs a tick
 * - steps the school and the bubble field with the elapsed time
 */

use std::sync::OnceLock;
use std::time::Instant;

use nannou::prelude::*;
use nannou_egui::Egui;
use tracing::{debug, info, trace, warn};

use crate::boid::Boid;
use crate::bubble::Bubble;
use crate::debug::DebugInfo;
use crate::params::SimulationParams;
use crate::physics::{self, Bounds};
use crate::renderer;
use crate::timing::{FrameDecision, FrameThrottle};
use crate::ui;

// Parameters handed over from the command line before the window exists
static STARTUP_PARAMS: OnceLock<SimulationParams> = OnceLock::new();

// Main model for the application
pub struct Model {
    pub boids: Vec<Boid>,
    pub bubbles: Vec<Bubble>,
    pub params: SimulationParams,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub throttle: FrameThrottle,
    pub bounds: Bounds,
}

// Start the window with the given parameters
pub fn run(params: SimulationParams) {
    if STARTUP_PARAMS.set(params).is_err() {
        warn!("simulation parameters were already set, keeping the first ones");
    }
    nannou::app(model).update(update).run();
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let params = STARTUP_PARAMS.get().cloned().unwrap_or_default();

    // 80% of the primary monitor, or a fixed size when there is none
    let (window_width, window_height) = app
        .primary_monitor()
        .map(|monitor| {
            let size = monitor.size();
            (size.width as f32 * 0.8, size.height as f32 * 0.8)
        })
        .unwrap_or((1024.0, 768.0));

    let window_id = app
        .new_window()
        .title("Boid School")
        .size(window_width as u32, window_height as u32)
        .view(renderer::view)
        .resized(window_resized)
        .raw_event(raw_window_event)
        .build()
        .expect("failed to build the main window");

    let window = app.window(window_id).expect("main window closed during start-up");
    let egui = Egui::from_window(&window);

    let rect = window.rect();
    let bounds = Bounds::new(rect.w(), rect.h()).unwrap_or_default();

    let mut rng = rand::thread_rng();
    let mut boids = Vec::with_capacity(params.num_boids);
    physics::resize_population(&mut boids, params.num_boids, || {
        Boid::random(bounds, &params.flock, &mut rng)
    });
    let mut bubbles = Vec::with_capacity(params.bubbles.max_bubbles);
    physics::resize_population(&mut bubbles, params.num_bubbles, || {
        Bubble::random(bounds, &params.bubbles, &mut rng)
    });

    info!(
        boids = boids.len(),
        bubbles = bubbles.len(),
        width = bounds.width(),
        height = bounds.height(),
        "school ready"
    );

    Model {
        boids,
        bubbles,
        throttle: FrameThrottle::new(params.target_fps),
        params,
        egui,
        debug_info: DebugInfo::default(),
        bounds,
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let (should_reset, changes) = ui::update_ui(
        &mut model.egui,
        &mut model.params,
        &model.debug_info,
        model.boids.len(),
        model.bubbles.len(),
    );

    if changes.any_changed {
        match model.params.validate() {
            Ok(()) => debug!(?changes, "simulation parameters changed"),
            Err(err) => warn!(%err, "parameters out of range after UI edit"),
        }
    }

    // Population changes happen between ticks, never during one
    if should_reset {
        model.boids.clear();
        model.bubbles.clear();
    }
    if should_reset || changes.num_boids_changed {
        reset_boids(model);
    }
    if should_reset || changes.num_bubbles_changed {
        reset_bubbles(model);
    }
    if changes.speed_changed {
        physics::set_speed(&mut model.boids, model.params.flock.speed);
    }
    if changes.target_fps_changed {
        model.throttle.set_target_fps(model.params.target_fps);
    }

    if model.params.pause_simulation {
        model.throttle.reset();
        return;
    }

    match model.throttle.poll(Instant::now()) {
        FrameDecision::Skip => {
            model.debug_info.record_skip();
            trace!("frame skipped by throttle");
        }
        FrameDecision::Step(dt) => {
            let mut rng = rand::thread_rng();
            physics::step_flock(
                &mut model.boids,
                dt,
                model.bounds,
                &model.params.flock,
                &mut rng,
            );
            physics::spawn_bubbles(
                &mut model.bubbles,
                model.bounds,
                &model.params.bubbles,
                &mut rng,
            );
            physics::step_particles(
                &mut model.bubbles,
                dt,
                model.bounds,
                &model.params.bubbles,
                &mut rng,
            );
            model.debug_info.record_tick(dt.seconds());
        }
    }
}

// Grow or shrink the school to the requested size
fn reset_boids(model: &mut Model) {
    let mut rng = rand::thread_rng();
    let bounds = model.bounds;
    let flock = &model.params.flock;
    physics::resize_population(&mut model.boids, model.params.num_boids, || {
        Boid::random(bounds, flock, &mut rng)
    });
}

fn reset_bubbles(model: &mut Model) {
    let mut rng = rand::thread_rng();
    let bounds = model.bounds;
    let bubble_params = &model.params.bubbles;
    physics::resize_population(&mut model.bubbles, model.params.num_bubbles, || {
        Bubble::random(bounds, bubble_params, &mut rng)
    });
}

// Keep the simulation plane matched to the window
pub fn window_resized(_app: &App, model: &mut Model, size: Vec2) {
    match Bounds::new(size.x, size.y) {
        Ok(bounds) => model.bounds = bounds,
        Err(err) => warn!(%err, "ignoring window resize"),
    }
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
