/*
 * UI Module
 *
 * This module builds the control panel with nannou_egui. Every tunable
 * of the school and the bubble field has a slider; change detection is
 * handled by SimulationParams so the app knows what to resize.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::{ParamChanges, SimulationParams};
use crate::renderer;

type Params = SimulationParams;

// Draw the panel. Returns whether a reset was requested and what changed.
pub fn update_ui(
    egui: &mut Egui,
    params: &mut SimulationParams,
    debug_info: &DebugInfo,
    boid_count: usize,
    bubble_count: usize,
) -> (bool, ParamChanges) {
    let mut should_reset = false;

    // Take a snapshot of current parameter values for change detection
    params.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("School", |ui| {
                ui.add(egui::Slider::new(&mut params.num_boids, Params::get_num_boids_range()).text("Number of Boids"));
                if ui.button("Reset School").clicked() {
                    should_reset = true;
                }
                ui.add(egui::Slider::new(&mut params.flock.speed, Params::get_speed_range()).text("Speed"));
                ui.add(egui::Slider::new(&mut params.flock.jitter, Params::get_jitter_range()).text("Wander"));
                ui.add(egui::Slider::new(&mut params.flock.trail_length, Params::get_trail_length_range()).text("Trail Length"));
                ui.add(egui::Slider::new(&mut params.flock.trail_decay, Params::get_trail_decay_range()).text("Trail Fade"));
            });

            ui.collapsing("Flocking Behavior", |ui| {
                ui.add(egui::Slider::new(&mut params.flock.separation_radius, Params::get_radius_range()).text("Separation Radius"));
                ui.add(egui::Slider::new(&mut params.flock.separation_gain, Params::get_gain_range()).text("Separation Gain"));
                ui.add(egui::Slider::new(&mut params.flock.cohesion_radius, Params::get_radius_range()).text("Cohesion Radius"));
                ui.add(egui::Slider::new(&mut params.flock.cohesion_max_gain, Params::get_gain_range()).text("Cohesion Max Gain"));
                ui.add(egui::Slider::new(&mut params.flock.alignment_radius, Params::get_radius_range()).text("Alignment Radius"));
                ui.add(egui::Slider::new(&mut params.flock.alignment_gain, Params::get_gain_range()).text("Alignment Gain"));
                ui.add(egui::Slider::new(&mut params.flock.boundary_margin, Params::get_margin_range()).text("Edge Margin"));
                ui.add(egui::Slider::new(&mut params.flock.boundary_gain, Params::get_gain_range()).text("Edge Gain"));
            });

            ui.collapsing("Bubbles", |ui| {
                ui.add(egui::Slider::new(&mut params.num_bubbles, Params::get_num_bubbles_range()).text("Number of Bubbles"));
                ui.add(egui::Slider::new(&mut params.bubbles.max_bubbles, Params::get_num_bubbles_range()).text("Spawn Cap"));
                ui.add(egui::Slider::new(&mut params.bubbles.spawn_chance, Params::get_spawn_chance_range()).text("Spawn Chance"));
            });

            ui.collapsing("Performance", |ui| {
                ui.add(egui::Slider::new(&mut params.target_fps, Params::get_target_fps_range()).text("Target FPS"));

                ui.separator();

                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
                ui.label(format!("Ticks: {} ({:.0}% of frames)", debug_info.ticks, debug_info.tick_ratio() * 100.0));
                ui.label(renderer::last_step_label(debug_info.last_step));
                ui.label(format!("Boids: {}  Bubbles: {}", boid_count, bubble_count));
            });

            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
        });

    (should_reset, params.detect_changes())
}
