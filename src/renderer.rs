/*
 * Renderer Module
 *
 * This module draws the simulation state. The simulation uses screen
 * coordinates (origin top-left, y down, heading 0 = up); nannou draws
 * with the origin at the window centre and y up, so every position
 * goes through `to_screen` first.
 *
 * Draw order: water, bubbles, trails, boids, debug overlay, UI.
 */

use nannou::prelude::*;
use tracing::warn;

use crate::app::Model;
use crate::boid::Boid;
use crate::bubble::Bubble;
use crate::physics::Bounds;

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let window_rect = app.window_rect();

    draw.background().color(rgb(0.01, 0.05, 0.12));

    for bubble in &model.bubbles {
        draw_bubble(&draw, bubble, window_rect);
    }

    for boid in &model.boids {
        draw_trail(&draw, boid, model.bounds, window_rect);
    }

    for boid in &model.boids {
        draw_boid(&draw, boid, window_rect);
    }

    if model.params.show_debug {
        draw_debug(&draw, model, window_rect);
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        warn!(?err, "failed to draw the scene");
    }
    if let Err(err) = model.egui.draw_to_frame(&frame) {
        warn!(?err, "failed to draw the UI");
    }
}

// Simulation coordinates to nannou coordinates
pub fn to_screen(position: Vec2, window_rect: Rect) -> Point2 {
    pt2(window_rect.left() + position.x, window_rect.top() - position.y)
}

// Layered discs fake a radial gradient, brightest in the middle
fn draw_bubble(draw: &Draw, bubble: &Bubble, window_rect: Rect) {
    let center = to_screen(bubble.position, window_rect);
    let radius = bubble.radius();
    let opacity = bubble.opacity();

    const LAYERS: usize = 4;
    for layer in 0..LAYERS {
        let t = layer as f32 / LAYERS as f32;
        draw.ellipse()
            .xy(center)
            .radius(radius * (1.0 - t * 0.6))
            .color(rgba(0.6, 0.8, 1.0, opacity * (0.25 + t * 0.25)));
    }

    draw.ellipse()
        .xy(center)
        .radius(radius)
        .no_fill()
        .stroke_weight(1.0)
        .stroke(rgba(0.8, 0.9, 1.0, opacity));

    // Highlight
    draw.ellipse()
        .xy(center + vec2(-radius * 0.35, radius * 0.35))
        .radius(radius * 0.2)
        .color(rgba(1.0, 1.0, 1.0, opacity));
}

// Fading polyline through the trail. Segments that jump across a wrap are skipped.
fn draw_trail(draw: &Draw, boid: &Boid, bounds: Bounds, window_rect: Rect) {
    let (r, g, b) = color_components(boid);
    let max_jump = bounds.width().min(bounds.height()) / 2.0;

    let trail = boid.trail();
    for (older, newer) in trail.iter().zip(trail.iter().skip(1)) {
        if older.position.distance(newer.position) > max_jump {
            continue;
        }
        draw.line()
            .start(to_screen(older.position, window_rect))
            .end(to_screen(newer.position, window_rect))
            .weight(boid.size * 0.2)
            .color(rgba(r, g, b, older.alpha * 0.5));
    }
}

// Triangle with its nose along the heading
fn draw_boid(draw: &Draw, boid: &Boid, window_rect: Rect) {
    let half = boid.size / 2.0;
    let points = [pt2(0.0, half), pt2(-half, -half), pt2(half, -half)];

    draw.polygon()
        .color(boid.color)
        .points(points)
        .xy(to_screen(boid.position, window_rect))
        // Headings turn clockwise, nannou rotates counter-clockwise
        .rotate(-boid.heading.to_radians());
}

fn color_components(boid: &Boid) -> (f32, f32, f32) {
    (
        boid.color.red as f32 / 255.0,
        boid.color.green as f32 / 255.0,
        boid.color.blue as f32 / 255.0,
    )
}

// Perception radii of the first boid and a text summary
fn draw_debug(draw: &Draw, model: &Model, window_rect: Rect) {
    if let Some(first_boid) = model.boids.first() {
        let center = to_screen(first_boid.position, window_rect);
        let flock = &model.params.flock;

        // Separation radius
        draw.ellipse()
            .xy(center)
            .radius(flock.separation_radius)
            .no_fill()
            .stroke(RED)
            .stroke_weight(1.0);

        // Alignment radius
        draw.ellipse()
            .xy(center)
            .radius(flock.alignment_radius)
            .no_fill()
            .stroke(GREEN)
            .stroke_weight(1.0);

        // Cohesion radius
        draw.ellipse()
            .xy(center)
            .radius(flock.cohesion_radius)
            .no_fill()
            .stroke(BLUE)
            .stroke_weight(1.0);

        // Heading
        let direction = crate::angle::heading_to_vector(first_boid.heading);
        draw.arrow()
            .start(center)
            .end(center + vec2(direction.x, -direction.y) * first_boid.size * 3.0)
            .color(YELLOW)
            .stroke_weight(2.0);
    }

    let lines = [
        format!("FPS: {:.1}", model.debug_info.fps),
        format!("Frame time: {:.2} ms", model.debug_info.frame_time.as_secs_f64() * 1000.0),
        format!("Boids: {}", model.boids.len()),
        format!("Bubbles: {}", model.bubbles.len()),
        format!("Ticks: {}  Skipped: {}", model.debug_info.ticks, model.debug_info.skipped_frames),
        format!("World: {:.0}x{:.0}", model.bounds.width(), model.bounds.height()),
        last_step_label(model.debug_info.last_step),
    ];
    for (i, line) in lines.iter().enumerate() {
        draw.text(line)
            .x_y(window_rect.left() + 100.0, window_rect.top() - 20.0 * (i as f32 + 1.0))
            .color(WHITE)
            .font_size(14);
    }
}

pub fn last_step_label(last_step: Option<f32>) -> String {
    match last_step {
        Some(seconds) => format!("Last step: {:.1} ms", seconds * 1000.0),
        None => "Last step: -".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_step_is_shown_in_milliseconds() {
        assert_eq!(last_step_label(None), "Last step: -");
        assert_eq!(last_step_label(Some(0.025)), "Last step: 25.0 ms");
    }

    #[test]
    fn screen_mapping_flips_y_around_the_window_centre() {
        let rect = Rect::from_w_h(800.0, 600.0);
        assert_eq!(to_screen(pt2(0.0, 0.0), rect), pt2(-400.0, 300.0));
        assert_eq!(to_screen(pt2(400.0, 300.0), rect), pt2(0.0, 0.0));
        assert_eq!(to_screen(pt2(800.0, 600.0), rect), pt2(400.0, -300.0));
    }
}
