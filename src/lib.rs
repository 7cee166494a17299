/*
 * Boid School Simulation - Module Definitions
 *
 * This file defines the module structure for the school simulation.
 * The simulation core (angle, boid, rules, bubble, physics, params)
 * has no knowledge of windows or drawing; the app, renderer and ui
 * modules are the nannou harness that drives it once per frame.
 */

// Re-export key components for easier access
pub use boid::{Boid, TrailPoint};
pub use bubble::Bubble;
pub use debug::DebugInfo;
pub use error::SimError;
pub use params::{BubbleParams, FlockParams, SimulationParams};
pub use physics::{Bounds, TimeStep};
pub use rules::BoidState;
pub use timing::{FrameDecision, FrameThrottle};

// Define modules
pub mod angle;
pub mod app;
pub mod boid;
pub mod bubble;
pub mod debug;
pub mod error;
pub mod params;
pub mod physics;
pub mod renderer;
pub mod rules;
pub mod timing;
pub mod ui;

// Constants
pub const DEFAULT_BOID_SIZE: f32 = 10.0;
