/*
 * Error Module
 *
 * The simulation core has almost no failure surface: numeric edge cases
 * are handled by policy inside the rules. What remains are caller
 * contract violations caught at the boundary (time steps, bounds,
 * parameter values) and parameter files that cannot be read.
 */

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f32),

    #[error("bounds must be positive and finite, got {width}x{height}")]
    InvalidBounds { width: f32, height: f32 },

    #[error("parameter `{name}` has invalid value {value}")]
    InvalidParameter { name: &'static str, value: f32 },

    #[error("could not load parameters: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SimError>;
