/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct with the timing figures and
 * counters shown in the UI and in the on-screen overlay:
 * - FPS and frame time of the window
 * - Ticks run and frames skipped by the throttle
 * - Length of the last simulation step
 */

use std::time::Duration;

#[derive(Clone, Debug, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub ticks: u64,
    pub skipped_frames: u64,
    pub last_step: Option<f32>,
}

impl DebugInfo {
    pub fn record_tick(&mut self, seconds: f32) {
        self.ticks += 1;
        self.last_step = Some(seconds);
    }

    pub fn record_skip(&mut self) {
        self.skipped_frames += 1;
    }

    // Share of frames that ran a tick
    pub fn tick_ratio(&self) -> f32 {
        let total = self.ticks + self.skipped_frames;
        if total == 0 {
            0.0
        } else {
            self.ticks as f32 / total as f32
        }
    }
}
