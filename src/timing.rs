/*
 * Timing Module
 *
 * Frame throttling for the app. The window asks for frames as fast as
 * it can; the throttle turns wall-clock time into either "skip this
 * frame" or one whole tick at roughly the target rate. A skipped frame
 * runs no simulation at all.
 */

use std::time::{Duration, Instant};

use crate::physics::TimeStep;

// Longest step handed to the simulation, so a stalled window does not teleport the school
const MAX_STEP: Duration = Duration::from_millis(250);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameDecision {
    Skip,
    Step(TimeStep),
}

#[derive(Clone, Debug)]
pub struct FrameThrottle {
    frame_interval: Duration,
    last_tick: Option<Instant>,
}

impl FrameThrottle {
    pub fn new(target_fps: f32) -> Self {
        Self {
            frame_interval: interval_for(target_fps),
            last_tick: None,
        }
    }

    pub fn set_target_fps(&mut self, target_fps: f32) {
        self.frame_interval = interval_for(target_fps);
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    // Forget the last tick, e.g. after a pause
    pub fn reset(&mut self) {
        self.last_tick = None;
    }

    pub fn poll(&mut self, now: Instant) -> FrameDecision {
        let Some(last) = self.last_tick else {
            // First frame only starts the clock
            self.last_tick = Some(now);
            return FrameDecision::Skip;
        };

        let elapsed = now.saturating_duration_since(last);
        if elapsed < self.frame_interval {
            return FrameDecision::Skip;
        }

        self.last_tick = Some(now);
        match TimeStep::from_duration(elapsed.min(MAX_STEP)) {
            Ok(dt) => FrameDecision::Step(dt),
            Err(_) => FrameDecision::Skip,
        }
    }
}

fn interval_for(target_fps: f32) -> Duration {
    if target_fps.is_finite() && target_fps > 0.0 {
        Duration::from_secs_f32(1.0 / target_fps)
    } else {
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_poll_only_starts_the_clock() {
        let mut throttle = FrameThrottle::new(30.0);
        assert_eq!(throttle.poll(Instant::now()), FrameDecision::Skip);
    }

    #[test]
    fn frames_inside_the_interval_are_skipped() {
        let start = Instant::now();
        let mut throttle = FrameThrottle::new(30.0);
        throttle.poll(start);

        assert_eq!(throttle.poll(start + Duration::from_millis(10)), FrameDecision::Skip);
        assert_eq!(throttle.poll(start + Duration::from_millis(20)), FrameDecision::Skip);

        match throttle.poll(start + Duration::from_millis(40)) {
            FrameDecision::Step(dt) => assert!((dt.seconds() - 0.040).abs() < 1e-6),
            FrameDecision::Skip => panic!("expected a step"),
        }

        // The clock restarted at the last step
        assert_eq!(throttle.poll(start + Duration::from_millis(50)), FrameDecision::Skip);
    }

    #[test]
    fn long_gaps_are_clamped() {
        let start = Instant::now();
        let mut throttle = FrameThrottle::new(30.0);
        throttle.poll(start);
        match throttle.poll(start + Duration::from_secs(5)) {
            FrameDecision::Step(dt) => assert_eq!(dt.seconds(), MAX_STEP.as_secs_f32()),
            FrameDecision::Skip => panic!("expected a step"),
        }
    }

    #[test]
    fn changing_the_rate_changes_the_interval() {
        let mut throttle = FrameThrottle::new(30.0);
        throttle.set_target_fps(60.0);
        assert!((throttle.frame_interval().as_secs_f32() - 1.0 / 60.0).abs() < 1e-6);

        throttle.reset();
        assert_eq!(throttle.poll(Instant::now()), FrameDecision::Skip);
    }
}
