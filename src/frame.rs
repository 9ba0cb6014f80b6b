//! The frame pump: the only place that knows about wall-clock time.

use std::time::Instant;

use orbit_core::orbit::scaled_time;

/// Monotonic clock feeding scaled time to the renderer once per tick.
pub struct FramePump {
    start: Instant,
}

impl FramePump {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Milliseconds since the pump started.
    pub fn elapsed_millis(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Scaled time for the current tick.
    pub fn tick(&self) -> f32 {
        scaled_time(self.elapsed_millis())
    }
}
