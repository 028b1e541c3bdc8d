//! Dashboard readout
//!
//! The canvas draws the dashboard strip; the text is laid over it by the
//! page, so this module only produces strings.

use crate::sim::SimulationState;

/// Text shown on the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub speed: String,
    pub curve: String,
}

impl Dashboard {
    pub fn from_state(state: &SimulationState) -> Self {
        Self {
            speed: format!("Speed: {:.1}", state.speed),
            curve: format!("Curve: {}", state.road.curve.floor() as i64),
        }
    }
}

/// Rolling frames-per-second estimate over the last 60 frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    /// Record a frame timestamp in milliseconds
    pub fn record(&mut self, time_ms: f64) {
        // The slot about to be written holds the sample from a full window ago
        let oldest = self.frame_times[self.frame_index];
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();

        if oldest > 0.0 {
            let elapsed = time_ms - oldest;
            if elapsed > 0.0 {
                self.fps = (self.frame_times.len() as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}
