//! Platform abstraction layer
//!
//! Host-side pieces that don't depend on the browser:
//! - Frame timing (delta clamping, FPS)
//! - Loop lifecycle (stop handle checked at the top of every frame)

use std::cell::Cell;
use std::rc::Rc;

use crate::consts::{MAX_FRAME_DELTA_MS, NOMINAL_FRAME_MS};

/// Number of frames averaged for the FPS readout
const FPS_WINDOW: usize = 60;

/// Shared stop flag for a self-rescheduling frame loop.
///
/// Clones observe the same flag. Once stopped, a handle stays stopped.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stopped: Rc<Cell<bool>>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.stopped.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }

    /// Run one frame of the loop unless stopped.
    ///
    /// Returns whether the next frame should be scheduled. A stop requested
    /// while `frame` runs also ends the loop.
    pub fn run_frame(&self, frame: impl FnOnce()) -> bool {
        if self.is_stopped() {
            return false;
        }
        frame();
        !self.is_stopped()
    }
}

/// Turns animation-frame timestamps into simulation deltas
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_time: Option<f64>,
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    frames_seen: usize,
    fps: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_time: None,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            frames_seen: 0,
            fps: 0,
        }
    }

    /// Record a frame at `time_ms` and return the delta to simulate.
    ///
    /// The first frame uses a nominal delta; later deltas are clamped to
    /// `[0, MAX_FRAME_DELTA_MS]`.
    pub fn frame(&mut self, time_ms: f64) -> f64 {
        let dt = match self.last_time {
            Some(last) => (time_ms - last).clamp(0.0, MAX_FRAME_DELTA_MS),
            None => NOMINAL_FRAME_MS,
        };
        self.last_time = Some(time_ms);

        // FPS from the oldest to the newest frame in the window
        let oldest_time = self.frame_times[self.frame_index];
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        self.frames_seen += 1;
        if self.frames_seen > FPS_WINDOW {
            let elapsed = time_ms - oldest_time;
            if elapsed > 0.0 {
                self.fps = (FPS_WINDOW as f64 * 1000.0 / elapsed).round() as u32;
            }
        }

        dt
    }

    /// Frames per second over the last window (0 until the window fills)
    pub fn fps(&self) -> u32 {
        self.fps
    }
}
