//! # Application State Management
//!
//! This module holds the per-frame state owned by the top-level loop. Nothing in the
//! voxel core reads it; it is passed by reference into the functions that update it.

use std::time::Duration;

use web_time::Instant;

use crate::engine_state::rendering::meshing::MeshStats;
use crate::engine_state::EngineState;

/// Frame timing and draw statistics for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Frames per second measured over the last frame.
    pub fps: f64,
    /// Duration of the last frame, in seconds.
    pub dt: f64,
    /// Frame rate the loop aims for.
    pub target_fps: f64,
    /// Indexed draws issued for the last frame.
    pub draw_calls: usize,
}

impl FrameContext {
    /// A context before the first frame.
    pub fn new(target_fps: f64) -> Self {
        FrameContext {
            fps: 0.0,
            dt: 0.0,
            target_fps,
            draw_calls: 0,
        }
    }

    /// The frame budget implied by `target_fps`.
    pub fn frame_budget(&self) -> Option<Duration> {
        (self.target_fps > 0.0).then(|| Duration::from_secs_f64(1.0 / self.target_fps))
    }
}

/// Records a finished frame into `frame`.
///
/// # Arguments
/// * `frame` - The context to update
/// * `dt` - Time spent on the frame
/// * `stats` - The meshes drawn during the frame
pub fn record_frame(frame: &mut FrameContext, dt: Duration, stats: &MeshStats) {
    frame.dt = dt.as_secs_f64();
    frame.fps = if frame.dt > 0.0 { 1.0 / frame.dt } else { 0.0 };
    frame.draw_calls = stats.draw_calls;
}

/// The application: the engine plus the frame context of the running loop.
pub struct ApplicationState {
    /// The voxel engine
    pub engine_state: EngineState,
    /// Timing and statistics of the last frame
    pub frame: FrameContext,
    /// When the last frame ended
    last_frame: Instant,
}

impl ApplicationState {
    /// Wraps an engine for a loop aiming at `target_fps`.
    pub fn new(engine_state: EngineState, target_fps: f64) -> Self {
        ApplicationState {
            engine_state,
            frame: FrameContext::new(target_fps),
            last_frame: Instant::now(),
        }
    }

    /// Runs one frame: every non-empty bucket of every slice counts as one draw.
    ///
    /// # Returns
    /// The updated frame context.
    pub fn frame(&mut self) -> FrameContext {
        let stats = self.engine_state.mesh_stats();
        let now = Instant::now();
        record_frame(&mut self.frame, now - self.last_frame, &stats);
        self.last_frame = now;
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_frame_derives_fps_from_dt() {
        let mut frame = FrameContext::new(60.0);
        let stats = MeshStats {
            draw_calls: 12,
            ..MeshStats::default()
        };
        record_frame(&mut frame, Duration::from_millis(20), &stats);
        assert!((frame.fps - 50.0).abs() < 1e-9);
        assert_eq!(frame.draw_calls, 12);
        assert_eq!(frame.target_fps, 60.0);
    }

    #[test]
    fn zero_length_frame_has_no_fps() {
        let mut frame = FrameContext::new(0.0);
        record_frame(&mut frame, Duration::ZERO, &MeshStats::default());
        assert_eq!(frame.fps, 0.0);
        assert_eq!(frame.frame_budget(), None);
    }
}
