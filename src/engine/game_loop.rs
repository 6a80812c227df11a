/// Game loop timing and control system
///
/// Ticks are gated on wall-clock time: a tick is due whenever the elapsed time,
/// measured in (fractional) frame periods, exceeds the number of ticks already
/// run. The first tick is due as soon as any time has passed.
/// At most one tick is granted per call, so a slow host runs the game slower
/// instead of bursting to catch up.
use std::time::{Duration, Instant};

use crate::core::config::FRAME_DURATION;

/// FPS tracking window (average over last N ticks)
const FPS_WINDOW_SIZE: usize = 60;

/// Game loop timing state
pub struct GameLoop {
    /// Time when the gate was (re)based
    start_time: Instant,

    /// Time of the last granted tick
    last_tick_time: Instant,

    /// When the current pause began
    paused_at: Option<Instant>,

    /// Tick timing history for FPS calculation
    tick_times: Vec<Duration>,

    /// Ticks granted so far
    frame_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f32,
}

impl GameLoop {
    /// Create a new game loop starting now
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a game loop whose clock starts at `start`
    pub fn starting_at(start: Instant) -> Self {
        Self {
            start_time: start,
            last_tick_time: start,
            paused_at: None,
            tick_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            current_fps: 0.0,
        }
    }

    /// Returns true when a tick is due now
    pub fn begin_frame(&mut self) -> bool {
        self.begin_frame_at(Instant::now())
    }

    /// Returns true when a tick is due at `now`, counting it
    pub fn begin_frame_at(&mut self, now: Instant) -> bool {
        if self.paused_at.is_some() {
            return false;
        }

        let elapsed = now.saturating_duration_since(self.start_time);
        if elapsed.as_nanos() <= self.frame_count as u128 * FRAME_DURATION.as_nanos() {
            return false;
        }

        self.frame_count += 1;

        self.tick_times
            .push(now.saturating_duration_since(self.last_tick_time));
        if self.tick_times.len() > FPS_WINDOW_SIZE {
            self.tick_times.remove(0);
        }
        self.last_tick_time = now;

        // Update FPS counter every 10 ticks
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        true
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total elapsed time since start
    pub fn elapsed(&self) -> Duration {
        Instant::now().saturating_duration_since(self.start_time)
    }

    /// Get total number of ticks granted
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Check if game is paused
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Pause the game
    pub fn pause(&mut self) {
        self.pause_at(Instant::now());
    }

    /// Resume the game
    pub fn resume(&mut self) {
        self.resume_at(Instant::now());
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        if self.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
    }

    fn pause_at(&mut self, now: Instant) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
            log::info!("Game paused at frame {}", self.frame_count);
        }
    }

    fn resume_at(&mut self, now: Instant) {
        if let Some(paused_at) = self.paused_at.take() {
            // Shift the clock by the paused span so the gate does not burst
            let paused_for = now.saturating_duration_since(paused_at);
            self.start_time += paused_for;
            self.last_tick_time += paused_for;
            log::info!("Game resumed after {:.2}s", paused_for.as_secs_f32());
        }
    }

    /// Update FPS calculation
    fn update_fps(&mut self) {
        if self.tick_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.tick_times.iter().sum();
        let avg_tick_time = total / self.tick_times.len() as u32;

        self.current_fps = if avg_tick_time.as_secs_f32() > 0.0 {
            1.0 / avg_tick_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
