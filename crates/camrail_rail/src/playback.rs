// SPDX-License-Identifier: MIT OR Apache-2.0
//! Playback of a camera rail over wall-clock time.

use crate::control_point::CameraPose;
use crate::rail::CameraRail;

/// Default time to travel the whole rail, in seconds
pub const DEFAULT_DURATION: f32 = 10.0;

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Stopped
    #[default]
    Stopped,
    /// Playing forward
    Playing,
    /// Paused
    Paused,
}

/// Drives progress `t` along a rail
#[derive(Debug, Clone)]
pub struct PlaybackController {
    /// Current progress in `[0, 1]`
    progress: f32,
    /// Playback state
    pub state: PlaybackState,
    /// Seconds to travel from `t = 0` to `t = 1`
    pub duration: f32,
    /// Playback speed multiplier
    pub speed: f32,
    /// Wrap around instead of stopping at the end
    pub looping: bool,
}

impl PlaybackController {
    /// Create a new playback controller
    pub fn new(duration: f32) -> Self {
        Self {
            progress: 0.0,
            state: PlaybackState::Stopped,
            duration,
            speed: 1.0,
            looping: false,
        }
    }

    /// Set looping
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Update playback with delta time in seconds
    pub fn update(&mut self, delta_time: f32) {
        if self.state != PlaybackState::Playing {
            return;
        }

        if self.duration <= 0.0 {
            self.progress = 1.0;
            self.finish();
            return;
        }

        let step = delta_time * self.speed / self.duration;
        if !step.is_finite() {
            tracing::warn!("Ignoring non-finite playback step (dt = {}, speed = {})", delta_time, self.speed);
            return;
        }

        self.progress += step;
        self.check_bounds();
    }

    /// Keep progress in `[0, 1]`, wrapping or stopping at either end
    fn check_bounds(&mut self) {
        if (0.0..1.0).contains(&self.progress) {
            return;
        }

        if self.looping {
            let wrapped = self.progress.rem_euclid(1.0);
            // rem_euclid rounds tiny negatives up to exactly 1.0
            self.progress = if wrapped >= 1.0 { 0.0 } else { wrapped };
        } else {
            self.progress = self.progress.clamp(0.0, 1.0);
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.state = PlaybackState::Stopped;
        tracing::debug!("Rail playback reached the end");
    }

    /// Current progress
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Pose at the current progress, `None` while the rail is empty
    pub fn pose(&self, rail: &CameraRail) -> Option<CameraPose> {
        rail.get_pose(self.progress)
    }

    /// Play from current position, restarting if already at the end
    pub fn play(&mut self) {
        if self.progress >= 1.0 && !self.looping {
            self.progress = 0.0;
        }
        self.state = PlaybackState::Playing;
    }

    /// Pause playback
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    /// Stop and reset to the beginning
    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
        self.progress = 0.0;
    }

    /// Toggle play/pause
    pub fn toggle_playback(&mut self) {
        match self.state {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Paused | PlaybackState::Stopped => self.play(),
        }
    }

    /// Seek to a progress value
    pub fn seek(&mut self, t: f32) {
        self.progress = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    }

    /// Is currently playing
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION)
    }
}
