//! Drone playback along the traced path.
//!
//! The host drives this once per frame with the measured frame interval; the
//! running flag is checked on every step, so stopping takes effect on the
//! next frame without any cancellation bookkeeping.

use glam::DVec3;

use crate::path::CatmullRom;

/// Default speed multiplier
pub const DEFAULT_SPEED: f64 = 5.0;

/// Progress per second per speed unit
const PROGRESS_RATE: f64 = 0.048;

/// Forward offset used to estimate the turning rate for banking
const BANK_LOOKAHEAD: f64 = 0.01;

/// Bank angle per unit of cross-track turning rate
const BANK_FACTOR: f64 = 2.5;

/// Where the drone is and how it is oriented this frame
#[derive(Debug, Clone, Copy)]
pub struct DronePose {
    pub position: DVec3,
    /// Unit tangent the drone faces along
    pub forward: DVec3,
    /// Roll about the forward axis, radians
    pub roll: f64,
}

/// Playback state. `progress` survives stop/start so a restarted run
/// resumes where it left off rather than from zero.
pub struct AnimationState {
    running: bool,
    progress: f64,
    pub speed: f64,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            running: false,
            progress: 0.0,
            speed: DEFAULT_SPEED,
        }
    }
}

impl AnimationState {
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Normalized position along the path, always in [0, 1)
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Begin playback. Gating on path length is the controller's job.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop playback. The drone instance disappears; `progress` is kept.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advance by one frame of `dt` seconds, wrapping modulo 1
    pub fn advance(&mut self, dt: f64) {
        self.progress = (self.progress + self.speed * PROGRESS_RATE * dt).rem_euclid(1.0);
    }

    /// Sample the drone pose at the current progress
    pub fn pose(&self, curve: &CatmullRom) -> DronePose {
        let position = curve.sample_at(self.progress);
        let forward = curve.tangent_at(self.progress);
        let ahead = curve.tangent_at((self.progress + BANK_LOOKAHEAD).min(0.999));
        let roll = forward.cross(ahead).y * BANK_FACTOR;
        DronePose {
            position,
            forward,
            roll,
        }
    }
}
