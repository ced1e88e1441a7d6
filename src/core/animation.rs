use glam::{Quat, Vec3};
use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;
use std::time::Instant;

use super::clock::AnimationClock;
use crate::math::Curve;

/// Local axis the character model faces along
pub const FORWARD: Vec3 = Vec3::NEG_Y;

/// Quarter turn about local X that stands the authored model upright
pub const UPRIGHT_CORRECTION: f32 = FRAC_PI_2;

/// Position and facing of the character for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
    pub progress: f32,
}

/// Idle until both a curve and a character exist, then running.
#[derive(Debug, Clone, Default)]
pub enum DriverState {
    #[default]
    Idle,
    Running { curve: Arc<Curve> },
}

/// Computes the character pose along the curve as a function of time.
///
/// Only `start` and `stop` mutate the driver. `pose_at` is read-only and
/// allocation-free so it can run at display-refresh rate.
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    clock: AnimationClock,
    state: DriverState,
}

impl AnimationDriver {
    pub fn new(clock: AnimationClock) -> Self {
        Self {
            clock,
            state: DriverState::Idle,
        }
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn state(&self) -> &DriverState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, DriverState::Running { .. })
    }

    /// Idle -> Running with the given curve
    pub fn start(&mut self, curve: Arc<Curve>) {
        self.state = DriverState::Running { curve };
    }

    /// Running -> Idle
    pub fn stop(&mut self) {
        self.state = DriverState::Idle;
    }

    /// Pose for wall-clock instant `now`, `None` while idle
    pub fn pose_at(&self, now: Instant) -> Option<Pose> {
        match &self.state {
            DriverState::Idle => None,
            DriverState::Running { curve } => Some(pose_on_curve(curve, self.clock.progress_at(now))),
        }
    }
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new(AnimationClock::default())
    }
}

/// Pose at arc-length fraction `progress` along `curve`
pub fn pose_on_curve(curve: &Curve, progress: f32) -> Pose {
    Pose {
        position: curve.point_at(progress),
        orientation: facing(curve.tangent_at(progress)),
        progress,
    }
}

/// Shortest-arc rotation from `FORWARD` to `tangent`, then the upright correction
pub fn facing(tangent: Vec3) -> Quat {
    let tangent = tangent.try_normalize().unwrap_or(FORWARD);
    Quat::from_rotation_arc(FORWARD, tangent) * Quat::from_rotation_x(UPRIGHT_CORRECTION)
}
