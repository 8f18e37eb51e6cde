//! Simulation state shared by the avatar and ball steps
//!
//! The frame loop owns one `SimState` and lends it to each step in turn.
//! `avatar_position` is the copy the ball collides against; it is written
//! after the avatar moves and before the ball step of the same frame.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::avatar::AvatarState;
use super::ball::{BallSpin, BallState};
use super::collision::Aabb;
use crate::consts::{AVATAR_START, BALL_START};
use crate::error::SimResult;
use crate::tuning::SimTuning;

/// Complete session state (serializable for snapshots)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimState {
    pub avatar: AvatarState,
    pub ball: BallState,
    /// Avatar position as seen by the ball
    pub avatar_position: Vec3,
    /// Visual ball rotation
    #[serde(default)]
    pub spin: BallSpin,
    /// Frames simulated so far
    pub frame: u64,
    /// Seconds simulated so far
    pub elapsed: f64,
}

impl SimState {
    pub fn new() -> Self {
        Self::with_positions(AVATAR_START, BALL_START)
    }

    pub fn with_positions(avatar: Vec3, ball: Vec3) -> Self {
        Self {
            avatar: AvatarState::new(avatar),
            ball: BallState::new(ball),
            avatar_position: avatar,
            spin: BallSpin::default(),
            frame: 0,
            elapsed: 0.0,
        }
    }

    /// Copy the avatar's position to where the ball step reads it
    pub fn publish_avatar(&mut self) {
        self.avatar_position = self.avatar.position;
    }

    /// Box the ball collides with, built from the published avatar position
    pub fn avatar_contact_box(&self, tuning: &SimTuning) -> Aabb {
        let size = tuning.avatar_contact_size;
        Aabb::from_size(self.avatar_position + Vec3::new(0.0, size.y / 2.0, 0.0), size)
    }

    pub fn avatar_transform(&self) -> AvatarTransform {
        AvatarTransform {
            position: self.avatar.position,
            heading: self.avatar.heading,
            is_moving: self.avatar.is_moving,
            is_kicking: self.avatar.is_kicking,
        }
    }

    pub fn ball_transform(&self) -> BallTransform {
        BallTransform {
            position: self.ball.position,
            velocity: self.ball.velocity,
            spin: self.spin,
        }
    }

    pub fn snapshot_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn restore_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for SimState {
    fn default() -> Self {
        Self::new()
    }
}

/// What the presentation layer needs to place and animate the avatar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AvatarTransform {
    pub position: Vec3,
    pub heading: f32,
    pub is_moving: bool,
    pub is_kicking: bool,
}

/// What the presentation layer needs to place and spin the ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallTransform {
    pub position: Vec3,
    pub velocity: Vec3,
    pub spin: BallSpin,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layout() {
        let state = SimState::new();
        assert_eq!(state.avatar.position, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(state.avatar_position, state.avatar.position);
        assert_eq!(state.ball.position, Vec3::new(0.0, 0.5, 3.0));
        assert!(state.ball.is_at_rest());
        assert_eq!(state.frame, 0);
    }

    #[test]
    fn test_contact_box_follows_published_position() {
        let tuning = SimTuning::default();
        let mut state = SimState::new();
        state.avatar.position = Vec3::new(1.0, 0.0, 1.0);

        // Not yet published
        assert_eq!(state.avatar_contact_box(&tuning).center, Vec3::new(0.0, 0.75, 5.0));

        state.publish_avatar();
        let b = state.avatar_contact_box(&tuning);
        assert_eq!(b.center, Vec3::new(1.0, 0.75, 1.0));
        assert_eq!(b.half_extents, Vec3::new(0.25, 0.75, 0.125));
    }

    #[test]
    fn test_snapshot_restore() {
        let mut state = SimState::new();
        state.ball.velocity = Vec3::new(1.0, 2.0, 3.0);
        state.avatar.heading = 0.7;
        state.frame = 42;

        let json = state.snapshot_json().unwrap();
        let restored = SimState::restore_json(&json).unwrap();
        assert_eq!(restored, state);

        assert!(SimState::restore_json("{}").is_err());
    }

    #[test]
    fn test_transforms() {
        let mut state = SimState::new();
        state.avatar.is_kicking = true;
        state.ball.velocity = Vec3::X;

        let avatar = state.avatar_transform();
        assert!(avatar.is_kicking);
        assert_eq!(avatar.position, state.avatar.position);

        let ball = state.ball_transform();
        assert_eq!(ball.velocity, Vec3::X);
    }
}
