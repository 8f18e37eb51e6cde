//! Data-driven simulation constants
//!
//! Every designer-chosen number lives here so a host can tweak feel without
//! touching the step functions. Defaults reproduce the shipped demo.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimTuning {
    // === Avatar ===
    /// Walking speed (units/second)
    pub avatar_speed: f32,
    /// Ground height the avatar is pinned to
    pub ground_height: f32,
    /// Avatar box used against scenery (width, height, depth)
    pub avatar_size: Vec3,
    /// Avatar box the ball bounces off (width, height, depth)
    pub avatar_contact_size: Vec3,

    // === Kick ===
    /// Maximum horizontal avatar-to-ball distance for a kick
    pub kick_range: f32,
    /// Kick impulse magnitude
    pub kick_force: f32,
    /// Vertical component of the kick direction before scaling
    pub kick_lift: f32,
    /// Extra vertical velocity added after scaling
    pub kick_bonus_lift: f32,
    /// Seconds before another kick is allowed
    pub kick_cooldown: f32,
    /// Seconds the kick pose stays active
    pub kick_anim_duration: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub gravity: f32,
    /// Horizontal velocity multiplier applied once per frame
    pub drag_per_frame: f32,
    /// Restitution on x/z contacts
    pub restitution_horizontal: f32,
    /// Restitution on y contacts
    pub restitution_vertical: f32,
    /// Lateral velocity the avatar adds when it bumps the ball
    pub avatar_push: f32,
    /// Below this speed on every axis the ball may come to rest
    pub rest_speed: f32,
    /// Ball must be at or under this height to come to rest
    pub rest_height: f32,
    /// Visual spin per unit of horizontal velocity
    pub spin_factor: f32,

    // === Clock ===
    /// Longest frame delta the clock will hand to the simulation
    pub max_frame_dt: f32,
}

impl Default for SimTuning {
    fn default() -> Self {
        Self {
            avatar_speed: 3.0,
            ground_height: 0.0,
            avatar_size: Vec3::new(0.5, 1.0, 0.25),
            avatar_contact_size: Vec3::new(0.5, 1.5, 0.25),

            kick_range: 1.5,
            kick_force: 10.0,
            kick_lift: 0.2,
            kick_bonus_lift: 0.1,
            kick_cooldown: 0.5,
            kick_anim_duration: 0.3,

            ball_radius: 0.25,
            gravity: 9.8,
            drag_per_frame: 0.98,
            restitution_horizontal: 0.8,
            restitution_vertical: 0.6,
            avatar_push: 2.0,
            rest_speed: 0.01,
            rest_height: 0.51,
            spin_factor: 0.5,

            max_frame_dt: 0.1,
        }
    }
}

impl SimTuning {
    /// Resting height of the ball centre above the ground
    pub fn ball_rest_height(&self) -> f32 {
        self.ground_height + self.ball_radius
    }

    /// Check every value is usable
    pub fn validate(&self) -> SimResult<()> {
        let positive = [
            ("avatar_speed", self.avatar_speed),
            ("avatar_size.x", self.avatar_size.x),
            ("avatar_size.y", self.avatar_size.y),
            ("avatar_size.z", self.avatar_size.z),
            ("avatar_contact_size.x", self.avatar_contact_size.x),
            ("avatar_contact_size.y", self.avatar_contact_size.y),
            ("avatar_contact_size.z", self.avatar_contact_size.z),
            ("kick_range", self.kick_range),
            ("kick_force", self.kick_force),
            ("kick_cooldown", self.kick_cooldown),
            ("kick_anim_duration", self.kick_anim_duration),
            ("ball_radius", self.ball_radius),
            ("max_frame_dt", self.max_frame_dt),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimError::InvalidTuning { field, value });
            }
        }

        let unit = [
            ("drag_per_frame", self.drag_per_frame),
            ("restitution_horizontal", self.restitution_horizontal),
            ("restitution_vertical", self.restitution_vertical),
        ];
        for (field, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(SimError::InvalidTuning { field, value });
            }
        }

        let finite = [
            ("ground_height", self.ground_height),
            ("kick_lift", self.kick_lift),
            ("kick_bonus_lift", self.kick_bonus_lift),
            ("gravity", self.gravity),
            ("avatar_push", self.avatar_push),
            ("rest_speed", self.rest_speed),
            ("rest_height", self.rest_height),
            ("spin_factor", self.spin_factor),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(SimError::InvalidTuning { field, value });
            }
        }

        Ok(())
    }

    /// Parse and validate a JSON document (missing fields take defaults)
    pub fn from_json(json: &str) -> SimResult<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Write tuning to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> SimResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        log::info!("Tuning saved to {}", path.display());
        Ok(())
    }
}
