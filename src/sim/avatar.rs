//! Player avatar: ground-bound walking and kicking
//!
//! The avatar moves at constant speed in the direction of the held keys and
//! stops dead when the next position would clip scenery. Kicks are gated by
//! range and a cooldown; both timers count down per frame.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::collision::{Blocker, footprint_blocked};
use super::world::World;
use crate::tuning::SimTuning;

/// Directional and kick buttons sampled for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveInput {
    /// Toward -z
    pub forward: bool,
    /// Toward +z
    pub backward: bool,
    /// Toward -x
    pub left: bool,
    /// Toward +x
    pub right: bool,
    pub kick: bool,
}

impl MoveInput {
    /// Net (x, z) direction, each component -1, 0 or +1. Opposite keys cancel.
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.forward, self.backward))
    }
}

/// Heading (radians about +y) that faces along an (x, z) direction.
/// Heading 0 faces -z.
#[inline]
pub fn heading_for(direction: Vec2) -> f32 {
    (-direction.x).atan2(-direction.y)
}

/// Unit forward vector on the ground plane for a heading
#[inline]
pub fn forward_for(heading: f32) -> Vec3 {
    Vec3::new(-heading.sin(), 0.0, -heading.cos())
}

/// Avatar state, owned by the motion controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvatarState {
    pub position: Vec3,
    /// Facing angle (radians)
    pub heading: f32,
    pub is_moving: bool,
    /// Kick pose active
    pub is_kicking: bool,
    /// Seconds until the next kick is allowed (<= 0 means ready)
    pub kick_cooldown: f32,
    /// Seconds left on the kick pose
    pub kick_anim_remaining: f32,
}

impl AvatarState {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            heading: 0.0,
            is_moving: false,
            is_kicking: false,
            kick_cooldown: 0.0,
            kick_anim_remaining: 0.0,
        }
    }

    pub fn forward(&self) -> Vec3 {
        forward_for(self.heading)
    }

    /// Horizontal distance to a point
    pub fn ground_distance_to(&self, point: Vec3) -> f32 {
        Vec2::new(self.position.x - point.x, self.position.z - point.z).length()
    }

    pub fn can_kick(&self) -> bool {
        self.kick_cooldown <= 0.0
    }

    /// Kick velocity for the current heading
    pub fn kick_velocity(&self, tuning: &SimTuning) -> Vec3 {
        let dir = Vec3::new(-self.heading.sin(), tuning.kick_lift, -self.heading.cos());
        let mut velocity = dir * tuning.kick_force;
        velocity.y += tuning.kick_bonus_lift;
        velocity
    }

    /// Advance one frame.
    ///
    /// `ball_position` is the ball as of the start of this frame. A returned
    /// kick velocity must be applied to the ball before it is integrated.
    pub fn step(
        &mut self,
        input: &MoveInput,
        ball_position: Vec3,
        world: &World,
        tuning: &SimTuning,
        dt: f32,
    ) -> AvatarStep {
        let mut report = AvatarStep::default();

        self.position.y = tuning.ground_height;

        // Kick pose from an earlier frame runs out
        if self.kick_anim_remaining > 0.0 {
            self.kick_anim_remaining -= dt;
            if self.kick_anim_remaining <= 0.0 {
                self.kick_anim_remaining = 0.0;
                self.is_kicking = false;
            }
        }

        let direction = input.direction();
        self.is_moving = direction != Vec2::ZERO;

        if self.is_moving {
            self.heading = heading_for(direction.normalize());

            let candidate = self.position + self.forward() * (tuning.avatar_speed * dt);
            match footprint_blocked(world, candidate, tuning.avatar_size / 2.0) {
                Some(blocker) => {
                    log::trace!("Avatar move blocked by {:?}", blocker);
                    report.blocked = Some(blocker);
                }
                None => {
                    self.position = candidate;
                    report.moved = true;
                }
            }
        }

        if input.kick && self.can_kick() {
            let distance = self.ground_distance_to(ball_position);
            if distance < tuning.kick_range {
                let velocity = self.kick_velocity(tuning);
                log::debug!(
                    "Kick at distance {:.2}, heading {:.2} -> {:?}",
                    distance,
                    self.heading,
                    velocity
                );
                self.kick_cooldown = tuning.kick_cooldown;
                self.kick_anim_remaining = tuning.kick_anim_duration;
                self.is_kicking = true;
                report.kick = Some(velocity);
            }
        }

        if self.kick_cooldown > 0.0 {
            self.kick_cooldown -= dt;
        }

        report
    }
}

/// What happened to the avatar this frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AvatarStep {
    pub moved: bool,
    pub blocked: Option<Blocker>,
    /// Velocity to give the ball
    pub kick: Option<Vec3>,
}
