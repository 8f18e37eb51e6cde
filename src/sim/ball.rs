//! Ball physics: gravity, per-frame drag, bounces
//!
//! The ball moves with the velocity it had at the start of the frame, then
//! velocity picks up gravity and drag. Drag is a flat multiplier per frame,
//! so slower frame rates slow the ball less per second.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collision::{
    Aabb, Restitution, apply_push, clamp_to_walls, first_contact, resolve_sphere_box,
};
use super::world::World;
use crate::consts::BALL_START;
use crate::tuning::SimTuning;

/// Floor rebounds shorter than this many frames of flight are absorbed
const FLOOR_ABSORB_FRAMES: f32 = 6.0;

/// Physical ball state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    pub position: Vec3,
    pub velocity: Vec3,
}

impl BallState {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
        }
    }

    pub fn is_at_rest(&self) -> bool {
        self.velocity == Vec3::ZERO
    }

    /// External impulse: replaces the velocity outright
    pub fn kick(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    /// Advance one frame.
    ///
    /// `avatar_box` is where the avatar stands this frame; it is checked
    /// after every obstacle and only if none of them was hit.
    pub fn step(
        &mut self,
        avatar_box: Option<&Aabb>,
        world: &World,
        tuning: &SimTuning,
        dt: f32,
    ) -> BallStep {
        let mut report = BallStep::default();
        let restitution = Restitution {
            horizontal: tuning.restitution_horizontal,
            vertical: tuning.restitution_vertical,
        };
        let floor_height = tuning.ball_rest_height();

        let mut position = self.position + self.velocity * dt;
        let mut velocity = Vec3::new(
            self.velocity.x * tuning.drag_per_frame,
            self.velocity.y - tuning.gravity * dt,
            self.velocity.z * tuning.drag_per_frame,
        );

        if position.y <= floor_height && velocity.y < 0.0 {
            // Rolling along the floor is not an impact
            if self.position.y > floor_height {
                report.floor_impact_speed = Some(-velocity.y);
            }
            position.y = floor_height;
            velocity.y = -velocity.y * restitution.vertical;
            // A hop that would land again within six frames is absorbed
            if velocity.y < FLOOR_ABSORB_FRAMES * 0.5 * tuning.gravity * dt {
                velocity.y = 0.0;
            }
        }

        report.wall_bounce = clamp_to_walls(
            &mut position,
            &mut velocity,
            tuning.ball_radius,
            world.bounds(),
            restitution.horizontal,
        );

        let obstacle_hit = first_contact(
            position,
            velocity,
            tuning.ball_radius,
            world.obstacles(),
            restitution,
        )
        .map(|(index, contact)| (BallContact::Obstacle(index), contact));

        let hit = obstacle_hit.or_else(|| {
            avatar_box
                .and_then(|b| {
                    resolve_sphere_box(position, velocity, tuning.ball_radius, b, restitution)
                })
                .map(|contact| (BallContact::Avatar, apply_push(contact, tuning.avatar_push)))
        });

        if let Some((kind, contact)) = hit {
            log::trace!("Ball contact {:?} on {:?}", kind, contact.axis);
            position = contact.position;
            velocity = contact.velocity;
            report.contact = Some(kind);

            // Squeezed against a wall: the wall wins
            report.wall_bounce |= clamp_to_walls(
                &mut position,
                &mut velocity,
                tuning.ball_radius,
                world.bounds(),
                restitution.horizontal,
            );
        }

        // A box contact may push down; never below the floor
        position.y = position.y.max(floor_height);

        let settling = velocity.abs().cmplt(Vec3::splat(tuning.rest_speed)).all()
            && position.y <= tuning.rest_height;
        if settling {
            report.came_to_rest = !self.is_at_rest();
            velocity = Vec3::ZERO;
        }

        self.position = position;
        self.velocity = velocity;
        report
    }
}

impl Default for BallState {
    fn default() -> Self {
        Self::new(BALL_START)
    }
}

/// What the ball touched this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallContact {
    Obstacle(usize),
    Avatar,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BallStep {
    /// Downward speed when an airborne ball hit the floor
    pub floor_impact_speed: Option<f32>,
    pub wall_bounce: bool,
    pub contact: Option<BallContact>,
    /// Velocity snapped to zero this frame
    pub came_to_rest: bool,
}

/// Accumulated mesh rotation (presentation only)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BallSpin {
    /// Rotation about x (radians)
    pub pitch: f32,
    /// Rotation about y (radians)
    pub yaw: f32,
}

impl BallSpin {
    /// Spin proportional to horizontal velocity
    pub fn advance(&mut self, velocity: Vec3, dt: f32, factor: f32) {
        self.yaw += velocity.x * dt * factor;
        self.pitch += velocity.z * dt * factor;
    }
}
