//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per frame, run to completion
//! - Avatar before ball within a frame
//! - Stable obstacle iteration order
//! - No rendering or platform dependencies

pub mod avatar;
pub mod ball;
pub mod collision;
pub mod state;
pub mod tick;
pub mod world;

pub use avatar::{AvatarState, AvatarStep, MoveInput, forward_for, heading_for};
pub use ball::{BallContact, BallSpin, BallState, BallStep};
pub use collision::{
    Aabb, Axis, Blocker, Contact, Restitution, apply_push, clamp_to_walls, first_contact,
    footprint_blocked, least_penetration_axis, resolve_point_box, resolve_sphere_box,
};
pub use state::{AvatarTransform, BallTransform, SimState};
pub use tick::{FrameClock, TickInput, TickReport, clamp_frame_dt, tick};
pub use world::{World, WorldBounds};
