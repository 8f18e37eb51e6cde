//! Soccer Sim - simulation core for a third-person kickabout demo
//!
//! Core modules:
//! - `sim`: Deterministic simulation (avatar movement, ball physics, collisions)
//! - `tuning`: Data-driven constants
//! - `autopilot`: Idle/demo mode input
//! - `wasm`: Browser bindings for the rendering host

pub mod autopilot;
pub mod error;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use error::{SimError, SimResult};
pub use tuning::SimTuning;

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Nominal frame time used by headless runs (60 Hz)
    pub const DEFAULT_DT: f32 = 1.0 / 60.0;

    /// Avatar spawn point (on the ground, facing -z)
    pub const AVATAR_START: Vec3 = Vec3::new(0.0, 0.0, 5.0);
    /// Ball spawn point, dropped a little above the grass
    pub const BALL_START: Vec3 = Vec3::new(0.0, 0.5, 3.0);
}
