//! Configuration and initialization errors
//!
//! The per-frame simulation never fails; everything here is raised while
//! building a world or loading tuning data.

use glam::Vec3;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Obstacle {index} has invalid half extents {half_extents:?} (need finite, > 0)")]
    InvalidObstacle { index: usize, half_extents: Vec3 },

    #[error("Obstacle {index} has a non-finite center {center:?}")]
    InvalidObstacleCenter { index: usize, center: Vec3 },

    #[error("Invalid arena bounds: floor size {floor_size}, wall thickness {wall_thickness}")]
    InvalidBounds { floor_size: f32, wall_thickness: f32 },

    #[error("Invalid tuning value for `{field}`: {value}")]
    InvalidTuning { field: &'static str, value: f32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    /// True for errors caused by bad numbers rather than a failed read/parse
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SimError::InvalidObstacle { .. }
                | SimError::InvalidObstacleCenter { .. }
                | SimError::InvalidBounds { .. }
                | SimError::InvalidTuning { .. }
        )
    }
}

pub type SimResult<T> = Result<T, SimError>;
