//! Static arena geometry
//!
//! Obstacles and bounds are fixed at initialization and only read afterwards.
//! Obstacle order is the order collision queries visit them in.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::error::{SimError, SimResult};

/// Square arena dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    /// Side length of the floor (arena spans `[-floor_size/2, floor_size/2]`)
    pub floor_size: f32,
    /// Thickness of the four boundary walls, measured inward
    pub wall_thickness: f32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            floor_size: 20.0,
            wall_thickness: 0.2,
        }
    }
}

impl WorldBounds {
    pub fn half_size(&self) -> f32 {
        self.floor_size / 2.0
    }

    /// Furthest a centre may travel from the origin on x or z for an entity
    /// of the given half width before touching a wall
    pub fn inner_limit(&self, half_width: f32) -> f32 {
        self.half_size() - self.wall_thickness - half_width
    }

    fn validate(&self) -> SimResult<()> {
        let ok = self.floor_size.is_finite()
            && self.wall_thickness.is_finite()
            && self.floor_size > 0.0
            && self.wall_thickness > 0.0
            && self.floor_size > 2.0 * self.wall_thickness;
        if ok {
            Ok(())
        } else {
            Err(SimError::InvalidBounds {
                floor_size: self.floor_size,
                wall_thickness: self.wall_thickness,
            })
        }
    }
}

/// Immutable obstacles plus arena bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    obstacles: Vec<Aabb>,
    bounds: WorldBounds,
}

impl World {
    /// Build a world, rejecting degenerate obstacles and bounds
    pub fn new(obstacles: Vec<Aabb>, bounds: WorldBounds) -> SimResult<Self> {
        bounds.validate()?;
        for (index, obstacle) in obstacles.iter().enumerate() {
            let he = obstacle.half_extents;
            if !he.is_finite() || he.min_element() <= 0.0 {
                return Err(SimError::InvalidObstacle {
                    index,
                    half_extents: he,
                });
            }
            if !obstacle.center.is_finite() {
                return Err(SimError::InvalidObstacleCenter {
                    index,
                    center: obstacle.center,
                });
            }
        }
        log::debug!(
            "World ready: {} obstacles, floor {} wall {}",
            obstacles.len(),
            bounds.floor_size,
            bounds.wall_thickness
        );
        Ok(Self { obstacles, bounds })
    }

    /// Empty arena with the given bounds
    pub fn open(bounds: WorldBounds) -> SimResult<Self> {
        Self::new(Vec::new(), bounds)
    }

    /// The soccer demo layout: cubes, two long blocks, a building and three trees
    pub fn soccer_demo() -> Self {
        let boxes = [
            // Cubes
            (Vec3::new(-3.0, 0.5, -3.0), Vec3::new(1.0, 1.0, 1.0)),
            (Vec3::new(3.0, 0.5, -3.0), Vec3::new(1.0, 1.0, 1.0)),
            (Vec3::new(-3.0, 0.5, 3.0), Vec3::new(1.0, 1.0, 1.0)),
            (Vec3::new(3.0, 0.5, 3.0), Vec3::new(1.0, 1.0, 1.0)),
            // Long blocks
            (Vec3::new(-5.0, 1.0, 0.0), Vec3::new(1.0, 2.0, 3.0)),
            (Vec3::new(5.0, 1.0, 0.0), Vec3::new(1.0, 2.0, 3.0)),
            // Building
            (Vec3::new(-7.0, 1.5, -7.0), Vec3::new(4.0, 3.0, 4.0)),
            // Trees
            (Vec3::new(7.0, 1.0, -7.0), Vec3::new(1.5, 4.0, 1.5)),
            (Vec3::new(7.0, 1.0, 7.0), Vec3::new(1.5, 4.0, 1.5)),
            (Vec3::new(-7.0, 1.0, 7.0), Vec3::new(1.5, 4.0, 1.5)),
        ];

        Self {
            obstacles: boxes
                .iter()
                .map(|&(center, size)| Aabb::from_size(center, size))
                .collect(),
            bounds: WorldBounds::default(),
        }
    }

    pub fn obstacles(&self) -> &[Aabb] {
        &self.obstacles
    }

    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }
}

impl Default for World {
    fn default() -> Self {
        Self::soccer_demo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soccer_demo_layout() {
        let world = World::soccer_demo();
        assert_eq!(world.obstacles().len(), 10);
        assert_eq!(world.obstacles()[6].half_extents, Vec3::new(2.0, 1.5, 2.0));
        assert_eq!(world.bounds().floor_size, 20.0);

        // The demo layout passes its own validation
        let rebuilt = World::new(world.obstacles().to_vec(), world.bounds());
        assert!(rebuilt.is_ok());
    }

    #[test]
    fn test_inner_limit() {
        let bounds = WorldBounds::default();
        assert!((bounds.inner_limit(0.25) - 9.55).abs() < 1e-5);
    }

    #[test]
    fn test_rejects_degenerate_obstacle() {
        let obstacles = vec![
            Aabb::from_size(Vec3::ZERO, Vec3::ONE),
            Aabb::from_size(Vec3::new(2.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 1.0)),
        ];
        let err = World::new(obstacles, WorldBounds::default()).unwrap_err();
        assert!(matches!(err, SimError::InvalidObstacle { index: 1, .. }));

        let negative = vec![Aabb::new(Vec3::ZERO, Vec3::new(-1.0, 1.0, 1.0))];
        assert!(World::new(negative, WorldBounds::default()).is_err());
    }

    #[test]
    fn test_rejects_non_finite_center() {
        let obstacles = vec![
            Aabb::from_size(Vec3::ZERO, Vec3::ONE),
            Aabb::from_size(Vec3::new(f32::NAN, 0.5, 0.0), Vec3::ONE),
        ];
        let err = World::new(obstacles, WorldBounds::default()).unwrap_err();
        assert!(matches!(err, SimError::InvalidObstacleCenter { index: 1, .. }));
        assert!(err.is_validation());
        assert!(err.to_string().contains("center"));
    }

    #[test]
    fn test_rejects_bad_bounds() {
        let bounds = WorldBounds {
            floor_size: 0.3,
            wall_thickness: 0.2,
        };
        assert!(matches!(
            World::open(bounds),
            Err(SimError::InvalidBounds { .. })
        ));
    }
}
