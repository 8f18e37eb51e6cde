//! Axis-aligned collision detection and response
//!
//! Everything here is pure: callers hand in a proposed position and velocity
//! and get back a corrected pair. Boxes are resolved along the axis of least
//! penetration, ties going X, then Y, then Z.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::world::{World, WorldBounds};

/// Coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn is_horizontal(self) -> bool {
        self != Axis::Y
    }
}

/// Axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Aabb {
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// Box from full size (width, height, depth)
    pub fn from_size(center: Vec3, size: Vec3) -> Self {
        Self::new(center, size / 2.0)
    }

    /// Minkowski sum with a sphere treated as a cube of half width `radius`
    pub fn expanded(&self, radius: f32) -> Self {
        Self::new(self.center, self.half_extents + Vec3::splat(radius))
    }

    /// Strict interior test (touching faces is not inside)
    pub fn contains(&self, point: Vec3) -> bool {
        let d = (point - self.center).abs();
        d.cmplt(self.half_extents).all()
    }

    /// Strict overlap on all three axes
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let d = (self.center - other.center).abs();
        d.cmplt(self.half_extents + other.half_extents).all()
    }

    /// Strict overlap of the ground footprints (x and z only)
    pub fn overlaps_xz(&self, other: &Aabb) -> bool {
        let d = (self.center - other.center).abs();
        let reach = self.half_extents + other.half_extents;
        d.x < reach.x && d.z < reach.z
    }
}

/// Bounce coefficients per axis family
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Restitution {
    /// Applied on x and z
    pub horizontal: f32,
    /// Applied on y
    pub vertical: f32,
}

impl Default for Restitution {
    fn default() -> Self {
        Self {
            horizontal: 0.8,
            vertical: 0.6,
        }
    }
}

impl Restitution {
    #[inline]
    pub fn for_axis(&self, axis: Axis) -> f32 {
        if axis.is_horizontal() {
            self.horizontal
        } else {
            self.vertical
        }
    }
}

/// Corrected state after a box contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Axis the entity was pushed out along
    pub axis: Axis,
    /// +1 when pushed toward positive, -1 otherwise
    pub sign: f32,
}

/// Pick the axis with the smallest overlap; X wins ties with Y or Z, Y wins
/// ties with Z
#[inline]
pub fn least_penetration_axis(overlap: Vec3) -> Axis {
    if overlap.x <= overlap.y && overlap.x <= overlap.z {
        Axis::X
    } else if overlap.y <= overlap.x && overlap.y <= overlap.z {
        Axis::Y
    } else {
        Axis::Z
    }
}

/// Resolve a point against a box that already includes the entity's extents
pub fn resolve_point_box(
    position: Vec3,
    velocity: Vec3,
    target: &Aabb,
    restitution: Restitution,
) -> Option<Contact> {
    let delta = position - target.center;
    let overlap = target.half_extents - delta.abs();
    if overlap.cmple(Vec3::ZERO).any() {
        return None;
    }

    let axis = least_penetration_axis(overlap);
    let i = axis.index();
    let sign = if delta[i] > 0.0 { 1.0 } else { -1.0 };

    // Moving by the overlap lands exactly on the face
    let mut corrected = position;
    corrected[i] = target.center[i] + sign * target.half_extents[i];

    let mut reflected = velocity;
    reflected[i] = -velocity[i] * restitution.for_axis(axis);

    Some(Contact {
        position: corrected,
        velocity: reflected,
        axis,
        sign,
    })
}

/// Resolve a sphere of `radius` against a box
#[inline]
pub fn resolve_sphere_box(
    position: Vec3,
    velocity: Vec3,
    radius: f32,
    target: &Aabb,
    restitution: Restitution,
) -> Option<Contact> {
    resolve_point_box(position, velocity, &target.expanded(radius), restitution)
}

/// Add the avatar's shove to a contact: `impulse` along the contact axis,
/// away from the avatar. Vertical contacts get no shove.
pub fn apply_push(mut contact: Contact, impulse: f32) -> Contact {
    if contact.axis.is_horizontal() {
        contact.velocity[contact.axis.index()] += contact.sign * impulse;
    }
    contact
}

/// Resolve against boxes in order, stopping at the first overlap
pub fn first_contact<'a>(
    position: Vec3,
    velocity: Vec3,
    radius: f32,
    boxes: impl IntoIterator<Item = &'a Aabb>,
    restitution: Restitution,
) -> Option<(usize, Contact)> {
    boxes.into_iter().enumerate().find_map(|(index, target)| {
        resolve_sphere_box(position, velocity, radius, target, restitution)
            .map(|contact| (index, contact))
    })
}

/// Keep a sphere inside the four walls, reflecting the velocity component
/// that crossed. Returns true if any wall was hit.
pub fn clamp_to_walls(
    position: &mut Vec3,
    velocity: &mut Vec3,
    radius: f32,
    bounds: WorldBounds,
    restitution: f32,
) -> bool {
    let limit = bounds.inner_limit(radius);
    let mut hit = false;

    // North (-z), south (+z), west (-x), east (+x)
    for i in [2, 0] {
        if position[i] < -limit {
            position[i] = -limit;
            velocity[i] = -velocity[i] * restitution;
            hit = true;
        }
        if position[i] > limit {
            position[i] = limit;
            velocity[i] = -velocity[i] * restitution;
            hit = true;
        }
    }

    hit
}

/// What stopped a ground-bound move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blocker {
    Wall,
    Obstacle(usize),
}

/// Check a ground-bound footprint against the walls and every obstacle.
///
/// Walls are inclusive: a footprint touching a wall is blocked. Obstacles use
/// strict footprint overlap.
pub fn footprint_blocked(world: &World, center: Vec3, half_extents: Vec3) -> Option<Blocker> {
    let bounds = world.bounds();
    let limit = bounds.half_size() - bounds.wall_thickness;

    if center.x - half_extents.x <= -limit
        || center.x + half_extents.x >= limit
        || center.z - half_extents.z <= -limit
        || center.z + half_extents.z >= limit
    {
        return Some(Blocker::Wall);
    }

    let footprint = Aabb::new(center, half_extents);
    world
        .obstacles()
        .iter()
        .position(|obstacle| footprint.overlaps_xz(obstacle))
        .map(Blocker::Obstacle)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: after resolution the sphere is no longer inside the box
        #[test]
        fn prop_resolution_leaves_box(
            px in -2.0f32..2.0f32,
            py in -2.0f32..2.0f32,
            pz in -2.0f32..2.0f32,
            hx in 0.1f32..2.0f32,
            hy in 0.1f32..2.0f32,
            hz in 0.1f32..2.0f32,
            radius in 0.05f32..0.5f32,
        ) {
            let target = Aabb::new(Vec3::ZERO, Vec3::new(hx, hy, hz));
            let position = Vec3::new(px, py, pz);
            let velocity = Vec3::new(1.0, -2.0, 3.0);

            match resolve_sphere_box(position, velocity, radius, &target, Restitution::default()) {
                Some(contact) => {
                    let grown = target.expanded(radius);
                    prop_assert!(grown.contains(position));
                    prop_assert!(!grown.contains(contact.position));
                    // Only the contact axis changes
                    for i in 0..3 {
                        if i != contact.axis.index() {
                            prop_assert_eq!(contact.position[i], position[i]);
                            prop_assert_eq!(contact.velocity[i], velocity[i]);
                        }
                    }
                }
                None => prop_assert!(!target.expanded(radius).contains(position)),
            }
        }
    }
}
