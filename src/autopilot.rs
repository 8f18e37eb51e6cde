//! Idle/demo mode: walk to the ball and kick it
//!
//! Produces the same button flags a player would, so the avatar still obeys
//! speed, collision and cooldown rules.

use glam::Vec2;

use crate::sim::{MoveInput, SimState};
use crate::tuning::SimTuning;

/// Offsets smaller than this on an axis are treated as lined up
const AXIS_DEADZONE: f32 = 0.1;

/// Buttons that chase the ball and kick once in range
pub fn autopilot_input(state: &SimState, tuning: &SimTuning) -> MoveInput {
    let avatar = state.avatar.position;
    let ball = state.ball.position;
    let to_ball = Vec2::new(ball.x - avatar.x, ball.z - avatar.z);

    let mut input = MoveInput {
        right: to_ball.x > AXIS_DEADZONE,
        left: to_ball.x < -AXIS_DEADZONE,
        backward: to_ball.y > AXIS_DEADZONE,
        forward: to_ball.y < -AXIS_DEADZONE,
        kick: false,
    };

    // Close enough: keep walking into it so the kick goes the right way
    if to_ball.length() < tuning.kick_range * 0.8 {
        input.kick = true;
    }

    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{TickInput, World, tick};
    use glam::Vec3;

    #[test]
    fn test_walks_toward_ball() {
        let tuning = SimTuning::default();
        let state = SimState::with_positions(Vec3::new(0.0, 0.0, 5.0), Vec3::new(-4.0, 0.25, -1.0));

        let input = autopilot_input(&state, &tuning);
        assert!(input.left && input.forward);
        assert!(!input.right && !input.backward);
        assert!(!input.kick);
    }

    #[test]
    fn test_lined_up_axis_is_ignored() {
        let tuning = SimTuning::default();
        let state = SimState::with_positions(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.05, 0.25, 4.0));

        let input = autopilot_input(&state, &tuning);
        assert!(input.forward);
        assert!(!input.left && !input.right);
        assert!(input.kick);
    }

    #[test]
    fn test_idle_mode_kicks_the_ball() {
        let world = World::soccer_demo();
        let tuning = SimTuning::default();
        let mut state = SimState::new();
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        let kicked = (0..600).any(|_| {
            tick(&mut state, &world, &tuning, &input, 1.0 / 60.0)
                .avatar
                .kick
                .is_some()
        });
        assert!(kicked);
    }
}
