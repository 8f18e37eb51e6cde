//! One simulation frame
//!
//! Order is fixed: avatar step, publish avatar, apply kick, ball step.
//! A kick issued this frame moves the ball this frame.

use serde::{Deserialize, Serialize};

use super::avatar::{AvatarStep, MoveInput};
use super::ball::BallStep;
use super::state::SimState;
use super::world::World;
use crate::autopilot::autopilot_input;
use crate::tuning::SimTuning;

/// Input commands for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub movement: MoveInput,
    /// Idle/demo mode - the autopilot drives the avatar
    pub idle_mode: bool,
}

impl From<MoveInput> for TickInput {
    fn from(movement: MoveInput) -> Self {
        Self {
            movement,
            idle_mode: false,
        }
    }
}

/// Everything that happened in one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    pub avatar: AvatarStep,
    pub ball: BallStep,
}

/// Advance the simulation by one frame of `dt` seconds
pub fn tick(
    state: &mut SimState,
    world: &World,
    tuning: &SimTuning,
    input: &TickInput,
    dt: f32,
) -> TickReport {
    let movement = if input.idle_mode {
        autopilot_input(state, tuning)
    } else {
        input.movement
    };

    let avatar = state
        .avatar
        .step(&movement, state.ball.position, world, tuning, dt);
    state.publish_avatar();

    if let Some(velocity) = avatar.kick {
        state.ball.kick(velocity);
    }

    state
        .spin
        .advance(state.ball.velocity, dt, tuning.spin_factor);

    let contact_box = state.avatar_contact_box(tuning);
    let ball = state.ball.step(Some(&contact_box), world, tuning, dt);

    if ball.came_to_rest {
        log::debug!("Ball at rest at {:?}", state.ball.position);
    }

    state.frame += 1;
    state.elapsed += dt as f64;

    TickReport { avatar, ball }
}

/// Clamp a host-supplied delta to `[0, max_dt]`; negative and NaN become 0
pub fn clamp_frame_dt(dt: f32, max_dt: f32) -> f32 {
    if dt > 0.0 { dt.min(max_dt) } else { 0.0 }
}

/// Turns host timestamps into per-frame deltas
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<f64>,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self { last: None, max_dt }
    }

    /// Delta since the previous sample, clamped to `max_dt`.
    /// The first sample and any backwards step yield 0.
    pub fn sample(&mut self, now_secs: f64) -> f32 {
        let dt = match self.last {
            Some(last) if now_secs > last => clamp_frame_dt((now_secs - last) as f32, self.max_dt),
            _ => 0.0,
        };
        if self.last.is_none_or(|last| now_secs > last) {
            self.last = Some(now_secs);
        }
        dt
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::sim::collision::footprint_blocked;
    use glam::Vec3;
    use proptest::prelude::*;

    fn move_input() -> impl Strategy<Value = MoveInput> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(forward, backward, left, right, kick)| MoveInput {
                forward,
                backward,
                left,
                right,
                kick,
            },
        )
    }

    proptest! {
        /// Property: the ball never leaves the arena or sinks into the floor
        #[test]
        fn prop_ball_stays_in_arena(
            inputs in prop::collection::vec((move_input(), 1usize..30), 1..20),
            dt in 0.005f32..0.05f32,
        ) {
            let world = World::soccer_demo();
            let tuning = SimTuning::default();
            let limit = world.bounds().inner_limit(tuning.ball_radius);
            let mut state = SimState::new();

            for (movement, hold) in inputs {
                for _ in 0..hold {
                    tick(&mut state, &world, &tuning, &movement.into(), dt);
                    let p = state.ball.position;
                    prop_assert!(p.x >= -limit && p.x <= limit, "x out: {:?}", p);
                    prop_assert!(p.z >= -limit && p.z <= limit, "z out: {:?}", p);
                    prop_assert!(p.y >= tuning.ball_rest_height());
                    prop_assert_eq!(state.avatar.position.y, tuning.ground_height);
                }
            }
        }

        /// Property: frames without movement keys leave the avatar untouched
        #[test]
        fn prop_no_input_no_motion(
            x in -8.0f32..8.0f32,
            z in -8.0f32..8.0f32,
            heading in -3.1f32..3.1f32,
            frames in 1usize..60,
        ) {
            let world = World::soccer_demo();
            let tuning = SimTuning::default();
            let mut state = SimState::with_positions(
                Vec3::new(x, 0.0, z),
                Vec3::new(0.0, 0.25, 0.0),
            );
            state.avatar.heading = heading;
            let input = TickInput::default();

            for _ in 0..frames {
                tick(&mut state, &world, &tuning, &input, 1.0 / 60.0);
                prop_assert_eq!(state.avatar.position, Vec3::new(x, 0.0, z));
                prop_assert_eq!(state.avatar.heading, heading);
                prop_assert!(!state.avatar.is_moving);
            }
        }

        /// Property: a move into scenery is a full stop, never a slide
        #[test]
        fn prop_blocked_move_is_full_stop(
            x in -9.5f32..9.5f32,
            z in -9.5f32..9.5f32,
            movement in move_input(),
            dt in 0.005f32..0.2f32,
        ) {
            let world = World::soccer_demo();
            let tuning = SimTuning::default();
            let half = tuning.avatar_size / 2.0;
            let start = Vec3::new(x, 0.0, z);
            let mut avatar = crate::sim::AvatarState::new(start);

            let report = avatar.step(&movement, Vec3::new(0.0, 0.25, 0.0), &world, &tuning, dt);

            if report.blocked.is_some() {
                prop_assert_eq!(avatar.position, start);
            } else if report.moved {
                prop_assert!(footprint_blocked(&world, avatar.position, half).is_none());
            }
        }
    }
}
