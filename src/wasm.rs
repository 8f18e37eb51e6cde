//! Browser bindings
//!
//! The rendering host owns the animation-frame loop and keyboard wiring; it
//! calls `step` once per frame and reads back flat transforms.

use wasm_bindgen::prelude::*;

use crate::sim::{FrameClock, MoveInput, SimState, TickInput, World, clamp_frame_dt, tick};
use crate::tuning::SimTuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Soccer sim (wasm) loaded");
}

/// Simulation handle exposed to JavaScript
#[wasm_bindgen]
pub struct SoccerSim {
    state: SimState,
    world: World,
    tuning: SimTuning,
    clock: FrameClock,
    idle_mode: bool,
}

#[wasm_bindgen]
impl SoccerSim {
    #[wasm_bindgen(constructor)]
    pub fn new() -> SoccerSim {
        let tuning = SimTuning::default();
        SoccerSim {
            state: SimState::new(),
            world: World::soccer_demo(),
            clock: FrameClock::new(tuning.max_frame_dt),
            tuning,
            idle_mode: false,
        }
    }

    /// Build with tuning JSON (missing fields use defaults)
    #[wasm_bindgen(js_name = withTuning)]
    pub fn with_tuning(json: &str) -> Result<SoccerSim, JsValue> {
        let tuning = SimTuning::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Custom tuning applied");
        Ok(SoccerSim {
            state: SimState::new(),
            world: World::soccer_demo(),
            clock: FrameClock::new(tuning.max_frame_dt),
            tuning,
            idle_mode: false,
        })
    }

    /// Advance one frame with an explicit delta (seconds)
    pub fn step(
        &mut self,
        dt: f32,
        forward: bool,
        backward: bool,
        left: bool,
        right: bool,
        kick: bool,
    ) {
        let input = TickInput {
            movement: MoveInput {
                forward,
                backward,
                left,
                right,
                kick,
            },
            idle_mode: self.idle_mode,
        };
        let dt = clamp_frame_dt(dt, self.tuning.max_frame_dt);
        tick(&mut self.state, &self.world, &self.tuning, &input, dt);
    }

    /// Advance one frame from a `requestAnimationFrame` timestamp (ms)
    #[wasm_bindgen(js_name = stepAt)]
    pub fn step_at(
        &mut self,
        timestamp_ms: f64,
        forward: bool,
        backward: bool,
        left: bool,
        right: bool,
        kick: bool,
    ) {
        let dt = self.clock.sample(timestamp_ms / 1000.0);
        self.step(dt, forward, backward, left, right, kick);
    }

    #[wasm_bindgen(js_name = setIdleMode)]
    pub fn set_idle_mode(&mut self, idle: bool) {
        self.idle_mode = idle;
        log::info!("Idle mode {}", if idle { "on" } else { "off" });
    }

    /// Back to the starting layout
    pub fn reset(&mut self) {
        self.state = SimState::new();
        self.clock.reset();
    }

    /// [x, y, z, heading, is_moving, is_kicking]
    pub fn avatar(&self) -> Vec<f32> {
        let t = self.state.avatar_transform();
        vec![
            t.position.x,
            t.position.y,
            t.position.z,
            t.heading,
            t.is_moving as u8 as f32,
            t.is_kicking as u8 as f32,
        ]
    }

    /// [x, y, z, vx, vy, vz, spin_x, spin_y]
    pub fn ball(&self) -> Vec<f32> {
        let t = self.state.ball_transform();
        vec![
            t.position.x,
            t.position.y,
            t.position.z,
            t.velocity.x,
            t.velocity.y,
            t.velocity.z,
            t.spin.pitch,
            t.spin.yaw,
        ]
    }

    pub fn snapshot(&self) -> Result<String, JsValue> {
        self.state
            .snapshot_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn restore(&mut self, json: &str) -> Result<(), JsValue> {
        self.state = SimState::restore_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.clock.reset();
        Ok(())
    }
}

impl Default for SoccerSim {
    fn default() -> Self {
        Self::new()
    }
}
