//! Soccer Sim entry point
//!
//! Native builds run a headless session: a seeded mix of random buttons and
//! the autopilot, logging a summary now and then. The browser build is driven
//! from JavaScript through `soccer_sim::wasm`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use soccer_sim::SimTuning;
    use soccer_sim::consts::DEFAULT_DT;
    use soccer_sim::sim::{MoveInput, SimState, TickInput, World, tick};

    env_logger::init();
    log::info!("Soccer Sim (native) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match SimTuning::load(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Failed to load tuning from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => SimTuning::default(),
    };

    let seed = 12345;
    let mut rng = Pcg32::seed_from_u64(seed);
    let world = World::soccer_demo();
    let mut state = SimState::new();

    const FRAMES: u32 = 60 * 60;
    const SEGMENT: u32 = 90;

    let mut input = TickInput::default();
    let mut kicks = 0;
    let mut contacts = 0;

    for frame in 0..FRAMES {
        // Hold each random chord for a while, alternating with the autopilot
        if frame % SEGMENT == 0 {
            input = if rng.random_bool(0.5) {
                TickInput {
                    idle_mode: true,
                    ..Default::default()
                }
            } else {
                MoveInput {
                    forward: rng.random_bool(0.4),
                    backward: rng.random_bool(0.2),
                    left: rng.random_bool(0.3),
                    right: rng.random_bool(0.3),
                    kick: rng.random_bool(0.5),
                }
                .into()
            };
        }

        let report = tick(&mut state, &world, &tuning, &input, DEFAULT_DT);
        kicks += report.avatar.kick.is_some() as u32;
        contacts += report.ball.contact.is_some() as u32;

        if frame % 600 == 0 {
            let avatar = state.avatar_transform();
            let ball = state.ball_transform();
            log::info!(
                "t={:.1}s avatar=({:.2}, {:.2}) h={:.2} ball=({:.2}, {:.2}, {:.2}) v={:.2}",
                state.elapsed,
                avatar.position.x,
                avatar.position.z,
                avatar.heading,
                ball.position.x,
                ball.position.y,
                ball.position.z,
                ball.velocity.length()
            );
        }
    }

    log::info!(
        "Session done: {} frames, {} kicks, {} ball contacts",
        state.frame,
        kicks,
        contacts
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is soccer_sim::wasm::wasm_start, this is just to satisfy the compiler
}
