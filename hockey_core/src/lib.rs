pub mod components;
pub mod config;
pub mod params;
pub mod planner;
pub mod resources;
pub mod session;
pub mod systems;
pub mod table;

pub use components::*;
pub use config::*;
pub use params::*;
pub use planner::*;
pub use resources::*;
pub use session::*;
pub use table::*;

use hecs::World;
use log::warn;
use systems::*;

/// Run one frame of the air hockey table logic.
///
/// Physics is owned by the host: the puck snapshot must already be in the
/// world, and the paddle bodies and puck are read back afterwards.
#[allow(clippy::too_many_arguments)]
pub fn step(
    world: &mut World,
    time: &mut Time,
    table: &Table,
    config: &Config,
    score: &mut Score,
    events: &mut Events,
    inputs: &mut InputQueue,
    rng: &mut GameRng,
    reset: &mut ResetState,
) {
    // Clear events at start of frame, skipped frames included
    events.clear();

    if !(time.dt.is_finite() && time.dt >= 0.0) {
        warn!("step: ignoring frame with dt {}", time.dt);
        inputs.clear();
        return;
    }

    // Clamp dt to prevent large jumps
    let frame = Time {
        dt: time.dt.min(Params::MAX_DT),
        now: time.now,
    };

    // 1. Ingest pointer input
    ingest_inputs(world, inputs);

    // 2. Keep the puck flat and moving
    stabilize_puck(world, table, rng, events);

    // 3. Move paddles
    move_player_paddle(world, &frame, table, config.velocity_scale);
    move_cpu_paddle(world, &frame);

    // 4. Check scoring (puck crossed a goal line)
    check_goals(world, table, config, score, events, reset);

    // 5. Bring the puck back after a goal
    reset_tick(world, &frame, table, config, reset, rng, events);

    // Update time
    time.now += frame.dt;
}

/// Helper to create a paddle entity at its side's resting spot
pub fn create_paddle(world: &mut World, side: Side, table: &Table) -> hecs::Entity {
    let spawn = match side {
        Side::Player => table.player_spawn(),
        Side::Cpu => table.cpu_spawn(),
    };
    world.spawn((Paddle::new(side), PaddleIntent::new(), KinematicBody::at(spawn)))
}

/// Helper to create the CPU paddle with its planner
pub fn create_cpu_paddle(
    world: &mut World,
    config: &Config,
) -> Result<hecs::Entity, ConfigError> {
    let planner = InterceptPlanner::from_config(config)?;
    let spawn = planner.table().cpu_spawn();
    Ok(world.spawn((
        Paddle::new(Side::Cpu),
        KinematicBody::at(spawn),
        CpuBrain::new(planner),
    )))
}

/// Helper to create the puck entity
pub fn create_puck(world: &mut World, state: Option<PuckState>) -> hecs::Entity {
    world.spawn((Puck::new(state),))
}
