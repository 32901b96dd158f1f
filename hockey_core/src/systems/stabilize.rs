use hecs::World;
use log::trace;
use rand::Rng;

use crate::{Events, GameRng, Puck, Table};

/// Planar speed below which the puck counts as stalled on both axes
const STALL_SPEED: f64 = 0.1;
/// Largest random push applied to a stalled puck, per axis
const NUDGE: f64 = 0.05;

/// Keep the puck flat on the table and stop it from stalling.
///
/// The puck is pinned to its resting height, loses any vertical velocity, and
/// gets a small random push when it is almost still so neither side can get
/// stuck waiting on it.
pub fn stabilize_puck(world: &mut World, table: &Table, rng: &mut GameRng, events: &mut Events) {
    let rest_y = table.puck_height / 2.0;

    for (_entity, puck) in world.query_mut::<&mut Puck>() {
        let Some(state) = puck.state.as_mut() else {
            continue;
        };

        if (state.position.y - rest_y).abs() > 0.05 {
            state.position.y = rest_y;
        }

        if state.velocity.y.abs() > 0.1 {
            state.velocity.y = 0.0;
        }

        if state.velocity.x.abs() < STALL_SPEED && state.velocity.z.abs() < STALL_SPEED {
            state.velocity.x += rng.0.gen_range(-NUDGE..NUDGE);
            state.velocity.z += rng.0.gen_range(-NUDGE..NUDGE);
            state.velocity.y = 0.0;
            events.puck_nudged = true;
            trace!(
                "puck nudged to ({:.3}, {:.3})",
                state.velocity.x,
                state.velocity.z
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_puck, PuckState};
    use glam::DVec3;

    fn run(state: PuckState, seed: u64) -> (PuckState, Events) {
        let mut world = World::new();
        let table = Table::default();
        let mut rng = GameRng::new(seed);
        let mut events = Events::new();
        let puck = create_puck(&mut world, Some(state));

        stabilize_puck(&mut world, &table, &mut rng, &mut events);

        let state = world.get::<&Puck>(puck).unwrap().state.unwrap();
        (state, events)
    }

    #[test]
    fn test_puck_is_pinned_to_table() {
        let (state, _) = run(
            PuckState::new(DVec3::new(0.5, 0.3, 1.0), DVec3::new(2.0, 0.5, -1.0)),
            1,
        );
        assert_eq!(state.position.y, 0.05);
        assert_eq!(state.velocity, DVec3::new(2.0, 0.0, -1.0));
    }

    #[test]
    fn test_small_drift_is_left_alone() {
        let (state, events) = run(
            PuckState::new(DVec3::new(0.5, 0.07, 1.0), DVec3::new(2.0, 0.05, -1.0)),
            1,
        );
        assert_eq!(state.position.y, 0.07);
        assert_eq!(state.velocity.y, 0.05);
        assert!(!events.puck_nudged);
    }

    #[test]
    fn test_stalled_puck_gets_nudged() {
        let (state, events) = run(PuckState::new(DVec3::new(0.0, 0.05, -1.0), DVec3::ZERO), 7);
        assert!(events.puck_nudged);
        assert!(state.velocity.x.abs() < NUDGE);
        assert!(state.velocity.z.abs() < NUDGE);
        assert_eq!(state.velocity.y, 0.0);
    }

    #[test]
    fn test_nudge_is_deterministic_per_seed() {
        let still = PuckState::new(DVec3::new(0.0, 0.05, -1.0), DVec3::ZERO);
        let (a, _) = run(still, 42);
        let (b, _) = run(still, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_puck_is_ignored() {
        let mut world = World::new();
        let mut rng = GameRng::new(1);
        let mut events = Events::new();
        create_puck(&mut world, None);

        stabilize_puck(&mut world, &Table::default(), &mut rng, &mut events);

        assert!(!events.puck_nudged);
    }
}
