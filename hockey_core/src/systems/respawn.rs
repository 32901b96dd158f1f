use glam::DVec3;
use hecs::World;
use log::debug;
use rand::Rng;

use crate::{Config, Events, GameRng, Puck, PuckState, ResetPhase, ResetState, Table, Time};

/// Advance the post-goal reset: wait, re-centre the puck, let it settle, kick it off.
pub fn reset_tick(
    world: &mut World,
    time: &Time,
    table: &Table,
    config: &Config,
    reset: &mut ResetState,
    rng: &mut GameRng,
    events: &mut Events,
) {
    if reset.is_live() {
        return;
    }

    reset.update(time.dt);
    if !reset.is_elapsed() {
        return;
    }

    match reset.phase {
        ResetPhase::AwaitingReset => {
            let spawn = PuckState::new(table.puck_spawn(), DVec3::ZERO);
            set_puck(world, spawn);
            reset.start_settle(config.kickoff_settle);
            events.puck_reset = true;
            debug!("puck reset to centre");
        }
        ResetPhase::Settling => {
            let kick = DVec3::new(rng.0.gen_range(-1.0..1.0), 0.0, rng.0.gen_range(-1.0..1.0));
            set_puck(world, PuckState::new(table.puck_spawn(), kick));
            reset.go_live();
            events.puck_kicked = true;
            debug!("kick-off at ({:.3}, {:.3})", kick.x, kick.z);
        }
        ResetPhase::Live => {}
    }
}

fn set_puck(world: &mut World, state: PuckState) {
    for (_entity, puck) in world.query_mut::<&mut Puck>() {
        puck.state = Some(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_puck;

    struct Fixture {
        world: World,
        config: Config,
        table: Table,
        reset: ResetState,
        rng: GameRng,
        events: Events,
        puck: hecs::Entity,
    }

    impl Fixture {
        fn new() -> Self {
            let config = Config::new();
            let table = config.table();
            let mut world = World::new();
            let puck = create_puck(
                &mut world,
                Some(PuckState::new(
                    DVec3::new(0.0, 0.05, 3.3),
                    DVec3::new(0.0, 0.0, 2.0),
                )),
            );
            Self {
                world,
                config,
                table,
                reset: ResetState::new(),
                rng: GameRng::new(9),
                events: Events::new(),
                puck,
            }
        }

        fn tick(&mut self, dt: f64) {
            self.events.clear();
            reset_tick(
                &mut self.world,
                &Time::new(dt, 0.0),
                &self.table,
                &self.config,
                &mut self.reset,
                &mut self.rng,
                &mut self.events,
            );
        }

        fn puck(&self) -> PuckState {
            self.world.get::<&Puck>(self.puck).unwrap().state.unwrap()
        }
    }

    #[test]
    fn test_live_puck_is_untouched() {
        let mut f = Fixture::new();
        let before = f.puck();
        f.tick(0.5);
        assert_eq!(f.puck(), before);
        assert_eq!(f.events, Events::default());
    }

    #[test]
    fn test_reset_sequence_after_goal() {
        let mut f = Fixture::new();
        f.reset.start_delay(f.config.goal_reset_delay);

        f.tick(1.0);
        assert!(!f.events.puck_reset);
        assert_eq!(f.puck().position.z, 3.3);

        f.tick(0.5);
        assert!(f.events.puck_reset);
        assert_eq!(f.puck().position, f.table.puck_spawn());
        assert_eq!(f.puck().velocity, DVec3::ZERO);
        assert_eq!(f.reset.phase, ResetPhase::Settling);

        f.tick(0.25);
        assert!(!f.events.puck_kicked);

        f.tick(0.25);
        assert!(f.events.puck_kicked);
        assert!(f.reset.is_live());
        let kick = f.puck().velocity;
        assert!(kick.x.abs() <= 1.0 && kick.z.abs() <= 1.0);
        assert_eq!(kick.y, 0.0);
    }

    #[test]
    fn test_immediate_reset() {
        let mut f = Fixture::new();
        f.reset.start_delay(0.0);
        f.tick(1.0 / 60.0);
        assert!(f.events.puck_reset);
    }
}
