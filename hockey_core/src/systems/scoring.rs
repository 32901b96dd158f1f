use hecs::World;
use log::debug;

use crate::{Config, Events, Puck, ResetState, Score, Side, Table};

/// Check if the puck crossed a goal line inside the goal mouth (scoring)
pub fn check_goals(
    world: &mut World,
    table: &Table,
    config: &Config,
    score: &mut Score,
    events: &mut Events,
    reset: &mut ResetState,
) {
    // One goal until the puck is reset
    if !reset.goals_armed() {
        return;
    }

    let scorer = world
        .query::<&Puck>()
        .iter()
        .filter_map(|(_e, puck)| puck.state)
        .find_map(|state| {
            let pos = state.position;
            if !table.in_goal_mouth(pos.x) {
                None
            } else if pos.z > table.goal_line() {
                Some(Side::Player)
            } else if pos.z < -table.goal_line() {
                Some(Side::Cpu)
            } else {
                None
            }
        });

    let Some(scorer) = scorer else {
        return;
    };

    score.increment(scorer);
    if config.mirrored_scoring {
        let other = match scorer {
            Side::Player => Side::Cpu,
            Side::Cpu => Side::Player,
        };
        score.increment(other);
    }

    match scorer {
        Side::Player => events.player_scored = true,
        Side::Cpu => events.cpu_scored = true,
    }
    reset.start_delay(config.goal_reset_delay);

    debug!(
        "goal for {scorer:?}, score {}-{}",
        score.player, score.cpu
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_puck, PuckState, ResetPhase};
    use glam::DVec3;

    fn setup() -> (World, Config, Table, Score, Events, ResetState) {
        let config = Config::new();
        let table = config.table();
        (
            World::new(),
            config,
            table,
            Score::new(),
            Events::new(),
            ResetState::new(),
        )
    }

    fn puck_at(x: f64, z: f64) -> Option<PuckState> {
        Some(PuckState::new(DVec3::new(x, 0.05, z), DVec3::new(0.0, 0.0, 1.0)))
    }

    #[test]
    fn test_player_scores_past_far_goal_line() {
        let (mut world, mut config, table, mut score, mut events, mut reset) = setup();
        config.mirrored_scoring = false;
        create_puck(&mut world, puck_at(0.2, table.goal_line() + 0.05));

        check_goals(&mut world, &table, &config, &mut score, &mut events, &mut reset);

        assert_eq!(score, Score { player: 1, cpu: 0 });
        assert!(events.player_scored);
        assert!(!events.cpu_scored);
        assert_eq!(reset.phase, ResetPhase::AwaitingReset);
        assert_eq!(reset.timer, config.goal_reset_delay);
    }

    #[test]
    fn test_cpu_scores_past_near_goal_line() {
        let (mut world, mut config, table, mut score, mut events, mut reset) = setup();
        config.mirrored_scoring = false;
        create_puck(&mut world, puck_at(-0.5, -table.goal_line() - 0.05));

        check_goals(&mut world, &table, &config, &mut score, &mut events, &mut reset);

        assert_eq!(score, Score { player: 0, cpu: 1 });
        assert!(events.cpu_scored);
    }

    #[test]
    fn test_mirrored_scoring_credits_both_sides() {
        let (mut world, config, table, mut score, mut events, mut reset) = setup();
        create_puck(&mut world, puck_at(0.0, table.goal_line() + 0.1));

        check_goals(&mut world, &table, &config, &mut score, &mut events, &mut reset);

        assert_eq!(score, Score { player: 1, cpu: 1 });
        assert!(events.player_scored);
        assert!(!events.cpu_scored);
    }

    #[test]
    fn test_no_goal_outside_goal_mouth() {
        let (mut world, config, table, mut score, mut events, mut reset) = setup();
        create_puck(&mut world, puck_at(1.5, table.goal_line() + 0.1));

        check_goals(&mut world, &table, &config, &mut score, &mut events, &mut reset);

        assert_eq!(score, Score::new());
        assert!(!events.goal_scored());
        assert!(reset.is_live());
    }

    #[test]
    fn test_only_one_goal_until_reset() {
        let (mut world, config, table, mut score, mut events, mut reset) = setup();
        create_puck(&mut world, puck_at(0.0, table.goal_line() + 0.1));

        check_goals(&mut world, &table, &config, &mut score, &mut events, &mut reset);
        events.clear();
        check_goals(&mut world, &table, &config, &mut score, &mut events, &mut reset);

        assert_eq!(score, Score { player: 1, cpu: 1 });
        assert!(!events.goal_scored());
    }

    #[test]
    fn test_goal_counts_again_once_puck_is_reset() {
        let (mut world, config, table, mut score, mut events, mut reset) = setup();
        create_puck(&mut world, puck_at(0.0, -table.goal_line() - 0.1));
        reset.start_settle(config.kickoff_settle);

        check_goals(&mut world, &table, &config, &mut score, &mut events, &mut reset);

        assert_eq!(score, Score { player: 1, cpu: 1 });
        assert!(events.cpu_scored);
        assert_eq!(reset.phase, ResetPhase::AwaitingReset);
    }
}
