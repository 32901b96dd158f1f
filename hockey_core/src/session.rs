use glam::DVec2;
use hecs::{Entity, World};
use log::debug;

use crate::{
    create_cpu_paddle, create_paddle, create_puck, step, Config, ConfigError, CpuBrain, Events,
    GameRng, InputQueue, KinematicBody, Mode, Outcome, Puck, PuckState, ResetState, Score, Side,
    Table, Time,
};

/// Everything the host needs to apply after a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub player_paddle: KinematicBody,
    pub cpu_paddle: KinematicBody,
    /// Puck after stabilisation and resets; write it back to the physics body
    pub puck: Option<PuckState>,
    pub cpu_mode: Option<Mode>,
    pub score: Score,
    pub events: Events,
    pub outcome: Option<Outcome>,
}

/// A local match against the CPU
pub struct Match {
    pub world: World,
    pub time: Time,
    pub table: Table,
    pub config: Config,
    pub score: Score,
    pub events: Events,
    pub inputs: InputQueue,
    pub rng: GameRng,
    pub reset: ResetState,
    player: Entity,
    cpu: Entity,
    puck: Entity,
}

impl Match {
    pub fn new(config: Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let table = config.table();
        let mut world = World::new();

        let player = create_paddle(&mut world, Side::Player, &table);
        let cpu = create_cpu_paddle(&mut world, &config)?;
        let puck = create_puck(&mut world, None);

        debug!("new match, seed {seed}, first to {}", config.win_score);

        Ok(Self {
            world,
            time: Time::new(0.0, 0.0),
            table,
            config,
            score: Score::new(),
            events: Events::new(),
            inputs: InputQueue::new(),
            rng: GameRng::new(seed),
            reset: ResetState::new(),
            player,
            cpu,
            puck,
        })
    }

    /// Run one rendered frame.
    ///
    /// `pointer` is the pointer ray's hit on the table plane, if any; `puck` is
    /// the physics world's latest puck snapshot, if it has one yet.
    pub fn step(&mut self, dt: f64, pointer: Option<DVec2>, puck: Option<PuckState>) -> Frame {
        if let Some(pointer) = pointer {
            self.inputs.push_pointer(pointer);
        }
        if let Ok(mut component) = self.world.get::<&mut Puck>(self.puck) {
            component.state = puck;
        }

        self.time.dt = dt;
        step(
            &mut self.world,
            &mut self.time,
            &self.table,
            &self.config,
            &mut self.score,
            &mut self.events,
            &mut self.inputs,
            &mut self.rng,
            &mut self.reset,
        );

        self.frame()
    }

    /// Zero the score and bring the puck back to the centre for a new kick-off.
    pub fn restart(&mut self) {
        self.score = Score::new();
        self.reset.start_delay(0.0);
        debug!("match restarted");
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.score.outcome(self.config.win_score)
    }

    /// Snapshot of the current commands without stepping
    pub fn frame(&self) -> Frame {
        let body = |entity| {
            self.world
                .get::<&KinematicBody>(entity)
                .map(|body| *body)
                .unwrap_or_default()
        };
        let cpu_mode = self
            .world
            .get::<&CpuBrain>(self.cpu)
            .ok()
            .and_then(|brain| brain.last_output)
            .and_then(|output| output.mode);
        let puck = self
            .world
            .get::<&Puck>(self.puck)
            .ok()
            .and_then(|puck| puck.state);

        Frame {
            player_paddle: body(self.player),
            cpu_paddle: body(self.cpu),
            puck,
            cpu_mode,
            score: self.score,
            events: self.events,
            outcome: self.outcome(),
        }
    }
}
