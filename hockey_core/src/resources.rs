use glam::DVec2;

use crate::components::Side;

/// Time resource for tracking simulation time
#[derive(Debug, Clone, Copy)]
pub struct Time {
    pub dt: f64,  // Delta time for this step
    pub now: f64, // Total elapsed time
}

impl Time {
    pub fn new(dt: f64, now: f64) -> Self {
        Self { dt, now }
    }
}

impl Default for Time {
    fn default() -> Self {
        Self {
            dt: 1.0 / 60.0,
            now: 0.0,
        }
    }
}

/// How a finished match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    PlayerWins,
    CpuWins,
    Draw,
}

/// Game score tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub player: u8,
    pub cpu: u8,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Player => self.player = self.player.saturating_add(1),
            Side::Cpu => self.cpu = self.cpu.saturating_add(1),
        }
    }

    pub fn outcome(&self, win_score: u8) -> Option<Outcome> {
        match (self.player >= win_score, self.cpu >= win_score) {
            (true, true) => Some(Outcome::Draw),
            (true, false) => Some(Outcome::PlayerWins),
            (false, true) => Some(Outcome::CpuWins),
            (false, false) => None,
        }
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Events that occurred during this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Events {
    pub player_scored: bool,
    pub cpu_scored: bool,
    pub puck_reset: bool,  // puck placed back on the centre spot
    pub puck_kicked: bool, // kick-off velocity applied
    pub puck_nudged: bool, // stalled puck given a random push
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn goal_scored(&self) -> bool {
        self.player_scored || self.cpu_scored
    }
}

/// Stage of the post-goal puck reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResetPhase {
    #[default]
    Live,
    AwaitingReset,
    Settling,
}

/// Reset state for managing the puck's return after a goal
#[derive(Debug, Clone, Copy, Default)]
pub struct ResetState {
    pub phase: ResetPhase,
    pub timer: f64, // Time remaining in the current phase
}

impl ResetState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_delay(&mut self, delay: f64) {
        self.phase = ResetPhase::AwaitingReset;
        self.timer = delay;
    }

    pub fn start_settle(&mut self, settle: f64) {
        self.phase = ResetPhase::Settling;
        self.timer = settle;
    }

    pub fn go_live(&mut self) {
        self.phase = ResetPhase::Live;
        self.timer = 0.0;
    }

    pub fn update(&mut self, dt: f64) {
        if self.timer > 0.0 {
            self.timer = (self.timer - dt).max(0.0);
        }
    }

    pub fn is_live(&self) -> bool {
        self.phase == ResetPhase::Live
    }

    /// Goals count again once the puck is back at the centre
    pub fn goals_armed(&self) -> bool {
        self.phase != ResetPhase::AwaitingReset
    }

    pub fn is_elapsed(&self) -> bool {
        self.timer <= 0.0
    }
}

/// Pointer input queue, filled by the host between steps
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pub pointers: Vec<DVec2>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.pointers.clear();
    }

    pub fn push_pointer(&mut self, pos: DVec2) {
        self.pointers.push(pos);
    }

    /// Most recent pointer position, draining the queue
    pub fn take_latest(&mut self) -> Option<DVec2> {
        let latest = self.pointers.last().copied();
        self.pointers.clear();
        latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_increment() {
        let mut score = Score::new();
        score.increment(Side::Player);
        score.increment(Side::Player);
        score.increment(Side::Cpu);
        assert_eq!(score.player, 2);
        assert_eq!(score.cpu, 1);
    }

    #[test]
    fn test_score_outcome() {
        let mut score = Score::new();
        assert_eq!(score.outcome(3), None);

        score.player = 3;
        assert_eq!(score.outcome(3), Some(Outcome::PlayerWins));

        score.cpu = 3;
        assert_eq!(score.outcome(3), Some(Outcome::Draw));

        score.player = 2;
        assert_eq!(score.outcome(3), Some(Outcome::CpuWins));
    }

    #[test]
    fn test_events_clear() {
        let mut events = Events::new();
        events.player_scored = true;
        events.puck_nudged = true;
        assert!(events.goal_scored());

        events.clear();
        assert_eq!(events, Events::default());
        assert!(!events.goal_scored());
    }

    #[test]
    fn test_reset_state_timers() {
        let mut reset = ResetState::new();
        assert!(reset.is_live());

        reset.start_delay(1.5);
        assert_eq!(reset.phase, ResetPhase::AwaitingReset);
        assert!(!reset.goals_armed());
        reset.update(1.0);
        assert!(!reset.is_elapsed());
        reset.update(1.0);
        assert!(reset.is_elapsed());
        assert_eq!(reset.timer, 0.0);

        reset.start_settle(0.5);
        assert_eq!(reset.phase, ResetPhase::Settling);
        assert!(reset.goals_armed());
        reset.go_live();
        assert!(reset.is_live());
    }

    #[test]
    fn test_input_queue_keeps_latest() {
        let mut queue = InputQueue::new();
        queue.push_pointer(DVec2::new(0.1, 1.0));
        queue.push_pointer(DVec2::new(0.2, 1.5));

        assert_eq!(queue.take_latest(), Some(DVec2::new(0.2, 1.5)));
        assert!(queue.pointers.is_empty());
        assert_eq!(queue.take_latest(), None);
    }
}
