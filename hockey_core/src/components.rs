use glam::DVec2;

use crate::planner::{InterceptPlanner, PlannerOutput, PuckState};

/// Which end of the table a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player, // positive z
    Cpu,    // negative z
}

/// Paddle component - one per side
#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    pub side: Side,
}

impl Paddle {
    pub fn new(side: Side) -> Self {
        Self { side }
    }
}

/// Position and velocity to apply to a kinematic body in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KinematicBody {
    pub pos: DVec2, // (x, z) on the table plane
    pub vel: DVec2,
}

impl KinematicBody {
    pub fn at(pos: DVec2) -> Self {
        Self {
            pos,
            vel: DVec2::ZERO,
        }
    }
}

/// Pointer intent for the player paddle
#[derive(Debug, Clone, Copy, Default)]
pub struct PaddleIntent {
    pub pointer: Option<DVec2>, // pointer ray hit on the table plane
}

impl PaddleIntent {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Puck component - mirrors the physics world's puck each frame
#[derive(Debug, Clone, Copy, Default)]
pub struct Puck {
    pub state: Option<PuckState>, // None until physics has reported
}

impl Puck {
    pub fn new(state: Option<PuckState>) -> Self {
        Self { state }
    }
}

/// CPU controller attached to the CPU paddle
#[derive(Debug, Clone)]
pub struct CpuBrain {
    pub planner: InterceptPlanner,
    pub last_output: Option<PlannerOutput>,
}

impl CpuBrain {
    pub fn new(planner: InterceptPlanner) -> Self {
        Self {
            planner,
            last_output: None,
        }
    }
}
