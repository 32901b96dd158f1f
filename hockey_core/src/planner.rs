//! CPU opponent for the air hockey table.
//!
//! Each tick the planner looks at the puck, picks one of three behaviours
//! (pursue a stalled puck, intercept an incoming one, or idle), and eases the
//! paddle toward the chosen spot with exponential damping. The only history it
//! keeps is a pair of timers and the last smoothed target.

use glam::{DVec2, DVec3};
use log::{trace, warn};

use crate::config::{Config, ConfigError};
use crate::params::Params;
use crate::table::{clamp_between, Table};

/// Physics snapshot of the puck for one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PuckState {
    pub position: DVec3,
    pub velocity: DVec3,
}

impl PuckState {
    pub fn new(position: DVec3, velocity: DVec3) -> Self {
        Self { position, velocity }
    }

    /// Speed across the table surface, ignoring the vertical component
    pub fn planar_speed(&self) -> f64 {
        DVec2::new(self.velocity.x, self.velocity.z).length()
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

/// Where the CPU paddle should be, on the table plane
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PaddleTarget {
    pub x: f64,
    pub z: f64,
}

impl PaddleTarget {
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    pub fn as_vec2(&self) -> DVec2 {
        DVec2::new(self.x, self.z)
    }
}

impl From<DVec2> for PaddleTarget {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, z: v.y }
    }
}

/// Behaviour chosen for a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Aggressive,
    Intercept,
}

/// State carried from one tick to the next
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerState {
    pub idle_timer: f64,
    pub aggressive_timer: f64,
    pub last_target: PaddleTarget,
}

impl PlannerState {
    pub fn new(table: &Table) -> Self {
        Self {
            idle_timer: 0.0,
            aggressive_timer: 0.0,
            last_target: table.cpu_spawn().into(),
        }
    }
}

/// Result of one planner tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerOutput {
    /// Smoothed position to hand to the kinematic paddle body
    pub target: PaddleTarget,
    /// Velocity consistent with the paddle's apparent motion this tick
    pub velocity: DVec2,
    /// Raw target of the chosen behaviour, before smoothing
    pub desired: Option<PaddleTarget>,
    /// `None` when the tick was skipped entirely
    pub mode: Option<Mode>,
}

/// Frame-rate independent exponential approach of `current` toward `target`.
pub fn damp(current: f64, target: f64, lambda: f64, dt: f64) -> f64 {
    let t = 1.0 - (-lambda * dt).exp();
    current + (target - current) * t
}

/// Fold `x` back into `[-half_width, half_width]` as if it bounced elastically
/// off walls at both edges, however many times it overshoots.
///
/// Returns `None` for non-finite input.
pub fn reflect_into_range(x: f64, half_width: f64) -> Option<f64> {
    if !x.is_finite() || !half_width.is_finite() {
        return None;
    }
    if half_width <= 0.0 {
        return Some(0.0);
    }
    if x.abs() <= half_width {
        return Some(x);
    }

    // Unfolded motion repeats every two widths.
    let period = 4.0 * half_width;
    let m = (x + half_width).rem_euclid(period);
    let folded = if m <= 2.0 * half_width {
        m - half_width
    } else {
        3.0 * half_width - m
    };
    Some(folded)
}

/// Predict the puck's x when it reaches depth `target_z`, bouncing off the
/// side walls. `None` if the puck is not heading toward negative z or would
/// take longer than [`Params::MAX_INTERCEPT_TIME`] to get there.
pub fn predict_intercept_x(
    position: DVec3,
    velocity: DVec3,
    target_z: f64,
    half_width: f64,
) -> Option<f64> {
    if velocity.z >= 0.0 || velocity.z.abs() < 0.1 {
        return None;
    }

    let time = (target_z - position.z) / velocity.z;
    if !(0.0..=Params::MAX_INTERCEPT_TIME).contains(&time) {
        return None;
    }

    reflect_into_range(position.x + velocity.x * time, half_width)
}

/// CPU paddle controller
#[derive(Debug, Clone)]
pub struct InterceptPlanner {
    table: Table,
    damping: f64,
    velocity_scale: f64,
    state: PlannerState,
}

impl InterceptPlanner {
    /// Geometry that leaves the paddle no room still yields finite targets,
    /// pinned between the inverted bounds.
    pub fn new(table: Table, damping: f64, velocity_scale: f64) -> Self {
        Self {
            state: PlannerState::new(&table),
            table,
            damping,
            velocity_scale,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(
            config.table(),
            config.cpu_paddle_speed,
            config.velocity_scale,
        ))
    }

    pub fn state(&self) -> &PlannerState {
        &self.state
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Back to the state of a fresh game
    pub fn reset(&mut self) {
        self.state = PlannerState::new(&self.table);
    }

    /// Advance one tick. Without a usable puck snapshot or with a bad `delta`
    /// the paddle holds its last target.
    pub fn advance(&mut self, puck: Option<&PuckState>, delta: f64) -> PlannerOutput {
        if !(delta.is_finite() && delta >= 0.0) {
            warn!("cpu planner: ignoring tick with delta {delta}");
            return self.hold(None);
        }
        let Some(puck) = puck.filter(|p| p.is_finite()) else {
            return self.hold(None);
        };

        let (mode, desired) = self.select(puck, delta);
        let Some(desired) = desired else {
            trace!("cpu planner: {mode:?} without a usable prediction, holding");
            return self.hold(Some(mode));
        };
        let desired = self.table.clamp_cpu(desired);

        let previous = self.state.last_target.as_vec2();
        let smoothed = DVec2::new(
            damp(previous.x, desired.x, self.damping, delta),
            damp(previous.y, desired.y, self.damping, delta),
        );
        let smoothed = self.table.clamp_cpu(smoothed);
        self.state.last_target = smoothed.into();

        let velocity = if delta > 0.0 {
            (smoothed - previous) / delta * self.velocity_scale
        } else {
            DVec2::ZERO
        };

        trace!(
            "cpu planner: {mode:?} desired ({:.3}, {:.3}) -> ({:.3}, {:.3})",
            desired.x,
            desired.y,
            smoothed.x,
            smoothed.y
        );

        PlannerOutput {
            target: self.state.last_target,
            velocity,
            desired: Some(desired.into()),
            mode: Some(mode),
        }
    }

    fn hold(&self, mode: Option<Mode>) -> PlannerOutput {
        PlannerOutput {
            target: self.state.last_target,
            velocity: DVec2::ZERO,
            desired: None,
            mode,
        }
    }

    /// Pick this tick's behaviour and its raw target, updating the timers.
    fn select(&mut self, puck: &PuckState, delta: f64) -> (Mode, Option<DVec2>) {
        let pos = puck.position;
        let vel = puck.velocity;
        let speed = puck.planar_speed();
        let table = self.table;
        let (z_min, z_max) = (table.cpu_z_min(), table.cpu_z_max());

        // A slow puck on our side would otherwise sit there forever.
        if pos.z < 0.0 && speed < Params::SLOW_PUCK_SPEED {
            self.state.idle_timer = 0.0;
            self.state.aggressive_timer += delta;
            let timer = self.state.aggressive_timer;

            let reach = table.half_width() - table.paddle_radius * 1.2;
            let keep = if timer > Params::AGGRESSIVE_CLOSE_IN { 0.1 } else { 0.3 };
            let mut target = DVec2::new(
                clamp_between(pos.x, -reach, reach),
                (pos.z - keep).min(z_max - 0.2).max(z_min + 0.2),
            );

            if timer > Params::AGGRESSIVE_STRIKE {
                target = DVec2::new(pos.x, pos.z);
                if timer > Params::AGGRESSIVE_WRAP {
                    self.state.aggressive_timer = 0.0;
                }
            }

            return (Mode::Aggressive, Some(target));
        }

        if vel.z < -Params::INTERCEPT_MIN_VZ && pos.z > z_max {
            self.state.idle_timer = 0.0;
            self.state.aggressive_timer = 0.0;

            // Hang back for fast shots, step out to meet slow ones.
            let intercept_z = if speed > 5.0 {
                z_min + 0.5
            } else if speed > 2.0 {
                z_min + 1.0
            } else {
                (z_max - 0.5).min(pos.z - 1.0)
            };

            let target = predict_intercept_x(pos, vel, intercept_z, table.bounce_half_width())
                .map(|x| {
                    let limit = table.paddle_x_limit();
                    let mut x = clamp_between(x, -limit, limit);
                    if pos.z < z_max && (pos.z - intercept_z).abs() < 1.0 {
                        x = pos.x;
                    }
                    DVec2::new(x, intercept_z)
                });

            return (Mode::Intercept, target);
        }

        self.state.aggressive_timer = 0.0;
        self.state.idle_timer += delta;
        let idle = self.state.idle_timer;

        let target = if idle > Params::IDLE_SWEEP_DELAY {
            DVec2::new(
                (idle * 0.8).sin() * (table.width / 4.0),
                z_min + 0.5 + (idle * 0.3).sin() * 0.3,
            )
        } else {
            DVec2::new(0.0, z_min + 0.7)
        };

        (Mode::Idle, Some(target))
    }
}
