use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::params::Params;
use crate::table::Table;

/// Errors raised while building or loading a [`Config`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must be non-negative and finite, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("goal width {goal_width} does not fit a table {table_width} wide")]
    GoalTooWide { goal_width: f64, table_width: f64 },

    #[error("paddle radius {radius} leaves no room on a {width}x{height} table")]
    PaddleTooLarge { radius: f64, width: f64, height: f64 },

    #[error("puck radius {radius} leaves no room on a table {width} wide")]
    PuckTooLarge { radius: f64, width: f64 },

    #[error("win score must be at least 1")]
    ZeroWinScore,

    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub table_width: f64,
    pub table_height: f64,
    pub border_thickness: f64,
    pub goal_width: f64,
    pub paddle_radius: f64,
    pub paddle_height: f64,
    pub puck_radius: f64,
    pub puck_height: f64,
    pub cpu_paddle_speed: f64,
    pub velocity_scale: f64,
    pub win_score: u8,
    /// Credit both sides on every goal
    pub mirrored_scoring: bool,
    pub goal_reset_delay: f64,
    pub kickoff_settle: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_width: Params::TABLE_WIDTH,
            table_height: Params::TABLE_HEIGHT,
            border_thickness: Params::BORDER_THICKNESS,
            goal_width: Params::GOAL_WIDTH,
            paddle_radius: Params::PADDLE_RADIUS,
            paddle_height: Params::PADDLE_HEIGHT,
            puck_radius: Params::PUCK_RADIUS,
            puck_height: Params::PUCK_HEIGHT,
            cpu_paddle_speed: Params::CPU_PADDLE_SPEED,
            velocity_scale: Params::VELOCITY_SCALE,
            win_score: Params::WIN_SCORE,
            mirrored_scoring: true,
            goal_reset_delay: Params::GOAL_RESET_DELAY,
            kickoff_settle: Params::KICKOFF_SETTLE,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) JSON document; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("table_width", self.table_width),
            ("table_height", self.table_height),
            ("border_thickness", self.border_thickness),
            ("goal_width", self.goal_width),
            ("paddle_radius", self.paddle_radius),
            ("paddle_height", self.paddle_height),
            ("puck_radius", self.puck_radius),
            ("puck_height", self.puck_height),
            ("cpu_paddle_speed", self.cpu_paddle_speed),
            ("velocity_scale", self.velocity_scale),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        for (field, value) in [
            ("goal_reset_delay", self.goal_reset_delay),
            ("kickoff_settle", self.kickoff_settle),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.win_score == 0 {
            return Err(ConfigError::ZeroWinScore);
        }

        if self.goal_width >= self.table_width {
            return Err(ConfigError::GoalTooWide {
                goal_width: self.goal_width,
                table_width: self.table_width,
            });
        }

        // Each half needs a non-empty z range and the pursuit x range must be non-empty.
        if 4.0 * self.paddle_radius >= self.table_height
            || 2.4 * self.paddle_radius >= self.table_width
        {
            return Err(ConfigError::PaddleTooLarge {
                radius: self.paddle_radius,
                width: self.table_width,
                height: self.table_height,
            });
        }

        if 2.0 * self.puck_radius >= self.table_width {
            return Err(ConfigError::PuckTooLarge {
                radius: self.puck_radius,
                width: self.table_width,
            });
        }

        Ok(())
    }

    /// Build the immutable table geometry
    pub fn table(&self) -> Table {
        Table::from_config(self)
    }
}
