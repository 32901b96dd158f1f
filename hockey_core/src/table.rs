use glam::DVec2;

use crate::config::Config;

/// Immutable table geometry, centred on the origin.
///
/// The table lies in the x/z plane. The CPU defends the goal at negative z,
/// the player the goal at positive z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Table {
    pub width: f64,
    pub height: f64,
    pub goal_width: f64,
    pub border_thickness: f64,
    pub paddle_radius: f64,
    pub puck_radius: f64,
    pub puck_height: f64,
}

impl Table {
    pub fn from_config(config: &Config) -> Self {
        Self {
            width: config.table_width,
            height: config.table_height,
            goal_width: config.goal_width,
            border_thickness: config.border_thickness,
            paddle_radius: config.paddle_radius,
            puck_radius: config.puck_radius,
            puck_height: config.puck_height,
        }
    }

    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    pub fn half_height(&self) -> f64 {
        self.height / 2.0
    }

    pub fn goal_half_width(&self) -> f64 {
        self.goal_width / 2.0
    }

    /// Deepest z the CPU paddle may reach (against its own goal line)
    pub fn cpu_z_min(&self) -> f64 {
        -self.half_height() + self.paddle_radius
    }

    /// Shallowest z the CPU paddle may reach (just short of the centre line)
    pub fn cpu_z_max(&self) -> f64 {
        -self.paddle_radius
    }

    pub fn player_z_min(&self) -> f64 {
        self.paddle_radius
    }

    pub fn player_z_max(&self) -> f64 {
        self.half_height() - self.paddle_radius
    }

    /// Largest |x| a paddle centre may take
    pub fn paddle_x_limit(&self) -> f64 {
        self.half_width() - self.paddle_radius
    }

    /// Largest |x| the puck centre reaches before bouncing off a side wall
    pub fn bounce_half_width(&self) -> f64 {
        self.half_width() - self.puck_radius
    }

    /// |z| past which a puck inside the goal mouth counts as scored
    pub fn goal_line(&self) -> f64 {
        self.half_height() + self.border_thickness / 2.0
    }

    pub fn in_goal_mouth(&self, x: f64) -> bool {
        x.abs() < self.goal_half_width()
    }

    /// Clamp a paddle position into the CPU half
    pub fn clamp_cpu(&self, pos: DVec2) -> DVec2 {
        let limit = self.paddle_x_limit();
        DVec2::new(
            clamp_between(pos.x, -limit, limit),
            clamp_between(pos.y, self.cpu_z_min(), self.cpu_z_max()),
        )
    }

    /// Clamp a paddle position into the player half
    pub fn clamp_player(&self, pos: DVec2) -> DVec2 {
        let limit = self.paddle_x_limit();
        DVec2::new(
            clamp_between(pos.x, -limit, limit),
            clamp_between(pos.y, self.player_z_min(), self.player_z_max()),
        )
    }

    /// Where the puck rests before a kick-off
    pub fn puck_spawn(&self) -> glam::DVec3 {
        glam::DVec3::new(0.0, self.puck_height / 2.0 + 0.01, 0.0)
    }

    /// Resting spot of the player paddle
    pub fn player_spawn(&self) -> DVec2 {
        DVec2::new(0.0, self.player_z_max() - 0.5)
    }

    /// Resting spot of the CPU paddle
    pub fn cpu_spawn(&self) -> DVec2 {
        DVec2::new(0.0, self.cpu_z_min() + 0.5)
    }
}

/// `f64::clamp` that tolerates swapped or NaN bounds.
///
/// An oversized paddle inverts the bounds of a half; the value then lands
/// between them instead of panicking.
pub(crate) fn clamp_between(value: f64, a: f64, b: f64) -> f64 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    value.max(lo).min(hi)
}

impl Default for Table {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
