/// Game tuning parameters for air hockey
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Table
    pub const TABLE_WIDTH: f64 = 4.0;
    pub const TABLE_HEIGHT: f64 = 6.0;
    pub const BORDER_THICKNESS: f64 = 0.2;
    pub const GOAL_WIDTH: f64 = 2.0;

    // Paddles
    pub const PADDLE_RADIUS: f64 = 0.3;
    pub const PADDLE_HEIGHT: f64 = 0.15;
    pub const CPU_PADDLE_SPEED: f64 = 4.5; // damping rate, 1/s
    pub const VELOCITY_SCALE: f64 = 0.25; // x15 per frame at 60 Hz

    // Puck
    pub const PUCK_RADIUS: f64 = 0.15;
    pub const PUCK_HEIGHT: f64 = 0.1;

    // CPU behaviour
    pub const SLOW_PUCK_SPEED: f64 = 1.0;
    pub const INTERCEPT_MIN_VZ: f64 = 0.5;
    pub const MAX_INTERCEPT_TIME: f64 = 5.0;
    pub const IDLE_SWEEP_DELAY: f64 = 0.5;
    pub const AGGRESSIVE_CLOSE_IN: f64 = 0.7;
    pub const AGGRESSIVE_STRIKE: f64 = 1.0;
    pub const AGGRESSIVE_WRAP: f64 = 2.0;

    // Match
    pub const WIN_SCORE: u8 = 3;
    pub const GOAL_RESET_DELAY: f64 = 1.5;
    pub const KICKOFF_SETTLE: f64 = 0.5;

    // Physics
    pub const MAX_DT: f64 = 0.1; // Clamp to prevent large jumps
}
