//! Ragdoll Dash - A side-scrolling ragdoll platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `driver`: Fixed-timestep frame driver fed by external input snapshots
//! - `tuning`: Data-driven physics and scoring constants
//!
//! Rendering, DOM/UI text, audio playback and raw input listeners live
//! outside this crate. They read snapshots and drain events each frame.

pub mod driver;
pub mod sim;
pub mod tuning;

pub use driver::FrameDriver;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;
    /// Largest real-time delta accepted by the driver (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// World dimensions
    pub const WORLD_WIDTH: f32 = 1280.0;
    pub const WORLD_HEIGHT: f32 = 720.0;
    /// Floor line sits this far above the bottom of the world
    pub const FLOOR_OFFSET: f32 = 100.0;

    /// Player body
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const PLAYER_SPEED: f32 = 8.0;
    pub const JUMP_FORCE: f32 = -18.0;
    pub const GRAVITY: f32 = 0.8;
    pub const DAMPING_X: f32 = 0.92;
    pub const DAMPING_Y: f32 = 0.995;
    /// Head anchor relative to the body center
    pub const HEAD_OFFSET_Y: f32 = -20.0;
    pub const STARTING_LIVES: u8 = 3;

    /// Stretch-launch
    pub const STRETCH_DIVISOR: f32 = 5.0;
    pub const MAX_STRETCH_POWER: f32 = 50.0;
    pub const LAUNCH_FACTOR: f32 = 0.5;
    /// Releases above this power count as a jump (sound cue)
    pub const LAUNCH_SOUND_THRESHOLD: f32 = 5.0;

    /// Platform contact
    pub const LANDING_TOLERANCE: f32 = 10.0;
    pub const BOUNCE_VELOCITY: f32 = -25.0;
    pub const ICE_FACTOR: f32 = 1.1;
    pub const MOVING_PLATFORM_AMPLITUDE: f32 = 2.0;

    /// Obstacle knockback
    pub const KNOCKBACK_X: f32 = 15.0;
    pub const KNOCKBACK_Y: f32 = -10.0;

    /// Scoring
    pub const COIN_VALUE: u64 = 10;
    pub const TIME_BONUS_WINDOW_SECS: u64 = 300;
    pub const TIME_BONUS_PER_SEC: u64 = 10;
    pub const LIFE_BONUS: u64 = 100;
    pub const COIN_BONUS: u64 = 20;

    /// Coin defaults
    pub const COIN_RADIUS: f32 = 12.0;
    pub const COIN_ANIM_STEP: f32 = 0.1;
}

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Strict point-in-rectangle test (edges excluded)
#[inline]
pub fn point_in_rect(point: Vec2, rect: &Rect) -> bool {
    point.x > rect.x && point.x < rect.right() && point.y > rect.y && point.y < rect.bottom()
}

/// Strict rectangle overlap test (touching edges do not overlap)
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Format seconds as a `MM:SS` clock
pub fn format_clock(secs: f32) -> String {
    let whole = secs.max(0.0).floor() as u64;
    format!("{:02}:{:02}", whole / 60, whole % 60)
}
