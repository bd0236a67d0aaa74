//! Data-driven game balance
//!
//! Every physics, world and scoring constant the simulation reads. Defaults
//! mirror `crate::consts`; a JSON document may override any subset.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Physics, world and scoring tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,
    /// Distance from the bottom of the world to the floor line
    pub floor_offset: f32,

    // === Player body ===
    pub player_width: f32,
    pub player_height: f32,
    pub move_speed: f32,
    pub jump_force: f32,
    pub gravity: f32,
    pub damping_x: f32,
    pub damping_y: f32,
    pub starting_lives: u8,

    // === Stretch-launch ===
    pub stretch_divisor: f32,
    pub max_stretch_power: f32,
    pub launch_factor: f32,
    pub launch_sound_threshold: f32,

    // === Platforms ===
    pub landing_tolerance: f32,
    pub bounce_velocity: f32,
    pub ice_factor: f32,
    pub moving_platform_amplitude: f32,

    // === Obstacles ===
    pub knockback_x: f32,
    pub knockback_y: f32,

    // === Scoring ===
    pub coin_value: u64,
    pub time_bonus_window_secs: u64,
    pub time_bonus_per_sec: u64,
    pub life_bonus: u64,
    pub coin_bonus: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            floor_offset: FLOOR_OFFSET,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            move_speed: PLAYER_SPEED,
            jump_force: JUMP_FORCE,
            gravity: GRAVITY,
            damping_x: DAMPING_X,
            damping_y: DAMPING_Y,
            starting_lives: STARTING_LIVES,

            stretch_divisor: STRETCH_DIVISOR,
            max_stretch_power: MAX_STRETCH_POWER,
            launch_factor: LAUNCH_FACTOR,
            launch_sound_threshold: LAUNCH_SOUND_THRESHOLD,

            landing_tolerance: LANDING_TOLERANCE,
            bounce_velocity: BOUNCE_VELOCITY,
            ice_factor: ICE_FACTOR,
            moving_platform_amplitude: MOVING_PLATFORM_AMPLITUDE,

            knockback_x: KNOCKBACK_X,
            knockback_y: KNOCKBACK_Y,

            coin_value: COIN_VALUE,
            time_bonus_window_secs: TIME_BONUS_WINDOW_SECS,
            time_bonus_per_sec: TIME_BONUS_PER_SEC,
            life_bonus: LIFE_BONUS,
            coin_bonus: COIN_BONUS,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning document
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to pretty JSON
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Y coordinate of the world floor line
    #[inline]
    pub fn floor_y(&self) -> f32 {
        self.world_height - self.floor_offset
    }

    /// Human-readable warnings for values that make the game misbehave
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.world_width <= 0.0 || self.world_height <= 0.0 {
            warnings.push(format!(
                "world size must be positive (got {}x{})",
                self.world_width, self.world_height
            ));
        }
        if self.player_width <= 0.0 || self.player_height <= 0.0 {
            warnings.push(format!(
                "player size must be positive (got {}x{})",
                self.player_width, self.player_height
            ));
        }
        if self.player_width > self.world_width {
            warnings.push("player is wider than the world".to_string());
        }
        for (name, value) in [("damping_x", self.damping_x), ("damping_y", self.damping_y)] {
            if value <= 0.0 || value > 1.0 {
                warnings.push(format!("{name} should be in (0, 1] (got {value})"));
            }
        }
        if self.ice_factor <= 1.0 {
            warnings.push(format!(
                "ice_factor should exceed 1.0 to make ice slide (got {})",
                self.ice_factor
            ));
        }
        if self.jump_force >= 0.0 {
            warnings.push(format!("jump_force must be negative (got {})", self.jump_force));
        }
        if self.bounce_velocity >= 0.0 {
            warnings.push(format!(
                "bounce_velocity must be negative (got {})",
                self.bounce_velocity
            ));
        }
        if self.stretch_divisor <= 0.0 {
            warnings.push(format!(
                "stretch_divisor must be positive (got {})",
                self.stretch_divisor
            ));
        }
        if self.starting_lives == 0 {
            warnings.push("starting_lives is 0; every run starts lost".to_string());
        }

        warnings
    }

    /// Log any validation warnings, returning how many were found
    pub fn log_warnings(&self) -> usize {
        let warnings = self.validate();
        for w in &warnings {
            log::warn!("tuning: {w}");
        }
        warnings.len()
    }
}
