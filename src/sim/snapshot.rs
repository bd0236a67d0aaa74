//! Read-only views for the renderer and HUD
//!
//! Copies of the fields those layers need, so they never hold a borrow of
//! the live state across a frame.

use glam::Vec2;
use serde::Serialize;

use super::state::{GamePhase, GameState, Player};

/// Player body as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Ragdoll head anchor (limbs are drawn at fixed offsets from it)
    pub head: Vec2,
    pub grounded: bool,
    pub stretching: bool,
    pub stretch_power: f32,
    pub stretch_angle: f32,
}

impl From<&Player> for PlayerSnapshot {
    fn from(player: &Player) -> Self {
        Self {
            pos: player.pos,
            vel: player.vel,
            size: Vec2::new(player.width, player.height),
            head: player.head(),
            grounded: player.is_grounded,
            stretching: player.is_stretching,
            stretch_power: player.stretch_power,
            stretch_angle: player.stretch_angle,
        }
    }
}

/// Session counters for the HUD text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub score: u64,
    pub lives: u8,
    pub elapsed_secs: f32,
    /// `MM:SS` form of `elapsed_secs`
    pub clock: String,
    pub level: u32,
    pub phase: GamePhase,
    pub coins_collected: usize,
    pub coins_total: usize,
    pub final_score: Option<u64>,
}

impl From<&GameState> for HudSnapshot {
    fn from(state: &GameState) -> Self {
        Self {
            score: state.score,
            lives: state.lives,
            elapsed_secs: state.elapsed_secs,
            clock: crate::format_clock(state.elapsed_secs),
            level: state.level.get(),
            phase: state.phase,
            coins_collected: state.coins_collected(),
            coins_total: state.world.coins.len(),
            final_score: state.final_score,
        }
    }
}
