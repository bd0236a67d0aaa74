//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - No randomness (levels are built from their number alone)
//! - Stable iteration order (platforms, then coins, then obstacles)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod level;
pub mod snapshot;
pub mod state;
pub mod stretch;
pub mod tick;

pub use collision::{Landing, land_on_platform, touches_coin};
pub use level::{LEVEL_COUNT, Level, LevelError, LevelId, build_level};
pub use snapshot::{HudSnapshot, PlayerSnapshot};
pub use state::{
    Coin, FinishLine, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, Platform,
    PlatformKind, Player, SoundCue,
};
pub use tick::{StretchInput, TickInput, final_score, integrate, tick};
