//! Level construction
//!
//! Each level is built from its number alone: a hand-authored platform
//! layout plus coin and spike rows whose counts scale with the level.
//! Rebuilding the same level always yields the same geometry.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Coin, FinishLine, Obstacle, ObstacleKind, Platform, PlatformKind};
use crate::Rect;
use crate::consts::COIN_RADIUS;
use crate::tuning::Tuning;

/// Number of hand-authored levels
pub const LEVEL_COUNT: u32 = 3;

/// Level construction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelError {
    /// Requested level has no layout
    OutOfRange { requested: u32, max: u32 },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::OutOfRange { requested, max } => {
                write!(f, "level {requested} is out of range (valid levels are 1..={max})")
            }
        }
    }
}

impl std::error::Error for LevelError {}

/// A validated level number in `1..=LEVEL_COUNT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct LevelId(u32);

impl LevelId {
    pub const FIRST: LevelId = LevelId(1);

    pub fn new(level: u32) -> Result<Self, LevelError> {
        if (1..=LEVEL_COUNT).contains(&level) {
            Ok(Self(level))
        } else {
            Err(LevelError::OutOfRange {
                requested: level,
                max: LEVEL_COUNT,
            })
        }
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// The following level, if one exists
    pub fn next(self) -> Result<Self, LevelError> {
        Self::new(self.0 + 1)
    }
}

impl TryFrom<u32> for LevelId {
    type Error = LevelError;

    fn try_from(level: u32) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<LevelId> for u32 {
    fn from(level: LevelId) -> Self {
        level.0
    }
}

/// World geometry for one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub platforms: Vec<Platform>,
    pub coins: Vec<Coin>,
    pub obstacles: Vec<Obstacle>,
    pub finish: FinishLine,
}

/// Build the geometry for a level number, failing on unknown levels
pub fn build_level(level: u32, tuning: &Tuning) -> Result<Level, LevelError> {
    LevelId::new(level).map(|id| Level::build(id, tuning))
}

impl Level {
    /// Build the geometry for a validated level
    pub fn build(level: LevelId, tuning: &Tuning) -> Self {
        let platforms = build_platforms(level, tuning);
        let coins = build_coins(level, tuning);
        let obstacles = build_obstacles(level, tuning);
        let finish = FinishLine {
            rect: Rect::new(
                tuning.world_width - 100.0,
                tuning.world_height - 400.0,
                50.0,
                80.0,
            ),
        };

        log::info!(
            "Level {}: {} platforms, {} coins, {} obstacles",
            level.get(),
            platforms.len(),
            coins.len(),
            obstacles.len()
        );

        Self {
            platforms,
            coins,
            obstacles,
            finish,
        }
    }
}

fn build_platforms(level: LevelId, tuning: &Tuning) -> Vec<Platform> {
    use PlatformKind::*;

    let h = tuning.world_height;
    let mut platforms = vec![Platform::new(
        0.0,
        tuning.floor_y(),
        tuning.world_width,
        tuning.floor_offset,
        Ground,
    )];

    // (x, height above world bottom, width, kind)
    let layout: &[(f32, f32, f32, PlatformKind)] = match level.get() {
        1 => &[
            (200.0, 200.0, 150.0, Normal),
            (450.0, 300.0, 150.0, Normal),
            (700.0, 250.0, 150.0, Normal),
        ],
        2 => &[
            (150.0, 180.0, 120.0, Ice),
            (350.0, 280.0, 120.0, Bouncy),
            (550.0, 220.0, 120.0, Normal),
            (750.0, 320.0, 120.0, Moving),
        ],
        _ => &[
            (100.0, 150.0, 100.0, Normal),
            (250.0, 250.0, 100.0, Bouncy),
            (400.0, 200.0, 100.0, Ice),
            (550.0, 300.0, 100.0, Normal),
            (700.0, 180.0, 100.0, Moving),
        ],
    };

    platforms.extend(
        layout
            .iter()
            .map(|&(x, rise, width, kind)| Platform::new(x, h - rise, width, 20.0, kind)),
    );
    platforms
}

fn build_coins(level: LevelId, tuning: &Tuning) -> Vec<Coin> {
    let count = 5 + level.get() * 2;
    (0..count)
        .map(|i| {
            let i = i as f32;
            Coin {
                center: Vec2::new(100.0 + i * 120.0, tuning.world_height - 200.0 - i.sin() * 50.0),
                radius: COIN_RADIUS,
                collected: false,
                anim_phase: i * 0.5,
            }
        })
        .collect()
}

fn build_obstacles(level: LevelId, tuning: &Tuning) -> Vec<Obstacle> {
    (0..level.get())
        .map(|i| Obstacle {
            rect: Rect::new(
                300.0 + i as f32 * 200.0,
                tuning.world_height - 140.0,
                40.0,
                60.0,
            ),
            kind: ObstacleKind::Spike,
        })
        .collect()
}
