//! Game state and core simulation types
//!
//! Everything the frame pipeline reads or writes lives here. Rendering, UI
//! and audio layers only ever see it through snapshots and drained events.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level::{Level, LevelError, LevelId};
#[cfg(test)]
use super::level::LEVEL_COUNT;
use crate::Rect;
use crate::consts::HEAD_OFFSET_Y;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Timer and physics frozen, entity state kept
    Paused,
    /// Lives ran out; frozen until reset
    GameOver,
    /// Finish line reached; frozen until advance or reset
    LevelComplete,
}

impl GamePhase {
    /// True when physics, timers and input are frozen
    #[inline]
    pub fn is_frozen(self) -> bool {
        !matches!(self, GamePhase::Playing)
    }

    /// True for phases that only an explicit reset/advance can leave
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::LevelComplete)
    }
}

/// The player's kinematic body
///
/// The ragdoll limbs drawn by the renderer are fixed offsets from `pos`;
/// only this box takes part in the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Velocity in world units per step
    pub vel: Vec2,
    pub width: f32,
    pub height: f32,
    pub is_grounded: bool,
    /// Drag gesture in progress
    pub is_stretching: bool,
    /// Armed launch power (0..=max_stretch_power)
    pub stretch_power: f32,
    /// Launch direction (radians)
    pub stretch_angle: f32,
    /// Released launch waiting for the next integration step
    #[serde(default)]
    pub launch_pending: bool,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        let mut player = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            width: tuning.player_width,
            height: tuning.player_height,
            is_grounded: false,
            is_stretching: false,
            stretch_power: 0.0,
            stretch_angle: 0.0,
            launch_pending: false,
        };
        player.respawn(tuning);
        player
    }

    /// Return to the level spawn point at rest
    pub fn respawn(&mut self, tuning: &Tuning) {
        self.pos = Vec2::new(tuning.world_width * 0.1, tuning.world_height * 0.6);
        self.vel = Vec2::ZERO;
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Head anchor used as the slingshot origin
    #[inline]
    pub fn head(&self) -> Vec2 {
        self.center() + Vec2::new(0.0, HEAD_OFFSET_Y)
    }

    /// Jump if grounded (no double jump). Returns true if the jump happened.
    pub fn jump(&mut self, tuning: &Tuning) -> bool {
        if !self.is_grounded {
            return false;
        }
        self.vel.y = tuning.jump_force;
        self.is_grounded = false;
        true
    }

    /// Set horizontal velocity from a direction in {-1, 0, 1}
    pub fn move_dir(&mut self, direction: i8, tuning: &Tuning) {
        self.vel.x = f32::from(direction.signum()) * tuning.move_speed;
    }

    /// Advance one step: gravity, motion, floor/wall clamps, damping, then
    /// any released launch impulse (consumed exactly once).
    pub fn integrate(&mut self, tuning: &Tuning) {
        self.vel.y += tuning.gravity;
        self.pos += self.vel;

        let floor = tuning.floor_y();
        if self.bottom() > floor {
            self.pos.y = floor - self.height;
            self.vel.y = 0.0;
            self.is_grounded = true;
        }

        let max_x = tuning.world_width - self.width;
        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
            self.vel.x = 0.0;
        } else if self.pos.x > max_x {
            self.pos.x = max_x;
            self.vel.x = 0.0;
        }

        self.vel.x *= tuning.damping_x;
        self.vel.y *= tuning.damping_y;

        if self.launch_pending {
            if self.stretch_power > 0.0 {
                let impulse = self.stretch_power * tuning.launch_factor;
                self.vel.x += self.stretch_angle.cos() * impulse;
                self.vel.y += self.stretch_angle.sin() * impulse;
            }
            self.launch_pending = false;
            self.stretch_power = 0.0;
        }
    }
}

/// Platform surface behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlatformKind {
    /// Full-width floor slab
    Ground,
    #[default]
    Normal,
    /// Amplifies horizontal speed on every contact frame
    Ice,
    /// Relaunches the player upward instead of resting
    Bouncy,
    /// Drifts horizontally with elapsed time
    Moving,
}

/// A platform entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    pub kind: PlatformKind,
}

impl Platform {
    pub const fn new(x: f32, y: f32, width: f32, height: f32, kind: PlatformKind) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            kind,
        }
    }

    /// Drift a moving platform; other kinds are static
    pub fn drift(&mut self, elapsed_secs: f32, amplitude: f32) {
        if self.kind == PlatformKind::Moving {
            self.rect.x += elapsed_secs.sin() * amplitude;
        }
    }
}

/// A collectible coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub center: Vec2,
    pub radius: f32,
    /// Permanently inert once set (until the level is rebuilt)
    pub collected: bool,
    /// Render bob phase
    pub anim_phase: f32,
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObstacleKind {
    #[default]
    Spike,
}

/// A damaging obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub rect: Rect,
    pub kind: ObstacleKind,
}

/// Level goal; only the player's position point is tested against it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinishLine {
    pub rect: Rect,
}

/// Sound cue consumed by the audio layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    Jump,
    Coin,
    Hurt,
    Win,
}

/// Transient gameplay notification, drained once per frame by UI/audio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    CoinCollected { x: f32, y: f32 },
    ObstacleHit,
    Jumped,
    Bounced,
    LevelCompleted { final_score: u64, final_time: f32, lives: u8 },
    GameOverTriggered { score: u64, level: u32 },
}

impl GameEvent {
    /// Sound to play for this event, if any
    pub fn sound(&self) -> Option<SoundCue> {
        match self {
            GameEvent::CoinCollected { .. } => Some(SoundCue::Coin),
            GameEvent::ObstacleHit => Some(SoundCue::Hurt),
            GameEvent::Jumped | GameEvent::Bounced => Some(SoundCue::Jump),
            GameEvent::LevelCompleted { .. } => Some(SoundCue::Win),
            GameEvent::GameOverTriggered { .. } => None,
        }
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    /// Current level
    pub level: LevelId,
    /// Score (never decreases within an attempt)
    pub score: u64,
    /// Remaining lives (floor 0)
    pub lives: u8,
    /// Seconds spent Playing on this level, derived from `level_ticks`
    pub elapsed_secs: f32,
    /// Steps spent Playing on this level
    pub level_ticks: u64,
    /// Simulation step counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub player: Player,
    /// World geometry for the current level
    pub world: Level,
    /// Final score computed on level completion
    pub final_score: Option<u64>,
    /// Events emitted since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Start a fresh session on the first level
    pub fn new(tuning: Tuning) -> Self {
        Self::with_level(LevelId::FIRST, tuning)
    }

    /// Start a fresh session on a specific level
    pub fn start_at(level: u32, tuning: Tuning) -> Result<Self, LevelError> {
        Ok(Self::with_level(LevelId::new(level)?, tuning))
    }

    fn with_level(level: LevelId, tuning: Tuning) -> Self {
        let world = Level::build(level, &tuning);
        let player = Player::new(&tuning);
        log::info!("Session start on level {}", level.get());
        Self {
            level,
            score: 0,
            lives: tuning.starting_lives,
            elapsed_secs: 0.0,
            level_ticks: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            player,
            world,
            final_score: None,
            events: Vec::new(),
            tuning,
        }
    }

    /// Reload the current level's geometry and respawn the player.
    /// Stretch state is cleared so no launch carries across the reload.
    fn load_level(&mut self) {
        self.world = Level::build(self.level, &self.tuning);
        self.player.respawn(&self.tuning);
        self.player.is_grounded = false;
        self.player.is_stretching = false;
        self.player.launch_pending = false;
        self.player.stretch_power = 0.0;
        self.elapsed_secs = 0.0;
        self.level_ticks = 0;
        self.final_score = None;
        self.phase = GamePhase::Playing;
    }

    /// Restart the current level from scratch: starting lives, zero score.
    /// This is the only way out of GameOver.
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.load_level();
        log::info!("Level {} reset", self.level.get());
    }

    /// Move on to the next level after a completion. Score and lives carry
    /// over. Returns `Ok(false)` when the level is not complete.
    pub fn advance_level(&mut self) -> Result<bool, LevelError> {
        if self.phase != GamePhase::LevelComplete {
            log::debug!("advance_level ignored in phase {:?}", self.phase);
            return Ok(false);
        }
        self.level = self.level.next()?;
        self.load_level();
        log::info!("Advanced to level {}", self.level.get());
        Ok(true)
    }

    /// Number of coins collected on this level
    pub fn coins_collected(&self) -> usize {
        self.world.coins.iter().filter(|c| c.collected).count()
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Emit an event
    pub(crate) fn emit(&mut self, event: GameEvent) {
        log::debug!("event: {:?}", event);
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grounded_player(tuning: &Tuning) -> Player {
        let mut player = Player::new(tuning);
        player.pos = Vec2::new(200.0, tuning.floor_y() - player.height);
        player.is_grounded = true;
        player
    }

    #[test]
    fn test_jump_from_floor() {
        let tuning = Tuning::default();
        let mut player = grounded_player(&tuning);
        assert!(player.jump(&tuning));
        assert_eq!(player.vel.y, -18.0);
        assert!(!player.is_grounded);
    }

    #[test]
    fn test_no_double_jump() {
        let tuning = Tuning::default();
        let mut player = grounded_player(&tuning);
        player.jump(&tuning);
        player.vel.y = -5.0;
        assert!(!player.jump(&tuning));
        assert_eq!(player.vel.y, -5.0);
    }

    #[test]
    fn test_move_sets_not_accumulates() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.move_dir(1, &tuning);
        player.move_dir(1, &tuning);
        assert_eq!(player.vel.x, 8.0);
        player.move_dir(-1, &tuning);
        assert_eq!(player.vel.x, -8.0);
        player.move_dir(0, &tuning);
        assert_eq!(player.vel.x, 0.0);
    }

    #[test]
    fn test_integrate_gravity_and_damping() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.vel = Vec2::new(10.0, 0.0);
        let start = player.pos;
        player.integrate(&tuning);
        assert_eq!(player.pos, start + Vec2::new(10.0, 0.8));
        assert!((player.vel.x - 9.2).abs() < 1e-5);
        assert!((player.vel.y - 0.8 * 0.995).abs() < 1e-6);
    }

    #[test]
    fn test_integrate_floor_clamp() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.pos.y = tuning.floor_y() - player.height + 5.0;
        player.vel.y = 12.0;
        player.integrate(&tuning);
        assert_eq!(player.bottom(), tuning.floor_y());
        assert_eq!(player.vel.y, 0.0);
        assert!(player.is_grounded);
    }

    #[test]
    fn test_integrate_wall_clamp() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.pos.x = 2.0;
        player.vel.x = -8.0;
        player.integrate(&tuning);
        assert_eq!(player.pos.x, 0.0);
        assert_eq!(player.vel.x, 0.0);

        player.pos.x = tuning.world_width - player.width - 1.0;
        player.vel.x = 8.0;
        player.integrate(&tuning);
        assert_eq!(player.pos.x, tuning.world_width - player.width);
        assert_eq!(player.vel.x, 0.0);
    }

    #[test]
    fn test_event_sounds() {
        assert_eq!(GameEvent::ObstacleHit.sound(), Some(SoundCue::Hurt));
        assert_eq!(GameEvent::Bounced.sound(), Some(SoundCue::Jump));
        assert_eq!(
            GameEvent::GameOverTriggered { score: 0, level: 1 }.sound(),
            None
        );
    }

    #[test]
    fn test_advance_requires_completion() {
        let mut state = GameState::new(Tuning::default());
        assert_eq!(state.advance_level(), Ok(false));
        assert_eq!(state.level.get(), 1);

        state.phase = GamePhase::LevelComplete;
        state.score = 70;
        assert_eq!(state.advance_level(), Ok(true));
        assert_eq!(state.level.get(), 2);
        assert_eq!(state.score, 70);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_advance_past_last_level_fails() {
        let mut state = GameState::start_at(LEVEL_COUNT, Tuning::default()).unwrap();
        state.phase = GamePhase::LevelComplete;
        assert!(state.advance_level().is_err());
        assert_eq!(state.phase, GamePhase::LevelComplete);
    }

    #[test]
    fn test_reset_restores_attempt() {
        let mut state = GameState::start_at(2, Tuning::default()).unwrap();
        state.lives = 0;
        state.score = 90;
        state.elapsed_secs = 33.0;
        state.level_ticks = 1980;
        state.phase = GamePhase::GameOver;
        state.world.coins[0].collected = true;
        state.player.vel = Vec2::new(4.0, -3.0);

        state.reset();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.elapsed_secs, 0.0);
        assert_eq!(state.level_ticks, 0);
        assert_eq!(state.level.get(), 2);
        assert_eq!(state.coins_collected(), 0);
        assert_eq!(state.player.vel, Vec2::ZERO);
    }
}
