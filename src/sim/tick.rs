//! Fixed timestep simulation tick
//!
//! One step of the game: input, integration, world motion, collision
//! resolution, then the finish-line check.

use glam::Vec2;

use super::collision;
use super::state::{GameEvent, GamePhase, GameState};
use super::stretch;
use crate::point_in_rect;
use crate::tuning::Tuning;

/// Pointer state of the stretch gesture for one step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StretchInput {
    /// Pointer held down
    pub active: bool,
    /// Pointer position in world coordinates
    pub pos: Vec2,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Horizontal direction: -1, 0 or 1. Zero leaves velocity to damping.
    pub move_direction: i8,
    /// Jump (one-shot)
    pub jump: bool,
    /// Pause toggle (one-shot)
    pub pause_toggle: bool,
    /// Stretch gesture, `None` when no pointer is down
    pub stretch: Option<StretchInput>,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.pause_toggle {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::debug!("Paused at {:.2}s", state.elapsed_secs);
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::debug!("Resumed");
            }
            _ => {}
        }
    }

    if state.phase.is_frozen() {
        return;
    }

    state.time_ticks += 1;
    state.level_ticks += 1;
    // Derived from the step count; summing f32 steps drifts below whole seconds
    state.elapsed_secs = (state.level_ticks as f64 * f64::from(dt)) as f32;

    apply_input(state, input);
    integrate(state);

    // World motion
    let elapsed = state.elapsed_secs;
    let amplitude = state.tuning.moving_platform_amplitude;
    for platform in &mut state.world.platforms {
        platform.drift(elapsed, amplitude);
    }
    for coin in state.world.coins.iter_mut().filter(|c| !c.collected) {
        coin.anim_phase += crate::consts::COIN_ANIM_STEP;
    }

    collision::resolve(state);
    check_finish(state);
}

/// Feed one input snapshot to the player. Rejected unless Playing.
fn apply_input(state: &mut GameState, input: &TickInput) {
    if state.phase.is_frozen() {
        return;
    }
    let tuning = &state.tuning;
    let player = &mut state.player;
    let mut jumped = false;

    match input.stretch {
        Some(StretchInput { active: true, pos }) => {
            if !player.is_stretching {
                stretch::begin(player, pos);
            }
            stretch::update(player, pos, tuning);
        }
        _ => {
            if let Some(power) = stretch::end(player) {
                jumped |= power > tuning.launch_sound_threshold;
            }
        }
    }

    if input.move_direction != 0 {
        player.move_dir(input.move_direction, tuning);
    }
    if input.jump {
        jumped |= player.jump(tuning);
    }

    if jumped {
        state.emit(GameEvent::Jumped);
    }
}

/// Integrate the player body for one step. No-op unless Playing.
pub fn integrate(state: &mut GameState) {
    if state.phase.is_frozen() {
        return;
    }
    state.player.integrate(&state.tuning);
}

/// Final score for a completed level
pub fn final_score(
    score: u64,
    lives: u8,
    elapsed_secs: f32,
    coins: usize,
    tuning: &Tuning,
) -> u64 {
    let whole_secs = elapsed_secs.max(0.0).floor() as u64;
    let time_bonus =
        tuning.time_bonus_window_secs.saturating_sub(whole_secs) * tuning.time_bonus_per_sec;
    let life_bonus = u64::from(lives) * tuning.life_bonus;
    let coin_bonus = coins as u64 * tuning.coin_bonus;
    score + time_bonus + life_bonus + coin_bonus
}

/// Complete the level if the player's position point is inside the finish
pub fn check_finish(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }
    if !point_in_rect(state.player.pos, &state.world.finish.rect) {
        return;
    }

    let total = final_score(
        state.score,
        state.lives,
        state.elapsed_secs,
        state.coins_collected(),
        &state.tuning,
    );
    state.phase = GamePhase::LevelComplete;
    state.final_score = Some(total);
    log::info!(
        "Level {} complete in {} with final score {}",
        state.level.get(),
        crate::format_clock(state.elapsed_secs),
        total
    );
    state.emit(GameEvent::LevelCompleted {
        final_score: total,
        final_time: state.elapsed_secs,
        lives: state.lives,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::state::PlatformKind;

    fn new_state() -> GameState {
        GameState::new(Tuning::default())
    }

    /// Park the player on the floor, away from spikes and coins
    fn park_on_floor(state: &mut GameState) {
        state.world.obstacles.clear();
        state.world.coins.clear();
        state.player.pos = Vec2::new(60.0, state.tuning.floor_y() - state.player.height);
        state.player.vel = Vec2::ZERO;
        state.player.is_grounded = true;
    }

    #[test]
    fn test_tick_pause() {
        let mut state = new_state();
        let pause = TickInput {
            pause_toggle: true,
            ..Default::default()
        };

        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);
        let frozen_pos = state.player.pos;
        let frozen_time = state.elapsed_secs;

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.player.pos, frozen_pos);
        assert_eq!(state.elapsed_secs, frozen_time);

        // Unpause runs the step immediately
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.elapsed_secs > frozen_time);
    }

    #[test]
    fn test_jump_emits_event() {
        let mut state = new_state();
        park_on_floor(&mut state);
        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert!(!state.player.is_grounded);
        assert!(state.player.vel.y < 0.0);
        assert_eq!(state.drain_events(), vec![GameEvent::Jumped]);

        // Airborne: no second jump, no event
        tick(&mut state, &input, SIM_DT);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_zero_direction_keeps_momentum() {
        let mut state = new_state();
        park_on_floor(&mut state);
        state.player.vel.x = 8.0;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!((state.player.vel.x - 8.0 * 0.92).abs() < 1e-5);
    }

    #[test]
    fn test_stretch_release_launches_next_step() {
        let mut state = new_state();
        park_on_floor(&mut state);
        let aim = state.player.head() + Vec2::new(-200.0, -200.0);

        let hold = TickInput {
            stretch: Some(StretchInput { active: true, pos: aim }),
            ..Default::default()
        };
        tick(&mut state, &hold, SIM_DT);
        assert!(state.player.is_stretching);
        assert!(state.player.stretch_power > 5.0);
        // Holding never launches
        assert_eq!(state.player.vel.x, 0.0);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(!state.player.is_stretching);
        assert_eq!(state.player.stretch_power, 0.0);
        assert!(state.player.vel.x < 0.0);
        assert!(state.player.vel.y < 0.0);
        assert_eq!(state.drain_events(), vec![GameEvent::Jumped]);
    }

    #[test]
    fn test_moving_platforms_drift() {
        let mut state = GameState::start_at(2, Tuning::default()).unwrap();
        park_on_floor(&mut state);
        let moving_x = |s: &GameState| {
            s.world
                .platforms
                .iter()
                .find(|p| p.kind == PlatformKind::Moving)
                .map(|p| p.rect.x)
                .unwrap()
        };
        let before = moving_x(&state);
        tick(&mut state, &TickInput::default(), SIM_DT);
        let expected = before + SIM_DT.sin() * 2.0;
        assert!((moving_x(&state) - expected).abs() < 1e-4);
    }

    #[test]
    fn test_final_score_formula() {
        let tuning = Tuning::default();
        assert_eq!(final_score(50, 2, 120.0, 4, &tuning), 2130);
        // Time bonus never goes negative
        assert_eq!(final_score(0, 0, 999.0, 0, &tuning), 0);
        assert_eq!(final_score(0, 0, 0.9, 0, &tuning), 3000);
    }

    #[test]
    fn test_clock_holds_whole_seconds() {
        let mut state = new_state();
        state.world.obstacles.clear();
        state.world.platforms.clear();
        state.world.coins.clear();
        state.world.finish.rect = crate::Rect::new(-100.0, -100.0, 1.0, 1.0);

        for _ in 0..3600 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(crate::format_clock(state.elapsed_secs), "01:00");

        for _ in 3600..18000 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(crate::format_clock(state.elapsed_secs), "05:00");
        // Full window used up: no time bonus left
        assert_eq!(final_score(0, 0, state.elapsed_secs, 0, &state.tuning), 0);
    }

    #[test]
    fn test_reaching_finish_completes_level() {
        let mut state = new_state();
        park_on_floor(&mut state);
        state.score = 50;
        state.lives = 2;
        // 120 s at 60 Hz; the finishing step adds one more
        state.level_ticks = 7200;
        state.world.coins = crate::sim::level::build_level(1, &state.tuning).unwrap().coins;
        for coin in state.world.coins.iter_mut().take(4) {
            coin.collected = true;
        }

        // Position point inside the finish rect; body is in mid air
        let finish = state.world.finish.rect;
        state.player.pos = Vec2::new(finish.x + 10.0, finish.y + 10.0);
        state.player.vel = Vec2::ZERO;
        state.player.is_grounded = false;

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::LevelComplete);
        assert_eq!(state.final_score, Some(2130));
        let events = state.drain_events();
        assert!(matches!(
            events.last(),
            Some(GameEvent::LevelCompleted { final_score: 2130, lives: 2, .. })
        ));

        // Frozen afterwards
        let pos = state.player.pos;
        let input = TickInput {
            jump: true,
            move_direction: 1,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.player.pos, pos);
    }

    #[test]
    fn test_game_over_freezes_timer() {
        let mut state = new_state();
        park_on_floor(&mut state);
        state.lives = 1;
        let p = state.player.pos;
        state.world.obstacles.push(crate::sim::state::Obstacle {
            rect: crate::Rect::new(p.x, p.y - 20.0, 40.0, 60.0),
            kind: crate::sim::state::ObstacleKind::Spike,
        });

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        let time = state.elapsed_secs;

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.elapsed_secs, time);
        // Pause cannot leave GameOver either
        let pause = TickInput {
            pause_toggle: true,
            ..Default::default()
        };
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = new_state();
        let mut state2 = new_state();

        let inputs = [
            TickInput {
                move_direction: 1,
                ..Default::default()
            },
            TickInput {
                jump: true,
                move_direction: 1,
                ..Default::default()
            },
            TickInput {
                stretch: Some(StretchInput {
                    active: true,
                    pos: Vec2::new(500.0, 100.0),
                }),
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..30 {
            for input in &inputs {
                tick(&mut state1, input, SIM_DT);
                tick(&mut state2, input, SIM_DT);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.player, state2.player);
        assert_eq!(state1.world, state2.world);
        assert_eq!(state1.score, state2.score);
    }
}
