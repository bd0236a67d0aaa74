//! Ragdoll Dash entry point
//!
//! Headless runner: drives the simulation with a seeded autopilot standing in
//! for a player, logs gameplay events and prints a JSON summary per level.
//!
//! Usage: `ragdoll-dash [TUNING_JSON] [SEED]`

use std::fs;

use anyhow::Context;
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use ragdoll_dash::sim::{GameEvent, GamePhase, GameState, HudSnapshot, StretchInput, TickInput};
use ragdoll_dash::{FrameDriver, Tuning};

/// Give up on a level after this many simulated seconds
const MAX_LEVEL_SECS: f32 = 180.0;

/// Per-level result printed at the end
#[derive(Debug, Serialize)]
struct LevelReport {
    hud: HudSnapshot,
    jumps: u32,
    bounces: u32,
    coins: u32,
    hits: u32,
}

/// Seeded stand-in for a human at the controls
struct Autopilot {
    rng: Pcg32,
    /// Steps left on the current drag gesture
    drag_steps: u32,
    drag_target: Vec2,
}

impl Autopilot {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            drag_steps: 0,
            drag_target: Vec2::ZERO,
        }
    }

    /// Head right toward the finish, hop now and then, and occasionally fling
    /// the ragdoll up and to the right with a short drag.
    fn next_input(&mut self, state: &GameState) -> TickInput {
        let player = &state.player;
        let finish = state.world.finish.rect.center();

        let stretch = if self.drag_steps > 0 {
            self.drag_steps -= 1;
            Some(StretchInput {
                active: self.drag_steps > 0,
                pos: self.drag_target,
            })
        } else if player.is_grounded && self.rng.random_bool(0.02) {
            self.drag_steps = self.rng.random_range(3..10);
            let reach: f32 = self.rng.random_range(80.0..260.0);
            let angle: f32 = self.rng.random_range(-1.3..-0.3);
            self.drag_target = player.head() + Vec2::new(angle.cos(), angle.sin()) * reach;
            Some(StretchInput {
                active: true,
                pos: self.drag_target,
            })
        } else {
            None
        };

        let move_direction = if player.pos.x < finish.x { 1 } else { -1 };
        TickInput {
            move_direction,
            jump: self.rng.random_bool(0.05),
            pause_toggle: false,
            stretch,
        }
    }
}

fn load_tuning(path: Option<&String>) -> anyhow::Result<Tuning> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let json = fs::read_to_string(path).with_context(|| format!("reading tuning file {path}"))?;
    let tuning =
        Tuning::from_json_str(&json).with_context(|| format!("parsing tuning file {path}"))?;
    log::info!("Loaded tuning from {path}");
    Ok(tuning)
}

fn run_level(driver: &mut FrameDriver, pilot: &mut Autopilot) -> LevelReport {
    let mut report = LevelReport {
        hud: driver.hud_snapshot(),
        jumps: 0,
        bounces: 0,
        coins: 0,
        hits: 0,
    };

    while driver.state().phase == GamePhase::Playing && driver.state().elapsed_secs < MAX_LEVEL_SECS
    {
        let input = pilot.next_input(driver.state());
        driver.set_input(input);
        driver.step();

        for event in driver.drain_events() {
            if let Some(cue) = event.sound() {
                log::trace!("sound: {:?}", cue);
            }
            match event {
                GameEvent::Jumped => report.jumps += 1,
                GameEvent::Bounced => report.bounces += 1,
                GameEvent::CoinCollected { x, y } => {
                    report.coins += 1;
                    log::debug!("Coin at ({x:.0}, {y:.0})");
                }
                GameEvent::ObstacleHit => {
                    report.hits += 1;
                    log::info!("Ouch! {} lives left", driver.state().lives);
                }
                GameEvent::LevelCompleted {
                    final_score,
                    final_time,
                    lives,
                } => log::info!(
                    "Finished in {} with {lives} lives, final score {final_score}",
                    ragdoll_dash::format_clock(final_time)
                ),
                GameEvent::GameOverTriggered { score, level } => {
                    log::info!("Game over on level {level} (score {score})")
                }
            }
        }
    }

    report.hud = driver.hud_snapshot();
    report
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let tuning = load_tuning(args.first())?;
    tuning.log_warnings();
    let seed: u64 = match args.get(1) {
        Some(s) => s.parse().with_context(|| format!("invalid seed {s:?}"))?,
        None => 42,
    };

    log::info!("Ragdoll Dash (headless) starting with seed {seed}");
    let mut driver = FrameDriver::new(GameState::new(tuning));
    let mut pilot = Autopilot::new(seed);
    let mut reports = Vec::new();

    loop {
        let report = run_level(&mut driver, &mut pilot);
        let phase = report.hud.phase;
        reports.push(report);

        if phase != GamePhase::LevelComplete {
            break;
        }
        if let Err(e) = driver.advance_level() {
            log::info!("Campaign finished: {e}");
            break;
        }
    }

    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}
