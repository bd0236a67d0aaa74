//! Frame driver
//!
//! Bridges variable-rate frames to fixed simulation steps. The input layer
//! writes a snapshot whenever events arrive; each step clones it once at
//! the start, so a gesture update landing mid-frame never half-applies.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::sim::{GameEvent, GameState, HudSnapshot, LevelError, PlayerSnapshot, TickInput, tick};

/// Owns the game state and steps it at a fixed rate
#[derive(Debug, Clone)]
pub struct FrameDriver {
    state: GameState,
    /// Latched input, rewritten by the input layer between frames
    input: TickInput,
    accumulator: f32,
    /// Events gathered across steps since the last drain
    events: Vec<GameEvent>,
}

impl FrameDriver {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            input: TickInput::default(),
            accumulator: 0.0,
            events: Vec::new(),
        }
    }

    /// Replace the latched input snapshot.
    ///
    /// A latched jump survives until a step consumes it, even if the new
    /// snapshot clears it. Pause presses keep their parity: two presses
    /// between steps cancel out.
    pub fn set_input(&mut self, input: TickInput) {
        let jump = self.input.jump || input.jump;
        let pause_toggle = self.input.pause_toggle ^ input.pause_toggle;
        self.input = TickInput {
            jump,
            pause_toggle,
            ..input
        };
    }

    /// Run as many fixed steps as `real_dt` covers. Returns the step count.
    /// A non-finite `real_dt` counts as no time passing.
    pub fn advance(&mut self, real_dt: f32) -> u32 {
        let real_dt = if real_dt.is_finite() { real_dt } else { 0.0 };
        self.accumulator += real_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input.clone();
            tick(&mut self.state, &input, SIM_DT);
            self.events.append(&mut self.state.events);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.jump = false;
            self.input.pause_toggle = false;
        }

        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::debug!("Dropping {:.3}s of backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        substeps
    }

    /// Run exactly one fixed step with the latched input
    pub fn step(&mut self) {
        let input = std::mem::take(&mut self.input);
        tick(&mut self.state, &input, SIM_DT);
        self.events.append(&mut self.state.events);
        self.input = TickInput {
            jump: false,
            pause_toggle: false,
            ..input
        };
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn player_snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot::from(&self.state.player)
    }

    pub fn hud_snapshot(&self) -> HudSnapshot {
        HudSnapshot::from(&self.state)
    }

    /// Read-only access to the full state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Restart the current level (the exit from GameOver)
    pub fn reset(&mut self) {
        self.state.reset();
        self.input = TickInput::default();
        self.accumulator = 0.0;
    }

    /// Load the next level after a completion
    pub fn advance_level(&mut self) -> Result<bool, LevelError> {
        let advanced = self.state.advance_level()?;
        if advanced {
            self.input = TickInput::default();
            self.accumulator = 0.0;
        }
        Ok(advanced)
    }
}
