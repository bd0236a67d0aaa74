//! Collision detection and response
//!
//! Runs once per step after integration, in a fixed order: platforms,
//! then coins, then obstacles. Each pass corrects the player's body, updates
//! score/lives and queues gameplay events.

use super::state::{Coin, GameEvent, GamePhase, GameState, Platform, PlatformKind, Player};
use crate::rects_overlap;
use crate::tuning::Tuning;

/// Outcome of a platform landing test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    /// Player is not resting on this platform
    Miss,
    /// Player came to rest on top
    Rested,
    /// Bouncy surface relaunched the player
    Bounced,
}

/// Check whether the player lands on a platform this step, and apply the
/// landing plus any surface effect.
///
/// Landing needs horizontal overlap, the player's bottom inside the
/// platform's vertical span (plus tolerance), and a falling or resting body.
/// Moving upward through a platform never lands.
pub fn land_on_platform(player: &mut Player, platform: &Platform, tuning: &Tuning) -> Landing {
    let rect = &platform.rect;
    let bottom = player.bottom();
    let overlaps_x = player.pos.x < rect.right() && player.pos.x + player.width > rect.x;
    let within_band = bottom > rect.y && bottom < rect.bottom() + tuning.landing_tolerance;

    if !(overlaps_x && within_band && player.vel.y >= 0.0) {
        return Landing::Miss;
    }

    player.pos.y = rect.y - player.height;
    player.vel.y = 0.0;
    player.is_grounded = true;

    match platform.kind {
        PlatformKind::Bouncy => {
            player.vel.y = tuning.bounce_velocity;
            player.is_grounded = false;
            Landing::Bounced
        }
        PlatformKind::Ice => {
            player.vel.x *= tuning.ice_factor;
            Landing::Rested
        }
        PlatformKind::Ground | PlatformKind::Normal | PlatformKind::Moving => Landing::Rested,
    }
}

/// Resolve all platform contacts for this step
pub fn resolve_platforms(state: &mut GameState) {
    let mut on_platform = false;
    let mut bounces = 0;

    for platform in &state.world.platforms {
        match land_on_platform(&mut state.player, platform, &state.tuning) {
            Landing::Miss => {}
            Landing::Rested => on_platform = true,
            Landing::Bounced => {
                on_platform = true;
                bounces += 1;
            }
        }
    }

    // No stale grounded flag between platforms
    if !on_platform && state.player.bottom() < state.tuning.floor_y() {
        state.player.is_grounded = false;
    }

    for _ in 0..bounces {
        state.emit(GameEvent::Bounced);
    }
}

/// Coin pickup test. Only the player's half-width is used as its radius.
#[inline]
pub fn touches_coin(player: &Player, coin: &Coin) -> bool {
    player.center().distance(coin.center) < player.width / 2.0 + coin.radius
}

/// Collect every uncollected coin the player touches
pub fn resolve_coins(state: &mut GameState) {
    let mut picked = Vec::new();
    for coin in state.world.coins.iter_mut().filter(|c| !c.collected) {
        if touches_coin(&state.player, coin) {
            coin.collected = true;
            picked.push(coin.center);
        }
    }

    for center in picked {
        state.score += state.tuning.coin_value;
        state.emit(GameEvent::CoinCollected {
            x: center.x,
            y: center.y,
        });
    }
}

/// Damage and knock back the player for every overlapping obstacle.
///
/// There is no invulnerability window: a player still overlapping on the
/// next step is hit again.
pub fn resolve_obstacles(state: &mut GameState) {
    for i in 0..state.world.obstacles.len() {
        let rect = state.world.obstacles[i].rect;
        if !rects_overlap(&state.player.bounds(), &rect) {
            continue;
        }

        state.lives = state.lives.saturating_sub(1);
        let away = if state.player.pos.x < rect.x { -1.0 } else { 1.0 };
        state.player.vel.x = away * state.tuning.knockback_x;
        state.player.vel.y = state.tuning.knockback_y;
        state.emit(GameEvent::ObstacleHit);

        if state.lives == 0 {
            state.phase = GamePhase::GameOver;
            log::info!(
                "Game over on level {} with score {}",
                state.level.get(),
                state.score
            );
            state.emit(GameEvent::GameOverTriggered {
                score: state.score,
                level: state.level.get(),
            });
            break;
        }
    }
}

/// Run the full collision pass: platforms, coins, obstacles
pub fn resolve(state: &mut GameState) {
    if state.phase.is_frozen() {
        return;
    }
    resolve_platforms(state);
    resolve_coins(state);
    resolve_obstacles(state);
}
