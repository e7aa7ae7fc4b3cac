//! Fixed-rate simulation tick
//!
//! One call advances the run by one frame: steer, wrap, gravity, landing,
//! camera, then the fall-off check.

use serde::{Deserialize, Serialize};

use super::collision::first_landing;
use super::rng::RandomSource;
use super::state::{GamePhase, GameState, SimError};
use crate::consts::*;

/// What happened during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickEvents {
    /// Slot the player bounced off
    pub bounced: Option<usize>,
    /// Bounce was on a new platform and scored
    pub scored: bool,
    /// Slot overwritten by the ring buffer
    pub spawned: Option<usize>,
    /// Phase after the tick
    pub phase: GamePhase,
}

impl TickEvents {
    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

/// Advance a running game by one tick.
///
/// Fails without touching the state when the game is not `Running`.
pub fn tick<R: RandomSource>(state: &mut GameState<R>) -> Result<TickEvents, SimError> {
    if !state.is_running() {
        return Err(SimError::NotRunning(state.phase));
    }

    let mut events = TickEvents::default();
    state.time_ticks += 1;

    state.player.steer(state.move_left, state.move_right);
    state.player.wrap_horizontal();
    state.player.integrate_gravity();

    // One-way platforms: only a falling player can land
    if state.player.is_falling() {
        if let Some(index) = first_landing(&state.player, state.platforms.slots()) {
            state.player.bounce();
            events.bounced = Some(index);

            if index != state.platforms.last_hit_index() {
                state.scroll.raise_target(SCROLL_INCREMENT);
                events.spawned = Some(state.platforms.spawn_next(&mut state.rng));
                state.platforms.mark_hit(index);
                state.score += 1;
                events.scored = true;
                log::info!("Landed on platform {}, score {}", index, state.score);
            }
        }
    }

    state.scroll.step();

    if state.player.y > SCREEN_HEIGHT {
        state.player.alive = false;
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over after {} ticks with score {}",
            state.time_ticks,
            state.score
        );
    }

    events.phase = state.phase;
    Ok(events)
}
