//! Game state and core simulation types
//!
//! A `GameState` is one run. It owns every entity plus the random source, so
//! there is no ambient global state and tests can inject a scripted generator.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::camera::ScrollState;
use super::platforms::{Platform, PlatformSet};
use super::rng::{RandomSource, seeded};
use crate::consts::*;

/// Run status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay, ticks are accepted
    #[default]
    Running,
    /// Player fell off the screen, waiting for acknowledgment
    GameOver,
    /// Run finished, host should tear down
    Exited,
}

/// Contract violations reported by the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("tick called while the game is {0:?}")]
    NotRunning(GamePhase),
    #[error("cannot {action} while the game is {phase:?}")]
    InvalidTransition {
        action: &'static str,
        phase: GamePhase,
    },
}

/// The bouncing player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    /// Vertical velocity (pixels per tick, positive is down)
    pub vy: f32,
    pub alive: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            x: SCREEN_WIDTH / 2.0,
            y: SCREEN_HEIGHT - 20.0,
            vy: 0.0,
            alive: true,
        }
    }
}

impl Player {
    /// Apply held directions; both at once cancel out
    pub fn steer(&mut self, left: bool, right: bool) {
        if left {
            self.x -= PLAYER_SPEED;
        }
        if right {
            self.x += PLAYER_SPEED;
        }
    }

    /// Teleport across the screen when leaving either side
    pub fn wrap_horizontal(&mut self) {
        let max_x = SCREEN_WIDTH - PLAYER_WIDTH;
        if self.x < 0.0 {
            self.x = max_x;
        } else if self.x > max_x {
            self.x = 0.0;
        }
    }

    /// Explicit Euler step: velocity first, then position
    pub fn integrate_gravity(&mut self) {
        self.vy += GRAVITY;
        self.y += self.vy;
    }

    pub fn is_falling(&self) -> bool {
        self.vy > 0.0
    }

    pub fn bounce(&mut self) {
        self.vy = JUMP_VELOCITY;
    }
}

/// Serializable view of a run (everything a renderer or trace needs)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub score: u32,
    pub player: Player,
    pub platforms: [Platform; PLATFORM_COUNT],
    pub scroll: ScrollState,
    pub spawn_cursor: u64,
    pub last_hit_index: usize,
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState<R = Pcg32> {
    pub player: Player,
    pub platforms: PlatformSet,
    pub scroll: ScrollState,
    /// Platforms newly landed on this run
    pub score: u32,
    pub phase: GamePhase,
    /// Intent flags written by input, read by the next tick
    pub move_left: bool,
    pub move_right: bool,
    /// Successful ticks so far
    pub time_ticks: u64,
    pub(crate) rng: R,
}

impl GameState<Pcg32> {
    /// Create a new run with a seeded PCG generator
    pub fn new(seed: u64) -> Self {
        Self::with_rng(seeded(seed))
    }
}

impl<R: RandomSource> GameState<R> {
    /// Create a new run drawing platform positions from `rng`
    pub fn with_rng(mut rng: R) -> Self {
        let platforms = PlatformSet::initialize(&mut rng);
        Self {
            player: Player::default(),
            platforms,
            scroll: ScrollState::default(),
            score: 0,
            phase: GamePhase::Running,
            move_left: false,
            move_right: false,
            time_ticks: 0,
            rng,
        }
    }
}

impl<R> GameState<R> {
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Abandon a running game (skips GameOver)
    pub fn quit(&mut self) -> Result<GamePhase, SimError> {
        self.transition("quit", GamePhase::Running)
    }

    /// Dismiss the game-over screen
    pub fn acknowledge(&mut self) -> Result<GamePhase, SimError> {
        self.transition("acknowledge", GamePhase::GameOver)
    }

    fn transition(&mut self, action: &'static str, from: GamePhase) -> Result<GamePhase, SimError> {
        if self.phase != from {
            return Err(SimError::InvalidTransition {
                action,
                phase: self.phase,
            });
        }
        log::info!("Run exited ({}) with score {}", action, self.score);
        self.phase = GamePhase::Exited;
        Ok(self.phase)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.time_ticks,
            phase: self.phase,
            score: self.score,
            player: self.player,
            platforms: *self.platforms.slots(),
            scroll: self.scroll,
            spawn_cursor: self.platforms.spawn_cursor(),
            last_hit_index: self.platforms.last_hit_index(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::SequenceRandom;

    #[test]
    fn test_new_run() {
        let state = GameState::with_rng(SequenceRandom::new(vec![17, 90, 41]));
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.player.x, 64.0);
        assert_eq!(state.player.y, 44.0);
        assert!(state.player.alive);
        assert_eq!(state.score, 0);
        assert_eq!(state.scroll, ScrollState::default());
        // Player spawns right above the starting platform
        assert_eq!(state.platforms.slots()[0], Platform::new(52.0, 54.0));
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = GameState::new(99999);
        let b = GameState::new(99999);
        assert_eq!(a.platforms.slots(), b.platforms.slots());
    }

    #[test]
    fn test_wrap_right_edge_lands_at_zero() {
        let mut player = Player {
            x: SCREEN_WIDTH - PLAYER_WIDTH + 0.001,
            ..Player::default()
        };
        player.wrap_horizontal();
        assert_eq!(player.x, 0.0);
        // Already normalized, wrapping again changes nothing
        player.wrap_horizontal();
        assert_eq!(player.x, 0.0);
    }

    #[test]
    fn test_wrap_left_edge_lands_at_max() {
        let mut player = Player {
            x: -0.5,
            ..Player::default()
        };
        player.wrap_horizontal();
        assert_eq!(player.x, SCREEN_WIDTH - PLAYER_WIDTH);
    }

    #[test]
    fn test_steer_cancels() {
        let mut player = Player::default();
        player.steer(true, true);
        assert_eq!(player.x, 64.0);
        player.steer(true, false);
        assert_eq!(player.x, 62.0);
    }

    #[test]
    fn test_quit_from_running() {
        let mut state = GameState::new(1);
        assert_eq!(state.quit(), Ok(GamePhase::Exited));
        assert_eq!(
            state.quit(),
            Err(SimError::InvalidTransition {
                action: "quit",
                phase: GamePhase::Exited
            })
        );
    }

    #[test]
    fn test_acknowledge_requires_game_over() {
        let mut state = GameState::new(1);
        assert!(state.acknowledge().is_err());
        assert_eq!(state.phase, GamePhase::Running);

        state.phase = GamePhase::GameOver;
        assert_eq!(state.acknowledge(), Ok(GamePhase::Exited));
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::with_rng(SequenceRandom::new(vec![17, 90, 41]));
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state.snapshot());
    }
}
