//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick per frame
//! - Injected RNG only
//! - Stable iteration order (by platform slot)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod platforms;
pub mod rng;
pub mod state;
pub mod tick;

pub use camera::ScrollState;
pub use collision::{feet_on_platform, first_landing};
pub use platforms::{Platform, PlatformSet};
pub use rng::{RandomSource, SequenceRandom, seeded};
pub use state::{GamePhase, GameState, Player, SimError, Snapshot};
pub use tick::{TickEvents, tick};
