//! Flipper Jump - a vertical platform-jumping game for a 128x64 screen
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, platforms, camera, game state)
//! - `host`: Render/input/pacing capabilities and the frame loop that drives `sim`
//! - `settings`: Host preferences (frame interval, seed override)

pub mod host;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Screen dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 128.0;
    pub const SCREEN_HEIGHT: f32 = 64.0;

    /// Player sprite size
    pub const PLAYER_WIDTH: f32 = 8.0;
    pub const PLAYER_HEIGHT: f32 = 8.0;

    /// Platform size
    pub const PLATFORM_WIDTH: f32 = 24.0;
    pub const PLATFORM_HEIGHT: f32 = 3.0;
    /// Number of platform slots in the ring buffer
    pub const PLATFORM_COUNT: usize = 4;
    /// Vertical distance between platforms of the starting staircase
    pub const PLATFORM_SPACING: f32 = 30.0;
    /// Random vertical gap above the previous platform for spawned ones (half-open)
    pub const SPAWN_GAP_MIN: u32 = 20;
    pub const SPAWN_GAP_MAX: u32 = 40;

    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.15;
    /// Vertical velocity applied on a bounce (negative is up)
    pub const JUMP_VELOCITY: f32 = -3.5;
    /// Horizontal movement per tick while a direction is held
    pub const PLAYER_SPEED: f32 = 2.0;

    /// Camera target increase per newly scored platform
    pub const SCROLL_INCREMENT: f32 = 20.0;
    /// Fraction of the remaining distance the camera covers each tick
    pub const SCROLL_EASE: f32 = 0.2;
    /// Minimum camera step so it never stalls near the target
    pub const SCROLL_MIN_STEP: f32 = 0.5;

    /// Reference frame interval of the host loop (milliseconds)
    pub const FRAME_INTERVAL_MS: u64 = 30;
}
