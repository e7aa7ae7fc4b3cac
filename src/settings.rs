//! Host settings and preferences
//!
//! Gameplay constants are compile-time (`consts`); only host-side knobs live
//! here. Loaded from the JSON file named by `FLIPPER_JUMP_SETTINGS`.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::FRAME_INTERVAL_MS;
use crate::host::HostError;

/// Host settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Delay between frames (milliseconds)
    pub frame_interval_ms: u64,
    /// Fixed run seed (otherwise seeded from the clock)
    pub seed: Option<u64>,
    /// Draw the score in the top-right corner
    pub show_score: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frame_interval_ms: FRAME_INTERVAL_MS,
            seed: None,
            show_score: true,
        }
    }
}

impl Settings {
    /// Environment variable holding the settings file path
    pub const PATH_ENV: &'static str = "FLIPPER_JUMP_SETTINGS";

    pub fn from_json(json: &str) -> Result<Self, HostError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_from(path: &Path) -> Result<Self, HostError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from `FLIPPER_JUMP_SETTINGS`, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(Self::PATH_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };

        let path = Path::new(&path);
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!(
                    "Failed to load settings from {}: {}, using defaults",
                    path.display(),
                    err
                );
                Self::default()
            }
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }
}
