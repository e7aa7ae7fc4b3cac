//! Player/platform landing detection
//!
//! Platforms are one-way: only the player's feet are tested, and only against
//! the thin landing band on top of each platform. Callers skip the check
//! entirely while the player is rising.

use super::platforms::Platform;
use super::state::Player;
use crate::consts::{PLAYER_HEIGHT, PLAYER_WIDTH};

/// Whether the player's feet are inside the platform's landing band.
///
/// Horizontal overlap is strict, vertical bounds are inclusive on both ends.
pub fn feet_on_platform(player: &Player, platform: &Platform) -> bool {
    let feet = player.y + PLAYER_HEIGHT;
    player.x + PLAYER_WIDTH > platform.x
        && player.x < platform.right()
        && feet >= platform.y
        && feet <= platform.bottom()
}

/// First platform (lowest index) the player is landing on.
///
/// Index order is the only tie-break, even if a later slot is spatially closer.
pub fn first_landing(player: &Player, platforms: &[Platform]) -> Option<usize> {
    platforms
        .iter()
        .position(|platform| feet_on_platform(player, platform))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_at(x: f32, y: f32) -> Player {
        Player {
            x,
            y,
            ..Player::default()
        }
    }

    #[test]
    fn test_feet_band_is_inclusive() {
        let platform = Platform::new(40.0, 30.0);

        // Feet exactly on the top edge
        assert!(feet_on_platform(&player_at(40.0, 22.0), &platform));
        // Feet exactly on the bottom edge of the band
        assert!(feet_on_platform(&player_at(40.0, 25.0), &platform));
        // Just above and just below
        assert!(!feet_on_platform(&player_at(40.0, 21.9), &platform));
        assert!(!feet_on_platform(&player_at(40.0, 25.1), &platform));
    }

    #[test]
    fn test_horizontal_edges_are_strict() {
        let platform = Platform::new(40.0, 30.0);

        // Player's right edge touching the platform's left edge
        assert!(!feet_on_platform(&player_at(32.0, 22.0), &platform));
        assert!(feet_on_platform(&player_at(32.5, 22.0), &platform));
        // Player's left edge touching the platform's right edge
        assert!(!feet_on_platform(&player_at(64.0, 22.0), &platform));
        assert!(feet_on_platform(&player_at(63.5, 22.0), &platform));
    }

    #[test]
    fn test_lowest_index_wins() {
        let platforms = [
            Platform::new(0.0, -50.0),
            Platform::new(40.0, 31.0),
            Platform::new(40.0, 30.0),
        ];
        assert_eq!(first_landing(&player_at(44.0, 23.0), &platforms), Some(1));
    }

    #[test]
    fn test_no_landing() {
        let platforms = [Platform::new(0.0, 0.0), Platform::new(100.0, 50.0)];
        assert_eq!(first_landing(&player_at(50.0, 10.0), &platforms), None);
    }
}
