//! Platform ring buffer
//!
//! A fixed set of platform slots. New platforms overwrite slots in insertion
//! order (`spawn_cursor % PLATFORM_COUNT`), which is not necessarily the slot
//! farthest below the camera.

use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use crate::consts::*;

/// A single platform (top-left corner, screen-space pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
}

impl Platform {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + PLATFORM_WIDTH
    }

    /// Bottom edge of the landing band
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + PLATFORM_HEIGHT
    }
}

/// Fixed-capacity platform storage with a round-robin spawn cursor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformSet {
    slots: [Platform; PLATFORM_COUNT],
    /// Count of platforms placed so far; the next slot is `spawn_cursor % PLATFORM_COUNT`
    spawn_cursor: u64,
    /// Slot most recently scored on
    last_hit_index: usize,
}

impl PlatformSet {
    /// Build the starting staircase.
    ///
    /// Slot 0 sits centered near the bottom, directly under the player's
    /// spawn point. Every following slot is `PLATFORM_SPACING` above the one
    /// before it at a random horizontal position. The starting platform
    /// counts as already scored.
    pub fn initialize<R: RandomSource>(rng: &mut R) -> Self {
        let mut slots = [Platform::new(0.0, 0.0); PLATFORM_COUNT];
        slots[0] = Platform::new(
            SCREEN_WIDTH / 2.0 - PLATFORM_WIDTH / 2.0,
            SCREEN_HEIGHT - 10.0,
        );
        for i in 1..PLATFORM_COUNT {
            slots[i] = Platform::new(random_x(rng), slots[i - 1].y - PLATFORM_SPACING);
        }
        Self::from_slots(slots)
    }

    /// Wrap an explicit layout (cursor at `PLATFORM_COUNT`, slot 0 marked as hit)
    pub fn from_slots(slots: [Platform; PLATFORM_COUNT]) -> Self {
        Self {
            slots,
            spawn_cursor: PLATFORM_COUNT as u64,
            last_hit_index: 0,
        }
    }

    /// Overwrite the next slot with a platform above the previously spawned one.
    ///
    /// Returns the index of the overwritten slot.
    pub fn spawn_next<R: RandomSource>(&mut self, rng: &mut R) -> usize {
        let slot = (self.spawn_cursor % PLATFORM_COUNT as u64) as usize;
        let reference = (slot + PLATFORM_COUNT - 1) % PLATFORM_COUNT;

        let x = random_x(rng);
        let gap = rng.range(SPAWN_GAP_MIN, SPAWN_GAP_MAX) as f32;
        self.slots[slot] = Platform::new(x, self.slots[reference].y - gap);
        self.spawn_cursor += 1;

        log::debug!(
            "Spawned platform in slot {} at ({}, {})",
            slot,
            self.slots[slot].x,
            self.slots[slot].y
        );
        slot
    }

    pub fn slots(&self) -> &[Platform; PLATFORM_COUNT] {
        &self.slots
    }

    pub fn iter(&self) -> impl Iterator<Item = &Platform> {
        self.slots.iter()
    }

    pub fn spawn_cursor(&self) -> u64 {
        self.spawn_cursor
    }

    pub fn last_hit_index(&self) -> usize {
        self.last_hit_index
    }

    pub(crate) fn mark_hit(&mut self, index: usize) {
        self.last_hit_index = index;
    }

    /// Topmost platform (smallest y)
    pub fn highest(&self) -> &Platform {
        self.iter()
            .min_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal))
            .unwrap_or(&self.slots[0])
    }
}

/// Random left edge in `[0, SCREEN_WIDTH - PLATFORM_WIDTH]`
fn random_x<R: RandomSource>(rng: &mut R) -> f32 {
    rng.range(0, (SCREEN_WIDTH - PLATFORM_WIDTH) as u32 + 1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{SequenceRandom, seeded};
    use proptest::prelude::*;

    #[test]
    fn test_initial_staircase() {
        let mut rng = SequenceRandom::new(vec![17, 90, 41]);
        let set = PlatformSet::initialize(&mut rng);

        assert_eq!(set.slots()[0], Platform::new(52.0, 54.0));
        assert_eq!(set.slots()[1], Platform::new(17.0, 24.0));
        assert_eq!(set.slots()[2], Platform::new(90.0, -6.0));
        assert_eq!(set.slots()[3], Platform::new(41.0, -36.0));
        assert_eq!(set.spawn_cursor(), PLATFORM_COUNT as u64);
        assert_eq!(set.last_hit_index(), 0);
        assert_eq!(set.highest(), &Platform::new(41.0, -36.0));
    }

    #[test]
    fn test_spawn_overwrites_in_insertion_order() {
        let mut rng = SequenceRandom::new(vec![0, 0, 0, 3, 6, 10, 15, 104, 19, 50, 1]);
        let mut set = PlatformSet::initialize(&mut rng);

        // First spawn lands in slot 0, above slot 3
        let slot = set.spawn_next(&mut rng);
        assert_eq!(slot, 0);
        assert_eq!(set.slots()[0], Platform::new(3.0, -36.0 - 26.0));

        // Second spawn: slot 1, above the new slot 0
        let slot = set.spawn_next(&mut rng);
        assert_eq!(slot, 1);
        assert_eq!(set.slots()[1], Platform::new(10.0, -62.0 - 35.0));

        // Third spawn: slot 2, x at the right-most legal position
        let slot = set.spawn_next(&mut rng);
        assert_eq!(slot, 2);
        assert_eq!(set.slots()[2], Platform::new(104.0, -97.0 - 39.0));

        // Slot 3 is untouched so far
        assert_eq!(set.slots()[3], Platform::new(0.0, -36.0));
        assert_eq!(set.spawn_cursor(), PLATFORM_COUNT as u64 + 3);
    }

    #[test]
    fn test_spawn_wraps_around_the_ring() {
        let mut rng = SequenceRandom::new(vec![1]);
        let mut set = PlatformSet::initialize(&mut rng);
        let slots: Vec<usize> = (0..9).map(|_| set.spawn_next(&mut rng)).collect();
        assert_eq!(slots, vec![0, 1, 2, 3, 0, 1, 2, 3, 0]);
    }

    proptest! {
        #[test]
        fn prop_spawned_platforms_stay_in_bounds(seed in any::<u64>(), spawns in 1usize..64) {
            let mut rng = seeded(seed);
            let mut set = PlatformSet::initialize(&mut rng);
            for _ in 0..spawns {
                let slot = set.spawn_next(&mut rng);
                let reference = (slot + PLATFORM_COUNT - 1) % PLATFORM_COUNT;
                let placed = set.slots()[slot];
                let gap = set.slots()[reference].y - placed.y;

                prop_assert!(placed.x >= 0.0 && placed.x <= SCREEN_WIDTH - PLATFORM_WIDTH);
                prop_assert!(gap >= SPAWN_GAP_MIN as f32 && gap < SPAWN_GAP_MAX as f32);
            }
        }
    }
}
