//! Rasterize a snapshot into the frame buffer
//!
//! World y is turned into screen y by adding the camera's actual offset.

use super::framebuffer::{DIGIT_HEIGHT, Framebuffer, WIDTH};
use crate::consts::*;
use crate::sim::{GamePhase, Snapshot};

/// Fish glyph for the player, 8x8
pub const PLAYER_SPRITE: [u8; 8] = [
    0b0000_0000,
    0b0001_1100,
    0b1011_1110,
    0b1111_1011,
    0b1111_1111,
    0b1011_1110,
    0b0001_1100,
    0b0000_0000,
];

const BANNER_WIDTH: i32 = 48;
const BANNER_HEIGHT: i32 = 15;

pub fn rasterize(fb: &mut Framebuffer, snapshot: &Snapshot, show_score: bool) {
    fb.clear();
    let offset = snapshot.scroll.actual_offset;

    for platform in &snapshot.platforms {
        let py = (platform.y + offset) as i32;
        if py >= -(PLATFORM_HEIGHT as i32) && py < SCREEN_HEIGHT as i32 {
            fb.fill_rect(
                platform.x as i32,
                py,
                PLATFORM_WIDTH as i32,
                PLATFORM_HEIGHT as i32,
                true,
            );
        }
    }

    let player_y = (snapshot.player.y + offset) as i32;
    fb.blit(snapshot.player.x as i32, player_y, &PLAYER_SPRITE);

    if show_score {
        fb.draw_number_right_aligned(WIDTH as i32 - 1, 1, snapshot.score);
    }

    if snapshot.phase == GamePhase::GameOver {
        draw_game_over(fb, snapshot.score);
    }
}

/// Boxed final score in the middle of the screen
fn draw_game_over(fb: &mut Framebuffer, score: u32) {
    let x = (SCREEN_WIDTH as i32 - BANNER_WIDTH) / 2;
    let y = (SCREEN_HEIGHT as i32 - BANNER_HEIGHT) / 2;
    fb.fill_rect(x, y, BANNER_WIDTH, BANNER_HEIGHT, false);
    fb.stroke_rect(x, y, BANNER_WIDTH, BANNER_HEIGHT);
    fb.stroke_rect(x + 2, y + 2, BANNER_WIDTH - 4, BANNER_HEIGHT - 4);

    let text_x = x + (BANNER_WIDTH - Framebuffer::number_width(score)) / 2;
    let text_y = y + (BANNER_HEIGHT - DIGIT_HEIGHT) / 2;
    fb.draw_number(text_x, text_y, score);
}
