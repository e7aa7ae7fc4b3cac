//! 1-bit 128x64 frame buffer
//!
//! Everything outside the canvas is silently clipped, so callers can draw
//! partially visible shapes without bounds checks.

/// Canvas dimensions (match `consts::SCREEN_WIDTH` / `SCREEN_HEIGHT`)
pub const WIDTH: usize = 128;
pub const HEIGHT: usize = 64;

/// 3x5 digit glyphs, one row per byte, bit 2 is the left column
const DIGITS: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b111, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b001, 0b001, 0b001],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b111],
];

pub const DIGIT_WIDTH: i32 = 3;
pub const DIGIT_HEIGHT: i32 = 5;
/// Horizontal distance between digit origins
const DIGIT_ADVANCE: i32 = DIGIT_WIDTH + 1;

/// Monochrome pixel canvas, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pixels: Vec<bool>,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    pub fn new() -> Self {
        Self {
            pixels: vec![false; WIDTH * HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(false);
    }

    #[inline]
    fn index(x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= WIDTH as i32 || y >= HEIGHT as i32 {
            return None;
        }
        Some(y as usize * WIDTH + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> bool {
        Self::index(x, y).is_some_and(|i| self.pixels[i])
    }

    pub fn put(&mut self, x: i32, y: i32, on: bool) {
        if let Some(i) = Self::index(x, y) {
            self.pixels[i] = on;
        }
    }

    /// Fill a `w` x `h` box with `on`
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, on: bool) {
        for py in y..y + h {
            for px in x..x + w {
                self.put(px, py, on);
            }
        }
    }

    /// One-pixel outline
    pub fn stroke_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        for px in x..x + w {
            self.put(px, y, true);
            self.put(px, y + h - 1, true);
        }
        for py in y..y + h {
            self.put(x, py, true);
            self.put(x + w - 1, py, true);
        }
    }

    /// Draw an 8-pixel-wide sprite, bit 7 of each row is the left column
    pub fn blit(&mut self, x: i32, y: i32, rows: &[u8]) {
        for (dy, row) in rows.iter().enumerate() {
            for dx in 0..8 {
                if row & (0x80 >> dx) != 0 {
                    self.put(x + dx, y + dy as i32, true);
                }
            }
        }
    }

    /// Width in pixels of `value` drawn with the digit font
    pub fn number_width(value: u32) -> i32 {
        let digits = value.checked_ilog10().unwrap_or(0) as i32 + 1;
        digits * DIGIT_ADVANCE - 1
    }

    /// Draw `value` with its top-left corner at `(x, y)`
    pub fn draw_number(&mut self, x: i32, y: i32, value: u32) {
        let text = value.to_string();
        for (i, ch) in text.bytes().enumerate() {
            let glyph = &DIGITS[(ch - b'0') as usize];
            let gx = x + i as i32 * DIGIT_ADVANCE;
            for (dy, bits) in glyph.iter().enumerate() {
                for dx in 0..DIGIT_WIDTH {
                    if bits & (0b100 >> dx) != 0 {
                        self.put(gx + dx, y + dy as i32, true);
                    }
                }
            }
        }
    }

    /// Draw `value` so its last column is `right`
    pub fn draw_number_right_aligned(&mut self, right: i32, y: i32, value: u32) {
        let x = right - Self::number_width(value) + 1;
        self.draw_number(x, y, value);
    }

    /// Number of lit pixels
    #[cfg(test)]
    pub fn lit(&self) -> usize {
        self.pixels.iter().filter(|&&on| on).count()
    }
}
