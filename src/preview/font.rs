//! Glyph bitmaps for preview rendering.
//!
//! The printer's font A is 12×24 dots, which the Spleen 12x24 font matches
//! exactly. Double width/height draws each dot as a 2×2 block.

use std::collections::HashMap;

use spleen_font::{FONT_12X24, PSF2Font};

pub const GLYPH_WIDTH: usize = 12;
pub const GLYPH_HEIGHT: usize = 24;

/// Columns per tab stop (HT).
pub const TAB_COLUMNS: usize = 8;

/// Glyph cache. One bitmap per character, row-major, `true` = black.
#[derive(Default)]
pub struct GlyphCache {
    glyphs: HashMap<char, Vec<bool>>,
}

impl GlyphCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn glyph(&mut self, ch: char) -> &[bool] {
        self.glyphs.entry(ch).or_insert_with(|| generate_glyph(ch))
    }
}

/// Rasterize one character. Characters Spleen lacks are drawn as a box.
pub fn generate_glyph(ch: char) -> Vec<bool> {
    let mut glyph = vec![false; GLYPH_WIDTH * GLYPH_HEIGHT];
    if ch == ' ' {
        return glyph;
    }

    let utf8 = ch.to_string();
    let found = match PSF2Font::new(FONT_12X24) {
        Ok(mut spleen) => match spleen.glyph_for_utf8(utf8.as_bytes()) {
            Some(spleen_glyph) => {
                for (row_y, row) in spleen_glyph.enumerate() {
                    for (col_x, on) in row.enumerate() {
                        let idx = row_y * GLYPH_WIDTH + col_x;
                        if col_x < GLYPH_WIDTH && idx < glyph.len() {
                            glyph[idx] = on;
                        }
                    }
                }
                true
            }
            None => false,
        },
        Err(_) => false,
    };

    if !found {
        draw_box(&mut glyph);
    }
    glyph
}

fn draw_box(glyph: &mut [bool]) {
    for y in 2..GLYPH_HEIGHT - 2 {
        for x in 1..GLYPH_WIDTH - 1 {
            let edge = y == 2 || y == GLYPH_HEIGHT - 3 || x == 1 || x == GLYPH_WIDTH - 2;
            glyph[y * GLYPH_WIDTH + x] = edge;
        }
    }
}
