//! # Label Preview Renderer
//!
//! Renders a composed label program to a PNG showing where the content lands
//! on the label stock, without spending a label.
//!
//! ## Architecture
//!
//! ```text
//! Program (IR) → LabelPreview → PNG bytes
//!                     ↓
//!               Process each Op:
//!               - Track character size and margins
//!               - Move the head on feeds (backward feeds move it up)
//!               - Draw text rows with the bitmap font
//!               - Draw CODE39 bars
//!               - Remember where the cut happens
//! ```
//!
//! The image is a strip of paper in feed direction. Row 0 is one gap above
//! the label's leading gap midpoint. Gaps are shaded gray, label edges are
//! drawn as thin lines and the cut is a dashed line.
//!
//! ## Example
//!
//! ```
//! use osilabel::label::{LabelComposer, LabelGeometry, LabelVariant};
//! use osilabel::preview::render_label_preview;
//! use osilabel::printer::PrinterConfig;
//!
//! let geometry = LabelGeometry::default();
//! let mut composer = LabelComposer::new(PrinterConfig::NP3511D, geometry);
//! let job = LabelVariant::EquipmentIntake { identifier: "123456".into() };
//! let label = composer.compose(&job)?.remove(0);
//!
//! let png = render_label_preview(&label.program, &geometry)?;
//! assert_eq!(&png[1..4], b"PNG");
//! # Ok::<(), osilabel::error::LabelError>(())
//! ```

mod barcode;
mod font;

use image::{GrayImage, ImageEncoder, Luma};

use crate::error::LabelError;
use crate::ir::{Op, Program};
use crate::label::LabelGeometry;
use crate::printer::PrinterConfig;
use crate::protocol::text::{Alignment, CharacterSize};

use barcode::encode_code39;
use font::{GLYPH_HEIGHT, GLYPH_WIDTH, GlyphCache, TAB_COLUMNS};

const WHITE: u8 = 255;
const BLACK: u8 = 0;
const GAP_SHADE: u8 = 210;
const EDGE_SHADE: u8 = 140;

/// Dash length of the cut line, in dots.
const DASH_DOTS: usize = 8;

/// Preview renderer for one label program.
pub struct LabelPreview {
    config: PrinterConfig,
    geometry: LabelGeometry,
    glyphs: GlyphCache,
    /// Head position in mm from the leading gap midpoint
    head_mm: f64,
    scale: usize,
    alignment: Alignment,
    left_dots: usize,
    width_dots: usize,
    cut_mm: Option<f64>,
    /// Black dots as (x, y), y in dots from the leading gap midpoint
    ink: Vec<(usize, i64)>,
}

impl LabelPreview {
    pub fn new(config: PrinterConfig, geometry: LabelGeometry) -> Self {
        // Before the job, the head sits where the previous cut and the
        // automatic post-cut advance left it.
        let head_mm = geometry.label_start_position() + geometry.alignment_feed_mm();
        Self {
            left_dots: config.mm_to_dots(config.left_margin_mm as f64) as usize,
            width_dots: config.mm_to_dots(config.print_width_mm as f64) as usize,
            config,
            geometry,
            glyphs: GlyphCache::new(),
            head_mm,
            scale: 1,
            alignment: Alignment::Left,
            cut_mm: None,
            ink: Vec::new(),
        }
    }

    /// Head position in mm after the ops processed so far.
    pub fn head_mm(&self) -> f64 {
        self.head_mm
    }

    /// Where the paper was cut, in mm from the leading gap midpoint.
    pub fn cut_mm(&self) -> Option<f64> {
        self.cut_mm
    }

    fn head_dots(&self) -> i64 {
        (self.head_mm * self.config.dots_per_mm).round() as i64
    }

    /// Walk the program, collecting ink.
    pub fn process(&mut self, program: &Program) {
        for op in program {
            self.process_op(op);
        }
    }

    fn process_op(&mut self, op: &Op) {
        match op {
            Op::Reset => {
                self.scale = 1;
                self.alignment = Alignment::Left;
            }
            Op::Cut => {
                self.cut_mm = Some(self.head_mm - self.config.cutter_offset_mm);
            }
            Op::Feed { .. } => {
                self.head_mm += op.feed_mm();
            }
            Op::SetCharacterSize(size) => {
                self.scale = match size {
                    CharacterSize::Normal => 1,
                    CharacterSize::DoubleWidthHeight => 2,
                };
            }
            Op::SetAlign(alignment) => {
                self.alignment = *alignment;
            }
            Op::SetMargins { left_mm, width_mm } => {
                self.left_dots = self.config.mm_to_dots(*left_mm as f64) as usize;
                self.width_dots = self.config.mm_to_dots(*width_mm as f64) as usize;
            }
            Op::Text(text) => {
                self.draw_text(text);
                self.head_mm += self.config.line_height_mm;
            }
            Op::Barcode(spec) => {
                self.draw_barcode(&spec.payload, spec.module_width as usize, spec.height as usize);
                self.head_mm += self.config.dots_to_mm(spec.height as u32);
            }
            Op::SetLineFeedPitch(_)
            | Op::SetPrintSpeed(_)
            | Op::SetPrintDensity(_)
            | Op::SetEnhanced(_)
            | Op::SetDoubleStrike(_)
            | Op::SetBarcodeWidth(_) => {}
        }
    }

    fn draw_text(&mut self, text: &str) {
        let char_w = GLYPH_WIDTH * self.scale;
        let line: Vec<char> = expand_tabs(text.trim_end_matches('\n'));
        let line_w = line.len() * char_w;
        let x0 = self.left_dots + self.align_offset(line_w);
        let top = self.head_dots();

        for (col, ch) in line.into_iter().enumerate() {
            let glyph = self.glyphs.glyph(ch).to_vec();
            for gy in 0..GLYPH_HEIGHT {
                for gx in 0..GLYPH_WIDTH {
                    if !glyph[gy * GLYPH_WIDTH + gx] {
                        continue;
                    }
                    for sy in 0..self.scale {
                        for sx in 0..self.scale {
                            let x = x0 + col * char_w + gx * self.scale + sx;
                            let y = top + (gy * self.scale + sy) as i64;
                            self.plot(x, y);
                        }
                    }
                }
            }
        }
    }

    fn draw_barcode(&mut self, payload: &str, module_dots: usize, height: usize) {
        let bars = encode_code39(payload, module_dots);
        let x0 = self.left_dots + self.align_offset(bars.len());
        let top = self.head_dots();

        for (i, &is_bar) in bars.iter().enumerate() {
            if !is_bar {
                continue;
            }
            for dy in 0..height {
                self.plot(x0 + i, top + dy as i64);
            }
        }
    }

    fn align_offset(&self, content_w: usize) -> usize {
        let free = self.width_dots.saturating_sub(content_w);
        match self.alignment {
            Alignment::Left => 0,
            Alignment::Center => free / 2,
            Alignment::Right => free,
        }
    }

    fn plot(&mut self, x: usize, y: i64) {
        // The device drops whatever falls outside the print area.
        if x < self.left_dots + self.width_dots {
            self.ink.push((x, y));
        }
    }

    /// Composite the strip: gaps, label edges, ink and cut line.
    pub fn to_image(&self) -> GrayImage {
        let dpm = self.config.dots_per_mm;
        let gap = self.geometry.gap_mm();
        let height = self.geometry.height_mm();

        let origin_mm = -gap;
        let end_mm = [
            height + 2.0 * gap,
            self.head_mm + gap,
            self.cut_mm.unwrap_or(0.0) + gap,
        ]
        .into_iter()
        .fold(f64::MIN, f64::max);

        let to_row = |mm: f64| ((mm - origin_mm) * dpm).round().max(0.0) as u32;
        let width = self.config.paper_width_dots().max(1);
        let rows = to_row(end_mm).max(1);
        let mut img = GrayImage::from_pixel(width, rows, Luma([WHITE]));

        // Leading gap, trailing gap
        for center in [0.0, height + gap] {
            let (top, bottom) = (to_row(center - gap / 2.0), to_row(center + gap / 2.0));
            for y in top..bottom.min(rows) {
                for x in 0..width {
                    img.put_pixel(x, y, Luma([GAP_SHADE]));
                }
            }
        }

        // Label edges
        for edge in [gap / 2.0, gap / 2.0 + height] {
            let y = to_row(edge);
            if y < rows {
                for x in 0..width {
                    img.put_pixel(x, y, Luma([EDGE_SHADE]));
                }
            }
        }

        let origin_dots = (origin_mm * dpm).round() as i64;
        for &(x, y) in &self.ink {
            let row = y - origin_dots;
            if row >= 0 && (row as u32) < rows && (x as u32) < width {
                img.put_pixel(x as u32, row as u32, Luma([BLACK]));
            }
        }

        if let Some(cut) = self.cut_mm {
            let y = to_row(cut);
            if y < rows {
                for x in 0..width {
                    if (x as usize / DASH_DOTS) % 2 == 0 {
                        img.put_pixel(x, y, Luma([BLACK]));
                    }
                }
            }
        }

        img
    }

    /// Encode the strip as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, LabelError> {
        let img = self.to_image();
        let mut png_bytes = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
        encoder
            .write_image(
                img.as_raw(),
                img.width(),
                img.height(),
                image::ExtendedColorType::L8,
            )
            .map_err(|e: image::ImageError| LabelError::Preview(e.to_string()))?;
        Ok(png_bytes)
    }
}

/// Expand HT to the next tab stop.
fn expand_tabs(text: &str) -> Vec<char> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        if ch == '\t' {
            let next = (out.len() / TAB_COLUMNS + 1) * TAB_COLUMNS;
            out.resize(next, ' ');
        } else if !ch.is_control() {
            out.push(ch);
        }
    }
    out
}

/// Render a label program to PNG bytes on NP-3511D stock.
pub fn render_label_preview(
    program: &Program,
    geometry: &LabelGeometry,
) -> Result<Vec<u8>, LabelError> {
    let mut preview = LabelPreview::new(PrinterConfig::NP3511D, *geometry);
    preview.process(program);
    tracing::debug!(
        head_mm = preview.head_mm(),
        cut_mm = ?preview.cut_mm(),
        "preview rendered"
    );
    preview.to_png()
}
