//! # Label Geometry
//!
//! Physical dimensions of the die-cut stock loaded in the printer, and the
//! three feeds derived from them.
//!
//! Positions are measured in mm from the midpoint of the gap behind the
//! current label, in the feed direction:
//!
//! ```text
//!        gap/2        margin                          margin   gap
//!   ──┤· · ·├──────┬────────────────────────────────┬──────┤· · ·├──
//!     0      label  print area starts here                   next gap
//!            top    (margin + gap/2)
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::printer::PrinterConfig;

/// Supported label heights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum LabelHeight {
    Mm40,
    Mm49,
    #[default]
    Mm50,
}

impl LabelHeight {
    pub const ALL: [LabelHeight; 3] = [Self::Mm50, Self::Mm40, Self::Mm49];

    pub fn mm(self) -> f64 {
        u32::from(self) as f64
    }
}

impl From<LabelHeight> for u32 {
    fn from(height: LabelHeight) -> u32 {
        match height {
            LabelHeight::Mm40 => 40,
            LabelHeight::Mm49 => 49,
            LabelHeight::Mm50 => 50,
        }
    }
}

impl TryFrom<u32> for LabelHeight {
    type Error = String;

    fn try_from(mm: u32) -> Result<Self, Self::Error> {
        match mm {
            40 => Ok(Self::Mm40),
            49 => Ok(Self::Mm49),
            50 => Ok(Self::Mm50),
            other => Err(format!(
                "Unsupported label height '{}mm'. Use 40, 49 or 50",
                other
            )),
        }
    }
}

impl FromStr for LabelHeight {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_mm(s)?.try_into()
    }
}

impl fmt::Display for LabelHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}mm", u32::from(*self))
    }
}

/// Supported gaps between consecutive labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum GapSize {
    Mm4,
    #[default]
    Mm5,
    Mm6,
}

impl GapSize {
    pub const ALL: [GapSize; 3] = [Self::Mm5, Self::Mm6, Self::Mm4];

    pub fn mm(self) -> f64 {
        u32::from(self) as f64
    }
}

impl From<GapSize> for u32 {
    fn from(gap: GapSize) -> u32 {
        match gap {
            GapSize::Mm4 => 4,
            GapSize::Mm5 => 5,
            GapSize::Mm6 => 6,
        }
    }
}

impl TryFrom<u32> for GapSize {
    type Error = String;

    fn try_from(mm: u32) -> Result<Self, Self::Error> {
        match mm {
            4 => Ok(Self::Mm4),
            5 => Ok(Self::Mm5),
            6 => Ok(Self::Mm6),
            other => Err(format!("Unsupported gap '{}mm'. Use 4, 5 or 6", other)),
        }
    }
}

impl FromStr for GapSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_mm(s)?.try_into()
    }
}

impl fmt::Display for GapSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}mm", u32::from(*self))
    }
}

/// Accepts `"50"` and `"50mm"`.
fn parse_mm(s: &str) -> Result<u32, String> {
    let trimmed = s.trim();
    let digits = trimmed.strip_suffix("mm").unwrap_or(trimmed).trim();
    digits
        .parse()
        .map_err(|_| format!("Invalid length '{}': expected whole millimeters", s))
}

/// Label stock and cutter geometry for one job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelGeometry {
    pub height: LabelHeight,
    pub gap: GapSize,
    pub margin_mm: f64,
    pub cutter_offset_mm: f64,
    pub post_cut_advance_mm: f64,
}

impl LabelGeometry {
    pub fn new(height: LabelHeight, gap: GapSize, config: &PrinterConfig) -> Self {
        Self {
            height,
            gap,
            margin_mm: config.label_margin_mm,
            cutter_offset_mm: config.cutter_offset_mm,
            post_cut_advance_mm: config.post_cut_advance_mm,
        }
    }

    pub fn height_mm(&self) -> f64 {
        self.height.mm()
    }

    pub fn gap_mm(&self) -> f64 {
        self.gap.mm()
    }

    /// Backward feed that brings the head from the last cut to the first
    /// print line of the next label.
    ///
    /// The previous job left the cutter on the gap midpoint, and the device
    /// then advanced `post_cut_advance_mm` by itself.
    pub fn alignment_feed_mm(&self) -> f64 {
        self.cutter_offset_mm - self.gap_mm() / 2.0 - self.margin_mm + self.post_cut_advance_mm
    }

    /// Head position after the alignment feed: the first printable line.
    pub fn label_start_position(&self) -> f64 {
        self.margin_mm + self.gap_mm() / 2.0
    }

    /// Forward feed that puts the cutter on the midpoint of the gap after
    /// this label, given the current head position.
    pub fn cut_point_feed_mm(&self, head_mm: f64, adjustment_mm: f64) -> f64 {
        self.height_mm() + self.gap_mm() - head_mm + self.cutter_offset_mm + adjustment_mm
    }

    /// Distance from one gap midpoint to the next.
    pub fn pitch_mm(&self) -> f64 {
        self.height_mm() + self.gap_mm()
    }
}

impl Default for LabelGeometry {
    fn default() -> Self {
        Self::new(
            LabelHeight::default(),
            GapSize::default(),
            &PrinterConfig::NP3511D,
        )
    }
}
