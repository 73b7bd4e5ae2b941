//! # IR Opcodes
//!
//! The intermediate representation of a label job: one opcode per logical
//! printer directive. A job is built as a [`Program`], inspected or previewed,
//! and compiled to device bytes by codegen.
//!
//! ```text
//! CommandEncoder → IR (Vec<Op>) → Codegen → CommandBuffer
//!                        ↓
//!                     Preview
//! ```
//!
//! Ops are never merged or reordered. Every op compiles to exactly one device
//! command (or one text run), so the op count is the command count.

use crate::protocol::barcode::ModuleWidth;
use crate::protocol::commands::PrintSpeed;
use crate::protocol::text::{Alignment, CharacterSize};

/// Paper feed direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedDirection {
    Forward,
    Backward,
}

impl FeedDirection {
    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }

    /// +1.0 for forward, -1.0 for backward.
    pub fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }
}

/// A CODE39 barcode to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarcodeSpec {
    /// Data including the `*` start/stop characters.
    pub payload: String,
    pub module_width: ModuleWidth,
    /// Bar height in dots (48 dots = 6 mm).
    pub height: u8,
    /// Print the human-readable line under the bars.
    pub human_readable: bool,
}

impl BarcodeSpec {
    /// Bar height used on every label (6 mm).
    pub const LABEL_HEIGHT_DOTS: u8 = 48;

    /// CODE39 barcode for an identifier, wrapped in `*` start/stop characters,
    /// 48 dots high, without human-readable text.
    pub fn code39(identifier: &str, module_width: ModuleWidth) -> Self {
        Self {
            payload: format!("*{}*", identifier),
            module_width,
            height: Self::LABEL_HEIGHT_DOTS,
            human_readable: false,
        }
    }
}

/// IR opcodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    // ========== Printer Control ==========
    /// Reset the printer (ESC @).
    Reset,

    /// Full cut (ESC i).
    Cut,

    /// Feed paper by a number of 1/8 mm steps.
    Feed { direction: FeedDirection, steps: u8 },

    /// Minimum line feed in 1/8 mm steps (0 disables auto feed).
    SetLineFeedPitch(u8),

    // ========== Print Quality ==========
    SetPrintSpeed(PrintSpeed),

    /// Density percentage, already clamped to 65–130.
    SetPrintDensity(u8),

    SetEnhanced(bool),

    SetDoubleStrike(bool),

    // ========== Layout ==========
    SetAlign(Alignment),

    SetCharacterSize(CharacterSize),

    SetMargins { left_mm: u8, width_mm: u8 },

    SetBarcodeWidth(ModuleWidth),

    // ========== Content ==========
    /// Text run. No implicit line feed; include `\n` to end the line.
    Text(String),

    /// CODE39 barcode.
    Barcode(BarcodeSpec),
}

impl Op {
    /// Signed paper displacement of this op in mm, counting only explicit
    /// feeds.
    pub fn feed_mm(&self) -> f64 {
        match self {
            Op::Feed { direction, steps } => direction.sign() * (*steps as f64) / 8.0,
            _ => 0.0,
        }
    }
}

/// A compiled IR program.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub ops: Vec<Op>,
}

impl Program {
    /// Create an empty program.
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Add an op to the program.
    pub fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    /// Get the number of ops in the program.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check if the program is empty.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Iterate over ops.
    pub fn iter(&self) -> impl Iterator<Item = &Op> {
        self.ops.iter()
    }

    /// Number of feed commands in the program.
    pub fn feed_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::Feed { .. }))
            .count()
    }

    /// Number of text runs in the program.
    pub fn text_count(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, Op::Text(_))).count()
    }

    /// Number of barcodes in the program.
    pub fn barcode_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::Barcode(_)))
            .count()
    }

    /// Number of cuts in the program.
    pub fn cut_count(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, Op::Cut)).count()
    }

    /// Net paper displacement from explicit feeds, in mm as the device
    /// executes it (whole steps).
    pub fn net_feed_mm(&self) -> f64 {
        self.ops.iter().map(Op::feed_mm).sum()
    }
}

impl FromIterator<Op> for Program {
    fn from_iter<T: IntoIterator<Item = Op>>(iter: T) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Program {
    type Item = Op;
    type IntoIter = std::vec::IntoIter<Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Op;
    type IntoIter = std::slice::Iter<'a, Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_new() {
        let program = Program::new();
        assert!(program.is_empty());
    }

    #[test]
    fn test_program_push() {
        let mut program = Program::new();
        program.push(Op::Reset);
        program.push(Op::SetEnhanced(true));
        program.push(Op::Text("Hello".into()));
        assert_eq!(program.len(), 3);
        assert_eq!(program.text_count(), 1);
    }

    #[test]
    fn test_barcode_spec_wraps_payload() {
        let spec = BarcodeSpec::code39("123456", ModuleWidth::Normal);
        assert_eq!(spec.payload, "*123456*");
        assert_eq!(spec.height, 48);
        assert!(!spec.human_readable);
    }

    #[test]
    fn test_net_feed_mm() {
        let program: Program = vec![
            Op::Feed {
                direction: FeedDirection::Backward,
                steps: 40,
            },
            Op::Text("x".into()),
            Op::Feed {
                direction: FeedDirection::Forward,
                steps: 52,
            },
        ]
        .into_iter()
        .collect();

        assert_eq!(program.feed_count(), 2);
        assert_eq!(program.net_feed_mm(), 1.5);
    }

    #[test]
    fn test_feed_direction_reversed() {
        assert_eq!(FeedDirection::Forward.reversed(), FeedDirection::Backward);
        assert_eq!(FeedDirection::Backward.sign(), -1.0);
    }
}
