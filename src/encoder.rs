//! # Command Encoder
//!
//! Translates logical printer directives into an append-only command stream.
//! Each method appends one op (or, for long feeds, a run of feed ops) to the
//! underlying [`Program`]. Nothing is ever read back or rewritten.
//!
//! Out-of-range settings are clamped or mapped to a documented fallback.
//! None of them fail.
//!
//! ## Feed decomposition
//!
//! The device moves paper in 1/8 mm steps, at most 255 steps per command.
//! A requested distance `d` becomes `floor(d / 31.875)` full commands plus one
//! remainder command of `round(8 · (d mod 31.875))` steps:
//!
//! ```text
//! d = 70.0 mm  →  255 + 255 + 50 steps  (31.875 + 31.875 + 6.25 mm)
//! ```
//!
//! The feed methods return the signed distance that was *requested*. The
//! device may land up to half a step away from it. The label composer adds
//! these returns to its head position, and recomputes every spacing from
//! geometry so that rounding never compounds.

use crate::ir::{BarcodeSpec, FeedDirection, Op, Program};
use crate::protocol::barcode::ModuleWidth;
use crate::protocol::commands::{self, MAX_FEED_MM, MAX_FEED_STEPS, PrintSpeed, STEPS_PER_MM};
use crate::protocol::text::{Alignment, CharacterSize};

/// Finished device byte stream for one job.
///
/// Produced once by [`CommandEncoder::finish`] and handed to a print sink as
/// an opaque byte sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandBuffer {
    bytes: Vec<u8>,
}

impl CommandBuffer {
    /// The raw bytes, to be sent verbatim.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lowercase hex dump without separators.
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }
}

impl From<&Program> for CommandBuffer {
    fn from(program: &Program) -> Self {
        Self {
            bytes: program.to_bytes(),
        }
    }
}

/// Builds the command stream for one job.
///
/// ## Example
///
/// ```
/// use osilabel::encoder::CommandEncoder;
///
/// let mut encoder = CommandEncoder::new();
/// encoder.reset();
/// let moved = encoder.feed_forward_mm(40.0);
/// assert_eq!(moved, 40.0);
///
/// // 40mm = one full 255-step command + 65 steps
/// assert_eq!(encoder.command_count(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandEncoder {
    program: Program,
}

impl CommandEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ops emitted so far.
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Number of device commands emitted so far.
    pub fn command_count(&self) -> usize {
        self.program.len()
    }

    /// Consume the encoder and compile its program.
    pub fn finish(self) -> (Program, CommandBuffer) {
        let buffer = CommandBuffer::from(&self.program);
        (self.program, buffer)
    }

    // ========================================================================
    // Printer control
    // ========================================================================

    /// Reset the device. Must be the first op of a job.
    pub fn reset(&mut self) {
        self.program.push(Op::Reset);
    }

    /// Full cut.
    pub fn cut(&mut self) {
        self.program.push(Op::Cut);
    }

    /// Minimum auto line feed in 1/8 mm steps, clamped to 0–255.
    pub fn set_line_feed_pitch(&mut self, steps: i32) {
        let clamped = steps.clamp(0, MAX_FEED_STEPS as i32);
        if clamped != steps {
            tracing::debug!(requested = steps, clamped, "line feed pitch clamped");
        }
        self.program.push(Op::SetLineFeedPitch(clamped as u8));
    }

    // ========================================================================
    // Print quality
    // ========================================================================

    /// Maximum print speed in mm/s. Unknown speeds select 75 mm/s.
    pub fn set_print_speed(&mut self, mm_per_sec: i32) {
        let speed = PrintSpeed::from_mm_per_sec(mm_per_sec);
        if speed.mm_per_sec() != mm_per_sec {
            tracing::debug!(requested = mm_per_sec, "unsupported print speed, using 75 mm/s");
        }
        self.program.push(Op::SetPrintSpeed(speed));
    }

    /// Print density in percent, clamped to 65–130.
    pub fn set_print_density(&mut self, percent: f32) {
        let density = commands::clamp_density(percent);
        self.program.push(Op::SetPrintDensity(density));
    }

    pub fn set_enhanced_print(&mut self, enabled: bool) {
        self.program.push(Op::SetEnhanced(enabled));
    }

    pub fn set_double_strike(&mut self, enabled: bool) {
        self.program.push(Op::SetDoubleStrike(enabled));
    }

    // ========================================================================
    // Layout
    // ========================================================================

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.program.push(Op::SetAlign(alignment));
    }

    /// Font A at double width and height (48-dot rows).
    pub fn set_double_width_height(&mut self) {
        self.program
            .push(Op::SetCharacterSize(CharacterSize::DoubleWidthHeight));
    }

    /// Font A at normal size.
    pub fn set_normal_width_height(&mut self) {
        self.program.push(Op::SetCharacterSize(CharacterSize::Normal));
    }

    /// Barcode module width class (2, 3 or 4; anything else selects 3).
    pub fn set_barcode_width(&mut self, class: i32) {
        self.program
            .push(Op::SetBarcodeWidth(ModuleWidth::from_class(class)));
    }

    /// Left margin and print width in mm, truncated to whole millimeters.
    pub fn set_margins(&mut self, left_mm: f32, width_mm: f32) {
        self.program.push(Op::SetMargins {
            left_mm: left_mm as u8,
            width_mm: width_mm as u8,
        });
    }

    // ========================================================================
    // Content
    // ========================================================================

    /// Append text. The caller includes `\n` when the line should end.
    pub fn emit_text(&mut self, text: &str) {
        self.program.push(Op::Text(text.to_string()));
    }

    /// Append a CODE39 barcode.
    pub fn emit_barcode(&mut self, spec: &BarcodeSpec) {
        self.program.push(Op::Barcode(spec.clone()));
    }

    // ========================================================================
    // Paper feed
    // ========================================================================

    /// Feed forward by `distance_mm`. Returns the signed distance requested
    /// (positive). A negative distance feeds backward instead.
    pub fn feed_forward_mm(&mut self, distance_mm: f64) -> f64 {
        self.feed_mm(FeedDirection::Forward, distance_mm)
    }

    /// Feed backward by `distance_mm`. Returns the signed distance requested
    /// (negative). A negative distance feeds forward instead.
    pub fn feed_backward_mm(&mut self, distance_mm: f64) -> f64 {
        self.feed_mm(FeedDirection::Backward, distance_mm)
    }

    fn feed_mm(&mut self, direction: FeedDirection, distance_mm: f64) -> f64 {
        let distance_mm = if distance_mm.is_finite() {
            distance_mm
        } else {
            tracing::warn!(distance_mm, "non-finite feed distance, feeding 0 mm");
            0.0
        };

        if distance_mm < 0.0 {
            return self.feed_mm(direction.reversed(), -distance_mm);
        }

        let full_commands = (distance_mm / MAX_FEED_MM).floor() as usize;
        let remainder_mm = distance_mm % MAX_FEED_MM;
        let remainder_steps = (remainder_mm * STEPS_PER_MM).round() as u8;

        for _ in 0..full_commands {
            self.program.push(Op::Feed {
                direction,
                steps: MAX_FEED_STEPS,
            });
        }
        self.program.push(Op::Feed {
            direction,
            steps: remainder_steps,
        });

        direction.sign() * distance_mm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn feed_steps(encoder: &CommandEncoder) -> Vec<(FeedDirection, u8)> {
        encoder
            .program()
            .iter()
            .filter_map(|op| match op {
                Op::Feed { direction, steps } => Some((*direction, *steps)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_short_feed_is_one_command() {
        for d in [0.0, 0.125, 0.5, 5.0, 6.0, 22.0, 31.75, 31.874] {
            let mut encoder = CommandEncoder::new();
            let moved = encoder.feed_forward_mm(d);
            assert_eq!(moved, d);
            assert_eq!(encoder.command_count(), 1, "distance {}", d);
        }
    }

    #[test]
    fn test_zero_feed_still_emits_command() {
        let mut encoder = CommandEncoder::new();
        encoder.feed_forward_mm(0.0);
        assert_eq!(feed_steps(&encoder), vec![(FeedDirection::Forward, 0)]);
    }

    #[test]
    fn test_long_feed_decomposition() {
        let mut encoder = CommandEncoder::new();
        let moved = encoder.feed_forward_mm(70.0);

        assert_eq!(moved, 70.0);
        // 70 = 2 * 31.875 + 6.25
        assert_eq!(
            feed_steps(&encoder),
            vec![
                (FeedDirection::Forward, 255),
                (FeedDirection::Forward, 255),
                (FeedDirection::Forward, 50),
            ]
        );
    }

    #[test]
    fn test_exact_multiple_emits_zero_remainder() {
        let mut encoder = CommandEncoder::new();
        encoder.feed_forward_mm(31.875);
        assert_eq!(
            feed_steps(&encoder),
            vec![(FeedDirection::Forward, 255), (FeedDirection::Forward, 0)]
        );
    }

    #[test]
    fn test_remainder_steps_are_rounded() {
        for d in [0.06, 0.07, 1.3, 33.0, 40.01, 100.0] {
            let mut encoder = CommandEncoder::new();
            encoder.feed_forward_mm(d);

            let steps = feed_steps(&encoder);
            let full = (d / 31.875).floor() as usize;
            assert_eq!(steps.len(), full + 1);
            let expected = ((d % 31.875) * 8.0).round() as u8;
            assert_eq!(steps.last().map(|s| s.1), Some(expected), "distance {}", d);
        }
    }

    #[test]
    fn test_backward_returns_negative() {
        let mut encoder = CommandEncoder::new();
        let moved = encoder.feed_backward_mm(5.0);
        assert_eq!(moved, -5.0);
        assert_eq!(feed_steps(&encoder), vec![(FeedDirection::Backward, 40)]);
    }

    #[test]
    fn test_negative_distance_redirects() {
        let mut encoder = CommandEncoder::new();
        let moved = encoder.feed_forward_mm(-3.0);
        assert_eq!(moved, -3.0);
        assert_eq!(feed_steps(&encoder), vec![(FeedDirection::Backward, 24)]);

        let mut encoder = CommandEncoder::new();
        let moved = encoder.feed_backward_mm(-3.0);
        assert_eq!(moved, 3.0);
        assert_eq!(feed_steps(&encoder), vec![(FeedDirection::Forward, 24)]);
    }

    #[test]
    fn test_forward_backward_command_symmetry() {
        for d in [0.3, 12.5, 31.875, 47.1, 99.99] {
            let mut forward = CommandEncoder::new();
            forward.feed_forward_mm(d);
            let mut backward = CommandEncoder::new();
            backward.feed_backward_mm(d);

            let f: Vec<u8> = feed_steps(&forward).iter().map(|s| s.1).collect();
            let b: Vec<u8> = feed_steps(&backward).iter().map(|s| s.1).collect();
            assert_eq!(f, b, "distance {}", d);

            let mut both = CommandEncoder::new();
            let net = both.feed_forward_mm(d) + both.feed_backward_mm(d);
            assert_eq!(net, 0.0);
            assert_eq!(both.program().net_feed_mm(), 0.0);
        }
    }

    #[test]
    fn test_non_finite_feed() {
        let mut encoder = CommandEncoder::new();
        assert_eq!(encoder.feed_forward_mm(f64::NAN), 0.0);
        assert_eq!(encoder.feed_forward_mm(f64::INFINITY), 0.0);
        assert_eq!(encoder.command_count(), 2);
    }

    #[test]
    fn test_density_clamped() {
        let mut encoder = CommandEncoder::new();
        encoder.set_print_density(50.0);
        encoder.set_print_density(200.0);
        encoder.set_print_density(100.0);
        assert_eq!(
            encoder.program().ops,
            vec![
                Op::SetPrintDensity(65),
                Op::SetPrintDensity(130),
                Op::SetPrintDensity(100),
            ]
        );
        let (_, buffer) = encoder.finish();
        assert_eq!(
            buffer.as_bytes(),
            &[0x1D, 0x7E, 65, 0x1D, 0x7E, 130, 0x1D, 0x7E, 100]
        );
    }

    #[test]
    fn test_line_feed_pitch_clamped() {
        let mut encoder = CommandEncoder::new();
        encoder.set_line_feed_pitch(-4);
        encoder.set_line_feed_pitch(300);
        encoder.set_line_feed_pitch(0);
        assert_eq!(
            encoder.program().ops,
            vec![
                Op::SetLineFeedPitch(0),
                Op::SetLineFeedPitch(255),
                Op::SetLineFeedPitch(0),
            ]
        );
    }

    #[test]
    fn test_fallbacks() {
        let mut encoder = CommandEncoder::new();
        encoder.set_print_speed(90);
        encoder.set_barcode_width(7);
        encoder.set_alignment(Alignment::from_name("middle"));
        assert_eq!(
            encoder.program().ops,
            vec![
                Op::SetPrintSpeed(PrintSpeed::Mm75),
                Op::SetBarcodeWidth(ModuleWidth::Normal),
                Op::SetAlign(Alignment::Left),
            ]
        );
    }

    #[test]
    fn test_margins_truncated() {
        let mut encoder = CommandEncoder::new();
        encoder.set_margins(6.9, 66.2);
        let (_, buffer) = encoder.finish();
        assert_eq!(buffer.as_bytes(), &[0x1D, 0x57, 6, 66]);
    }

    #[test]
    fn test_buffer_hex() {
        let mut encoder = CommandEncoder::new();
        encoder.reset();
        encoder.cut();
        let (program, buffer) = encoder.finish();
        assert_eq!(program.len(), 2);
        assert_eq!(buffer.to_hex(), "1b401b69");
        assert_eq!(buffer.len(), 4);
    }
}
