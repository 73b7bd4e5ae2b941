//! # Code Generation
//!
//! Converts IR programs to NP-3511D protocol bytes.

use super::ops::{FeedDirection, Op, Program};
use crate::protocol::{barcode, commands, cp437, text};

impl Program {
    /// Compile the IR program to device bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();

        for op in &self.ops {
            match op {
                // ===== Printer Control =====
                Op::Reset => {
                    out.extend(commands::reset());
                }
                Op::Cut => {
                    out.extend(commands::cut_full());
                }
                Op::Feed { direction, steps } => match direction {
                    FeedDirection::Forward => out.extend(commands::feed_forward(*steps)),
                    FeedDirection::Backward => out.extend(commands::feed_backward(*steps)),
                },
                Op::SetLineFeedPitch(steps) => {
                    out.extend(commands::line_feed_pitch(*steps));
                }

                // ===== Print Quality =====
                Op::SetPrintSpeed(speed) => {
                    out.extend(commands::max_print_speed(*speed));
                }
                Op::SetPrintDensity(percent) => {
                    out.extend(commands::print_density(*percent));
                }
                Op::SetEnhanced(enabled) => {
                    out.extend(text::enhanced(*enabled));
                }
                Op::SetDoubleStrike(enabled) => {
                    out.extend(text::double_strike(*enabled));
                }

                // ===== Layout =====
                Op::SetAlign(align) => {
                    out.extend(text::align(*align));
                }
                Op::SetCharacterSize(size) => {
                    out.extend(text::character_size(*size));
                }
                Op::SetMargins { left_mm, width_mm } => {
                    out.extend(text::margins(*left_mm, *width_mm));
                }
                Op::SetBarcodeWidth(width) => {
                    out.extend(barcode::module_width(*width));
                }

                // ===== Content =====
                Op::Text(s) => {
                    out.extend(cp437::encode(s));
                }
                Op::Barcode(spec) => {
                    out.extend(barcode::code39(
                        &cp437::encode(&spec.payload),
                        spec.height,
                        spec.module_width,
                        spec.human_readable,
                    ));
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::BarcodeSpec;
    use crate::protocol::barcode::ModuleWidth;
    use crate::protocol::commands::PrintSpeed;
    use crate::protocol::text::Alignment;

    #[test]
    fn test_empty_program() {
        let program = Program::new();
        assert!(program.to_bytes().is_empty());
    }

    #[test]
    fn test_reset_only() {
        let program: Program = vec![Op::Reset].into_iter().collect();
        assert_eq!(program.to_bytes(), vec![0x1B, 0x40]);
    }

    #[test]
    fn test_text_has_no_implicit_newline() {
        let program: Program = vec![Op::Text("AB".into())].into_iter().collect();
        assert_eq!(program.to_bytes(), b"AB".to_vec());
    }

    #[test]
    fn test_setup_sequence() {
        let program: Program = vec![
            Op::SetAlign(Alignment::Left),
            Op::SetPrintSpeed(PrintSpeed::Mm75),
            Op::SetPrintDensity(130),
            Op::SetMargins {
                left_mm: 6,
                width_mm: 66,
            },
        ]
        .into_iter()
        .collect();

        assert_eq!(
            program.to_bytes(),
            vec![
                0x1B, 0x61, 0x00, //
                0x1D, 0x53, 0x04, //
                0x1D, 0x7E, 0x82, //
                0x1D, 0x57, 0x06, 0x42,
            ]
        );
    }

    #[test]
    fn test_feeds() {
        let program: Program = vec![
            Op::Feed {
                direction: FeedDirection::Backward,
                steps: 40,
            },
            Op::Feed {
                direction: FeedDirection::Forward,
                steps: 255,
            },
        ]
        .into_iter()
        .collect();

        assert_eq!(
            program.to_bytes(),
            vec![0x1B, 0x42, 40, 0x1B, 0x4A, 0xFF]
        );
    }

    #[test]
    fn test_barcode() {
        let program: Program = vec![Op::Barcode(BarcodeSpec::code39("12", ModuleWidth::Normal))]
            .into_iter()
            .collect();

        let bytes = program.to_bytes();
        assert!(bytes.starts_with(&[0x1D, 0x68, 48, 0x1D, 0x77, 3]));
        assert!(bytes.ends_with(&[0x1D, 0x6B, 0x04, b'*', b'1', b'2', b'*', 0x00]));
    }

    #[test]
    fn test_cut() {
        let program: Program = vec![Op::Cut].into_iter().collect();
        assert_eq!(program.to_bytes(), vec![0x1B, 0x69]);
    }
}
