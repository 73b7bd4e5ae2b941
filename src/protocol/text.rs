//! # Text Layout Commands
//!
//! Alignment, character size, print emphasis and margin commands.
//!
//! | Setting | Command | Effect |
//! |---------|---------|--------|
//! | Alignment | ESC a n | Left / center / right |
//! | Enhanced | ESC E n | Heavier dots |
//! | Double strike | ESC G n | Each line printed twice |
//! | Print mode | ESC ! n | Font A, optional 2x width and height |
//! | Margins | GS W l w | Left margin and print width in mm |
//!
//! Labels are always printed with Font A at double width and height. That
//! makes every text row 48 dots (6 mm) tall, which is the row height the
//! layout planner counts with.

use super::commands::{ESC, GS};

// ============================================================================
// ALIGNMENT
// ============================================================================

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

impl Alignment {
    /// Resolve an alignment name (`"LEFT"`, `"CENTER"`, `"RIGHT"`, any case).
    ///
    /// Unknown names fall back to [`Alignment::Left`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "CENTER" => Self::Center,
            "RIGHT" => Self::Right,
            _ => Self::Left,
        }
    }
}

/// # Set Alignment (ESC a n)
///
/// | Format  | Bytes   |
/// |---------|---------|
/// | ASCII   | ESC a n |
/// | Hex     | 1B 61 n |
///
/// ```
/// use osilabel::protocol::text::{align, Alignment};
///
/// assert_eq!(align(Alignment::Right), vec![0x1B, 0x61, 0x02]);
/// ```
pub fn align(alignment: Alignment) -> Vec<u8> {
    vec![ESC, b'a', alignment as u8]
}

// ============================================================================
// PRINT MODE (CHARACTER SIZE)
// ============================================================================

/// Character size used for label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharacterSize {
    /// Font A, 1x1
    #[default]
    Normal,
    /// Font A, 2x width and 2x height
    DoubleWidthHeight,
}

/// # Select Print Mode (ESC ! n)
///
/// `n = 0x38` selects Font A with double height (0x10), double width (0x20)
/// and emphasis bit 3 (0x08). `n = 0x00` restores plain Font A.
///
/// | Format  | Bytes   |
/// |---------|---------|
/// | ASCII   | ESC ! n |
/// | Hex     | 1B 21 n |
pub fn character_size(size: CharacterSize) -> Vec<u8> {
    let n = match size {
        CharacterSize::Normal => 0x00,
        CharacterSize::DoubleWidthHeight => 0x38,
    };
    vec![ESC, b'!', n]
}

// ============================================================================
// PRINT EMPHASIS
// ============================================================================

/// # Enhanced Print (ESC E n)
///
/// | Format  | Bytes      |
/// |---------|------------|
/// | Hex     | 1B 45 01/00 |
#[inline]
pub fn enhanced(enabled: bool) -> Vec<u8> {
    vec![ESC, b'E', enabled as u8]
}

/// # Double Strike (ESC G n)
///
/// | Format  | Bytes      |
/// |---------|------------|
/// | Hex     | 1B 47 01/00 |
#[inline]
pub fn double_strike(enabled: bool) -> Vec<u8> {
    vec![ESC, b'G', enabled as u8]
}

// ============================================================================
// MARGINS
// ============================================================================

/// # Set Margins (GS W l w)
///
/// Sets the left margin and the printable width, both in whole millimeters.
/// Must come after the print mode and alignment commands on this printer
/// family.
///
/// | Format  | Bytes      |
/// |---------|------------|
/// | ASCII   | GS W l w   |
/// | Hex     | 1D 57 l w  |
///
/// ```
/// use osilabel::protocol::text::margins;
///
/// assert_eq!(margins(6, 66), vec![0x1D, 0x57, 6, 66]);
/// ```
pub fn margins(left_mm: u8, width_mm: u8) -> Vec<u8> {
    vec![GS, b'W', left_mm, width_mm]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align() {
        assert_eq!(align(Alignment::Left), vec![0x1B, 0x61, 0x00]);
        assert_eq!(align(Alignment::Center), vec![0x1B, 0x61, 0x01]);
        assert_eq!(align(Alignment::Right), vec![0x1B, 0x61, 0x02]);
    }

    #[test]
    fn test_alignment_from_name() {
        assert_eq!(Alignment::from_name("RIGHT"), Alignment::Right);
        assert_eq!(Alignment::from_name("center"), Alignment::Center);
        assert_eq!(Alignment::from_name("LEFT"), Alignment::Left);
        assert_eq!(Alignment::from_name("JUSTIFY"), Alignment::Left);
        assert_eq!(Alignment::from_name(""), Alignment::Left);
    }

    #[test]
    fn test_character_size() {
        assert_eq!(
            character_size(CharacterSize::DoubleWidthHeight),
            vec![0x1B, 0x21, 0x38]
        );
        assert_eq!(character_size(CharacterSize::Normal), vec![0x1B, 0x21, 0x00]);
    }

    #[test]
    fn test_emphasis_toggles() {
        assert_eq!(enhanced(true), vec![0x1B, 0x45, 0x01]);
        assert_eq!(enhanced(false), vec![0x1B, 0x45, 0x00]);
        assert_eq!(double_strike(true), vec![0x1B, 0x47, 0x01]);
        assert_eq!(double_strike(false), vec![0x1B, 0x47, 0x00]);
    }

    #[test]
    fn test_margins() {
        assert_eq!(margins(6, 66), vec![0x1D, 0x57, 0x06, 0x42]);
    }
}
