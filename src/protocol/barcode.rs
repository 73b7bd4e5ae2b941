//! # CODE39 Barcode Commands
//!
//! The label printer prints CODE39 natively. A barcode is emitted as a short
//! setup sequence followed by the data command:
//!
//! ```text
//! GS h n     bar height in dots
//! GS w n     module width class
//! GS f 0     HRI font A
//! GS H n     HRI position (0 = off)
//! GS k 4 d.. NUL
//! ```
//!
//! The payload carries its own `*` start/stop characters. The printer does
//! not add them.
//!
//! ## Example
//!
//! ```
//! use osilabel::protocol::barcode::{self, ModuleWidth};
//!
//! let cmd = barcode::code39(b"*123456*", 48, ModuleWidth::Normal, false);
//! assert!(cmd.ends_with(&[0x1D, 0x6B, 0x04, b'*', b'1', b'2', b'3', b'4', b'5', b'6', b'*', 0x00]));
//! ```

use super::commands::{GS, NUL};

/// CODE39 symbology selector for `GS k` (function A, NUL terminated).
const CODE39: u8 = 4;

/// Barcode module (narrow bar) width class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModuleWidth {
    /// 2 dots
    Narrow = 2,
    /// 3 dots (printer default)
    #[default]
    Normal = 3,
    /// 4 dots
    Wide = 4,
}

impl ModuleWidth {
    /// Map a width class (2, 3 or 4) to a module width. Anything else falls
    /// back to [`ModuleWidth::Normal`].
    pub fn from_class(class: i32) -> Self {
        match class {
            2 => Self::Narrow,
            4 => Self::Wide,
            _ => Self::Normal,
        }
    }
}

/// Symbols CODE39 can encode besides digits and upper-case letters.
pub const CODE39_SYMBOLS: &str = " -.$/+%";

/// Whether `c` can appear in CODE39 data (start/stop `*` excluded).
pub fn is_code39_char(c: char) -> bool {
    c.is_ascii_digit() || c.is_ascii_uppercase() || CODE39_SYMBOLS.contains(c)
}

/// Check CODE39 data wrapped in `*` start/stop characters.
///
/// The inner data must be non-empty and made of CODE39 characters only.
///
/// ```
/// use osilabel::protocol::barcode::is_code39_payload;
///
/// assert!(is_code39_payload("*AB-12*"));
/// assert!(!is_code39_payload("**"));
/// assert!(!is_code39_payload("*ab*"));
/// ```
pub fn is_code39_payload(payload: &str) -> bool {
    match payload
        .strip_prefix('*')
        .and_then(|rest| rest.strip_suffix('*'))
    {
        Some(data) => !data.is_empty() && data.chars().all(is_code39_char),
        None => false,
    }
}

/// # Set Barcode Height (GS h n)
#[inline]
pub fn height(dots: u8) -> Vec<u8> {
    vec![GS, b'h', dots.max(1)]
}

/// # Set Barcode Module Width (GS w n)
///
/// ```
/// use osilabel::protocol::barcode::{module_width, ModuleWidth};
///
/// assert_eq!(module_width(ModuleWidth::Wide), vec![0x1D, 0x77, 0x04]);
/// ```
#[inline]
pub fn module_width(width: ModuleWidth) -> Vec<u8> {
    vec![GS, b'w', width as u8]
}

/// # Select HRI Font A (GS f 0)
#[inline]
pub fn hri_font_a() -> Vec<u8> {
    vec![GS, b'f', 0]
}

/// # Set HRI Position (GS H n)
///
/// `n = 0` prints no human-readable text, `n = 2` prints it below the bars.
#[inline]
pub fn hri_position(human_readable: bool) -> Vec<u8> {
    vec![GS, b'H', if human_readable { 2 } else { 0 }]
}

/// # Print CODE39 Data (GS k 4 d1..dk NUL)
pub fn code39_data(data: &[u8]) -> Vec<u8> {
    let mut cmd = Vec::with_capacity(3 + data.len() + 1);
    cmd.push(GS);
    cmd.push(b'k');
    cmd.push(CODE39);
    cmd.extend_from_slice(data);
    cmd.push(NUL);
    cmd
}

/// Full CODE39 sequence: height, width, HRI font, HRI position, data.
pub fn code39(data: &[u8], height_dots: u8, width: ModuleWidth, human_readable: bool) -> Vec<u8> {
    let mut cmd = Vec::with_capacity(12 + 4 + data.len());
    cmd.extend(height(height_dots));
    cmd.extend(module_width(width));
    cmd.extend(hri_font_a());
    cmd.extend(hri_position(human_readable));
    cmd.extend(code39_data(data));
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_width_fallback() {
        assert_eq!(ModuleWidth::from_class(2), ModuleWidth::Narrow);
        assert_eq!(ModuleWidth::from_class(3), ModuleWidth::Normal);
        assert_eq!(ModuleWidth::from_class(4), ModuleWidth::Wide);
        assert_eq!(ModuleWidth::from_class(5), ModuleWidth::Normal);
        assert_eq!(ModuleWidth::from_class(0), ModuleWidth::Normal);
    }

    #[test]
    fn test_module_width_bytes() {
        assert_eq!(module_width(ModuleWidth::Narrow), vec![0x1D, 0x77, 0x02]);
        assert_eq!(module_width(ModuleWidth::Normal), vec![0x1D, 0x77, 0x03]);
    }

    #[test]
    fn test_height_never_zero() {
        assert_eq!(height(0), vec![0x1D, 0x68, 1]);
        assert_eq!(height(48), vec![0x1D, 0x68, 48]);
    }

    #[test]
    fn test_code39_sequence() {
        let cmd = code39(b"*AB*", 48, ModuleWidth::Wide, false);
        assert_eq!(
            cmd,
            vec![
                0x1D, 0x68, 48, // height
                0x1D, 0x77, 4, // width
                0x1D, 0x66, 0, // HRI font A
                0x1D, 0x48, 0, // HRI off
                0x1D, 0x6B, 4, b'*', b'A', b'B', b'*', 0x00,
            ]
        );
    }

    #[test]
    fn test_code39_charset() {
        for c in "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ -.$/+%".chars() {
            assert!(is_code39_char(c), "{:?}", c);
        }
        for c in ['a', '_', '#', '*', 'Ñ', '\u{1b}', '\0'] {
            assert!(!is_code39_char(c), "{:?}", c);
        }
    }

    #[test]
    fn test_code39_payload() {
        assert!(is_code39_payload("*123456*"));
        assert!(is_code39_payload("*A B*"));
        assert!(!is_code39_payload("**"));
        assert!(!is_code39_payload("*"));
        assert!(!is_code39_payload("123456"));
        assert!(!is_code39_payload("*abc_#*"));
        assert!(!is_code39_payload("*12*34*"));
    }

    #[test]
    fn test_hri_below() {
        assert_eq!(hri_position(true), vec![0x1D, 0x48, 2]);
    }
}
