//! # Code Page 437 Text Encoding
//!
//! The NP-3511D powers up with code page 437 selected, so label text is sent
//! as CP437 bytes. ASCII passes through unchanged. The upper half covers the
//! Spanish accented letters, `ñ`, `¿` and `¡` that operators type into free
//! text lines. Anything else becomes `?`.

/// CP437 bytes 0x80–0xFF, indexed by `byte - 0x80`.
const UPPER_HALF: [char; 128] = [
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å', //
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ', //
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»', //
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐', //
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧', //
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀', //
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩', //
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{00A0}',
];

/// Byte substituted for characters CP437 cannot represent.
pub const REPLACEMENT: u8 = b'?';

/// Encode a string as CP437 bytes.
///
/// ```
/// use osilabel::protocol::cp437;
///
/// assert_eq!(cp437::encode("Año"), vec![b'A', 0xA4, b'o']);
/// ```
pub fn encode(s: &str) -> Vec<u8> {
    s.chars()
        .map(|ch| {
            encode_char(ch).unwrap_or_else(|| {
                tracing::warn!(
                    character = %ch,
                    code_point = format_args!("U+{:04X}", ch as u32),
                    "no CP437 mapping, printing '?'"
                );
                REPLACEMENT
            })
        })
        .collect()
}

/// Map a single character to its CP437 byte.
pub fn encode_char(ch: char) -> Option<u8> {
    if ch.is_ascii() {
        return Some(ch as u8);
    }
    UPPER_HALF
        .iter()
        .position(|&c| c == ch)
        .map(|idx| 0x80 + idx as u8)
}

/// Map a CP437 byte back to its character.
pub fn decode_byte(byte: u8) -> char {
    if byte < 0x80 {
        byte as char
    } else {
        UPPER_HALF[(byte - 0x80) as usize]
    }
}
