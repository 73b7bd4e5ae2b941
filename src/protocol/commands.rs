//! # NP-3511D Control Commands
//!
//! Device-level commands for the Nippon NP-3511D / NP-3511D-2 label printers:
//! initialization, paper feed, cutting and print-quality settings.
//!
//! ## Escape Sequence Structure
//!
//! Every command is a prefix byte (`ESC` or `GS`), a command letter and at
//! most two single-byte parameters. No command in this subset uses multi-byte
//! integers.
//!
//! ## Feed Resolution
//!
//! The head resolution is 203 DPI, so one dot is roughly 1/8 mm. All feed and
//! pitch parameters count in these 1/8 mm steps, and a single feed command
//! carries at most 255 steps (31.875 mm).

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - extended command prefix
pub const GS: u8 = 0x1D;

/// NUL - terminates CODE39 barcode data
pub const NUL: u8 = 0x00;

// ============================================================================
// FEED CONSTANTS
// ============================================================================

/// Feed steps per millimeter (1 step = 1/8 mm).
pub const STEPS_PER_MM: f64 = 8.0;

/// Maximum steps a single feed command can carry.
pub const MAX_FEED_STEPS: u8 = 255;

/// Maximum distance in mm a single feed command can carry (255 / 8).
pub const MAX_FEED_MM: f64 = MAX_FEED_STEPS as f64 / STEPS_PER_MM;

/// Lowest accepted print density (percent).
pub const DENSITY_MIN: u8 = 65;

/// Highest accepted print density (percent).
pub const DENSITY_MAX: u8 = 130;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// # Reset Printer (ESC @)
///
/// Clears the print buffer and restores power-on defaults. Every label job
/// starts with this command.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
///
/// ## Example
///
/// ```
/// use osilabel::protocol::commands;
///
/// assert_eq!(commands::reset(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn reset() -> Vec<u8> {
    vec![ESC, b'@']
}

// ============================================================================
// CUTTER CONTROL
// ============================================================================

/// # Full Cut (ESC i)
///
/// Cuts the paper at the cutter position without feeding first. The
/// composer is responsible for bringing the gap under the blade.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC i |
/// | Hex     | 1B 69 |
#[inline]
pub fn cut_full() -> Vec<u8> {
    vec![ESC, b'i']
}

// ============================================================================
// PAPER FEED
// ============================================================================

/// # Feed Forward (ESC J n)
///
/// Prints the line buffer and feeds the paper forward by `n` steps of 1/8 mm.
///
/// | Format  | Bytes   |
/// |---------|---------|
/// | ASCII   | ESC J n |
/// | Hex     | 1B 4A n |
///
/// ## Example
///
/// ```
/// use osilabel::protocol::commands;
///
/// // 6mm = 48 steps
/// assert_eq!(commands::feed_forward(48), vec![0x1B, 0x4A, 48]);
/// ```
#[inline]
pub fn feed_forward(steps: u8) -> Vec<u8> {
    vec![ESC, b'J', steps]
}

/// # Feed Backward (ESC B n)
///
/// Pulls the paper back by `n` steps of 1/8 mm. Used to bring the head from
/// the cut position back to the first printable line of the next label.
///
/// | Format  | Bytes   |
/// |---------|---------|
/// | ASCII   | ESC B n |
/// | Hex     | 1B 42 n |
#[inline]
pub fn feed_backward(steps: u8) -> Vec<u8> {
    vec![ESC, b'B', steps]
}

/// # Set Line Feed Pitch (ESC 3 n)
///
/// Sets the minimum paper advance after each printed line, in 1/8 mm steps.
/// A pitch of 0 disables the automatic advance. All vertical movement then
/// comes from printed content and explicit feed commands.
#[inline]
pub fn line_feed_pitch(steps: u8) -> Vec<u8> {
    vec![ESC, b'3', steps]
}

// ============================================================================
// PRINT QUALITY
// ============================================================================

/// Maximum print speed classes supported by the head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrintSpeed {
    Mm200 = 0,
    Mm150 = 1,
    Mm125 = 2,
    Mm100 = 3,
    /// Slowest class, also the fallback for unknown speeds.
    #[default]
    Mm75 = 4,
}

impl PrintSpeed {
    /// Map a speed in mm/s to its class. Speeds without an exact class fall
    /// back to the slowest one.
    pub fn from_mm_per_sec(speed: i32) -> Self {
        match speed {
            200 => Self::Mm200,
            150 => Self::Mm150,
            125 => Self::Mm125,
            100 => Self::Mm100,
            _ => Self::Mm75,
        }
    }

    /// Speed in mm/s.
    pub fn mm_per_sec(self) -> i32 {
        match self {
            Self::Mm200 => 200,
            Self::Mm150 => 150,
            Self::Mm125 => 125,
            Self::Mm100 => 100,
            Self::Mm75 => 75,
        }
    }
}

/// # Set Maximum Print Speed (GS S n)
///
/// | Format  | Bytes   |
/// |---------|---------|
/// | ASCII   | GS S n  |
/// | Hex     | 1D 53 n |
///
/// `n` is the speed class: 0 = 200, 1 = 150, 2 = 125, 3 = 100, 4 = 75 mm/s.
#[inline]
pub fn max_print_speed(speed: PrintSpeed) -> Vec<u8> {
    vec![GS, b'S', speed as u8]
}

/// Clamp a density percentage into the accepted range and truncate it.
pub fn clamp_density(percent: f32) -> u8 {
    if percent.is_nan() {
        return DENSITY_MIN;
    }
    percent.clamp(DENSITY_MIN as f32, DENSITY_MAX as f32) as u8
}

/// # Set Print Density (GS ~ n)
///
/// | Format  | Bytes   |
/// |---------|---------|
/// | ASCII   | GS ~ n  |
/// | Hex     | 1D 7E n |
///
/// `n` is the density in percent and is clamped to 65–130.
///
/// ```
/// use osilabel::protocol::commands;
///
/// assert_eq!(commands::print_density(200), vec![0x1D, 0x7E, 130]);
/// ```
#[inline]
pub fn print_density(percent: u8) -> Vec<u8> {
    vec![GS, b'~', percent.clamp(DENSITY_MIN, DENSITY_MAX)]
}

// ============================================================================
// TESTS
// ============================================================================
