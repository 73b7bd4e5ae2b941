//! # NP-3511D Protocol Implementation
//!
//! Low-level command builders for the ESC/POS-style protocol spoken by the
//! Nippon NP-3511D label printers. Only the subset needed for gap-aligned
//! label printing is implemented.
//!
//! ## Module Structure
//!
//! - [`commands`]: reset, cut, paper feed, speed and density
//! - [`text`]: alignment, character size, emphasis and margins
//! - [`barcode`]: CODE39 barcodes
//! - [`cp437`]: text encoding
//!
//! ## Usage Example
//!
//! ```
//! use osilabel::protocol::{barcode, commands, text};
//!
//! let mut data = Vec::new();
//! data.extend(commands::reset());
//! data.extend(commands::line_feed_pitch(0));
//! data.extend(text::character_size(text::CharacterSize::DoubleWidthHeight));
//! data.extend(b" OSI 123456");
//! data.extend(barcode::code39(b"*123456*", 48, barcode::ModuleWidth::Normal, false));
//! data.extend(commands::feed_forward(48));
//! data.extend(commands::cut_full());
//! ```

pub mod barcode;
pub mod commands;
pub mod cp437;
pub mod text;
