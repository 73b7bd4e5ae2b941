//! # osilabel - Gap-Aligned Label Printing
//!
//! osilabel drives Nippon NP-3511D thermal label printers over their
//! ESC/POS-style command set. It prints a closed set of label templates
//! (identifier lines, CODE39 barcodes, free text) on die-cut stock, and keeps
//! track of the print head so every label is cut on the midpoint of the gap.
//!
//! - **Protocol implementation**: NP-3511D command builders
//! - **Encoder**: directives to an inspectable op list and device bytes
//! - **Label composition**: templates, spacing, head tracking, cut alignment
//! - **Transport**: raw device writes, or in memory
//! - **Preview**: PNG rendering of a label on its stock
//!
//! ## Quick Start
//!
//! ```no_run
//! use osilabel::{
//!     label::{GapSize, LabelComposer, LabelGeometry, LabelHeight, LabelVariant},
//!     printer::PrinterConfig,
//!     transport::DeviceTransport,
//! };
//!
//! let config = PrinterConfig::NP3511D;
//! let geometry = LabelGeometry::new(LabelHeight::Mm50, GapSize::Mm5, &config);
//! let mut composer = LabelComposer::new(config, geometry);
//!
//! let mut printer = DeviceTransport::open("/dev/usb/lp0")?;
//! let job = LabelVariant::EquipmentIntake { identifier: "123456".into() };
//! composer.print(&job, &mut printer)?;
//!
//! # Ok::<(), osilabel::error::LabelError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | NP-3511D command builders |
//! | [`ir`] | Op list and codegen |
//! | [`encoder`] | Command encoder and buffers |
//! | [`label`] | Templates, planner, tracker, composer |
//! | [`transport`] | Print sinks |
//! | [`preview`] | PNG preview |
//! | [`printer`] | Printer configuration and session settings |
//! | [`error`] | Error types |
//!
//! ## Supported Printers
//!
//! - Nippon NP-3511D / NP-3511D-2 (8 dots/mm, full cutter)

pub mod encoder;
pub mod error;
pub mod ir;
pub mod label;
pub mod logging;
pub mod preview;
pub mod printer;
pub mod protocol;
pub mod transport;

// Re-exports for convenience
pub use encoder::{CommandBuffer, CommandEncoder};
pub use error::LabelError;
pub use printer::PrinterConfig;
pub use transport::{DeviceTransport, PrintSink};
