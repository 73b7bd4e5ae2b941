//! # Printer Module
//!
//! Printer hardware profiles and per-job settings.
//!
//! ## Modules
//!
//! - [`config`]: Printer hardware constants
//! - [`session`]: Settings emitted at the start of each job

pub mod config;
pub mod session;

pub use config::PrinterConfig;
pub use session::PrinterSession;
