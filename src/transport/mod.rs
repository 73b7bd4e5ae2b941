//! # Printer Transport Layer
//!
//! Where finished command buffers go.
//!
//! ## Available Transports
//!
//! - [`device`]: raw writes to a printer device node (Linux)
//! - [`memory`]: keeps buffers in memory, for dry runs and tests

pub mod device;
pub mod memory;

pub use device::DeviceTransport;
pub use memory::MemorySink;

use crate::encoder::CommandBuffer;
use crate::error::LabelError;

/// Destination for finished jobs.
///
/// A sink receives one buffer per job and transmits it verbatim. Failures
/// are returned to the caller as-is; sinks do not retry.
pub trait PrintSink {
    fn send(&mut self, buffer: &CommandBuffer) -> Result<(), LabelError>;
}

impl<S: PrintSink + ?Sized> PrintSink for &mut S {
    fn send(&mut self, buffer: &CommandBuffer) -> Result<(), LabelError> {
        (**self).send(buffer)
    }
}
