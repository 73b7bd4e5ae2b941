//! In-memory sink that keeps every buffer it receives. Used for dry runs
//! and tests.

use crate::encoder::CommandBuffer;
use crate::error::LabelError;

use super::PrintSink;

#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    buffers: Vec<CommandBuffer>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffers in the order they were sent.
    pub fn buffers(&self) -> &[CommandBuffer] {
        &self.buffers
    }

    /// All bytes sent, concatenated.
    pub fn bytes(&self) -> Vec<u8> {
        self.buffers
            .iter()
            .flat_map(|b| b.as_bytes().iter().copied())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}

impl PrintSink for MemorySink {
    fn send(&mut self, buffer: &CommandBuffer) -> Result<(), LabelError> {
        self.buffers.push(buffer.clone());
        Ok(())
    }
}
