//! Per-candidate accumulation of segment audio.

use longform_domain::{AudioBuffer, GenerationError};

/// One ordered buffer sequence per candidate slot.
///
/// Segment `n` of every slot is appended before segment `n + 1`; the slots
/// are joined at the end of a multi-segment run.
#[derive(Debug, Clone, Default)]
pub struct CandidateSlots {
    slots: Vec<Vec<AudioBuffer>>,
}

impl CandidateSlots {
    /// Create `count` empty slots.
    pub fn new(count: usize) -> Self {
        Self {
            slots: vec![Vec::new(); count],
        }
    }

    /// Append one segment's buffer to the end of `slot`.
    pub fn append(&mut self, slot: usize, buffer: AudioBuffer) -> Result<(), GenerationError> {
        let count = self.slots.len();
        self.slots
            .get_mut(slot)
            .ok_or_else(|| out_of_range(slot, count))?
            .push(buffer);
        Ok(())
    }

    /// Buffers held by `slot`, zero for an unknown slot.
    pub fn len(&self, slot: usize) -> usize {
        self.slots.get(slot).map_or(0, Vec::len)
    }

    /// Segments accumulated so far: the longest slot's buffer count.
    pub fn segments(&self) -> usize {
        self.slots.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Join every buffer of `slot` in append order.
    pub fn concatenate(&self, slot: usize) -> Result<AudioBuffer, GenerationError> {
        let buffers = self
            .slots
            .get(slot)
            .ok_or_else(|| out_of_range(slot, self.slots.len()))?;
        if buffers.is_empty() {
            return Err(GenerationError::invalid_state(format!(
                "slot {slot} has no audio to concatenate"
            )));
        }
        AudioBuffer::concat(buffers)
    }
}

fn out_of_range(slot: usize, count: usize) -> GenerationError {
    GenerationError::invalid_state(format!("slot {slot} out of range for {count} slots"))
}
