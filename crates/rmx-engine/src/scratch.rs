//! Per-channel staging buffers, one quantum each.

use rmx_core::{MAX_PLANES, QUANTUM_FRAMES};

/// A set of quantum-sized staging planes, one per active channel.
///
/// Built on the control path; the processing path only borrows it.
pub struct ScratchBank {
    planes: Vec<Box<[f32]>>,
}

impl ScratchBank {
    /// Allocate a bank for `channels` planes (clamped to `1..=MAX_PLANES`).
    pub fn new(channels: usize) -> Self {
        let channels = channels.clamp(1, MAX_PLANES);
        Self {
            planes: (0..channels)
                .map(|_| vec![0.0f32; QUANTUM_FRAMES].into_boxed_slice())
                .collect(),
        }
    }

    /// Number of staging planes.
    pub fn channels(&self) -> usize {
        self.planes.len()
    }

    pub fn plane(&self, ch: usize) -> &[f32] {
        &self.planes[ch]
    }

    pub fn plane_mut(&mut self, ch: usize) -> &mut [f32] {
        &mut self.planes[ch]
    }
}
