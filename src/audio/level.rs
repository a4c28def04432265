//! Block loudness and the single-slot cell that carries it across threads.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Root-mean-square of an interleaved block (all channels together)
///
/// Returns 0.0 for an empty block.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }

    let sum_sq: f32 = samples.iter().map(|&s| s * s).sum();
    (sum_sq / samples.len() as f32).sqrt()
}

/// Latest block amplitude, written by the capture callback and read by the consumer
///
/// Stored as `f32` bits in an `AtomicU32`, so reads are never torn.
/// `Relaxed` ordering: nothing else is published through this value,
/// and a reader seeing the previous block's level is harmless.
#[derive(Debug, Clone, Default)]
pub struct SharedAmplitude {
    bits: Arc<AtomicU32>,
}

impl SharedAmplitude {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the current level (negative and NaN inputs store 0.0)
    pub fn store(&self, amplitude: f32) {
        let amplitude = if amplitude > 0.0 { amplitude } else { 0.0 };
        self.bits.store(amplitude.to_bits(), Ordering::Relaxed);
    }

    /// Read the most recently stored level
    pub fn load(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Relaxed))
    }
}
