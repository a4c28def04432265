//! Capture stream configuration and constants.

/// Capture stream configuration
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Index into the host's device enumeration
    pub device_index: usize,

    /// Interleaved channel count requested from the driver
    pub channels: u16,

    /// Request the smallest block size the driver allows (visual variant)
    pub low_latency: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            device_index: audio_constants::DEFAULT_DEVICE_INDEX,
            channels: audio_constants::CHANNELS,
            low_latency: false,
        }
    }
}

impl CaptureConfig {
    /// Configuration for the render loop (low-latency blocks)
    pub fn low_latency(device_index: usize) -> Self {
        Self {
            device_index,
            low_latency: true,
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.channels == 0 {
            return Err("Channel count must be > 0".to_string());
        }
        Ok(())
    }
}

/// Audio constants (compile-time)
pub mod audio_constants {
    /// Loopback device index ("CABLE Output" on a typical VB-Cable setup)
    pub const DEFAULT_DEVICE_INDEX: usize = 18;

    /// Stereo capture
    pub const CHANNELS: u16 = 2;

    /// Preferred block size when low latency is requested
    /// (256 frames = 5.3ms @ 48kHz)
    pub const LOW_LATENCY_FRAMES: u32 = 256;
}
