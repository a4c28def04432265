//! Audio capture: device probing, the capture stream, and the shared level cell.
//!
//! The capture callback runs on the driver's thread and publishes one RMS
//! value per block into a [`SharedAmplitude`]; consumers poll it.

mod capture;
mod device;
mod level;

use thiserror::Error;

// Re-export public types
pub use capture::CaptureStream;
pub use device::{list_devices, probe_input_device, DeviceSummary, InputFormat, ProbedDevice};
pub use level::{rms, SharedAmplitude};

/// Guidance printed after any device or stream failure
pub const DEVICE_HINT: &str = "Please double-check the device index (run with --list-devices) \
and that your system sound output is routed to the loopback device (e.g. 'CABLE Input').";

/// Audio device and stream errors
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Failed to enumerate audio devices: {0}")]
    Enumerate(#[from] cpal::DevicesError),

    #[error("No audio device with index {index}")]
    DeviceNotFound { index: usize },

    #[error("Device {index} ('{name}') has no input capability: {source}")]
    NoInputCapability {
        index: usize,
        name: String,
        #[source]
        source: cpal::DefaultStreamConfigError,
    },

    #[error("Invalid capture config: {0}")]
    StreamConfig(String),

    #[error("Failed to build input stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("Failed to start input stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("Failed to stop input stream: {0}")]
    PauseStream(#[from] cpal::PauseStreamError),
}
