//! Continuous input stream publishing one RMS value per block.

use cpal::traits::{DeviceTrait, StreamTrait};
use cpal::{BufferSize, SupportedBufferSize};

use super::level::{rms, SharedAmplitude};
use super::{AudioError, ProbedDevice};
use crate::params::{audio_constants::LOW_LATENCY_FRAMES, CaptureConfig};

/// Input stream bound to one device, writing block loudness into a shared cell
pub struct CaptureStream {
    /// Driver stream (capture stops when dropped)
    stream: cpal::Stream,

    /// Level cell the callback writes to
    amplitude: SharedAmplitude,
}

impl CaptureStream {
    /// Build (but do not start) an `f32` input stream on a probed device
    pub fn open(
        probed: &ProbedDevice,
        config: &CaptureConfig,
        amplitude: SharedAmplitude,
    ) -> Result<Self, AudioError> {
        config.validate().map_err(AudioError::StreamConfig)?;

        let stream_config = cpal::StreamConfig {
            channels: config.channels,
            sample_rate: cpal::SampleRate(probed.sample_rate),
            buffer_size: buffer_size_for(config.low_latency, probed.default_config.buffer_size()),
        };

        log::info!(
            "Audio: {} @ {}Hz, {} ch, buffer {:?}",
            probed.name,
            probed.sample_rate,
            stream_config.channels,
            stream_config.buffer_size
        );

        let level = amplitude.clone();
        let stream = probed.device.build_input_stream(
            &stream_config,
            // Driver thread: no locks, no allocation, no I/O
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                level.store(rms(data));
            },
            |err| log::warn!("Audio stream error: {}", err),
            None,
        )?;

        Ok(Self { stream, amplitude })
    }

    /// Start delivering blocks
    pub fn start(&self) -> Result<(), AudioError> {
        self.stream.play()?;
        log::info!("Audio stream started");
        Ok(())
    }

    /// The cell this stream writes to
    pub fn amplitude(&self) -> &SharedAmplitude {
        &self.amplitude
    }

    /// Pause the stream and release the device
    pub fn stop(self) -> Result<(), AudioError> {
        self.stream.pause()?;
        drop(self.stream);
        log::info!("Audio stream stopped");
        Ok(())
    }
}

/// Pick the driver block size
///
/// Low latency asks for `LOW_LATENCY_FRAMES`, clamped into the range the device reports.
fn buffer_size_for(low_latency: bool, supported: &SupportedBufferSize) -> BufferSize {
    if !low_latency {
        return BufferSize::Default;
    }

    match *supported {
        SupportedBufferSize::Range { min, max } if min <= max => {
            BufferSize::Fixed(LOW_LATENCY_FRAMES.max(min).min(max))
        }
        _ => BufferSize::Default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_latency_uses_driver_default() {
        let supported = SupportedBufferSize::Range { min: 64, max: 4096 };
        assert_eq!(buffer_size_for(false, &supported), BufferSize::Default);
    }

    #[test]
    fn test_low_latency_picks_preferred_size() {
        let supported = SupportedBufferSize::Range { min: 64, max: 4096 };
        assert_eq!(
            buffer_size_for(true, &supported),
            BufferSize::Fixed(LOW_LATENCY_FRAMES)
        );
    }

    #[test]
    fn test_low_latency_clamped_to_device_range() {
        let supported = SupportedBufferSize::Range { min: 512, max: 4096 };
        assert_eq!(buffer_size_for(true, &supported), BufferSize::Fixed(512));

        let supported = SupportedBufferSize::Range { min: 16, max: 128 };
        assert_eq!(buffer_size_for(true, &supported), BufferSize::Fixed(128));
    }

    #[test]
    fn test_low_latency_unknown_range_falls_back() {
        assert_eq!(
            buffer_size_for(true, &SupportedBufferSize::Unknown),
            BufferSize::Default
        );
    }
}
