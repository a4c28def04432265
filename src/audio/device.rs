//! Input device lookup by enumeration index.

use std::fmt;

use cpal::traits::{DeviceTrait, HostTrait};

use super::AudioError;

/// An input-capable device resolved from its index
pub struct ProbedDevice {
    /// Position in the host's device enumeration
    pub index: usize,

    /// Human-readable device name
    pub name: String,

    /// Default input sample rate (Hz)
    pub sample_rate: u32,

    pub(crate) device: cpal::Device,
    pub(crate) default_config: cpal::SupportedStreamConfig,
}

/// Resolve `index` to an input device and read its default format
///
/// Indices follow `host.devices()` order, the same order [`list_devices`] prints.
pub fn probe_input_device(host: &cpal::Host, index: usize) -> Result<ProbedDevice, AudioError> {
    let device = host
        .devices()?
        .nth(index)
        .ok_or(AudioError::DeviceNotFound { index })?;

    let name = device.name().unwrap_or_else(|_| "Unknown".to_string());

    let default_config = device
        .default_input_config()
        .map_err(|source| AudioError::NoInputCapability {
            index,
            name: name.clone(),
            source,
        })?;

    log::debug!("Probed device {} '{}': {:?}", index, name, default_config);

    Ok(ProbedDevice {
        index,
        name,
        sample_rate: default_config.sample_rate().0,
        device,
        default_config,
    })
}

/// Default input format of a listed device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputFormat {
    pub channels: u16,
    pub sample_rate: u32,
}

/// One row of the device listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSummary {
    pub index: usize,
    pub name: String,
    /// `None` for output-only devices
    pub input: Option<InputFormat>,
}

impl fmt::Display for DeviceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.input {
            Some(input) => write!(
                f,
                "{:>3}  {}  ({} ch @ {} Hz)",
                self.index, self.name, input.channels, input.sample_rate
            ),
            None => write!(f, "{:>3}  {}  (no input)", self.index, self.name),
        }
    }
}

/// List every device the host exposes, input-capable or not
pub fn list_devices(host: &cpal::Host) -> Result<Vec<DeviceSummary>, AudioError> {
    let summaries = host
        .devices()?
        .enumerate()
        .map(|(index, device)| {
            let name = device.name().unwrap_or_else(|_| "Unknown".to_string());
            let input = device.default_input_config().ok().map(|config| InputFormat {
                channels: config.channels(),
                sample_rate: config.sample_rate().0,
            });
            DeviceSummary { index, name, input }
        })
        .collect();

    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_display_with_input() {
        let summary = DeviceSummary {
            index: 18,
            name: "CABLE Output".to_string(),
            input: Some(InputFormat {
                channels: 2,
                sample_rate: 48000,
            }),
        };

        assert_eq!(summary.to_string(), " 18  CABLE Output  (2 ch @ 48000 Hz)");
    }

    #[test]
    fn test_summary_display_output_only() {
        let summary = DeviceSummary {
            index: 3,
            name: "Speakers".to_string(),
            input: None,
        };

        assert_eq!(summary.to_string(), "  3  Speakers  (no input)");
    }
}
