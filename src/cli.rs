//! Command-line argument parsing.

use std::time::Duration;

use clap::Parser;

use crate::params::{audio_constants::DEFAULT_DEVICE_INDEX, MeterConfig, ParticleConfig};

/// Arguments for the audio-reactive window
#[derive(Parser, Debug)]
#[command(name = "lissajous")]
#[command(about = "Audio-reactive Lissajous line renderer", long_about = None)]
pub struct VisualArgs {
    /// Input device index (see --list-devices)
    #[arg(long, value_name = "INDEX", default_value_t = DEFAULT_DEVICE_INDEX)]
    pub device: usize,

    /// Print the available audio devices and exit
    #[arg(long)]
    pub list_devices: bool,

    /// Particle pool size (maximum lines drawn when loud)
    #[arg(long, value_name = "COUNT", default_value_t = 200)]
    pub particles: usize,

    /// Lines drawn at silence
    #[arg(long, value_name = "COUNT", default_value_t = 50)]
    pub base_particles: usize,
}

impl VisualArgs {
    /// Particle configuration from command-line arguments
    pub fn particle_config(&self) -> Result<ParticleConfig, String> {
        let config = ParticleConfig {
            max_particles: self.particles,
            base_particles: self.base_particles,
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }
}

/// Arguments for the capture diagnostic
#[derive(Parser, Debug)]
#[command(name = "audiotest")]
#[command(about = "Check that a loopback device delivers audio", long_about = None)]
pub struct MeterArgs {
    /// Input device index (see --list-devices)
    #[arg(long, value_name = "INDEX", default_value_t = DEFAULT_DEVICE_INDEX)]
    pub device: usize,

    /// Print the available audio devices and exit
    #[arg(long)]
    pub list_devices: bool,

    /// How long to print readings
    #[arg(long, value_name = "SECONDS", default_value_t = 20)]
    pub seconds: u64,

    /// Time between readings
    #[arg(long, value_name = "MS", default_value_t = 100)]
    pub interval_ms: u64,
}

impl MeterArgs {
    /// Meter configuration from command-line arguments
    pub fn meter_config(&self) -> Result<MeterConfig, String> {
        let config = MeterConfig {
            interval: Duration::from_millis(self.interval_ms),
            duration: Duration::from_secs(self.seconds),
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visual_defaults() {
        let args = VisualArgs::parse_from(["lissajous"]);
        assert_eq!(args.device, 18);
        assert!(!args.list_devices);

        let config = args.particle_config().unwrap();
        assert_eq!(config.max_particles, 200);
        assert_eq!(config.base_particles, 50);
    }

    #[test]
    fn test_visual_overrides() {
        let args = VisualArgs::parse_from([
            "lissajous",
            "--device",
            "4",
            "--particles",
            "400",
            "--base-particles",
            "10",
        ]);
        assert_eq!(args.device, 4);

        let config = args.particle_config().unwrap();
        assert_eq!(config.max_particles, 400);
        assert_eq!(config.base_particles, 10);
    }

    #[test]
    fn test_visual_rejects_base_above_pool() {
        let args = VisualArgs::parse_from([
            "lissajous",
            "--particles",
            "20",
            "--base-particles",
            "30",
        ]);
        assert!(args.particle_config().is_err());
    }

    #[test]
    fn test_visual_rejects_oversized_pool() {
        let args = VisualArgs::parse_from(["lissajous", "--particles", "20000000"]);
        assert!(args.particle_config().is_err());
    }

    #[test]
    fn test_meter_defaults() {
        let args = MeterArgs::parse_from(["audiotest"]);
        let config = args.meter_config().unwrap();

        assert_eq!(config.interval, Duration::from_millis(100));
        assert_eq!(config.duration, Duration::from_secs(20));
    }

    #[test]
    fn test_meter_list_devices_flag() {
        let args = MeterArgs::parse_from(["audiotest", "--list-devices"]);
        assert!(args.list_devices);
    }

    #[test]
    fn test_meter_rejects_zero_interval() {
        let args = MeterArgs::parse_from(["audiotest", "--interval-ms", "0"]);
        assert!(args.meter_config().is_err());
    }
}
