//! Audiotest - check that a loopback device delivers audio
//!
//! Prints a live volume bar for a fixed time. Route system output to the
//! loopback device (e.g. VB-Cable 'CABLE Input') and pass the index of its
//! capture side ('CABLE Output') with --device.

use std::io;

use anyhow::Context;
use clap::Parser;

use lissajous_scope::audio::{
    list_devices, probe_input_device, AudioError, CaptureStream, SharedAmplitude, DEVICE_HINT,
};
use lissajous_scope::cli::MeterArgs;
use lissajous_scope::meter::run_meter;
use lissajous_scope::params::CaptureConfig;

fn run_test(args: &MeterArgs) -> anyhow::Result<()> {
    let host = cpal::default_host();

    if args.list_devices {
        println!("Audio devices ({}):", host.id().name());
        for device in list_devices(&host)? {
            println!("{}", device);
        }
        return Ok(());
    }

    let meter_config = args.meter_config().map_err(anyhow::Error::msg)?;

    let probed = probe_input_device(&host, args.device)
        .with_context(|| format!("Error querying device {}", args.device))?;
    println!(
        "Attempting to open device '{}' (ID: {}) at {} Hz",
        probed.name, probed.index, probed.sample_rate
    );

    let capture_config = CaptureConfig {
        device_index: args.device,
        ..Default::default()
    };
    let stream = CaptureStream::open(&probed, &capture_config, SharedAmplitude::new())?;
    stream.start()?;

    println!("Stream started. Now printing volume levels...");
    println!("Please play some music on your computer now.");
    println!("{}", "-".repeat(30));

    let peak = run_meter(stream.amplitude(), &meter_config, &mut io::stdout().lock())?;

    println!("\n{}", "-".repeat(30));
    println!("Test finished. Peak volume: {:.4}", peak);
    stream.stop()?;

    Ok(())
}

/// Setup hint for failures that came from the audio layer
fn hint_for(e: &anyhow::Error) -> Option<&'static str> {
    e.downcast_ref::<AudioError>().map(|_| DEVICE_HINT)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = MeterArgs::parse();

    // Diagnostic: report and return normally, never crash
    if let Err(e) = run_test(&args) {
        println!("\nAn error occurred: {:#}", e);
        if let Some(hint) = hint_for(&e) {
            println!("{}", hint);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_shown_for_audio_errors() {
        let err = Err::<(), _>(AudioError::DeviceNotFound { index: 99 })
            .context("Error querying device 99")
            .unwrap_err();
        assert_eq!(hint_for(&err), Some(DEVICE_HINT));
    }

    #[test]
    fn test_no_hint_for_other_errors() {
        let err = anyhow::Error::new(io::Error::new(io::ErrorKind::BrokenPipe, "stdout closed"));
        assert_eq!(hint_for(&err), None);

        let err = anyhow::Error::msg("interval must be > 0");
        assert_eq!(hint_for(&err), None);
    }
}
