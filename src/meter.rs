//! Console volume meter for checking a capture setup.

use std::io::{self, Write};
use std::thread;

use crate::audio::SharedAmplitude;
use crate::params::MeterConfig;

/// Prompt shown halfway through the run
pub const MIDPOINT_PROMPT: &str = "(Now try pausing or stopping the music...)";

/// Format one meter reading: numeric level plus a fixed-width bar
pub fn format_meter_line(volume: f32, config: &MeterConfig) -> String {
    let bar_length = ((volume.max(0.0) * config.bar_scale) as usize).min(config.bar_width);
    let bar = "#".repeat(bar_length);
    format!(
        "Volume: {:6.4} |{:<width$}|",
        volume,
        bar,
        width = config.bar_width
    )
}

/// Print a reading every interval until the configured duration elapses
///
/// Readings overwrite each other in place (`\r`). Returns the loudest level seen.
pub fn run_meter<W: Write>(
    amplitude: &SharedAmplitude,
    config: &MeterConfig,
    out: &mut W,
) -> io::Result<f32> {
    let mut peak = 0.0f32;

    for tick in 0..config.total_ticks() {
        let volume = amplitude.load();
        peak = peak.max(volume);

        write!(out, "{}\r", format_meter_line(volume, config))?;

        if tick == config.midpoint_tick() {
            write!(out, "\n{}\n", MIDPOINT_PROMPT)?;
        }
        out.flush()?;

        thread::sleep(config.interval);
    }

    Ok(peak)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_silent_line_has_empty_bar() {
        let line = format_meter_line(0.0, &MeterConfig::default());
        assert_eq!(line, format!("Volume: 0.0000 |{}|", " ".repeat(50)));
    }

    #[test]
    fn test_bar_length_proportional_to_volume() {
        // 0.05 * 300 = 15 characters
        let line = format_meter_line(0.05, &MeterConfig::default());
        assert!(line.starts_with("Volume: 0.0500 |"));
        assert_eq!(line.matches('#').count(), 15);
    }

    #[test]
    fn test_bar_clamped_to_field_width() {
        let config = MeterConfig::default();
        let line = format_meter_line(0.9, &config);
        assert_eq!(line.matches('#').count(), config.bar_width);
        assert_eq!(line.len(), format_meter_line(0.0, &config).len());
    }

    #[test]
    fn test_run_meter_prints_prompt_once_and_reports_peak() {
        let config = MeterConfig {
            interval: Duration::from_millis(1),
            duration: Duration::from_millis(4),
            ..Default::default()
        };
        let amplitude = SharedAmplitude::new();
        amplitude.store(0.02);

        let mut out = Vec::new();
        let peak = run_meter(&amplitude, &config, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!((peak - 0.02).abs() < 1e-6);
        assert_eq!(text.matches(MIDPOINT_PROMPT).count(), 1);
        assert_eq!(text.matches("Volume:").count(), 4);
    }
}
