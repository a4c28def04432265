//! Text volume meter configuration.

use std::time::Duration;

/// Console volume meter settings
#[derive(Debug, Clone)]
pub struct MeterConfig {
    /// Time between two printed readings
    pub interval: Duration,

    /// Total run time of the diagnostic
    pub duration: Duration,

    /// Bar characters per unit of RMS amplitude
    /// 300 => a full-scale bar at RMS ~0.17, typical for music on loopback
    pub bar_scale: f32,

    /// Fixed width of the bar field (characters)
    pub bar_width: usize,
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(100),
            duration: Duration::from_secs(20),
            bar_scale: 300.0,
            bar_width: 50,
        }
    }
}

impl MeterConfig {
    /// Number of readings printed over the whole run
    pub fn total_ticks(&self) -> usize {
        let interval_ms = self.interval.as_millis().max(1);
        (self.duration.as_millis() / interval_ms) as usize
    }

    /// Tick at which the user is asked to pause playback
    pub fn midpoint_tick(&self) -> usize {
        self.total_ticks() / 2
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.interval.is_zero() {
            return Err("Meter interval must be > 0".to_string());
        }
        if self.total_ticks() == 0 {
            return Err(format!(
                "Duration {:?} is shorter than one interval ({:?})",
                self.duration, self.interval
            ));
        }
        if self.bar_scale < 0.0 {
            return Err("Bar scale must be >= 0".to_string());
        }
        Ok(())
    }
}
