//! Amplitude-to-animation mapping and particle pool parameters.

use std::f32::consts::TAU;
use std::ops::Range;

/// Mapping from captured RMS amplitude to animation parameters
#[derive(Debug, Clone)]
pub struct ReactiveMapping {
    /// Noise floor subtracted from the raw amplitude before smoothing
    pub threshold: f32,

    /// Amplitude EMA coefficient per frame (0 < alpha <= 1)
    /// Formula: smoothed = (1 - alpha) * smoothed + alpha * raw
    pub alpha: f32,

    /// Animation seconds advanced per wall-clock second per unit of smoothed amplitude
    /// Formula: time += dt * smoothed * speed_gain
    pub speed_gain: f32,

    /// Multiplier applied before the sensitivity curve (saturates at 1.0)
    pub sensitivity: f32,

    /// Exponent of the concave remap; lower = more sensitive to quiet input
    /// Formula: scaled = min(1, smoothed * sensitivity) ^ curve_exponent
    pub curve_exponent: f32,

    /// Particle-count EMA coefficient per frame (0 < count_alpha <= 1)
    pub count_alpha: f32,

    /// Brightness uniform at silence
    pub brightness_floor: f32,

    /// Brightness added per unit of smoothed amplitude
    pub brightness_gain: f32,
}

impl Default for ReactiveMapping {
    fn default() -> Self {
        Self {
            threshold: 0.005,
            alpha: 0.1,
            speed_gain: 300.0,
            sensitivity: 10.0,
            curve_exponent: 0.3,
            count_alpha: 0.05,
            brightness_floor: 0.05,
            brightness_gain: 0.5,
        }
    }
}

impl ReactiveMapping {
    /// Validate configuration (smoothing coefficients must be in (0, 1])
    pub fn validate(&self) -> Result<(), String> {
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(format!("alpha must be in (0, 1], got {}", self.alpha));
        }
        if !(self.count_alpha > 0.0 && self.count_alpha <= 1.0) {
            return Err(format!(
                "count_alpha must be in (0, 1], got {}",
                self.count_alpha
            ));
        }
        if self.threshold < 0.0 {
            return Err("threshold must be >= 0".to_string());
        }
        if self.curve_exponent <= 0.0 {
            return Err("curve_exponent must be > 0".to_string());
        }
        Ok(())
    }
}

/// Largest accepted pool (400k vertices, ~4.8 MB of line data per frame)
pub const MAX_POOL_SIZE: usize = 200_000;

/// Particle pool size and curve parameter ranges
#[derive(Debug, Clone)]
pub struct ParticleConfig {
    /// Pool size (upper bound on drawn particles)
    pub max_particles: usize,

    /// Particles drawn at silence (lower bound)
    pub base_particles: usize,

    /// Range for the x and y frequency multipliers `a`, `b`
    pub frequency_range: Range<f32>,

    /// Range for the x phase offset `delta` (radians)
    pub phase_range: Range<f32>,

    /// Range for the per-particle time offset (seconds of animation time)
    pub time_offset_range: Range<f32>,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            max_particles: 200,
            base_particles: 50,
            frequency_range: 1.0..5.0,
            phase_range: 0.0..TAU,
            time_offset_range: 0.0..TAU,
        }
    }
}

impl ParticleConfig {
    /// Vertices needed to draw every particle in the pool
    pub fn max_vertices(&self) -> usize {
        self.max_particles * 2
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.base_particles == 0 {
            return Err("base particle count must be >= 1".to_string());
        }
        if self.max_particles > MAX_POOL_SIZE {
            return Err(format!(
                "pool size {} exceeds the limit of {}",
                self.max_particles, MAX_POOL_SIZE
            ));
        }
        if self.base_particles > self.max_particles {
            return Err(format!(
                "base particle count ({}) exceeds pool size ({})",
                self.base_particles, self.max_particles
            ));
        }
        for (name, range) in [
            ("frequency", &self.frequency_range),
            ("phase", &self.phase_range),
            ("time offset", &self.time_offset_range),
        ] {
            if range.is_empty() {
                return Err(format!("{} range {:?} is empty", name, range));
            }
        }
        Ok(())
    }
}
