//! Amplitude smoothing and mapping to animation speed and particle count.

use crate::params::{ParticleConfig, ReactiveMapping};

/// Per-frame animation parameters derived from the captured level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    /// Amplitude after noise gate and EMA
    pub smoothed_amplitude: f32,

    /// Accumulated animation time (advances only while there is sound)
    ///
    /// `f64` so the per-frame step is not lost once the clock is large.
    pub animation_time: f64,

    /// Particles to evaluate and draw this frame, within `[base, max]`
    pub active_count: usize,

    /// Brightness uniform for the line shader
    pub brightness: f32,
}

/// Follows the captured level across frames
///
/// Two single-pole low-pass filters: one on the amplitude itself, one on
/// the particle count so density changes fade in instead of popping.
#[derive(Debug, Clone)]
pub struct AmplitudeFollower {
    mapping: ReactiveMapping,
    base_count: usize,
    max_count: usize,
    smoothed_amp: f32,
    smoothed_count: f32,
    animation_time: f64,
}

impl AmplitudeFollower {
    /// Start silent, at the base particle count
    pub fn new(mapping: ReactiveMapping, particles: &ParticleConfig) -> Self {
        let base_count = particles.base_particles;
        Self {
            mapping,
            base_count,
            max_count: particles.max_particles.max(base_count),
            smoothed_amp: 0.0,
            smoothed_count: base_count as f32,
            animation_time: 0.0,
        }
    }

    /// Advance one frame
    ///
    /// # Arguments
    /// * `amplitude` - Latest block RMS from the capture stream
    /// * `dt_s` - Wall-clock time since the previous frame (seconds)
    pub fn update(&mut self, amplitude: f32, dt_s: f32) -> FrameParams {
        let m = &self.mapping;

        // Noise gate (NaN maps to 0 through f32::max)
        let raw = (amplitude - m.threshold).max(0.0);
        self.smoothed_amp = (1.0 - m.alpha) * self.smoothed_amp + m.alpha * raw;

        // Loudness drives speed: silence freezes the curves
        self.animation_time += f64::from(dt_s) * f64::from(self.smoothed_amp * m.speed_gain);

        let target = self.target_count();
        self.smoothed_count += (target - self.smoothed_count) * m.count_alpha;

        FrameParams {
            smoothed_amplitude: self.smoothed_amp,
            animation_time: self.animation_time,
            active_count: self.active_count(),
            brightness: m.brightness_floor + self.smoothed_amp * m.brightness_gain,
        }
    }

    /// Concave remap of the smoothed amplitude into [0, 1]
    pub fn scaled_amplitude(&self) -> f32 {
        (self.smoothed_amp * self.mapping.sensitivity)
            .min(1.0)
            .powf(self.mapping.curve_exponent)
    }

    /// Whole particle count the smoothed count is moving toward
    pub fn target_count(&self) -> f32 {
        let span = (self.max_count - self.base_count) as f32;
        (self.base_count as f32 + self.scaled_amplitude() * span).floor()
    }

    /// Current particle count, floored
    pub fn active_count(&self) -> usize {
        (self.smoothed_count.floor() as usize).clamp(self.base_count, self.max_count)
    }

    pub fn smoothed_amplitude(&self) -> f32 {
        self.smoothed_amp
    }

    pub fn smoothed_count(&self) -> f32 {
        self.smoothed_count
    }

    pub fn animation_time(&self) -> f64 {
        self.animation_time
    }
}
