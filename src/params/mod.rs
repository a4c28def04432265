//! Parameter definitions with units and documented semantics.
//!
//! All tuning constants live here with:
//! - Units (seconds, Hz, frames, pixels)
//! - Documented ranges and meanings
//! - `validate()` where a bad value would break an invariant

mod audio;
mod meter;
mod render;
mod visual;

// Re-export all types
pub use audio::{audio_constants, CaptureConfig};
pub use meter::MeterConfig;
pub use render::RenderConfig;
pub use visual::{ParticleConfig, ReactiveMapping, MAX_POOL_SIZE};
