//! Audio-reactive Lissajous particles.
//!
//! [`AmplitudeFollower`] turns raw block levels into animation time and a
//! particle count; [`ParticleField`] evaluates the curves and emits line segments.

mod follower;
mod particles;

// Re-export public types
pub use follower::{AmplitudeFollower, FrameParams};
pub use particles::{LineVertex, Particle, ParticleField};
