//! Lissajous particle pool and line-segment emission.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use rand::Rng;

use crate::params::ParticleConfig;

/// Vertex data for line segments (normalized position + particle id)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    /// Position in [0, 1]^2, origin bottom-left
    pub position: [f32; 2],
    /// Particle index divided by pool size, used for colour blending
    pub particle_id: f32,
}

/// Curve parameters for one particle, fixed at creation
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    /// x frequency multiplier
    pub a: f32,
    /// y frequency multiplier
    pub b: f32,
    /// x phase offset (radians)
    pub delta: f32,
    /// Per-particle offset added to animation time
    pub t_offset: f32,
}

impl Particle {
    /// Draw random parameters from the configured ranges
    pub fn random<R: Rng + ?Sized>(config: &ParticleConfig, rng: &mut R) -> Self {
        Self {
            a: rng.gen_range(config.frequency_range.clone()),
            b: rng.gen_range(config.frequency_range.clone()),
            delta: rng.gen_range(config.phase_range.clone()),
            t_offset: rng.gen_range(config.time_offset_range.clone()),
        }
    }

    /// Point on the curve at `animation_time`, in [0, 1]^2
    ///
    /// Evaluated in `f64`: the clock grows without bound and an `f32`
    /// phase would jitter long before it overflows.
    pub fn position(&self, animation_time: f64) -> Vec2 {
        let t = f64::from(self.t_offset) + animation_time;
        let x = 0.5 + 0.5 * (f64::from(self.a) * t + f64::from(self.delta)).sin();
        let y = 0.5 + 0.5 * (f64::from(self.b) * t).sin();
        Vec2::new(x as f32, y as f32)
    }
}

/// Fixed particle pool plus the last drawn position of each particle
pub struct ParticleField {
    particles: Vec<Particle>,
    previous: Vec<Vec2>,
}

impl ParticleField {
    /// Create a pool of `config.max_particles` random particles
    pub fn new<R: Rng + ?Sized>(config: &ParticleConfig, rng: &mut R) -> Self {
        let particles = (0..config.max_particles)
            .map(|_| Particle::random(config, rng))
            .collect();
        Self::from_particles(particles)
    }

    /// Wrap an explicit pool; previous positions start on each curve at time 0
    pub fn from_particles(particles: Vec<Particle>) -> Self {
        let previous = particles.iter().map(|p| p.position(0.0)).collect();
        Self {
            particles,
            previous,
        }
    }

    /// Pool size
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Advance the first `active_count` particles and emit one segment each
    ///
    /// `out` is cleared and refilled with `2 * active_count` vertices:
    /// previous position then current position, both tagged with `i / pool_size`.
    /// The same leading subset is used every frame so particles keep their
    /// trails as the count changes.
    pub fn write_segments(
        &mut self,
        active_count: usize,
        animation_time: f64,
        out: &mut Vec<LineVertex>,
    ) {
        out.clear();

        let active = active_count.min(self.particles.len());
        let pool_size = self.particles.len() as f32;

        for (i, (particle, previous)) in self
            .particles
            .iter()
            .zip(self.previous.iter_mut())
            .take(active)
            .enumerate()
        {
            let current = particle.position(animation_time);
            let particle_id = i as f32 / pool_size;

            out.push(LineVertex {
                position: previous.to_array(),
                particle_id,
            });
            out.push(LineVertex {
                position: current.to_array(),
                particle_id,
            });

            *previous = current;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f32::consts::TAU;

    fn seeded_field() -> ParticleField {
        let mut rng = StdRng::seed_from_u64(42);
        ParticleField::new(&ParticleConfig::default(), &mut rng)
    }

    #[test]
    fn test_random_parameters_within_ranges() {
        let field = seeded_field();
        assert_eq!(field.len(), 200);

        for p in field.particles() {
            assert!((1.0..5.0).contains(&p.a));
            assert!((1.0..5.0).contains(&p.b));
            assert!((0.0..TAU).contains(&p.delta));
            assert!((0.0..TAU).contains(&p.t_offset));
        }
    }

    #[test]
    fn test_position_matches_curve() {
        let p = Particle {
            a: 3.0,
            b: 2.0,
            delta: 0.5,
            t_offset: 0.25,
        };
        let pos = p.position(1.0);

        let t = 1.25f32;
        assert!((pos.x - (0.5 + 0.5 * (3.0 * t + 0.5).sin())).abs() < 1e-6);
        assert!((pos.y - (0.5 + 0.5 * (2.0 * t).sin())).abs() < 1e-6);
    }

    #[test]
    fn test_curve_keeps_moving_at_large_clock_values() {
        let p = Particle {
            a: 3.0,
            b: 2.0,
            delta: 0.5,
            t_offset: 0.25,
        };

        // One loud frame (0.975 units) after hours of playback
        let start = 2e7f64;
        let before = p.position(start);
        let after = p.position(start + 0.975);
        assert_ne!(before, after);

        let t = start + 0.975 + 0.25;
        assert!((after.x as f64 - (0.5 + 0.5 * (3.0 * t + 0.5).sin())).abs() < 1e-6);
        assert!((after.y as f64 - (0.5 + 0.5 * (2.0 * t).sin())).abs() < 1e-6);
    }

    #[test]
    fn test_positions_stay_in_unit_square() {
        let field = seeded_field();
        for p in field.particles() {
            for step in 0..100 {
                let pos = p.position(step as f64 * 0.37);
                assert!((0.0..=1.0).contains(&pos.x));
                assert!((0.0..=1.0).contains(&pos.y));
            }
        }
    }

    #[test]
    fn test_two_vertices_per_active_particle() {
        let mut field = seeded_field();
        let mut vertices = Vec::new();

        field.write_segments(50, 0.0, &mut vertices);
        assert_eq!(vertices.len(), 100);

        field.write_segments(137, 0.1, &mut vertices);
        assert_eq!(vertices.len(), 274);
    }

    #[test]
    fn test_active_count_capped_at_pool_size() {
        let mut field = seeded_field();
        let mut vertices = Vec::new();

        field.write_segments(500, 0.0, &mut vertices);
        assert_eq!(vertices.len(), 400);
    }

    #[test]
    fn test_particle_ids_normalized_by_pool_size() {
        let mut field = seeded_field();
        let mut vertices = Vec::new();
        field.write_segments(200, 0.0, &mut vertices);

        for (i, pair) in vertices.chunks(2).enumerate() {
            let expected = i as f32 / 200.0;
            assert_eq!(pair[0].particle_id, expected);
            assert_eq!(pair[1].particle_id, expected);
        }
        assert_eq!(vertices[0].particle_id, 0.0);
        assert!(vertices[399].particle_id < 1.0);
    }

    #[test]
    fn test_segments_continue_from_previous_frame() {
        let mut field = seeded_field();
        let mut first = Vec::new();
        let mut second = Vec::new();

        field.write_segments(60, 0.5, &mut first);
        field.write_segments(60, 0.9, &mut second);

        for (a, b) in first.chunks(2).zip(second.chunks(2)) {
            assert_eq!(b[0].position, a[1].position);
        }
    }

    #[test]
    fn test_frozen_time_repeats_positions() {
        let mut field = seeded_field();
        let mut vertices = Vec::new();

        // Starting at time 0 the previous position already lies on the curve
        field.write_segments(80, 0.0, &mut vertices);
        let frozen = vertices.clone();

        for _ in 0..10 {
            field.write_segments(80, 0.0, &mut vertices);
            assert_eq!(vertices, frozen);
        }
        for pair in frozen.chunks(2) {
            assert_eq!(pair[0].position, pair[1].position);
        }
    }

    #[test]
    fn test_parameters_never_mutate() {
        let mut field = seeded_field();
        let before = field.particles().to_vec();
        let mut vertices = Vec::new();

        for frame in 0..100 {
            field.write_segments(50 + frame, frame as f64 * 0.1, &mut vertices);
        }
        assert_eq!(field.particles(), before.as_slice());
    }

    #[test]
    fn test_vertex_layout_is_twelve_bytes() {
        assert_eq!(std::mem::size_of::<LineVertex>(), 12);
    }
}
