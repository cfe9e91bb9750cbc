//! Random sampling helpers for ray tracing.
//!
//! Every helper draws from an injected generator so callers control seeding.
//! Workers hand each image row its own seeded ChaCha20 stream, which keeps
//! renders reproducible for a fixed seed.

use glam::Vec3A;
use rand::Rng;

/// Generate a random f32 in [min, max)
pub fn random_range(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    min + (max - min) * rng.random::<f32>()
}

/// Generate random RGB color with components in [0.0, 1.0).
pub fn random_color(rng: &mut impl Rng) -> Vec3A {
    Vec3A::new(rng.random(), rng.random(), rng.random())
}

/// Generate random RGB color with components in [min, max).
pub fn random_color_range(rng: &mut impl Rng, min: f32, max: f32) -> Vec3A {
    Vec3A::new(
        random_range(rng, min, max),
        random_range(rng, min, max),
        random_range(rng, min, max),
    )
}

/// Generate random unit vector uniformly distributed on the unit sphere.
pub fn random_unit_vector(rng: &mut impl Rng) -> Vec3A {
    // Uniform θ in [0, 2π)
    let theta = 2.0 * std::f32::consts::PI * rng.random::<f32>();

    // Uniform cos(φ) in [-1, 1] for proper sphere distribution
    let cos_phi = 2.0 * rng.random::<f32>() - 1.0;
    let sin_phi = (1.0 - cos_phi * cos_phi).sqrt();

    Vec3A::new(sin_phi * theta.cos(), sin_phi * theta.sin(), cos_phi)
}

/// Generate random point inside the unit sphere using rejection sampling.
pub fn random_in_unit_sphere(rng: &mut impl Rng) -> Vec3A {
    loop {
        let p = Vec3A::new(
            random_range(rng, -1.0, 1.0),
            random_range(rng, -1.0, 1.0),
            random_range(rng, -1.0, 1.0),
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Generate random point inside the unit disk using rejection sampling.
pub fn random_in_unit_disk(rng: &mut impl Rng) -> Vec3A {
    loop {
        let p = Vec3A::new(
            random_range(rng, -1.0, 1.0),
            random_range(rng, -1.0, 1.0),
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}
