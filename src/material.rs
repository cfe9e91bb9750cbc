//! Material system for ray tracing.
//!
//! Implements three material types: Lambertian (diffuse), Metal (specular),
//! and Dielectric (transparent).

use glam::Vec3A;
use rand::Rng;

use crate::hittable::HitRecord;
use crate::random;
use crate::ray::Ray;

/// RGB color type using Vec3A for SIMD optimization.
pub type Color = Vec3A;

/// Material types for ray tracing.
///
/// Closed enum over the surface materials a sphere can carry. The set of
/// kinds is fixed, so scattering dispatches through an exhaustive match.
#[derive(Debug, Clone, Copy)]
pub enum Material {
    /// Lambertian diffuse material for matte surfaces.
    Lambertian {
        /// Surface color/reflectance.
        albedo: Color,
    },

    /// Metallic material with specular reflection.
    Metal {
        /// Metal color.
        albedo: Color,
        /// Surface roughness (0.0 = mirror, 1.0 = rough).
        fuzz: f32,
    },

    /// Dielectric (transparent) material with refraction.
    Dielectric {
        /// Index of refraction (1.0 = air, 1.5 = glass, etc.).
        refraction_index: f32,
    },
}

impl Material {
    /// Compute ray scattering for this material.
    ///
    /// Returns the attenuation color and the scattered ray, or None when the
    /// ray is absorbed.
    pub fn scatter(
        &self,
        r_in: &Ray,
        rec: &HitRecord<'_>,
        rng: &mut impl Rng,
    ) -> Option<(Color, Ray)> {
        match self {
            Material::Lambertian { albedo } => scatter_lambertian(*albedo, rec, rng),
            Material::Metal { albedo, fuzz } => scatter_metal(*albedo, *fuzz, r_in, rec, rng),
            Material::Dielectric { refraction_index } => {
                scatter_dielectric(*refraction_index, r_in, rec, rng)
            }
        }
    }
}

/// Lambertian diffuse scattering with cosine-weighted distribution.
fn scatter_lambertian(
    albedo: Color,
    rec: &HitRecord<'_>,
    rng: &mut impl Rng,
) -> Option<(Color, Ray)> {
    let mut scatter_direction = rec.normal + random::random_unit_vector(rng);

    // Catch degenerate scatter direction (very close to zero)
    if scatter_direction.length_squared() < 1e-8 {
        scatter_direction = rec.normal;
    }

    Some((albedo, Ray::new(rec.p, scatter_direction)))
}

/// Metallic reflection with optional surface roughness.
fn scatter_metal(
    albedo: Color,
    fuzz: f32,
    r_in: &Ray,
    rec: &HitRecord<'_>,
    rng: &mut impl Rng,
) -> Option<(Color, Ray)> {
    let reflected = reflect(r_in.direction.normalize(), rec.normal);
    let direction = reflected + fuzz.min(1.0) * random::random_in_unit_sphere(rng);

    // Grazing perturbations that end up under the surface are absorbed
    if direction.dot(rec.normal) > 0.0 {
        Some((albedo, Ray::new(rec.p, direction)))
    } else {
        None
    }
}

/// Dielectric scattering with reflection and refraction.
fn scatter_dielectric(
    refraction_index: f32,
    r_in: &Ray,
    rec: &HitRecord<'_>,
    rng: &mut impl Rng,
) -> Option<(Color, Ray)> {
    // Glass doesn't attenuate light
    let attenuation = Color::ONE;

    let ri = if rec.front_face {
        1.0 / refraction_index
    } else {
        refraction_index
    };

    let unit_direction = r_in.direction.normalize();
    let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

    let cannot_refract = ri * sin_theta > 1.0;

    let direction = if cannot_refract || reflectance(cos_theta, ri) > rng.random::<f32>() {
        reflect(unit_direction, rec.normal)
    } else {
        refract(unit_direction, rec.normal, ri)
    };

    Some((attenuation, Ray::new(rec.p, direction)))
}

/// Reflect a vector off a surface using the law of reflection.
fn reflect(v: Vec3A, n: Vec3A) -> Vec3A {
    v - 2.0 * v.dot(n) * n
}

/// Refract a vector through an interface using Snell's law.
fn refract(uv: Vec3A, n: Vec3A, etai_over_etat: f32) -> Vec3A {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Compute Fresnel reflectance using Schlick's approximation.
fn reflectance(cosine: f32, refraction_index: f32) -> f32 {
    let r0 = (1.0 - refraction_index) / (1.0 + refraction_index);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
