//! Sphere primitive for ray tracing.
//!
//! Implements efficient ray-sphere intersection using an optimized quadratic formula.

use glam::Vec3A;
use std::sync::Arc;

use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;

/// Sphere primitive defined by center, radius, and material.
#[derive(Debug, Clone)]
pub struct Sphere {
    /// Center point of the sphere in world coordinates.
    pub center: Vec3A,

    /// Radius of the sphere (always non-negative).
    ///
    /// Negative radius values are clamped to 0.0 in the constructor.
    pub radius: f32,

    /// Material properties determining light interaction.
    ///
    /// Shared ownership: several spheres may reference one material instance.
    pub material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// Negative radius values are clamped to 0.0.
    pub fn new(center: Vec3A, radius: f32, material: Arc<Material>) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }
}

impl Hittable for Sphere {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        // Vector from ray origin to sphere center
        let oc = self.center - r.origin;

        // Optimized quadratic equation coefficients
        let a = r.direction.length_squared();
        let h = r.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root that lies in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let p = r.at(root);
        let outward_normal = (p - self.center) / self.radius;
        Some(HitRecord::new(r, root, p, outward_normal, &self.material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_sphere() -> Sphere {
        Sphere::new(
            Vec3A::ZERO,
            0.5,
            Arc::new(Material::Lambertian {
                albedo: Vec3A::splat(0.5),
            }),
        )
    }

    #[test]
    fn hit_point_lies_on_surface() {
        let sphere = unit_sphere();
        let r = Ray::new(Vec3A::new(0.0, 0.0, 2.0), Vec3A::new(0.0, 0.0, -1.0));
        let rec = sphere
            .hit(&r, Interval::new(0.001, f32::INFINITY))
            .expect("ray through center must hit");

        assert!((rec.t - 1.5).abs() < 1e-4);
        assert!(((rec.p - sphere.center).length() - sphere.radius).abs() < 1e-4);
        assert!((rec.normal.length() - 1.0).abs() < 1e-4);
        // Outside origin: normal points outward, toward the ray
        assert!(rec.front_face);
        assert!(rec.normal.dot(r.direction) < 0.0);
        assert!((rec.normal - Vec3A::new(0.0, 0.0, 1.0)).length() < 1e-4);
    }

    #[test]
    fn normal_flips_when_ray_starts_inside() {
        let sphere = unit_sphere();
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        let rec = sphere
            .hit(&r, Interval::new(0.001, f32::INFINITY))
            .expect("interior ray must hit the shell");

        assert!((rec.t - 0.5).abs() < 1e-4);
        assert!(!rec.front_face);
        // Flipped normal still opposes the incident direction
        assert!(rec.normal.dot(r.direction) < 0.0);
    }

    #[test]
    fn respects_t_range() {
        let sphere = unit_sphere();
        let r = Ray::new(Vec3A::new(0.0, 0.0, 2.0), Vec3A::new(0.0, 0.0, -1.0));
        // Both roots (1.5 and 2.5) lie beyond the allowed range
        assert!(sphere.hit(&r, Interval::new(0.001, 1.0)).is_none());
        // Near root excluded, far root accepted
        let rec = sphere.hit(&r, Interval::new(2.0, 3.0)).expect("far root");
        assert!((rec.t - 2.5).abs() < 1e-4);
    }

    #[test]
    fn miss_returns_none() {
        let sphere = unit_sphere();
        let r = Ray::new(Vec3A::new(0.0, 2.0, 2.0), Vec3A::new(0.0, 0.0, -1.0));
        assert!(sphere.hit(&r, Interval::new(0.001, f32::INFINITY)).is_none());
    }
}
