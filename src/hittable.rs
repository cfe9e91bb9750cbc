//! Ray-object intersection system.
//!
//! Defines the Hittable trait for geometric primitives and HitRecord for
//! storing intersection data.

use glam::Vec3A;

use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;

/// Ray-object intersection information.
///
/// Contains intersection point, surface normal, distance, and a reference to
/// the struck material. A record only lives for the duration of one
/// intersection query and the scatter call that follows it.
#[derive(Debug, Clone)]
pub struct HitRecord<'a> {
    /// Point where the ray intersects the object
    pub p: Vec3A,
    /// Surface normal at the intersection point (unit vector)
    pub normal: Vec3A,
    /// Distance along the ray to the intersection point
    pub t: f32,
    /// True if ray hits the front face, false if hits the back face
    pub front_face: bool,
    /// Material of the object at the hit point
    pub material: &'a Material,
}

impl<'a> HitRecord<'a> {
    /// Build a record from an outward normal, orienting it against the ray.
    ///
    /// The normal always points against the incident ray; `front_face`
    /// records which side was struck.
    pub fn new(r: &Ray, t: f32, p: Vec3A, outward_normal: Vec3A, material: &'a Material) -> Self {
        // Front face when ray and outward normal point in opposite directions
        let front_face = r.direction.dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };
        Self {
            p,
            normal,
            t,
            front_face,
            material,
        }
    }
}

/// Trait for objects that can be intersected by rays.
///
/// Core abstraction for geometric primitives. Must be thread-safe
/// (Sync + Send) so the scene can be shared across render workers.
pub trait Hittable: Sync + Send {
    /// Test for ray intersection within the given parameter range.
    ///
    /// Returns the intersection closest to the ray origin, or None.
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;
}

/// Collection of objects forming a scene.
///
/// Uses linear search for intersection testing. Supports polymorphic
/// objects through Box<dyn Hittable>.
pub struct HittableList {
    /// Vector of boxed hittable objects
    pub objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add an object to the scene.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }
}

impl Default for HittableList {
    fn default() -> Self {
        Self::new()
    }
}

impl Hittable for HittableList {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest_so_far = ray_t.max;
        let mut closest_hit = None;

        // Narrow the search range to the closest hit found so far, so the
        // nearest surface wins regardless of object order
        for object in &self.objects {
            if let Some(rec) = object.hit(r, Interval::new(ray_t.min, closest_so_far)) {
                closest_so_far = rec.t;
                closest_hit = Some(rec);
            }
        }

        closest_hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sphere::Sphere;
    use std::sync::Arc;

    fn gray() -> Arc<Material> {
        Arc::new(Material::Lambertian {
            albedo: Vec3A::splat(0.5),
        })
    }

    #[test]
    fn normal_faces_against_ray() {
        let material = gray();

        let falling = Ray::new(Vec3A::new(0.0, 2.0, 0.0), Vec3A::new(0.0, -1.0, 0.0));
        let rec = HitRecord::new(&falling, 1.0, falling.at(1.0), Vec3A::new(0.0, 1.0, 0.0), &material);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3A::new(0.0, 1.0, 0.0));

        let rising = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 1.0, 0.0));
        let rec = HitRecord::new(&rising, 1.0, rising.at(1.0), Vec3A::new(0.0, 1.0, 0.0), &material);
        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3A::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn closest_object_wins_regardless_of_order() {
        let near = Sphere::new(Vec3A::new(0.0, 0.0, -1.0), 0.25, gray());
        let far = Sphere::new(Vec3A::new(0.0, 0.0, -3.0), 0.25, gray());
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        let range = Interval::new(0.001, f32::INFINITY);

        let mut world = HittableList::new();
        world.add(Box::new(near.clone()));
        world.add(Box::new(far.clone()));
        let t_near_first = world.hit(&r, range).expect("hit").t;

        let mut world = HittableList::new();
        world.add(Box::new(far));
        world.add(Box::new(near));
        let t_far_first = world.hit(&r, range).expect("hit").t;

        assert!((t_near_first - 0.75).abs() < 1e-4);
        assert_eq!(t_near_first, t_far_first);
    }
}
