//! Procedural demo scene generation.

use glam::Vec3A;
use rand::Rng;
use std::sync::Arc;

use crate::hittable::HittableList;
use crate::material::Material;
use crate::random;
use crate::sphere::Sphere;

/// Build the demo scene: a ground sphere, a grid of small random spheres,
/// and three large feature spheres.
///
/// The structure is deterministic; sphere placement and material parameters
/// come from `rng`, so a seeded generator reproduces the exact same scene.
pub fn random_scene(rng: &mut impl Rng) -> HittableList {
    let mut world = HittableList::new();

    // Ground sphere
    let ground_material = Arc::new(Material::Lambertian {
        albedo: Vec3A::new(0.5, 0.5, 0.5),
    });
    world.add(Box::new(Sphere::new(
        Vec3A::new(0.0, -1000.0, 0.0),
        1000.0,
        ground_material,
    )));

    // All glass spheres share one material instance
    let glass = Arc::new(Material::Dielectric {
        refraction_index: 1.5,
    });

    // Grid of small spheres with randomized materials
    for a in -3..3 {
        for b in -3..3 {
            let choose_mat = rng.random::<f32>();
            let center = Vec3A::new(
                a as f32 + 0.9 * rng.random::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.random::<f32>(),
            );

            // Don't place spheres too close to the large metal feature sphere
            if (center - Vec3A::new(4.0, 0.2, 0.0)).length() > 0.9 {
                let sphere_material = if choose_mat < 0.8 {
                    // Diffuse
                    let albedo = random::random_color(rng) * random::random_color(rng);
                    Arc::new(Material::Lambertian { albedo })
                } else if choose_mat < 0.95 {
                    // Metal
                    let albedo = random::random_color_range(rng, 0.5, 1.0);
                    let fuzz = random::random_range(rng, 0.0, 0.5);
                    Arc::new(Material::Metal { albedo, fuzz })
                } else {
                    // Glass
                    Arc::clone(&glass)
                };

                world.add(Box::new(Sphere::new(center, 0.2, sphere_material)));
            }
        }
    }

    // Three large feature spheres
    world.add(Box::new(Sphere::new(
        Vec3A::new(0.0, 1.0, 0.0),
        1.0,
        Arc::clone(&glass),
    )));

    world.add(Box::new(Sphere::new(
        Vec3A::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Material::Lambertian {
            albedo: Vec3A::new(0.4, 0.2, 0.1),
        }),
    )));

    world.add(Box::new(Sphere::new(
        Vec3A::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Material::Metal {
            albedo: Vec3A::new(0.7, 0.6, 0.5),
            fuzz: 0.0,
        }),
    )));

    world
}
