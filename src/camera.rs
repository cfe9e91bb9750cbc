//! Thin-lens camera for primary ray generation.

use glam::Vec3A;
use rand::Rng;

use crate::random;
use crate::ray::Ray;

/// Camera placement and lens parameters.
///
/// Everything needed to position the camera; the derived viewport basis is
/// computed once by [`Camera::new`]. Defaults reproduce the demo scene shot.
#[derive(Debug, Clone)]
pub struct CameraConfig {
    /// Point camera is looking from (camera position)
    pub lookfrom: Vec3A,
    /// Point camera is looking at (look target)
    pub lookat: Vec3A,
    /// Camera-relative "up" direction vector
    pub vup: Vec3A,
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Lens diameter controlling depth-of-field blur (0.0 = pinhole)
    pub aperture: f32,
    /// Distance from lookfrom to the plane of perfect focus
    pub focus_dist: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            lookfrom: Vec3A::new(13.0, 2.0, 3.0),
            lookat: Vec3A::new(0.0, 0.0, 0.0),
            vup: Vec3A::new(0.0, 1.0, 0.0),
            vfov: 20.0,
            aperture: 0.1,
            focus_dist: 10.0,
        }
    }
}

/// Camera mapping image-plane coordinates to world-space rays.
///
/// Models a thin lens: ray origins are jittered across a disk of the lens
/// radius while every ray is aimed at the focus plane, so points off the
/// focus plane blur when samples are averaged. Immutable once constructed
/// and read concurrently by all render workers.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    origin: Vec3A,
    /// World position of the viewport's lower left corner on the focus plane
    lower_left_corner: Vec3A,
    /// Vector across the full viewport width
    horizontal: Vec3A,
    /// Vector across the full viewport height
    vertical: Vec3A,
    /// Camera frame basis vector pointing right (u)
    u: Vec3A,
    /// Camera frame basis vector pointing up (v)
    v: Vec3A,
    /// Radius of the defocus disk (half the aperture)
    lens_radius: f32,
}

impl Camera {
    /// Build the camera basis and viewport from placement parameters.
    pub fn new(config: &CameraConfig, aspect_ratio: f32) -> Self {
        let theta = config.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = aspect_ratio * viewport_height;

        // Orthonormal camera frame: w opposes the view direction
        let w = (config.lookfrom - config.lookat).normalize();
        let u = config.vup.cross(w).normalize();
        let v = w.cross(u);

        let origin = config.lookfrom;
        let horizontal = config.focus_dist * viewport_width * u;
        let vertical = config.focus_dist * viewport_height * v;
        let lower_left_corner =
            origin - horizontal / 2.0 - vertical / 2.0 - config.focus_dist * w;

        Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            lens_radius: config.aperture / 2.0,
        }
    }

    /// Generate a primary ray for fractional viewport coordinates.
    ///
    /// `s` and `t` select a point on the focus plane, with (0, 0) the lower
    /// left corner and (1, 1) the upper right. The ray origin is offset by a
    /// random point on the lens disk for depth-of-field blur.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut impl Rng) -> Ray {
        let rd = self.lens_radius * random::random_in_unit_disk(rng);
        let offset = self.u * rd.x + self.v * rd.y;

        Ray::new(
            self.origin + offset,
            self.lower_left_corner + s * self.horizontal + t * self.vertical
                - self.origin
                - offset,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn pinhole_rays_start_at_lookfrom() {
        let config = CameraConfig {
            lookfrom: Vec3A::new(0.0, 0.0, 2.0),
            lookat: Vec3A::ZERO,
            vup: Vec3A::new(0.0, 1.0, 0.0),
            vfov: 40.0,
            aperture: 0.0,
            focus_dist: 2.0,
        };
        let camera = Camera::new(&config, 1.0);
        let mut rng = ChaCha20Rng::seed_from_u64(21);

        let r = camera.get_ray(0.5, 0.5, &mut rng);
        assert_eq!(r.origin, config.lookfrom);
        // Center ray points straight at the look target
        let expected = (config.lookat - config.lookfrom).normalize();
        assert!((r.direction.normalize() - expected).length() < 1e-4);
    }

    #[test]
    fn lens_jitter_stays_within_the_aperture() {
        let config = CameraConfig {
            aperture: 0.5,
            ..CameraConfig::default()
        };
        let camera = Camera::new(&config, 1.5);
        let mut rng = ChaCha20Rng::seed_from_u64(22);

        for _ in 0..100 {
            let r = camera.get_ray(0.3, 0.7, &mut rng);
            assert!((r.origin - config.lookfrom).length() < config.aperture / 2.0);
        }
    }
}
