//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Bounded-depth light transport with a sky gradient miss shader
//! - Anti-aliasing and depth of field via multi-sampling
//! - Row-band parallelism over a fixed pool of worker threads

use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::ops::Range;

use crate::camera::{Camera, CameraConfig};
use crate::hittable::{Hittable, HittableList};
use crate::interval::Interval;
use crate::material::Color;
use crate::ray::Ray;

/// Minimum hit distance, suppressing self-intersection artifacts.
const T_MIN: f32 = 0.001;

/// Render configuration.
///
/// Every start-of-run constant in one place: image geometry, sampling
/// budget, worker count, RNG seed, and camera placement.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Rendered image width in pixel count
    pub image_width: u32,
    /// Width over height; the image height is derived from this
    pub aspect_ratio: f32,
    /// Number of random samples for each pixel
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces per sample
    pub max_depth: u32,
    /// Number of worker threads rendering row bands
    pub threads: usize,
    /// Seed for all random streams; None draws a fresh seed from entropy
    pub seed: Option<u64>,
    /// Camera placement and lens parameters
    pub camera: CameraConfig,
}

impl RenderConfig {
    /// Image height in pixels, derived from width and aspect ratio.
    pub fn image_height(&self) -> u32 {
        ((self.image_width as f32 / self.aspect_ratio) as u32).max(1)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 300,
            aspect_ratio: 1.5,
            samples_per_pixel: 10,
            max_depth: 30,
            threads: default_thread_count(),
            seed: None,
            camera: CameraConfig::default(),
        }
    }
}

/// Number of worker threads matching the available CPU parallelism.
pub fn default_thread_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

/// Finalized image: a row-major grid of 8-bit RGB pixels.
///
/// Row 0 is the top visual row. During rendering each cell is written
/// exactly once, by the single worker that owns its row band.
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl Framebuffer {
    /// Create a buffer of the given dimensions, filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 3]; (width * height) as usize],
        }
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The pixel at (x, y), with y = 0 the top row.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels[(y * self.width + x) as usize]
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }

    /// Iterate over pixel rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[[u8; 3]]> {
        self.pixels.chunks_exact(self.width as usize)
    }
}

/// Partition `height` rows into contiguous bands, one per worker.
///
/// The first `height % workers` bands take one extra row, so the bands
/// cover every row exactly once for any worker count.
pub fn band_ranges(height: u32, workers: usize) -> Vec<Range<u32>> {
    let workers = workers.max(1) as u32;
    let base = height / workers;
    let remainder = height % workers;

    let mut ranges = Vec::with_capacity(workers as usize);
    let mut start = 0;
    for band in 0..workers {
        let rows = base + u32::from(band < remainder);
        ranges.push(start..start + rows);
        start += rows;
    }
    ranges
}

/// Compute the color seen along a ray.
///
/// The central light transport loop: query the scene for the nearest hit,
/// let the struck material scatter or absorb, and carry the accumulated
/// attenuation until the ray escapes to the sky or the bounce budget runs
/// out. Written as a loop with an explicit throughput color rather than
/// recursion, so arbitrarily large depth budgets cannot overflow the stack.
pub fn ray_color(r: &Ray, world: &dyn Hittable, depth: u32, rng: &mut impl Rng) -> Color {
    let mut current = *r;
    let mut throughput = Color::ONE;

    for _ in 0..depth {
        match world.hit(&current, Interval::new(T_MIN, f32::INFINITY)) {
            Some(rec) => match rec.material.scatter(&current, &rec, rng) {
                Some((attenuation, scattered)) => {
                    throughput *= attenuation;
                    current = scattered;
                }
                // Absorbed: nothing reaches the camera along this path
                None => return Color::ZERO,
            },
            // Escaped: the sky gradient is the only light source
            None => return throughput * sky_gradient(&current),
        }
    }

    // Bounce budget exhausted before reaching the sky
    Color::ZERO
}

/// Sky gradient between white at the horizon and light blue at the zenith.
fn sky_gradient(r: &Ray) -> Color {
    let unit_direction = r.direction.normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    (1.0 - a) * Color::new(1.0, 1.0, 1.0) + a * Color::new(0.5, 0.7, 1.0)
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Average accumulated samples and convert to an 8-bit pixel.
fn resolve_color(accumulated: Color, samples_per_pixel: u32) -> [u8; 3] {
    const INTENSITY: Interval = Interval::new(0.0, 0.999);

    let scale = 1.0 / samples_per_pixel as f32;
    let r = 256.0 * INTENSITY.clamp(linear_to_gamma(accumulated.x * scale));
    let g = 256.0 * INTENSITY.clamp(linear_to_gamma(accumulated.y * scale));
    let b = 256.0 * INTENSITY.clamp(linear_to_gamma(accumulated.z * scale));
    [r as u8, g as u8, b as u8]
}

/// Derive the random stream seed for one image row.
///
/// Rows own their streams, so pixel values do not depend on how rows are
/// distributed across workers.
fn row_seed(seed: u64, row: u32) -> u64 {
    seed ^ (row as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Render the scene into a finished framebuffer.
///
/// Rows are partitioned into contiguous bands, one per worker thread; each
/// worker samples and shades its band into a disjoint region of the shared
/// buffer, so no locking is needed for pixel writes. The scene and camera
/// are shared read-only.
pub fn render(world: &HittableList, config: &RenderConfig) -> Framebuffer {
    let width = config.image_width.max(1);
    let height = config.image_height();
    let workers = config.threads.max(1);
    let camera = Camera::new(&config.camera, config.aspect_ratio);
    let seed = config.seed.unwrap_or_else(|| rand::rng().random());

    let mut image = Framebuffer::new(width, height);

    info!("Rendering {}x{} using {} worker threads...", width, height, workers);
    let generation_start = std::time::Instant::now();
    let pb = ProgressBar::new(height as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40} {pos}/{len} ETA: {eta}")
            .expect("progress bar template"),
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .expect("render thread pool");

    // Split the buffer into disjoint row bands, one per worker; exclusive
    // access to each band is enforced by the borrow checker, not a lock
    let mut bands = Vec::with_capacity(workers);
    let mut rest: &mut [[u8; 3]] = &mut image.pixels;
    for rows in band_ranges(height, workers) {
        let cells = (rows.end - rows.start) as usize * width as usize;
        let (band, tail) = rest.split_at_mut(cells);
        bands.push((rows, band));
        rest = tail;
    }

    let camera = &camera;
    let progress = &pb;
    pool.scope(|s| {
        for (rows, band) in bands {
            s.spawn(move |_| {
                render_band(world, camera, config, seed, rows, band, width, height, progress);
            });
        }
    });

    pb.finish();
    info!("Image generated in {:.2?}", generation_start.elapsed());

    image
}

/// Sample and shade every pixel of one contiguous row band.
#[allow(clippy::too_many_arguments)]
fn render_band(
    world: &HittableList,
    camera: &Camera,
    config: &RenderConfig,
    seed: u64,
    rows: Range<u32>,
    band: &mut [[u8; 3]],
    width: u32,
    height: u32,
    pb: &ProgressBar,
) {
    let samples = config.samples_per_pixel.max(1);
    let u_span = (width - 1).max(1) as f32;
    let v_span = (height - 1).max(1) as f32;

    for (offset, row) in band.chunks_exact_mut(width as usize).enumerate() {
        let j = rows.start + offset as u32;
        let mut rng = ChaCha20Rng::seed_from_u64(row_seed(seed, j));
        // Row 0 is the top of the image; v grows upward
        let jv = (height - 1 - j) as f32;

        for (i, pixel) in row.iter_mut().enumerate() {
            let mut accumulated = Color::ZERO;

            for _ in 0..samples {
                let u = (i as f32 + rng.random::<f32>()) / u_span;
                let v = (jv + rng.random::<f32>()) / v_span;
                let r = camera.get_ray(u, v, &mut rng);
                accumulated += ray_color(&r, world, config.max_depth, &mut rng);
            }

            *pixel = resolve_color(accumulated, samples);
        }

        pb.inc(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;
    use crate::sphere::Sphere;
    use glam::Vec3A;
    use std::sync::Arc;

    fn single_sphere_world() -> HittableList {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(
            Vec3A::ZERO,
            0.5,
            Arc::new(Material::Lambertian {
                albedo: Vec3A::splat(0.5),
            }),
        )));
        world
    }

    fn head_on_config(threads: usize, image_width: u32) -> RenderConfig {
        RenderConfig {
            image_width,
            aspect_ratio: 1.0,
            samples_per_pixel: 8,
            max_depth: 8,
            threads,
            seed: Some(99),
            camera: CameraConfig {
                lookfrom: Vec3A::new(0.0, 0.0, 2.0),
                lookat: Vec3A::ZERO,
                vup: Vec3A::new(0.0, 1.0, 0.0),
                vfov: 40.0,
                aperture: 0.0,
                focus_dist: 2.0,
            },
        }
    }

    #[test]
    fn exhausted_bounce_budget_is_black() {
        let world = single_sphere_world();
        let mut rng = ChaCha20Rng::seed_from_u64(41);
        let r = Ray::new(Vec3A::new(0.0, 0.0, 2.0), Vec3A::new(0.0, 0.0, -1.0));
        assert_eq!(ray_color(&r, &world, 0, &mut rng), Vec3A::ZERO);
    }

    #[test]
    fn empty_scene_yields_the_sky_gradient() {
        let world = HittableList::new();
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.3, 0.8, -0.5));
        assert_eq!(ray_color(&r, &world, 10, &mut rng), sky_gradient(&r));
    }

    #[test]
    fn bands_cover_every_row_exactly_once() {
        for (height, workers) in [(10u32, 3usize), (8, 4), (3, 5), (7, 1), (0, 4), (200, 20)] {
            let ranges = band_ranges(height, workers);
            assert_eq!(ranges.len(), workers.max(1));

            let mut next = 0;
            for range in &ranges {
                assert_eq!(range.start, next);
                next = range.end;
            }
            assert_eq!(next, height);
        }

        // Remainder rows go to the leading bands
        let rows: Vec<u32> = band_ranges(10, 3).iter().map(|r| r.end - r.start).collect();
        assert_eq!(rows, vec![4, 3, 3]);
    }

    #[test]
    fn gamma_and_clamp() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-1.0), 0.0);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 1e-6);
        assert_eq!(resolve_color(Vec3A::new(1.0, 4.0, 0.16), 4), [128, 255, 51]);
    }

    #[test]
    fn seeded_renders_are_reproducible() {
        let world = single_sphere_world();
        let first = render(&world, &head_on_config(2, 8));
        let second = render(&world, &head_on_config(2, 8));
        assert_eq!(first.pixels(), second.pixels());
    }

    #[test]
    fn output_does_not_depend_on_worker_count() {
        let world = single_sphere_world();
        let serial = render(&world, &head_on_config(1, 8));
        let parallel = render(&world, &head_on_config(5, 8));
        assert_eq!(serial.pixels(), parallel.pixels());
    }

    #[test]
    fn sphere_shades_the_center_and_sky_fills_the_corners() {
        let world = single_sphere_world();
        let image = render(&world, &head_on_config(3, 11));

        let center = image.pixel(5, 5);
        let corner = image.pixel(0, 0);

        // The sky's blue channel is 1.0 everywhere, so a pure background
        // pixel saturates; a diffuse bounce halves the throughput at most
        assert_eq!(corner[2], 255);
        assert!(center[2] <= 182);
        assert_ne!(center, corner);
    }
}
