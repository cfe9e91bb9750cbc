use clap::Parser;
use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

mod cli;
mod logger;

use cli::Args;
use glimmer::camera::CameraConfig;
use glimmer::output::{save_png, write_ppm};
use glimmer::renderer::{self, RenderConfig};
use glimmer::scene;
use logger::init_logger;

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.into());

    // Log application startup with version information
    info!("Glimmer - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    // One run seed drives both the scene generator and the sampling streams;
    // logging it makes any render reproducible after the fact
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());

    let config = RenderConfig {
        image_width: args.width,
        aspect_ratio: args.aspect_ratio,
        samples_per_pixel: args.samples_per_pixel,
        max_depth: args.max_depth,
        threads: args.threads,
        seed: Some(seed),
        camera: CameraConfig::default(),
    };

    info!(
        "Image resolution: {}x{}, samples per pixel: {}, seed: {}",
        config.image_width,
        config.image_height(),
        config.samples_per_pixel,
        seed
    );

    // Build the demo scene from the run seed
    let mut scene_rng = ChaCha20Rng::seed_from_u64(seed);
    let world = scene::random_scene(&mut scene_rng);

    // Render the image
    let image = renderer::render(&world, &config);

    // Save image based on file extension
    let saved = if args.output.ends_with(".ppm") {
        write_ppm(&image, &args.output).map_err(|e| e.to_string())
    } else if args.output.ends_with(".png") {
        save_png(&image, &args.output).map_err(|e| e.to_string())
    } else {
        log::error!(
            "Unsupported file extension '{}'. Only .ppm and .png formats are supported.",
            std::path::Path::new(&args.output)
                .extension()
                .unwrap_or_default()
                .to_string_lossy()
        );
        std::process::exit(1);
    };

    if let Err(e) = saved {
        log::error!("Failed to save image to {}: {}", args.output, e);
        std::process::exit(1);
    }
}
