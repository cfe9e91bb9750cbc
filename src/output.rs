//! # Output Module
//!
//! Writes a finished framebuffer to disk:
//! - Plain-text PPM (P3), one pixel per line, top row first
//! - PNG export through the `image` crate
//!
//! Both writers log success and hand I/O failures back to the caller; an
//! unwritable destination is fatal for the process, nothing downstream can
//! proceed without the image being persisted.

use image::{ImageBuffer, Rgb};
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};

use crate::renderer::Framebuffer;

/// Save the framebuffer as a plain-text PPM (P3) file.
///
/// The header is `P3`, the image dimensions, and the maximum channel value
/// 255, followed by one `r g b` line per pixel in row-major order starting
/// at the top visual row.
pub fn write_ppm(image: &Framebuffer, output_path: &str) -> io::Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_ppm_to(image, &mut writer)?;
    writer.flush()?;

    info!("Image saved as {}", output_path);
    Ok(())
}

/// Write the P3 header and pixel lines to any byte sink.
fn write_ppm_to(image: &Framebuffer, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width(), image.height())?;
    writeln!(writer, "255")?;

    for row in image.rows() {
        for [r, g, b] in row {
            writeln!(writer, "{} {} {}", r, g, b)?;
        }
    }

    Ok(())
}

/// Save the framebuffer as a PNG file.
///
/// Pixels are already gamma corrected and quantized, so this is a straight
/// byte-for-byte export.
pub fn save_png(image: &Framebuffer, output_path: &str) -> image::ImageResult<()> {
    let png: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_fn(image.width(), image.height(), |x, y| Rgb(image.pixel(x, y)));
    png.save(output_path)?;

    info!("Image saved as {}", output_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::HittableList;
    use crate::renderer::{render, RenderConfig};

    #[test]
    fn ppm_layout_for_a_2x2_render() {
        let config = RenderConfig {
            image_width: 2,
            aspect_ratio: 1.0,
            samples_per_pixel: 2,
            max_depth: 3,
            threads: 2,
            seed: Some(5),
            ..RenderConfig::default()
        };
        let image = render(&HittableList::new(), &config);
        let mut bytes = Vec::new();
        write_ppm_to(&image, &mut bytes).expect("in-memory write");

        let text = String::from_utf8(bytes).expect("ascii output");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3 + 4);
        assert_eq!(lines[0], "P3");
        assert_eq!(lines[1], "2 2");
        assert_eq!(lines[2], "255");
        for pixel_line in &lines[3..] {
            let channels: Vec<u32> = pixel_line
                .split_whitespace()
                .map(|c| c.parse().expect("integer channel"))
                .collect();
            assert_eq!(channels.len(), 3);
            assert!(channels.iter().all(|&c| c <= 255));
        }
    }
}
