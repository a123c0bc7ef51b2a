//! Writing rendered images to disk or a stream.
//!
//! Plain-text PPM (P3) is written directly; other formats go through the
//! `image` crate and are chosen by file extension.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::{color::color_to_rgb8, ImageBuffer};

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Pixel buffer does not match {width}x{height} image")]
    BufferSize { width: u32, height: u32 },
}

/// Result type for output operations.
pub type OutputResult<T> = Result<T, OutputError>;

/// Write an image as plain-text PPM: a `P3` header followed by one
/// `r g b` line per pixel in row-major order.
pub fn write_ppm<W: Write>(image: &ImageBuffer, writer: &mut W) -> OutputResult<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for color in &image.pixels {
        let [r, g, b] = color_to_rgb8(*color);
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    writer.flush()?;
    Ok(())
}

/// Save an image to `path`.
///
/// `.ppm` files (and paths without an extension) are written as
/// plain-text PPM; anything else is encoded by the `image` crate.
pub fn save_image<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> OutputResult<()> {
    let path = path.as_ref();
    let is_ppm = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(true, |ext| ext.eq_ignore_ascii_case("ppm"));

    if is_ppm {
        let mut writer = BufWriter::new(File::create(path)?);
        write_ppm(image, &mut writer)?;
    } else {
        let buffer = image::RgbImage::from_raw(image.width, image.height, image.to_rgb8())
            .ok_or(OutputError::BufferSize {
                width: image.width,
                height: image.height,
            })?;
        buffer.save(path)?;
    }

    log::info!("Saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use orb_math::Color;

    fn checker() -> ImageBuffer {
        let mut image = ImageBuffer::new(2, 2);
        image.set(0, 0, Color::ONE);
        image.set(1, 1, Color::new(0.25, 0.0, 1.0));
        image
    }

    #[test]
    fn test_write_ppm() {
        let mut out = Vec::new();
        write_ppm(&checker(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec!["P3", "2 2", "255", "255 255 255", "0 0 0", "0 0 0", "128 0 255"]
        );
    }

    #[test]
    fn test_save_ppm_and_png() {
        let dir = std::env::temp_dir().join(format!("orb_output_test_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let ppm = dir.join("checker.ppm");
        save_image(&checker(), &ppm).unwrap();
        let text = std::fs::read_to_string(&ppm).unwrap();
        assert!(text.starts_with("P3\n2 2\n255\n"));

        let png = dir.join("checker.png");
        save_image(&checker(), &png).unwrap();
        let decoded = image::open(&png).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (2, 2));
        assert_eq!(decoded.get_pixel(1, 1).0, [128, 0, 255]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_mismatched_buffer() {
        let mut image = checker();
        image.pixels.pop();

        let path = std::env::temp_dir().join("orb_output_mismatch.png");
        assert!(matches!(
            save_image(&image, &path),
            Err(OutputError::BufferSize { .. })
        ));
    }
}
