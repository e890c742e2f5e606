//! Writing rendered images to disk.
//!
//! PPM (plain-text P3) is the native format; PNG goes through the `image`
//! crate when the output path asks for it.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use image::RgbImage;
use thiserror::Error;

use crate::renderer::{color_to_rgb, ImageBuffer};

/// Errors that can occur while saving an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Pixel buffer does not match {width}x{height}")]
    BufferSize { width: u32, height: u32 },
}

/// Write an image as plain-text PPM.
///
/// Header `P3`, dimensions, `255`, then one `r g b` line per pixel with
/// rows from the top of the image down. Each image row ends with an
/// empty line.
pub fn write_ppm<W: Write>(image: &ImageBuffer, writer: &mut W) -> io::Result<()> {
    write!(writer, "P3\n{} {}\n255\n", image.width, image.height)?;

    for row in image.pixels.chunks(image.width.max(1) as usize) {
        for color in row {
            let [r, g, b] = color_to_rgb(*color);
            writeln!(writer, "{} {} {}", r, g, b)?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

/// Save an image, picking the format from the file extension.
///
/// `.png` writes PNG; anything else writes PPM.
pub fn save<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> Result<(), OutputError> {
    let path = path.as_ref();
    let is_png = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));

    if is_png {
        let buffer = RgbImage::from_raw(image.width, image.height, image.to_rgb8()).ok_or(
            OutputError::BufferSize {
                width: image.width,
                height: image.height,
            },
        )?;
        buffer.save(path)?;
    } else {
        let mut writer = BufWriter::new(File::create(path)?);
        write_ppm(image, &mut writer)?;
        writer.flush()?;
    }

    log::info!("Saved {}", path.display());
    Ok(())
}
