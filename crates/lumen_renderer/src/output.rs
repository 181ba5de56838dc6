//! Writing rendered images to disk.
//!
//! PPM is written by hand in either the plain (P3) or binary (P6) variant;
//! PNG goes through the `image` crate.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;
use thiserror::Error;

use crate::pixel_buffer::PixelBuffer;

/// Errors that can occur while saving an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Pixel buffer of {width}x{height} does not fit an RGB image")]
    BufferSize { width: u32, height: u32 },
}

pub type OutputResult<T> = Result<T, OutputError>;

/// PPM flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PpmFormat {
    /// ASCII `P3`
    Plain,
    /// Raw-byte `P6`
    Binary,
}

impl PpmFormat {
    fn magic(self) -> &'static str {
        match self {
            PpmFormat::Plain => "P3",
            PpmFormat::Binary => "P6",
        }
    }
}

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Ppm(PpmFormat),
    Png,
}

impl ImageFormat {
    /// Pick a format from a file extension: `.png` is PNG, anything else
    /// plain PPM.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let is_png = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));

        if is_png {
            ImageFormat::Png
        } else {
            ImageFormat::Ppm(PpmFormat::Plain)
        }
    }
}

/// Serialize `buffer` as PPM, top row first.
pub fn write_ppm<W: Write>(mut writer: W, buffer: &PixelBuffer, format: PpmFormat) -> OutputResult<()> {
    writeln!(writer, "{}", format.magic())?;
    writeln!(writer, "{} {}", buffer.width(), buffer.height())?;
    writeln!(writer, "255")?;

    let bytes = buffer.as_bytes();
    match format {
        PpmFormat::Binary => writer.write_all(bytes)?,
        PpmFormat::Plain => {
            let row_len = buffer.width() as usize * 3;
            for row in bytes.chunks(row_len.max(1)) {
                let line = row
                    .iter()
                    .map(|b| b.to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                writeln!(writer, "{}", line)?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}

/// Save `buffer` to `path` in the given format.
pub fn save_image(path: impl AsRef<Path>, buffer: &PixelBuffer, format: ImageFormat) -> OutputResult<()> {
    let path = path.as_ref();

    match format {
        ImageFormat::Ppm(ppm) => {
            let writer = BufWriter::new(File::create(path)?);
            write_ppm(writer, buffer, ppm)?;
        }
        ImageFormat::Png => {
            let (width, height) = (buffer.width(), buffer.height());
            let rgb = image::RgbImage::from_raw(width, height, buffer.as_bytes().to_vec())
                .ok_or(OutputError::BufferSize { width, height })?;
            rgb.save_with_format(path, image::ImageFormat::Png)?;
        }
    }

    info!("Saved {}x{} image to {}", buffer.width(), buffer.height(), path.display());
    Ok(())
}
