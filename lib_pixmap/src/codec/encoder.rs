use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::{debug, error, info};
use png::{BitDepth, Encoder};

use super::PngError;
use crate::image::{ColorType, Image, PixelMap};

/// Creates (or truncates) `path` and writes `image` to it as PNG.
pub fn write_to_path(path: impl AsRef<Path>, image: &Image) -> Result<(), PngError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| {
        error!("Failed to create {}: {}", path.display(), e);
        e
    })?;

    let mut writer = BufWriter::new(file);
    write_to_stream(&mut writer, image)?;
    writer.flush()?;
    Ok(())
}

pub fn write_to_vec(image: &Image) -> Result<Vec<u8>, PngError> {
    let mut encoded_data = Vec::new();
    write_to_stream(&mut encoded_data, image)?;
    Ok(encoded_data)
}

/// Serializes `image` as a complete 8-bit, non-interlaced PNG stream.
///
/// Compression level and row filters are left to the codec. On failure the
/// sink may already hold part of the stream.
///
/// # Errors
/// - Returns `PngError::Encode` if the codec or the sink fails
pub fn write_to_stream<W: Write>(stream: W, image: &Image) -> Result<(), PngError> {
    info!("Starting PNG encoding");

    let color_type = image.color_type();
    let png_color = match color_type {
        ColorType::Index => png::ColorType::Indexed,
        ColorType::Gray => png::ColorType::Grayscale,
        ColorType::Rgb => png::ColorType::Rgb,
        ColorType::Rgba => png::ColorType::Rgba,
    };

    let stride = image.width() as usize * color_type.bytes_per_pixel();
    let mut data = Vec::with_capacity(stride * image.height() as usize);
    match image.map() {
        PixelMap::Index(pixels) | PixelMap::Gray(pixels) => data.extend_from_slice(pixels),
        // Rgb storage is always opaque, only the color channels go out
        PixelMap::Rgb(pixels) => {
            for color in pixels {
                data.extend_from_slice(&color.to_rgb());
            }
        }
        PixelMap::Rgba(pixels) => {
            for color in pixels {
                data.extend_from_slice(&color.to_rgba());
            }
        }
    }
    debug!(
        "Rows prepared: width={} height={} color={:?} stride={}",
        image.width(),
        image.height(),
        png_color,
        stride
    );

    let mut encoder = Encoder::new(stream, image.width(), image.height());
    encoder.set_color(png_color);
    encoder.set_depth(BitDepth::Eight);

    if color_type == ColorType::Index {
        let palette: Vec<u8> = image.palette().iter().flat_map(|c| c.to_rgb()).collect();
        encoder.set_palette(palette);
        debug!("Palette data written with {} colors", image.palette_num());
    }

    let mut writer = encoder.write_header().map_err(|e| {
        error!("Failed to write PNG header: {}", e);
        e
    })?;
    writer.write_image_data(&data).map_err(|e| {
        error!("Failed to write PNG image data: {}", e);
        e
    })?;
    writer.finish()?;

    info!("PNG encoding completed successfully");
    Ok(())
}
