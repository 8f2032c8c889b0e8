use std::fs::File;
use std::io::{self, BufReader, Cursor, Read};
use std::path::Path;

use log::{debug, error, info};
use png::{Decoder, Transformations};

use super::unpack::unpack_row;
use super::PngError;
use crate::constants::PNG_SIGNATURE;
use crate::image::{color_from_rgb, color_from_rgba, Color, ColorType, Image, PixelMap};

/// Opens `path` and decodes the PNG stream it holds.
pub fn read_from_path(path: impl AsRef<Path>) -> Result<Image, PngError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        error!("Failed to open {}: {}", path.display(), e);
        e
    })?;
    read_from_stream(BufReader::new(file))
}

pub fn read_from_bytes(data: &[u8]) -> Result<Image, PngError> {
    read_from_stream(data)
}

/// Decodes a whole PNG stream into an [`Image`].
///
/// The stream must be positioned at the PNG signature. Nothing is allocated
/// for the image until the codec has decoded every row.
///
/// # Errors
/// - Returns `PngError::BadSignature` on a short read or a signature mismatch
/// - Returns `PngError::Decode` for anything the codec rejects
/// - Returns `PngError::UnsupportedColorType` for gray-alpha images
/// - Returns `PngError::Image` if a pixel points past the palette
pub fn read_from_stream<R: Read>(mut stream: R) -> Result<Image, PngError> {
    info!("Starting PNG decoding");

    let mut signature = [0u8; PNG_SIGNATURE.len()];
    if let Err(e) = stream.read_exact(&mut signature) {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            error!("Stream ended before the PNG signature");
            return Err(PngError::BadSignature);
        }
        error!("Failed to read PNG signature: {}", e);
        return Err(e.into());
    }
    if signature != PNG_SIGNATURE {
        error!("Invalid PNG signature: {:02X?}", signature);
        return Err(PngError::BadSignature);
    }
    debug!("PNG signature validated successfully");

    // The codec checks the signature again, so hand the consumed bytes back
    let mut decoder = Decoder::new(Cursor::new(signature).chain(stream));
    decoder.set_transformations(Transformations::STRIP_16);

    let mut reader = decoder.read_info().map_err(|e| {
        error!("Failed to read PNG header: {}", e);
        e
    })?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf).map_err(|e| {
        error!("Failed to decode PNG image data: {}", e);
        e
    })?;
    debug!(
        "Decoded frame: width={} height={} color={:?} depth={:?} line_size={}",
        frame.width, frame.height, frame.color_type, frame.bit_depth, frame.line_size
    );

    let color_type = match frame.color_type {
        png::ColorType::Indexed => ColorType::Index,
        png::ColorType::Grayscale => ColorType::Gray,
        png::ColorType::Rgb => ColorType::Rgb,
        png::ColorType::Rgba => ColorType::Rgba,
        other => {
            error!("Unsupported PNG color type: {:?}", other);
            return Err(PngError::UnsupportedColorType(other));
        }
    };

    let palette: Vec<Color> = reader
        .info()
        .palette
        .as_deref()
        .unwrap_or_default()
        .chunks_exact(3)
        .map(|c| color_from_rgb(c[0], c[1], c[2]))
        .collect();

    let width = frame.width as usize;
    let height = frame.height as usize;
    let row_len = width * frame.color_type.samples();
    let mut samples = Vec::with_capacity(row_len * height);
    for row in buf.chunks(frame.line_size).take(height) {
        unpack_row(row, frame.bit_depth as u8, row_len, &mut samples);
    }

    let mut image = Image::new(frame.width, frame.height, color_type)?;
    match image.map_mut() {
        PixelMap::Index(data) | PixelMap::Gray(data) => data.copy_from_slice(&samples),
        PixelMap::Rgb(data) => {
            for (pixel, rgb) in data.iter_mut().zip(samples.chunks_exact(3)) {
                *pixel = color_from_rgb(rgb[0], rgb[1], rgb[2]);
            }
        }
        PixelMap::Rgba(data) => {
            for (pixel, rgba) in data.iter_mut().zip(samples.chunks_exact(4)) {
                *pixel = color_from_rgba(rgba[0], rgba[1], rgba[2], rgba[3]);
            }
        }
    }

    if color_type == ColorType::Index {
        // Rejects palettes past 256 entries and pixels indexing past the palette
        image.set_palette(&palette).map_err(|e| {
            error!("Decoded palette does not cover the image: {}", e);
            e
        })?;
        debug!("Palette read with {} colors", image.palette_num());
    }

    info!("PNG decoding completed successfully");
    Ok(image)
}
