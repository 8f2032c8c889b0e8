pub mod decoder;
pub mod encoder;
pub mod unpack;

use std::io;

use thiserror::Error;

use crate::image::ImageError;

pub use decoder::{read_from_bytes, read_from_path, read_from_stream};
pub use encoder::{write_to_path, write_to_stream, write_to_vec};

#[derive(Error, Debug)]
pub enum PngError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid or missing PNG signature")]
    BadSignature,
    #[error("PNG decoding failed: {0}")]
    Decode(#[from] png::DecodingError),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
    #[error("Unsupported PNG color type: {0:?}")]
    UnsupportedColorType(png::ColorType),
    #[error("Invalid image data")]
    Image(#[from] ImageError),
}
