pub mod constants;
pub mod image;
pub mod codec;

use log::*;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

pub use crate::image::color::{color_from_rgb, color_from_rgba, Color};
pub use crate::image::format::{ColorType, Image, ImageError, Pixel, PixelMap};
pub use crate::codec::{
    read_from_bytes, read_from_path, read_from_stream, write_to_path, write_to_stream,
    write_to_vec, PngError,
};

/// Routes `lib_pixmap` log records into `log_file`.
///
/// Fails if the file cannot be created or a global logger is already installed.
pub fn init_logging(log_file: impl AsRef<Path>) -> io::Result<()> {
    let target = Box::new(File::create(log_file)?);

    env_logger::Builder::new()
        .target(env_logger::Target::Pipe(target))
        .filter(Some("lib_pixmap"), LevelFilter::Debug)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}
