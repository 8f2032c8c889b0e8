pub mod color;
pub mod format;

pub use color::{color_from_rgb, color_from_rgba, Color};
pub use format::{ColorType, Image, ImageError, Pixel, PixelMap};
