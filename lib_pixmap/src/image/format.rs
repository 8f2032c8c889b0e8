use log::{debug, error};
use thiserror::Error;

use super::color::{color_from_rgb, Color};
use crate::constants::MAX_PALETTE_SIZE;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Pixel ({x}, {y}) lies outside a {width}x{height} image")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    #[error("Pixel {pixel:?} does not fit a {color_type:?} image")]
    PixelMismatch { pixel: Pixel, color_type: ColorType },
    #[error("Invalid palette index: {0} exceeds palette size of {1}")]
    InvalidPaletteIndex(usize, usize),
    #[error("Palette overflow: maximum 256 colors supported, attempted to add color #{0}")]
    PaletteOverflow(usize),
    #[error("{0:?} images carry no palette")]
    PaletteNotSupported(ColorType),
}

/// Pixel encoding of an [`Image`], fixed when the image is allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorType {
    /// One byte per pixel, an index into the palette.
    Index,
    /// One byte of luminance per pixel.
    Gray,
    /// Red, green and blue. Stored colors are always opaque.
    Rgb,
    Rgba,
}

impl ColorType {
    /// Bytes one pixel occupies in an 8-bit PNG row.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            ColorType::Index | ColorType::Gray => 1,
            ColorType::Rgb => 3,
            ColorType::Rgba => 4,
        }
    }
}

/// A single pixel value, shaped after the color type it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pixel {
    Index(u8),
    Gray(u8),
    Color(Color),
}

/// Row-major pixel storage. The variant always matches the owning image's color type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelMap {
    Index(Vec<u8>),
    Gray(Vec<u8>),
    Rgb(Vec<Color>),
    Rgba(Vec<Color>),
}

impl PixelMap {
    fn zeroed(color_type: ColorType, len: usize) -> Self {
        match color_type {
            ColorType::Index => PixelMap::Index(vec![0; len]),
            ColorType::Gray => PixelMap::Gray(vec![0; len]),
            ColorType::Rgb => PixelMap::Rgb(vec![color_from_rgb(0, 0, 0); len]),
            ColorType::Rgba => PixelMap::Rgba(vec![Color::default(); len]),
        }
    }

    pub fn color_type(&self) -> ColorType {
        match self {
            PixelMap::Index(_) => ColorType::Index,
            PixelMap::Gray(_) => ColorType::Gray,
            PixelMap::Rgb(_) => ColorType::Rgb,
            PixelMap::Rgba(_) => ColorType::Rgba,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PixelMap::Index(data) | PixelMap::Gray(data) => data.len(),
            PixelMap::Rgb(data) | PixelMap::Rgba(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, offset: usize) -> Pixel {
        match self {
            PixelMap::Index(data) => Pixel::Index(data[offset]),
            PixelMap::Gray(data) => Pixel::Gray(data[offset]),
            PixelMap::Rgb(data) | PixelMap::Rgba(data) => Pixel::Color(data[offset]),
        }
    }
}

/// An in-memory raster image.
///
/// Dimensions and color type are fixed at allocation. The pixel map is allocated
/// once and never resized, and every index pixel stays below [`Image::palette_num`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    palette: Vec<Color>,
    map: PixelMap,
}

impl Image {
    /// Allocates a zero-filled image.
    ///
    /// Index images start with a single black palette entry so every pixel
    /// already points into the palette. Rgb pixels start opaque black.
    ///
    /// # Errors
    /// - Returns `ImageError::InvalidDimensions` if either dimension is zero or the
    ///   pixel count does not fit in memory
    pub fn new(width: u32, height: u32, color_type: ColorType) -> Result<Self, ImageError> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .filter(|&len| len > 0)
            .ok_or_else(|| {
                error!("Cannot allocate a {}x{} image", width, height);
                ImageError::InvalidDimensions { width, height }
            })?;
        debug!(
            "Allocating {:?} image: width={} height={}",
            color_type, width, height
        );

        let palette = match color_type {
            ColorType::Index => {
                let mut palette = Vec::with_capacity(MAX_PALETTE_SIZE);
                palette.push(color_from_rgb(0, 0, 0));
                palette
            }
            _ => Vec::new(),
        };

        Ok(Self {
            width,
            height,
            palette,
            map: PixelMap::zeroed(color_type, len),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn color_type(&self) -> ColorType {
        self.map.color_type()
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Number of palette entries in use.
    pub fn palette_num(&self) -> usize {
        self.palette.len()
    }

    pub fn map(&self) -> &PixelMap {
        &self.map
    }

    pub(crate) fn map_mut(&mut self) -> &mut PixelMap {
        &mut self.map
    }

    /// Replaces the palette of an index image.
    ///
    /// # Errors
    /// - Returns `ImageError::PaletteNotSupported` for non-index images
    /// - Returns `ImageError::PaletteOverflow` for more than 256 colors
    /// - Returns `ImageError::InvalidPaletteIndex` if a pixel would point past the new palette
    pub fn set_palette(&mut self, colors: &[Color]) -> Result<(), ImageError> {
        self.check_palette_capacity(colors.len())?;
        if let Some(max) = self.max_index() {
            if max >= colors.len() {
                error!(
                    "Palette of {} colors is too small for index {}",
                    colors.len(),
                    max
                );
                return Err(ImageError::InvalidPaletteIndex(max, colors.len()));
            }
        }

        self.palette.clear();
        self.palette.extend_from_slice(colors);
        debug!("Palette set with {} colors", self.palette.len());
        Ok(())
    }

    /// Appends one color and returns its index.
    ///
    /// # Errors
    /// - Returns `ImageError::PaletteNotSupported` for non-index images
    /// - Returns `ImageError::PaletteOverflow` if the palette already holds 256 colors
    pub fn push_palette(&mut self, color: Color) -> Result<u8, ImageError> {
        self.check_palette_capacity(self.palette.len() + 1)?;
        let index = self.palette.len() as u8;
        self.palette.push(color);
        Ok(index)
    }

    fn check_palette_capacity(&self, len: usize) -> Result<(), ImageError> {
        let color_type = self.color_type();
        if color_type != ColorType::Index {
            error!("{:?} image cannot hold a palette", color_type);
            return Err(ImageError::PaletteNotSupported(color_type));
        }
        if len > MAX_PALETTE_SIZE {
            error!(
                "Palette size {} exceeds the maximum allowed limit of {} colors",
                len, MAX_PALETTE_SIZE
            );
            return Err(ImageError::PaletteOverflow(len));
        }
        Ok(())
    }

    /// Largest palette index in use, `None` for non-index images.
    pub(crate) fn max_index(&self) -> Option<usize> {
        match &self.map {
            PixelMap::Index(data) => data.iter().max().map(|&i| i as usize),
            _ => None,
        }
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Reads `map[y][x]`, `None` when the coordinates are out of range.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        self.offset(x, y).map(|offset| self.map.get(offset))
    }

    /// Writes `map[y][x]`.
    ///
    /// # Errors
    /// - Returns `ImageError::OutOfBounds` for coordinates outside the image
    /// - Returns `ImageError::PixelMismatch` if the pixel shape does not match the color type
    /// - Returns `ImageError::InvalidPaletteIndex` for an index past the palette
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Pixel) -> Result<(), ImageError> {
        let offset = self.offset(x, y).ok_or(ImageError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })?;
        let palette_num = self.palette.len();

        match (&mut self.map, pixel) {
            (PixelMap::Index(data), Pixel::Index(i)) => {
                if i as usize >= palette_num {
                    return Err(ImageError::InvalidPaletteIndex(i as usize, palette_num));
                }
                data[offset] = i;
            }
            (PixelMap::Gray(data), Pixel::Gray(g)) => data[offset] = g,
            // Rgb has no alpha channel on disk
            (PixelMap::Rgb(data), Pixel::Color(c)) => data[offset] = Color { a: 0xff, ..c },
            (PixelMap::Rgba(data), Pixel::Color(c)) => data[offset] = c,
            (map, pixel) => {
                return Err(ImageError::PixelMismatch {
                    pixel,
                    color_type: map.color_type(),
                })
            }
        }

        Ok(())
    }

    /// Expands the image into a flat RGBA8 buffer.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.map.len() * 4);
        match &self.map {
            PixelMap::Index(data) => {
                for &index in data {
                    let color = self.palette.get(index as usize).copied().unwrap_or_default();
                    rgba.extend_from_slice(&color.to_rgba());
                }
            }
            PixelMap::Gray(data) => {
                for &gray in data {
                    rgba.extend_from_slice(&[gray, gray, gray, 0xff]);
                }
            }
            PixelMap::Rgb(data) | PixelMap::Rgba(data) => {
                for color in data {
                    rgba.extend_from_slice(&color.to_rgba());
                }
            }
        }
        rgba
    }
}
