#![allow(dead_code)]

use lib_pixmap::{color_from_rgb, color_from_rgba, Color, ColorType, Image, Pixel};

/// The 2x2 image used by the RGBA scenario: red, half transparent green,
/// fully transparent blue, opaque white.
pub const RGBA_2X2: [[u8; 4]; 4] = [
    [255, 0, 0, 255],
    [0, 255, 0, 128],
    [0, 0, 255, 0],
    [255, 255, 255, 255],
];

pub fn gray_image(width: u32, height: u32, values: &[u8]) -> Image {
    let mut image = Image::new(width, height, ColorType::Gray).unwrap();
    for (i, &value) in values.iter().enumerate() {
        let (x, y) = (i as u32 % width, i as u32 / width);
        image.set_pixel(x, y, Pixel::Gray(value)).unwrap();
    }
    image
}

pub fn color_image(width: u32, height: u32, color_type: ColorType, colors: &[Color]) -> Image {
    let mut image = Image::new(width, height, color_type).unwrap();
    for (i, &color) in colors.iter().enumerate() {
        let (x, y) = (i as u32 % width, i as u32 / width);
        image.set_pixel(x, y, Pixel::Color(color)).unwrap();
    }
    image
}

pub fn indexed_image(width: u32, height: u32, palette: &[Color], indices: &[u8]) -> Image {
    let mut image = Image::new(width, height, ColorType::Index).unwrap();
    image.set_palette(palette).unwrap();
    for (i, &index) in indices.iter().enumerate() {
        let (x, y) = (i as u32 % width, i as u32 / width);
        image.set_pixel(x, y, Pixel::Index(index)).unwrap();
    }
    image
}

pub fn rgba_2x2() -> Image {
    let colors: Vec<Color> = RGBA_2X2
        .iter()
        .map(|p| color_from_rgba(p[0], p[1], p[2], p[3]))
        .collect();
    color_image(2, 2, ColorType::Rgba, &colors)
}

/// A 16x16 RGB gradient, opaque so it survives a round-trip unchanged.
pub fn rgb_gradient() -> Image {
    let colors: Vec<Color> = (0..256u32)
        .map(|i| color_from_rgb(i as u8, (i * 7) as u8, 255 - i as u8))
        .collect();
    color_image(16, 16, ColorType::Rgb, &colors)
}

/// Encodes raw rows straight through the codec, bypassing the image model.
pub fn encode_raw(
    width: u32,
    height: u32,
    color: png::ColorType,
    depth: png::BitDepth,
    palette: Option<Vec<u8>>,
    data: &[u8],
) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(color);
        encoder.set_depth(depth);
        if let Some(palette) = palette {
            encoder.set_palette(palette);
        }
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
    }
    out
}

/// A 5x5 Adam7-interlaced RGB PNG whose pixel at (x, y) is [`interlaced_pixel`].
pub const INTERLACED_RGB_5X5: [u8; 126] = [
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D,
    0x49, 0x48, 0x44, 0x52, 0x00, 0x00, 0x00, 0x05, 0x00, 0x00, 0x00, 0x05,
    0x08, 0x02, 0x00, 0x00, 0x01, 0x75, 0x0A, 0x81, 0x24, 0x00, 0x00, 0x00,
    0x45, 0x49, 0x44, 0x41, 0x54, 0x78, 0xDA, 0x0D, 0xC4, 0x21, 0x01, 0xC0,
    0x30, 0x14, 0x43, 0xC1, 0x27, 0x62, 0x22, 0x8A, 0x83, 0x2B, 0xE2, 0x8B,
    0x88, 0x88, 0x8A, 0x28, 0x0E, 0x9E, 0x9C, 0xC8, 0xDA, 0x0E, 0x1C, 0xFC,
    0xCA, 0xFC, 0x4D, 0xFB, 0x62, 0x16, 0xEE, 0x01, 0x2F, 0x7B, 0xEA, 0x83,
    0x78, 0xC2, 0x46, 0xDE, 0xB1, 0x51, 0x9D, 0x5E, 0xD0, 0x23, 0x2D, 0x6B,
    0x47, 0x53, 0x19, 0xB2, 0x95, 0x71, 0x9C, 0x9C, 0xE6, 0x7E, 0x26, 0x18,
    0x1B, 0x59, 0x51, 0x69, 0x2A, 0x41, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45,
    0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

pub fn interlaced_pixel(x: u32, y: u32) -> [u8; 3] {
    [(x * 50) as u8, (y * 50) as u8, ((x + y) * 20) as u8]
}
