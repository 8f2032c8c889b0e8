/// An 8-bit RGBA color, used for palette entries and truecolor pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const fn to_rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Builds an opaque color from its components.
pub const fn color_from_rgb(r: u8, g: u8, b: u8) -> Color {
    color_from_rgba(r, g, b, 0xff)
}

pub const fn color_from_rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
    Color { r, g, b, a }
}
