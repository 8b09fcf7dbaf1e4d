//! RGB565 pixel packing.

/// Bytes occupied by one packed RGB565 pixel.
pub const BYTES_PER_PIXEL: usize = 2;

/// A 16-bit pixel with red in bits 15-11, green in 10-5 and blue in 4-0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    /// Pack 8-bit channels by keeping the top 5/6/5 bits of each.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        let r5 = (r >> 3) as u16;
        let g6 = (g >> 2) as u16;
        let b5 = (b >> 3) as u16;
        Self((r5 << 11) | (g6 << 5) | b5)
    }

    /// Pack an RGBA sample. Alpha is ignored.
    pub const fn from_rgba8(r: u8, g: u8, b: u8, _a: u8) -> Self {
        Self::from_rgb8(r, g, b)
    }

    /// Raw 5-bit red channel.
    pub const fn red(self) -> u8 {
        (self.0 >> 11) as u8
    }

    /// Raw 6-bit green channel.
    pub const fn green(self) -> u8 {
        ((self.0 >> 5) & 0x3f) as u8
    }

    /// Raw 5-bit blue channel.
    pub const fn blue(self) -> u8 {
        (self.0 & 0x1f) as u8
    }

    /// Little-endian byte order, as stored in BMP payloads and atlas files.
    pub const fn to_le_bytes(self) -> [u8; 2] {
        self.0.to_le_bytes()
    }

    pub const fn from_le_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_le_bytes(bytes))
    }

    /// Expand back to 8-bit channels by bit replication.
    ///
    /// Lossy: `from_rgb8(to_rgb8(p)) == p`, but not the other way around.
    pub const fn to_rgb8(self) -> [u8; 3] {
        let r = self.red();
        let g = self.green();
        let b = self.blue();
        [(r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2)]
    }
}

impl From<[u8; 3]> for Rgb565 {
    fn from(rgb: [u8; 3]) -> Self {
        Self::from_rgb8(rgb[0], rgb[1], rgb[2])
    }
}

impl From<[u8; 4]> for Rgb565 {
    fn from(rgba: [u8; 4]) -> Self {
        Self::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3])
    }
}

impl From<Rgb565> for u16 {
    fn from(px: Rgb565) -> u16 {
        px.0
    }
}

/// Convert one truecolor sample (RGB or RGBA) to RGB565.
pub fn convert(pixel: impl Into<Rgb565>) -> Rgb565 {
    pixel.into()
}
