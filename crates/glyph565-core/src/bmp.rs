//! RGB565 BMP container handling.
//!
//! ImageMagick's `convert -type TrueColor -define BMP:subtype=rgb565` writes a
//! 14-byte file header plus a 124-byte BITMAPV5HEADER, followed directly by
//! bottom-up RGB565 rows. The payload already has the exact layout
//! [`SourceBitmap`] expects, so reading one is a matter of stripping the
//! header and checking the length.

use std::io::{Cursor, Read, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::bitmap::SourceBitmap;
use crate::error::AtlasError;
use crate::pixel::BYTES_PER_PIXEL;

/// File header plus BITMAPV5HEADER.
pub const DEFAULT_HEADER_SIZE: usize = 138;

/// Bytes [`read_header`] needs: the file header plus the info header up to
/// the bits-per-pixel field.
pub const MIN_HEADER_SIZE: usize = 30;

const FILE_HEADER_SIZE: u32 = 14;
const V5_HEADER_SIZE: u32 = 124;
const BI_BITFIELDS: u32 = 3;
const LCS_SRGB: u32 = 0x7352_4742;
const LCS_GM_IMAGES: u32 = 4;

/// Byte layout of a pre-converted BMP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmpLayout {
    /// Bytes to skip before the pixel payload.
    ///
    /// [`read_bmp`] takes the dimensions from the header itself, so it needs
    /// at least [`MIN_HEADER_SIZE`]. Headerless payloads go through
    /// [`read_bmp_payload`] with explicit dimensions instead.
    pub header_size: usize,
    /// Bytes per pixel in the payload. Only 2 (RGB565) is accepted.
    pub bytes_per_pixel: usize,
}

impl Default for BmpLayout {
    fn default() -> Self {
        Self {
            header_size: DEFAULT_HEADER_SIZE,
            bytes_per_pixel: BYTES_PER_PIXEL,
        }
    }
}

impl BmpLayout {
    pub fn with_header_size(header_size: usize) -> Self {
        Self {
            header_size,
            ..Self::default()
        }
    }
}

/// Fields of the BMP info header that matter for atlas conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmpHeader {
    pub width: u32,
    /// Positive for bottom-up storage, negative for top-down.
    pub height: i32,
    pub bits_per_pixel: u16,
}

/// Parse the file and info header fields.
pub fn read_header(bytes: &[u8]) -> Result<BmpHeader, AtlasError> {
    if bytes.len() < MIN_HEADER_SIZE || &bytes[0..2] != b"BM" {
        return Err(AtlasError::decode("not a BMP file"));
    }

    let mut cursor = Cursor::new(&bytes[18..30]);
    let width = cursor.read_i32::<LittleEndian>()?;
    let height = cursor.read_i32::<LittleEndian>()?;
    let _planes = cursor.read_u16::<LittleEndian>()?;
    let bits_per_pixel = cursor.read_u16::<LittleEndian>()?;

    if width <= 0 {
        return Err(AtlasError::decode(format!("invalid BMP width {}", width)));
    }

    Ok(BmpHeader {
        width: width as u32,
        height,
        bits_per_pixel,
    })
}

/// Strip the header from `bytes` and wrap the payload as a bottom-up bitmap.
///
/// The payload must be exactly `width * height * bytes_per_pixel` bytes.
pub fn read_bmp_payload(
    bytes: &[u8],
    width: u32,
    height: u32,
    layout: &BmpLayout,
) -> Result<SourceBitmap, AtlasError> {
    if layout.bytes_per_pixel != BYTES_PER_PIXEL {
        return Err(AtlasError::decode(format!(
            "unsupported payload depth: {} bytes per pixel",
            layout.bytes_per_pixel
        )));
    }
    if bytes.len() < layout.header_size {
        return Err(AtlasError::decode(format!(
            "file is {} bytes, shorter than the {}-byte header",
            bytes.len(),
            layout.header_size
        )));
    }

    let payload = &bytes[layout.header_size..];
    let expected = SourceBitmap::expected_len(width, height);
    if payload.len() as u64 != expected {
        return Err(AtlasError::decode(format!(
            "payload is {} bytes, expected {} for {}x{}",
            payload.len(),
            expected,
            width,
            height
        )));
    }

    SourceBitmap::new(width, height, payload.to_vec())
}

/// Read a whole RGB565 BMP, taking the dimensions from its header.
pub fn read_bmp(bytes: &[u8], layout: &BmpLayout) -> Result<SourceBitmap, AtlasError> {
    if layout.header_size < MIN_HEADER_SIZE {
        return Err(AtlasError::decode(format!(
            "header size {} is smaller than the {} bytes holding the BMP dimensions",
            layout.header_size, MIN_HEADER_SIZE
        )));
    }
    let header = read_header(bytes)?;
    if header.height < 0 {
        return Err(AtlasError::decode("top-down BMP rows are not supported"));
    }
    if header.bits_per_pixel as usize != layout.bytes_per_pixel * 8 {
        return Err(AtlasError::decode(format!(
            "BMP has {} bits per pixel, expected {}",
            header.bits_per_pixel,
            layout.bytes_per_pixel * 8
        )));
    }
    read_bmp_payload(bytes, header.width, header.height as u32, layout)
}

/// Read an RGB565 BMP file from disk.
pub fn read_bmp_file(path: &Path, layout: &BmpLayout) -> Result<SourceBitmap, AtlasError> {
    if !path.exists() {
        return Err(AtlasError::MissingInput(path.to_path_buf()));
    }
    let mut bytes = Vec::new();
    std::fs::File::open(path)?.read_to_end(&mut bytes)?;
    read_bmp(&bytes, layout)
}

/// Write `bitmap` as a 138-byte-header RGB565 BMP.
///
/// Rows are written unpadded, so the width must be even to keep every row
/// 4-byte aligned as the BMP format requires.
pub fn write_bmp565<W: Write>(bitmap: &SourceBitmap, mut writer: W) -> Result<(), AtlasError> {
    if bitmap.width % 2 != 0 {
        return Err(AtlasError::mismatch(format!(
            "width {} would need row padding",
            bitmap.width
        )));
    }

    let image_size = bitmap.data.len() as u32;
    let offset = FILE_HEADER_SIZE + V5_HEADER_SIZE;

    // BITMAPFILEHEADER
    writer.write_all(b"BM")?;
    writer.write_u32::<LittleEndian>(offset + image_size)?;
    writer.write_u32::<LittleEndian>(0)?;
    writer.write_u32::<LittleEndian>(offset)?;

    // BITMAPV5HEADER
    writer.write_u32::<LittleEndian>(V5_HEADER_SIZE)?;
    writer.write_i32::<LittleEndian>(bitmap.width as i32)?;
    writer.write_i32::<LittleEndian>(bitmap.height as i32)?;
    writer.write_u16::<LittleEndian>(1)?; // planes
    writer.write_u16::<LittleEndian>(16)?;
    writer.write_u32::<LittleEndian>(BI_BITFIELDS)?;
    writer.write_u32::<LittleEndian>(image_size)?;
    writer.write_i32::<LittleEndian>(2835)?; // 72 dpi
    writer.write_i32::<LittleEndian>(2835)?;
    writer.write_u32::<LittleEndian>(0)?; // colors used
    writer.write_u32::<LittleEndian>(0)?; // colors important
    writer.write_u32::<LittleEndian>(0xf800)?;
    writer.write_u32::<LittleEndian>(0x07e0)?;
    writer.write_u32::<LittleEndian>(0x001f)?;
    writer.write_u32::<LittleEndian>(0)?; // alpha mask
    writer.write_u32::<LittleEndian>(LCS_SRGB)?;
    writer.write_all(&[0u8; 36])?; // endpoints
    writer.write_all(&[0u8; 12])?; // gamma
    writer.write_u32::<LittleEndian>(LCS_GM_IMAGES)?;
    writer.write_u32::<LittleEndian>(0)?; // profile data
    writer.write_u32::<LittleEndian>(0)?; // profile size
    writer.write_u32::<LittleEndian>(0)?; // reserved

    writer.write_all(&bitmap.data)?;
    Ok(())
}
