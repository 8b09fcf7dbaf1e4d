//! Decoding spritesheets into bottom-up RGB565 bitmaps.

use std::path::Path;

use image::ImageReader;

use crate::bitmap::SourceBitmap;
use crate::bmp::{self, BmpLayout};
use crate::error::AtlasError;
use crate::pixel::Rgb565;

/// Source of decoded spritesheets.
///
/// Implementations must return a buffer of exactly `width * height * 2`
/// bytes in bottom-up RGB565 row-major order.
pub trait BitmapDecoder {
    /// Report an image's pixel dimensions.
    fn dimensions(&self, path: &Path) -> Result<(u32, u32), AtlasError>;

    /// Decode an image into a bottom-up RGB565 bitmap.
    fn decode(&self, path: &Path) -> Result<SourceBitmap, AtlasError>;
}

/// Decodes PNG (and the other formats enabled on `image`) in-process.
///
/// Pixels are packed with the truncating 5-6-5 conversion, which matches
/// ImageMagick's RGB565 BMP output byte for byte.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeDecoder;

impl BitmapDecoder for NativeDecoder {
    fn dimensions(&self, path: &Path) -> Result<(u32, u32), AtlasError> {
        check_exists(path)?;
        image::image_dimensions(path).map_err(|e| decode_error(path, e))
    }

    fn decode(&self, path: &Path) -> Result<SourceBitmap, AtlasError> {
        check_exists(path)?;
        let img = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| decode_error(path, e))?
            .to_rgb8();

        let (width, height) = img.dimensions();
        let mut data = Vec::with_capacity(SourceBitmap::expected_len(width, height) as usize);
        for y in (0..height).rev() {
            for x in 0..width {
                let px = img.get_pixel(x, y);
                data.extend_from_slice(&Rgb565::from(px.0).to_le_bytes());
            }
        }

        SourceBitmap::new(width, height, data)
    }
}

/// Reads BMP files already converted to RGB565 by an external tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct BmpDecoder {
    pub layout: BmpLayout,
}

impl BmpDecoder {
    pub fn new(layout: BmpLayout) -> Self {
        Self { layout }
    }
}

impl BitmapDecoder for BmpDecoder {
    fn dimensions(&self, path: &Path) -> Result<(u32, u32), AtlasError> {
        let bitmap = self.decode(path)?;
        Ok((bitmap.width, bitmap.height))
    }

    fn decode(&self, path: &Path) -> Result<SourceBitmap, AtlasError> {
        bmp::read_bmp_file(path, &self.layout)
    }
}

fn check_exists(path: &Path) -> Result<(), AtlasError> {
    if path.exists() {
        Ok(())
    } else {
        Err(AtlasError::MissingInput(path.to_path_buf()))
    }
}

fn decode_error(path: &Path, err: image::ImageError) -> AtlasError {
    AtlasError::decode(format!("{}: {}", path.display(), err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_native_decode_is_bottom_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.png");

        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([0, 255, 0]));
        img.put_pixel(0, 1, Rgb([0, 0, 255]));
        img.put_pixel(1, 1, Rgb([255, 255, 255]));
        img.save(&path).unwrap();

        let bitmap = NativeDecoder.decode(&path).unwrap();
        assert_eq!((bitmap.width, bitmap.height), (2, 2));
        // bottom row first
        assert_eq!(
            bitmap.data,
            vec![0x1f, 0x00, 0xff, 0xff, 0x00, 0xf8, 0xe0, 0x07]
        );
        assert_eq!(bitmap.pixel(0, 0), Some(Rgb565(0xf800)));
        assert_eq!(NativeDecoder.dimensions(&path).unwrap(), (2, 2));
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = NativeDecoder
            .decode(&dir.path().join("nope.png"))
            .unwrap_err();
        assert!(matches!(err, AtlasError::MissingInput(_)));

        let err = BmpDecoder::default()
            .decode(&dir.path().join("nope.bmp"))
            .unwrap_err();
        assert!(matches!(err, AtlasError::MissingInput(_)));
    }

    #[test]
    fn test_garbage_is_decode_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("junk.png");
        std::fs::write(&path, b"definitely not an image").unwrap();
        let err = NativeDecoder.decode(&path).unwrap_err();
        assert!(matches!(err, AtlasError::DecodeFailure(_)));
    }
}
