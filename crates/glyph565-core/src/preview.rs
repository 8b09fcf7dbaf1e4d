//! Deterministic PNG previews of a packed atlas.
//!
//! The preview re-assembles glyph blocks into the original sheet geometry so
//! a converted atlas can be eyeballed against its source. Colors are the
//! RGB565 values expanded back to 8 bits, so quantization is visible.

use std::io::Write;
use std::path::Path;

use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use tempfile::NamedTempFile;

use crate::atlas::GlyphAtlas;
use crate::error::AtlasError;
use crate::pixel::{Rgb565, BYTES_PER_PIXEL};
use crate::raw::parent_dir;

/// PNG export configuration for deterministic output.
#[derive(Debug, Clone)]
pub struct PngConfig {
    /// Compression level. Use a fixed value for determinism.
    pub compression: Compression,
    /// Filter type. Use a fixed value for determinism.
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            filter: FilterType::NoFilter,
        }
    }
}

/// Lay the atlas back out as a top-down RGB8 sheet.
///
/// Returns `(width, height, pixels)`.
pub fn render_sheet(atlas: &GlyphAtlas) -> (u32, u32, Vec<u8>) {
    let grid = atlas.grid();
    let width = grid.cell_width * grid.columns;
    let height = grid.cell_height * grid.rows;
    let mut pixels = vec![0u8; width as usize * height as usize * 3];

    for (i, block) in atlas.glyphs().enumerate() {
        let x0 = (i % grid.columns as usize) * grid.cell_width as usize;
        let y0 = (i / grid.columns as usize) * grid.cell_height as usize;

        for (j, px) in block.chunks_exact(BYTES_PER_PIXEL).enumerate() {
            let x = x0 + j % grid.cell_width as usize;
            let y = y0 + j / grid.cell_width as usize;
            let idx = (y * width as usize + x) * 3;
            let rgb = Rgb565::from_le_bytes([px[0], px[1]]).to_rgb8();
            pixels[idx..idx + 3].copy_from_slice(&rgb);
        }
    }

    (width, height, pixels)
}

/// Write a preview PNG of `atlas` to a file.
///
/// Encodes into a temporary file next to `path` and renames it into place,
/// so a failed encode leaves no truncated PNG behind.
pub fn write_preview(
    atlas: &GlyphAtlas,
    path: &Path,
    config: &PngConfig,
) -> Result<(), AtlasError> {
    let mut tmp = NamedTempFile::new_in(parent_dir(path))?;
    {
        let mut writer = std::io::BufWriter::new(tmp.as_file_mut());
        write_preview_to_writer(atlas, &mut writer, config)?;
        writer.flush()?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Write a preview PNG of `atlas` to any writer.
pub fn write_preview_to_writer<W: Write>(
    atlas: &GlyphAtlas,
    writer: W,
    config: &PngConfig,
) -> Result<(), AtlasError> {
    let (width, height, pixels) = render_sheet(atlas);

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(config.compression);
    encoder.set_filter(config.filter);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&pixels)?;
    png_writer.finish()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{tile, GridSpec, SourceBitmap};

    fn checker_atlas() -> GlyphAtlas {
        // 4x2 sheet, two 2x2 glyphs; alternate black/white pixels
        let mut data = Vec::new();
        for i in 0..8 {
            let px = if i % 2 == 0 { 0xffffu16 } else { 0 };
            data.extend_from_slice(&px.to_le_bytes());
        }
        let bitmap = SourceBitmap::new(4, 2, data).unwrap();
        tile(&bitmap, &GridSpec::new(2, 2, 2, 1)).unwrap()
    }

    #[test]
    fn test_render_restores_sheet_layout() {
        let bitmap = SourceBitmap::new(4, 2, {
            let mut d = Vec::new();
            for v in [0xf800u16, 0x07e0, 0x001f, 0xffff, 0, 0xf800, 0x07e0, 0x001f] {
                d.extend_from_slice(&v.to_le_bytes());
            }
            d
        })
        .unwrap();
        let atlas = tile(&bitmap, &GridSpec::new(2, 2, 2, 1)).unwrap();
        let (w, h, pixels) = render_sheet(&atlas);
        assert_eq!((w, h), (4, 2));
        for y in 0..2u32 {
            for x in 0..4u32 {
                let idx = ((y * 4 + x) * 3) as usize;
                let expected = bitmap.pixel(x, y).unwrap().to_rgb8();
                assert_eq!(&pixels[idx..idx + 3], &expected[..], "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_write_preview_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("atlas.raw.png");
        write_preview(&checker_atlas(), &path, &PngConfig::default()).unwrap();

        let mut expected = Vec::new();
        write_preview_to_writer(&checker_atlas(), &mut expected, &PngConfig::default()).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), expected);
    }

    #[test]
    fn test_write_preview_missing_directory_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("atlas.raw.png");
        assert!(write_preview(&checker_atlas(), &path, &PngConfig::default()).is_err());
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_preview_deterministic() {
        let config = PngConfig::default();
        let mut a = Vec::new();
        let mut b = Vec::new();
        write_preview_to_writer(&checker_atlas(), &mut a, &config).unwrap();
        write_preview_to_writer(&checker_atlas(), &mut b, &config).unwrap();
        assert_eq!(a, b, "PNG data should be identical");
        assert_eq!(&a[1..4], b"PNG");
    }
}
