//! Glyph atlas tiling.
//!
//! A spritesheet arrives as full-width rows stored bottom-up. Firmware wants
//! each glyph as its own contiguous block with rows top-down, so it can blit
//! glyph `i` by copying `glyph_bytes` from `i * glyph_bytes`. [`tile`]
//! performs that reordering.

use crate::bitmap::{GridSpec, SourceBitmap};
use crate::charmap;
use crate::error::AtlasError;

/// Packed RGB565 glyph blocks in row-major cell order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphAtlas {
    grid: GridSpec,
    data: Vec<u8>,
}

impl GlyphAtlas {
    /// The grid this atlas was cut from.
    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn glyph_count(&self) -> usize {
        self.grid.glyph_count()
    }

    /// Pixel block of glyph `index`, rows top-down.
    pub fn glyph(&self, index: usize) -> Option<&[u8]> {
        if index >= self.glyph_count() {
            return None;
        }
        let size = self.grid.glyph_bytes();
        Some(&self.data[index * size..(index + 1) * size])
    }

    /// Pixel block for a Latin-1 byte, using the firmware's character mapping.
    pub fn glyph_for_byte(&self, byte: u8) -> Option<&[u8]> {
        charmap::glyph_index(byte).and_then(|i| self.glyph(i))
    }

    /// Iterate over all glyph blocks in index order.
    pub fn glyphs(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(self.grid.glyph_bytes())
    }
}

impl AsRef<[u8]> for GlyphAtlas {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

/// Cut `bitmap` into glyph blocks according to `grid`.
///
/// All geometry is validated before the output buffer is allocated, so a
/// mismatch never yields a partial atlas.
pub fn tile(bitmap: &SourceBitmap, grid: &GridSpec) -> Result<GlyphAtlas, AtlasError> {
    grid.check_dimensions(bitmap.width, bitmap.height)?;
    let expected = SourceBitmap::expected_len(bitmap.width, bitmap.height);
    if bitmap.data.len() as u64 != expected {
        return Err(AtlasError::mismatch(format!(
            "bitmap buffer holds {} bytes, {}x{} RGB565 needs {}",
            bitmap.data.len(),
            bitmap.width,
            bitmap.height,
            expected
        )));
    }

    let row_bytes = grid.row_bytes();
    let mut data = Vec::with_capacity(grid.atlas_bytes());

    for i in 0..grid.glyph_count() {
        let col = (i % grid.columns as usize) as u32;
        let row = (i / grid.columns as usize) as u32;
        let x = col * grid.cell_width;

        for y in 0..grid.cell_height {
            let start = bitmap.row_offset(row * grid.cell_height + y, x);
            data.extend_from_slice(&bitmap.data[start..start + row_bytes]);
        }
    }

    debug_assert_eq!(data.len(), grid.atlas_bytes());
    Ok(GlyphAtlas { grid: *grid, data })
}
