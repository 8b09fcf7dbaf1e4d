//! Source bitmap and glyph grid geometry.

use serde::{Deserialize, Serialize};

use crate::error::AtlasError;
use crate::pixel::{Rgb565, BYTES_PER_PIXEL};

/// A decoded spritesheet in bottom-up RGB565 layout.
///
/// The first `width * 2` bytes of `data` hold the visually lowest row.
/// Rows are packed with no padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Packed little-endian RGB565 pixels, bottom row first.
    pub data: Vec<u8>,
}

impl SourceBitmap {
    /// Wrap a bottom-up RGB565 buffer, checking its length.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, AtlasError> {
        let expected = Self::expected_len(width, height);
        if data.len() as u64 != expected {
            return Err(AtlasError::mismatch(format!(
                "expected {} bytes for {}x{} RGB565, got {}",
                expected,
                width,
                height,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Byte length a `width` x `height` RGB565 buffer must have.
    pub fn expected_len(width: u32, height: u32) -> u64 {
        width as u64 * height as u64 * BYTES_PER_PIXEL as u64
    }

    /// Byte offset of visual row `row` (0 = top) at pixel column `x`.
    ///
    /// Callers must keep `row < height` and `x < width`.
    #[inline]
    pub(crate) fn row_offset(&self, row: u32, x: u32) -> usize {
        let physical = (self.height - 1 - row) as usize;
        (physical * self.width as usize + x as usize) * BYTES_PER_PIXEL
    }

    /// Pixel at visual coordinates (`y` = 0 is the top row), or `None`
    /// outside the image or past the end of a short buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb565> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let off = self.row_offset(y, x);
        let bytes = self.data.get(off..off + BYTES_PER_PIXEL)?;
        Some(Rgb565::from_le_bytes([bytes[0], bytes[1]]))
    }
}

/// How a spritesheet decomposes into fixed-size glyph cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSpec {
    /// Glyph width in pixels.
    pub cell_width: u32,
    /// Glyph height in pixels.
    pub cell_height: u32,
    /// Number of glyph columns in the sheet.
    pub columns: u32,
    /// Number of glyph rows in the sheet.
    pub rows: u32,
}

impl GridSpec {
    /// The embedded-graphics 9x18 font sheets: 16 x 12 cells of 9 x 18 pixels.
    pub const FONT_9X18: GridSpec = GridSpec::new(9, 18, 16, 12);

    pub const fn new(cell_width: u32, cell_height: u32, columns: u32, rows: u32) -> Self {
        Self {
            cell_width,
            cell_height,
            columns,
            rows,
        }
    }

    /// Total number of glyph cells.
    pub fn glyph_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Sheet width in pixels implied by the grid.
    pub fn sheet_width(&self) -> u64 {
        self.cell_width as u64 * self.columns as u64
    }

    /// Sheet height in pixels implied by the grid.
    pub fn sheet_height(&self) -> u64 {
        self.cell_height as u64 * self.rows as u64
    }

    /// Bytes in one glyph row.
    pub fn row_bytes(&self) -> usize {
        self.cell_width as usize * BYTES_PER_PIXEL
    }

    /// Bytes in one glyph block.
    pub fn glyph_bytes(&self) -> usize {
        self.row_bytes() * self.cell_height as usize
    }

    /// Bytes in the whole atlas.
    pub fn atlas_bytes(&self) -> usize {
        self.glyph_bytes() * self.glyph_count()
    }

    /// Check that an image of `width` x `height` pixels divides exactly into this grid.
    pub fn check_dimensions(&self, width: u32, height: u32) -> Result<(), AtlasError> {
        if self.cell_width == 0 || self.cell_height == 0 || self.columns == 0 || self.rows == 0 {
            return Err(AtlasError::mismatch(format!(
                "grid {} has a zero-sized dimension",
                self
            )));
        }
        if width as u64 != self.sheet_width() {
            return Err(AtlasError::mismatch(format!(
                "image width {} != {} columns x {} px",
                width, self.columns, self.cell_width
            )));
        }
        if height as u64 != self.sheet_height() {
            return Err(AtlasError::mismatch(format!(
                "image height {} != {} rows x {} px",
                height, self.rows, self.cell_height
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for GridSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{} cells of {}x{} px",
            self.columns, self.rows, self.cell_width, self.cell_height
        )
    }
}
