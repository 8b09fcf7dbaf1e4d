//! glyph565 Atlas Transcoder
//!
//! This crate turns a font glyph spritesheet into a packed RGB565 glyph atlas
//! for embedded display drivers. The atlas is a headerless run of glyph
//! blocks, one per grid cell in row-major order, each block holding its rows
//! top-to-bottom as little-endian 16-bit pixels.
//!
//! # Features
//!
//! - **Pixel conversion**: truncating RGB888 to RGB565 packing
//! - **Atlas tiling**: bottom-up sheet rows reordered into per-glyph blocks
//! - **Decoders**: native decoding through the `image` crate, or payload
//!   extraction from an externally converted RGB565 BMP
//! - **Output**: all-or-nothing raw file writes, BLAKE3 digests and PNG previews
//!
//! # Example
//!
//! ```no_run
//! use glyph565_core::{tile, GridSpec, NativeDecoder, BitmapDecoder};
//! use glyph565_core::raw::write_atlas;
//! use std::path::Path;
//!
//! let bitmap = NativeDecoder.decode(Path::new("font_9x18.png")).unwrap();
//! let atlas = tile(&bitmap, &GridSpec::FONT_9X18).unwrap();
//! assert_eq!(atlas.len(), 62_208);
//! write_atlas(&atlas, Path::new("font_9x18.raw")).unwrap();
//! ```
//!
//! # Determinism
//!
//! Tiling is a pure function of its inputs: the same sheet and grid always
//! produce byte-identical atlases. Previews use fixed PNG settings for the
//! same reason.

pub mod atlas;
pub mod bitmap;
pub mod bmp;
pub mod charmap;
pub mod decode;
pub mod error;
pub mod pixel;
pub mod preview;
pub mod raw;

// Re-export main types for convenience
pub use atlas::{tile, GlyphAtlas};
pub use bitmap::{GridSpec, SourceBitmap};
pub use bmp::BmpLayout;
pub use decode::{BitmapDecoder, BmpDecoder, NativeDecoder};
pub use error::AtlasError;
pub use pixel::{convert, Rgb565, BYTES_PER_PIXEL};
