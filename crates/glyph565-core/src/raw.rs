//! Raw atlas persistence.
//!
//! The atlas file is the bare glyph data with no header. Writes go through a
//! temporary file in the destination directory that is renamed into place,
//! so readers never observe a truncated atlas.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::atlas::GlyphAtlas;
use crate::error::AtlasError;

/// Write `atlas` to `path`, replacing any existing file.
pub fn write_atlas(atlas: &GlyphAtlas, path: &Path) -> Result<(), AtlasError> {
    let mut tmp = NamedTempFile::new_in(parent_dir(path))?;
    write_atlas_to_writer(atlas, tmp.as_file_mut())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Write the atlas bytes to any writer.
pub fn write_atlas_to_writer<W: Write>(
    atlas: &GlyphAtlas,
    mut writer: W,
) -> Result<(), AtlasError> {
    writer.write_all(atlas.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Directory a temporary sibling of `path` should be created in.
pub(crate) fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

/// BLAKE3 hex digest of the atlas bytes.
pub fn hash_atlas(atlas: &GlyphAtlas) -> String {
    blake3::hash(atlas.as_bytes()).to_hex().to_string()
}
