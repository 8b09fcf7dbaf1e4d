//! JSON output types for the `--json` flag.

use serde::{Deserialize, Serialize};

use glyph565_core::{AtlasError, GridSpec};

/// Stable error codes for programmatic error handling.
pub mod error_codes {
    /// Source image does not exist
    pub const MISSING_INPUT: &str = "G565_001";
    /// Grid geometry does not match the image
    pub const DIMENSION_MISMATCH: &str = "G565_002";
    /// Image could not be decoded
    pub const DECODE_FAILURE: &str = "G565_003";
    /// Filesystem or encoder failure while writing output
    pub const OUTPUT: &str = "G565_004";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Suggestion for fixing the error (if available)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl JsonError {
    pub fn from_atlas_error(err: &AtlasError, file: Option<String>) -> Self {
        let code = match err {
            AtlasError::MissingInput(_) => error_codes::MISSING_INPUT,
            AtlasError::DimensionMismatch(_) => error_codes::DIMENSION_MISMATCH,
            AtlasError::DecodeFailure(_) => error_codes::DECODE_FAILURE,
            AtlasError::Io(_) | AtlasError::Png(_) => error_codes::OUTPUT,
        };
        Self {
            code: code.to_string(),
            message: err.to_string(),
            file,
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Result of one converted atlas.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AtlasRecord {
    pub input: String,
    pub output: String,
    pub grid: GridSpec,
    pub glyphs: usize,
    pub bytes: usize,
    /// BLAKE3 hex digest of the atlas file.
    pub blake3: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

/// Top-level `--json` document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConvertOutput {
    pub success: bool,
    pub atlases: Vec<AtlasRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonError>,
}

impl ConvertOutput {
    pub fn success(atlases: Vec<AtlasRecord>) -> Self {
        Self {
            success: true,
            atlases,
            errors: Vec::new(),
        }
    }

    pub fn failure(atlases: Vec<AtlasRecord>, error: JsonError) -> Self {
        Self {
            success: false,
            atlases,
            errors: vec![error],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_codes() {
        let err = AtlasError::MissingInput(PathBuf::from("x.png"));
        assert_eq!(
            JsonError::from_atlas_error(&err, None).code,
            error_codes::MISSING_INPUT
        );
        let err = AtlasError::DimensionMismatch("w".into());
        assert_eq!(
            JsonError::from_atlas_error(&err, None).code,
            error_codes::DIMENSION_MISMATCH
        );
    }

    #[test]
    fn test_errors_omitted_on_success() {
        let json = serde_json::to_string(&ConvertOutput::success(Vec::new())).unwrap();
        assert_eq!(json, r#"{"success":true,"atlases":[]}"#);
    }
}
