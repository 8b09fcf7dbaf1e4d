//! Conversion jobs.
//!
//! With no arguments the CLI converts the embedded-graphics 9x18 font sheets
//! found in the working directory. A single custom sheet can be given on the
//! command line instead.

use std::path::{Path, PathBuf};

use glyph565_core::GridSpec;

/// Font sheets converted when no input is given.
pub const BUILTIN_SHEETS: [&str; 2] = ["font_9x18", "font_9x18_bold"];

/// Printed when a built-in sheet is missing.
pub const BUILTIN_REMEDIATION: [&str; 2] = [
    "ERROR: font files from embedded-graphics crate needed.",
    "Please copy or symlink fonts/png/font_9x18*.png here.",
];

/// One spritesheet to atlas conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtlasJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub grid: GridSpec,
}

impl AtlasJob {
    /// Job writing `<input stem>.raw` next to the input.
    pub fn new(input: impl Into<PathBuf>, grid: GridSpec) -> Self {
        let input = input.into();
        let output = input.with_extension("raw");
        Self {
            input,
            output,
            grid,
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Path of the optional PNG preview.
    pub fn preview_path(&self) -> PathBuf {
        let mut name = self.output.clone().into_os_string();
        name.push(".png");
        PathBuf::from(name)
    }
}

/// The built-in font jobs under `dir`, reading `<sheet>.<extension>`.
pub fn builtin_jobs(dir: &Path, extension: &str) -> Vec<AtlasJob> {
    BUILTIN_SHEETS
        .iter()
        .map(|name| {
            let input = dir.join(name).with_extension(extension);
            AtlasJob::new(input, GridSpec::FONT_9X18)
        })
        .collect()
}

/// Parse a `WxH` pair such as `9x18` or `16x12`.
pub fn parse_pair(s: &str) -> Result<(u32, u32), String> {
    let (a, b) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{}'", s))?;
    let a = a
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid number '{}': {}", a, e))?;
    let b = b
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid number '{}': {}", b, e))?;
    if a == 0 || b == 0 {
        return Err(format!("'{}' has a zero dimension", s));
    }
    Ok((a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_jobs() {
        let jobs = builtin_jobs(Path::new("fonts"), "png");
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].input, Path::new("fonts/font_9x18.png"));
        assert_eq!(jobs[0].output, Path::new("fonts/font_9x18.raw"));
        assert_eq!(jobs[1].input, Path::new("fonts/font_9x18_bold.png"));
        assert_eq!(jobs[1].grid, GridSpec::FONT_9X18);
    }

    #[test]
    fn test_preview_path() {
        let job = AtlasJob::new("a/sheet.png", GridSpec::FONT_9X18);
        assert_eq!(job.preview_path(), Path::new("a/sheet.raw.png"));
    }

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair("9x18"), Ok((9, 18)));
        assert_eq!(parse_pair("16X12"), Ok((16, 12)));
        assert!(parse_pair("9").is_err());
        assert!(parse_pair("0x4").is_err());
        assert!(parse_pair("ax4").is_err());
    }
}
