//! glyph565 CLI - convert font spritesheets into raw RGB565 glyph atlases
//!
//! With no arguments, converts the embedded-graphics 9x18 font sheets in the
//! current directory into `.raw` atlases for firmware to `include_bytes!`.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use glyph565_cli::commands::convert::{self, ConvertOptions};
use glyph565_cli::jobs::{builtin_jobs, parse_pair, AtlasJob, BUILTIN_REMEDIATION};
use glyph565_core::bmp::DEFAULT_HEADER_SIZE;
use glyph565_core::{BmpLayout, GridSpec};

/// glyph565 - Font spritesheet to RGB565 glyph atlas converter
#[derive(Parser, Debug)]
#[command(name = "glyph565")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the built-in font sheets
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Convert a single custom spritesheet instead of the built-in fonts
    #[arg(short, long, requires = "cell", requires = "grid")]
    input: Option<PathBuf>,

    /// Glyph cell size in pixels, e.g. 9x18
    #[arg(long, value_parser = parse_pair, requires = "input")]
    cell: Option<(u32, u32)>,

    /// Grid size in cells (columns x rows), e.g. 16x12
    #[arg(long, value_parser = parse_pair, requires = "input")]
    grid: Option<(u32, u32)>,

    /// Atlas output path (default: input with a .raw extension)
    #[arg(short, long, requires = "input")]
    output: Option<PathBuf>,

    /// Read pre-converted RGB565 BMP files instead of decoding images
    #[arg(long)]
    bmp: bool,

    /// Bytes of BMP header to skip before the pixel payload (at least 30,
    /// since width and height are read from the header)
    #[arg(long, default_value_t = DEFAULT_HEADER_SIZE)]
    header_size: usize,

    /// Also write a PNG preview of each atlas
    #[arg(long)]
    preview: bool,

    /// Output machine-readable JSON (no colored output)
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn jobs(&self) -> Vec<AtlasJob> {
        match (&self.input, self.cell, self.grid) {
            (Some(input), Some((cw, ch)), Some((cols, rows))) => {
                let mut job = AtlasJob::new(input, GridSpec::new(cw, ch, cols, rows));
                if let Some(output) = &self.output {
                    job = job.with_output(output);
                }
                vec![job]
            }
            _ => builtin_jobs(&self.dir, if self.bmp { "bmp" } else { "png" }),
        }
    }

    fn options(&self) -> ConvertOptions {
        ConvertOptions {
            bmp_layout: self
                .bmp
                .then(|| BmpLayout::with_header_size(self.header_size)),
            preview: self.preview,
            json: self.json,
            remediation: if self.input.is_none() {
                BUILTIN_REMEDIATION.iter().map(|s| s.to_string()).collect()
            } else {
                Vec::new()
            },
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = convert::run(&cli.jobs(), &cli.options());

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_cli_no_args_uses_builtin_fonts() {
        let cli = Cli::try_parse_from(["glyph565"]).unwrap();
        let jobs = cli.jobs();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].input, Path::new("./font_9x18.png"));
        assert_eq!(jobs[1].output, Path::new("./font_9x18_bold.raw"));
        assert_eq!(cli.options().remediation.len(), 2);
        assert!(cli.options().bmp_layout.is_none());
    }

    #[test]
    fn test_cli_parses_custom_input() {
        let cli = Cli::try_parse_from([
            "glyph565", "--input", "sheet.png", "--cell", "8x8", "--grid", "16x8", "--output",
            "out.bin",
        ])
        .unwrap();
        let jobs = cli.jobs();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].grid, GridSpec::new(8, 8, 16, 8));
        assert_eq!(jobs[0].output, Path::new("out.bin"));
        assert!(cli.options().remediation.is_empty());
    }

    #[test]
    fn test_cli_input_requires_geometry() {
        let err = Cli::try_parse_from(["glyph565", "--input", "sheet.png"]).unwrap_err();
        assert!(err.to_string().contains("--cell"));
    }

    #[test]
    fn test_cli_rejects_bad_pair() {
        assert!(Cli::try_parse_from([
            "glyph565", "--input", "a.png", "--cell", "nine", "--grid", "1x1"
        ])
        .is_err());
    }

    #[test]
    fn test_cli_bmp_header_size() {
        let cli = Cli::try_parse_from(["glyph565", "--bmp", "--header-size", "54"]).unwrap();
        assert_eq!(cli.options().bmp_layout, Some(BmpLayout::with_header_size(54)));
        assert_eq!(cli.jobs()[0].input, Path::new("./font_9x18.bmp"));

        let cli = Cli::try_parse_from(["glyph565", "--bmp"]).unwrap();
        assert_eq!(cli.options().bmp_layout, Some(BmpLayout::default()));
    }
}
