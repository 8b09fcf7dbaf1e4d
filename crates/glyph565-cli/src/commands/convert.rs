//! Convert command implementation
//!
//! Decodes each spritesheet, tiles it into a glyph atlas and writes the raw
//! file. Every job is decoded and tiled before the first file is written, so
//! a missing, undecodable or mis-sized sheet never leaves a half-converted
//! set behind.

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::ExitCode;

use glyph565_core::preview::{write_preview, PngConfig};
use glyph565_core::raw::{hash_atlas, write_atlas};
use glyph565_core::{
    tile, AtlasError, BitmapDecoder, BmpDecoder, BmpLayout, GlyphAtlas, NativeDecoder,
};

use super::json_output::{AtlasRecord, ConvertOutput, JsonError};
use crate::jobs::AtlasJob;

/// Options shared by every job in a run.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Read pre-converted RGB565 BMPs with this layout instead of decoding natively.
    pub bmp_layout: Option<BmpLayout>,
    /// Also write a PNG preview next to each atlas.
    pub preview: bool,
    /// Output machine-readable JSON instead of colored text.
    pub json: bool,
    /// Lines printed when an input is missing.
    pub remediation: Vec<String>,
}

impl ConvertOptions {
    fn decoder(&self) -> Box<dyn BitmapDecoder> {
        match self.bmp_layout {
            Some(layout) => Box::new(BmpDecoder::new(layout)),
            None => Box::new(NativeDecoder),
        }
    }
}

/// Run the convert command
///
/// # Returns
/// Exit code: 0 if every atlas was written, 1 if an input is missing or a
/// sheet fails to convert
pub fn run(jobs: &[AtlasJob], options: &ConvertOptions) -> Result<ExitCode> {
    if let Some(missing) = jobs.iter().find(|job| !job.input.exists()) {
        let err = AtlasError::MissingInput(missing.input.clone());
        report_missing(&err, missing, options)?;
        return Ok(ExitCode::from(1));
    }

    let decoder = options.decoder();
    let mut atlases = Vec::with_capacity(jobs.len());

    for job in jobs {
        if !options.json {
            println!(
                "{} {} ({})",
                "Converting".cyan().bold(),
                job.input.display(),
                job.grid
            );
        }

        match build_atlas(job, decoder.as_ref()) {
            Ok(atlas) => atlases.push(atlas),
            Err(err) => return report_failure(err, job, Vec::new(), options),
        }
    }

    let mut records = Vec::with_capacity(jobs.len());
    for (job, atlas) in jobs.iter().zip(&atlases) {
        match write_job(job, atlas, options.preview) {
            Ok(record) => {
                if !options.json {
                    println!(
                        "  {} wrote {} ({} glyphs, {} bytes, blake3 {})",
                        "ok".green(),
                        record.output,
                        record.glyphs,
                        record.bytes,
                        &record.blake3[..16]
                    );
                    if let Some(preview) = &record.preview {
                        println!("  {} preview {}", "ok".green(), preview);
                    }
                }
                records.push(record);
            }
            Err(err) => return report_failure(err, job, records, options),
        }
    }

    if options.json {
        print_json(&ConvertOutput::success(records))?;
    } else {
        println!(
            "{} {} atlas{} written",
            "SUCCESS".green().bold(),
            records.len(),
            if records.len() == 1 { "" } else { "es" }
        );
    }

    Ok(ExitCode::SUCCESS)
}

/// Decode, tile and persist a single job.
pub fn convert_job(
    job: &AtlasJob,
    decoder: &dyn BitmapDecoder,
    preview: bool,
) -> Result<AtlasRecord, AtlasError> {
    let atlas = build_atlas(job, decoder)?;
    write_job(job, &atlas, preview)
}

/// Decode and tile a job without touching the filesystem beyond its input.
pub fn build_atlas(
    job: &AtlasJob,
    decoder: &dyn BitmapDecoder,
) -> Result<GlyphAtlas, AtlasError> {
    let bitmap = decoder.decode(&job.input)?;
    tile(&bitmap, &job.grid)
}

/// Persist a tiled atlas and, optionally, its preview.
pub fn write_job(
    job: &AtlasJob,
    atlas: &GlyphAtlas,
    preview: bool,
) -> Result<AtlasRecord, AtlasError> {
    write_atlas(atlas, &job.output)?;

    let preview = if preview {
        let path = job.preview_path();
        write_preview(atlas, &path, &PngConfig::default())?;
        Some(path.display().to_string())
    } else {
        None
    };

    Ok(AtlasRecord {
        input: job.input.display().to_string(),
        output: job.output.display().to_string(),
        grid: job.grid,
        glyphs: atlas.glyph_count(),
        bytes: atlas.len(),
        blake3: hash_atlas(atlas),
        preview,
    })
}

fn report_failure(
    err: AtlasError,
    job: &AtlasJob,
    records: Vec<AtlasRecord>,
    options: &ConvertOptions,
) -> Result<ExitCode> {
    match err {
        AtlasError::MissingInput(_) => {
            // removed between the up-front check and decoding
            report_missing(&err, job, options)?;
            Ok(ExitCode::from(1))
        }
        _ if options.json => {
            let error = JsonError::from_atlas_error(&err, Some(job.input.display().to_string()));
            print_json(&ConvertOutput::failure(records, error))?;
            Ok(ExitCode::from(1))
        }
        _ => Err(err).with_context(|| format!("converting {}", job.input.display())),
    }
}

fn report_missing(err: &AtlasError, job: &AtlasJob, options: &ConvertOptions) -> Result<()> {
    if options.json {
        let mut error = JsonError::from_atlas_error(err, Some(job.input.display().to_string()));
        if !options.remediation.is_empty() {
            error = error.with_suggestion(options.remediation.join(" "));
        }
        print_json(&ConvertOutput::failure(Vec::new(), error))?;
    } else if options.remediation.is_empty() {
        println!("ERROR: input file not found: {}", job.input.display());
    } else {
        for line in &options.remediation {
            println!("{}", line);
        }
    }
    Ok(())
}

fn print_json(output: &ConvertOutput) -> Result<()> {
    let json = serde_json::to_string_pretty(output).context("Failed to serialize JSON output")?;
    println!("{}", json);
    Ok(())
}
