//! glyph565 CLI library.
//!
//! This crate provides the job table and command implementations behind the
//! `glyph565` binary.

pub mod commands;
pub mod jobs;
