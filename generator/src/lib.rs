//! Generator for Rust packages embedding the DejaVu TrueType fonts.
//!
//! The generator reads the DejaVu TTF release archive and writes one package
//! per `.ttf` entry: a directory named after the font holding the font file
//! and a `data.rs` stub that exposes its bytes as `TTF`.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument parsing
//! - [`source`] - Archive source resolution (remote URL or local path)
//! - [`fetch`] - HTTP download of remote archives
//! - [`digest`] - SHA-256 verification of the archive
//! - [`archive`] - Font entry iteration and extraction
//! - [`font_name`] - Display and package name derivation
//! - [`package`] - Per-font package emission
//! - [`manifest`] - Optional `fonts.json` index
//! - [`pipeline`] - Orchestration of a generation run
//! - [`logging`] - Logger initialisation for the binary
//! - [`error`] - Error types

pub mod archive;
pub mod cli;
pub mod digest;
pub mod error;
pub mod fetch;
pub mod font_name;
pub mod logging;
pub mod manifest;
pub mod package;
pub mod pipeline;
pub mod source;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
