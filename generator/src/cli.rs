//! CLI argument definitions for the font package generator.
//!
//! Kept apart from the entrypoint so the binary only wires parsing, logging
//! and the pipeline together.

use crate::digest::Sha256Digest;
use crate::package::DEFAULT_FAMILY;
use crate::pipeline::{CollisionPolicy, GenerationConfig};
use crate::source::{ArchiveSource, DEFAULT_SOURCE};
use camino::Utf8PathBuf;
use clap::Parser;
use log::LevelFilter;

/// Generate Rust packages embedding the DejaVu TrueType fonts.
#[derive(Parser, Debug, Clone)]
#[command(name = "dejavu-gen")]
#[command(version, about)]
#[command(long_about = concat!(
    "Generate Rust packages embedding the DejaVu TrueType fonts.\n\n",
    "The release ZIP is downloaded (or opened, when --src is a local path), ",
    "and every .ttf entry becomes a directory named after the font, holding ",
    "the font file and a data.rs stub that exposes it as a TTF byte slice.\n\n",
    "The run stops at the first error. Packages already written stay on disk.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Generate from the upstream release into the current directory:\n",
    "    $ dejavu-gen\n\n",
    "  Generate from a local copy of the archive, with an index:\n",
    "    $ dejavu-gen --src dejavu-fonts-ttf-2.37.zip -o fonts --manifest\n",
))]
pub struct Cli {
    /// Remote URL (`http://` or `https://`) or local path of the font archive.
    #[arg(long, value_name = "SRC", default_value = DEFAULT_SOURCE)]
    pub src: ArchiveSource,

    /// Directory receiving the generated packages.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub out_dir: Utf8PathBuf,

    /// Font family name used in generated documentation.
    #[arg(long, value_name = "NAME", default_value = DEFAULT_FAMILY)]
    pub family: String,

    /// Expected SHA-256 of the archive (64 lowercase hex characters).
    #[arg(long, value_name = "HEX")]
    pub sha256: Option<Sha256Digest>,

    /// Write fonts.json listing the generated packages.
    #[arg(long)]
    pub manifest: bool,

    /// Fail when two font files map to the same package name.
    #[arg(long)]
    pub deny_collisions: bool,

    /// Increase log verbosity (repeatable: -v, -vv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Only report errors.
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

impl Cli {
    /// Build the pipeline configuration from the parsed arguments.
    ///
    /// # Examples
    ///
    /// ```
    /// use clap::Parser;
    /// use dejavu_gen::cli::Cli;
    /// use dejavu_gen::pipeline::CollisionPolicy;
    ///
    /// let cli = Cli::parse_from(["dejavu-gen", "--src", "fonts.zip", "--deny-collisions"]);
    /// let config = cli.generation_config();
    /// assert_eq!(config.source.to_string(), "fonts.zip");
    /// assert_eq!(config.collisions, CollisionPolicy::Deny);
    /// ```
    #[must_use]
    pub fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            source: self.src.clone(),
            out_dir: self.out_dir.clone(),
            family: self.family.clone(),
            expected_sha256: self.sha256.clone(),
            write_manifest: self.manifest,
            collisions: if self.deny_collisions {
                CollisionPolicy::Deny
            } else {
                CollisionPolicy::Overwrite
            },
        }
    }

    /// The log level selected by `-v` and `-q`.
    #[must_use]
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbosity {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
