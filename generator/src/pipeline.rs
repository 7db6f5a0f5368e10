//! Generation pipeline orchestration.
//!
//! A run moves through resolving the archive source, iterating its font
//! entries, and generating one package per entry. The first error ends the
//! run and is returned to the caller; packages written before it stay on
//! disk. The temporary directory is removed on every exit path when the
//! [`RunContext`] is dropped.

use std::collections::HashMap;

use camino::Utf8PathBuf;
use log::{debug, info, warn};
use tempfile::TempDir;

use crate::archive::{font_entries, read_entry};
use crate::digest::Sha256Digest;
use crate::error::{GenError, Result};
use crate::fetch::{ArchiveFetcher, HttpFetcher};
use crate::font_name::{FontNames, PackageName};
use crate::manifest::write_manifest;
use crate::package::{DEFAULT_FAMILY, PackageOutput, emit_package};
use crate::source::{ArchiveSource, open_archive};

/// Prefix of the per-run temporary directory.
const TEMP_DIR_PREFIX: &str = "dejavu-gen-";

/// What to do when two font files derive the same package identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Log a warning; the later package overwrites the earlier one.
    #[default]
    Overwrite,
    /// Fail the run before writing the second package.
    Deny,
}

/// Settings for one generation run.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Where the font archive comes from.
    pub source: ArchiveSource,
    /// Root directory receiving the packages.
    pub out_dir: Utf8PathBuf,
    /// Family name used in generated documentation.
    pub family: String,
    /// Digest the archive must match, if any.
    pub expected_sha256: Option<Sha256Digest>,
    /// Whether to write `fonts.json` after the packages.
    pub write_manifest: bool,
    /// Handling of identifier collisions.
    pub collisions: CollisionPolicy,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            source: ArchiveSource::default(),
            out_dir: Utf8PathBuf::from("."),
            family: DEFAULT_FAMILY.to_owned(),
            expected_sha256: None,
            write_manifest: false,
            collisions: CollisionPolicy::default(),
        }
    }
}

/// State owned by one run.
///
/// Dropping the context removes the temporary directory.
#[derive(Debug)]
pub struct RunContext<'a> {
    config: &'a GenerationConfig,
    temp_dir: TempDir,
}

impl<'a> RunContext<'a> {
    /// Create the context and its temporary directory.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::TempDir`] if the directory cannot be created.
    pub fn new(config: &'a GenerationConfig) -> Result<Self> {
        let temp_dir = tempfile::Builder::new()
            .prefix(TEMP_DIR_PREFIX)
            .tempdir()
            .map_err(|source| GenError::TempDir { source })?;
        debug!("using temporary directory {}", temp_dir.path().display());
        Ok(Self { config, temp_dir })
    }

    /// The run configuration.
    #[must_use]
    pub fn config(&self) -> &GenerationConfig {
        self.config
    }

    /// The per-run temporary directory.
    #[must_use]
    pub fn temp_dir(&self) -> &std::path::Path {
        self.temp_dir.path()
    }
}

/// Outcome of a successful run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Packages written, in archive order. A package overwritten by a later
    /// collision keeps its position and describes the last write.
    pub packages: Vec<PackageOutput>,
    /// Path of `fonts.json`, when it was requested.
    pub manifest: Option<Utf8PathBuf>,
}

impl RunSummary {
    fn record(&mut self, package: PackageOutput) {
        let existing = self
            .packages
            .iter_mut()
            .find(|written| written.names.package == package.names.package);
        match existing {
            Some(slot) => *slot = package,
            None => self.packages.push(package),
        }
    }
}

/// Run the pipeline with the production HTTP downloader.
///
/// # Errors
///
/// Returns the first error raised by any stage.
pub fn generate(config: &GenerationConfig) -> Result<RunSummary> {
    generate_with(config, &HttpFetcher)
}

/// Run the pipeline with an injected downloader.
///
/// # Errors
///
/// Returns the first error raised by any stage.
pub fn generate_with(config: &GenerationConfig, fetcher: &dyn ArchiveFetcher) -> Result<RunSummary> {
    let context = RunContext::new(config)?;

    debug!("resolving {}", config.source);
    let mut archive = open_archive(
        &config.source,
        context.temp_dir(),
        fetcher,
        config.expected_sha256.as_ref(),
    )?;

    debug!("iterating font entries");
    let entries = font_entries(&mut archive)?;
    ensure_out_dir(&context)?;

    let mut guard = CollisionGuard::new(config.collisions);
    let mut summary = RunSummary::default();
    for entry in entries {
        guard.claim(&entry.file_name)?;
        let data = read_entry(&mut archive, &entry)?;
        let package = emit_package(&config.out_dir, &entry.file_name, &data, &config.family)?;
        summary.record(package);
    }

    if config.write_manifest {
        let source = config.source.to_string();
        let path = write_manifest(&config.out_dir, &config.family, &source, &summary.packages)?;
        summary.manifest = Some(path);
    }

    info!(
        "generated {} font package(s) in {}",
        summary.packages.len(),
        config.out_dir
    );
    Ok(summary)
}

fn ensure_out_dir(context: &RunContext<'_>) -> Result<()> {
    let out_dir = &context.config().out_dir;
    std::fs::create_dir_all(out_dir).map_err(|source| GenError::DirCreate {
        path: out_dir.clone(),
        source,
    })
}

/// Tracks which font file claimed each package identifier.
struct CollisionGuard {
    policy: CollisionPolicy,
    claimed: HashMap<PackageName, String>,
}

impl CollisionGuard {
    fn new(policy: CollisionPolicy) -> Self {
        Self {
            policy,
            claimed: HashMap::new(),
        }
    }

    fn claim(&mut self, file_name: &str) -> Result<()> {
        let package = FontNames::derive(file_name).package;
        let Some(first) = self.claimed.get(&package) else {
            self.claimed.insert(package, file_name.to_owned());
            return Ok(());
        };

        match self.policy {
            CollisionPolicy::Deny => Err(GenError::NameCollision {
                package,
                first: first.clone(),
                second: file_name.to_owned(),
            }),
            CollisionPolicy::Overwrite => {
                warn!("{file_name:?} overwrites package {package} generated from {first:?}");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
