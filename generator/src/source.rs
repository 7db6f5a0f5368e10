//! Resolution of the archive source into an open ZIP handle.
//!
//! A source is either a remote `http(s)://` URL, which is downloaded into the
//! run's temporary directory first, or a local path that is opened in place.

use crate::digest::Sha256Digest;
use crate::error::{GenError, Result};
use crate::fetch::ArchiveFetcher;
use camino::Utf8PathBuf;
use log::{debug, info};
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use zip::ZipArchive;

/// The upstream DejaVu release archive.
pub const DEFAULT_SOURCE: &str = "https://github.com/dejavu-fonts/dejavu-fonts/releases/download/version_2_37/dejavu-fonts-ttf-2.37.zip";

/// Filename used for the downloaded archive inside the temporary directory.
const DOWNLOAD_NAME: &str = "fonts.zip";

/// URL prefixes that select a remote download.
const REMOTE_PREFIXES: [&str; 2] = ["http://", "https://"];

/// An open font archive backed by a file.
pub type FontArchive = ZipArchive<File>;

/// Where the font archive comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveSource {
    /// An `http://` or `https://` URL.
    Remote(String),
    /// A path on the local filesystem.
    Local(Utf8PathBuf),
}

impl ArchiveSource {
    /// Classify a source string by its prefix.
    ///
    /// # Examples
    ///
    /// ```
    /// use dejavu_gen::source::ArchiveSource;
    ///
    /// assert!(matches!(
    ///     ArchiveSource::parse("https://example.test/fonts.zip"),
    ///     ArchiveSource::Remote(_)
    /// ));
    /// assert!(matches!(
    ///     ArchiveSource::parse("fonts.zip"),
    ///     ArchiveSource::Local(_)
    /// ));
    /// ```
    #[must_use]
    pub fn parse(source: &str) -> Self {
        if REMOTE_PREFIXES
            .iter()
            .any(|prefix| source.starts_with(prefix))
        {
            Self::Remote(source.to_owned())
        } else {
            Self::Local(Utf8PathBuf::from(source))
        }
    }
}

impl Default for ArchiveSource {
    fn default() -> Self {
        Self::Remote(DEFAULT_SOURCE.to_owned())
    }
}

impl FromStr for ArchiveSource {
    type Err = std::convert::Infallible;

    fn from_str(source: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(source))
    }
}

impl fmt::Display for ArchiveSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => write!(f, "{url}"),
            Self::Local(path) => write!(f, "{path}"),
        }
    }
}

/// Resolve `source` into an open archive.
///
/// Remote sources are downloaded into `temp_dir` with `fetcher`. When
/// `expected` is set, the archive bytes are checked against it before the
/// archive is opened.
///
/// # Errors
///
/// Returns [`GenError::Fetch`] if the download fails,
/// [`GenError::ChecksumMismatch`] if the digest differs, and
/// [`GenError::Open`] if the file is missing or not a ZIP archive.
pub fn open_archive(
    source: &ArchiveSource,
    temp_dir: &Path,
    fetcher: &dyn ArchiveFetcher,
    expected: Option<&Sha256Digest>,
) -> Result<FontArchive> {
    let path = match source {
        ArchiveSource::Remote(url) => {
            let dest = temp_dir.join(DOWNLOAD_NAME);
            info!("downloading {url}...");
            fetcher.fetch(url, &dest)?;
            dest
        }
        ArchiveSource::Local(path) => PathBuf::from(path.as_std_path()),
    };

    if let Some(expected) = expected {
        verify_checksum(source, &path, expected)?;
    }

    let file = File::open(&path).map_err(|e| GenError::Open {
        location: source.to_string(),
        reason: e.to_string(),
    })?;
    let archive = ZipArchive::new(file).map_err(|e| GenError::Open {
        location: source.to_string(),
        reason: e.to_string(),
    })?;
    debug!("opened {source} with {} entries", archive.len());
    Ok(archive)
}

fn verify_checksum(source: &ArchiveSource, path: &Path, expected: &Sha256Digest) -> Result<()> {
    let actual = Sha256Digest::of_file(path).map_err(|e| GenError::Open {
        location: source.to_string(),
        reason: e.to_string(),
    })?;
    if actual != *expected {
        return Err(GenError::ChecksumMismatch {
            location: source.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    }
    debug!("checksum verified for {source}");
    Ok(())
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
