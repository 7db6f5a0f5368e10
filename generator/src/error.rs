//! Error types for the font package generator.
//!
//! Every failure in the pipeline maps to one [`GenError`] variant that names
//! the file, entry, or URL involved. Errors are never retried; the first one
//! ends the run.

use crate::fetch::FetchError;
use crate::font_name::PackageName;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while generating font packages.
#[derive(Debug, Error)]
pub enum GenError {
    /// The per-run temporary directory could not be created.
    #[error("could not create temporary directory")]
    TempDir {
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The remote archive could not be downloaded.
    #[error("could not fetch font archive")]
    Fetch(#[from] FetchError),

    /// The archive does not match the expected SHA-256 digest.
    #[error("checksum mismatch for {location}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// Path or URL of the archive.
        location: String,
        /// The digest requested on the command line.
        expected: String,
        /// The digest computed from the archive bytes.
        actual: String,
    },

    /// The archive is missing or is not a readable ZIP file.
    #[error("could not open font archive {location}: {reason}")]
    Open {
        /// Path or URL of the archive.
        location: String,
        /// Description of the failure.
        reason: String,
    },

    /// An archive entry could not be decompressed.
    #[error("could not decompress archive entry {entry}: {reason}")]
    Decompress {
        /// Full name of the entry inside the archive.
        entry: String,
        /// Description of the failure.
        reason: String,
    },

    /// A package directory could not be created.
    #[error("could not create package directory {path}")]
    DirCreate {
        /// Directory that could not be created.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The rendered `data.rs` stub is not valid Rust.
    #[error("generated source for package {package} is not valid Rust: {reason}")]
    Format {
        /// Identifier of the package being generated.
        package: PackageName,
        /// Parser diagnostic.
        reason: String,
    },

    /// A generated file could not be written.
    #[error("could not write {path}")]
    Write {
        /// File that could not be written.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Two font files derive the same package identifier.
    #[error("font files {first} and {second} both map to package {package}")]
    NameCollision {
        /// The shared package identifier.
        package: PackageName,
        /// Filename that claimed the identifier first.
        first: String,
        /// Filename that collided with it.
        second: String,
    },

    /// The package manifest could not be serialized.
    #[error("could not serialize package manifest: {reason}")]
    Manifest {
        /// Description of the serialization failure.
        reason: String,
    },
}

/// Result type alias using [`GenError`].
pub type Result<T> = std::result::Result<T, GenError>;

/// Render an error followed by each of its sources, separated by `": "`.
///
/// # Examples
///
/// ```
/// use camino::Utf8PathBuf;
/// use dejavu_gen::error::{GenError, error_chain};
///
/// let err = GenError::Write {
///     path: Utf8PathBuf::from("dejavusans/data.rs"),
///     source: std::io::Error::other("disk full"),
/// };
/// assert_eq!(error_chain(&err), "could not write dejavusans/data.rs: disk full");
/// ```
#[must_use]
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
