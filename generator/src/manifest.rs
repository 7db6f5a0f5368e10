//! The optional `fonts.json` index of generated packages.

use crate::digest::Sha256Digest;
use crate::error::{GenError, Result};
use crate::package::{PackageOutput, write_file};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;

/// Filename of the manifest inside the output root.
pub const MANIFEST_FILE_NAME: &str = "fonts.json";

/// Serialized form of the manifest.
#[derive(Debug, Serialize)]
struct Manifest<'a> {
    family: &'a str,
    source: &'a str,
    fonts: Vec<ManifestEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct ManifestEntry<'a> {
    name: &'a str,
    package: &'a str,
    file: &'a str,
    size: u64,
    sha256: &'a Sha256Digest,
}

/// Render the manifest JSON for `packages`, in generation order.
///
/// # Errors
///
/// Returns [`GenError::Manifest`] if serialization fails.
pub fn render_manifest(family: &str, source: &str, packages: &[PackageOutput]) -> Result<String> {
    let manifest = Manifest {
        family,
        source,
        fonts: packages
            .iter()
            .map(|package| ManifestEntry {
                name: &package.names.display,
                package: package.names.package.as_str(),
                file: &package.file_name,
                size: package.size,
                sha256: &package.sha256,
            })
            .collect(),
    };
    let mut json = serde_json::to_string_pretty(&manifest).map_err(|e| GenError::Manifest {
        reason: e.to_string(),
    })?;
    json.push('\n');
    Ok(json)
}

/// Write `fonts.json` into `out_dir` and return its path.
///
/// # Errors
///
/// Returns [`GenError::Manifest`] if serialization fails or
/// [`GenError::Write`] if the file cannot be written.
pub fn write_manifest(
    out_dir: &Utf8Path,
    family: &str,
    source: &str,
    packages: &[PackageOutput],
) -> Result<Utf8PathBuf> {
    let json = render_manifest(family, source, packages)?;
    let path = out_dir.join(MANIFEST_FILE_NAME);
    write_file(&path, json.as_bytes())?;
    Ok(path)
}
