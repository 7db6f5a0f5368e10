//! Emission of per-font packages.
//!
//! Each package is a directory named after the derived identifier holding the
//! font file and a `data.rs` stub that embeds it:
//!
//! ```text
//! dejavusansbold/
//! ├── DejaVu-Sans-Bold.ttf
//! └── data.rs
//! ```
//!
//! Consumers pull a package in with `include!("dejavusansbold/data.rs")` and
//! read the font bytes from `dejavusansbold::TTF`.

use crate::digest::Sha256Digest;
use crate::error::{GenError, Result};
use crate::font_name::{FontNames, PackageName};
use camino::{Utf8Path, Utf8PathBuf};
use log::info;
use std::io::ErrorKind;

/// Filename of the generated stub inside each package directory.
pub const STUB_FILE_NAME: &str = "data.rs";

/// Family name used in generated documentation unless overridden.
pub const DEFAULT_FAMILY: &str = "DejaVu";

/// A package written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOutput {
    /// Names derived from the font filename.
    pub names: FontNames,
    /// Original font filename, also the payload filename.
    pub file_name: String,
    /// The package directory.
    pub dir: Utf8PathBuf,
    /// Size of the font payload in bytes.
    pub size: u64,
    /// Digest of the font payload.
    pub sha256: Sha256Digest,
}

/// Render the `data.rs` stub for a font.
///
/// # Examples
///
/// ```
/// use dejavu_gen::font_name::FontNames;
/// use dejavu_gen::package::render_stub;
///
/// let names = FontNames::derive("DejaVu-Serif.ttf");
/// let stub = render_stub(&names, "DejaVu-Serif.ttf", "DejaVu");
/// assert!(stub.contains("pub mod dejavuserif {"));
/// assert!(stub.contains(r#"include_bytes!("DejaVu-Serif.ttf")"#));
/// ```
#[must_use]
pub fn render_stub(names: &FontNames, ttf_name: &str, family: &str) -> String {
    let package = names.package.as_str();
    let font_name = single_line(&names.display);
    let family = single_line(family);
    let ttf_name = ttf_name.escape_default();
    format!(
        r#"// generated by dejavu-gen; DO NOT EDIT

/// Package {package} provides the "{font_name}" TrueType font
/// from the {family} font family.
pub mod {package} {{
    /// TTF is the data for the "{font_name}" TrueType font.
    pub static TTF: &[u8] = include_bytes!("{ttf_name}");
}}
"#
    )
}

/// Check that a rendered stub parses as a Rust source file.
///
/// # Errors
///
/// Returns [`GenError::Format`] with the parser diagnostic.
pub fn check_stub(package: &PackageName, source: &str) -> Result<()> {
    syn::parse_file(source)
        .map(drop)
        .map_err(|e| GenError::Format {
            package: package.clone(),
            reason: e.to_string(),
        })
}

/// Write the package for one font under `out_dir`.
///
/// Creates `out_dir/<package>` if needed, then writes `data.rs` followed by
/// the font bytes. Existing files are overwritten. A failure on the second
/// write leaves the first in place.
///
/// # Errors
///
/// Returns [`GenError::DirCreate`] if the directory cannot be created,
/// [`GenError::Format`] if the stub does not parse, and [`GenError::Write`]
/// if either file cannot be written.
pub fn emit_package(
    out_dir: &Utf8Path,
    ttf_name: &str,
    data: &[u8],
    family: &str,
) -> Result<PackageOutput> {
    let names = FontNames::derive(ttf_name);
    info!("generating fonts package for {ttf_name:?}...");

    let dir = out_dir.join(names.package.as_str());
    create_package_dir(&dir)?;

    let stub = render_stub(&names, ttf_name, family);
    check_stub(&names.package, &stub)?;

    write_file(&dir.join(STUB_FILE_NAME), stub.as_bytes())?;
    write_file(&dir.join(ttf_name), data)?;

    Ok(PackageOutput {
        names,
        file_name: ttf_name.to_owned(),
        dir,
        size: data.len() as u64,
        sha256: Sha256Digest::of_bytes(data),
    })
}

fn create_package_dir(dir: &Utf8Path) -> Result<()> {
    match std::fs::create_dir(dir) {
        Err(e) if e.kind() != ErrorKind::AlreadyExists => Err(GenError::DirCreate {
            path: dir.to_owned(),
            source: e,
        }),
        _ => Ok(()),
    }
}

pub(crate) fn write_file(path: &Utf8Path, contents: &[u8]) -> Result<()> {
    std::fs::write(path, contents).map_err(|e| GenError::Write {
        path: path.to_owned(),
        source: e,
    })
}

/// Doc comments end at a newline, so fold control characters into spaces.
fn single_line(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

#[cfg(test)]
#[path = "package_tests.rs"]
mod tests;
