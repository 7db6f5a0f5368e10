//! Name derivation for generated font packages.
//!
//! A font file such as `DejaVu-Sans-Bold.ttf` yields a display name
//! (`DejaVu Sans Bold`) used in documentation and a package identifier
//! (`dejavusansbold`) used as the directory and module name.

use std::fmt;

/// Suffix selecting font files inside the archive. Matching is case-sensitive.
pub const FONT_SUFFIX: &str = ".ttf";

/// A package identifier derived from a font filename.
///
/// The identifier is not validated here. Inputs outside the
/// `Words-With-Hyphens.ttf` convention can produce identifiers that are not
/// valid Rust; the emitter rejects those when it checks the rendered stub.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageName(String);

impl PackageName {
    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PackageName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for PackageName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The pair of names derived from one font filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontNames {
    /// Human-readable font name, e.g. `DejaVu Sans Bold`.
    pub display: String,
    /// Package identifier, e.g. `dejavusansbold`.
    pub package: PackageName,
}

impl FontNames {
    /// Derive both names from a font filename.
    ///
    /// # Examples
    ///
    /// ```
    /// use dejavu_gen::font_name::FontNames;
    ///
    /// let names = FontNames::derive("DejaVu-Sans-Bold.ttf");
    /// assert_eq!(names.display, "DejaVu Sans Bold");
    /// assert_eq!(names.package.as_str(), "dejavusansbold");
    /// ```
    #[must_use]
    pub fn derive(file_name: &str) -> Self {
        Self {
            display: display_name(file_name),
            package: package_name(file_name),
        }
    }
}

/// Maps `DejaVu-Sans-Bold.ttf` to `DejaVu Sans Bold`.
#[must_use]
pub fn display_name(file_name: &str) -> String {
    font_stem(file_name).replace('-', " ")
}

/// Maps `DejaVu-Sans-Bold.ttf` to `dejavusansbold`.
#[must_use]
pub fn package_name(file_name: &str) -> PackageName {
    let identifier: String = font_stem(file_name)
        .chars()
        .filter(|character| *character != '-')
        .flat_map(char::to_lowercase)
        .collect();
    PackageName(identifier)
}

/// Returns true when `name` ends with the exact font suffix.
#[must_use]
pub fn has_font_suffix(name: &str) -> bool {
    name.ends_with(FONT_SUFFIX)
}

fn font_stem(file_name: &str) -> &str {
    file_name.strip_suffix(FONT_SUFFIX).unwrap_or(file_name)
}
