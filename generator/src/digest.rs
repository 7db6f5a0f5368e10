//! SHA-256 digests for archive verification and the package manifest.
//!
//! A [`Sha256Digest`] is always 64 lowercase hexadecimal characters, whether
//! it was typed on the command line or computed from bytes.

use sha2::{Digest, Sha256};
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Expected length of a hex-encoded SHA-256 digest.
const DIGEST_HEX_LEN: usize = 64;

/// Error returned when a digest string is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid SHA-256 digest: {reason}")]
pub struct DigestError {
    reason: String,
}

/// A validated hex-encoded SHA-256 digest string.
///
/// # Examples
///
/// ```
/// use dejavu_gen::digest::Sha256Digest;
///
/// let digest: Sha256Digest = "a".repeat(64).parse().unwrap();
/// assert_eq!(digest.as_str().len(), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sha256Digest(String);

impl Sha256Digest {
    /// Compute the digest of an in-memory buffer.
    #[must_use]
    pub fn of_bytes(data: &[u8]) -> Self {
        Self(format!("{:x}", Sha256::digest(data)))
    }

    /// Compute the digest of a file, reading it in chunks.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read.
    pub fn of_file(path: &Path) -> std::io::Result<Self> {
        let mut file = std::fs::File::open(path)?;
        let mut hasher = Sha256::new();
        let mut buffer = [0u8; 8192];
        loop {
            let bytes_read = file.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
        }
        Ok(Self(format!("{:x}", hasher.finalize())))
    }

    /// Return the digest as a hex string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Sha256Digest {
    type Err = DigestError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        validate_sha256(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for Sha256Digest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Validate that `value` is a well-formed hex-encoded SHA-256 digest.
fn validate_sha256(value: &str) -> Result<(), DigestError> {
    if value.len() != DIGEST_HEX_LEN {
        return Err(DigestError {
            reason: format!(
                "expected {DIGEST_HEX_LEN} hex characters, got {}",
                value.len()
            ),
        });
    }
    if let Some(bad) = value.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(DigestError {
            reason: format!("non-hex character '{bad}'"),
        });
    }
    if value.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(DigestError {
            reason: "digest must be lowercase".to_owned(),
        });
    }
    Ok(())
}
