//! Remote archive download.
//!
//! Provides a trait-based abstraction over the HTTP transfer of the font
//! archive so the pipeline can be exercised without network access.

use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

/// Network timeout for the whole archive transfer.
///
/// The DejaVu release archive is several megabytes, so this is generous.
const FETCH_TIMEOUT: Duration = Duration::from_secs(300);

/// Trait for downloading a remote archive to a local file.
///
/// # Examples
///
/// ```
/// use dejavu_gen::fetch::HttpFetcher;
///
/// let fetcher = HttpFetcher;
/// // Use fetcher.fetch(url, dest) in production
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait ArchiveFetcher {
    /// Download the resource at `url` into `dest`, replacing any content.
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer fails or the file cannot be written.
    fn fetch(&self, url: &str, dest: &Path) -> Result<(), FetchError>;
}

/// Errors arising from archive downloads.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("download failed for {url}: {reason}")]
    Http {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The server answered 404.
    #[error("archive not found: {url}")]
    NotFound {
        /// The URL that returned 404.
        url: String,
    },

    /// I/O error writing the downloaded file.
    #[error("I/O error writing download: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP downloader using `ureq`.
pub struct HttpFetcher;

impl ArchiveFetcher for HttpFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<(), FetchError> {
        let response = http_agent()
            .get(url)
            .call()
            .map_err(|e| map_ureq_error(url, &e))?;
        let mut file = std::fs::File::create(dest)?;
        std::io::copy(&mut response.into_body().as_reader(), &mut file).map_err(|e| {
            FetchError::Http {
                url: url.to_owned(),
                reason: e.to_string(),
            }
        })?;
        file.sync_all()?;
        Ok(())
    }
}

/// Shared `ureq` agent with request timeout configuration.
fn http_agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(FETCH_TIMEOUT))
            .build();
        ureq::Agent::new_with_config(config)
    })
}

/// Map a ureq error to a [`FetchError`].
fn map_ureq_error(url: &str, err: &ureq::Error) -> FetchError {
    match err {
        ureq::Error::StatusCode(404) => FetchError::NotFound {
            url: url.to_owned(),
        },
        other => FetchError::Http {
            url: url.to_owned(),
            reason: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn map_ureq_error_maps_404_to_not_found() {
        let err = ureq::Error::StatusCode(404);
        let mapped = map_ureq_error("https://example.test/fonts.zip", &err);
        assert!(matches!(mapped, FetchError::NotFound { .. }));
    }

    #[rstest]
    #[case::server_error(500)]
    #[case::forbidden(403)]
    fn map_ureq_error_maps_other_status_to_http_error(#[case] status: u16) {
        let err = ureq::Error::StatusCode(status);
        let mapped = map_ureq_error("https://example.test/fonts.zip", &err);
        match mapped {
            FetchError::Http { url, reason } => {
                assert_eq!(url, "https://example.test/fonts.zip");
                assert!(reason.contains(&status.to_string()), "reason: {reason}");
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[test]
    fn not_found_message_includes_url() {
        let err = FetchError::NotFound {
            url: "https://example.test/missing.zip".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "archive not found: https://example.test/missing.zip"
        );
    }
}
