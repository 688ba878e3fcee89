//! File downloads with manual redirect handling.

use std::path::{Path, PathBuf};

use url::Url;

use super::{FetchError, HttpClient, HttpRequest, HttpResponse};

/// Maximum number of redirects followed before giving up.
pub const MAX_REDIRECTS: u32 = 5;

/// Downloads a URL to a local file.
///
/// # Redirects
///
/// Redirects (301, 302, 303, 307, 308) are followed up to [`MAX_REDIRECTS`]
/// times. A relative `Location` is resolved against the URL that returned it.
/// Only the initial request carries the caller's headers; follow-up requests
/// are plain GETs, so credentials are never forwarded to the redirect target.
///
/// # Atomic Writes
///
/// The body is written to `{dest}.tmp` and renamed to `dest`, so `dest` is
/// either complete or absent.
#[derive(Debug, Clone)]
pub struct Downloader<H> {
    client: H,
}

enum Step {
    Done(Vec<u8>),
    Redirect(Url),
}

impl<H: HttpClient> Downloader<H> {
    /// Creates a downloader using the given HTTP client.
    #[must_use]
    pub const fn new(client: H) -> Self {
        Self { client }
    }

    /// Downloads `request` into `dest`, returning the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the transport fails, the final status is
    /// not 200, a redirect is malformed, the redirect limit is exceeded, the
    /// body is empty, or the file cannot be written.
    pub async fn download(&self, request: HttpRequest, dest: &Path) -> Result<u64, FetchError> {
        let mut request = request;
        for _ in 0..=MAX_REDIRECTS {
            let url = request.url.clone();
            let response = self.client.request(request).await?;
            match next_step(&url, response)? {
                Step::Done(body) => return save_atomically(dest, &body).await,
                Step::Redirect(next) => {
                    tracing::debug!(
                        "Following redirect to {}",
                        next.origin().ascii_serialization()
                    );
                    request = HttpRequest::get(next);
                }
            }
        }
        Err(FetchError::TooManyRedirects {
            limit: MAX_REDIRECTS,
        })
    }
}

fn next_step(current: &Url, response: HttpResponse) -> Result<Step, FetchError> {
    if response.status == http::StatusCode::OK {
        return Ok(Step::Done(response.body));
    }
    if !response.is_redirect() {
        return Err(FetchError::Status {
            status: response.status,
        });
    }
    let location = response.location().ok_or(FetchError::MissingLocation)?;
    current
        .join(location)
        .map(Step::Redirect)
        .map_err(|source| FetchError::InvalidRedirect {
            location: location.to_string(),
            source,
        })
}

async fn save_atomically(dest: &Path, body: &[u8]) -> Result<u64, FetchError> {
    if body.is_empty() {
        return Err(FetchError::EmptyBody);
    }

    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| FetchError::io(parent, e))?;
        }
    }

    // Append .tmp instead of replacing the extension (geo.mmdb -> geo.mmdb.tmp)
    let temp_path = PathBuf::from(format!("{}.tmp", dest.display()));

    if let Err(e) = tokio::fs::write(&temp_path, body).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(FetchError::io(&temp_path, e));
    }
    tokio::fs::rename(&temp_path, dest)
        .await
        .map_err(|e| FetchError::io(dest, e))?;

    Ok(u64::try_from(body.len()).unwrap_or(u64::MAX))
}
