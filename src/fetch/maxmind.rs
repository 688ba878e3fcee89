//! Candidate database download from the `MaxMind` download service.

use std::path::{Path, PathBuf};

use url::Url;

use super::{
    Downloader, FetchError, HttpClient, HttpRequest, extract_database, validate_database_file,
};

/// `MaxMind` permalink download endpoint.
pub const DOWNLOAD_URL: &str = "https://download.maxmind.com/app/geoip_download";

/// Edition downloaded when none is configured.
pub const DEFAULT_EDITION_ID: &str = "GeoLite2-Country";

/// Extension of the database file inside the archive.
pub const DATABASE_EXTENSION: &str = "mmdb";

const ARCHIVE_NAME: &str = "geolite2.tar.gz";
const EXTRACT_DIR: &str = "maxmind_extract";
const REDACTED: &str = "***";

/// Downloads and unpacks a `MaxMind` database edition.
///
/// The license key travels in the query string; when an account id is set
/// the first request also carries HTTP Basic credentials.
#[derive(Debug)]
pub struct MaxMindSource<H> {
    downloader: Downloader<H>,
    base_url: Url,
    license_key: String,
    account_id: Option<String>,
    edition_id: String,
}

impl<H: HttpClient> MaxMindSource<H> {
    /// Creates a source for [`DEFAULT_EDITION_ID`] on the public endpoint.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in endpoint; the `Result` mirrors
    /// [`MaxMindSource::with_base_url`].
    pub fn new(client: H, license_key: impl Into<String>) -> Result<Self, FetchError> {
        let base_url = Url::parse(DOWNLOAD_URL)
            .map_err(|_| FetchError::InvalidEndpoint(DOWNLOAD_URL.to_string()))?;
        Ok(Self::with_base_url(client, license_key, base_url))
    }

    /// Creates a source against a custom download endpoint.
    #[must_use]
    pub fn with_base_url(client: H, license_key: impl Into<String>, base_url: Url) -> Self {
        Self {
            downloader: Downloader::new(client),
            base_url,
            license_key: license_key.into(),
            account_id: None,
            edition_id: DEFAULT_EDITION_ID.to_string(),
        }
    }

    /// Sets the account id. Empty strings are treated as unset.
    #[must_use]
    pub fn with_account_id(mut self, account_id: Option<String>) -> Self {
        self.account_id = account_id.filter(|id| !id.is_empty());
        self
    }

    /// Sets the edition to download.
    #[must_use]
    pub fn with_edition_id(mut self, edition_id: impl Into<String>) -> Self {
        self.edition_id = edition_id.into();
        self
    }

    /// Human-readable label for reports, e.g. `MaxMind GeoLite2-Country`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("MaxMind {}", self.edition_id)
    }

    /// Full download URL, including the license key.
    #[must_use]
    pub fn download_url(&self) -> Url {
        self.url_with_key(&self.license_key)
    }

    /// Download URL with the license key masked, safe for logging.
    #[must_use]
    pub fn redacted_url(&self) -> Url {
        self.url_with_key(REDACTED)
    }

    fn url_with_key(&self, key: &str) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("edition_id", &self.edition_id)
                .append_pair("license_key", key)
                .append_pair("suffix", "tar.gz");
            if let Some(account_id) = &self.account_id {
                query.append_pair("account_id", account_id);
            }
        }
        url
    }

    /// Downloads the archive into `workdir`, extracts the database, copies it
    /// to `dest` and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if any step fails.
    pub async fn fetch_to(&self, workdir: &Path, dest: &Path) -> Result<u64, FetchError> {
        tracing::info!("Downloading latest file from MaxMind: {}", self.redacted_url());

        let archive = workdir.join(ARCHIVE_NAME);
        self.downloader.download(self.build_request()?, &archive).await?;
        tracing::info!("MaxMind tar.gz download completed.");

        let extract_dir = workdir.join(EXTRACT_DIR);
        let output: PathBuf = dest.to_path_buf();
        tokio::task::spawn_blocking(move || {
            extract_database(&archive, &extract_dir, &output, DATABASE_EXTENSION)
        })
        .await??;

        validate_database_file(dest)
    }

    fn build_request(&self) -> Result<HttpRequest, FetchError> {
        let request = HttpRequest::get(self.download_url());
        match &self.account_id {
            Some(account_id) if !self.license_key.is_empty() => {
                Ok(request.with_basic_auth(account_id, &self.license_key)?)
            }
            _ => Ok(request),
        }
    }
}
