//! Baseline database download from Google Cloud Storage.

use std::fmt;
use std::path::Path;

use http::HeaderValue;
use http::header::HeaderName;
use url::Url;

use super::{
    Downloader, FetchError, HttpClient, HttpError, HttpRequest, validate_database_file,
};

/// Public GCS API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://storage.googleapis.com";

/// Header selecting the project billed for the request.
const USER_PROJECT: HeaderName = HeaderName::from_static("x-goog-user-project");

/// A `gs://bucket/object` location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GcsObject {
    /// Bucket name
    pub bucket: String,
    /// Object name, may contain `/`
    pub object: String,
}

impl GcsObject {
    /// Creates an object location.
    #[must_use]
    pub fn new(bucket: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            object: object.into(),
        }
    }
}

impl fmt::Display for GcsObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gs://{}/{}", self.bucket, self.object)
    }
}

/// Downloads the baseline database through the GCS JSON API media endpoint.
///
/// Authentication is an optional pre-issued OAuth access token
/// (e.g. `gcloud auth print-access-token`); without one only publicly
/// readable objects can be fetched.
#[derive(Debug)]
pub struct GcsBaseline<H> {
    downloader: Downloader<H>,
    location: GcsObject,
    endpoint: Url,
    access_token: Option<String>,
    project_id: Option<String>,
}

impl<H: HttpClient> GcsBaseline<H> {
    /// Creates a baseline source for `location` on the public endpoint.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in endpoint; the `Result` mirrors
    /// [`GcsBaseline::with_endpoint`].
    pub fn new(client: H, location: GcsObject) -> Result<Self, FetchError> {
        let endpoint = Url::parse(DEFAULT_ENDPOINT)
            .map_err(|_| FetchError::InvalidEndpoint(DEFAULT_ENDPOINT.to_string()))?;
        Ok(Self::with_endpoint(client, location, endpoint))
    }

    /// Creates a baseline source against a custom endpoint (emulators, tests).
    #[must_use]
    pub const fn with_endpoint(client: H, location: GcsObject, endpoint: Url) -> Self {
        Self {
            downloader: Downloader::new(client),
            location,
            endpoint,
            access_token: None,
            project_id: None,
        }
    }

    /// Sets the OAuth access token sent as a bearer token.
    #[must_use]
    pub fn with_access_token(mut self, token: Option<String>) -> Self {
        self.access_token = token;
        self
    }

    /// Sets the project billed for the request (`x-goog-user-project`).
    #[must_use]
    pub fn with_project_id(mut self, project_id: Option<String>) -> Self {
        self.project_id = project_id;
        self
    }

    /// The object being downloaded.
    #[must_use]
    pub const fn location(&self) -> &GcsObject {
        &self.location
    }

    /// Media download URL for the object.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidEndpoint`] if the endpoint cannot carry a path.
    pub fn media_url(&self) -> Result<Url, FetchError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| FetchError::InvalidEndpoint(self.endpoint.to_string()))?
            .pop_if_empty()
            .extend(["storage", "v1", "b", self.location.bucket.as_str(), "o"])
            .push(&self.location.object);
        url.query_pairs_mut().append_pair("alt", "media");
        Ok(url)
    }

    /// Downloads the object to `dest` and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the download fails or the file is invalid.
    pub async fn fetch_to(&self, dest: &Path) -> Result<u64, FetchError> {
        tracing::info!(
            "Downloading baseline file from GCS: {} -> {}",
            self.location,
            dest.display()
        );
        self.downloader.download(self.build_request()?, dest).await?;
        let size = validate_database_file(dest)?;
        tracing::info!("GCS baseline download completed ({size} bytes).");
        Ok(size)
    }

    fn build_request(&self) -> Result<HttpRequest, FetchError> {
        let mut request = HttpRequest::get(self.media_url()?);
        if let Some(token) = &self.access_token {
            request = request.with_bearer(token)?;
        }
        if let Some(project) = &self.project_id {
            let value = HeaderValue::from_str(project)
                .map_err(|_| HttpError::InvalidRequest(format!("invalid project id '{project}'")))?;
            request = request.with_header(USER_PROJECT, value);
        }
        Ok(request)
    }
}
