//! Error types for acquiring database files.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for HTTP transport operations.
///
/// Describes what went wrong at the transport level; status codes are
/// interpreted by the caller.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// TLS errors and failures while reading the body.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built (invalid URL or header).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Error type for downloading, extracting and validating a database file.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure.
    #[error("Request failed: {0}")]
    Http(#[from] HttpError),

    /// The server answered with a status other than 200 or a redirect.
    #[error("HTTP {status}")]
    Status {
        /// Response status
        status: http::StatusCode,
    },

    /// A redirect response had no usable `Location` header.
    #[error("Redirect without location header")]
    MissingLocation,

    /// The `Location` header could not be resolved to a URL.
    #[error("Invalid redirect location '{location}': {source}")]
    InvalidRedirect {
        /// Raw header value
        location: String,
        /// Parse failure
        #[source]
        source: url::ParseError,
    },

    /// More redirects than allowed.
    #[error("Too many redirects (limit {limit})")]
    TooManyRedirects {
        /// Maximum number of redirects followed
        limit: u32,
    },

    /// The response body was empty.
    #[error("Downloaded file is empty")]
    EmptyBody,

    /// A URL could not be constructed from the configured endpoint.
    #[error("Invalid endpoint URL '{0}'")]
    InvalidEndpoint(String),

    /// Filesystem operation failed.
    #[error("File operation failed on '{}': {source}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The archive path does not look like a `.tar.gz` file.
    #[error("Invalid tar file path '{}'", path.display())]
    InvalidArchivePath {
        /// Rejected path
        path: PathBuf,
    },

    /// The archive is not valid gzip data.
    #[error("Corrupted tar.gz file '{}'", path.display())]
    CorruptArchive {
        /// Archive path
        path: PathBuf,
    },

    /// Unpacking the archive failed.
    #[error("Extraction failed: {source}")]
    Extract {
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// No file with the wanted extension exists in the unpacked archive.
    #[error("No .{extension} file found in archive")]
    NotInArchive {
        /// Extension searched for
        extension: String,
    },

    /// The file on disk failed validation.
    #[error("Invalid database file '{}': {reason}", path.display())]
    InvalidFile {
        /// File path
        path: PathBuf,
        /// Why the file was rejected
        reason: String,
    },

    /// A blocking background task panicked or was cancelled.
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl FetchError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
