//! Acquisition of the two database files.
//!
//! This module provides:
//! - Abstract HTTP transport ([`HttpClient`], [`HttpRequest`], [`HttpResponse`])
//! - Production HTTP client ([`ReqwestClient`])
//! - Downloads with redirect handling and atomic writes ([`Downloader`])
//! - The baseline source on Google Cloud Storage ([`GcsBaseline`])
//! - The candidate source on the `MaxMind` download service ([`MaxMindSource`])
//! - Archive extraction ([`extract_database`]) and file validation
//!   ([`validate_database_file`])

mod archive;
mod client;
mod download;
mod error;
pub mod gcs;
mod http;
pub mod maxmind;
mod validate;

#[cfg(test)]
mod archive_tests;
#[cfg(test)]
mod sources_tests;
#[cfg(test)]
mod test_fixtures;

pub use archive::extract_database;
pub use client::ReqwestClient;
pub use download::{Downloader, MAX_REDIRECTS};
pub use error::{FetchError, HttpError};
pub use gcs::{GcsBaseline, GcsObject};
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use maxmind::MaxMindSource;
pub use validate::{MIN_VALID_SIZE, validate_database_file, validate_min_size};
