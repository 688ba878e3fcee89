//! Shared fixtures for fetch tests.

use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use flate2::Compression;
use flate2::write::GzEncoder;
use http::header::LOCATION;
use http::{HeaderMap, HeaderValue, StatusCode};

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Mock HTTP client that returns a configured sequence of responses.
#[derive(Debug)]
pub struct MockClient {
    responses: Mutex<Vec<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
}

impl MockClient {
    pub fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);
        self.responses.lock().unwrap().remove(0)
    }
}

impl HttpClient for &MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).request(req).await
    }
}

pub fn ok(body: Vec<u8>) -> Result<HttpResponse, HttpError> {
    Ok(HttpResponse::new(StatusCode::OK, HeaderMap::new(), body))
}

pub fn status(code: u16) -> Result<HttpResponse, HttpError> {
    Ok(HttpResponse::new(
        StatusCode::from_u16(code).unwrap(),
        HeaderMap::new(),
        Vec::new(),
    ))
}

pub fn redirect(code: u16, location: &str) -> Result<HttpResponse, HttpError> {
    let mut headers = HeaderMap::new();
    headers.insert(LOCATION, HeaderValue::from_str(location).unwrap());
    Ok(HttpResponse::new(
        StatusCode::from_u16(code).unwrap(),
        headers,
        Vec::new(),
    ))
}

/// A body large enough to pass database file validation.
pub fn database_bytes() -> Vec<u8> {
    vec![0xAB; 1024 * 1024 + 16]
}

/// Builds an in-memory `.tar.gz` holding the given `(path, contents)` entries.
pub fn tar_gz(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::fast());
    let mut builder = tar::Builder::new(encoder);
    for (path, data) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, path, *data).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap()
}

/// Writes `bytes` to `path`, creating parent directories.
pub fn write_file(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let mut file = std::fs::File::create(path).unwrap();
    file.write_all(bytes).unwrap();
}
