//! Tests for the GCS and `MaxMind` sources.

use http::header::AUTHORIZATION;
use tempfile::tempdir;
use url::Url;

use super::test_fixtures::{MockClient, database_bytes, ok, redirect, status, tar_gz};
use super::{FetchError, GcsBaseline, GcsObject, MaxMindSource};

fn location() -> GcsObject {
    GcsObject::new("geo-bucket", "geolite2/GeoLite2-Country.mmdb")
}

fn header<'a>(req: &'a super::HttpRequest, name: &str) -> Option<&'a str> {
    req.headers.get(name).and_then(|v| v.to_str().ok())
}

mod gcs {
    use super::*;

    #[test]
    fn object_displays_as_gs_uri() {
        assert_eq!(
            location().to_string(),
            "gs://geo-bucket/geolite2/GeoLite2-Country.mmdb"
        );
    }

    #[test]
    fn media_url_encodes_object_name() {
        let client = MockClient::new(vec![]);
        let source = GcsBaseline::new(&client, location()).unwrap();

        assert_eq!(
            source.media_url().unwrap().as_str(),
            "https://storage.googleapis.com/storage/v1/b/geo-bucket/o/geolite2%2FGeoLite2-Country.mmdb?alt=media"
        );
    }

    #[test]
    fn custom_endpoint_with_trailing_slash() {
        let client = MockClient::new(vec![]);
        let endpoint = Url::parse("http://localhost:4443/").unwrap();
        let source = GcsBaseline::with_endpoint(&client, location(), endpoint);

        assert_eq!(
            source.media_url().unwrap().as_str(),
            "http://localhost:4443/storage/v1/b/geo-bucket/o/geolite2%2FGeoLite2-Country.mmdb?alt=media"
        );
    }

    #[tokio::test]
    async fn fetch_sends_token_and_project() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("old.mmdb");
        let client = MockClient::new(vec![ok(database_bytes())]);
        let source = GcsBaseline::new(&client, location())
            .unwrap()
            .with_access_token(Some("ya29.token".to_string()))
            .with_project_id(Some("my-project".to_string()));

        let size = source.fetch_to(&dest).await.unwrap();

        assert_eq!(size, database_bytes().len() as u64);
        let requests = client.captured_requests();
        assert_eq!(header(&requests[0], "authorization"), Some("Bearer ya29.token"));
        assert_eq!(header(&requests[0], "x-goog-user-project"), Some("my-project"));
    }

    #[tokio::test]
    async fn anonymous_fetch_has_no_credentials() {
        let dir = tempdir().unwrap();
        let client = MockClient::new(vec![ok(database_bytes())]);
        let source = GcsBaseline::new(&client, location()).unwrap();

        source.fetch_to(&dir.path().join("old.mmdb")).await.unwrap();

        let requests = client.captured_requests();
        assert!(!requests[0].headers.contains_key(AUTHORIZATION));
        assert!(!requests[0].headers.contains_key("x-goog-user-project"));
    }

    #[tokio::test]
    async fn small_download_fails_validation() {
        let dir = tempdir().unwrap();
        let client = MockClient::new(vec![ok(b"not a database".to_vec())]);
        let source = GcsBaseline::new(&client, location()).unwrap();

        let err = source
            .fetch_to(&dir.path().join("old.mmdb"))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::InvalidFile { .. }));
    }

    #[tokio::test]
    async fn missing_object_is_status_error() {
        let dir = tempdir().unwrap();
        let client = MockClient::new(vec![status(404)]);
        let source = GcsBaseline::new(&client, location()).unwrap();

        let err = source
            .fetch_to(&dir.path().join("old.mmdb"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "HTTP 404 Not Found");
    }

    #[tokio::test]
    async fn invalid_project_id_is_rejected() {
        let dir = tempdir().unwrap();
        let client = MockClient::new(vec![]);
        let source = GcsBaseline::new(&client, location())
            .unwrap()
            .with_project_id(Some("bad\nproject".to_string()));

        let err = source
            .fetch_to(&dir.path().join("old.mmdb"))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Http(_)));
        assert_eq!(client.calls(), 0);
    }
}

mod maxmind {
    use super::*;

    #[test]
    fn download_url_carries_parameters() {
        let client = MockClient::new(vec![]);
        let source = MaxMindSource::new(&client, "secret-key").unwrap();

        assert_eq!(
            source.download_url().as_str(),
            "https://download.maxmind.com/app/geoip_download?edition_id=GeoLite2-Country&license_key=secret-key&suffix=tar.gz"
        );
    }

    #[test]
    fn redacted_url_hides_key() {
        let client = MockClient::new(vec![]);
        let source = MaxMindSource::new(&client, "secret-key")
            .unwrap()
            .with_account_id(Some("123456".to_string()));

        let redacted = source.redacted_url().to_string();

        assert!(!redacted.contains("secret-key"));
        assert!(redacted.contains("license_key=***"));
        assert!(redacted.contains("account_id=123456"));
    }

    #[test]
    fn label_names_edition() {
        let client = MockClient::new(vec![]);
        let source = MaxMindSource::new(&client, "k")
            .unwrap()
            .with_edition_id("GeoIP2-Country");

        assert_eq!(source.label(), "MaxMind GeoIP2-Country");
        assert!(source.download_url().as_str().contains("edition_id=GeoIP2-Country"));
    }

    #[tokio::test]
    async fn fetch_extracts_and_validates() {
        let dir = tempdir().unwrap();
        let archive = tar_gz(&[(
            "GeoLite2-Country_20240102/GeoLite2-Country.mmdb",
            &database_bytes(),
        )]);
        let client = MockClient::new(vec![
            redirect(302, "https://mm-prod-geoip-databases.example.com/db.tar.gz"),
            ok(archive),
        ]);
        let source = MaxMindSource::new(&client, "secret-key")
            .unwrap()
            .with_account_id(Some("123456".to_string()));
        let dest = dir.path().join("new.mmdb");

        let size = source.fetch_to(dir.path(), &dest).await.unwrap();

        assert_eq!(size, database_bytes().len() as u64);
        let requests = client.captured_requests();
        assert_eq!(
            header(&requests[0], "authorization"),
            Some("Basic MTIzNDU2OnNlY3JldC1rZXk=")
        );
        assert!(!requests[1].headers.contains_key(AUTHORIZATION));
    }

    #[tokio::test]
    async fn no_basic_auth_without_account() {
        let dir = tempdir().unwrap();
        let archive = tar_gz(&[("db/GeoLite2-Country.mmdb", &database_bytes())]);
        let client = MockClient::new(vec![ok(archive)]);
        let source = MaxMindSource::new(&client, "secret-key")
            .unwrap()
            .with_account_id(Some(String::new()));

        source
            .fetch_to(dir.path(), &dir.path().join("new.mmdb"))
            .await
            .unwrap();

        assert!(!client.captured_requests()[0].headers.contains_key(AUTHORIZATION));
    }

    #[tokio::test]
    async fn archive_without_database_fails() {
        let dir = tempdir().unwrap();
        let archive = tar_gz(&[("db/LICENSE.txt", b"license")]);
        let client = MockClient::new(vec![ok(archive)]);
        let source = MaxMindSource::new(&client, "secret-key").unwrap();

        let err = source
            .fetch_to(dir.path(), &dir.path().join("new.mmdb"))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::NotInArchive { .. }));
    }

    #[tokio::test]
    async fn unauthorized_key_fails() {
        let dir = tempdir().unwrap();
        let client = MockClient::new(vec![status(401)]);
        let source = MaxMindSource::new(&client, "wrong").unwrap();

        let err = source
            .fetch_to(dir.path(), &dir.path().join("new.mmdb"))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Status { .. }));
    }
}
