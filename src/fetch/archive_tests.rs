//! Tests for archive extraction and file validation.

use std::path::Path;

use tempfile::tempdir;

use super::test_fixtures::{tar_gz, write_file};
use super::{
    FetchError, MIN_VALID_SIZE, extract_database, validate_database_file, validate_min_size,
};

mod extraction {
    use super::*;

    #[test]
    fn copies_nested_database() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("geolite2.tar.gz");
        write_file(
            &archive,
            &tar_gz(&[
                ("GeoLite2-Country_20240102/COPYRIGHT.txt", b"(c)"),
                ("GeoLite2-Country_20240102/GeoLite2-Country.mmdb", b"mmdb-bytes"),
            ]),
        );
        let output = dir.path().join("out/new.mmdb");

        let found = extract_database(&archive, &dir.path().join("extract"), &output, "mmdb")
            .unwrap();

        assert!(found.ends_with("GeoLite2-Country_20240102/GeoLite2-Country.mmdb"));
        assert_eq!(std::fs::read(&output).unwrap(), b"mmdb-bytes");
    }

    #[test]
    fn picks_first_match_in_name_order() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("multi.tar.gz");
        write_file(
            &archive,
            &tar_gz(&[("b/second.mmdb", b"second"), ("a/first.mmdb", b"first")]),
        );
        let output = dir.path().join("out.mmdb");

        extract_database(&archive, &dir.path().join("extract"), &output, "mmdb").unwrap();

        assert_eq!(std::fs::read(&output).unwrap(), b"first");
    }

    #[test]
    fn missing_database_is_reported() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("geolite2.tar.gz");
        write_file(&archive, &tar_gz(&[("README.txt", b"nothing here")]));

        let err = extract_database(
            &archive,
            &dir.path().join("extract"),
            &dir.path().join("out.mmdb"),
            "mmdb",
        )
        .unwrap_err();

        assert!(matches!(err, FetchError::NotInArchive { ref extension } if extension == "mmdb"));
        assert_eq!(err.to_string(), "No .mmdb file found in archive");
    }

    #[test]
    fn non_gzip_data_is_corrupt() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("broken.tar.gz");
        write_file(&archive, b"<html>not an archive</html>");

        let err = extract_database(
            &archive,
            &dir.path().join("extract"),
            &dir.path().join("out.mmdb"),
            "mmdb",
        )
        .unwrap_err();

        assert!(matches!(err, FetchError::CorruptArchive { .. }));
    }

    #[test]
    fn rejects_suspicious_archive_path() {
        let dir = tempdir().unwrap();

        for name in ["db.tar.gz; rm -rf", "db.zip", "db$(x).tar.gz", "db tar.tar.gz"] {
            let err = extract_database(
                &dir.path().join(name),
                &dir.path().join("extract"),
                &dir.path().join("out.mmdb"),
                "mmdb",
            )
            .unwrap_err();
            assert!(
                matches!(err, FetchError::InvalidArchivePath { .. }),
                "expected {name} to be rejected"
            );
        }
    }

    #[test]
    fn missing_archive_is_io_error() {
        let dir = tempdir().unwrap();

        let err = extract_database(
            &dir.path().join("absent.tar.gz"),
            &dir.path().join("extract"),
            &dir.path().join("out.mmdb"),
            "mmdb",
        )
        .unwrap_err();

        assert!(matches!(err, FetchError::Io { .. }));
    }
}

mod validation {
    use super::*;

    fn reason(err: &FetchError) -> &str {
        match err {
            FetchError::InvalidFile { reason, .. } => reason,
            other => panic!("expected InvalidFile, got {other:?}"),
        }
    }

    #[test]
    fn accepts_file_at_minimum_size() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ok.mmdb");
        write_file(&path, &vec![1; usize::try_from(MIN_VALID_SIZE).unwrap()]);

        assert_eq!(validate_database_file(&path).unwrap(), MIN_VALID_SIZE);
    }

    #[test]
    fn rejects_small_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("small.mmdb");
        write_file(&path, b"tiny");

        let err = validate_database_file(&path).unwrap_err();

        assert!(reason(&err).starts_with("size too small (4 bytes"));
    }

    #[test]
    fn rejects_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.mmdb");
        write_file(&path, b"");

        let err = validate_min_size(&path, 0).unwrap_err();

        assert_eq!(reason(&err), "file is empty");
    }

    #[test]
    fn rejects_directory() {
        let dir = tempdir().unwrap();

        let err = validate_min_size(dir.path(), 1).unwrap_err();

        assert_eq!(reason(&err), "not a regular file");
    }

    #[test]
    fn rejects_missing_file() {
        let err = validate_database_file(Path::new("/nonexistent/geo.mmdb")).unwrap_err();

        assert!(reason(&err).starts_with("cannot stat"));
    }

    #[test]
    fn custom_minimum() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("f.mmdb");
        write_file(&path, b"0123456789");

        assert_eq!(validate_min_size(&path, 10).unwrap(), 10);
        assert!(validate_min_size(&path, 11).is_err());
    }
}
