//! Integration tests for the artifact fetcher.
//!
//! These tests drive `ArtifactFetcher` through a mock transport against a
//! real temporary directory:
//! - directory creation and exact file contents
//! - 404 and other HTTP failures
//! - abort-on-first-failure without rollback
//! - idempotent re-runs
//!
//! Run with: `cargo test --test fetch_integration`

mod common;

use std::fs;

use tempfile::TempDir;

use phpwasm::fetch::{ArtifactFetcher, FetchError, FetchErrorKind, TransportError};
use phpwasm::package::NormalizedVersion;
use phpwasm::progress::{MemorySink, SinkLine};

use common::{file_names, test_config, MockTransport, BINARY_URL, SCRIPT_URL};

const SCRIPT_BYTES: &[u8] = b"export default function loadPhp() {}\n";
const BINARY_BYTES: &[u8] = b"\0asm\x01\0\0\0payload";

fn version() -> NormalizedVersion {
    NormalizedVersion::new("v1.2.3-beta.7")
}

// ============================================================================
// Success paths
// ============================================================================

#[test]
fn test_fetch_creates_missing_directory_with_both_files() {
    let tmp = TempDir::new().unwrap();
    let target = tmp.path().join("public").join("wasm");
    assert!(!target.exists());

    let fetcher = ArtifactFetcher::new(
        MockTransport::new()
            .ok(SCRIPT_URL, SCRIPT_BYTES)
            .ok(BINARY_URL, BINARY_BYTES),
    );
    let sink = MemorySink::new();

    let files = fetcher
        .fetch(&version(), &test_config(), &target, &sink)
        .unwrap();

    assert!(target.is_dir());
    assert_eq!(
        file_names(&target),
        vec!["php-vrzno-web.mjs", "php-vrzno-web.wasm"]
    );
    assert_eq!(fs::read(target.join("php-vrzno-web.mjs")).unwrap(), SCRIPT_BYTES);
    assert_eq!(fs::read(target.join("php-vrzno-web.wasm")).unwrap(), BINARY_BYTES);

    assert_eq!(files.len(), 2);
    assert_eq!(files[0].path, target.join("php-vrzno-web.mjs"));
    assert_eq!(files[0].bytes, SCRIPT_BYTES.len() as u64);
    assert_eq!(files[1].bytes, BINARY_BYTES.len() as u64);
}

#[test]
fn test_fetch_reports_each_file_in_order() {
    let tmp = TempDir::new().unwrap();
    let fetcher = ArtifactFetcher::new(
        MockTransport::new()
            .ok(SCRIPT_URL, SCRIPT_BYTES)
            .ok(BINARY_URL, BINARY_BYTES),
    );
    let sink = MemorySink::new();

    fetcher
        .fetch(&version(), &test_config(), tmp.path(), &sink)
        .unwrap();

    let infos = sink.infos();
    assert_eq!(infos.len(), 2);
    assert!(infos[0].starts_with("Downloaded php-vrzno-web.mjs to "));
    assert!(infos[1].starts_with("Downloaded php-vrzno-web.wasm to "));
    assert!(infos[1].ends_with(&format!("({} bytes)", BINARY_BYTES.len())));
    assert!(sink.errors().is_empty());
}

#[test]
fn test_refetch_overwrites_existing_files() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("php-vrzno-web.mjs"), "stale script that is longer").unwrap();
    fs::write(tmp.path().join("php-vrzno-web.wasm"), "stale").unwrap();

    let fetcher = ArtifactFetcher::new(
        MockTransport::new()
            .ok(SCRIPT_URL, SCRIPT_BYTES)
            .ok(BINARY_URL, BINARY_BYTES),
    );

    for _ in 0..2 {
        fetcher
            .fetch(&version(), &test_config(), tmp.path(), &MemorySink::new())
            .unwrap();

        assert_eq!(
            file_names(tmp.path()),
            vec!["php-vrzno-web.mjs", "php-vrzno-web.wasm"]
        );
        assert_eq!(fs::read(tmp.path().join("php-vrzno-web.mjs")).unwrap(), SCRIPT_BYTES);
        assert_eq!(fs::read(tmp.path().join("php-vrzno-web.wasm")).unwrap(), BINARY_BYTES);
    }

    assert_eq!(fetcher.transport().requests().len(), 4);
}

// ============================================================================
// Failure paths
// ============================================================================

#[test]
fn test_not_found_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let fetcher = ArtifactFetcher::new(MockTransport::new());
    let sink = MemorySink::new();

    let err = fetcher
        .fetch(&version(), &test_config(), tmp.path(), &sink)
        .unwrap_err();

    assert_eq!(err.kind(), FetchErrorKind::NotFound);
    assert!(matches!(err, FetchError::NotFound { ref url } if url == SCRIPT_URL));
    assert!(file_names(tmp.path()).is_empty());
    assert_eq!(fetcher.transport().requests(), vec![SCRIPT_URL]);
    assert_eq!(sink.lines().len(), 1);
    assert!(matches!(&sink.lines()[0], SinkLine::Error(line) if line.contains("404")));
}

#[test]
fn test_second_transport_failure_keeps_first_file() {
    let tmp = TempDir::new().unwrap();
    let fetcher = ArtifactFetcher::new(
        MockTransport::new()
            .ok(SCRIPT_URL, SCRIPT_BYTES)
            .fail(BINARY_URL, TransportError::Connect("connection refused".to_string())),
    );
    let sink = MemorySink::new();

    let err = fetcher
        .fetch(&version(), &test_config(), tmp.path(), &sink)
        .unwrap_err();

    assert_eq!(err.kind(), FetchErrorKind::Network);
    assert_eq!(err.url(), Some(BINARY_URL));
    assert_eq!(file_names(tmp.path()), vec!["php-vrzno-web.mjs"]);
    assert_eq!(fs::read(tmp.path().join("php-vrzno-web.mjs")).unwrap(), SCRIPT_BYTES);

    assert_eq!(sink.infos().len(), 1);
    assert_eq!(sink.errors().len(), 1);
    assert!(sink.errors()[0].starts_with("Error downloading php-vrzno-web.wasm"));
}

#[test]
fn test_first_failure_skips_remaining_artifacts() {
    let tmp = TempDir::new().unwrap();
    let fetcher = ArtifactFetcher::new(
        MockTransport::new()
            .fail(SCRIPT_URL, TransportError::Timeout { timeout_secs: 5 })
            .ok(BINARY_URL, BINARY_BYTES),
    );

    let err = fetcher
        .fetch(&version(), &test_config(), tmp.path(), &MemorySink::new())
        .unwrap_err();

    assert!(matches!(
        err,
        FetchError::Network {
            source: TransportError::Timeout { timeout_secs: 5 },
            ..
        }
    ));
    assert_eq!(fetcher.transport().requests(), vec![SCRIPT_URL]);
    assert!(file_names(tmp.path()).is_empty());
}

#[test]
fn test_forbidden_is_http_error_with_excerpt() {
    let tmp = TempDir::new().unwrap();
    let fetcher = ArtifactFetcher::new(
        MockTransport::new()
            .ok(SCRIPT_URL, SCRIPT_BYTES)
            .status(BINARY_URL, 403, "rate limit exceeded"),
    );

    let err = fetcher
        .fetch(&version(), &test_config(), tmp.path(), &MemorySink::new())
        .unwrap_err();

    assert_eq!(err.kind(), FetchErrorKind::HttpError);
    match err {
        FetchError::Http {
            url,
            status,
            body_excerpt,
        } => {
            assert_eq!(url, BINARY_URL);
            assert_eq!(status, 403);
            assert_eq!(body_excerpt, "rate limit exceeded");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(file_names(tmp.path()), vec!["php-vrzno-web.mjs"]);
}

// ============================================================================
// Real transport against a local server
// ============================================================================

#[test]
fn test_reqwest_transport_downloads_release_and_maps_missing_binary() {
    use httpmock::prelude::*;
    use phpwasm::fetch::{FetchConfig, ReqwestTransport};

    let server = MockServer::start();
    let script = server.mock(|when, then| {
        when.method(GET)
            .path("/download/v1.2.3/php-vrzno-web.mjs")
            .header("user-agent", "Composer/1.0");
        then.status(200).body(SCRIPT_BYTES);
    });
    server.mock(|when, then| {
        when.method(GET).path("/download/v1.2.3/php-vrzno-web.wasm");
        then.status(404).body("Not Found");
    });

    let config = FetchConfig::new(server.url("/download/v{version}/php-vrzno-web.{kind}"))
        .with_artifact("mjs", "php-vrzno-web.mjs")
        .with_artifact("wasm", "php-vrzno-web.wasm");
    let fetcher = ArtifactFetcher::new(ReqwestTransport::new(&config).unwrap());
    let tmp = TempDir::new().unwrap();
    let sink = MemorySink::new();

    let err = fetcher
        .fetch(&version(), &config, tmp.path(), &sink)
        .unwrap_err();

    script.assert();
    assert_eq!(err.kind(), FetchErrorKind::NotFound);
    assert_eq!(
        fs::read(tmp.path().join("php-vrzno-web.mjs")).unwrap(),
        SCRIPT_BYTES
    );
    assert_eq!(file_names(tmp.path()), vec!["php-vrzno-web.mjs"]);
    assert_eq!(sink.errors().len(), 1);
}
