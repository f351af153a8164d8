//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use phpwasm::fetch::{FetchConfig, HttpResponse, HttpTransport, TransportError};

/// Mock transport answering per URL; unknown URLs get a 404.
#[derive(Default)]
pub struct MockTransport {
    routes: HashMap<String, Result<HttpResponse, TransportError>>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok(self, url: &str, body: &[u8]) -> Self {
        self.route(url, Ok(HttpResponse::new(200, body.to_vec())))
    }

    pub fn status(self, url: &str, status: u16, body: &str) -> Self {
        self.route(url, Ok(HttpResponse::new(status, body.as_bytes().to_vec())))
    }

    pub fn fail(self, url: &str, error: TransportError) -> Self {
        self.route(url, Err(error))
    }

    fn route(mut self, url: &str, response: Result<HttpResponse, TransportError>) -> Self {
        self.routes.insert(url.to_string(), response);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpTransport for MockTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.routes
            .get(url)
            .cloned()
            .unwrap_or_else(|| Ok(HttpResponse::new(404, b"Not Found".to_vec())))
    }
}

pub const SCRIPT_URL: &str = "https://releases.test/download/v1.2.3/php-vrzno-web.mjs";
pub const BINARY_URL: &str = "https://releases.test/download/v1.2.3/php-vrzno-web.wasm";

/// Same artifact table as the defaults, pointed at a test host.
pub fn test_config() -> FetchConfig {
    FetchConfig::new("https://releases.test/download/v{version}/php-vrzno-web.{kind}")
        .with_artifact("mjs", "php-vrzno-web.mjs")
        .with_artifact("wasm", "php-vrzno-web.wasm")
}

/// Sorted file names in `dir`.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
