//! Versioned release artifact fetching.
//!
//! This module turns a normalized version into files on disk:
//! - URL template and artifact table (`config`)
//! - HTTP transport trait and reqwest implementation (`http`)
//! - Sequential download and atomic write (`fetcher`)
//! - Typed failure classification (`error`)
//!
//! # Architecture
//!
//! ```text
//! ArtifactFetcher<T: HttpTransport>
//!         │
//!         ├── FetchConfig (template + ordered ArtifactSpec list)
//!         │
//!         ├── HttpTransport (trait)
//!         │       └── ReqwestTransport
//!         │
//!         └── ProgressSink (one line per written file or failure)
//! ```

mod config;
mod error;
mod fetcher;
mod http;

pub use config::{
    ArtifactSpec, FetchConfig, DEFAULT_TIMEOUT_SECS, DEFAULT_URL_TEMPLATE, DEFAULT_USER_AGENT,
    KIND_PLACEHOLDER, VERSION_PLACEHOLDER,
};
pub use error::{FetchError, FetchErrorKind, FetchResult, BODY_EXCERPT_LIMIT};
pub use fetcher::{ArtifactFetcher, WrittenFile};
pub use http::{HttpResponse, HttpTransport, ReqwestTransport, TransportError};
