//! Dependency snapshot types and version resolution.
//!
//! The host package manager hands us an already-resolved list of installed
//! packages. This module models that snapshot and picks the version of one
//! package out of it.
//!
//! # Overview
//!
//! - **InstalledPackage**: one entry of the snapshot (name, raw version, requirements)
//! - **RequirementEntry**: a declared dependency, carried through untouched
//! - **NormalizedVersion**: release version derived from a raw version string
//! - **resolve**: single pass lookup of a package by exact name
//!
//! # Example
//!
//! ```
//! use phpwasm::package::{resolve, InstalledPackage};
//!
//! let packages = vec![InstalledPackage::new("syntaxx/php-wasm", "v1.2.3-beta.1")];
//! let version = resolve(&packages, "syntaxx/php-wasm").unwrap();
//!
//! assert_eq!(version.as_str(), "1.2.3");
//! ```

mod installed;
mod resolver;
mod version;

pub use installed::{InstalledPackage, RequirementEntry};
pub use resolver::{resolve, ResolveError};
pub use version::NormalizedVersion;
