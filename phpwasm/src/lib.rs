//! phpwasm - PHP WASM runtime fetcher for package manager hooks
//!
//! After a dependency install or update, this library resolves the installed
//! version of a package from the host's dependency snapshot and downloads the
//! matching release artifacts (`php-vrzno-web.mjs` and `php-vrzno-web.wasm`)
//! into the project.
//!
//! # Modules
//!
//! - [`package`]: dependency snapshot types and version resolution
//! - [`fetch`]: HTTP transport, URL template and artifact download
//! - [`progress`]: sinks for user-facing progress lines
//! - [`plugin`]: adapter between a host's plugin contract and the core
//! - [`config`]: user-level configuration file
//!
//! # Example
//!
//! ```ignore
//! use phpwasm::fetch::FetchConfig;
//! use phpwasm::package::InstalledPackage;
//! use phpwasm::plugin::{PhpWasmPlugin, Plugin, PluginEvent, ProjectContext};
//! use phpwasm::progress::TracingSink;
//!
//! let plugin = PhpWasmPlugin::new(FetchConfig::default())?;
//! let ctx = ProjectContext::new("/srv/app")
//!     .with_root_name("syntaxx/php-wasm")
//!     .with_package(InstalledPackage::new("syntaxx/php-wasm", "v0.0.9"));
//!
//! plugin.handle(PluginEvent::PostInstallCmd, &ctx, &TracingSink)?;
//! ```

pub mod config;
pub mod error;
pub mod fetch;
pub mod package;
pub mod plugin;
pub mod progress;

pub use error::{Error, Result};
