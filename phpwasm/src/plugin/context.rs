//! What the host exposes to the plugin for one event.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::package::InstalledPackage;

/// Host-provided inputs for an install/update pass.
///
/// Implemented by host adapters; the core only reads through it.
pub trait HostContext {
    /// The resolved dependency snapshot.
    fn packages(&self) -> &[InstalledPackage];

    /// Name of the root project package, if it declares one.
    fn root_package_name(&self) -> Option<&str>;

    /// The key-value configuration bag (the project's `extra` object).
    fn extra(&self) -> &Value;

    /// Project root directory; relative settings resolve against it.
    fn project_root(&self) -> &Path;
}

/// An owned, in-memory [`HostContext`].
///
/// # Example
///
/// ```
/// use phpwasm::package::InstalledPackage;
/// use phpwasm::plugin::{HostContext, ProjectContext};
///
/// let ctx = ProjectContext::new("/srv/app")
///     .with_root_name("vendor/app")
///     .with_package(InstalledPackage::new("syntaxx/php-wasm", "v0.1.0"));
///
/// assert_eq!(ctx.packages().len(), 1);
/// assert_eq!(ctx.root_package_name(), Some("vendor/app"));
/// ```
#[derive(Debug, Clone)]
pub struct ProjectContext {
    root: PathBuf,
    root_name: Option<String>,
    packages: Vec<InstalledPackage>,
    extra: Value,
}

impl ProjectContext {
    /// Create an empty context rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            root_name: None,
            packages: Vec::new(),
            extra: Value::Object(Default::default()),
        }
    }

    /// Set the root package name.
    pub fn with_root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = Some(name.into());
        self
    }

    /// Append a package to the snapshot.
    pub fn with_package(mut self, package: InstalledPackage) -> Self {
        self.packages.push(package);
        self
    }

    /// Append several packages to the snapshot.
    pub fn with_packages(mut self, packages: impl IntoIterator<Item = InstalledPackage>) -> Self {
        self.packages.extend(packages);
        self
    }

    /// Replace the configuration bag.
    pub fn with_extra(mut self, extra: Value) -> Self {
        self.extra = extra;
        self
    }

    /// Mutable access to the configuration bag, for host-side overrides.
    pub fn extra_mut(&mut self) -> &mut Value {
        &mut self.extra
    }
}

impl HostContext for ProjectContext {
    fn packages(&self) -> &[InstalledPackage] {
        &self.packages
    }

    fn root_package_name(&self) -> Option<&str> {
        self.root_name.as_deref()
    }

    fn extra(&self) -> &Value {
        &self.extra
    }

    fn project_root(&self) -> &Path {
        &self.root
    }
}
