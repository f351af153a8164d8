//! Progress and diagnostic reporting.
//!
//! The core never prints. It reports through a [`ProgressSink`] supplied by
//! the host so output can be redirected or captured.

use std::cell::RefCell;

use tracing::{error, info};

use crate::fetch::WrittenFile;

/// Destination for user-facing progress and error lines.
pub trait ProgressSink {
    /// Write an informational line.
    fn info(&self, message: &str);

    /// Write an error line.
    fn error(&self, message: &str);

    /// Report a file that was just written.
    fn written(&self, file: &WrittenFile) {
        self.info(&format!(
            "Downloaded {} to {} ({} bytes)",
            file.filename(),
            file.path.display(),
            file.bytes
        ));
    }
}

/// Sink that forwards lines to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn info(&self, message: &str) {
        info!("{}", message);
    }

    fn error(&self, message: &str) {
        error!("{}", message);
    }
}

/// A captured sink line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkLine {
    Info(String),
    Error(String),
}

/// Sink that keeps every line in memory.
///
/// Useful for hosts that render output themselves and for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: RefCell<Vec<SinkLine>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured lines in order.
    pub fn lines(&self) -> Vec<SinkLine> {
        self.lines.borrow().clone()
    }

    /// Captured informational lines.
    pub fn infos(&self) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter_map(|line| match line {
                SinkLine::Info(message) => Some(message.clone()),
                SinkLine::Error(_) => None,
            })
            .collect()
    }

    /// Captured error lines.
    pub fn errors(&self) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter_map(|line| match line {
                SinkLine::Error(message) => Some(message.clone()),
                SinkLine::Info(_) => None,
            })
            .collect()
    }
}

impl ProgressSink for MemorySink {
    fn info(&self, message: &str) {
        self.lines
            .borrow_mut()
            .push(SinkLine::Info(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.lines
            .borrow_mut()
            .push(SinkLine::Error(message.to_string()));
    }
}
