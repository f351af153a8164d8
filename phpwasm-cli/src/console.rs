//! Console progress sink.

use ::console::style;
use phpwasm::fetch::WrittenFile;
use phpwasm::progress::ProgressSink;

/// Writes progress to stdout and errors to stderr.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl ProgressSink for ConsoleSink {
    fn info(&self, message: &str) {
        println!("{}", message);
    }

    fn error(&self, message: &str) {
        eprintln!("{}", style(message).red());
    }

    fn written(&self, file: &WrittenFile) {
        println!(
            "{} {} to {} ({} bytes)",
            style("Downloaded").green(),
            file.filename(),
            file.path.display(),
            file.bytes
        );
    }
}
