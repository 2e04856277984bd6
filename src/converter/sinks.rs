//! Side effects applied to every finished conversion.
//!
//! Sinks are best-effort and independent: [`run_sinks`] calls each one in
//! order, logs any failure and carries on with the next.

use crate::clipboard;
use crate::error::Result;
use crate::model::ConvertResult;
use crate::store::ResultStore;
use colored::Colorize;
use tracing::{debug, warn};

pub trait ResultSink {
    fn name(&self) -> &str;
    fn handle(&mut self, result: &ConvertResult) -> Result<()>;
}

/// Copies the converted text to the system clipboard.
#[derive(Debug, Clone, Default)]
pub struct ClipboardSink {
    command: Option<String>,
}

impl ClipboardSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use this command line instead of the platform clipboard utility.
    pub fn with_command(mut self, command: Option<String>) -> Self {
        self.command = command;
        self
    }
}

impl ResultSink for ClipboardSink {
    fn name(&self) -> &str {
        "clipboard"
    }

    fn handle(&mut self, result: &ConvertResult) -> Result<()> {
        match &self.command {
            Some(cmd) => clipboard::copy_with_command(cmd, &result.result)?,
            None => clipboard::copy_to_clipboard(&result.result)?,
        }
        println!("{}", "Copied to clipboard!".green());
        Ok(())
    }
}

/// Appends every conversion to a result store.
pub struct FileSink<S: ResultStore> {
    store: S,
}

impl<S: ResultStore> FileSink<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: ResultStore> ResultSink for FileSink<S> {
    fn name(&self) -> &str {
        "file"
    }

    fn handle(&mut self, result: &ConvertResult) -> Result<()> {
        self.store.append(result)
    }
}

/// Runs every sink against `result`. Returns how many succeeded.
pub fn run_sinks(sinks: &mut [Box<dyn ResultSink>], result: &ConvertResult) -> usize {
    let mut succeeded = 0;
    for sink in sinks.iter_mut() {
        match sink.handle(result) {
            Ok(()) => {
                debug!(sink = sink.name(), "sink finished");
                succeeded += 1;
            }
            Err(e) => warn!(sink = sink.name(), error = %e, "sink failed"),
        }
    }
    succeeded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConverterError;
    use crate::paths::ConverterPaths;
    use crate::store::fs::JsonFileStore;
    use crate::store::memory::InMemoryStore;

    struct FailingSink;

    impl ResultSink for FailingSink {
        fn name(&self) -> &str {
            "failing"
        }

        fn handle(&mut self, _result: &ConvertResult) -> Result<()> {
            Err(ConverterError::Clipboard("pbcopy not found".into()))
        }
    }

    #[test]
    fn test_file_sink_appends() {
        let mut sink = FileSink::new(InMemoryStore::new());
        sink.handle(&ConvertResult::new("a", "A", 1)).unwrap();
        sink.handle(&ConvertResult::new("b", "B", 1)).unwrap();
        assert_eq!(sink.store().len(), 2);
    }

    #[test]
    fn test_failing_clipboard_does_not_block_file_sink() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ConverterPaths::new(dir.path());
        let mut sinks: Vec<Box<dyn ResultSink>> = vec![
            Box::new(ClipboardSink::new().with_command(Some("no-such-clipboard-tool".into()))),
            Box::new(FileSink::new(JsonFileStore::new(paths.clone()))),
        ];

        let ok = run_sinks(&mut sinks, &ConvertResult::new("helo", "Hello", 1));

        assert_eq!(ok, 1);
        let stored = JsonFileStore::new(paths).list(1).unwrap();
        assert_eq!(stored, vec![ConvertResult::new("helo", "Hello", 1)]);
    }

    #[test]
    fn test_sinks_after_a_failure_still_run() {
        let mut sinks: Vec<Box<dyn ResultSink>> = vec![
            Box::new(FailingSink),
            Box::new(FileSink::new(InMemoryStore::new())),
            Box::new(FailingSink),
        ];
        assert_eq!(run_sinks(&mut sinks, &ConvertResult::new("x", "y", 1)), 1);
    }
}
