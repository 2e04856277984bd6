//! # Result Storage
//!
//! Every completed conversion is recorded as a [`ConvertResult`]. The
//! [`ResultStore`] trait hides where those records go so the file sink and
//! the command loop can be tested without touching the filesystem.
//!
//! ## Implementations
//!
//! - [`fs::JsonFileStore`]: production storage
//!   - One JSON array per file, rewritten on every append
//!   - Either one file per command id or one shared file ([`ResultLayout`])
//!
//! - [`memory::InMemoryStore`]: in-memory storage for testing
//!
//! ## Storage Format
//!
//! ```text
//! ~/.ai-converter/
//! ├── 1-convert-results.json   # ResultLayout::PerCommand
//! └── convert-result.json      # ResultLayout::Shared
//! ```
//!
//! Appends are read-modify-write with no locking. Two processes writing the
//! same file can lose an update.

use crate::error::Result;
use crate::model::ConvertResult;
use serde::{Deserialize, Serialize};

pub mod fs;
pub mod memory;

/// Which file a result is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResultLayout {
    /// `<commandID>-convert-results.json`
    #[default]
    PerCommand,
    /// `convert-result.json`, shared by every command
    Shared,
}

/// Abstract interface for the result log.
pub trait ResultStore {
    /// Append one record after all existing ones.
    fn append(&mut self, result: &ConvertResult) -> Result<()>;

    /// All records visible for a command, oldest first.
    fn list(&self, command_id: i64) -> Result<Vec<ConvertResult>>;
}
