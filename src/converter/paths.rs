//! Location of every file the tool reads or writes.
//!
//! Everything lives in one per-user directory, `~/.ai-converter/` unless
//! `AI_CONVERTER_HOME` points elsewhere:
//!
//! ```text
//! ~/.ai-converter/
//! ├── commands.json                 # prompt templates (JSON array)
//! ├── settings.json                 # optional model/endpoint settings
//! ├── <id>-convert-results.json     # result log for one command
//! └── convert-result.json           # shared result log
//! ```

use crate::error::{ConverterError, Result};
use directories::BaseDirs;
use std::env;
use std::path::{Path, PathBuf};

pub const HOME_ENV: &str = "AI_CONVERTER_HOME";
pub const DIR_NAME: &str = ".ai-converter";

const COMMANDS_FILENAME: &str = "commands.json";
const SETTINGS_FILENAME: &str = "settings.json";
const SHARED_RESULTS_FILENAME: &str = "convert-result.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterPaths {
    root: PathBuf,
}

impl ConverterPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves the data directory from `AI_CONVERTER_HOME`, falling back to
    /// `~/.ai-converter`.
    pub fn resolve() -> Result<Self> {
        if let Ok(dir) = env::var(HOME_ENV) {
            if !dir.is_empty() {
                return Ok(Self::new(dir));
            }
        }

        let base = BaseDirs::new().ok_or(ConverterError::HomeDirNotFound)?;
        Ok(Self::new(base.home_dir().join(DIR_NAME)))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn commands_file(&self) -> PathBuf {
        self.root.join(COMMANDS_FILENAME)
    }

    pub fn settings_file(&self) -> PathBuf {
        self.root.join(SETTINGS_FILENAME)
    }

    pub fn results_file(&self, command_id: i64) -> PathBuf {
        self.root.join(format!("{}-convert-results.json", command_id))
    }

    pub fn shared_results_file(&self) -> PathBuf {
        self.root.join(SHARED_RESULTS_FILENAME)
    }
}
