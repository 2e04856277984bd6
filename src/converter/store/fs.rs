use super::{ResultLayout, ResultStore};
use crate::error::Result;
use crate::model::ConvertResult;
use crate::paths::ConverterPaths;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Creates `path` holding an empty JSON array if nothing exists there yet,
/// creating parent directories as needed.
pub fn ensure_json_array(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, "[]")?;
    debug!(path = %path.display(), "created empty json array");
    Ok(())
}

pub struct JsonFileStore {
    paths: ConverterPaths,
    layout: ResultLayout,
}

impl JsonFileStore {
    pub fn new(paths: ConverterPaths) -> Self {
        Self {
            paths,
            layout: ResultLayout::default(),
        }
    }

    pub fn with_layout(mut self, layout: ResultLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn file_for(&self, command_id: i64) -> PathBuf {
        match self.layout {
            ResultLayout::PerCommand => self.paths.results_file(command_id),
            ResultLayout::Shared => self.paths.shared_results_file(),
        }
    }

    fn load_results(&self, path: &Path) -> Result<Vec<ConvertResult>> {
        let content = fs::read_to_string(path)?;
        let results: Vec<ConvertResult> = serde_json::from_str(&content)?;
        Ok(results)
    }

    fn save_results(&self, path: &Path, results: &[ConvertResult]) -> Result<()> {
        let content = serde_json::to_string_pretty(results)?;
        fs::write(path, content)?;
        Ok(())
    }
}

impl ResultStore for JsonFileStore {
    // Existing records are written back exactly as read; their commandID is
    // never rewritten to the current command.
    fn append(&mut self, result: &ConvertResult) -> Result<()> {
        let path = self.file_for(result.command_id);
        ensure_json_array(&path)?;

        let mut results = self.load_results(&path)?;
        results.push(result.clone());
        self.save_results(&path, &results)?;

        debug!(path = %path.display(), total = results.len(), "appended result");
        Ok(())
    }

    fn list(&self, command_id: i64) -> Result<Vec<ConvertResult>> {
        let path = self.file_for(command_id);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let results = self.load_results(&path)?;
        Ok(match self.layout {
            ResultLayout::PerCommand => results,
            ResultLayout::Shared => results
                .into_iter()
                .filter(|r| r.command_id == command_id)
                .collect(),
        })
    }
}
