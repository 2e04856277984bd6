use super::ResultStore;
use crate::error::Result;
use crate::model::ConvertResult;

/// In-memory storage for testing.
/// Does NOT persist data.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    results: Vec<ConvertResult>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl ResultStore for InMemoryStore {
    fn append(&mut self, result: &ConvertResult) -> Result<()> {
        self.results.push(result.clone());
        Ok(())
    }

    fn list(&self, command_id: i64) -> Result<Vec<ConvertResult>> {
        Ok(self
            .results
            .iter()
            .filter(|r| r.command_id == command_id)
            .cloned()
            .collect())
    }
}
