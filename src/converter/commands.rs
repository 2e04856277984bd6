//! Loading the configured prompt templates.

use crate::error::{ConverterError, Result};
use crate::model::Command;
use crate::paths::ConverterPaths;
use crate::store::fs::ensure_json_array;
use std::collections::HashSet;
use std::fs;
use tracing::debug;

/// Returns the configured commands in file order.
///
/// Creates `commands.json` holding `[]` on first run. An empty list yields the
/// single built-in `improver` command.
pub fn load(paths: &ConverterPaths) -> Result<Vec<Command>> {
    let path = paths.commands_file();
    ensure_json_array(&path)?;

    let content = fs::read_to_string(&path)?;
    let mut commands: Vec<Command> = serde_json::from_str(&content)?;
    debug!(path = %path.display(), count = commands.len(), "loaded commands");

    if commands.is_empty() {
        commands.push(Command::builtin());
    }

    check_unique_names(&commands)?;
    Ok(commands)
}

fn check_unique_names(commands: &[Command]) -> Result<()> {
    let mut seen = HashSet::new();
    for cmd in commands {
        if cmd.name.trim().is_empty() {
            return Err(ConverterError::Config(format!(
                "command {} has an empty name",
                cmd.id
            )));
        }
        if !seen.insert(cmd.name.as_str()) {
            return Err(ConverterError::Config(format!(
                "duplicate command name '{}'",
                cmd.name
            )));
        }
    }
    Ok(())
}
