use serde::{Deserialize, Serialize};

pub const DEFAULT_COMMAND_ID: i64 = 1;
pub const DEFAULT_COMMAND_NAME: &str = "improver";
pub const DEFAULT_COMMAND_PROMPT: &str = "Correct and improve the following text";

/// A named prompt template, exposed as one CLI subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub id: i64,
    pub name: String,
    pub prompt: String,
}

impl Command {
    pub fn new(id: i64, name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            prompt: prompt.into(),
        }
    }

    /// The command used when `commands.json` holds no entries.
    pub fn builtin() -> Self {
        Self::new(
            DEFAULT_COMMAND_ID,
            DEFAULT_COMMAND_NAME,
            DEFAULT_COMMAND_PROMPT,
        )
    }

    /// Short help line shown next to the subcommand.
    pub fn about(&self) -> String {
        format!("the prompt is {:?}", self.prompt)
    }
}

/// One input/output pair, as stored in the result log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertResult {
    pub input: String,
    pub result: String,
    // Older logs wrote the id under its Go-style field name.
    #[serde(rename = "commandID", alias = "CommandID", default)]
    pub command_id: i64,
}

impl ConvertResult {
    pub fn new(input: impl Into<String>, result: impl Into<String>, command_id: i64) -> Self {
        Self {
            input: input.into(),
            result: result.into(),
            command_id,
        }
    }
}
