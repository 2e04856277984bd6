use crate::error::{ConverterError, Result};
use crate::store::ResultLayout;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_MAX_TOKENS: u32 = 500;
const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Settings for the completion client and sinks, stored in settings.json.
///
/// The file is optional. Missing fields take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Upper bound on generated tokens
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Base URL of the chat-completions API
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Overrides the platform clipboard utility (e.g. "wl-copy")
    #[serde(default)]
    pub clipboard_command: Option<String>,

    /// "per-command" (default) or "shared" result log
    #[serde(default)]
    pub result_layout: ResultLayout,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: DEFAULT_MAX_TOKENS,
            api_base: default_api_base(),
            clipboard_command: None,
            result_layout: ResultLayout::default(),
        }
    }
}

impl Settings {
    /// Load settings from the given file, or return defaults if not found
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(ConverterError::Config("model must not be empty".into()));
        }
        if self.max_tokens == 0 {
            return Err(ConverterError::Config(
                "max_tokens must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// The chat-completions endpoint, tolerant of a trailing slash in api_base
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.model, "gpt-3.5-turbo");
        assert_eq!(settings.max_tokens, 500);
        assert_eq!(settings.clipboard_command, None);
        assert_eq!(settings.result_layout, ResultLayout::PerCommand);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let settings = Settings::load(dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"model": "gpt-4o-mini", "clipboard_command": "wl-copy"}"#).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.model, "gpt-4o-mini");
        assert_eq!(settings.max_tokens, 500);
        assert_eq!(settings.clipboard_command.as_deref(), Some("wl-copy"));
    }

    #[test]
    fn test_load_shared_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"result_layout": "shared"}"#).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.result_layout, ResultLayout::Shared);
    }

    #[test]
    fn test_load_rejects_zero_tokens() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"max_tokens": 0}"#).unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, ConverterError::Config(_)));
    }

    #[test]
    fn test_completions_url() {
        let settings = Settings {
            api_base: "http://localhost:8080/v1/".to_string(),
            ..Settings::default()
        };
        assert_eq!(
            settings.completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
    }
}
