use crate::error::{ConverterError, Result};
use console::Term;
use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::process::Command;
use tracing::debug;

const START_MESSAGE: &str = "Please press ENTER to start typing your text";

/// Where the text to convert comes from.
pub trait InputSource {
    /// Returns the user's text with surrounding whitespace removed.
    /// An empty string means there is nothing to convert this round.
    fn read(&mut self) -> Result<String>;
}

/// Reads input by opening the user's editor on a temporary file.
#[derive(Debug, Clone)]
pub struct EditorInput {
    wait_for_enter: bool,
}

impl Default for EditorInput {
    fn default() -> Self {
        Self {
            wait_for_enter: true,
        }
    }
}

impl EditorInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the editor right away instead of prompting for ENTER first.
    pub fn without_prompt(mut self) -> Self {
        self.wait_for_enter = false;
        self
    }
}

impl InputSource for EditorInput {
    fn read(&mut self) -> Result<String> {
        if self.wait_for_enter {
            let term = Term::stderr();
            term.write_line(&format!("? {} [Enter to launch editor]", START_MESSAGE))?;
            if !enter_pressed(term.read_line())? {
                return Ok(String::new());
            }
        }

        let file = tempfile::Builder::new()
            .prefix("ai-converter-")
            .suffix(".txt")
            .tempfile()?;
        let buffer = open_in_editor(file.path())?;
        Ok(buffer.trim().to_string())
    }
}

/// Ctrl-C at the prompt interrupts the read after the signal flag is set.
/// That is a skipped round, not an error.
fn enter_pressed(line: io::Result<String>) -> Result<bool> {
    match line {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::Interrupted => {
            debug!("prompt interrupted");
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

/// Gets the editor command from environment.
/// Checks $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor() -> Result<String> {
    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.trim().is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in &["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok((*fallback).to_string());
        }
    }

    Err(ConverterError::Editor(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Opens a file in the user's editor and waits for it to close.
/// Returns the contents of the file after editing.
///
/// The editor setting may carry arguments, e.g. `code --wait`.
pub fn open_in_editor<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let editor = get_editor()?;
    let path = file_path.as_ref();

    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| ConverterError::Editor("Editor command is empty".to_string()))?;

    debug!(editor = %editor, path = %path.display(), "launching editor");
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| ConverterError::Editor(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(ConverterError::Editor(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    fs::read_to_string(path)
        .map_err(|e| ConverterError::Editor(format!("Failed to read editor buffer: {}", e)))
}
