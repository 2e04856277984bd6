//! # API Facade
//!
//! [`ConverterApi`] is the single entry point the binary talks to. It
//! resolves the per-user paths, loads settings and commands, and assembles a
//! [`Session`] from the production implementations of each role:
//!
//! - input: [`EditorInput`]
//! - backend: [`OpenAiBackend`]
//! - sinks: [`ClipboardSink`], then [`FileSink`] over [`JsonFileStore`]
//!
//! It holds no business logic of its own.

use crate::commands;
use crate::completion::OpenAiBackend;
use crate::config::Settings;
use crate::editor::EditorInput;
use crate::error::Result;
use crate::model::Command;
use crate::paths::ConverterPaths;
use crate::session::{Session, ShutdownFlag};
use crate::sinks::{ClipboardSink, FileSink};
use crate::store::fs::JsonFileStore;

pub struct ConverterApi {
    paths: ConverterPaths,
    settings: Settings,
    commands: Vec<Command>,
}

impl ConverterApi {
    /// Loads everything from the default per-user directory.
    pub fn open() -> Result<Self> {
        Self::open_at(ConverterPaths::resolve()?)
    }

    pub fn open_at(paths: ConverterPaths) -> Result<Self> {
        let settings = Settings::load(paths.settings_file())?;
        let commands = commands::load(&paths)?;
        Ok(Self {
            paths,
            settings,
            commands,
        })
    }

    pub fn paths(&self) -> &ConverterPaths {
        &self.paths
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn find_command(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Builds the interactive session used by every subcommand.
    pub fn session(&self, shutdown: ShutdownFlag) -> Result<Session> {
        let backend = OpenAiBackend::from_settings(&self.settings)?;
        let store =
            JsonFileStore::new(self.paths.clone()).with_layout(self.settings.result_layout);
        let clipboard = ClipboardSink::new().with_command(self.settings.clipboard_command.clone());

        Ok(
            Session::new(Box::new(EditorInput::new()), Box::new(backend), shutdown)
                .with_sink(Box::new(clipboard))
                .with_sink(Box::new(FileSink::new(store))),
        )
    }
}
