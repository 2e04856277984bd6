//! # Command Loop
//!
//! A [`Session`] owns everything one subcommand needs: where input comes
//! from, which backend answers, which sinks run afterwards and the flag that
//! ends the loop. Nothing is global, so tests can swap any role for a fake.
//!
//! ```text
//! idle ─► reading-input ─┬─ empty ──────────────────────────► idle
//!                        └─ text ─► completing ─► sinking ─► idle
//! ```
//!
//! The shutdown flag is checked only between iterations. A signal that
//! arrives during an editor session or a streaming call takes effect once
//! that iteration has finished.

use crate::completion::{build_message, ChatBackend};
use crate::editor::InputSource;
use crate::error::Result;
use crate::model::{Command, ConvertResult};
use crate::sinks::{run_sinks, ResultSink};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Set once SIGINT or SIGTERM has been delivered.
#[derive(Debug, Clone, Default)]
pub struct ShutdownFlag(Arc<AtomicBool>);

impl ShutdownFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers SIGINT and SIGTERM so that delivery raises this flag
    /// instead of killing the process.
    pub fn install() -> Result<Self> {
        let flag = Self::new();
        for signal in [signal_hook::consts::SIGINT, signal_hook::consts::SIGTERM] {
            signal_hook::flag::register(signal, Arc::clone(&flag.0))?;
        }
        Ok(flag)
    }

    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Outcome of one pass through the loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Iteration {
    /// The editor came back empty; nothing was sent.
    Skipped,
    Completed(ConvertResult),
}

pub struct Session {
    input: Box<dyn InputSource>,
    backend: Box<dyn ChatBackend>,
    sinks: Vec<Box<dyn ResultSink>>,
    shutdown: ShutdownFlag,
}

impl Session {
    pub fn new(
        input: Box<dyn InputSource>,
        backend: Box<dyn ChatBackend>,
        shutdown: ShutdownFlag,
    ) -> Self {
        Self {
            input,
            backend,
            sinks: Vec::new(),
            shutdown,
        }
    }

    pub fn with_sink(mut self, sink: Box<dyn ResultSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn shutdown_flag(&self) -> &ShutdownFlag {
        &self.shutdown
    }

    /// Reads one input, converts it and hands the result to every sink.
    ///
    /// Input and completion errors are returned; sink errors are only logged.
    pub fn run_once(&mut self, command: &Command) -> Result<Iteration> {
        let input = self.input.read()?;
        if input.is_empty() {
            debug!(command = %command.name, "empty input, skipping");
            return Ok(Iteration::Skipped);
        }

        let message = build_message(&command.prompt, &input);
        debug!(command = %command.name, backend = self.backend.name(), "requesting completion");
        let response = self.backend.chat(&message)?;

        let result = ConvertResult::new(input, response, command.id);
        run_sinks(&mut self.sinks, &result);
        Ok(Iteration::Completed(result))
    }

    /// Repeats [`Session::run_once`] until the shutdown flag is raised.
    pub fn run(&mut self, command: &Command) -> Result<()> {
        info!(command = %command.name, "starting conversion loop");
        loop {
            if self.shutdown.is_set() {
                info!(command = %command.name, "interrupted, exiting");
                return Ok(());
            }
            self.run_once(command)?;
        }
    }
}
