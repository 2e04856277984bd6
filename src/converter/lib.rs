//! # ai-converter Architecture
//!
//! ai-converter turns text typed in an editor into an improved version from a
//! language model, then copies it to the clipboard and records it. Every prompt
//! template in `commands.json` becomes its own subcommand, and a subcommand
//! keeps converting until it is interrupted.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Builds one subcommand per configured command             │
//! │  - Logging setup, exit codes                                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Resolves paths, loads settings and commands              │
//! │  - Assembles a Session from production parts               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session (session.rs)                                       │
//! │  - input ─► completion ─► sinks, until interrupted          │
//! │  - Every role is a trait object                             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Roles                                                      │
//! │  - InputSource (editor.rs)                                  │
//! │  - ChatBackend (completion.rs)                              │
//! │  - ResultSink (sinks.rs) over ResultStore (store/)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Config, input and completion errors stop the loop and reach `main`, which
//! prints them and exits non-zero. Sink errors are logged and skipped so one
//! failing sink never prevents the others from running.
//!
//! ## Testing Strategy
//!
//! Each role has a fake in its tests: scripted inputs and backends for the
//! session, [`store::memory::InMemoryStore`] for sinks, `tempfile`
//! directories for the JSON files. `tests/` drives the binary itself.
//!
//! ## Module Overview
//!
//! - [`api`]: facade used by the binary
//! - [`session`]: the conversion loop and shutdown flag
//! - [`commands`]: loading prompt templates
//! - [`completion`]: streaming chat-completions client
//! - [`editor`]: external editor input
//! - [`sinks`]: clipboard and result-file sinks
//! - [`clipboard`]: OS clipboard utilities
//! - [`store`]: result log storage
//! - [`config`]: settings.json
//! - [`paths`]: file locations
//! - [`model`]: `Command` and `ConvertResult`
//! - [`error`]: error types

pub mod api;
pub mod clipboard;
pub mod commands;
pub mod completion;
pub mod config;
pub mod editor;
pub mod error;
pub mod model;
pub mod paths;
pub mod session;
pub mod sinks;
pub mod store;
