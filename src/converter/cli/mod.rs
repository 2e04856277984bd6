//! Argument parsing and dispatch for the `ai-converter` binary.
//!
//! Subcommands are not known at compile time: one is generated for every
//! entry in `commands.json`, so the static part of the CLI is derived and the
//! rest is added with clap's builder API.

use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};
use converter::api::ConverterApi;
use converter::error::{ConverterError, Result};
use converter::model::Command;
use converter::session::ShutdownFlag;
use std::ffi::OsString;
use std::sync::OnceLock;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Version for `--version`: the bare package version on release builds,
/// `<version>@<hash> <date>` on dev builds.
fn format_version(version: &str, git_hash: &str, commit_date: &str, is_release: bool) -> String {
    if is_release || git_hash.is_empty() {
        return version.to_string();
    }
    format!("{}@{} {}", version, git_hash, commit_date)
        .trim_end()
        .to_string()
}

fn get_version() -> &'static str {
    static VERSION: OnceLock<String> = OnceLock::new();
    VERSION.get_or_init(|| {
        format_version(
            env!("CARGO_PKG_VERSION"),
            env!("GIT_HASH"),
            env!("GIT_COMMIT_DATE"),
            env!("IS_RELEASE") == "true",
        )
    })
}

#[derive(Parser, Debug)]
#[command(name = "ai-converter", bin_name = "ai-converter", version = get_version())]
#[command(about = "Improve text with a language model, one editor session at a time", long_about = None)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Builds the full CLI: the derived flags plus one subcommand per command.
pub fn build_cli(commands: &[Command]) -> clap::Command {
    commands.iter().fold(Cli::command(), |cli, cmd| {
        cli.subcommand(clap::Command::new(cmd.name.clone()).about(cmd.about()))
    })
}

/// Looks for the verbose flag before the command list is known, so logging
/// is ready while configuration loads.
pub fn verbose_requested<I: IntoIterator<Item = OsString>>(args: I) -> bool {
    args.into_iter()
        .skip(1)
        .take_while(|a| a != "--")
        .any(|a| a == "-v" || a == "--verbose")
}

/// Initialise tracing-based logging on stderr.
///
/// Uses `RUST_LOG` if set, otherwise `debug` when verbose and `warn` by default.
pub fn init_logging(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn run() -> Result<()> {
    let api = ConverterApi::open()?;
    let mut cli = build_cli(api.commands());
    let matches = cli.get_matches_mut();
    let args = Cli::from_arg_matches(&matches).map_err(|e| ConverterError::Config(e.to_string()))?;
    debug!(verbose = args.verbose, commands = api.commands().len(), "parsed arguments");

    let Some(name) = selected_command(&matches) else {
        cli.print_help()?;
        println!();
        return Ok(());
    };

    let command = api
        .find_command(name)
        .ok_or_else(|| ConverterError::Config(format!("unknown command '{}'", name)))?;

    let shutdown = ShutdownFlag::install()?;
    api.session(shutdown)?.run(command)
}

fn selected_command(matches: &ArgMatches) -> Option<&str> {
    matches.subcommand().map(|(name, _)| name)
}
