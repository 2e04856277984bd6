mod cli;

fn main() {
    cli::init_logging(cli::verbose_requested(std::env::args_os()));

    if let Err(e) = cli::run() {
        tracing::debug!(error = ?e, "fatal");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
