// Entrypoint for the CLI application.
// - Loads `.env`, sets up logging, parses flags and runs the flow.
// - Startup failures (unreadable `.env`, bad configuration) surface through
//   `anyhow` and exit with status 1; the run's own exit code is decided here.

use anyhow::Context;
use clap::Parser;
use mailtrap_html_test::{app, args::Args, config::Config, ui};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<ExitCode> {
    // A missing .env is fine; the variables may already be exported.
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            return Err(err).context("Failed to load .env file");
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::from_env().context("Invalid configuration")?;
    let result = app::run(&args, &config, &ui::TerminalChooser);

    match &result {
        Ok(delivery) => ui::report_delivery(delivery),
        Err(err) => ui::report_fatal(err),
    }
    Ok(ExitCode::from(app::exit_code(&result, args.strict)))
}
