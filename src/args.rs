// Argument resolution: command-line flags first, then the sender and
// recipient defaults from the configuration. No address validation.

use crate::config::Config;
use crate::error::FatalError;
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_HTML_FOLDER: &str = "html";

/// Send an HTML file as a test email through the Mailtrap sandbox.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// HTML file to send. When omitted, pick one from the HTML folder.
    pub html_file: Option<PathBuf>,

    /// Sender address (falls back to EMAIL_FROM)
    #[arg(short = 'f', long)]
    pub from: Option<String>,

    /// Recipient address (falls back to EMAIL_TO)
    #[arg(short = 't', long)]
    pub to: Option<String>,

    /// Folder to pick HTML files from
    #[arg(short = 'd', long = "dir", default_value = DEFAULT_HTML_FOLDER)]
    pub folder: PathBuf,

    /// Exit with status 1 when the email could not be delivered
    #[arg(long)]
    pub strict: bool,
}

/// Arguments after falling back to the configured defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub file_path: Option<PathBuf>,
    pub from: String,
    pub to: String,
}

impl Args {
    /// Fill in sender and recipient from `config` where the flags are
    /// absent. Addresses are passed through as-is; the API validates them.
    pub fn resolve(&self, config: &Config) -> Result<Resolved, FatalError> {
        let from = pick(&self.from, &config.default_from).ok_or(FatalError::MissingSender)?;
        let to = pick(&self.to, &config.default_to).ok_or(FatalError::MissingRecipient)?;
        let file_path = self
            .html_file
            .clone()
            .filter(|p| !p.as_os_str().is_empty());

        Ok(Resolved { file_path, from, to })
    }
}

fn pick(flag: &Option<String>, fallback: &Option<String>) -> Option<String> {
    flag.as_deref()
        .filter(|v| !v.is_empty())
        .or(fallback.as_deref())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
