// Error types: two classes of failure.
// - `FatalError`: a precondition did not hold. The run stops and the
//   process exits with status 1.
// - `DeliveryError`: the send attempt itself failed (file unreadable, bad
//   HTTP status, network trouble). Reported, but by default the process
//   still exits with status 0.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FatalError {
    #[error("MAILTRAP_API_TOKEN and MAILTRAP_INBOX_ID must be set in the .env file.")]
    MissingCredentials,

    #[error("Sender email ('from') must be provided either via --from, -f, or the EMAIL_FROM environment variable.")]
    MissingSender,

    #[error("Recipient email ('to') must be provided either via --to, -t, or the EMAIL_TO environment variable.")]
    MissingRecipient,

    #[error("HTML file path is required.")]
    MissingFilePath,

    #[error("No HTML files found in the '{}' folder.", .folder.display())]
    NoHtmlFiles { folder: PathBuf },

    #[error("Error reading HTML folder '{}': {source}", .folder.display())]
    FolderRead {
        folder: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File selection was not completed: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("Invalid value for {name}: {value:?}")]
    InvalidConfig { name: &'static str, value: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Error reading HTML file '{}': {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Request to Mailtrap failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Mailtrap API Error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("Could not parse Mailtrap response: {0}")]
    InvalidResponse(#[source] reqwest::Error),
}

impl DeliveryError {
    /// Transport errors and server-side statuses are worth one more try;
    /// anything the API rejected on its merits is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            DeliveryError::Transport(_) => true,
            DeliveryError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
