// Email sender: checks preconditions, reads the HTML file, stamps the
// subject and makes the one delivery attempt through the API client.

use crate::api::{MailtrapClient, SendRequest};
use crate::config::Config;
use crate::error::{DeliveryError, FatalError};
use chrono::NaiveDateTime;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Outcome of a single delivery attempt: the API's JSON reply, or why the
/// message did not get through.
pub type Delivery = Result<serde_json::Value, DeliveryError>;

/// Reads an HTML file and sends it as one test email.
pub struct EmailSender {
    client: MailtrapClient,
}

/// `Email Test: <file name> - <YYYY-MM-DD HH:MM:SS>`
pub fn build_subject(path: &Path, at: NaiveDateTime) -> String {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    format!("Email Test: {} - {}", filename, at.format("%Y-%m-%d %H:%M:%S"))
}

impl EmailSender {
    /// Fails with `MissingCredentials` unless both the API token and the
    /// inbox id are configured.
    pub fn new(config: &Config) -> Result<Self, FatalError> {
        let credentials = config.credentials()?;
        let client = MailtrapClient::new(credentials, config)?;
        Ok(EmailSender { client })
    }

    /// Send `path` from `from` to `to`, stamping the subject with `now`.
    pub fn send_file(
        &self,
        path: &Path,
        from: &str,
        to: &str,
        now: NaiveDateTime,
    ) -> Result<Delivery, FatalError> {
        if path.as_os_str().is_empty() {
            return Err(FatalError::MissingFilePath);
        }

        let html = match fs::read_to_string(path) {
            Ok(html) => html,
            Err(source) => {
                return Ok(Err(DeliveryError::ReadFile {
                    path: path.to_path_buf(),
                    source,
                }))
            }
        };

        let subject = build_subject(path, now);
        debug!(%subject, bytes = html.len(), "sending html file");
        let req = SendRequest::new(from, to, subject, html);
        self.client.send(&req)
    }
}
