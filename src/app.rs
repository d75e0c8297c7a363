// Top-level flow: resolve arguments, check credentials, pick the file,
// send it. Every failure comes back here as a value; only `exit_code`
// decides what the process reports to the shell.

use crate::args::Args;
use crate::config::Config;
use crate::error::FatalError;
use crate::select::{self, Chooser};
use crate::sender::{Delivery, EmailSender};
use crate::ui;
use chrono::Local;
use tracing::info;

pub fn run(args: &Args, config: &Config, chooser: &dyn Chooser) -> Result<Delivery, FatalError> {
    let resolved = args.resolve(config)?;
    info!(from = %resolved.from, to = %resolved.to, "addresses resolved");

    let sender = EmailSender::new(config)?;
    let path = select::resolve_file(resolved.file_path, &args.folder, chooser)?;
    info!(path = %path.display(), "html file selected");

    Ok(ui::with_spinner("Sending email...", || {
        sender.send_file(&path, &resolved.from, &resolved.to, Local::now().naive_local())
    })?)
}

/// 1 for any fatal error. A failed delivery only counts in strict mode.
pub fn exit_code(result: &Result<Delivery, FatalError>, strict: bool) -> u8 {
    match result {
        Err(_) => 1,
        Ok(Err(_)) if strict => 1,
        Ok(_) => 0,
    }
}
