// UI layer: the terminal side of the run. An interactive file picker
// built on `dialoguer`, a spinner while the request is in flight, and
// colored result lines.

use crate::error::{DeliveryError, FatalError};
use crate::select::Chooser;
use crate::sender::Delivery;
use crossterm::style::Stylize;
use dialoguer::Select;
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::time::Duration;

/// Keyboard-driven picker: arrow keys and Enter choose an option.
pub struct TerminalChooser;

impl Chooser for TerminalChooser {
    fn choose(&self, prompt: &str, options: &[String]) -> Result<String, FatalError> {
        let index = Select::new()
            .with_prompt(prompt)
            .items(options)
            .default(0)
            .interact()
            .map_err(FatalError::Prompt)?;
        options
            .get(index)
            .cloned()
            .ok_or_else(|| FatalError::Prompt(io::Error::new(io::ErrorKind::InvalidInput, "no such option")))
    }
}

/// Run `work` with a spinner on stderr, cleared once it returns.
pub fn with_spinner<T>(message: &'static str, work: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = work();
    spinner.finish_and_clear();
    result
}

/// The line printed for a delivery outcome.
pub fn delivery_message(delivery: &Delivery) -> String {
    match delivery {
        Ok(reply) => format!("Email sent successfully! {}", reply),
        // The file was never sent, so no send-failure prefix.
        Err(err @ DeliveryError::ReadFile { .. }) => err.to_string(),
        Err(err) => format!("Error sending email: {}", err),
    }
}

pub fn report_delivery(delivery: &Delivery) {
    let line = delivery_message(delivery);
    match delivery {
        Ok(_) => println!("{}", line.green()),
        Err(_) => eprintln!("{}", line.red()),
    }
}

pub fn report_fatal(err: &FatalError) {
    eprintln!("{} {}", "Error:".red().bold(), err);
}
