// Library root
// -----------
// Sends a local HTML file as a test email through the Mailtrap sandbox
// API. The binary (`main.rs`) parses the command line and hands off to
// `app::run`.
//
// Module responsibilities:
// - `config`: settings read from the environment (`.env`).
// - `args`: command-line flags and their environment fallbacks.
// - `select`: listing the HTML folder and asking which file to send.
// - `api`: the HTTP request to the sandbox send endpoint.
// - `sender`: reading the file, building the subject, one send attempt.
// - `ui`: terminal picker, spinner and result output.
// - `app`: the end-to-end flow and the exit code policy.
pub mod api;
pub mod app;
pub mod args;
pub mod config;
pub mod error;
pub mod select;
pub mod sender;
pub mod ui;
