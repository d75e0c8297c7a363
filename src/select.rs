// File selection: when no file was named on the command line, list the
// HTML folder and ask the user to pick one. The actual prompt is behind
// the `Chooser` trait so tests can answer it without a terminal.

use crate::error::FatalError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const SELECT_PROMPT: &str = "Select an HTML file to send:";

/// Something that can pick one entry out of a list of options.
pub trait Chooser {
    /// Block until one of `options` is chosen and return it.
    fn choose(&self, prompt: &str, options: &[String]) -> Result<String, FatalError>;
}

/// Names of the entries in `folder` with an `.html` extension (any case),
/// in the order the directory listing returns them.
pub fn list_html_files(folder: &Path) -> Result<Vec<String>, FatalError> {
    let read_err = |source| FatalError::FolderRead {
        folder: folder.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(folder).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if is_html(&name) {
            names.push(name);
        }
    }
    Ok(names)
}

fn is_html(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("html"))
        .unwrap_or(false)
}

/// Resolve the file to send. An explicit path short-circuits; otherwise
/// the HTML files in `folder` are offered to `chooser`.
pub fn resolve_file(
    explicit: Option<PathBuf>,
    folder: &Path,
    chooser: &dyn Chooser,
) -> Result<PathBuf, FatalError> {
    if let Some(path) = explicit {
        return Ok(path);
    }

    let files = list_html_files(folder)?;
    if files.is_empty() {
        return Err(FatalError::NoHtmlFiles {
            folder: folder.to_path_buf(),
        });
    }
    debug!(count = files.len(), folder = %folder.display(), "offering html files");

    let picked = chooser.choose(SELECT_PROMPT, &files)?;
    Ok(folder.join(picked))
}
