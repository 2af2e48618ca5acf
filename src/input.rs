//! Finding documents on disk and opening them as sessions.

use crate::error::Error;
use crate::formats::Format;
use crate::session::Session;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Expands `paths` into the documents to work on.
///
/// Files named explicitly are always kept. Directories are walked
/// recursively and only files whose extension is in `extensions` are kept.
/// The result is sorted and free of duplicates.
///
/// # Errors
///
/// Returns an error if a path does not exist or a directory cannot be read.
pub fn find_documents(paths: Vec<PathBuf>, extensions: &[String]) -> io::Result<Vec<PathBuf>> {
    let mut documents = Vec::new();

    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(&path) {
                let entry = entry?;
                if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
                    documents.push(entry.into_path());
                }
            }
        } else if path.is_file() {
            documents.push(path);
        } else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file or directory: {}", path.display()),
            ));
        }
    }

    documents.sort();
    documents.dedup();
    debug!(count = documents.len(), "found documents");
    Ok(documents)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext))
}

/// Reads a document into a session labelled with its path.
///
/// # Errors
///
/// Returns an error if the file cannot be read as UTF-8 text.
pub fn open_session<F: Format>(path: &Path, format: F) -> Result<Session<F>, Error> {
    let text = fs::read_to_string(path)?;
    Ok(Session::new(text, format).with_path(path.to_string_lossy()))
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
