//! Errors raised at the I/O edges of the crate.
//!
//! Outline queries never fail; they answer `None` when a request does not
//! apply. Errors only arise when reading documents, loading edit plans and
//! writing edits back to disk.

use std::io;
use textum::PatchError;

#[derive(Debug, thiserror::Error)]
/// Failures from reading documents or applying edit plans.
pub enum Error {
    /// Reading or writing a document failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An edit plan could not be (de)serialised.
    #[error("invalid edit plan: {0}")]
    Json(#[from] serde_json::Error),

    /// An edit reaches past the end of its document.
    #[error("edit {start}..{end} in {file} is outside the {len}-byte document")]
    OutOfBounds {
        /// Document the edit targets.
        file: String,
        /// First byte replaced.
        start: usize,
        /// Byte after the last one replaced.
        end: usize,
        /// Length of the document.
        len: usize,
    },

    /// Two edits for the same document touch the same bytes.
    #[error("edits in {file} overlap at byte {at}")]
    Overlap {
        /// Document the edits target.
        file: String,
        /// Offset where the later edit begins.
        at: usize,
    },

    /// An edit boundary falls inside a multi-byte character.
    #[error("edit boundary {at} in {file} is not on a character boundary")]
    CharBoundary {
        /// Document the edit targets.
        file: String,
        /// Offending offset.
        at: usize,
    },

    /// textum could not resolve or apply a patch.
    #[error("patch failed: {0}")]
    Patch(PatchError),

    /// A string is not a valid adornment encoding.
    #[error("invalid adornment {0:?}: expected one punctuation character, once or twice")]
    InvalidAdornment(String),
}

impl From<PatchError> for Error {
    fn from(e: PatchError) -> Self {
        match e {
            PatchError::IoError(e) => Self::Io(e),
            other => Self::Patch(other),
        }
    }
}
