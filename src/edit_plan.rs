//! The edit plan carries heading rewrites from the outline to files on disk.
//!
//! Level changes and heading normalisation produce byte-span replacements
//! ([`Splice`]s). An [`EditPlan`] tags them with the file they belong to so
//! they can be printed as JSON, reviewed, and applied later in one pass per
//! file. The splicing itself is done by textum patches over a rope.

use crate::error::Error;
use ropey::Rope;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::ops::Range;
use std::path::Path;
use textum::{Boundary, BoundaryMode, Patch, PatchSet, Snippet, Target};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// Replacement of a byte range of a document with new text.
pub struct Splice {
    /// Bytes to replace.
    pub range: Range<usize>,
    /// Text written in their place.
    pub replacement: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
/// Serialisable collection of file modifications, applied together.
pub struct EditPlan {
    /// Individual replacements, in any order.
    pub edits: Vec<Edit>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
/// Byte coordinates and content for replacing part of a file.
pub struct Edit {
    /// Target file path for this modification.
    pub file_name: String,
    /// First byte replaced.
    pub byte_start: usize,
    /// Byte after the last one replaced.
    pub byte_end: usize,
    /// New text for the range.
    pub replacement: String,
    /// Heading title, for tracking and debugging edits.
    pub item_name: String,
}

impl Edit {
    #[must_use]
    /// Attaches a splice to the file it applies to.
    pub fn new(file_name: impl Into<String>, splice: Splice, item_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            byte_start: splice.range.start,
            byte_end: splice.range.end,
            replacement: splice.replacement,
            item_name: item_name.into(),
        }
    }

    #[must_use]
    /// The replacement without its file.
    pub fn splice(&self) -> Splice {
        Splice {
            range: self.byte_start..self.byte_end,
            replacement: self.replacement.clone(),
        }
    }
}

impl EditPlan {
    /// Reads a plan previously printed as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid plan.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Apply all edits in the plan.
    ///
    /// Edits are grouped by file and turned into textum patches in one
    /// `PatchSet`. Every file is read and patched before any is written, so an
    /// invalid edit leaves all files untouched. A failure while writing can
    /// still leave the files written before it changed.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or written, or if an edit is
    /// out of bounds, overlaps another edit, or splits a character.
    pub fn apply(&self) -> Result<(), Error> {
        let mut file_groups: HashMap<&str, Vec<Splice>> = HashMap::new();

        for edit in &self.edits {
            file_groups
                .entry(edit.file_name.as_str())
                .or_default()
                .push(edit.splice());
        }

        let mut patchset = PatchSet::new();
        for (file_name, splices) in &file_groups {
            let content = fs::read_to_string(file_name)?;
            let rope = Rope::from_str(&content);
            for patch in patches(file_name, &content, &rope, splices)? {
                patchset.add(patch);
            }
        }

        let results = patchset.apply_to_files()?;
        for (file_name, new_content) in results {
            fs::write(&file_name, new_content)?;
            debug!(file = file_name.as_str(), "applied edits");
        }

        Ok(())
    }
}

/// Returns `text` with every splice applied.
///
/// Splices may be given in any order; their ranges refer to the original
/// text. `file` only labels errors.
///
/// # Errors
///
/// Returns an error if a range is reversed or past the end of `text`, if two
/// ranges overlap, or if a boundary is not on a character boundary.
pub fn apply_splices(file: &str, text: &str, splices: &[Splice]) -> Result<String, Error> {
    let mut rope = Rope::from_str(text);
    let patches = patches(file, text, &rope, splices)?;

    // Highest offsets first, so earlier char indices stay put.
    for patch in patches.iter().rev() {
        patch.apply(&mut rope)?;
    }

    Ok(rope.to_string())
}

/// Checks the splices of one document and converts them to char-indexed
/// patches, in document order.
///
/// Overlaps are rejected here rather than left to textum, which lets a
/// deletion overlap another edit.
fn patches(
    file: &str,
    text: &str,
    rope: &Rope,
    splices: &[Splice],
) -> Result<Vec<Patch>, Error> {
    let mut ordered: Vec<&Splice> = splices.iter().collect();
    ordered.sort_by_key(|splice| (splice.range.start, splice.range.end));

    let mut patches = Vec::with_capacity(ordered.len());
    let mut previous_end = 0;

    for splice in ordered {
        let Range { start, end } = splice.range;
        if start > end || end > text.len() {
            return Err(Error::OutOfBounds {
                file: file.to_string(),
                start,
                end,
                len: text.len(),
            });
        }
        if start < previous_end {
            return Err(Error::Overlap {
                file: file.to_string(),
                at: start,
            });
        }
        if let Some(at) = [start, end].into_iter().find(|&at| !text.is_char_boundary(at)) {
            return Err(Error::CharBoundary {
                file: file.to_string(),
                at,
            });
        }
        previous_end = end;

        let chars = rope.byte_to_char(start)..rope.byte_to_char(end);
        patches.push(Patch {
            file: file.to_string(),
            snippet: snippet(chars, rope.len_chars()),
            replacement: splice.replacement.clone(),
        });
    }

    Ok(patches)
}

/// A char range as a snippet. `Target::Char` cannot name the end of the rope,
/// so ranges that reach it select from the char before their start instead.
fn snippet(chars: Range<usize>, len: usize) -> Snippet {
    if chars.end < len {
        Snippet::Between {
            start: Boundary::new(Target::Char(chars.start), BoundaryMode::Include),
            end: Boundary::new(Target::Char(chars.end), BoundaryMode::Exclude),
        }
    } else if chars.start == 0 {
        Snippet::All
    } else {
        Snippet::From(Boundary::new(
            Target::Char(chars.start - 1),
            BoundaryMode::Exclude,
        ))
    }
}

#[cfg(test)]
#[path = "tests/edit_plan.rs"]
mod tests;
