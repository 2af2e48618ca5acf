//! A document session: one document's text plus the state derived from it.
//!
//! Hosts (an editor plugin, the CLI) ask questions in terms of a cursor
//! offset. The session resolves the offset against a memoized outline and
//! answers with offsets to move to, ranges to fold, or splices to apply.
//!
//! Two caches live here. The outline is keyed by a revision counter that every
//! edit bumps. The level table is kept while the same heading is promoted or
//! demoted repeatedly, so its level numbers do not shift mid-sequence when the
//! heading's own style was the only user of a level.

use crate::edit_plan::{apply_splices, Edit, Splice};
use crate::error::Error;
use crate::formats::rst::RstFormat;
use crate::formats::Format;
use crate::heading::{Adornment, Heading};
use crate::outline::Outline;
use std::ops::Range;
use tracing::{debug, instrument};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Direction of travel between headings.
pub enum Direction {
    /// Towards the end of the document.
    Forward,
    /// Towards the start of the document.
    Backward,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// A one-step change of heading level.
pub enum Shift {
    /// Move towards level 0.
    Promote,
    /// Move one level deeper.
    Demote,
}

#[derive(Clone, Debug)]
/// Level table captured for the heading being re-levelled.
struct LevelCache {
    heading: usize,
    levels: Vec<Adornment>,
}

/// One document view: its text, the format it is written in, and caches.
pub struct Session<F: Format = RstFormat> {
    /// Label for the document, used when building edits.
    pub file_path: String,
    text: String,
    format: F,
    revision: u64,
    outline: Option<(u64, Outline)>,
    level_cache: Option<LevelCache>,
}

impl Session<RstFormat> {
    #[must_use]
    /// A session over reStructuredText with the standard level convention.
    pub fn rst(text: impl Into<String>) -> Self {
        Self::new(text, RstFormat::default())
    }
}

impl<F: Format> Session<F> {
    #[must_use]
    /// Starts a session over `text`.
    pub fn new(text: impl Into<String>, format: F) -> Self {
        Self {
            file_path: String::new(),
            text: text.into(),
            format,
            revision: 0,
            outline: None,
            level_cache: None,
        }
    }

    #[must_use]
    /// Labels the session with the file it was read from.
    pub fn with_path(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = file_path.into();
        self
    }

    #[must_use]
    /// Current document text.
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    /// Counter bumped by every edit.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    /// The heading syntax of this document.
    pub fn format(&self) -> &F {
        &self.format
    }

    /// The outline of the current text, parsed at most once per revision.
    pub fn outline(&mut self) -> &Outline {
        if self
            .outline
            .as_ref()
            .is_some_and(|(revision, _)| *revision != self.revision)
        {
            self.outline = None;
        }
        let (_, outline) = self
            .outline
            .get_or_insert_with(|| (self.revision, self.format.outline(&self.text)));
        outline
    }

    /// Drops every cache, for when the text is known to have changed
    /// behind the session's back.
    pub fn invalidate(&mut self) {
        self.revision += 1;
        self.outline = None;
        self.level_cache = None;
    }

    /// Replaces the whole text.
    pub fn replace_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.invalidate();
    }

    /// Applies a splice to the text.
    ///
    /// # Errors
    ///
    /// Returns an error if the splice does not fit the current text.
    pub fn apply(&mut self, splice: &Splice) -> Result<(), Error> {
        self.splice(splice)?;
        self.level_cache = None;
        Ok(())
    }

    fn splice(&mut self, splice: &Splice) -> Result<(), Error> {
        self.text = apply_splices(&self.file_path, &self.text, std::slice::from_ref(splice))?;
        self.revision += 1;
        Ok(())
    }

    /// The deepest heading whose region contains `offset`.
    pub fn heading_at(&mut self, offset: usize) -> Option<Heading> {
        self.outline().belong_to(offset).cloned()
    }

    #[instrument(level = "debug", skip(self))]
    /// Where the cursor should go to reach the next or previous heading.
    ///
    /// Moving backward from inside a section's body first lands on that
    /// section's own heading. Outside every region (before the first heading
    /// or between top-level sections) the nearest heading in the direction of
    /// travel is chosen.
    pub fn move_target(
        &mut self,
        offset: usize,
        direction: Direction,
        same_or_shallower: bool,
    ) -> Option<usize> {
        let outline = self.outline();
        let target = match (outline.belong_to(offset), direction) {
            (Some(current), Direction::Forward) => outline.next(current, same_or_shallower),
            (Some(current), Direction::Backward) if offset > current.caret() => Some(current),
            (Some(current), Direction::Backward) => outline.prev(current, same_or_shallower),
            (None, Direction::Forward) => outline.headings().iter().find(|h| h.start > offset),
            (None, Direction::Backward) => {
                outline.headings().iter().rev().find(|h| h.caret() < offset)
            }
        };
        target.map(Heading::caret)
    }

    /// The body to fold for the section containing `offset`.
    pub fn fold_region(&mut self, offset: usize) -> Option<Range<usize>> {
        let outline = self.outline();
        outline.belong_to(offset).and_then(|heading| outline.body(heading))
    }

    #[instrument(level = "debug", skip(self))]
    /// The rewrite that moves the section containing `offset` one level up or
    /// down, or `None` when there is no such level.
    ///
    /// The level table is remembered for this heading until another heading is
    /// re-levelled or the text is edited by other means.
    pub fn change_level(&mut self, offset: usize, shift: Shift) -> Option<Splice> {
        let heading = self.heading_at(offset)?;
        let levels = match self.level_cache.take() {
            Some(cache) if cache.heading == heading.index => cache.levels,
            _ => self.outline().levels(),
        };

        let current = levels
            .iter()
            .position(|style| *style == heading.adornment)
            .unwrap_or(heading.level);
        let target = match shift {
            Shift::Promote => current.checked_sub(1),
            Shift::Demote => Some(current + 1),
        };
        let adornment = target.and_then(|level| levels.get(level).copied());

        self.level_cache = Some(LevelCache {
            heading: heading.index,
            levels,
        });

        let Some(adornment) = adornment else {
            debug!(current, "no level in that direction");
            return None;
        };
        let header = self.format.make_header(&heading.title, adornment, false);
        Some(Splice {
            range: heading.start..heading.end,
            replacement: header.trim_end_matches('\n').to_string(),
        })
    }

    /// Computes and applies a level change, keeping the level table cached so
    /// repeated shifts of the same heading walk a stable table.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting splice does not fit the text.
    pub fn relevel(&mut self, offset: usize, shift: Shift) -> Result<Option<Splice>, Error> {
        let Some(splice) = self.change_level(offset, shift) else {
            return Ok(None);
        };
        self.splice(&splice)?;
        Ok(Some(splice))
    }

    #[instrument(level = "debug", skip(self))]
    /// The rewrite that gives the heading under `offset` an adornment exactly
    /// as long as its title needs, or `None` if it already has one.
    ///
    /// Only applies when `offset` is on the heading's own lines.
    pub fn normalize(&mut self, offset: usize) -> Option<Splice> {
        let heading = self.heading_at(offset).filter(|h| h.spans(offset))?;
        let header = self
            .format
            .make_header(&heading.title, heading.adornment, false);
        let replacement = header.trim_end_matches('\n');
        (replacement != heading.raw).then(|| Splice {
            range: heading.start..heading.end,
            replacement: replacement.to_string(),
        })
    }

    #[must_use]
    /// Tags a splice with this session's file so it can join an edit plan.
    pub fn edit(&self, splice: Splice, item_name: &str) -> Edit {
        Edit::new(self.file_path.clone(), splice, item_name)
    }
}

#[cfg(test)]
#[path = "tests/session.rs"]
mod tests;
