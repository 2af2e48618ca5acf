//! The outline index answers structural questions about parsed headings.
//!
//! Headings arrive flat and in document order; the hierarchy is implied by
//! their levels. A heading's region runs from its start to just before the
//! next heading of the same or a shallower level, so it covers its whole
//! subtree. Region ends are computed once, up front, in a single stack pass.
//!
//! Headings are looked up by their `index` and then compared against the
//! entry stored there, so a heading from an older parse is reported as absent
//! rather than matched to whichever heading happens to look the same.

use crate::heading::{Adornment, Heading};
use std::cmp::Ordering;
use std::ops::Range;
use tracing::debug;

#[derive(Clone, Debug)]
/// Parsed headings of one document plus the document length.
pub struct Outline {
    headings: Vec<Heading>,
    region_ends: Vec<usize>,
    text_len: usize,
    default_levels: Vec<Adornment>,
}

impl Outline {
    #[must_use]
    /// Indexes `headings`, which must be in document order as a parser emits
    /// them, for a document of `text_len` bytes.
    pub fn new(headings: Vec<Heading>, text_len: usize) -> Self {
        Self::build(headings, text_len, |_| 1)
    }

    #[must_use]
    /// Indexes `headings` parsed from `text`.
    ///
    /// Regions stop before the whole line break that precedes the next
    /// heading, so `\r\n` text does not leave a stray `\r` at a region end.
    pub fn from_text(headings: Vec<Heading>, text: &str) -> Self {
        let bytes = text.as_bytes();
        Self::build(headings, text.len(), |start| {
            if bytes.get(..start).is_some_and(|before| before.ends_with(b"\r\n")) {
                2
            } else {
                1
            }
        })
    }

    fn build(
        headings: Vec<Heading>,
        text_len: usize,
        separator: impl Fn(usize) -> usize,
    ) -> Self {
        let region_ends = region_ends(&headings, text_len, separator);
        debug!(headings = headings.len(), text_len, "indexed outline");
        Self {
            headings,
            region_ends,
            text_len,
            default_levels: Adornment::CONVENTION.to_vec(),
        }
    }

    #[must_use]
    /// Replaces the fallback styles used by [`Outline::levels`].
    pub fn with_default_levels(mut self, levels: &[Adornment]) -> Self {
        self.default_levels = levels.to_vec();
        self
    }

    #[must_use]
    /// All headings in document order.
    pub fn headings(&self) -> &[Heading] {
        &self.headings
    }

    #[must_use]
    /// The heading at position `index`.
    pub fn get(&self, index: usize) -> Option<&Heading> {
        self.headings.get(index)
    }

    #[must_use]
    /// Number of headings.
    pub fn len(&self) -> usize {
        self.headings.len()
    }

    #[must_use]
    /// Whether the document has no headings at all.
    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
    }

    #[must_use]
    /// Length in bytes of the indexed document.
    pub fn text_len(&self) -> usize {
        self.text_len
    }

    fn position(&self, heading: &Heading) -> Option<usize> {
        self.headings
            .get(heading.index)
            .filter(|stored| *stored == heading)
            .map(|_| heading.index)
    }

    fn contains(&self, position: usize, offset: usize) -> bool {
        let start = self.headings[position].start;
        let end = self.region_ends[position];
        // The last regions also own the end-of-document position.
        start <= offset && (offset < end || (end == self.text_len && offset == end))
    }

    #[must_use]
    /// The deepest heading whose region contains `offset`.
    ///
    /// Returns `None` before the first heading and in the line break
    /// separating top-level regions.
    pub fn belong_to(&self, offset: usize) -> Option<&Heading> {
        let started = self.headings.partition_point(|h| h.start <= offset);
        // Containing regions nest, so the latest-starting one is the deepest.
        (0..started)
            .rev()
            .find(|&position| self.contains(position, offset))
            .map(|position| &self.headings[position])
    }

    #[must_use]
    /// The span of `heading` and everything nested under it.
    pub fn region(&self, heading: &Heading) -> Option<Range<usize>> {
        self.position(heading)
            .map(|position| heading.start..self.region_ends[position])
    }

    #[must_use]
    /// The foldable part of a region: everything after the heading's own lines.
    pub fn body(&self, heading: &Heading) -> Option<Range<usize>> {
        self.region(heading)
            .map(|region| heading.end.min(region.end)..region.end)
    }

    #[must_use]
    /// The following heading, skipping deeper ones if `same_or_shallower`.
    pub fn next(&self, heading: &Heading, same_or_shallower: bool) -> Option<&Heading> {
        self.step(heading, same_or_shallower, 1)
    }

    #[must_use]
    /// The preceding heading, skipping deeper ones if `same_or_shallower`.
    pub fn prev(&self, heading: &Heading, same_or_shallower: bool) -> Option<&Heading> {
        self.step(heading, same_or_shallower, -1)
    }

    #[must_use]
    /// The heading `offset_from_current` positions away among the eligible
    /// headings: `-1` is the previous one, `-2` the one before, and positive
    /// values walk forward.
    pub fn prev_by(
        &self,
        heading: &Heading,
        same_or_shallower: bool,
        offset_from_current: isize,
    ) -> Option<&Heading> {
        self.step(heading, same_or_shallower, offset_from_current)
    }

    fn step(&self, heading: &Heading, same_or_shallower: bool, offset: isize) -> Option<&Heading> {
        let position = self.position(heading)?;
        let eligible =
            |candidate: &&Heading| !same_or_shallower || candidate.level <= heading.level;
        let skip = offset.unsigned_abs().saturating_sub(1);

        match offset.cmp(&0) {
            Ordering::Equal => Some(&self.headings[position]),
            Ordering::Greater => self.headings[position + 1..]
                .iter()
                .filter(eligible)
                .nth(skip),
            Ordering::Less => self.headings[..position]
                .iter()
                .rev()
                .filter(eligible)
                .nth(skip),
        }
    }

    #[must_use]
    /// The heading this one is nested under.
    pub fn parent(&self, heading: &Heading) -> Option<&Heading> {
        let position = self.position(heading)?;
        self.headings[..position]
            .iter()
            .rev()
            .find(|candidate| candidate.level < heading.level)
    }

    #[must_use]
    /// Every enclosing heading, outermost first.
    pub fn ancestors(&self, heading: &Heading) -> Vec<&Heading> {
        let mut chain: Vec<&Heading> =
            std::iter::successors(self.parent(heading), |h| self.parent(h)).collect();
        chain.reverse();
        chain
    }

    #[must_use]
    /// Headings directly nested under this one.
    pub fn children(&self, heading: &Heading) -> Vec<&Heading> {
        let Some(position) = self.position(heading) else {
            return Vec::new();
        };

        let mut shallowest = usize::MAX;
        self.headings[position + 1..]
            .iter()
            .take_while(|candidate| candidate.level > heading.level)
            .filter(|candidate| {
                // A child has no shallower heading between it and its parent.
                let direct = candidate.level <= shallowest;
                shallowest = shallowest.min(candidate.level);
                direct
            })
            .collect()
    }

    #[must_use]
    /// The first heading in the document.
    pub fn first(&self) -> Option<&Heading> {
        self.headings.first()
    }

    #[must_use]
    /// The last heading in the document.
    pub fn last(&self) -> Option<&Heading> {
        self.headings.last()
    }

    #[must_use]
    /// The first heading at exactly `level`.
    pub fn first_at_level(&self, level: usize) -> Option<&Heading> {
        self.headings.iter().find(|h| h.level == level)
    }

    #[must_use]
    /// The last heading at exactly `level`.
    pub fn last_at_level(&self, level: usize) -> Option<&Heading> {
        self.headings.iter().rev().find(|h| h.level == level)
    }

    #[must_use]
    /// The style for each level, index 0 first.
    ///
    /// Levels the document uses keep the document's style. Deeper levels
    /// take the fallback style for that level, skipping styles the document
    /// already uses elsewhere so that no two levels share one.
    pub fn levels(&self) -> Vec<Adornment> {
        let mut table: Vec<Adornment> = Vec::new();
        for heading in &self.headings {
            if heading.level == table.len() {
                table.push(heading.adornment);
            }
        }

        let fallback: Vec<Adornment> = self
            .default_levels
            .iter()
            .skip(table.len())
            .filter(|style| !table.contains(style))
            .copied()
            .collect();
        table.extend(fallback);
        table
    }
}

/// End of each heading's region: just before the line break ahead of the next
/// heading that is not deeper, or the end of the text. `separator` gives the
/// width of that line break for a heading start.
fn region_ends(
    headings: &[Heading],
    text_len: usize,
    separator: impl Fn(usize) -> usize,
) -> Vec<usize> {
    let mut ends = vec![text_len; headings.len()];
    let mut open: Vec<usize> = Vec::new();

    for (position, heading) in headings.iter().enumerate() {
        while let Some(&top) = open.last() {
            if headings[top].level < heading.level {
                break;
            }
            ends[top] = heading
                .start
                .saturating_sub(separator(heading.start))
                .max(headings[top].start);
            open.pop();
        }
        open.push(position);
    }

    ends
}

#[cfg(test)]
#[path = "tests/outline.rs"]
mod tests;
