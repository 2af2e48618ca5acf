//! reStructuredText section titles.
//!
//! A title is a line of text underlined, and optionally overlined, with a
//! single repeated punctuation character. Levels are not fixed by the syntax:
//! each new style gets the next level in order of first appearance.

use crate::formats::Format;
use crate::heading::{Adornment, Heading};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::{debug, trace};

/// Overline (possibly an empty line), title line, underline.
static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mR)^([[:punct:]]*)\r?\n(.+)\r?\n([[:punct:]]+)$")
        .expect("heading pattern is valid")
});

/// reStructuredText heading syntax with a configurable fallback convention.
#[derive(Clone, Debug)]
pub struct RstFormat {
    levels: Vec<Adornment>,
}

impl Default for RstFormat {
    fn default() -> Self {
        Self {
            levels: Adornment::CONVENTION.to_vec(),
        }
    }
}

impl RstFormat {
    #[must_use]
    /// Uses `levels` instead of the standard convention for unclaimed levels.
    pub fn with_levels(levels: Vec<Adornment>) -> Self {
        Self { levels }
    }
}

impl Format for RstFormat {
    fn parse(&self, text: &str) -> Vec<Heading> {
        parse(text)
    }

    fn make_header(&self, title: &str, adornment: Adornment, force_overline: bool) -> String {
        make_header(title, adornment, force_overline)
    }

    fn default_levels(&self) -> &[Adornment] {
        &self.levels
    }
}

/// A match that passed validation but has no level yet.
struct Candidate {
    adornment: Adornment,
    start: usize,
    title: String,
    raw: String,
}

impl Candidate {
    /// Validates a match against `padded`, the text with one leading newline.
    fn from_captures(padded: &str, caps: &Captures<'_>) -> Option<Self> {
        let (over, title, under) = (caps.get(1)?, caps.get(2)?, caps.get(3)?);
        let underline = under.as_str();

        let mut chars = underline.chars();
        let ch = chars.next()?;
        if !chars.all(|c| c == ch) {
            trace!(underline, "mixed adornment characters");
            return None;
        }

        let overline = !over.as_str().is_empty();
        if overline && over.as_str() != underline {
            trace!(overline = over.as_str(), underline, "overline differs from underline");
            return None;
        }

        let text = title.as_str().trim_end();
        if text.trim_start().is_empty() || underline.len() < text.len() {
            trace!(title = text, underline, "underline too short for title");
            return None;
        }

        let block_start = if overline { over.start() } else { title.start() };
        Some(Self {
            adornment: Adornment::new(ch, overline)?,
            start: block_start - 1,
            title: text.to_string(),
            raw: padded[block_start..under.end()].to_string(),
        })
    }

    fn into_heading(self, level: usize, index: usize) -> Heading {
        Heading {
            level,
            start: self.start,
            end: self.start + self.raw.len(),
            adornment: self.adornment,
            title: self.title,
            raw: self.raw,
            index,
        }
    }
}

#[must_use]
/// Finds every heading in `text` and assigns levels by first-seen style.
///
/// Candidates with mixed adornment characters, a mismatched overline or an
/// underline shorter than the title (in UTF-8 bytes) are skipped. Offsets are
/// byte offsets into `text`.
pub fn parse(text: &str) -> Vec<Heading> {
    // A leading newline lets a first-line title match as "empty overline".
    let padded = format!("\n{text}");

    let (headings, styles) = HEADING
        .captures_iter(&padded)
        .filter_map(|caps| Candidate::from_captures(&padded, &caps))
        .fold(
            (Vec::new(), Vec::<Adornment>::new()),
            |(mut headings, mut styles), candidate| {
                let level = if let Some(level) =
                    styles.iter().position(|style| *style == candidate.adornment)
                {
                    level
                } else {
                    styles.push(candidate.adornment);
                    styles.len() - 1
                };
                let index = headings.len();
                headings.push(candidate.into_heading(level, index));
                (headings, styles)
            },
        );

    debug!(headings = headings.len(), levels = styles.len(), "parsed outline");
    headings
}

#[must_use]
/// Renders `title` as a heading in the given style, ending with a newline.
///
/// The adornment spans the title plus its indentation on both sides, counted
/// in UTF-8 bytes so the result always parses back as a heading. An overline
/// is added when the style has one or `force_overline` is set. Only the first
/// line of `title` is used.
///
/// A blank title has zero width, so it renders as empty lines with no
/// adornment and does not parse back as a heading.
pub fn make_header(title: &str, adornment: Adornment, force_overline: bool) -> String {
    let title = title.lines().next().unwrap_or_default().trim_end();
    let text = title.trim_start();
    let indent = title.len() - text.len();
    let line: String = std::iter::repeat_n(adornment.char(), text.len() + 2 * indent).collect();

    if adornment.has_overline() || force_overline {
        format!("{line}\n{title}\n{line}\n")
    } else {
        format!("{title}\n{line}\n")
    }
}

#[cfg(test)]
#[path = "../tests/rst.rs"]
mod tests;
