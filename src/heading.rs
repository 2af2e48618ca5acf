//! Heading representation for adornment-styled documents.
//!
//! A heading is a title line with a punctuation underline and, optionally, an
//! identical overline. Headings are derived data: they carry byte offsets into
//! the text they were parsed from and are never mutated, so any edit to that
//! text makes them stale.

use crate::error::Error;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
/// The punctuation style of a heading, which decides its level.
///
/// The encoding of an adornment is its character once for underline-only
/// headings and twice when an overline is present, so `=` and `==` are
/// distinct styles.
pub struct Adornment {
    ch: char,
    overline: bool,
}

impl Adornment {
    /// Fallback level convention: `** = - ^ " + ~ # ' :` for levels 0 to 9.
    pub const CONVENTION: [Self; 10] = [
        Self::over('*'),
        Self::under('='),
        Self::under('-'),
        Self::under('^'),
        Self::under('"'),
        Self::under('+'),
        Self::under('~'),
        Self::under('#'),
        Self::under('\''),
        Self::under(':'),
    ];

    const fn over(ch: char) -> Self {
        Self { ch, overline: true }
    }

    const fn under(ch: char) -> Self {
        Self {
            ch,
            overline: false,
        }
    }

    #[must_use]
    /// Builds an adornment, or `None` if `ch` is not ASCII punctuation.
    pub fn new(ch: char, overline: bool) -> Option<Self> {
        ch.is_ascii_punctuation().then_some(Self { ch, overline })
    }

    #[must_use]
    /// The repeated punctuation character.
    pub fn char(self) -> char {
        self.ch
    }

    #[must_use]
    /// Whether headings in this style carry an overline.
    pub fn has_overline(self) -> bool {
        self.overline
    }
}

impl fmt::Display for Adornment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.overline {
            write!(f, "{0}{0}", self.ch)
        } else {
            write!(f, "{}", self.ch)
        }
    }
}

impl From<Adornment> for String {
    fn from(adornment: Adornment) -> Self {
        adornment.to_string()
    }
}

impl FromStr for Adornment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let adornment = match (chars.next(), chars.next(), chars.next()) {
            (Some(ch), None, None) => Self::new(ch, false),
            (Some(a), Some(b), None) if a == b => Self::new(a, true),
            _ => None,
        };
        adornment.ok_or_else(|| Error::InvalidAdornment(s.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// A validated heading with its level and exact source coordinates.
pub struct Heading {
    /// Rank in the inferred hierarchy (0 is the outermost).
    pub level: usize,
    /// Byte offset of the overline, or of the title line when there is none.
    pub start: usize,
    /// Byte offset just past the underline.
    pub end: usize,
    /// Style that determined the level.
    pub adornment: Adornment,
    /// Title text without trailing whitespace; indentation is kept.
    pub title: String,
    /// Exact source text from `start` to `end`.
    pub raw: String,
    /// Position of the heading in document order.
    pub index: usize,
}

impl Heading {
    #[must_use]
    /// Where a cursor lands when moving to this heading: just after the
    /// underline, before its line break.
    pub fn caret(&self) -> usize {
        self.end
    }

    #[must_use]
    /// Whether `offset` falls on the heading's own lines.
    pub fn spans(&self, offset: usize) -> bool {
        (self.start..=self.end).contains(&offset)
    }
}

#[cfg(test)]
#[path = "tests/heading.rs"]
mod tests;
