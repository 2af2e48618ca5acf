//! Format trait and implementations for different heading syntaxes.
//!
//! This module defines the `Format` trait which abstracts over how a document
//! marks its headings: how to find them, how to write one back out, and which
//! styles to fall back on when the document has not used a level yet.

pub mod rst;

use crate::heading::{Adornment, Heading};
use crate::outline::Outline;

/// A heading syntax that can be parsed into an outline and rendered back.
pub trait Format {
    /// Finds every valid heading in `text`, in document order.
    fn parse(&self, text: &str) -> Vec<Heading>;

    /// Renders the canonical heading text for `title` in the given style.
    fn make_header(&self, title: &str, adornment: Adornment, force_overline: bool) -> String;

    /// Styles used for levels the document has not claimed yet.
    fn default_levels(&self) -> &[Adornment];

    /// Parses `text` and indexes the result.
    fn outline(&self, text: &str) -> Outline {
        Outline::from_text(self.parse(text), text).with_default_levels(self.default_levels())
    }
}
