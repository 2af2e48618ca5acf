//! adorn: heading outlines for reStructuredText documents.
//!
//! reStructuredText marks section titles with punctuation underlines (and
//! optionally overlines) rather than fixed markers, and a section's level is
//! the order in which its style first appears in the document. This crate
//! parses those headings, indexes the implied tree, and answers the questions
//! an editor asks about it: which section holds the cursor, what span it
//! covers, where the next or previous sibling is, and how to rewrite a heading
//! one level up or down.
//!
//! ```
//! use adorn::{Outline, parse};
//!
//! let text = "Title\n=====\n\nBody\n\nSub\n---\n\nMore\n";
//! let outline = Outline::new(parse(text), text.len());
//! let sub = outline.belong_to(text.len() - 2).unwrap();
//! assert_eq!(sub.title, "Sub");
//! assert_eq!(outline.parent(sub).unwrap().title, "Title");
//! ```
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod edit_plan;
pub mod error;
pub mod formats;
pub mod heading;
pub mod input;
pub mod outline;
pub mod session;

pub use error::Error;
pub use formats::rst::{make_header, parse, RstFormat};
pub use formats::Format;
pub use heading::{Adornment, Heading};
pub use outline::Outline;
pub use session::{Direction, Session, Shift};
