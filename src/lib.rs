//! This crate implements human-friendly diffing utilities.  At its core
//! sits a [`SequenceMatcher`] in the tradition of Ratcliff and Obershelp's
//! "gestalt pattern matching": it finds the longest contiguous matching
//! blocks of two sequences of hashable elements, skipping over
//! caller-defined junk.  The matches are rarely minimal edit scripts, but
//! they tend to look right to people.
//!
//! ```rust
//! use kindred::SequenceMatcher;
//!
//! let old: Vec<char> = "qabxcd".chars().collect();
//! let new: Vec<char> = "abycdf".chars().collect();
//! let mut matcher = SequenceMatcher::new(&old, &new);
//! for op in matcher.get_opcodes() {
//!     let (tag, old_range, new_range) = op.as_tag_tuple();
//!     println!("{:7} a[{:?}] b[{:?}]", tag.to_string(), old_range, new_range);
//! }
//! ```
//!
//! ## Functionality
//!
//! * [`matcher`]: the sequence matcher itself, generic over any hashable
//!   element type, along with matching blocks, edit opcodes, grouped
//!   opcodes and the similarity ratios.
//! * [`text`]: line-level diffing built on top of the matcher.  This
//!   covers the human-oriented delta format of [`text::ndiff`] with its
//!   intraline change markers, the unified and context diff renderers,
//!   and fuzzy word lookup through [`text::get_close_matches`].
//!
//! ## Features
//!
//! The crate has a small set of always-on dependencies.  One optional
//! feature exists:
//!
//! * `serde`: implements `Serialize` and `Deserialize` for the public
//!   value types ([`Match`], [`DiffOp`], [`DiffTag`]).
#![warn(missing_docs)]
pub mod matcher;
pub mod text;

mod error;
mod select;
mod types;

pub use self::error::DiffError;
pub use self::matcher::{MatcherConfig, SequenceMatcher};
pub use self::types::*;
