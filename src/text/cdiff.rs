//! Context diff rendering.
//!
//! The context format is the older cousin of the unified format: each
//! hunk shows the before and after state of the touched region as two
//! separate blocks.
//!
//! ```rust
//! use kindred::text::ContextDiff;
//!
//! let old = ["one\n", "two\n", "three\n"];
//! let new = ["ore\n", "tree\n", "emu\n"];
//! print!(
//!     "{}",
//!     ContextDiff::new(&old, &new).header("old.txt", "new.txt")
//! );
//! ```
use std::fmt;
use std::ops::Range;

use crate::matcher::SequenceMatcher;
use crate::types::{DiffOp, DiffTag};

// Renders a hunk range per the context format: 1-based and inclusive on
// both ends, collapsed to a single number for ranges of length one.
fn format_range_context(range: Range<usize>) -> String {
    let mut beginning = range.start + 1;
    let length = range.end - range.start;
    if length == 0 {
        // empty ranges begin at the line just before the range
        beginning -= 1;
    }
    if length <= 1 {
        return beginning.to_string();
    }
    format!("{},{}", beginning, beginning + length - 1)
}

fn line_prefix(tag: DiffTag) -> &'static str {
    match tag {
        DiffTag::Insert => "+ ",
        DiffTag::Delete => "- ",
        DiffTag::Replace => "! ",
        DiffTag::Equal => "  ",
    }
}

/// A context diff formatter.
///
/// The counterpart of [`UnifiedDiff`](crate::text::UnifiedDiff) for the
/// context format; the two share their configuration surface.  The
/// `Display` implementation writes the complete diff and
/// [`to_lines`](Self::to_lines) returns the individual output lines.
pub struct ContextDiff<'bufs> {
    a: &'bufs [&'bufs str],
    b: &'bufs [&'bufs str],
    from_file: String,
    to_file: String,
    from_file_date: String,
    to_file_date: String,
    context_radius: usize,
    line_term: String,
}

impl<'bufs> ContextDiff<'bufs> {
    /// Creates a formatter for the two line sequences.
    ///
    /// File names and dates default to empty strings, the context radius
    /// to `3` and the line terminator to `"\n"`.
    pub fn new(a: &'bufs [&'bufs str], b: &'bufs [&'bufs str]) -> ContextDiff<'bufs> {
        ContextDiff {
            a,
            b,
            from_file: String::new(),
            to_file: String::new(),
            from_file_date: String::new(),
            to_file_date: String::new(),
            context_radius: 3,
            line_term: "\n".to_string(),
        }
    }

    /// Sets the file names shown in the `***` / `---` header.
    pub fn header(&mut self, from_file: &str, to_file: &str) -> &mut Self {
        self.from_file = from_file.to_string();
        self.to_file = to_file.to_string();
        self
    }

    /// Sets the modification dates shown after the file names.
    pub fn dates(&mut self, from_file_date: &str, to_file_date: &str) -> &mut Self {
        self.from_file_date = from_file_date.to_string();
        self.to_file_date = to_file_date.to_string();
        self
    }

    /// Changes the context radius.  Defaults to `3`.
    pub fn context_radius(&mut self, n: usize) -> &mut Self {
        self.context_radius = n;
        self
    }

    /// Changes the terminator appended to generated lines.  Defaults to
    /// `"\n"`.
    pub fn line_term(&mut self, term: &str) -> &mut Self {
        self.line_term = term.to_string();
        self
    }

    /// Renders the diff and returns its lines.
    ///
    /// As with the unified renderer the header is emitted lazily, so two
    /// equal sequences produce nothing.
    pub fn to_lines(&self) -> Vec<String> {
        let mut matcher = SequenceMatcher::new(self.a, self.b);
        let mut lines = Vec::new();
        let mut started = false;
        for group in matcher.get_grouped_opcodes(self.context_radius) {
            if !started {
                started = true;
                lines.push(format!(
                    "*** {}{}{}",
                    self.from_file,
                    date_field(&self.from_file_date),
                    self.line_term
                ));
                lines.push(format!(
                    "--- {}{}{}",
                    self.to_file,
                    date_field(&self.to_file_date),
                    self.line_term
                ));
            }

            let first = &group[0];
            let last = &group[group.len() - 1];
            lines.push(format!("***************{}", self.line_term));

            let file1_range = format_range_context(first.old_range().start..last.old_range().end);
            lines.push(format!("*** {} ****{}", file1_range, self.line_term));
            if has_any(&group, DiffTag::Replace, DiffTag::Delete) {
                for op in &group {
                    let tag = op.tag();
                    if tag != DiffTag::Insert {
                        for line in &self.a[op.old_range()] {
                            lines.push(format!("{}{}", line_prefix(tag), line));
                        }
                    }
                }
            }

            let file2_range = format_range_context(first.new_range().start..last.new_range().end);
            lines.push(format!("--- {} ----{}", file2_range, self.line_term));
            if has_any(&group, DiffTag::Replace, DiffTag::Insert) {
                for op in &group {
                    let tag = op.tag();
                    if tag != DiffTag::Delete {
                        for line in &self.b[op.new_range()] {
                            lines.push(format!("{}{}", line_prefix(tag), line));
                        }
                    }
                }
            }
        }
        lines
    }
}

impl<'bufs> fmt::Display for ContextDiff<'bufs> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for line in self.to_lines() {
            f.write_str(&line)?;
        }
        Ok(())
    }
}

fn has_any(group: &[DiffOp], first: DiffTag, second: DiffTag) -> bool {
    group
        .iter()
        .any(|op| op.tag() == first || op.tag() == second)
}

fn date_field(date: &str) -> String {
    if date.is_empty() {
        String::new()
    } else {
        format!("\t{}", date)
    }
}

/// Quick way to render a context diff into its lines.
///
/// `n` configures the context radius; everything else keeps the
/// [`ContextDiff`] defaults.
pub fn context_diff(
    a: &[&str],
    b: &[&str],
    from_file: &str,
    to_file: &str,
    n: usize,
) -> Vec<String> {
    ContextDiff::new(a, b)
        .header(from_file, to_file)
        .context_radius(n)
        .to_lines()
}

#[test]
fn test_format_range_context() {
    assert_eq!(format_range_context(1..2), "2");
    assert_eq!(format_range_context(1..3), "2,3");
    assert_eq!(format_range_context(1..4), "2,4");
    assert_eq!(format_range_context(3..3), "3");
}

#[test]
fn test_context_diff_fixture() {
    let old = ["one\n", "two\n", "three\n"];
    let new = ["ore\n", "tree\n", "emu\n"];
    let lines = context_diff(&old, &new, "Original", "Current", 3);
    assert_eq!(
        lines,
        [
            "*** Original\n",
            "--- Current\n",
            "***************\n",
            "*** 1,3 ****\n",
            "! one\n",
            "! two\n",
            "! three\n",
            "--- 1,3 ----\n",
            "! ore\n",
            "! tree\n",
            "! emu\n",
        ]
    );
}

#[test]
fn test_context_diff_mixed_tags() {
    let old = ["one\n", "two\n", "three\n", "four\n"];
    let new = ["one\n", "tree\n", "three\n", "four\n"];
    let lines = context_diff(&old, &new, "a", "b", 3);
    assert_eq!(
        lines,
        [
            "*** a\n",
            "--- b\n",
            "***************\n",
            "*** 1,4 ****\n",
            "  one\n",
            "! two\n",
            "  three\n",
            "  four\n",
            "--- 1,4 ----\n",
            "  one\n",
            "! tree\n",
            "  three\n",
            "  four\n",
        ]
    );
}

#[test]
fn test_context_diff_insert_only() {
    let old = ["one\n"];
    let new = ["one\n", "two\n"];
    let lines = context_diff(&old, &new, "a", "b", 3);
    assert_eq!(
        lines,
        [
            "*** a\n",
            "--- b\n",
            "***************\n",
            "*** 1 ****\n",
            "--- 1,2 ----\n",
            "  one\n",
            "+ two\n",
        ]
    );
}

#[test]
fn test_context_diff_without_changes() {
    let old = ["same\n"];
    assert!(ContextDiff::new(&old, &old).to_lines().is_empty());
}
