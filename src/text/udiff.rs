//! Unified diff rendering.
//!
//! ```rust
//! use kindred::text::UnifiedDiff;
//!
//! let old = ["one\n", "two\n", "three\n"];
//! let new = ["ore\n", "tree\n", "emu\n"];
//! print!(
//!     "{}",
//!     UnifiedDiff::new(&old, &new).header("old.txt", "new.txt")
//! );
//! ```
use std::fmt;
use std::ops::Range;

use crate::matcher::SequenceMatcher;
use crate::types::DiffTag;

// Renders a hunk range per the unified format: 1-based start plus length,
// with the length omitted when it is exactly one.
fn format_range_unified(range: Range<usize>) -> String {
    let mut beginning = range.start + 1;
    let length = range.end - range.start;
    if length == 1 {
        return beginning.to_string();
    }
    if length == 0 {
        // empty ranges begin at the line just before the range
        beginning -= 1;
    }
    format!("{},{}", beginning, length)
}

/// A unified diff formatter.
///
/// Compares two sequences of lines and renders the changes in the
/// unified format, grouped into hunks with a configurable amount of
/// context.  The `Display` implementation writes the complete diff;
/// [`to_lines`](Self::to_lines) returns the individual output lines
/// instead.
///
/// Content lines are taken verbatim, so inputs split with their line
/// terminators kept (the usual case) produce a newline-terminated diff on
/// their own.  For inputs without terminators set
/// [`line_term`](Self::line_term) to `""` and join the produced lines
/// yourself.
pub struct UnifiedDiff<'bufs> {
    a: &'bufs [&'bufs str],
    b: &'bufs [&'bufs str],
    from_file: String,
    to_file: String,
    from_file_date: String,
    to_file_date: String,
    context_radius: usize,
    line_term: String,
}

impl<'bufs> UnifiedDiff<'bufs> {
    /// Creates a formatter for the two line sequences.
    ///
    /// File names and dates default to empty strings, the context radius
    /// to `3` and the line terminator to `"\n"`.
    pub fn new(a: &'bufs [&'bufs str], b: &'bufs [&'bufs str]) -> UnifiedDiff<'bufs> {
        UnifiedDiff {
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

    /// Sets the file names shown in the `---` / `+++` header.
    pub fn header(&mut self, from_file: &str, to_file: &str) -> &mut Self {
        self.from_file = from_file.to_string();
        self.to_file = to_file.to_string();
        self
    }

    /// Sets the modification dates shown after the file names.
    ///
    /// Dates are accepted verbatim and separated from the file name by a
    /// tab, as the
    /// [unified format](https://pubs.opengroup.org/onlinepubs/9699919799/utilities/diff.html#tag_20_34_10_07)
    /// prescribes.
    pub fn dates(&mut self, from_file_date: &str, to_file_date: &str) -> &mut Self {
        self.from_file_date = from_file_date.to_string();
        self.to_file_date = to_file_date.to_string();
        self
    }

    /// Changes the context radius.
    ///
    /// The context radius is the number of unchanged lines shown around
    /// changes.  This defaults to `3`.
    pub fn context_radius(&mut self, n: usize) -> &mut Self {
        self.context_radius = n;
        self
    }

    /// Changes the terminator appended to generated lines.
    ///
    /// Only header and hunk marker lines are affected; content lines keep
    /// whatever terminator the input had.  Defaults to `"\n"`.
    pub fn line_term(&mut self, term: &str) -> &mut Self {
        self.line_term = term.to_string();
        self
    }

    /// Renders the diff and returns its lines.
    ///
    /// The header is only emitted when there is at least one hunk, so two
    /// equal sequences render as no lines at all.
    pub fn to_lines(&self) -> Vec<String> {
        let mut matcher = SequenceMatcher::new(self.a, self.b);
        let mut lines = Vec::new();
        let mut started = false;
        for group in matcher.get_grouped_opcodes(self.context_radius) {
            if !started {
                started = true;
                lines.push(format!(
                    "--- {}{}{}",
                    self.from_file,
                    date_field(&self.from_file_date),
                    self.line_term
                ));
                lines.push(format!(
                    "+++ {}{}{}",
                    self.to_file,
                    date_field(&self.to_file_date),
                    self.line_term
                ));
            }

            let first = &group[0];
            let last = &group[group.len() - 1];
            let file1_range = format_range_unified(first.old_range().start..last.old_range().end);
            let file2_range = format_range_unified(first.new_range().start..last.new_range().end);
            lines.push(format!(
                "@@ -{} +{} @@{}",
                file1_range, file2_range, self.line_term
            ));

            for op in &group {
                let (tag, old_range, new_range) = op.as_tag_tuple();
                if tag == DiffTag::Equal {
                    for line in &self.a[old_range] {
                        lines.push(format!(" {}", line));
                    }
                    continue;
                }
                if tag == DiffTag::Replace || tag == DiffTag::Delete {
                    for line in &self.a[old_range] {
                        lines.push(format!("-{}", line));
                    }
                }
                if tag == DiffTag::Replace || tag == DiffTag::Insert {
                    for line in &self.b[new_range] {
                        lines.push(format!("+{}", line));
                    }
                }
            }
        }
        lines
    }
}

impl<'bufs> fmt::Display for UnifiedDiff<'bufs> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for line in self.to_lines() {
            f.write_str(&line)?;
        }
        Ok(())
    }
}

fn date_field(date: &str) -> String {
    if date.is_empty() {
        String::new()
    } else {
        format!("\t{}", date)
    }
}

/// Quick way to render a unified diff into its lines.
///
/// `n` configures the context radius; everything else keeps the
/// [`UnifiedDiff`] defaults.
pub fn unified_diff(
    a: &[&str],
    b: &[&str],
    from_file: &str,
    to_file: &str,
    n: usize,
) -> Vec<String> {
    UnifiedDiff::new(a, b)
        .header(from_file, to_file)
        .context_radius(n)
        .to_lines()
}

#[test]
fn test_format_range_unified() {
    assert_eq!(format_range_unified(1..2), "2");
    assert_eq!(format_range_unified(1..3), "2,2");
    assert_eq!(format_range_unified(1..4), "2,3");
    assert_eq!(format_range_unified(3..3), "3,0");
    assert_eq!(format_range_unified(0..0), "0,0");
}

#[test]
fn test_unified_diff_fixture() {
    let old: Vec<&str> = "one two three four".split(' ').collect();
    let new: Vec<&str> = "zero one tree four".split(' ').collect();
    let lines = UnifiedDiff::new(&old, &new)
        .header("Original", "Current")
        .dates("2005-01-26 23:30:50", "2010-04-02 10:20:52")
        .line_term("")
        .to_lines();
    assert_eq!(
        lines,
        [
            "--- Original\t2005-01-26 23:30:50",
            "+++ Current\t2010-04-02 10:20:52",
            "@@ -1,4 +1,4 @@",
            "+zero",
            " one",
            "-two",
            "-three",
            "+tree",
            " four",
        ]
    );
}

#[test]
fn test_unified_diff_display() {
    let old = ["one\n", "two\n", "three\n"];
    let new = ["ore\n", "tree\n", "emu\n"];
    insta::assert_snapshot!(
        UnifiedDiff::new(&old, &new).header("a.txt", "b.txt").to_string(),
        @r###"
    --- a.txt
    +++ b.txt
    @@ -1,3 +1,3 @@
    -one
    -two
    -three
    +ore
    +tree
    +emu
    "###
    );
}

#[test]
fn test_unified_diff_without_changes() {
    let old = ["same\n"];
    assert!(UnifiedDiff::new(&old, &old).to_lines().is_empty());
    assert_eq!(UnifiedDiff::new(&old, &old).to_string(), "");
}

#[test]
fn test_unified_diff_context_clipping() {
    let old: Vec<String> = (0..20).map(|x| format!("{}\n", x)).collect();
    let mut new = old.clone();
    new[10] = "ten\n".to_string();
    let old_refs: Vec<&str> = old.iter().map(String::as_str).collect();
    let new_refs: Vec<&str> = new.iter().map(String::as_str).collect();

    let lines = unified_diff(&old_refs, &new_refs, "a", "b", 2);
    assert_eq!(
        lines,
        [
            "--- a\n",
            "+++ b\n",
            "@@ -9,5 +9,5 @@\n",
            " 8\n",
            " 9\n",
            "-10\n",
            "+ten\n",
            " 11\n",
            " 12\n",
        ]
    );
}
