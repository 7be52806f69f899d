use std::fmt;
use std::ops::Range;

/// A run of identical elements in both sequences.
///
/// `Match { a, b, size }` records that `seq1[a..a + size]` equals
/// `seq2[b..b + size]` element by element.  The matching-block list
/// produced by
/// [`get_matching_blocks`](crate::SequenceMatcher::get_matching_blocks)
/// is terminated by a sentinel match of size zero positioned at the end
/// of both sequences.
///
/// Matches order lexicographically by `(a, b, size)`.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Match {
    /// Start of the run in the first sequence.
    pub a: usize,
    /// Start of the run in the second sequence.
    pub b: usize,
    /// Number of matching elements.
    pub size: usize,
}

impl Match {
    /// Returns the matched range in the first sequence.
    pub fn a_range(&self) -> Range<usize> {
        self.a..self.a + self.size
    }

    /// Returns the matched range in the second sequence.
    pub fn b_range(&self) -> Range<usize> {
        self.b..self.b + self.size
    }
}

/// The tag of a [`DiffOp`].
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiffTag {
    /// The ranges are equal in both sequences.
    Equal,
    /// The range only exists in the first sequence.
    Delete,
    /// The range only exists in the second sequence.
    Insert,
    /// A range of the first sequence is replaced by a range of the second.
    Replace,
}

impl fmt::Display for DiffTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            DiffTag::Equal => "equal",
            DiffTag::Delete => "delete",
            DiffTag::Insert => "insert",
            DiffTag::Replace => "replace",
        })
    }
}

/// Utility enum to capture a diff operation.
///
/// The operations derived from a matching-block list tile both sequences
/// in lockstep: the first operation starts at `(0, 0)`, every operation
/// picks up exactly where its predecessor ended, and the last one ends at
/// `(len1, len2)`.  A `Delete` covers an empty range of the second
/// sequence and an `Insert` an empty range of the first; `Equal` covers
/// ranges of identical length and `Replace` two non-empty ranges.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiffOp {
    /// A segment equal in both sequences.
    Equal {
        /// Start of the segment in the first sequence.
        old_index: usize,
        /// Start of the segment in the second sequence.
        new_index: usize,
        /// Length of the segment.
        len: usize,
    },
    /// A segment that only exists in the first sequence.
    Delete {
        /// Start of the deleted segment in the first sequence.
        old_index: usize,
        /// Length of the deleted segment.
        old_len: usize,
        /// Position in the second sequence where the deletion occurred.
        new_index: usize,
    },
    /// A segment that only exists in the second sequence.
    Insert {
        /// Position in the first sequence where the insertion occurred.
        old_index: usize,
        /// Start of the inserted segment in the second sequence.
        new_index: usize,
        /// Length of the inserted segment.
        new_len: usize,
    },
    /// A segment of the first sequence replaced by one of the second.
    Replace {
        /// Start of the replaced segment in the first sequence.
        old_index: usize,
        /// Length of the replaced segment.
        old_len: usize,
        /// Start of the replacement in the second sequence.
        new_index: usize,
        /// Length of the replacement.
        new_len: usize,
    },
}

impl DiffOp {
    /// Returns the tag of the operation.
    pub fn tag(&self) -> DiffTag {
        self.as_tag_tuple().0
    }

    /// Returns the range the operation covers in the first sequence.
    pub fn old_range(&self) -> Range<usize> {
        self.as_tag_tuple().1
    }

    /// Returns the range the operation covers in the second sequence.
    pub fn new_range(&self) -> Range<usize> {
        self.as_tag_tuple().2
    }

    /// Decomposes the operation into a tag and the two covered ranges.
    pub fn as_tag_tuple(&self) -> (DiffTag, Range<usize>, Range<usize>) {
        match *self {
            DiffOp::Equal {
                old_index,
                new_index,
                len,
            } => (
                DiffTag::Equal,
                old_index..old_index + len,
                new_index..new_index + len,
            ),
            DiffOp::Delete {
                old_index,
                old_len,
                new_index,
            } => (
                DiffTag::Delete,
                old_index..old_index + old_len,
                new_index..new_index,
            ),
            DiffOp::Insert {
                old_index,
                new_index,
                new_len,
            } => (
                DiffTag::Insert,
                old_index..old_index,
                new_index..new_index + new_len,
            ),
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => (
                DiffTag::Replace,
                old_index..old_index + old_len,
                new_index..new_index + new_len,
            ),
        }
    }
}

#[test]
fn test_match_ranges() {
    let m = Match { a: 2, b: 5, size: 3 };
    assert_eq!(m.a_range(), 2..5);
    assert_eq!(m.b_range(), 5..8);
}

#[test]
fn test_op_ranges() {
    let op = DiffOp::Delete {
        old_index: 3,
        old_len: 2,
        new_index: 4,
    };
    assert_eq!(op.tag(), DiffTag::Delete);
    assert_eq!(op.old_range(), 3..5);
    assert!(op.new_range().is_empty());

    let op = DiffOp::Insert {
        old_index: 1,
        new_index: 1,
        new_len: 4,
    };
    assert!(op.old_range().is_empty());
    assert_eq!(op.new_range(), 1..5);
}
