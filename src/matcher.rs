//! The sequence matcher at the core of this crate.
//!
//! [`SequenceMatcher`] compares two sequences of hashable elements in the
//! manner of Ratcliff and Obershelp's "gestalt pattern matching": it
//! repeatedly locates the longest contiguous matching block free of
//! "junk" elements and recurses into the pieces to the left and right of
//! it.  The result is rarely a minimal edit script, but it tends to be
//! one that looks right to people, which is the point.
//!
//! Junk is whatever the caller's predicate says it is, typically blank
//! lines or whitespace.  Junk never anchors a match but can be absorbed
//! at the edges of one.  On top of that an automatic heuristic treats
//! elements that make up more than 1% of a sequence of at least 200
//! elements as *popular* and suppresses them the same way; this keeps the
//! quadratic core fast on inputs with many repeated elements and can be
//! turned off through [`MatcherConfig::autojunk`].
//!
//! ```rust
//! use kindred::{Match, SequenceMatcher};
//!
//! let old: Vec<char> = "private Thread currentThread;".chars().collect();
//! let new: Vec<char> = "private volatile Thread currentThread;".chars().collect();
//! let mut matcher = SequenceMatcher::configure()
//!     .junk(|ch: &char| *ch == ' ')
//!     .seqs(&old, &new);
//! assert_eq!(
//!     matcher.get_matching_blocks(),
//!     [
//!         Match { a: 0, b: 0, size: 8 },
//!         Match { a: 8, b: 17, size: 21 },
//!         Match { a: 29, b: 38, size: 0 },
//!     ]
//! );
//! ```
//!
//! The matcher is deliberately asymmetric: everything derived from the
//! second sequence (the occurrence index, the junk and popular alphabets)
//! survives [`SequenceMatcher::set_seq1`].  To compare one base sequence
//! against many candidates, pin the base as seq2 once and rotate the
//! candidates through seq1.
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::ops::Range;

use indexmap::IndexMap;

use crate::types::{DiffOp, Match};

type JunkPredicate<'bufs, T> = Box<dyn Fn(&T) -> bool + 'bufs>;

fn calculate_ratio(matches: usize, length: usize) -> f32 {
    if length == 0 {
        1.0
    } else {
        2.0 * matches as f32 / length as f32
    }
}

/// A builder type config for [`SequenceMatcher`].
///
/// ```rust
/// # use kindred::SequenceMatcher;
/// let old = ["a\n", "\n", "b\n"];
/// let new = ["a\n", "\n", "c\n"];
/// let matcher = SequenceMatcher::configure()
///     .junk(|line: &&str| line.trim().is_empty())
///     .seqs(&old, &new);
/// ```
pub struct MatcherConfig<'bufs, T> {
    junk: Option<JunkPredicate<'bufs, T>>,
    autojunk: bool,
}

impl<'bufs, T> Default for MatcherConfig<'bufs, T> {
    fn default() -> MatcherConfig<'bufs, T> {
        MatcherConfig {
            junk: None,
            autojunk: true,
        }
    }
}

impl<'bufs, T: Eq + Hash> MatcherConfig<'bufs, T> {
    /// Sets the junk predicate.
    ///
    /// Elements the predicate accepts never form the core of a match.
    /// Without a predicate no element is junk and the filtering pass is
    /// skipped entirely.
    pub fn junk(mut self, predicate: impl Fn(&T) -> bool + 'bufs) -> Self {
        self.junk = Some(Box::new(predicate));
        self
    }

    /// Changes the automatic junk heuristic.  Defaults to `true`.
    ///
    /// When enabled, elements that occur more than `len / 100 + 1` times
    /// in a second sequence of at least 200 elements are treated like
    /// junk for match-core purposes.
    pub fn autojunk(mut self, yes: bool) -> Self {
        self.autojunk = yes;
        self
    }

    /// Creates the matcher over the two sequences.
    pub fn seqs(self, a: &'bufs [T], b: &'bufs [T]) -> SequenceMatcher<'bufs, T> {
        let mut matcher = SequenceMatcher {
            a: &[],
            b: &[],
            junk: self.junk,
            autojunk: self.autojunk,
            b2j: IndexMap::new(),
            bjunk: HashSet::new(),
            bpopular: HashSet::new(),
            fullbcount: None,
            matching_blocks: None,
            opcodes: None,
        };
        matcher.set_seqs(a, b);
        matcher
    }
}

/// Compares pairs of sequences of hashable elements.
///
/// See the [module docs](self) for a description of the algorithm.  All
/// derived data (matching blocks, opcodes, the multiset of the second
/// sequence) is computed on first use and memoized, which is why most
/// queries take `&mut self`.
pub struct SequenceMatcher<'bufs, T> {
    a: &'bufs [T],
    b: &'bufs [T],
    junk: Option<JunkPredicate<'bufs, T>>,
    autojunk: bool,
    b2j: IndexMap<&'bufs T, Vec<usize>>,
    bjunk: HashSet<&'bufs T>,
    bpopular: HashSet<&'bufs T>,
    fullbcount: Option<HashMap<&'bufs T, usize>>,
    matching_blocks: Option<Vec<Match>>,
    opcodes: Option<Vec<DiffOp>>,
}

impl<'bufs, T: Eq + Hash> SequenceMatcher<'bufs, T> {
    /// Configures a matcher before creating it.
    pub fn configure() -> MatcherConfig<'bufs, T> {
        MatcherConfig::default()
    }

    /// Creates a matcher over `a` and `b` without a junk predicate.
    ///
    /// Equivalent to `SequenceMatcher::configure().seqs(a, b)`.
    pub fn new(a: &'bufs [T], b: &'bufs [T]) -> SequenceMatcher<'bufs, T> {
        SequenceMatcher::configure().seqs(a, b)
    }

    /// Replaces both sequences.
    pub fn set_seqs(&mut self, a: &'bufs [T], b: &'bufs [T]) {
        self.set_seq1(a);
        self.set_seq2(b);
    }

    /// Replaces the first sequence.
    ///
    /// Only the matching-block and opcode caches are dropped; everything
    /// derived from the second sequence stays warm.  This is the cheap
    /// direction: when comparing one base sequence against many others,
    /// pin the base as seq2 and vary seq1.
    pub fn set_seq1(&mut self, a: &'bufs [T]) {
        if std::ptr::eq(self.a, a) {
            return;
        }
        self.a = a;
        self.matching_blocks = None;
        self.opcodes = None;
    }

    /// Replaces the second sequence.
    ///
    /// Drops every cache and rebuilds the occurrence index, so this is
    /// the expensive direction.
    pub fn set_seq2(&mut self, b: &'bufs [T]) {
        if std::ptr::eq(self.b, b) {
            return;
        }
        self.b = b;
        self.matching_blocks = None;
        self.opcodes = None;
        self.fullbcount = None;
        self.chain_b();
    }

    // Builds b2j, mapping each element of the second sequence to the
    // ascending list of positions it occurs at, and splits the junk and
    // popular parts of the alphabet off into their own sets.
    fn chain_b(&mut self) {
        let mut b2j: IndexMap<&'bufs T, Vec<usize>> = IndexMap::new();
        for (i, elt) in self.b.iter().enumerate() {
            b2j.entry(elt).or_default().push(i);
        }

        self.bjunk = HashSet::new();
        if let Some(isjunk) = &self.junk {
            let junk: HashSet<&'bufs T> =
                b2j.keys().copied().filter(|&elt| isjunk(elt)).collect();
            b2j.retain(|elt, _| !junk.contains(elt));
            self.bjunk = junk;
        }

        self.bpopular = HashSet::new();
        let n = self.b.len();
        if self.autojunk && n >= 200 {
            let ntest = n / 100 + 1;
            let popular: HashSet<&'bufs T> = b2j
                .iter()
                .filter(|(_, indices)| indices.len() > ntest)
                .map(|(&elt, _)| elt)
                .collect();
            b2j.retain(|elt, _| !popular.contains(elt));
            self.bpopular = popular;
        }

        self.b2j = b2j;
    }

    /// Returns `true` if `element` is junk in the second sequence.
    pub fn is_b_junk(&self, element: &T) -> bool {
        self.bjunk.contains(element)
    }

    /// Returns `true` if `element` is not junk but was suppressed by the
    /// automatic junk heuristic.
    pub fn is_b_popular(&self, element: &T) -> bool {
        self.bpopular.contains(element)
    }

    /// Finds the longest matching block within the two windows.
    ///
    /// Of all blocks `a[i..i + size] == b[j..j + size]` inside the
    /// windows whose core contains no junk, the longest is returned, with
    /// ties broken towards the smallest `i` and then the smallest `j`.
    /// The block is then grown at both edges over adjacent equal
    /// elements, non-junk first and junk after, so junk ends up inside a
    /// match only ever at its fringes.
    ///
    /// ```rust
    /// # use kindred::{Match, SequenceMatcher};
    /// let old: Vec<char> = " abcd".chars().collect();
    /// let new: Vec<char> = "abcd abcd".chars().collect();
    /// let matcher = SequenceMatcher::new(&old, &new);
    /// assert_eq!(
    ///     matcher.find_longest_match(0..5, 0..9),
    ///     Match { a: 0, b: 4, size: 5 }
    /// );
    /// ```
    ///
    /// Empty windows yield a zero-sized match at the window start.
    pub fn find_longest_match(&self, a_range: Range<usize>, b_range: Range<usize>) -> Match {
        let (alo, ahi) = (a_range.start, a_range.end);
        let (blo, bhi) = (b_range.start, b_range.end);
        let mut besti = alo;
        let mut bestj = blo;
        let mut bestsize = 0usize;

        // One rolling row of the length table: after processing a[i],
        // j2len[j] is the length of the longest junk-free match ending at
        // a[i] and b[j].  Each new row must only ever read the previous
        // one, which the ascending position lists guarantee.
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut newj2len: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    newj2len.insert(j, k);
                    if k > bestsize {
                        besti = i + 1 - k;
                        bestj = j + 1 - k;
                        bestsize = k;
                    }
                }
            }
            j2len = newj2len;
        }

        // Grow the match over adjacent equal non-junk elements first.
        // Popular elements are absent from b2j and therefore never the
        // core above, but they are legitimate here.
        while besti > alo
            && bestj > blo
            && !self.is_b_junk(&self.b[bestj - 1])
            && self.a[besti - 1] == self.b[bestj - 1]
        {
            besti -= 1;
            bestj -= 1;
            bestsize += 1;
        }
        while besti + bestsize < ahi
            && bestj + bestsize < bhi
            && !self.is_b_junk(&self.b[bestj + bestsize])
            && self.a[besti + bestsize] == self.b[bestj + bestsize]
        {
            bestsize += 1;
        }

        // Only then absorb equal junk hugging the match at either edge.
        while besti > alo
            && bestj > blo
            && self.is_b_junk(&self.b[bestj - 1])
            && self.a[besti - 1] == self.b[bestj - 1]
        {
            besti -= 1;
            bestj -= 1;
            bestsize += 1;
        }
        while besti + bestsize < ahi
            && bestj + bestsize < bhi
            && self.is_b_junk(&self.b[bestj + bestsize])
            && self.a[besti + bestsize] == self.b[bestj + bestsize]
        {
            bestsize += 1;
        }

        Match {
            a: besti,
            b: bestj,
            size: bestsize,
        }
    }

    /// Returns the list of matching blocks.
    ///
    /// The blocks ascend strictly in both coordinates, no two of them
    /// touch, and the list is terminated by the zero-sized sentinel
    /// `Match { a: len1, b: len2, size: 0 }`.  The result is computed
    /// once and memoized.
    pub fn get_matching_blocks(&mut self) -> &[Match] {
        if self.matching_blocks.is_none() {
            self.matching_blocks = Some(self.compute_matching_blocks());
        }
        self.matching_blocks.as_deref().unwrap()
    }

    fn compute_matching_blocks(&self) -> Vec<Match> {
        let (la, lb) = (self.a.len(), self.b.len());

        // An explicit work list instead of recursion; deeply nested
        // windows have blown the stack on real inputs.
        let mut queue = vec![(0, la, 0, lb)];
        let mut matched = Vec::new();
        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let m = self.find_longest_match(alo..ahi, blo..bhi);
            if m.size > 0 {
                if alo < m.a && blo < m.b {
                    queue.push((alo, m.a, blo, m.b));
                }
                if m.a + m.size < ahi && m.b + m.size < bhi {
                    queue.push((m.a + m.size, ahi, m.b + m.size, bhi));
                }
                matched.push(m);
            }
        }
        matched.sort_unstable();

        // Edge extension can make two independently found blocks touch;
        // fold such runs into a single block.
        let mut non_adjacent: Vec<Match> = Vec::with_capacity(matched.len() + 1);
        let (mut i1, mut j1, mut k1) = (0, 0, 0);
        for m in matched {
            if i1 + k1 == m.a && j1 + k1 == m.b {
                k1 += m.size;
            } else {
                if k1 > 0 {
                    non_adjacent.push(Match {
                        a: i1,
                        b: j1,
                        size: k1,
                    });
                }
                i1 = m.a;
                j1 = m.b;
                k1 = m.size;
            }
        }
        if k1 > 0 {
            non_adjacent.push(Match {
                a: i1,
                b: j1,
                size: k1,
            });
        }
        non_adjacent.push(Match {
            a: la,
            b: lb,
            size: 0,
        });
        non_adjacent
    }

    /// Returns the edit operations describing how to turn the first
    /// sequence into the second.
    ///
    /// The operations tile both sequences in lockstep from `(0, 0)` to
    /// `(len1, len2)`.  The result is computed once and memoized.
    pub fn get_opcodes(&mut self) -> &[DiffOp] {
        if self.opcodes.is_none() {
            self.get_matching_blocks();
            let blocks = self.matching_blocks.as_deref().unwrap();
            let mut opcodes = Vec::with_capacity(blocks.len());
            let (mut i, mut j) = (0, 0);
            for m in blocks {
                // Emit whatever it takes to move the cursors from (i, j)
                // to the start of the block, then the block itself.
                if i < m.a && j < m.b {
                    opcodes.push(DiffOp::Replace {
                        old_index: i,
                        old_len: m.a - i,
                        new_index: j,
                        new_len: m.b - j,
                    });
                } else if i < m.a {
                    opcodes.push(DiffOp::Delete {
                        old_index: i,
                        old_len: m.a - i,
                        new_index: j,
                    });
                } else if j < m.b {
                    opcodes.push(DiffOp::Insert {
                        old_index: i,
                        new_index: j,
                        new_len: m.b - j,
                    });
                }
                i = m.a + m.size;
                j = m.b + m.size;
                if m.size > 0 {
                    opcodes.push(DiffOp::Equal {
                        old_index: m.a,
                        new_index: m.b,
                        len: m.size,
                    });
                }
            }
            self.opcodes = Some(opcodes);
        }
        self.opcodes.as_deref().unwrap()
    }

    /// Isolates change clusters by eliminating ranges with no changes.
    ///
    /// Each returned group covers a run of nearby changes with at most
    /// `n` equal elements of context on either side.  Long equal
    /// stretches between changes are split and leave holes behind, which
    /// is what unified and context diffs are built from.
    pub fn get_grouped_opcodes(&mut self, n: usize) -> Vec<Vec<DiffOp>> {
        let mut codes = self.get_opcodes().to_vec();
        if codes.is_empty() {
            codes.push(DiffOp::Equal {
                old_index: 0,
                new_index: 0,
                len: 1,
            });
        }

        if let Some(DiffOp::Equal {
            old_index,
            new_index,
            len,
        }) = codes.first_mut()
        {
            let offset = (*len).saturating_sub(n);
            *old_index += offset;
            *new_index += offset;
            *len -= offset;
        }
        if let Some(DiffOp::Equal { len, .. }) = codes.last_mut() {
            *len -= (*len).saturating_sub(n);
        }

        let mut groups = Vec::new();
        let mut pending = Vec::new();
        for op in codes {
            if let DiffOp::Equal {
                old_index,
                new_index,
                len,
            } = op
            {
                // End the current group and start a new one whenever
                // there is a large range with no changes.
                if len > n * 2 {
                    pending.push(DiffOp::Equal {
                        old_index,
                        new_index,
                        len: n,
                    });
                    groups.push(std::mem::take(&mut pending));
                    let offset = len.saturating_sub(n);
                    pending.push(DiffOp::Equal {
                        old_index: old_index + offset,
                        new_index: new_index + offset,
                        len: len - offset,
                    });
                    continue;
                }
            }
            pending.push(op);
        }
        match pending.as_slice() {
            [] | [DiffOp::Equal { .. }] => {}
            _ => groups.push(pending),
        }
        groups
    }

    /// Return a measure of the sequences' similarity in the range `0..=1`.
    ///
    /// A ratio of `1.0` means the two sequences are a complete match, a
    /// ratio of `0.0` that they have nothing in common.  The value is
    /// `2.0 * M / T` where `T` is the total number of elements in both
    /// sequences and `M` the number of matched elements; two empty
    /// sequences are a complete match.
    ///
    /// ```rust
    /// # use kindred::SequenceMatcher;
    /// let old: Vec<char> = "abcd".chars().collect();
    /// let new: Vec<char> = "bcde".chars().collect();
    /// let mut matcher = SequenceMatcher::new(&old, &new);
    /// assert_eq!(matcher.ratio(), 0.75);
    /// ```
    pub fn ratio(&mut self) -> f32 {
        let matches = self
            .get_matching_blocks()
            .iter()
            .map(|m| m.size)
            .sum::<usize>();
        calculate_ratio(matches, self.a.len() + self.b.len())
    }

    /// Return an upper bound on [`ratio`](Self::ratio) relatively quickly.
    ///
    /// This treats both sequences as multisets and counts the elements
    /// they have in common, which ignores ordering entirely.
    pub fn quick_ratio(&mut self) -> f32 {
        if self.fullbcount.is_none() {
            let mut fullbcount: HashMap<&'bufs T, usize> = HashMap::new();
            for elt in self.b {
                *fullbcount.entry(elt).or_insert(0) += 1;
            }
            self.fullbcount = Some(fullbcount);
        }
        let fullbcount = self.fullbcount.as_ref().unwrap();

        // avail[elt] is the number of occurrences of elt in b not yet
        // claimed by an earlier occurrence in a; it may go negative.
        let mut avail: HashMap<&T, isize> = HashMap::new();
        let mut matches = 0usize;
        for elt in self.a {
            let numb = match avail.get(elt) {
                Some(&remaining) => remaining,
                None => fullbcount.get(elt).copied().unwrap_or(0) as isize,
            };
            avail.insert(elt, numb - 1);
            if numb > 0 {
                matches += 1;
            }
        }
        calculate_ratio(matches, self.a.len() + self.b.len())
    }

    /// Return an upper bound on [`ratio`](Self::ratio) very quickly.
    ///
    /// Only the lengths of the two sequences enter into this bound.
    pub fn real_quick_ratio(&self) -> f32 {
        let (la, lb) = (self.a.len(), self.b.len());
        calculate_ratio(la.min(lb), la + lb)
    }
}

#[test]
fn test_ratio() {
    let old: Vec<char> = "abcd".chars().collect();
    let new: Vec<char> = "bcde".chars().collect();
    let mut matcher = SequenceMatcher::new(&old, &new);
    assert_eq!(matcher.ratio(), 0.75);
    assert_eq!(matcher.quick_ratio(), 0.75);
    assert_eq!(matcher.real_quick_ratio(), 1.0);
}

#[test]
fn test_ratio_degenerate() {
    let empty: &[char] = &[];
    let old: Vec<char> = "abcd".chars().collect();

    let mut matcher = SequenceMatcher::new(empty, empty);
    assert_eq!(matcher.ratio(), 1.0);
    assert_eq!(matcher.quick_ratio(), 1.0);
    assert_eq!(matcher.real_quick_ratio(), 1.0);

    let mut matcher = SequenceMatcher::new(&old, empty);
    assert_eq!(matcher.ratio(), 0.0);

    let mut matcher = SequenceMatcher::new(&old, &old);
    assert_eq!(matcher.ratio(), 1.0);
}

#[test]
fn test_find_longest_match() {
    let old: Vec<char> = " abcd".chars().collect();
    let new: Vec<char> = "abcd abcd".chars().collect();

    let matcher = SequenceMatcher::new(&old, &new);
    assert_eq!(
        matcher.find_longest_match(0..5, 0..9),
        Match { a: 0, b: 4, size: 5 }
    );

    let matcher = SequenceMatcher::configure()
        .junk(|ch: &char| *ch == ' ')
        .seqs(&old, &new);
    assert_eq!(
        matcher.find_longest_match(0..5, 0..9),
        Match { a: 1, b: 0, size: 4 }
    );
}

#[test]
fn test_find_longest_match_empty_window() {
    let old: Vec<char> = "abc".chars().collect();
    let matcher = SequenceMatcher::new(&old, &old);
    assert_eq!(
        matcher.find_longest_match(1..1, 0..3),
        Match { a: 1, b: 0, size: 0 }
    );
}

#[test]
fn test_no_prefix_stripping() {
    // For "ab" vs "acab" the trailing "ab" is the right anchor; settling
    // on the shared leading "a" would mislead every downstream consumer.
    let old: Vec<char> = "ab".chars().collect();
    let new: Vec<char> = "acab".chars().collect();
    let matcher = SequenceMatcher::new(&old, &new);
    assert_eq!(
        matcher.find_longest_match(0..2, 0..4),
        Match { a: 0, b: 2, size: 2 }
    );
}

#[test]
fn test_matching_blocks_with_junk() {
    let old: Vec<char> = "private Thread currentThread;".chars().collect();
    let new: Vec<char> = "private volatile Thread currentThread;".chars().collect();
    let mut matcher = SequenceMatcher::configure()
        .junk(|ch: &char| *ch == ' ')
        .seqs(&old, &new);
    assert_eq!(
        matcher.get_matching_blocks(),
        [
            Match { a: 0, b: 0, size: 8 },
            Match { a: 8, b: 17, size: 21 },
            Match { a: 29, b: 38, size: 0 },
        ]
    );
    assert_eq!(
        matcher.get_opcodes(),
        [
            DiffOp::Equal {
                old_index: 0,
                new_index: 0,
                len: 8
            },
            DiffOp::Insert {
                old_index: 8,
                new_index: 8,
                new_len: 9
            },
            DiffOp::Equal {
                old_index: 8,
                new_index: 17,
                len: 21
            },
        ]
    );
    assert_eq!((matcher.ratio() * 1000.0).round(), 866.0);
}

#[test]
fn test_opcodes() {
    let old: Vec<char> = "qabxcd".chars().collect();
    let new: Vec<char> = "abycdf".chars().collect();
    let mut matcher = SequenceMatcher::new(&old, &new);
    assert_eq!(
        matcher.get_opcodes(),
        [
            DiffOp::Delete {
                old_index: 0,
                old_len: 1,
                new_index: 0
            },
            DiffOp::Equal {
                old_index: 1,
                new_index: 0,
                len: 2
            },
            DiffOp::Replace {
                old_index: 3,
                old_len: 1,
                new_index: 2,
                new_len: 1
            },
            DiffOp::Equal {
                old_index: 4,
                new_index: 3,
                len: 2
            },
            DiffOp::Insert {
                old_index: 6,
                new_index: 5,
                new_len: 1
            },
        ]
    );
}

#[test]
fn test_grouped_opcodes() {
    let old: Vec<String> = (1..40).map(|x| x.to_string()).collect();
    let mut new = old.clone();
    new.insert(8, "i".to_string());
    new[20].push('x');
    new.drain(23..28);
    new[30].push('y');

    let mut matcher = SequenceMatcher::new(&old, &new);
    assert_eq!(
        matcher.get_grouped_opcodes(3),
        vec![
            vec![
                DiffOp::Equal {
                    old_index: 5,
                    new_index: 5,
                    len: 3
                },
                DiffOp::Insert {
                    old_index: 8,
                    new_index: 8,
                    new_len: 1
                },
                DiffOp::Equal {
                    old_index: 8,
                    new_index: 9,
                    len: 3
                },
            ],
            vec![
                DiffOp::Equal {
                    old_index: 16,
                    new_index: 17,
                    len: 3
                },
                DiffOp::Replace {
                    old_index: 19,
                    old_len: 1,
                    new_index: 20,
                    new_len: 1
                },
                DiffOp::Equal {
                    old_index: 20,
                    new_index: 21,
                    len: 2
                },
                DiffOp::Delete {
                    old_index: 22,
                    old_len: 5,
                    new_index: 23
                },
                DiffOp::Equal {
                    old_index: 27,
                    new_index: 23,
                    len: 3
                },
            ],
            vec![
                DiffOp::Equal {
                    old_index: 31,
                    new_index: 27,
                    len: 3
                },
                DiffOp::Replace {
                    old_index: 34,
                    old_len: 1,
                    new_index: 30,
                    new_len: 1
                },
                DiffOp::Equal {
                    old_index: 35,
                    new_index: 31,
                    len: 3
                },
            ],
        ]
    );
}

#[test]
fn test_grouped_opcodes_without_changes() {
    let old: Vec<char> = "abcdef".chars().collect();
    let mut matcher = SequenceMatcher::new(&old, &old);
    assert!(matcher.get_grouped_opcodes(3).is_empty());

    let empty: &[char] = &[];
    let mut matcher = SequenceMatcher::new(empty, empty);
    assert!(matcher.get_grouped_opcodes(3).is_empty());
}

#[test]
fn test_autojunk() {
    let old: Vec<char> = "b".repeat(200).chars().collect();
    let new: Vec<char> = format!("a{}", "b".repeat(199)).chars().collect();

    let mut matcher = SequenceMatcher::new(&old, &new);
    assert_eq!(matcher.ratio(), 0.0);
    assert!(matcher.is_b_popular(&'b'));
    assert!(!matcher.is_b_junk(&'b'));

    let mut matcher = SequenceMatcher::configure().autojunk(false).seqs(&old, &new);
    assert!(matcher.ratio() > 0.99);
    assert!(!matcher.is_b_popular(&'b'));
}

#[test]
fn test_set_seq1_keeps_second_sequence_state() {
    let base: Vec<char> = "abcde".chars().collect();
    let first: Vec<char> = "abxde".chars().collect();
    let second: Vec<char> = "zcde".chars().collect();

    let mut matcher = SequenceMatcher::new(&first, &base);
    assert_eq!(matcher.ratio(), 0.8);
    assert_eq!(matcher.quick_ratio(), 0.8);

    matcher.set_seq1(&second);
    assert_eq!(matcher.ratio(), 6.0 / 9.0);
}

#[test]
fn test_queries_are_memoized() {
    let old: Vec<char> = "qabxcd".chars().collect();
    let new: Vec<char> = "abycdf".chars().collect();
    let mut matcher = SequenceMatcher::new(&old, &new);

    let blocks = matcher.get_matching_blocks().to_vec();
    assert_eq!(matcher.get_matching_blocks(), blocks.as_slice());
    let opcodes = matcher.get_opcodes().to_vec();
    assert_eq!(matcher.get_opcodes(), opcodes.as_slice());
}

#[cfg(test)]
mod props {
    use proptest::prelude::*;

    use super::*;
    use crate::types::DiffTag;

    fn seq() -> impl Strategy<Value = Vec<char>> {
        proptest::collection::vec(prop::sample::select(vec!['a', 'b', 'c', ' ']), 0..24)
    }

    proptest! {
        #[test]
        fn ratio_bounds_hold(old in seq(), new in seq()) {
            let mut matcher = SequenceMatcher::new(&old, &new);
            let ratio = matcher.ratio();
            let quick = matcher.quick_ratio();
            let real_quick = matcher.real_quick_ratio();
            prop_assert!(ratio <= quick);
            prop_assert!(quick <= real_quick);
        }

        #[test]
        fn matching_blocks_are_canonical(old in seq(), new in seq()) {
            let mut matcher = SequenceMatcher::new(&old, &new);
            let blocks = matcher.get_matching_blocks().to_vec();

            let sentinel = blocks[blocks.len() - 1];
            prop_assert_eq!(sentinel, Match { a: old.len(), b: new.len(), size: 0 });

            for m in &blocks {
                prop_assert_eq!(&old[m.a_range()], &new[m.b_range()]);
            }
            for pair in blocks.windows(2) {
                let (x, y) = (pair[0], pair[1]);
                prop_assert!(x.size > 0);
                if y.size > 0 {
                    prop_assert!(x.a < y.a && x.b < y.b);
                    prop_assert!(!(x.a + x.size == y.a && x.b + x.size == y.b));
                }
            }
        }

        #[test]
        fn opcodes_tile_both_sequences(old in seq(), new in seq()) {
            let mut matcher = SequenceMatcher::new(&old, &new);
            let opcodes = matcher.get_opcodes().to_vec();

            let (mut i, mut j) = (0, 0);
            let mut last_tag = None;
            for op in &opcodes {
                let (tag, old_range, new_range) = op.as_tag_tuple();
                prop_assert_eq!(old_range.start, i);
                prop_assert_eq!(new_range.start, j);
                match tag {
                    DiffTag::Equal => {
                        prop_assert_eq!(old_range.len(), new_range.len());
                        prop_assert_eq!(&old[old_range.clone()], &new[new_range.clone()]);
                    }
                    DiffTag::Delete => {
                        prop_assert!(!old_range.is_empty() && new_range.is_empty());
                    }
                    DiffTag::Insert => {
                        prop_assert!(old_range.is_empty() && !new_range.is_empty());
                    }
                    DiffTag::Replace => {
                        prop_assert!(!old_range.is_empty() && !new_range.is_empty());
                    }
                }
                prop_assert!(!(last_tag == Some(DiffTag::Equal) && tag == DiffTag::Equal));
                last_tag = Some(tag);
                i = old_range.end;
                j = new_range.end;
            }
            prop_assert_eq!(i, old.len());
            prop_assert_eq!(j, new.len());
        }
    }
}
