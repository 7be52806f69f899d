//! Text diffing utilities.
//!
//! This module builds human-readable deltas of line sequences on top of
//! the [`SequenceMatcher`].  The main type is [`Differ`], which compares
//! two sequences of lines and, for stretches that were replaced, runs a
//! second character-level matcher over near-matching line pairs to mark
//! the changed columns inside them.  [`ndiff`] is the convenience entry
//! point and [`restore`] its inverse.
//!
//! Delta lines start with a two-letter code:
//!
//! * `"- "` — the line is unique to the first sequence
//! * `"+ "` — the line is unique to the second sequence
//! * `"  "` — the line is common to both
//! * `"? "` — a guide line pointing at intraline differences; these are
//!   not present in either input
//!
//! ```rust
//! use kindred::text::{ndiff, restore};
//!
//! let old = ["one\n", "two\n", "three\n"];
//! let new = ["ore\n", "tree\n", "emu\n"];
//! let delta = ndiff(&old, &new);
//! assert_eq!(delta[0], "- one\n");
//! assert_eq!(delta[1], "?  ^\n");
//! assert_eq!(restore(&delta, 1).unwrap(), old);
//! ```
//!
//! For rendering changes in the two standard textual diff formats see
//! [`UnifiedDiff`] and [`ContextDiff`].
use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::DiffError;
use crate::matcher::SequenceMatcher;
use crate::select::n_largest;
use crate::types::DiffTag;

mod cdiff;
mod udiff;

pub use self::cdiff::{context_diff, ContextDiff};
pub use self::udiff::{unified_diff, UnifiedDiff};

type LineJunk<'a> = Box<dyn Fn(&str) -> bool + 'a>;
type CharJunk<'a> = Box<dyn Fn(char) -> bool + 'a>;

/// Returns `true` for lines that are blank or hold a lone `#`.
///
/// This is a reasonable line junk predicate for program text.  It is not
/// installed by default anywhere.
pub fn is_line_junk(line: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| Regex::new(r"^\s*#?\s*$").unwrap());
    pattern.is_match(line)
}

/// Returns `true` for spaces and tabs.
///
/// This is the default character junk predicate of [`ndiff`]; syncing
/// intraline matches on blanks rarely helps a reader.
pub fn is_character_junk(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

/// Compares sequences of lines and produces a human-readable delta.
///
/// Both junk predicates are optional.  Line junk keeps the line matcher
/// from syncing on noise lines; character junk does the same for the
/// intraline pass.  [`ndiff`] is the preconfigured shorthand most callers
/// want.
///
/// ```rust
/// use kindred::text::Differ;
///
/// let old = ["one\n", "two\n", "three\n"];
/// let new = ["ore\n", "tree\n", "emu\n"];
/// let delta = Differ::new().compare(&old, &new);
/// assert_eq!(delta[0], "- one\n");
/// ```
#[derive(Default)]
pub struct Differ<'a> {
    linejunk: Option<LineJunk<'a>>,
    charjunk: Option<CharJunk<'a>>,
}

impl<'a> Differ<'a> {
    /// Creates a differ without junk predicates.
    pub fn new() -> Differ<'a> {
        Differ::default()
    }

    /// Sets the line junk predicate.
    pub fn line_junk(mut self, predicate: impl Fn(&str) -> bool + 'a) -> Self {
        self.linejunk = Some(Box::new(predicate));
        self
    }

    /// Sets the character junk predicate.
    pub fn char_junk(mut self, predicate: impl Fn(char) -> bool + 'a) -> Self {
        self.charjunk = Some(Box::new(predicate));
        self
    }

    /// Compares two sequences of lines and returns the delta lines.
    pub fn compare(&self, a: &[&str], b: &[&str]) -> Vec<String> {
        let mut config = SequenceMatcher::configure();
        if let Some(pred) = &self.linejunk {
            config = config.junk(move |line: &&str| pred(*line));
        }
        let mut matcher = config.seqs(a, b);
        let opcodes = matcher.get_opcodes().to_vec();

        let mut delta = Vec::new();
        for op in opcodes {
            let (tag, old_range, new_range) = op.as_tag_tuple();
            match tag {
                DiffTag::Replace => self.fancy_replace(&mut delta, a, old_range, b, new_range),
                DiffTag::Delete => dump(&mut delta, '-', &a[old_range]),
                DiffTag::Insert => dump(&mut delta, '+', &b[new_range]),
                DiffTag::Equal => dump(&mut delta, ' ', &a[old_range]),
            }
        }
        delta
    }

    // Handles a replace opcode: look for the most similar line pair in
    // the two ranges, sync on it, mark the intraline changes, and treat
    // what comes before and after the sync pair the same way.
    fn fancy_replace(
        &self,
        delta: &mut Vec<String>,
        a: &[&str],
        a_range: Range<usize>,
        b: &[&str],
        b_range: Range<usize>,
    ) {
        let (alo, ahi) = (a_range.start, a_range.end);
        let (blo, bhi) = (b_range.start, b_range.end);

        // A pair has to clear 0.75 to count as "close"; the search starts
        // a hair below so a pair sitting exactly at the bar still wins.
        let mut best_ratio = 0.74f32;
        let cutoff = 0.75f32;

        let a_chars: Vec<Vec<char>> = a[alo..ahi]
            .iter()
            .map(|line| line.chars().collect())
            .collect();
        let b_chars: Vec<Vec<char>> = b[blo..bhi]
            .iter()
            .map(|line| line.chars().collect())
            .collect();

        let mut config = SequenceMatcher::configure();
        if let Some(pred) = &self.charjunk {
            config = config.junk(move |ch: &char| pred(*ch));
        }
        let empty: &[char] = &[];
        let mut cruncher = config.seqs(empty, empty);

        let mut eqi = None;
        let mut eqj = None;
        let (mut best_i, mut best_j) = (alo, blo);

        // Each base line is pinned as seq2 so its index is built once per
        // j, not once per pair.  Identical pairs are remembered but never
        // scored; if nothing better turns up they are junk-heavy sync
        // candidates of last resort.
        for j in blo..bhi {
            cruncher.set_seq2(&b_chars[j - blo]);
            for i in alo..ahi {
                if a[i] == b[j] {
                    if eqi.is_none() {
                        eqi = Some(i);
                        eqj = Some(j);
                    }
                    continue;
                }
                cruncher.set_seq1(&a_chars[i - alo]);
                if cruncher.real_quick_ratio() > best_ratio
                    && cruncher.quick_ratio() > best_ratio
                    && cruncher.ratio() > best_ratio
                {
                    best_ratio = cruncher.ratio();
                    best_i = i;
                    best_j = j;
                }
            }
        }

        if best_ratio < cutoff {
            match (eqi, eqj) {
                (Some(i), Some(j)) => {
                    // no close pair, but an identical one; sync there
                    best_i = i;
                    best_j = j;
                }
                _ => {
                    self.plain_replace(delta, a, alo..ahi, b, blo..bhi);
                    return;
                }
            }
        } else {
            // a close pair beats any identical pair found along the way
            eqi = None;
        }

        self.fancy_helper(delta, a, alo..best_i, b, blo..best_j);

        let aelt = a[best_i];
        let belt = b[best_j];
        if eqi.is_none() {
            // build tag strings marking the changed columns of both lines
            let mut atags = String::new();
            let mut btags = String::new();
            cruncher.set_seqs(&a_chars[best_i - alo], &b_chars[best_j - blo]);
            for op in cruncher.get_opcodes() {
                let la = op.old_range().len();
                let lb = op.new_range().len();
                match op.tag() {
                    DiffTag::Replace => {
                        atags.push_str(&"^".repeat(la));
                        btags.push_str(&"^".repeat(lb));
                    }
                    DiffTag::Delete => atags.push_str(&"-".repeat(la)),
                    DiffTag::Insert => btags.push_str(&"+".repeat(lb)),
                    DiffTag::Equal => {
                        atags.push_str(&" ".repeat(la));
                        btags.push_str(&" ".repeat(lb));
                    }
                }
            }
            qformat(delta, aelt, belt, &atags, &btags);
        } else {
            delta.push(format!("  {}", aelt));
        }

        self.fancy_helper(delta, a, best_i + 1..ahi, b, best_j + 1..bhi);
    }

    fn fancy_helper(
        &self,
        delta: &mut Vec<String>,
        a: &[&str],
        a_range: Range<usize>,
        b: &[&str],
        b_range: Range<usize>,
    ) {
        if !a_range.is_empty() {
            if !b_range.is_empty() {
                self.fancy_replace(delta, a, a_range, b, b_range);
            } else {
                dump(delta, '-', &a[a_range]);
            }
        } else if !b_range.is_empty() {
            dump(delta, '+', &b[b_range]);
        }
    }

    fn plain_replace(
        &self,
        delta: &mut Vec<String>,
        a: &[&str],
        a_range: Range<usize>,
        b: &[&str],
        b_range: Range<usize>,
    ) {
        // dump the shorter block first; it eases the reader's burden of
        // keeping the pending side in short-term memory
        if b_range.len() < a_range.len() {
            dump(delta, '+', &b[b_range]);
            dump(delta, '-', &a[a_range]);
        } else {
            dump(delta, '-', &a[a_range]);
            dump(delta, '+', &b[b_range]);
        }
    }
}

fn dump(delta: &mut Vec<String>, code: char, lines: &[&str]) {
    for line in lines {
        delta.push(format!("{} {}", code, line));
    }
}

// Formats a sync pair together with its "?" guide lines.  Leading tabs
// shared by both lines stay in front of the guide markers so the markers
// line up under the columns they point at.
fn qformat(delta: &mut Vec<String>, aline: &str, bline: &str, atags: &str, btags: &str) {
    let mut common = count_leading(aline, '\t').min(count_leading(bline, '\t'));
    common = common.min(count_leading(&atags[..common.min(atags.len())], ' '));
    common = common.min(count_leading(&btags[..common.min(btags.len())], ' '));
    let atags = atags[common..].trim_end();
    let btags = btags[common..].trim_end();

    delta.push(format!("- {}", aline));
    if !atags.is_empty() {
        delta.push(format!("? {}{}\n", "\t".repeat(common), atags));
    }
    delta.push(format!("+ {}", bline));
    if !btags.is_empty() {
        delta.push(format!("? {}{}\n", "\t".repeat(common), btags));
    }
}

fn count_leading(line: &str, ch: char) -> usize {
    line.chars().take_while(|&c| c == ch).count()
}

/// Compares two sequences of lines the way a human would want to read
/// the result.
///
/// This is [`Differ`] with [`is_character_junk`] preinstalled as the
/// character junk predicate and no line junk.
pub fn ndiff(a: &[&str], b: &[&str]) -> Vec<String> {
    Differ::new().char_junk(is_character_junk).compare(a, b)
}

/// Recovers one of the two compared sequences from a delta.
///
/// `which` selects the sequence: `1` for the first, `2` for the second.
/// Guide lines and lines of the other sequence are skipped.
///
/// ```rust
/// use kindred::text::{ndiff, restore};
///
/// let old = ["one\n", "two\n"];
/// let new = ["ore\n", "two\n"];
/// let delta = ndiff(&old, &new);
/// assert_eq!(restore(&delta, 2).unwrap(), new);
/// ```
pub fn restore<S: AsRef<str>>(delta: &[S], which: usize) -> Result<Vec<String>, DiffError> {
    let tag = match which {
        1 => "- ",
        2 => "+ ",
        _ => return Err(DiffError::BadDeltaChoice { which }),
    };
    Ok(delta
        .iter()
        .map(|line| line.as_ref())
        .filter(|line| line.starts_with("  ") || line.starts_with(tag))
        .map(|line| line[2..].to_string())
        .collect())
}

/// Returns the best "good enough" matches for a word from a list of
/// candidates.
///
/// At most `n` candidates scoring at least `cutoff` against `word` come
/// back, best first; ties order towards the lexicographically larger
/// candidate.  `n` must be positive and `cutoff` within `0.0..=1.0`.
///
/// ```rust
/// use kindred::text::get_close_matches;
///
/// let matches = get_close_matches("appel", &["ape", "apple", "peach", "puppy"], 3, 0.6);
/// assert_eq!(matches.unwrap(), vec!["apple", "ape"]);
/// ```
pub fn get_close_matches<'a>(
    word: &str,
    possibilities: &[&'a str],
    n: usize,
    cutoff: f32,
) -> Result<Vec<&'a str>, DiffError> {
    if n == 0 {
        return Err(DiffError::BadMatchCount { n });
    }
    if !(0.0..=1.0).contains(&cutoff) {
        return Err(DiffError::BadCutoff { cutoff });
    }

    let word_chars: Vec<char> = word.chars().collect();
    let candidate_chars: Vec<Vec<char>> = possibilities
        .iter()
        .map(|candidate| candidate.chars().collect())
        .collect();

    // the word is pinned as seq2 so its occurrence index is built once
    let empty: &[char] = &[];
    let mut matcher = SequenceMatcher::new(empty, &word_chars);
    let mut scored = Vec::new();
    for (&candidate, chars) in possibilities.iter().zip(&candidate_chars) {
        matcher.set_seq1(chars);
        if matcher.real_quick_ratio() >= cutoff
            && matcher.quick_ratio() >= cutoff
            && matcher.ratio() >= cutoff
        {
            // spread the ratio over the integers so the pair orders cleanly
            scored.push(((matcher.ratio() * u32::MAX as f32) as u32, candidate));
        }
    }

    Ok(n_largest(n, scored)
        .into_iter()
        .map(|(_, candidate)| candidate)
        .collect())
}

#[test]
fn test_ndiff_fixture() {
    let old = ["one\n", "two\n", "three\n"];
    let new = ["ore\n", "tree\n", "emu\n"];
    let delta = ndiff(&old, &new);
    assert_eq!(
        delta,
        [
            "- one\n",
            "?  ^\n",
            "+ ore\n",
            "?  ^\n",
            "- two\n",
            "- three\n",
            "?  -\n",
            "+ tree\n",
            "+ emu\n",
        ]
    );
    assert_eq!(restore(&delta, 1).unwrap(), old);
    assert_eq!(restore(&delta, 2).unwrap(), new);
}

#[test]
fn test_differ_plain_replace() {
    let old = ["x\n", "same\n"];
    let new = ["y\n", "same\n"];
    let delta = Differ::new().compare(&old, &new);
    assert_eq!(delta, ["- x\n", "+ y\n", "  same\n"]);
}

#[test]
fn test_differ_syncs_on_identical_junk_lines() {
    let old = ["a\n", "\n", "b\n"];
    let new = ["c\n", "\n", "d\n"];
    let delta = Differ::new().line_junk(is_line_junk).compare(&old, &new);
    assert_eq!(delta, ["- a\n", "+ c\n", "  \n", "- b\n", "+ d\n"]);
    assert_eq!(restore(&delta, 1).unwrap(), old);
    assert_eq!(restore(&delta, 2).unwrap(), new);
}

#[test]
fn test_restore_rejects_unknown_side() {
    let delta = vec!["  a\n".to_string()];
    assert_eq!(
        restore(&delta, 3),
        Err(DiffError::BadDeltaChoice { which: 3 })
    );
}

#[test]
fn test_qformat() {
    let mut delta = Vec::new();
    qformat(
        &mut delta,
        "\tabcDefghiJkl\n",
        "\tabcdefGhijkl\n",
        "  ^ ^  ^      ",
        "  ^ ^  ^      ",
    );
    assert_eq!(
        delta,
        [
            "- \tabcDefghiJkl\n",
            "? \t ^ ^  ^\n",
            "+ \tabcdefGhijkl\n",
            "? \t ^ ^  ^\n",
        ]
    );
}

#[test]
fn test_count_leading() {
    assert_eq!(count_leading("\t\tx", '\t'), 2);
    assert_eq!(count_leading("x\t", '\t'), 0);
    assert_eq!(count_leading("", '\t'), 0);
}

#[test]
fn test_get_close_matches() {
    let matches = get_close_matches("appel", &["ape", "apple", "peach", "puppy"], 3, 0.6);
    assert_eq!(matches.unwrap(), vec!["apple", "ape"]);

    // everything scores 0.75 here, so the tie-break alone decides
    let matches = get_close_matches(
        "hulo",
        &[
            "hi", "hulu", "hali", "hoho", "amaz", "zulo", "blah", "hopp", "uulo", "aulo",
        ],
        5,
        0.7,
    );
    assert_eq!(matches.unwrap(), vec!["zulo", "uulo", "hulu", "aulo"]);

    let matches = get_close_matches("word", &[], 3, 0.6);
    assert_eq!(matches.unwrap(), Vec::<&str>::new());
}

#[test]
fn test_get_close_matches_rejects_bad_arguments() {
    assert_eq!(
        get_close_matches("word", &["word"], 0, 0.6),
        Err(DiffError::BadMatchCount { n: 0 })
    );
    assert_eq!(
        get_close_matches("word", &["word"], 3, 1.5),
        Err(DiffError::BadCutoff { cutoff: 1.5 })
    );
}

#[test]
fn test_junk_predicates() {
    assert!(is_line_junk("\n"));
    assert!(is_line_junk("  #  \n"));
    assert!(is_line_junk(""));
    assert!(!is_line_junk("hello\n"));
    assert!(!is_line_junk("# comment\n"));

    assert!(is_character_junk(' '));
    assert!(is_character_junk('\t'));
    assert!(!is_character_junk('\n'));
    assert!(!is_character_junk('x'));
}

#[cfg(test)]
mod props {
    use proptest::prelude::*;

    use super::*;

    fn lines() -> impl Strategy<Value = Vec<String>> {
        proptest::collection::vec("[abc]{0,3}", 0..8)
    }

    proptest! {
        #[test]
        fn ndiff_restore_round_trips(old in lines(), new in lines()) {
            let old_refs: Vec<&str> = old.iter().map(String::as_str).collect();
            let new_refs: Vec<&str> = new.iter().map(String::as_str).collect();
            let delta = ndiff(&old_refs, &new_refs);
            prop_assert_eq!(restore(&delta, 1).unwrap(), old);
            prop_assert_eq!(restore(&delta, 2).unwrap(), new);
        }
    }
}
