use thiserror::Error;

/// Errors reported for invalid arguments at the public boundary.
///
/// Empty input sequences are never an error anywhere in this crate; only
/// arguments that cannot be given any meaning are rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum DiffError {
    /// [`get_close_matches`](crate::text::get_close_matches) was asked for
    /// a non-positive number of results.
    #[error("expected a positive match count, got {n}")]
    BadMatchCount {
        /// The rejected count.
        n: usize,
    },
    /// A similarity cutoff outside of `0.0..=1.0`.
    #[error("cutoff must lie within 0.0..=1.0, got {cutoff}")]
    BadCutoff {
        /// The rejected cutoff.
        cutoff: f32,
    },
    /// [`restore`](crate::text::restore) was asked for a delta side other
    /// than `1` or `2`.
    #[error("unknown delta choice (must be 1 or 2): {which}")]
    BadDeltaChoice {
        /// The rejected side.
        which: usize,
    },
}

#[test]
fn test_error_messages() {
    assert_eq!(
        DiffError::BadDeltaChoice { which: 3 }.to_string(),
        "unknown delta choice (must be 1 or 2): 3"
    );
    assert_eq!(
        DiffError::BadMatchCount { n: 0 }.to_string(),
        "expected a positive match count, got 0"
    );
}
