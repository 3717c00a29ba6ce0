mod diff_error;
mod fragment;
pub mod lcs;

pub use diff_error::DiffError;
pub use fragment::{
    DiffFragment, FragmentKind, merge_adjacent, reconstruct_original, reconstruct_revised,
};

use crate::tokenizer::tokenize;

/// Computes a word-level diff between `original` and `revised`.
///
/// Both inputs are split with [`tokenize`] and aligned via their longest
/// common subsequence. The returned fragments are maximal, so no two
/// neighbours share a kind, and they reconstruct either input exactly (see
/// [`reconstruct_original`] and [`reconstruct_revised`]).
///
/// Runs in `O(MN)` time and space in the number of tokens; use
/// [`try_compute_diff`] to put a ceiling on that.
///
/// ```
/// use jasoseo::{DiffFragment, compute_diff};
///
/// let fragments = compute_diff("The quick brown fox", "The fast brown fox");
/// assert_eq!(
///     fragments,
///     vec![
///         DiffFragment::unchanged("The "),
///         DiffFragment::deleted("quick"),
///         DiffFragment::inserted("fast"),
///         DiffFragment::unchanged(" brown fox"),
///     ]
/// );
/// ```
#[must_use]
pub fn compute_diff(original: &str, revised: &str) -> Vec<DiffFragment> {
    let original_tokens = tokenize(original);
    let revised_tokens = tokenize(revised);

    merge_adjacent(lcs::align(&original_tokens, &revised_tokens))
}

/// Same as [`compute_diff`] but refuses inputs whose alignment table would
/// need more than `max_cells` cells.
///
/// # Errors
///
/// Returns [`DiffError::TooLarge`] if the table exceeds `max_cells`.
pub fn try_compute_diff(
    original: &str,
    revised: &str,
    max_cells: usize,
) -> Result<Vec<DiffFragment>, DiffError> {
    let original_tokens = tokenize(original);
    let revised_tokens = tokenize(revised);

    let cells = lcs::table_size(original_tokens.len(), revised_tokens.len()).unwrap_or(usize::MAX);
    if cells > max_cells {
        return Err(DiffError::TooLarge {
            cells,
            limit: max_cells,
        });
    }

    Ok(merge_adjacent(lcs::align(
        &original_tokens,
        &revised_tokens,
    )))
}

/// Word counts of a diff, whitespace excluded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DiffSummary {
    pub unchanged: usize,
    pub inserted: usize,
    pub deleted: usize,
}

impl DiffSummary {
    #[must_use]
    pub fn from_fragments(fragments: &[DiffFragment]) -> Self {
        let mut summary = Self::default();

        for fragment in fragments {
            let words = tokenize(&fragment.text)
                .into_iter()
                .filter(|token| !token.chars().all(char::is_whitespace))
                .count();

            match fragment.kind {
                FragmentKind::Unchanged => summary.unchanged += words,
                FragmentKind::Inserted => summary.inserted += words,
                FragmentKind::Deleted => summary.deleted += words,
            }
        }

        summary
    }

    #[must_use]
    pub fn has_changes(&self) -> bool { self.inserted > 0 || self.deleted > 0 }
}
