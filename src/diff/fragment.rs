use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Origin of a fragment's text relative to the two diffed inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentKind {
    /// Present in both the original and the revised text.
    Unchanged,
    /// Only present in the revised text.
    Inserted,
    /// Only present in the original text.
    Deleted,
}

impl FragmentKind {
    #[must_use]
    pub fn is_in_original(self) -> bool { matches!(self, Self::Unchanged | Self::Deleted) }

    #[must_use]
    pub fn is_in_revised(self) -> bool { matches!(self, Self::Unchanged | Self::Inserted) }
}

impl Display for FragmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FragmentKind::Unchanged => write!(f, "unchanged"),
            FragmentKind::Inserted => write!(f, "inserted"),
            FragmentKind::Deleted => write!(f, "deleted"),
        }
    }
}

/// A labelled, contiguous run of text in a diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffFragment {
    pub kind: FragmentKind,
    pub text: String,
}

impl DiffFragment {
    #[must_use]
    pub fn new(kind: FragmentKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn unchanged(text: impl Into<String>) -> Self { Self::new(FragmentKind::Unchanged, text) }

    #[must_use]
    pub fn inserted(text: impl Into<String>) -> Self { Self::new(FragmentKind::Inserted, text) }

    #[must_use]
    pub fn deleted(text: impl Into<String>) -> Self { Self::new(FragmentKind::Deleted, text) }
}

/// Joins consecutive tokens of the same kind into maximal fragments.
///
/// Tokens carry their own whitespace and punctuation so they are
/// concatenated without a separator.
pub fn merge_adjacent<'a, I>(tokens: I) -> Vec<DiffFragment>
where
    I: IntoIterator<Item = (FragmentKind, &'a str)>,
{
    let mut result: Vec<DiffFragment> = Vec::new();

    for (kind, token) in tokens {
        match result.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(token),
            _ => result.push(DiffFragment::new(kind, token)),
        }
    }

    result
}

/// Concatenates the unchanged and deleted fragments, yielding the original
/// input of the diff.
#[must_use]
pub fn reconstruct_original(fragments: &[DiffFragment]) -> String {
    fragments
        .iter()
        .filter(|fragment| fragment.kind.is_in_original())
        .map(|fragment| fragment.text.as_str())
        .collect()
}

/// Concatenates the unchanged and inserted fragments, yielding the revised
/// input of the diff.
#[must_use]
pub fn reconstruct_revised(fragments: &[DiffFragment]) -> String {
    fragments
        .iter()
        .filter(|fragment| fragment.kind.is_in_revised())
        .map(|fragment| fragment.text.as_str())
        .collect()
}
