//! Longest-common-subsequence alignment of two token sequences.
//!
//! * time: `O(MN)`
//! * space `O(MN)`

use super::fragment::FragmentKind;

/// Dynamic-programming table where `get(i, j)` is the length of the LCS of
/// the first `i` old tokens and the first `j` new tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcsTable {
    width: usize,
    cells: Vec<u32>,
}

impl LcsTable {
    pub fn new<T>(old: &[T], new: &[T]) -> Self
    where
        T: PartialEq,
    {
        let width = new.len() + 1;
        let mut cells = vec![0; (old.len() + 1) * width];

        for i in 1..=old.len() {
            for j in 1..=new.len() {
                cells[i * width + j] = if old[i - 1] == new[j - 1] {
                    cells[(i - 1) * width + j - 1] + 1
                } else {
                    cells[(i - 1) * width + j].max(cells[i * width + j - 1])
                };
            }
        }

        Self { width, cells }
    }

    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> u32 { self.cells[i * self.width + j] }

    /// Length of the longest common subsequence of the whole inputs.
    #[must_use]
    pub fn lcs_len(&self) -> u32 { self.cells.last().copied().unwrap_or_default() }
}

/// Number of cells a table for the given input lengths needs, or `None` on
/// overflow.
#[must_use]
pub fn table_size(old_len: usize, new_len: usize) -> Option<usize> {
    (old_len + 1).checked_mul(new_len + 1)
}

/// Aligns `old` and `new`, labelling every token.
///
/// Walks the table back from the bottom-right corner. Matching tokens move
/// diagonally; otherwise an insertion is preferred whenever it keeps at
/// least as long a common subsequence as a deletion would. The result is
/// returned front-to-back.
pub fn align<'a>(old: &[&'a str], new: &[&'a str]) -> Vec<(FragmentKind, &'a str)> {
    let table = LcsTable::new(old, new);
    let mut result = Vec::with_capacity(old.len() + new.len());

    let mut i = old.len();
    let mut j = new.len();

    while i > 0 || j > 0 {
        if i > 0 && j > 0 && old[i - 1] == new[j - 1] {
            result.push((FragmentKind::Unchanged, old[i - 1]));
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || table.get(i, j - 1) >= table.get(i - 1, j)) {
            result.push((FragmentKind::Inserted, new[j - 1]));
            j -= 1;
        } else {
            result.push((FragmentKind::Deleted, old[i - 1]));
            i -= 1;
        }
    }

    result.reverse();
    result
}
