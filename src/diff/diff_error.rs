use thiserror::Error;

/// Error type for diffs requested through the size-guarded entry point
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiffError {
    /// The alignment table would exceed the caller's cell budget
    #[error(
        "Refusing to diff: the alignment table needs {cells} cells but the limit is {limit}"
    )]
    TooLarge {
        /// Number of cells the table would need, saturating at `usize::MAX`
        cells: usize,
        /// The limit supplied by the caller
        limit: usize,
    },
}
