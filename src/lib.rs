//! Core logic of a cover-letter workspace: a word-level diff for reviewing
//! suggested rewrites, and the drag-and-drop status board that tracks each
//! application.
//!
//! Both halves are synchronous, allocation-light and free of I/O so they
//! can run on the UI thread, natively or compiled to WebAssembly.

pub mod board;
mod diff;
pub mod store;
mod tokenizer;

pub use board::{
    Board,
    collision::{Collision, resolve_collisions},
    commit::{
        CommitError, CommitTicket, DocumentRepository, DocumentUpdate, PendingCommit, PersistError,
        PersistRequest,
    },
    config::{BoardConfig, ConfigError},
    geometry::{DragGeometry, Droppable, Point, Rect},
    item::{BoardItem, ItemId, Status, TargetId},
    reducer::{DragHandler, DragState},
};
pub use diff::{
    DiffError, DiffFragment, DiffSummary, FragmentKind, compute_diff, reconstruct_original,
    reconstruct_revised, try_compute_diff,
};
pub use store::{Draft, MemoryStorage, PersistedStore, Section, StoragePort, StoreError};
pub use tokenizer::{PUNCTUATION, tokenize};

#[cfg(feature = "wasm")]
pub mod wasm;
