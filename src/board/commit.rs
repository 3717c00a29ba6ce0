//! Optimistic application of board changes with rollback on failed
//! persistence.

use std::{collections::BTreeMap, fmt::Display};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::item::{BoardItem, ItemId, Status};

/// Identifies one optimistic commit until it is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitTicket(u64);

impl Display for CommitTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "#{}", self.0) }
}

/// Partial update sent to the document API; absent fields stay untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUpdate {
    pub id: ItemId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
}

impl DocumentUpdate {
    /// Every board field of `item`. A commit may inherit the starting point
    /// of an earlier one that failed, so it has to persist the whole visible
    /// state and not only what it changed itself.
    #[must_use]
    pub fn full(item: &BoardItem) -> Self {
        Self {
            id: item.id.clone(),
            status: Some(item.status),
            position: Some(item.position),
            is_archived: Some(item.is_archived),
        }
    }
}

/// What has to be persisted for a commit to stick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PersistRequest {
    Update { updates: Vec<DocumentUpdate> },
    BulkArchive { ids: Vec<ItemId> },
}

impl PersistRequest {
    /// Issues the request against `repository`, stopping at the first
    /// failure.
    ///
    /// # Errors
    ///
    /// Forwards the repository's error.
    pub fn send<R>(&self, repository: &mut R) -> Result<(), PersistError>
    where
        R: DocumentRepository + ?Sized,
    {
        match self {
            PersistRequest::Update { updates } => updates
                .iter()
                .try_for_each(|update| repository.update_document(update)),
            PersistRequest::BulkArchive { ids } => repository.bulk_archive(ids),
        }
    }
}

/// A change applied to the in-memory board whose persistence is pending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingCommit {
    pub ticket: CommitTicket,
    pub request: PersistRequest,
}

/// Failure reported by the document backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to persist board change: {message}")]
pub struct PersistError {
    pub message: String,
}

impl PersistError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommitError {
    #[error("Commit {0} is unknown or has already been settled")]
    UnknownTicket(CommitTicket),
}

/// The external document API.
pub trait DocumentRepository {
    /// # Errors
    ///
    /// Any backend failure.
    fn update_document(&mut self, update: &DocumentUpdate) -> Result<(), PersistError>;

    /// # Errors
    ///
    /// Any backend failure.
    fn bulk_archive(&mut self, ids: &[ItemId]) -> Result<(), PersistError>;
}

#[derive(Debug, Clone, PartialEq)]
struct Snapshot {
    before: BoardItem,
    after: BoardItem,
}

/// Applies changes optimistically and remembers enough to undo each commit
/// on its own.
#[derive(Debug, Clone, Default)]
pub struct Committer {
    next_ticket: u64,
    pending: BTreeMap<CommitTicket, Vec<Snapshot>>,
}

impl Committer {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn pending_count(&self) -> usize { self.pending.len() }

    #[must_use]
    pub fn is_pending(&self, ticket: CommitTicket) -> bool { self.pending.contains_key(&ticket) }

    /// Writes `changes` into `items`, returning the ticket and the per-item
    /// updates. Changes to unknown or unchanged items are skipped; `None`
    /// means nothing was left to commit.
    pub fn apply(
        &mut self,
        items: &mut [BoardItem],
        changes: Vec<BoardItem>,
    ) -> Option<(CommitTicket, Vec<DocumentUpdate>)> {
        let mut snapshots = Vec::new();

        for after in changes {
            let Some(current) = items.iter_mut().find(|item| item.id == after.id) else {
                warn!("Skipping change to {} which is not on the board", after.id);
                continue;
            };

            if *current == after {
                continue;
            }

            snapshots.push(Snapshot {
                before: std::mem::replace(current, after.clone()),
                after,
            });
        }

        if snapshots.is_empty() {
            return None;
        }

        let ticket = CommitTicket(self.next_ticket);
        self.next_ticket += 1;

        let updates = snapshots
            .iter()
            .map(|snapshot| DocumentUpdate::full(&snapshot.after))
            .collect();
        self.pending.insert(ticket, snapshots);

        Some((ticket, updates))
    }

    /// Finalises a commit. On failure every item it touched is put back to
    /// its state from before the commit, unless something newer has
    /// changed it since.
    ///
    /// Returns the ids of the items that were reverted.
    ///
    /// # Errors
    ///
    /// [`CommitError::UnknownTicket`] if the ticket was never issued or has
    /// already been settled.
    pub fn settle(
        &mut self,
        items: &mut [BoardItem],
        ticket: CommitTicket,
        result: Result<(), PersistError>,
    ) -> Result<Vec<ItemId>, CommitError> {
        let snapshots = self
            .pending
            .remove(&ticket)
            .ok_or(CommitError::UnknownTicket(ticket))?;

        let Err(error) = result else {
            return Ok(Vec::new());
        };

        warn!("Commit {ticket} failed, rolling back: {error}");

        let mut reverted = Vec::new();
        for snapshot in snapshots {
            if self.hand_over_to_later_commit(ticket, &snapshot) {
                continue;
            }

            match items.iter_mut().find(|item| item.id == snapshot.after.id) {
                Some(item) if *item == snapshot.after => {
                    info!("Reverting {} after failed commit {ticket}", item.id);
                    *item = snapshot.before;
                    reverted.push(item.id.clone());
                }
                Some(item) => {
                    info!(
                        "Not reverting {} after failed commit {ticket}, it changed since",
                        item.id
                    );
                }
                None => {}
            }
        }

        Ok(reverted)
    }

    /// A later pending commit that started from our optimistic state would
    /// otherwise roll back to a state that was never persisted, so it
    /// inherits our starting point instead. Returns whether such a commit
    /// existed.
    fn hand_over_to_later_commit(&mut self, ticket: CommitTicket, snapshot: &Snapshot) -> bool {
        let later = self
            .pending
            .range_mut(ticket..)
            .flat_map(|(_, snapshots)| snapshots.iter_mut())
            .find(|later| later.before == snapshot.after);

        match later {
            Some(later) => {
                later.before = snapshot.before.clone();
                true
            }
            None => false,
        }
    }
}
