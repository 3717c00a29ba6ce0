pub mod collision;
pub mod commit;
pub mod config;
pub mod geometry;
pub mod item;
pub mod ordering;
pub mod reducer;

use std::collections::HashSet;

use commit::{
    CommitError, CommitTicket, Committer, DocumentRepository, PendingCommit, PersistError,
    PersistRequest,
};
use config::{BoardConfig, ConfigError};
use geometry::{DragGeometry, Droppable};
use item::{BoardItem, ItemId, Status, TargetId};
use log::debug;
use reducer::{DragHandler, DragReducer, DragState, plan_drop};

/// In-memory status board: the item collection, the drag gesture in
/// progress and the commits that are waiting to be persisted.
///
/// Every mutation is applied immediately and returns a [`PendingCommit`]
/// describing what to persist. Report the outcome with [`Board::settle`] so
/// failed changes can be rolled back.
#[derive(Debug, Clone, Default)]
pub struct Board {
    config: BoardConfig,
    items: Vec<BoardItem>,
    drag: DragReducer,
    committer: Committer,
}

impl Board {
    /// Creates a board from the items a document list returned. Later
    /// duplicates of an id replace earlier ones.
    ///
    /// # Errors
    ///
    /// If `config` does not pass [`BoardConfig::validate`].
    pub fn new(
        config: BoardConfig,
        items: impl IntoIterator<Item = BoardItem>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut board = Self {
            config,
            ..Self::default()
        };
        for item in items {
            board.upsert(item);
        }
        Ok(board)
    }

    #[must_use]
    pub fn config(&self) -> &BoardConfig { &self.config }

    #[must_use]
    pub fn items(&self) -> &[BoardItem] { &self.items }

    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&BoardItem> { self.items.iter().find(|item| &item.id == id) }

    /// Cards of one column in display order.
    #[must_use]
    pub fn column(&self, status: Status) -> Vec<&BoardItem> { ordering::column(&self.items, status) }

    /// Every configured column with its cards.
    #[must_use]
    pub fn columns(&self) -> Vec<(Status, Vec<&BoardItem>)> {
        self.config
            .statuses
            .iter()
            .map(|status| (*status, self.column(*status)))
            .collect()
    }

    /// Archived cards, in the same order they'd have in their columns.
    #[must_use]
    pub fn archived(&self) -> Vec<&BoardItem> {
        let mut archived: Vec<&BoardItem> = self.items.iter().filter(|item| item.is_archived).collect();
        archived.sort_by(|a, b| a.status.cmp(&b.status).then_with(|| a.cmp_order(b)));
        archived
    }

    #[must_use]
    pub fn drag_state(&self) -> &DragState { self.drag.state() }

    /// The target to highlight while dragging.
    #[must_use]
    pub fn hovered_target(&self) -> Option<&TargetId> { self.drag.over() }

    #[must_use]
    pub fn has_pending_commits(&self) -> bool { self.committer.pending_count() > 0 }

    /// Inserts or replaces an item, for example when the document source
    /// reports a change made elsewhere. Not persisted.
    pub fn upsert(&mut self, item: BoardItem) {
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }

    /// Puts a freshly created document at the end of the first column. Not
    /// persisted, the document is expected to be created with these values.
    pub fn add(&mut self, id: impl Into<ItemId>) -> BoardItem {
        let status = self.config.initial_status();
        let position = ordering::position_after_last(&self.column(status), self.config.position_step);
        let item = BoardItem::new(id, status, position);

        self.upsert(item.clone());
        item
    }

    /// Drops a deleted document from the board.
    pub fn remove(&mut self, id: &ItemId) -> Option<BoardItem> {
        let index = self.items.iter().position(|item| &item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Archives every listed card that is still on the board as a single
    /// bulk request.
    pub fn archive_many(&mut self, ids: &[ItemId]) -> Option<PendingCommit> {
        let wanted: HashSet<&ItemId> = ids.iter().collect();
        let changes: Vec<BoardItem> = self
            .items
            .iter()
            .filter(|item| item.is_on_board() && wanted.contains(&item.id))
            .map(|item| BoardItem {
                is_archived: true,
                ..item.clone()
            })
            .collect();

        let (ticket, updates) = self.committer.apply(&mut self.items, changes)?;
        Some(PendingCommit {
            ticket,
            request: PersistRequest::BulkArchive {
                ids: updates.into_iter().map(|update| update.id).collect(),
            },
        })
    }

    /// Brings an archived card back to the end of its column.
    pub fn restore(&mut self, id: &ItemId) -> Option<PendingCommit> {
        let item = self.item(id).filter(|item| item.is_archived)?;
        let position = ordering::position_after_last(&self.column(item.status), self.config.position_step);
        let change = BoardItem {
            position,
            is_archived: false,
            ..item.clone()
        };

        self.commit(vec![change])
    }

    /// Reports how persisting a commit went, rolling it back on failure.
    /// Returns the ids of the reverted items.
    ///
    /// # Errors
    ///
    /// If the ticket is unknown or already settled.
    pub fn settle(
        &mut self,
        ticket: CommitTicket,
        result: Result<(), PersistError>,
    ) -> Result<Vec<ItemId>, CommitError> {
        self.committer.settle(&mut self.items, ticket, result)
    }

    /// Persists `pending` through `repository` and settles it.
    ///
    /// # Errors
    ///
    /// If the ticket is unknown or already settled.
    pub fn commit_with<R>(
        &mut self,
        pending: &PendingCommit,
        repository: &mut R,
    ) -> Result<Vec<ItemId>, CommitError>
    where
        R: DocumentRepository + ?Sized,
    {
        let result = pending.request.send(repository);
        self.settle(pending.ticket, result)
    }

    fn commit(&mut self, changes: Vec<BoardItem>) -> Option<PendingCommit> {
        let (ticket, updates) = self.committer.apply(&mut self.items, changes)?;
        Some(PendingCommit {
            ticket,
            request: PersistRequest::Update { updates },
        })
    }
}

impl DragHandler for Board {
    type Outcome = Option<PendingCommit>;

    fn on_drag_start(&mut self, active: ItemId) { self.drag.start(active); }

    fn on_drag_over(&mut self, geometry: &DragGeometry, targets: &[Droppable]) {
        if matches!(self.drag.state(), DragState::Idle) {
            debug!("Ignoring drag-over without an active drag");
            return;
        }

        let top = collision::resolve_collisions(geometry, targets, self.config.closest_corners_range)
            .into_iter()
            .next()
            .map(|collision| collision.id);
        self.drag.hover(top);
    }

    fn on_drag_end(&mut self) -> Self::Outcome {
        let intent = self.drag.end()?;
        let changes = plan_drop(&self.items, &intent, self.config.position_step);

        self.commit(changes)
    }

    fn on_drag_cancel(&mut self) { self.drag.cancel(); }
}
