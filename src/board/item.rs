use std::{cmp::Ordering, fmt::Display};

use serde::{Deserialize, Serialize};

/// Stable identity of a document on the board.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

    #[must_use]
    pub fn as_str(&self) -> &str { &self.0 }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self { Self(id.to_owned()) }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self { Self(id) }
}

/// Workflow stage of an application, one column on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Drafting,
    Applied,
    Interview,
    Passed,
    Failed,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::Drafting,
        Status::Applied,
        Status::Interview,
        Status::Passed,
        Status::Failed,
    ];
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Drafting => write!(f, "drafting"),
            Status::Applied => write!(f, "applied"),
            Status::Interview => write!(f, "interview"),
            Status::Passed => write!(f, "passed"),
            Status::Failed => write!(f, "failed"),
        }
    }
}

/// Anything a card can be dropped onto.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "kebab-case")]
pub enum TargetId {
    /// The dedicated archive zone.
    Archive,
    /// A status column; dropping here appends to it.
    Column(Status),
    /// Another card; dropping here takes that card's slot.
    Card(ItemId),
}

/// One document's card on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardItem {
    pub id: ItemId,
    pub status: Status,
    pub position: f64,
    pub is_archived: bool,
}

impl BoardItem {
    #[must_use]
    pub fn new(id: impl Into<ItemId>, status: Status, position: f64) -> Self {
        Self {
            id: id.into(),
            status,
            position,
            is_archived: false,
        }
    }

    /// Order within a column: by position, then by id.
    #[must_use]
    pub fn cmp_order(&self, other: &Self) -> Ordering {
        self.position
            .total_cmp(&other.position)
            .then_with(|| self.id.cmp(&other.id))
    }

    #[must_use]
    pub fn is_on_board(&self) -> bool { !self.is_archived }
}
