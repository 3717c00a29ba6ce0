//! State machine of a single drag gesture and the item changes a drop
//! implies.

use log::debug;

use super::{
    geometry::{DragGeometry, Droppable},
    item::{BoardItem, ItemId, Status, TargetId},
    ordering,
};

/// Gesture source callbacks, decoupled from any particular drag-and-drop
/// library.
pub trait DragHandler {
    /// What a completed drop produces.
    type Outcome;

    fn on_drag_start(&mut self, active: ItemId);

    fn on_drag_over(&mut self, geometry: &DragGeometry, targets: &[Droppable]);

    fn on_drag_end(&mut self) -> Self::Outcome;

    fn on_drag_cancel(&mut self);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        active: ItemId,
        over: Option<TargetId>,
    },
}

/// A finished gesture: which card was released over which target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropIntent {
    pub active: ItemId,
    pub target: TargetId,
}

/// Tracks the card being dragged and the target it is currently over.
///
/// Nothing here touches the items; hovering is only visual feedback and the
/// drop itself is turned into changes by [`plan_drop`].
#[derive(Debug, Clone, Default)]
pub struct DragReducer {
    state: DragState,
}

impl DragReducer {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn state(&self) -> &DragState { &self.state }

    #[must_use]
    pub fn over(&self) -> Option<&TargetId> {
        match &self.state {
            DragState::Dragging { over, .. } => over.as_ref(),
            DragState::Idle => None,
        }
    }

    pub fn start(&mut self, active: ItemId) {
        if let DragState::Dragging { active: previous, .. } = &self.state {
            debug!("Drag of {active} started while {previous} was still being dragged");
        }

        self.state = DragState::Dragging { active, over: None };
    }

    pub fn hover(&mut self, target: Option<TargetId>) {
        match &mut self.state {
            DragState::Dragging { over, .. } => *over = target,
            DragState::Idle => debug!("Ignoring drag-over without an active drag"),
        }
    }

    /// Ends the gesture, returning to idle. Yields a drop intent only if the
    /// card was over some target.
    pub fn end(&mut self) -> Option<DropIntent> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging {
                active,
                over: Some(target),
            } => Some(DropIntent { active, target }),
            DragState::Dragging { active, over: None } => {
                debug!("{active} dropped outside of any target");
                None
            }
            DragState::Idle => {
                debug!("Ignoring drag-end without an active drag");
                None
            }
        }
    }

    pub fn cancel(&mut self) { self.state = DragState::Idle; }
}

/// Turns a drop into the new state of every card it affects.
///
/// An empty result means the drop changes nothing: the card is unknown or
/// already archived, it was dropped onto itself or back into its own slot,
/// or the target card is not on the board.
#[must_use]
pub fn plan_drop(items: &[BoardItem], intent: &DropIntent, step: f64) -> Vec<BoardItem> {
    let Some(active) = items
        .iter()
        .find(|item| item.id == intent.active && item.is_on_board())
    else {
        debug!("Dropped card {} is not on the board", intent.active);
        return Vec::new();
    };

    let (status, index) = match &intent.target {
        TargetId::Archive => {
            return vec![BoardItem {
                is_archived: true,
                ..active.clone()
            }];
        }
        TargetId::Column(status) => {
            let others = column_without(items, *status, &active.id);
            (*status, others.len())
        }
        TargetId::Card(card_id) => {
            if card_id == &active.id {
                return Vec::new();
            }

            let Some(card) = items
                .iter()
                .find(|item| &item.id == card_id && item.is_on_board())
            else {
                debug!("Drop target card {card_id} is not on the board");
                return Vec::new();
            };

            let full_column = ordering::column(items, card.status);
            let others = column_without(items, card.status, &active.id);
            let Some(mut index) = ordering::index_of(&others, card_id) else {
                return Vec::new();
            };

            // Moving down within the same column lands below the card
            let from = ordering::index_of(&full_column, &active.id);
            let to = ordering::index_of(&full_column, card_id);
            if from.zip(to).is_some_and(|(from, to)| from < to) {
                index += 1;
            }

            (card.status, index)
        }
    };

    let others = column_without(items, status, &active.id);
    if status == active.status
        && ordering::index_of(&ordering::column(items, status), &active.id) == Some(index)
    {
        return Vec::new();
    }

    ordering::place(&others, active, status, index, step)
}

fn column_without<'a>(
    items: &'a [BoardItem],
    status: Status,
    id: &ItemId,
) -> Vec<&'a BoardItem> {
    ordering::column(items, status)
        .into_iter()
        .filter(|item| &item.id != id)
        .collect()
}
