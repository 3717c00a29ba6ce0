//! Manual ordering of cards within a column.

use log::warn;

use super::item::{BoardItem, ItemId, Status};

/// Cards of one column that are on the board, in display order.
#[must_use]
pub fn column<'a>(items: &'a [BoardItem], status: Status) -> Vec<&'a BoardItem> {
    let mut column: Vec<&BoardItem> = items
        .iter()
        .filter(|item| item.is_on_board() && item.status == status)
        .collect();

    column.sort_by(|a, b| a.cmp_order(b));
    column
}

/// Position placing a card between `previous` and `next`.
///
/// Returns `None` when no representable value lies strictly between the
/// two neighbours, in which case the column needs to be rebalanced.
#[must_use]
pub fn position_between(previous: Option<f64>, next: Option<f64>, step: f64) -> Option<f64> {
    let position = match (previous, next) {
        (None, None) => step,
        (Some(previous), None) => previous + step,
        (None, Some(next)) => next - step,
        (Some(previous), Some(next)) => previous + (next - previous) / 2.0,
    };

    let fits = position.is_finite()
        && previous.is_none_or(|previous| previous < position)
        && next.is_none_or(|next| position < next);

    fits.then_some(position)
}

/// Position appending a card after every card in `column`.
#[must_use]
pub fn position_after_last(column: &[&BoardItem], step: f64) -> f64 {
    column
        .last()
        .map_or(step, |last| last.position + step)
}

/// Places `moved` at `index` within `column` (which must not contain it)
/// and returns every card whose position or status has to change.
///
/// Usually that is just `moved` with a position interpolated between its
/// new neighbours. If the neighbours are too close for that, the whole
/// column is renumbered in steps of `step`.
#[must_use]
pub fn place(
    column: &[&BoardItem],
    moved: &BoardItem,
    status: Status,
    index: usize,
    step: f64,
) -> Vec<BoardItem> {
    let index = index.min(column.len());
    let previous = index.checked_sub(1).map(|i| column[i].position);
    let next = column.get(index).map(|item| item.position);

    if let Some(position) = position_between(previous, next, step) {
        return vec![BoardItem {
            status,
            position,
            ..moved.clone()
        }];
    }

    warn!(
        "No room between positions {previous:?} and {next:?} in column {status}, renumbering {} \
         cards",
        column.len() + 1
    );

    let mut reordered: Vec<BoardItem> = column.iter().map(|item| (*item).clone()).collect();
    reordered.insert(
        index,
        BoardItem {
            status,
            ..moved.clone()
        },
    );

    let mut changed = Vec::new();
    for (i, mut item) in reordered.into_iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let position = (i + 1) as f64 * step;
        if item.id == moved.id || item.position != position {
            item.position = position;
            changed.push(item);
        }
    }

    changed
}

/// Index of `id` within `column`, if present.
#[must_use]
pub fn index_of(column: &[&BoardItem], id: &ItemId) -> Option<usize> {
    column.iter().position(|item| &item.id == id)
}
