use jasoseo::{
    Board, BoardConfig, BoardItem, DocumentRepository, DocumentUpdate, DragGeometry, DragHandler,
    DragState, Droppable, ItemId, PersistError, Point, Rect, Status, TargetId, resolve_collisions,
};
use pretty_assertions::assert_eq;

const COLUMN_WIDTH: f64 = 200.0;
const CARD_HEIGHT: f64 = 50.0;

/// Lays the board out the way the UI renders it: one column per status,
/// cards stacked inside, and the archive zone along the bottom edge
/// overlapping every column.
fn layout(board: &Board) -> Vec<Droppable> {
    let mut targets = Vec::new();

    for (column_index, (status, cards)) in board.columns().into_iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let left = column_index as f64 * COLUMN_WIDTH;
        targets.push(Droppable::new(
            TargetId::Column(status),
            Rect::new(left, 0.0, COLUMN_WIDTH - 10.0, 1000.0),
        ));

        for (card_index, card) in cards.into_iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let top = card_index as f64 * CARD_HEIGHT;
            targets.push(Droppable::new(
                TargetId::Card(card.id.clone()),
                Rect::new(left, top, COLUMN_WIDTH - 10.0, CARD_HEIGHT - 5.0),
            ));
        }
    }

    targets.push(Droppable::new(
        TargetId::Archive,
        Rect::new(0.0, 900.0, 1000.0, 100.0),
    ));
    targets
}

fn drag(board: &mut Board, id: &str, pointer: Point) -> Option<jasoseo::PendingCommit> {
    let targets = layout(board);
    let card = Rect::new(pointer.x - 20.0, pointer.y - 10.0, COLUMN_WIDTH - 10.0, CARD_HEIGHT - 5.0);

    board.on_drag_start(id.into());
    board.on_drag_over(&DragGeometry::new(Some(pointer), card), &targets);
    board.on_drag_end()
}

fn new_board() -> Board {
    Board::new(
        BoardConfig::default(),
        vec![
            BoardItem::new("cover-a", Status::Drafting, 1024.0),
            BoardItem::new("cover-b", Status::Drafting, 2048.0),
            BoardItem::new("cover-c", Status::Drafting, 3072.0),
            BoardItem::new("cover-d", Status::Applied, 1024.0),
            BoardItem::new("cover-e", Status::Interview, 1024.0),
        ],
    )
    .unwrap()
}

fn assert_strict_order(board: &Board) {
    for status in Status::ALL {
        let column = board.column(status);
        for pair in column.windows(2) {
            assert!(
                pair[0].cmp_order(pair[1]).is_lt(),
                "{} and {} are not strictly ordered in {status}",
                pair[0].id,
                pair[1].id
            );
            assert!(
                pair[0].position < pair[1].position,
                "{} and {} share position {} in {status}",
                pair[0].id,
                pair[1].id,
                pair[0].position
            );
        }
    }
}

#[test]
fn test_archive_wins_over_column_under_pointer() {
    let board = new_board();
    let pointer = Point::new(50.0, 950.0);
    let geometry = DragGeometry::new(Some(pointer), Rect::new(30.0, 940.0, 190.0, 45.0));

    let collisions = resolve_collisions(&geometry, &layout(&board), None);

    assert_eq!(collisions.len(), 1);
    assert_eq!(collisions[0].id, TargetId::Archive);
}

#[test]
fn test_drop_on_archive() {
    let mut board = new_board();

    let pending = drag(&mut board, "cover-b", Point::new(50.0, 950.0)).unwrap();

    let archived = board.item(&"cover-b".into()).unwrap();
    assert!(archived.is_archived);
    assert_eq!(archived.status, Status::Drafting);
    assert_eq!(board.column(Status::Drafting).len(), 2);
    assert_eq!(
        pending.request,
        jasoseo::PersistRequest::Update {
            updates: vec![DocumentUpdate {
                id: "cover-b".into(),
                status: Some(Status::Drafting),
                position: Some(2048.0),
                is_archived: Some(true),
            }]
        }
    );
}

#[test]
fn test_drop_on_card_in_other_column() {
    let mut board = new_board();

    // Over the first card of the "applied" column
    drag(&mut board, "cover-a", Point::new(250.0, 20.0)).unwrap();

    let applied: Vec<&str> = board
        .column(Status::Applied)
        .iter()
        .map(|item| item.id.as_str())
        .collect();
    assert_eq!(applied, vec!["cover-a", "cover-d"]);
}

#[test]
fn test_drop_into_empty_space_changes_nothing() {
    let mut board = Board::new(
        BoardConfig {
            closest_corners_range: Some(50.0),
            ..BoardConfig::default()
        },
        new_board().items().to_vec(),
    )
    .unwrap();
    let before = board.items().to_vec();

    assert_eq!(drag(&mut board, "cover-a", Point::new(5000.0, 5000.0)), None);
    assert_eq!(board.items(), before.as_slice());
    assert_eq!(board.drag_state(), &DragState::Idle);
}

#[test]
fn test_cancel_changes_nothing() {
    let mut board = new_board();
    let before = board.items().to_vec();
    let targets = layout(&board);

    board.on_drag_start("cover-a".into());
    board.on_drag_over(
        &DragGeometry::new(Some(Point::new(50.0, 950.0)), Rect::new(30.0, 940.0, 190.0, 45.0)),
        &targets,
    );
    assert_eq!(board.hovered_target(), Some(&TargetId::Archive));
    board.on_drag_cancel();

    assert_eq!(board.drag_state(), &DragState::Idle);
    assert_eq!(board.on_drag_end(), None);
    assert_eq!(board.items(), before.as_slice());
}

#[test]
fn test_order_stays_strict_over_many_drags() {
    let mut board = new_board();
    let ids = ["cover-a", "cover-b", "cover-c", "cover-d", "cover-e"];

    // Deterministic pseudo-random walk over cards and drop spots
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    for _ in 0..500 {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;

        let id = ids[(seed % 5) as usize];
        #[allow(clippy::cast_precision_loss)]
        let x = ((seed >> 8) % 3) as f64 * COLUMN_WIDTH + 50.0;
        #[allow(clippy::cast_precision_loss)]
        let y = ((seed >> 16) % 5) as f64 * CARD_HEIGHT + 20.0;

        if let Some(pending) = drag(&mut board, id, Point::new(x, y)) {
            board.settle(pending.ticket, Ok(())).unwrap();
        }

        assert_strict_order(&board);
    }

    assert_eq!(
        Status::ALL
            .iter()
            .map(|status| board.column(*status).len())
            .sum::<usize>(),
        5
    );
}

#[test]
fn test_repeated_inserts_at_the_same_spot_stay_ordered() {
    let mut board = Board::new(
        BoardConfig {
            position_step: 1.0,
            ..BoardConfig::default()
        },
        vec![
            BoardItem::new("first", Status::Applied, 1.0),
            BoardItem::new("second", Status::Applied, 2.0),
        ],
    )
    .unwrap();

    // Keep squeezing new cards right below "first" until the gap is
    // exhausted and the column gets renumbered.
    for i in 0..80 {
        let id = format!("new-{i}");
        board.upsert(BoardItem::new(id.as_str(), Status::Drafting, 1.0));

        board.on_drag_start(ItemId::from(id));
        board.on_drag_over(
            &DragGeometry::new(None, Rect::default()),
            &[Droppable::new(TargetId::Card("second".into()), Rect::default())],
        );
        // Dropping on "second" from another column takes its slot
        let pending = board.on_drag_end().unwrap();
        board.settle(pending.ticket, Ok(())).unwrap();

        assert_strict_order(&board);
    }

    let column = board.column(Status::Applied);
    assert_eq!(column.len(), 82);
    assert_eq!(column[0].id.as_str(), "first");
    assert_eq!(column[81].id.as_str(), "second");
}

#[derive(Debug, Default)]
struct FailingRepository {
    calls: usize,
}

impl DocumentRepository for FailingRepository {
    fn update_document(&mut self, _update: &DocumentUpdate) -> Result<(), PersistError> {
        self.calls += 1;
        Err(PersistError::new("JWT expired"))
    }

    fn bulk_archive(&mut self, _ids: &[ItemId]) -> Result<(), PersistError> {
        self.calls += 1;
        Err(PersistError::new("JWT expired"))
    }
}

#[test]
fn test_failed_persistence_rolls_back_to_snapshot() {
    let mut board = new_board();
    let before = board.item(&"cover-c".into()).unwrap().clone();

    let pending = drag(&mut board, "cover-c", Point::new(450.0, 20.0)).unwrap();
    assert_eq!(board.item(&"cover-c".into()).unwrap().status, Status::Interview);

    let mut repository = FailingRepository::default();
    let reverted = board.commit_with(&pending, &mut repository).unwrap();

    assert_eq!(repository.calls, 1);
    assert_eq!(reverted, vec![ItemId::from("cover-c")]);
    assert_eq!(board.item(&"cover-c".into()), Some(&before));
    assert!(!board.has_pending_commits());
}

#[test]
fn test_rollback_targets_its_own_drag() {
    let mut board = new_board();
    let original = board.item(&"cover-a".into()).unwrap().clone();

    let first = drag(&mut board, "cover-a", Point::new(250.0, 200.0)).unwrap();
    let second = drag(&mut board, "cover-a", Point::new(450.0, 200.0)).unwrap();
    let after_second = board.item(&"cover-a".into()).unwrap().clone();
    assert_eq!(after_second.status, Status::Interview);

    // The first request fails after the second drag already happened
    assert_eq!(
        board.settle(first.ticket, Err(PersistError::new("network"))),
        Ok(vec![])
    );
    assert_eq!(board.item(&"cover-a".into()), Some(&after_second));

    // If the second one fails too, nothing of either drag survives
    assert_eq!(
        board.settle(second.ticket, Err(PersistError::new("network"))),
        Ok(vec![ItemId::from("cover-a")])
    );
    assert_eq!(board.item(&"cover-a".into()), Some(&original));
}

/// Keeps one row per document and applies updates field by field.
#[derive(Debug)]
struct RowRepository {
    rows: Vec<BoardItem>,
}

impl RowRepository {
    fn row(&self, id: &str) -> Option<&BoardItem> { self.rows.iter().find(|row| row.id.as_str() == id) }
}

impl DocumentRepository for RowRepository {
    fn update_document(&mut self, update: &DocumentUpdate) -> Result<(), PersistError> {
        let row = self
            .rows
            .iter_mut()
            .find(|row| row.id == update.id)
            .ok_or_else(|| PersistError::new("row not found"))?;

        if let Some(status) = update.status {
            row.status = status;
        }
        if let Some(position) = update.position {
            row.position = position;
        }
        if let Some(is_archived) = update.is_archived {
            row.is_archived = is_archived;
        }
        Ok(())
    }

    fn bulk_archive(&mut self, ids: &[ItemId]) -> Result<(), PersistError> {
        for row in &mut self.rows {
            if ids.contains(&row.id) {
                row.is_archived = true;
            }
        }
        Ok(())
    }
}

#[test]
fn test_failed_drag_followed_by_successful_drag_matches_stored_row() {
    let mut board = new_board();
    let mut repository = RowRepository {
        rows: board.items().to_vec(),
    };

    // Into the empty part of the "applied" column, then onto its first card
    let first = drag(&mut board, "cover-a", Point::new(250.0, 500.0)).unwrap();
    let second = drag(&mut board, "cover-a", Point::new(250.0, 20.0)).unwrap();
    let moved = board.item(&"cover-a".into()).unwrap().clone();
    assert_eq!(moved.status, Status::Applied);

    assert_eq!(
        board.commit_with(&first, &mut FailingRepository::default()),
        Ok(vec![])
    );
    assert_eq!(board.commit_with(&second, &mut repository), Ok(vec![]));

    assert!(!board.has_pending_commits());
    assert_eq!(board.item(&"cover-a".into()), Some(&moved));
    assert_eq!(repository.row("cover-a"), Some(&moved));
}
