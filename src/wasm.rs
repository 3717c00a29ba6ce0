//! Expose the diff engine and the status board to WebAssembly.
//!
//! Board types cross the boundary as JSON strings in the same shape the
//! document API uses.

use wasm_bindgen::prelude::*;

use crate::{
    BoardConfig, BoardItem, DiffFragment, DragGeometry, DragHandler, Droppable, FragmentKind,
    ItemId, PersistError,
    board::{Board, commit::CommitTicket},
};

#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc<'_> = wee_alloc::WeeAlloc::INIT;

/// Wrapper type to expose `DiffFragment` to JS.
#[wasm_bindgen]
#[derive(Debug, Clone, PartialEq)]
pub struct JsDiffFragment {
    kind: FragmentKind,
    text: String,
}

#[wasm_bindgen]
impl JsDiffFragment {
    /// One of `unchanged`, `inserted` or `deleted`.
    #[must_use]
    pub fn kind(&self) -> String { self.kind.to_string() }

    #[must_use]
    pub fn text(&self) -> String { self.text.clone() }
}

impl From<DiffFragment> for JsDiffFragment {
    fn from(fragment: DiffFragment) -> Self {
        JsDiffFragment {
            kind: fragment.kind,
            text: fragment.text,
        }
    }
}

/// WASM wrapper around `crate::compute_diff`.
#[wasm_bindgen(js_name = computeDiff)]
#[must_use]
pub fn compute_diff(original: &str, revised: &str) -> Vec<JsDiffFragment> {
    set_panic_hook();

    crate::compute_diff(original, revised)
        .into_iter()
        .map(Into::into)
        .collect()
}

/// WASM wrapper around `crate::compute_diff` returning the fragments as a
/// JSON array.
///
/// # Errors
///
/// If serialization fails, which should not happen.
#[wasm_bindgen(js_name = computeDiffJson)]
pub fn compute_diff_json(original: &str, revised: &str) -> Result<String, JsError> {
    set_panic_hook();

    Ok(serde_json::to_string(&crate::compute_diff(original, revised))?)
}

/// The status board, driven by the host's drag-and-drop callbacks.
#[wasm_bindgen]
#[derive(Debug)]
pub struct JsBoard {
    board: Board,
}

#[wasm_bindgen]
impl JsBoard {
    /// # Errors
    ///
    /// If the configuration or the items are invalid.
    #[wasm_bindgen(constructor)]
    pub fn new(config_yaml: &str, items_json: &str) -> Result<JsBoard, JsError> {
        set_panic_hook();

        let config = BoardConfig::from_yaml_str(config_yaml)?;
        let items: Vec<BoardItem> = serde_json::from_str(items_json)?;

        Ok(JsBoard {
            board: Board::new(config, items)?,
        })
    }

    /// # Errors
    ///
    /// If serialization fails, which should not happen.
    #[wasm_bindgen(js_name = itemsJson)]
    pub fn items_json(&self) -> Result<String, JsError> { Ok(serde_json::to_string(self.board.items())?) }

    /// # Errors
    ///
    /// If serialization fails, which should not happen.
    #[wasm_bindgen(js_name = hoveredTargetJson)]
    pub fn hovered_target_json(&self) -> Result<Option<String>, JsError> {
        self.board
            .hovered_target()
            .map(serde_json::to_string)
            .transpose()
            .map_err(Into::into)
    }

    #[wasm_bindgen(js_name = onDragStart)]
    pub fn on_drag_start(&mut self, active_id: &str) { self.board.on_drag_start(ItemId::from(active_id)); }

    /// # Errors
    ///
    /// If the geometry or the targets can't be parsed.
    #[wasm_bindgen(js_name = onDragOver)]
    pub fn on_drag_over(&mut self, geometry_json: &str, targets_json: &str) -> Result<(), JsError> {
        let geometry: DragGeometry = serde_json::from_str(geometry_json)?;
        let targets: Vec<Droppable> = serde_json::from_str(targets_json)?;

        self.board.on_drag_over(&geometry, &targets);
        Ok(())
    }

    /// Returns the pending commit as JSON, or nothing if the drop was a
    /// no-op.
    ///
    /// # Errors
    ///
    /// If serialization fails, which should not happen.
    #[wasm_bindgen(js_name = onDragEnd)]
    pub fn on_drag_end(&mut self) -> Result<Option<String>, JsError> {
        self.board
            .on_drag_end()
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(Into::into)
    }

    #[wasm_bindgen(js_name = onDragCancel)]
    pub fn on_drag_cancel(&mut self) { self.board.on_drag_cancel(); }

    /// Reports the outcome of persisting a commit. `error` is `undefined` on
    /// success. Returns the ids of the items that were rolled back.
    ///
    /// # Errors
    ///
    /// If the ticket is not pending.
    pub fn settle(&mut self, ticket_json: &str, error: Option<String>) -> Result<Vec<String>, JsError> {
        let ticket: CommitTicket = serde_json::from_str(ticket_json)?;
        let result = error.map_or(Ok(()), |message| Err(PersistError::new(message)));

        Ok(self
            .board
            .settle(ticket, result)?
            .into_iter()
            .map(|id| id.to_string())
            .collect())
    }
}

fn set_panic_hook() {
    // https://github.com/rustwasm/console_error_panic_hook#readme
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
