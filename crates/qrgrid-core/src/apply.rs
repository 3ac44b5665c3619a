//! Functional-boundary apply function
//!
//! `apply()` is the single entry point for UI-originated events. Each intent
//! maps onto one [`TableState`] operation.
//!
//! ## Atomicity Contract
//!
//! - **All-or-nothing**: an intent either takes full effect or fails with a
//!   typed error and leaves the state as it was
//! - **No panics**: bad input returns errors
//! - **Steady-state no-ops are not errors**: navigating past an end,
//!   undoing with nothing to undo or pressing a non-navigation key report
//!   `Ok(false)`
//!
//! ## Example
//!
//! ```
//! use qrgrid_core::{apply, Intent, TableConfig, TableState};
//!
//! let mut state = TableState::new(TableConfig::default()).unwrap();
//! let changed = apply(&mut state, Intent::Paste("http://a\tA\nhttp://b\tB".to_string())).unwrap();
//!
//! assert!(changed);
//! assert_eq!(state.rows().len(), 2);
//! assert!(!apply(&mut state, Intent::Undo).unwrap());
//! ```

use crate::commands::Intent;
use crate::errors::Result;
use crate::ops::navigator::Direction;
use crate::state::TableState;

/// Apply one intent to the table
///
/// Returns whether visible state changed.
///
/// # Errors
///
/// The error of the underlying operation: `RowNotFound` or `InvalidField`
/// for edits and clicks, `EmptyPaste` or `Parse` for row sources.
pub fn apply(state: &mut TableState, intent: Intent) -> Result<bool> {
    match intent {
        Intent::SearchChanged { term, at } => {
            state.set_search_term(term, at);
            Ok(false)
        }

        Intent::SearchTick { at } => Ok(state.poll_search(at)),

        Intent::SortChanged(sort) => {
            state.set_sort(sort);
            Ok(true)
        }

        Intent::RowClicked(row_id) => {
            state.select_row(&row_id)?;
            Ok(true)
        }

        Intent::KeyPressed(key) => match Direction::from_key(&key) {
            Some(direction) => Ok(state.navigate(direction)),
            None => Ok(false),
        },

        Intent::Navigate(direction) => Ok(state.navigate(direction)),

        Intent::CellEdited {
            row_id,
            field,
            value,
        } => {
            state.edit_cell(&row_id, &field, value)?;
            Ok(true)
        }

        Intent::Undo => Ok(state.undo()),

        Intent::Redo => Ok(state.redo()),

        Intent::Paste(text) => {
            state.paste(&text)?;
            Ok(true)
        }

        Intent::RecordsLoaded(records) => {
            state.load_records(records)?;
            Ok(true)
        }

        Intent::ColumnsChosen { content, label } => {
            state.set_columns(&content, label.as_deref());
            Ok(true)
        }

        Intent::RefreshPreview => {
            let before = state.preview().map(|(id, _)| id.clone());
            state.refresh_preview();
            Ok(state.preview().map(|(id, _)| id.clone()) != before)
        }

        Intent::Dispose => {
            state.dispose();
            Ok(false)
        }
    }
}
