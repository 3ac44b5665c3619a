//! User intents sent by the presentation layer
//!
//! Every UI event the table reacts to is one `Intent`. Intents are processed
//! by [`apply`](crate::apply::apply). Generation is not an intent: it spans
//! an asynchronous call, so the host drives it through
//! [`TableState::begin_generation`](crate::state::TableState::begin_generation)
//! and [`TableState::complete_generation`](crate::state::TableState::complete_generation).

use std::time::Instant;

use qrgrid_core_types::RowId;

use crate::ops::ingest::Record;
use crate::ops::navigator::Direction;
use crate::ops::projection::SortDirective;

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Search box changed
    SearchChanged { term: String, at: Instant },

    /// Debounce timer fired
    SearchTick { at: Instant },

    /// Sort header clicked; `None` clears sorting
    SortChanged(Option<SortDirective>),

    /// Row clicked
    RowClicked(RowId),

    /// Key pressed while the table has focus
    KeyPressed(String),

    /// Selection moved by a resolved direction
    Navigate(Direction),

    /// Cell edit committed
    CellEdited {
        row_id: RowId,
        field: String,
        value: String,
    },

    Undo,
    Redo,

    /// Clipboard text pasted over the table
    Paste(String),

    /// Spreadsheet file parsed into records
    RecordsLoaded(Vec<Record>),

    /// Content and label columns chosen
    ColumnsChosen {
        content: String,
        label: Option<String>,
    },

    /// Re-run artifact matching for the selected row
    RefreshPreview,

    /// Table is going away
    Dispose,
}

impl Intent {
    /// Intents that change canonical rows
    pub fn mutates_rows(&self) -> bool {
        matches!(
            self,
            Intent::CellEdited { .. }
                | Intent::Undo
                | Intent::Redo
                | Intent::Paste(_)
                | Intent::RecordsLoaded(_)
        )
    }
}
