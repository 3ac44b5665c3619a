//! Keyboard movement of the selection over the visible rows

use std::sync::Arc;

use qrgrid_core_types::RowId;
use serde::{Deserialize, Serialize};

use crate::model::Row;

/// Currently selected row, tracked by identity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    NoSelection,
    Selected(RowId),
}

impl Selection {
    pub fn row_id(&self) -> Option<&RowId> {
        match self {
            Selection::Selected(id) => Some(id),
            Selection::NoSelection => None,
        }
    }

    pub fn is_selected(&self, id: &RowId) -> bool {
        self.row_id() == Some(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Home,
    End,
}

impl Direction {
    /// Map a DOM-style key name; other keys are not navigation
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            "Home" => Some(Direction::Home),
            "End" => Some(Direction::End),
            _ => None,
        }
    }
}

/// Row to select after moving from `current` in `direction`
///
/// Up and Down clamp at the ends. Returns `None` when the projection is
/// empty, `current` is not visible, or the position would not change.
pub fn navigate(
    projection: &[Arc<Row>],
    current: &RowId,
    direction: Direction,
) -> Option<Arc<Row>> {
    let last = projection.len().checked_sub(1)?;
    let index = projection.iter().position(|row| row.id() == current)?;
    let next = match direction {
        Direction::Up => index.saturating_sub(1),
        Direction::Down => (index + 1).min(last),
        Direction::Home => 0,
        Direction::End => last,
    };
    if next == index {
        return None;
    }
    projection.get(next).cloned()
}
