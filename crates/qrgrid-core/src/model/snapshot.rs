use std::collections::HashSet;
use std::sync::Arc;

use qrgrid_core_types::RowId;

use super::row::Row;
use crate::errors::{Result, TableError};

/// Ordered, immutable copy of every row at one instant
///
/// Rows are shared behind `Arc`, so a snapshot derived from another by
/// replacing one row still points at the very same allocations for every
/// other row. Row identities are unique within a snapshot.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    rows: Arc<[Arc<Row>]>,
}

impl Snapshot {
    /// Build a snapshot, rejecting duplicate row identities
    ///
    /// # Errors
    ///
    /// `DuplicateRowId` if two rows share an identity.
    pub fn new(rows: Vec<Arc<Row>>) -> Result<Self> {
        {
            let mut seen = HashSet::with_capacity(rows.len());
            for row in &rows {
                if !seen.insert(row.id()) {
                    return Err(TableError::DuplicateRowId {
                        row_id: row.id().clone(),
                    });
                }
            }
        }
        Ok(Self { rows: rows.into() })
    }

    /// Build a snapshot from owned rows
    ///
    /// # Errors
    ///
    /// `DuplicateRowId` if two rows share an identity.
    pub fn from_rows(rows: Vec<Row>) -> Result<Self> {
        Self::new(rows.into_iter().map(Arc::new).collect())
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Arc<Row>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Row>> {
        self.rows.iter()
    }

    /// Position and row for an identity
    pub fn find(&self, id: &RowId) -> Option<(usize, &Arc<Row>)> {
        self.rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.id() == id)
    }

    pub fn contains(&self, id: &RowId) -> bool {
        self.find(id).is_some()
    }

    /// New snapshot with the row at `index` swapped for `row`
    ///
    /// The replacement keeps the identity of the row it replaces, so the
    /// uniqueness invariant carries over without re-checking.
    pub(crate) fn with_row_replaced(&self, index: usize, row: Arc<Row>) -> Self {
        debug_assert_eq!(self.rows[index].id(), row.id());
        let rows: Vec<Arc<Row>> = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, existing)| {
                if i == index {
                    Arc::clone(&row)
                } else {
                    Arc::clone(existing)
                }
            })
            .collect();
        Self { rows: rows.into() }
    }

    /// Whether both snapshots share the same row storage
    pub fn ptr_eq(&self, other: &Snapshot) -> bool {
        Arc::ptr_eq(&self.rows, &other.rows)
    }
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.rows.len() == other.rows.len()
                && self
                    .rows
                    .iter()
                    .zip(other.rows.iter())
                    .all(|(a, b)| a == b))
    }
}
