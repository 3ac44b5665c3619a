//! Filtered, sorted view over a snapshot
//!
//! The projection is a pure function of the canonical rows, the stable
//! search term and the sort directive. It never changes row contents or
//! identities and is recomputed from scratch whenever an input changes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::model::{Row, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Column plus direction, compared by string representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortDirective {
    pub column: String,
    pub direction: SortDirection,
}

impl SortDirective {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Same column, opposite direction
    pub fn toggled(&self) -> Self {
        Self {
            column: self.column.clone(),
            direction: self.direction.reversed(),
        }
    }
}

/// Compute the visible rows
///
/// An empty term matches every row; otherwise the term must occur in the
/// search column, ignoring case. Filtering keeps canonical order. Sorting
/// is stable, so rows with equal keys keep their canonical relative order
/// in both directions. Keys compare by UTF-16 code unit, the order the
/// editor's frontend uses.
pub fn project(
    rows: &Snapshot,
    search_column: &str,
    term: &str,
    sort: Option<&SortDirective>,
) -> Vec<Arc<Row>> {
    let needle = term.to_lowercase();
    let filtered = rows.iter().filter(|row| {
        needle.is_empty() || row.text(search_column).to_lowercase().contains(&needle)
    });

    let Some(sort) = sort else {
        return filtered.cloned().collect();
    };

    let mut keyed: Vec<(Vec<u16>, Arc<Row>)> = filtered
        .map(|row| (row.text(&sort.column).encode_utf16().collect(), Arc::clone(row)))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| match sort.direction {
        SortDirection::Asc => a.cmp(b),
        SortDirection::Desc => b.cmp(a),
    });
    keyed.into_iter().map(|(_, row)| row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrgrid_core_types::RowId;

    fn snapshot(rows: &[(&str, &str, &str)]) -> Snapshot {
        Snapshot::from_rows(
            rows.iter()
                .map(|(id, content, label)| {
                    Row::from_pairs(
                        RowId::from(*id),
                        [("content", *content), ("label", *label)],
                    )
                })
                .collect(),
        )
        .unwrap()
    }

    fn ids(rows: &[Arc<Row>]) -> Vec<&str> {
        rows.iter().map(|r| r.id().as_str()).collect()
    }

    #[test]
    fn test_empty_term_keeps_canonical_order() {
        let snap = snapshot(&[("r1", "b", ""), ("r2", "a", "")]);
        assert_eq!(ids(&project(&snap, "content", "", None)), vec!["r1", "r2"]);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let snap = snapshot(&[
            ("r1", "http://Example.com", ""),
            ("r2", "ftp://other", ""),
            ("r3", "HTTPS://x", ""),
        ]);
        let visible = project(&snap, "content", "http", None);
        assert_eq!(ids(&visible), vec!["r1", "r3"]);
    }

    #[test]
    fn test_filter_missing_column_reads_empty() {
        let snap = snapshot(&[("r1", "abc", "")]);
        assert!(project(&snap, "nope", "a", None).is_empty());
        assert_eq!(project(&snap, "nope", "", None).len(), 1);
    }

    #[test]
    fn test_sort_is_stable_both_directions() {
        let snap = snapshot(&[
            ("r1", "x", "b"),
            ("r2", "y", "a"),
            ("r3", "z", "b"),
            ("r4", "w", "a"),
        ]);

        let asc = project(&snap, "content", "", Some(&SortDirective::asc("label")));
        assert_eq!(ids(&asc), vec!["r2", "r4", "r1", "r3"]);

        let desc = project(&snap, "content", "", Some(&SortDirective::desc("label")));
        assert_eq!(ids(&desc), vec!["r1", "r3", "r2", "r4"]);
    }

    #[test]
    fn test_sort_compares_string_representation() {
        let snap = Snapshot::from_rows(vec![
            Row::from_pairs(RowId::from("r1"), [("qty", 10_i64)]),
            Row::from_pairs(RowId::from("r2"), [("qty", 9_i64)]),
        ])
        .unwrap();
        let sorted = project(&snap, "qty", "", Some(&SortDirective::asc("qty")));
        assert_eq!(ids(&sorted), vec!["r1", "r2"]);
    }

    #[test]
    fn test_sort_orders_by_utf16_code_units() {
        // U+1F600 encodes as a surrogate pair (0xD83D ..), below U+FF5E
        let snap = snapshot(&[("r1", "\u{FF5E}", ""), ("r2", "\u{1F600}", "")]);
        let asc = project(&snap, "content", "", Some(&SortDirective::asc("content")));
        assert_eq!(ids(&asc), vec!["r2", "r1"]);
    }

    #[test]
    fn test_projection_shares_rows() {
        let snap = snapshot(&[("r1", "a", "")]);
        let visible = project(&snap, "content", "", None);
        assert!(Arc::ptr_eq(&visible[0], &snap.rows()[0]));
    }

    #[test]
    fn test_toggled_direction() {
        let sort = SortDirective::asc("label").toggled();
        assert_eq!(sort.direction, SortDirection::Desc);
        assert_eq!(sort.column, "label");
    }
}
