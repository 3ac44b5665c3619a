//! Bounded linear undo/redo history
//!
//! History is a sequence of snapshots plus a cursor. The snapshot under the
//! cursor is the current table contents. Committing after an undo discards
//! the redo branch; exceeding the cap evicts the oldest entry.

use std::collections::VecDeque;

use crate::model::Snapshot;

/// Snapshot timeline with a cursor
#[derive(Debug, Clone)]
pub struct History {
    snapshots: VecDeque<Snapshot>,
    cursor: usize,
    cap: usize,
}

impl History {
    /// Start a history holding only `initial`
    ///
    /// A cap of zero is treated as one.
    pub fn new(initial: Snapshot, cap: usize) -> Self {
        let mut snapshots = VecDeque::with_capacity(cap.clamp(1, 64));
        snapshots.push_back(initial);
        Self {
            snapshots,
            cursor: 0,
            cap: cap.max(1),
        }
    }

    /// The snapshot under the cursor
    pub fn current(&self) -> &Snapshot {
        &self.snapshots[self.cursor]
    }

    /// Append a snapshot after the cursor, dropping any redo entries
    ///
    /// Returns the new current snapshot.
    pub fn commit(&mut self, snapshot: Snapshot) -> &Snapshot {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push_back(snapshot);
        while self.snapshots.len() > self.cap {
            self.snapshots.pop_front();
            tracing::trace!(cap = self.cap, "evicted oldest history entry");
        }
        self.cursor = self.snapshots.len() - 1;
        self.current()
    }

    /// Step back one snapshot; `None` at the oldest entry
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    /// Step forward one snapshot; `None` at the newest entry
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    /// Discard the whole timeline and start over from `snapshot`
    pub fn reset(&mut self, snapshot: Snapshot) {
        self.snapshots.clear();
        self.snapshots.push_back(snapshot);
        self.cursor = 0;
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Never true; a history always holds at least one snapshot
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// All snapshots, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Row;
    use qrgrid_core_types::RowId;

    fn snap(content: &str) -> Snapshot {
        Snapshot::from_rows(vec![Row::from_pairs(
            RowId::from("r1"),
            [("content", content)],
        )])
        .unwrap()
    }

    fn content(s: &Snapshot) -> String {
        s.rows()[0].text("content")
    }

    #[test]
    fn test_fresh_history_has_nothing_to_undo() {
        let history = History::new(snap("a"), 50);
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_commit_undo_redo() {
        let mut history = History::new(snap("a"), 50);
        history.commit(snap("b"));
        history.commit(snap("c"));

        assert_eq!(content(history.undo().unwrap()), "b");
        assert_eq!(content(history.undo().unwrap()), "a");
        assert!(history.undo().is_none());
        assert_eq!(content(history.redo().unwrap()), "b");
        assert_eq!(content(history.redo().unwrap()), "c");
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_commit_after_undo_discards_redo_branch() {
        let mut history = History::new(snap("a"), 50);
        history.commit(snap("b"));
        history.commit(snap("c"));
        history.undo();
        history.commit(snap("d"));

        assert_eq!(history.len(), 3);
        assert!(!history.can_redo());
        assert_eq!(content(history.current()), "d");
        assert_eq!(content(history.undo().unwrap()), "b");
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let mut history = History::new(snap("0"), 3);
        for i in 1..=5 {
            history.commit(snap(&i.to_string()));
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);
        let contents: Vec<String> = history.iter().map(content).collect();
        assert_eq!(contents, vec!["3", "4", "5"]);
    }

    #[test]
    fn test_reset_starts_over() {
        let mut history = History::new(snap("a"), 50);
        history.commit(snap("b"));
        history.reset(snap("z"));

        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert_eq!(content(history.current()), "z");
    }

    #[test]
    fn test_zero_cap_keeps_one() {
        let mut history = History::new(snap("a"), 0);
        history.commit(snap("b"));
        assert_eq!(history.len(), 1);
        assert_eq!(content(history.current()), "b");
    }
}
