/// Scenario 3: Search, sort and keyboard navigation
///
/// The search term only takes effect after the quiet period; navigation
/// runs over the filtered and sorted rows and tracks selection by identity.
mod common;

use std::time::{Duration, Instant};

use common::{search_settled, table, visible_ids};
use qrgrid_core::{Direction, RowId, Selection, SortDirective};

#[test]
fn test_scenario_03_filter_abc_xyz() {
    // GIVEN rows "abc" and "xyz"
    let mut state = table(&[("1", "abc", ""), ("2", "xyz", "")]);

    // WHEN searching for "a"
    search_settled(&mut state, "a");

    // THEN only "abc" is visible
    assert_eq!(visible_ids(&state), vec!["1"]);

    // WHEN clearing the search
    search_settled(&mut state, "");

    // THEN both rows are visible in canonical order
    assert_eq!(visible_ids(&state), vec!["1", "2"]);
}

#[test]
fn test_scenario_03_search_waits_for_quiet_period() {
    // GIVEN a table with a 1000ms quiet period
    let mut state = table(&[("1", "abc", ""), ("2", "xyz", "")]);
    let t0 = Instant::now();

    // WHEN typing "x" then "xy" 300ms later
    state.set_search_term("x", t0);
    state.set_search_term("xy", t0 + Duration::from_millis(300));

    // THEN nothing is filtered before the quiet period ends
    assert!(!state.poll_search(t0 + Duration::from_millis(1000)));
    assert_eq!(visible_ids(&state).len(), 2);
    assert_eq!(state.search_term(), "xy");
    assert_eq!(state.active_search_term(), "");
    assert_eq!(
        state.next_search_deadline(),
        Some(t0 + Duration::from_millis(1300))
    );

    // WHEN the quiet period after the last keystroke passes
    assert!(state.poll_search(t0 + Duration::from_millis(1300)));

    // THEN the last term applies
    assert_eq!(visible_ids(&state), vec!["2"]);
    assert!(state.next_search_deadline().is_none());
}

#[test]
fn test_scenario_03_dispose_cancels_pending_search() {
    let mut state = table(&[("1", "abc", ""), ("2", "xyz", "")]);
    let t0 = Instant::now();
    state.set_search_term("x", t0);

    state.dispose();

    assert!(!state.poll_search(t0 + Duration::from_secs(5)));
    assert_eq!(visible_ids(&state).len(), 2);
}

#[test]
fn test_scenario_03_navigation_follows_sorted_view() {
    // GIVEN rows sorted by label descending
    let mut state = table(&[("1", "a", "b"), ("2", "b", "c"), ("3", "c", "a")]);
    state.set_sort(Some(SortDirective::desc("label")));
    assert_eq!(visible_ids(&state), vec!["2", "1", "3"]);

    // AND row 1 selected
    state.select_row(&RowId::from("1")).unwrap();

    // WHEN moving down then down again
    assert!(state.navigate(Direction::Down));
    assert_eq!(state.selection(), &Selection::Selected(RowId::from("3")));
    assert!(!state.navigate(Direction::Down));

    // WHEN jumping home
    assert!(state.navigate(Direction::Home));
    assert_eq!(state.selection(), &Selection::Selected(RowId::from("2")));

    // THEN up at the first row is a no-op
    assert!(!state.navigate(Direction::Up));
    assert_eq!(state.selection(), &Selection::Selected(RowId::from("2")));

    // AND end jumps to the last visible row
    assert!(state.navigate(Direction::End));
    assert_eq!(state.selection(), &Selection::Selected(RowId::from("3")));
}

#[test]
fn test_scenario_03_navigation_without_selection_is_noop() {
    let mut state = table(&[("1", "a", ""), ("2", "b", "")]);
    assert!(!state.navigate(Direction::Down));
    assert_eq!(state.selection(), &Selection::NoSelection);
}

#[test]
fn test_scenario_03_filtering_out_selection_clears_it() {
    // GIVEN row 1 selected
    let mut state = table(&[("1", "abc", ""), ("2", "xyz", "")]);
    state.select_row(&RowId::from("1")).unwrap();

    // WHEN a search hides it
    search_settled(&mut state, "xyz");

    // THEN selection is cleared and navigation declines to move
    assert_eq!(state.selection(), &Selection::NoSelection);
    assert!(state.selected_row().is_none());
    assert!(!state.navigate(Direction::Down));
}

#[test]
fn test_scenario_03_undo_removing_selected_row_clears_selection() {
    // GIVEN a filter on "new" and a row edited to match it
    let mut state = table(&[("1", "old", ""), ("2", "other", "")]);
    search_settled(&mut state, "new");
    assert!(visible_ids(&state).is_empty());
    state.edit_cell(&RowId::from("1"), "content", "new").unwrap();
    assert_eq!(visible_ids(&state), vec!["1"]);
    state.select_row(&RowId::from("1")).unwrap();

    // WHEN undoing the edit
    assert!(state.undo());

    // THEN the row drops out of view and selection with it
    assert!(visible_ids(&state).is_empty());
    assert_eq!(state.selection(), &Selection::NoSelection);
}

#[test]
fn test_scenario_03_view_reports_flags() {
    let mut state = table(&[("1", "a", ""), ("2", "b", "")]);
    state.edit_cell(&RowId::from("2"), "content", "B").unwrap();
    state.select_row(&RowId::from("2")).unwrap();

    let view = state.view();
    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.columns, vec!["content", "label"]);
    assert_eq!(view.selected, Some(RowId::from("2")));
    assert!(view.can_undo);
    assert!(!view.can_redo);
    assert!(view.preview.is_none());
    assert!(!view.generating);
}
