//! Table editor state
//!
//! `TableState` owns the canonical rows (through the history), the search
//! debouncer, the sort directive, the selection, the artifact matcher and
//! the generation gate. The projection is cached and rebuilt whenever one of
//! its inputs changes; the selection is dropped whenever its row leaves the
//! projection.
//!
//! Operations that fail leave the state exactly as it was, with one
//! exception: a failed generation outcome still clears the artifacts, the
//! preview and the selection before reporting the failure.

use std::sync::Arc;
use std::time::Instant;

use qrgrid_core_types::{ArtifactId, RowId};

use crate::config::TableConfig;
use crate::errors::{Result, TableError};
use crate::model::{Artifact, ArtifactMap, CellValue, Row, Snapshot};
use crate::ops::generation::{
    ArtifactGenerator, GenerationGate, GenerationOutcome, GenerationRequest,
};
use crate::ops::ingest::{self, Record};
use crate::ops::navigator::{self, Direction, Selection};
use crate::ops::projection::{project, SortDirective};
use crate::ops::{ArtifactMatcher, Debouncer, History};
use crate::{log_op_end, log_op_error, log_op_start};

/// Everything the presentation layer needs to draw the table
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub rows: Vec<Arc<Row>>,
    pub columns: Vec<String>,
    pub selected: Option<RowId>,
    pub can_undo: bool,
    pub can_redo: bool,
    pub preview: Option<(ArtifactId, Artifact)>,
    pub bulk_pdf: Option<(ArtifactId, Artifact)>,
    pub generating: bool,
    pub search_term: String,
    pub sort: Option<SortDirective>,
}

/// State of one table editor
#[derive(Debug, Clone)]
pub struct TableState {
    config: TableConfig,
    columns: Vec<String>,
    history: History,
    search: Debouncer,
    sort: Option<SortDirective>,
    projection: Vec<Arc<Row>>,
    selection: Selection,
    matcher: ArtifactMatcher,
    preview: Option<ArtifactId>,
    generation: GenerationGate,
}

/// Configured key columns followed by any other column seen in `rows`
fn columns_for(config: &TableConfig, rows: &Snapshot) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    let configured = std::iter::once(config.content_column.as_str())
        .chain(config.label_column.as_deref())
        .filter(|c| !c.is_empty());
    for column in configured.chain(rows.iter().flat_map(|r| r.cells().keys().map(String::as_str)))
    {
        if !columns.iter().any(|c| c == column) {
            columns.push(column.to_string());
        }
    }
    columns
}

impl TableState {
    /// Manual-entry table holding a single empty row
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the configuration does not validate.
    pub fn new(config: TableConfig) -> Result<Self> {
        let rows = ingest::placeholder_rows(&config);
        Self::with_rows(config, rows)
    }

    /// Table initialised from `rows`
    ///
    /// # Errors
    ///
    /// `InvalidConfig` for a bad configuration, `DuplicateRowId` if two rows
    /// share an identity.
    pub fn with_rows(config: TableConfig, rows: Vec<Row>) -> Result<Self> {
        config.validate()?;
        let snapshot = Snapshot::from_rows(rows)?;
        let columns = columns_for(&config, &snapshot);
        let mut state = Self {
            history: History::new(snapshot, config.history_cap),
            search: Debouncer::new(config.debounce_delay()),
            matcher: ArtifactMatcher::new(&config),
            config,
            columns,
            sort: None,
            projection: Vec::new(),
            selection: Selection::NoSelection,
            preview: None,
            generation: GenerationGate::default(),
        };
        state.reproject();
        Ok(state)
    }

    fn instrumented<T>(
        &mut self,
        op: &'static str,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        log_op_start!(op);
        let start = Instant::now();
        let result = f(self);
        match &result {
            Ok(_) => {
                log_op_end!(op, duration_ms = start.elapsed().as_millis() as u64);
            }
            Err(e) => {
                log_op_error!(op, e.clone(), duration_ms = start.elapsed().as_millis() as u64);
            }
        }
        result
    }

    /// Rebuild the projection and drop a selection that fell out of it
    fn reproject(&mut self) {
        self.projection = project(
            self.history.current(),
            self.config.search_column(),
            self.search.stable(),
            self.sort.as_ref(),
        );
        if let Some(selected) = self.selection.row_id() {
            if !self.projection.iter().any(|row| row.id() == selected) {
                tracing::debug!(row_id = %selected, "selected row left the projection");
                self.selection = Selection::NoSelection;
                self.preview = None;
            }
        }
    }

    fn visible_row(&self, id: &RowId) -> Option<&Arc<Row>> {
        self.projection.iter().find(|row| row.id() == id)
    }

    fn select_visible(&mut self, row: &Row) {
        self.selection = Selection::Selected(row.id().clone());
        self.preview = self.matcher.find_match(row).map(|(id, _)| id.clone());
    }

    // Editing

    /// Set one field of one row and commit the result
    ///
    /// Artifacts keyed by the row's text before or after the edit are
    /// removed in the same step. Editing the selected row clears the preview.
    ///
    /// # Errors
    ///
    /// `InvalidField` for an empty field name, `RowNotFound` for an unknown
    /// row.
    pub fn edit_cell(
        &mut self,
        row_id: &RowId,
        field: &str,
        value: impl Into<CellValue>,
    ) -> Result<()> {
        let value = value.into();
        self.instrumented("edit_cell", |state| state.edit_cell_inner(row_id, field, value))
    }

    fn edit_cell_inner(&mut self, row_id: &RowId, field: &str, value: CellValue) -> Result<()> {
        if field.trim().is_empty() {
            return Err(TableError::InvalidField {
                field: field.to_string(),
            });
        }
        let current = self.history.current().clone();
        let (index, before) = current.find(row_id).ok_or_else(|| TableError::RowNotFound {
            row_id: row_id.clone(),
        })?;
        let after = Arc::new(before.with_value(field, value));
        let next = current.with_row_replaced(index, Arc::clone(&after));

        let invalidated = self.matcher.on_row_edited(before, &after);
        if !invalidated.is_empty() {
            tracing::debug!(
                row_id = %row_id,
                invalidated = invalidated.len(),
                "invalidated stale artifacts"
            );
        }
        let preview_stale = self
            .preview
            .as_ref()
            .is_some_and(|id| invalidated.contains(id));
        if self.selection.is_selected(row_id) || preview_stale {
            self.preview = None;
        }

        if !self.columns.iter().any(|c| c == field) {
            self.columns.push(field.to_string());
        }
        self.history.commit(next);
        self.reproject();
        Ok(())
    }

    /// Step back one snapshot; returns whether anything changed
    ///
    /// The selected row's text may differ in the restored snapshot, so the
    /// preview is matched again.
    pub fn undo(&mut self) -> bool {
        log_op_start!("undo");
        let start = Instant::now();
        let moved = self.history.undo().is_some();
        if moved {
            self.reproject();
            self.refresh_preview();
        }
        log_op_end!(
            "undo",
            duration_ms = start.elapsed().as_millis() as u64,
            cursor = self.history.cursor(),
            moved = moved
        );
        moved
    }

    /// Step forward one snapshot; returns whether anything changed
    ///
    /// Re-matches the preview like [`undo`](Self::undo).
    pub fn redo(&mut self) -> bool {
        log_op_start!("redo");
        let start = Instant::now();
        let moved = self.history.redo().is_some();
        if moved {
            self.reproject();
            self.refresh_preview();
        }
        log_op_end!(
            "redo",
            duration_ms = start.elapsed().as_millis() as u64,
            cursor = self.history.cursor(),
            moved = moved
        );
        moved
    }

    // Row sources

    /// Replace the whole table
    ///
    /// This is a hard reset: history restarts from the new rows, and
    /// artifacts, preview and selection are discarded.
    ///
    /// # Errors
    ///
    /// `DuplicateRowId` if two rows share an identity.
    pub fn replace_rows(&mut self, rows: Vec<Row>, columns: Vec<String>) -> Result<()> {
        self.instrumented("replace_rows", |state| {
            let snapshot = Snapshot::from_rows(rows)?;
            state.reset_to(snapshot, columns);
            Ok(())
        })
    }

    fn reset_to(&mut self, snapshot: Snapshot, columns: Vec<String>) {
        tracing::debug!(row_count = snapshot.len(), "resetting history");
        self.history.reset(snapshot);
        self.columns = columns;
        self.matcher.clear();
        self.preview = None;
        self.selection = Selection::NoSelection;
        self.reproject();
    }

    /// Replace the table with pasted tab-separated text
    ///
    /// Returns the number of rows loaded.
    ///
    /// # Errors
    ///
    /// `EmptyPaste` if the text holds no rows; the table is left unchanged.
    pub fn paste(&mut self, text: &str) -> Result<usize> {
        self.instrumented("paste", |state| {
            let rows = ingest::parse_paste(
                text,
                &state.config.content_column,
                state.config.label_column.as_deref(),
            )?;
            let snapshot = Snapshot::from_rows(rows)?;
            let columns = columns_for(&state.config, &snapshot);
            let count = snapshot.len();
            state.reset_to(snapshot, columns);
            Ok(count)
        })
    }

    /// Replace the table with records parsed from a file
    ///
    /// Columns are taken from the first record. Returns the number of rows
    /// loaded.
    ///
    /// # Errors
    ///
    /// `Parse` if there are no records; the table is left unchanged.
    pub fn load_records(&mut self, records: Vec<Record>) -> Result<usize> {
        self.instrumented("load_records", |state| {
            let columns = ingest::columns_of(&records);
            let snapshot = Snapshot::from_rows(ingest::rows_from_records(records)?)?;
            let count = snapshot.len();
            state.reset_to(snapshot, columns);
            Ok(count)
        })
    }

    /// Choose the content and label columns
    ///
    /// The preview is cleared since keys computed under the old columns no
    /// longer apply.
    pub fn set_columns(&mut self, content_column: &str, label_column: Option<&str>) {
        tracing::debug!(column = content_column, "content column chosen");
        self.config.content_column = content_column.to_string();
        self.config.label_column = label_column.map(str::to_string);
        self.matcher.set_columns(content_column, label_column);
        self.preview = None;
        self.reproject();
    }

    // Search and sort

    /// Record raw search input; it takes effect after the quiet period
    pub fn set_search_term(&mut self, term: impl Into<String>, now: Instant) {
        self.search.input(term, now);
    }

    /// Apply the pending search term if its quiet period has passed
    ///
    /// Returns whether the projection was rebuilt.
    pub fn poll_search(&mut self, now: Instant) -> bool {
        let Some(term) = self.search.poll(now) else {
            return false;
        };
        tracing::debug!(term, "search term stabilized");
        self.reproject();
        true
    }

    /// When the pending search term will take effect, if any
    pub fn next_search_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    pub fn set_sort(&mut self, sort: Option<SortDirective>) {
        self.sort = sort;
        self.reproject();
    }

    /// Cancel pending timers before the table goes away
    pub fn dispose(&mut self) {
        if self.search.cancel() {
            tracing::debug!("cancelled pending search term");
        }
    }

    // Selection

    /// Select a visible row and look up its artifact
    ///
    /// # Errors
    ///
    /// `RowNotFound` if the row is not in the projection.
    pub fn select_row(&mut self, row_id: &RowId) -> Result<()> {
        let row = self
            .visible_row(row_id)
            .cloned()
            .ok_or_else(|| TableError::RowNotFound {
                row_id: row_id.clone(),
            })?;
        self.select_visible(&row);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::NoSelection;
        self.preview = None;
    }

    /// Move the selection over the projection; returns whether it moved
    pub fn navigate(&mut self, direction: Direction) -> bool {
        let Some(current) = self.selection.row_id() else {
            return false;
        };
        match navigator::navigate(&self.projection, current, direction) {
            Some(row) => {
                self.select_visible(&row);
                true
            }
            None => false,
        }
    }

    /// Re-run artifact matching for the selected row
    pub fn refresh_preview(&mut self) {
        let matched = self
            .selection
            .row_id()
            .and_then(|id| self.visible_row(id))
            .and_then(|row| self.matcher.find_match(row))
            .map(|(id, _)| id.clone());
        self.preview = matched;
    }

    // Generation

    /// Build the request for the visible rows and mark it in flight
    ///
    /// # Errors
    ///
    /// `GenerationInFlight` while another request is outstanding, otherwise
    /// the validation errors of [`GenerationRequest::for_rows`].
    pub fn begin_generation(&mut self) -> Result<GenerationRequest> {
        self.instrumented("begin_generation", |state| {
            if let Some(request_id) = state.generation.in_flight() {
                return Err(TableError::GenerationInFlight {
                    request_id: request_id.clone(),
                });
            }
            let request = GenerationRequest::for_rows(&state.projection, &state.config)?;
            state.generation.begin(&request.request_id)?;
            tracing::debug!(
                request_id = %request.request_id,
                row_count = request.len(),
                "generation started"
            );
            Ok(request)
        })
    }

    /// Install the outcome of the in-flight request
    ///
    /// Success replaces the artifact map and returns its size; the preview
    /// is cleared until [`refresh_preview`](Self::refresh_preview) is called.
    ///
    /// # Errors
    ///
    /// `NoGenerationInFlight` if nothing is outstanding. `GenerationFailed`
    /// for a failure outcome, after clearing artifacts, preview and
    /// selection.
    pub fn complete_generation(&mut self, outcome: GenerationOutcome) -> Result<usize> {
        self.instrumented("complete_generation", |state| {
            let request_id = state.generation.finish()?;
            match outcome {
                GenerationOutcome::Success(artifacts) => {
                    let count = artifacts.len();
                    tracing::debug!(request_id = %request_id, count, "artifacts installed");
                    state.matcher.replace_all(artifacts);
                    state.preview = None;
                    Ok(count)
                }
                GenerationOutcome::Failure { message } => {
                    state.matcher.clear();
                    state.preview = None;
                    state.selection = Selection::NoSelection;
                    Err(TableError::GenerationFailed { message })
                }
            }
        })
    }

    /// Run a whole generation round trip through `generator`
    ///
    /// # Errors
    ///
    /// Anything [`begin_generation`](Self::begin_generation) or
    /// [`complete_generation`](Self::complete_generation) reports.
    pub fn generate_with(&mut self, generator: &dyn ArtifactGenerator) -> Result<usize> {
        let request = self.begin_generation()?;
        let outcome = generator.generate(&request);
        self.complete_generation(outcome)
    }

    // Reads

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Canonical rows
    pub fn rows(&self) -> &Snapshot {
        self.history.current()
    }

    /// Visible rows, filtered and sorted
    pub fn projection(&self) -> &[Arc<Row>] {
        &self.projection
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_row(&self) -> Option<&Arc<Row>> {
        self.selection.row_id().and_then(|id| self.visible_row(id))
    }

    pub fn artifacts(&self) -> &ArtifactMap {
        self.matcher.artifacts()
    }

    /// First image artifact generated from a row's current key
    pub fn find_match(&self, row_id: &RowId) -> Option<(&ArtifactId, &Artifact)> {
        let (_, row) = self.rows().find(row_id)?;
        self.matcher.find_match(row)
    }

    /// Artifact bound to the selected row
    pub fn preview(&self) -> Option<(&ArtifactId, &Artifact)> {
        let id = self.preview.as_ref()?;
        self.matcher.artifacts().get(id).map(|artifact| (id, artifact))
    }

    /// Search input as typed
    pub fn search_term(&self) -> &str {
        self.search.raw()
    }

    /// Search term the projection is filtered by
    pub fn active_search_term(&self) -> &str {
        self.search.stable()
    }

    pub fn sort(&self) -> Option<&SortDirective> {
        self.sort.as_ref()
    }

    pub fn is_generating(&self) -> bool {
        self.generation.is_busy()
    }

    /// Whether the table holds nothing but empty rows
    pub fn is_blank(&self) -> bool {
        ingest::is_blank(self.rows())
    }

    pub fn view(&self) -> TableView {
        let owned = |(id, artifact): (&ArtifactId, &Artifact)| (id.clone(), artifact.clone());
        TableView {
            rows: self.projection.clone(),
            columns: self.columns.clone(),
            selected: self.selection.row_id().cloned(),
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            preview: self.preview().map(owned),
            bulk_pdf: self.artifacts().bulk_pdf().map(owned),
            generating: self.is_generating(),
            search_term: self.search.raw().to_string(),
            sort: self.sort.clone(),
        }
    }
}
