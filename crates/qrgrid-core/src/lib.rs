//! qrgrid Core - state engine of the QR-code table editor
//!
//! This crate holds everything behind the editable grid:
//! - Rows, snapshots and generated artifacts
//! - Bounded undo/redo history over whole-table snapshots
//! - Debounced search with filter/sort projection
//! - Selection and keyboard navigation over the visible rows
//! - Artifact matching and invalidation on edit
//! - Generation request building and the one-in-flight gate
//!
//! Hosts drive it through [`TableState`] directly or through [`apply()`] with
//! an [`Intent`].

pub mod apply;
pub mod commands;
pub mod config;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod state;

pub use qrgrid_core_types;

// Re-export commonly used types
pub use apply::apply;
pub use commands::Intent;
pub use config::TableConfig;
pub use errors::{ExError, ExErrorKind, Result, TableError};
pub use model::{Artifact, ArtifactKind, ArtifactMap, CellValue, Row, Snapshot};
pub use ops::{
    ArtifactGenerator, Direction, GenerationOutcome, GenerationRequest, GenerationResponse,
    Selection, SortDirection, SortDirective,
};
pub use qrgrid_core_types::{ArtifactId, RequestId, RowId};
pub use state::{TableState, TableView};
