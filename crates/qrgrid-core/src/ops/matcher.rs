//! Row to artifact association by generation-time text
//!
//! Artifacts are matched to rows by the `content,label` key the row would
//! produce now. Editing a row removes every image artifact whose key no
//! longer describes current table contents.

use qrgrid_core_types::ArtifactId;

use crate::config::TableConfig;
use crate::model::{Artifact, ArtifactMap, Row};

/// Generation key of a row: content and label joined by a comma
///
/// A missing label column or value contributes "".
pub fn artifact_key(row: &Row, content_column: &str, label_column: Option<&str>) -> String {
    let label = label_column.map(|col| row.text(col)).unwrap_or_default();
    format!("{},{}", row.text(content_column), label)
}

/// Owner of the artifact map and the key columns used to match it
#[derive(Debug, Clone, Default)]
pub struct ArtifactMatcher {
    content_column: String,
    label_column: Option<String>,
    artifacts: ArtifactMap,
}

impl ArtifactMatcher {
    pub fn new(config: &TableConfig) -> Self {
        Self {
            content_column: config.content_column.clone(),
            label_column: config.label_column.clone(),
            artifacts: ArtifactMap::new(),
        }
    }

    /// Key `row` would generate with the current columns
    pub fn key_of(&self, row: &Row) -> String {
        artifact_key(row, &self.content_column, self.label_column.as_deref())
    }

    /// First image artifact, in ascending id order, generated from `row`'s key
    pub fn find_match(&self, row: &Row) -> Option<(&ArtifactId, &Artifact)> {
        self.artifacts.find_image(&self.key_of(row))
    }

    /// Drop image artifacts made stale by an edit of one row
    ///
    /// Removes artifacts keyed by the row's text before the edit and by its
    /// text after the edit. Returns the removed ids.
    pub fn on_row_edited(&mut self, before: &Row, after: &Row) -> Vec<ArtifactId> {
        let old_key = self.key_of(before);
        let new_key = self.key_of(after);
        self.artifacts.remove_where(|artifact| {
            artifact.is_image()
                && (artifact.generation_text == old_key || artifact.generation_text == new_key)
        })
    }

    /// Install the result of a successful generation
    pub fn replace_all(&mut self, artifacts: ArtifactMap) {
        self.artifacts = artifacts;
    }

    pub fn clear(&mut self) {
        self.artifacts.clear();
    }

    /// Change the key columns; existing artifacts stay but may stop matching
    pub fn set_columns(&mut self, content_column: &str, label_column: Option<&str>) {
        self.content_column = content_column.to_string();
        self.label_column = label_column.map(str::to_string);
    }

    pub fn artifacts(&self) -> &ArtifactMap {
        &self.artifacts
    }
}
