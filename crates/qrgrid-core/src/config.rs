//! Table engine configuration
//!
//! Which columns feed the artifact key and the search filter, and the
//! numeric limits of the engine. Every field has a default, so an empty TOML
//! document is a valid configuration.
//!
//! ```
//! use qrgrid_core::config::TableConfig;
//!
//! let config = TableConfig::from_toml_str(r#"
//!     content_column = "url"
//!     label_column = "name"
//!     debounce_ms = 300
//! "#).unwrap();
//!
//! assert_eq!(config.content_column, "url");
//! assert_eq!(config.search_column(), "url");
//! assert_eq!(config.history_cap, 50);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, TableError};

pub const DEFAULT_CONTENT_COLUMN: &str = "content";
pub const DEFAULT_LABEL_COLUMN: &str = "label";
pub const DEFAULT_HISTORY_CAP: usize = 50;
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;

fn default_content_column() -> String {
    DEFAULT_CONTENT_COLUMN.to_string()
}

fn default_label_column() -> Option<String> {
    Some(DEFAULT_LABEL_COLUMN.to_string())
}

fn default_history_cap() -> usize {
    DEFAULT_HISTORY_CAP
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

/// Configuration of one table editor instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    /// Column whose value is encoded into the artifact
    ///
    /// May be empty while the user has not picked a column yet; generation
    /// is refused in that state.
    #[serde(default = "default_content_column")]
    pub content_column: String,

    /// Column printed under the artifact; absent values read as ""
    #[serde(default = "default_label_column")]
    pub label_column: Option<String>,

    /// Column the search term is matched against (defaults to content_column)
    #[serde(default)]
    pub search_column: Option<String>,

    /// Maximum number of snapshots kept in history
    #[serde(default = "default_history_cap")]
    pub history_cap: usize,

    /// Quiet period before a search term takes effect
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Maximum number of items in one generation request
    ///
    /// Unbounded unless set; table generation sends every visible row.
    #[serde(default)]
    pub max_batch_size: Option<usize>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            content_column: default_content_column(),
            label_column: default_label_column(),
            search_column: None,
            history_cap: DEFAULT_HISTORY_CAP,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            max_batch_size: None,
        }
    }
}

impl TableConfig {
    /// Parse and validate a TOML configuration document
    ///
    /// # Errors
    ///
    /// `Serialization` if the document is not valid TOML for this schema,
    /// `InvalidConfig` if a value is out of range.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: TableConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Check numeric limits
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if `history_cap` or `max_batch_size` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.history_cap == 0 {
            return Err(TableError::InvalidConfig {
                reason: "history_cap must be at least 1".to_string(),
            });
        }
        if self.max_batch_size == Some(0) {
            return Err(TableError::InvalidConfig {
                reason: "max_batch_size must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Set the content and label columns
    pub fn with_columns(mut self, content: impl Into<String>, label: Option<&str>) -> Self {
        self.content_column = content.into();
        self.label_column = label.map(str::to_string);
        self
    }

    /// Search a column other than the content column
    pub fn with_search_column(mut self, column: impl Into<String>) -> Self {
        self.search_column = Some(column.into());
        self
    }

    pub fn with_history_cap(mut self, cap: usize) -> Self {
        self.history_cap = cap;
        self
    }

    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    pub fn with_max_batch_size(mut self, max: usize) -> Self {
        self.max_batch_size = Some(max);
        self
    }

    /// Column the search filter reads
    pub fn search_column(&self) -> &str {
        self.search_column
            .as_deref()
            .unwrap_or(&self.content_column)
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Whether a content column has been chosen
    pub fn has_content_column(&self) -> bool {
        !self.content_column.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TableConfig::default();
        assert_eq!(config.content_column, "content");
        assert_eq!(config.label_column.as_deref(), Some("label"));
        assert_eq!(config.search_column(), "content");
        assert_eq!(config.history_cap, 50);
        assert_eq!(config.debounce_delay(), Duration::from_millis(1000));
        assert_eq!(config.max_batch_size, None);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = TableConfig::from_toml_str("").unwrap();
        assert_eq!(config, TableConfig::default());
    }

    #[test]
    fn test_search_column_override() {
        let config = TableConfig::from_toml_str("search_column = \"label\"").unwrap();
        assert_eq!(config.search_column(), "label");
    }

    #[test]
    fn test_zero_history_cap_rejected() {
        let result = TableConfig::from_toml_str("history_cap = 0");
        assert!(matches!(result, Err(TableError::InvalidConfig { .. })));
    }

    #[test]
    fn test_batch_limit_from_toml() {
        let config = TableConfig::from_toml_str("max_batch_size = 50").unwrap();
        assert_eq!(config.max_batch_size, Some(50));

        let result = TableConfig::from_toml_str("max_batch_size = 0");
        assert!(matches!(result, Err(TableError::InvalidConfig { .. })));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = TableConfig::from_toml_str("colour = \"red\"");
        assert!(matches!(result, Err(TableError::Serialization { .. })));
    }

    #[test]
    fn test_missing_content_column() {
        let config = TableConfig::default().with_columns("", None);
        assert!(!config.has_content_column());
        assert!(config.label_column.is_none());
    }
}
