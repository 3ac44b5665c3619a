//! Identity types for rows, artifacts and generation requests
//!
//! Identities are opaque strings. Row and request identities are minted
//! locally from UUIDv7; artifact identities are assigned by the generation
//! collaborator and only ever wrapped here.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identity of a table row
///
/// Assigned once when the row is created and never recomputed from the
/// row's content, so a row keeps its identity across edits, sorts and
/// history moves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    /// Mint a fresh RowId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wrap an existing identity string (e.g. one handed back by the grid)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for RowId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for RowId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Key of a generated artifact, as assigned by the generation call
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactId(String);

impl ArtifactId {
    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wrap a key produced by the generation collaborator
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ArtifactId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for one generation request, used to correlate logs
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new random RequestId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (for deserialization)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_id_generation_is_unique() {
        let id1 = RowId::new();
        let id2 = RowId::new();

        assert_ne!(id1, id2);
        assert!(!id1.as_str().is_empty());
    }

    #[test]
    fn test_row_id_display() {
        let id = RowId::from("row-7");
        assert_eq!(format!("{}", id), "row-7");
    }

    #[test]
    fn test_artifact_id_wraps_collaborator_key() {
        let id = ArtifactId::from_string("01HZX".to_string());
        assert_eq!(id.as_str(), "01HZX");
        assert_eq!(ArtifactId::from("01HZX"), id);
    }

    #[test]
    fn test_request_id_generation() {
        let id1 = RequestId::new();
        let id2 = RequestId::new();

        assert_ne!(id1, id2);
        assert_eq!(format!("{}", id1), id1.as_str());
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let id = RowId::from("r1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"r1\"");

        let back: RowId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        let artifact: ArtifactId = serde_json::from_str("\"a1\"").unwrap();
        assert_eq!(artifact.as_str(), "a1");
    }
}
