use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use qrgrid_core_types::ArtifactId;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, TableError};

/// What a generated artifact is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// One rendered image per generation item; matchable to a row
    Image,
    /// Whole-batch document; never matched to a single row
    Pdf,
}

/// Output of the generation collaborator for one item (or the whole batch)
///
/// Field names on the wire follow the generation service's JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Exact `content,label` text the artifact was generated from
    #[serde(rename = "qrcode_text")]
    pub generation_text: String,

    /// Rendered payload, usually a `data:<mime>;base64,` URL
    #[serde(rename = "base64_image")]
    pub payload: String,

    /// Server-side file name, used as the download name
    #[serde(default)]
    pub file_path: String,

    #[serde(rename = "file_type")]
    pub kind: ArtifactKind,
}

impl Artifact {
    pub fn image(generation_text: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            generation_text: generation_text.into(),
            payload: payload.into(),
            file_path: String::new(),
            kind: ArtifactKind::Image,
        }
    }

    pub fn pdf(generation_text: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            generation_text: generation_text.into(),
            payload: payload.into(),
            file_path: String::new(),
            kind: ArtifactKind::Pdf,
        }
    }

    pub fn with_file_path(mut self, path: impl Into<String>) -> Self {
        self.file_path = path.into();
        self
    }

    pub fn is_image(&self) -> bool {
        self.kind == ArtifactKind::Image
    }

    /// Base64 body of the payload, without any data-URL header
    pub fn payload_base64(&self) -> &str {
        match self.payload.split_once(";base64,") {
            Some((header, body)) if header.starts_with("data:") => body,
            _ => &self.payload,
        }
    }

    /// Last path segment of `file_path`, accepting either separator
    pub fn file_name(&self) -> Option<&str> {
        self.file_path
            .rsplit(|c: char| c == '/' || c == '\\')
            .next()
            .filter(|name| !name.is_empty())
    }
}

/// Artifacts of one generation batch, keyed by their generation-time id
///
/// Iteration is in ascending id order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactMap {
    entries: BTreeMap<ArtifactId, Artifact>,
}

impl ArtifactMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: ArtifactId, artifact: Artifact) -> Option<Artifact> {
        self.entries.insert(id, artifact)
    }

    pub fn get(&self, id: &ArtifactId) -> Option<&Artifact> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &ArtifactId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ArtifactId, &Artifact)> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Remove every artifact matching `predicate`, returning their ids
    pub fn remove_where<F>(&mut self, predicate: F) -> Vec<ArtifactId>
    where
        F: Fn(&Artifact) -> bool,
    {
        let doomed: Vec<ArtifactId> = self
            .entries
            .iter()
            .filter(|(_, artifact)| predicate(artifact))
            .map(|(id, _)| id.clone())
            .collect();
        for id in &doomed {
            self.entries.remove(id);
        }
        doomed
    }

    /// First image artifact generated from exactly `text`
    pub fn find_image(&self, text: &str) -> Option<(&ArtifactId, &Artifact)> {
        self.entries
            .iter()
            .find(|(_, artifact)| artifact.is_image() && artifact.generation_text == text)
    }

    /// The whole-batch PDF, if the generation produced one
    pub fn bulk_pdf(&self) -> Option<(&ArtifactId, &Artifact)> {
        self.entries
            .iter()
            .find(|(_, artifact)| artifact.kind == ArtifactKind::Pdf)
    }

    /// Decode the payload bytes of one artifact
    ///
    /// # Errors
    ///
    /// `ArtifactNotFound` for an unknown id, `PayloadDecode` if the payload
    /// is not valid base64.
    pub fn decode_payload(&self, id: &ArtifactId) -> Result<Vec<u8>> {
        let artifact = self.get(id).ok_or_else(|| TableError::ArtifactNotFound {
            artifact_id: id.clone(),
        })?;
        STANDARD
            .decode(artifact.payload_base64())
            .map_err(|e| TableError::PayloadDecode {
                artifact_id: id.clone(),
                message: e.to_string(),
            })
    }
}

impl FromIterator<(ArtifactId, Artifact)> for ArtifactMap {
    fn from_iter<I: IntoIterator<Item = (ArtifactId, Artifact)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
