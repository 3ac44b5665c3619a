//! Generation requests, outcomes and the in-flight gate
//!
//! The engine never talks to the artifact service itself. It builds a
//! request from the visible rows, hands it to an [`ArtifactGenerator`] (or
//! to the host, which completes it later), and installs the outcome.

use std::sync::Arc;

use qrgrid_core_types::RequestId;
use serde::{Deserialize, Serialize};

use crate::config::TableConfig;
use crate::errors::{Result, TableError};
use crate::model::{ArtifactMap, Row};
use crate::ops::matcher::artifact_key;

/// Ordered `content,label` items for one generation call
///
/// Serializes to the service's request body, `{"contents": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    #[serde(skip)]
    pub request_id: RequestId,
    #[serde(rename = "contents")]
    pub items: Vec<String>,
}

impl GenerationRequest {
    /// Build and validate the items for `rows`
    ///
    /// Every row contributes one item, in order.
    ///
    /// # Errors
    ///
    /// `MissingContentColumn` when no content column is chosen,
    /// `EmptyContent` when every row's content is blank, `BatchTooLarge`
    /// when a `max_batch_size` is set and there are more rows than that.
    pub fn for_rows(rows: &[Arc<Row>], config: &TableConfig) -> Result<Self> {
        if !config.has_content_column() {
            return Err(TableError::MissingContentColumn);
        }
        let content_column = config.content_column.as_str();
        if rows
            .iter()
            .all(|row| row.text(content_column).trim().is_empty())
        {
            return Err(TableError::EmptyContent);
        }
        if let Some(max) = config.max_batch_size.filter(|max| rows.len() > *max) {
            return Err(TableError::BatchTooLarge {
                count: rows.len(),
                max,
            });
        }

        let items = rows
            .iter()
            .map(|row| artifact_key(row, content_column, config.label_column.as_deref()))
            .collect();
        Ok(Self {
            request_id: RequestId::new(),
            items,
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Result of one generation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Success(ArtifactMap),
    Failure { message: String },
}

impl GenerationOutcome {
    pub fn failure(message: impl Into<String>) -> Self {
        GenerationOutcome::Failure {
            message: message.into(),
        }
    }
}

/// External artifact producer
pub trait ArtifactGenerator {
    /// Produce artifacts for every item of `request`
    fn generate(&self, request: &GenerationRequest) -> GenerationOutcome;
}

/// JSON envelope returned by the generation service
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerationResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<ArtifactMap>,
}

impl GenerationResponse {
    /// Parse the service's response body
    ///
    /// # Errors
    ///
    /// `Serialization` if the body is not a valid envelope.
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// A response only succeeds if it says so and carries data
    pub fn into_outcome(self) -> GenerationOutcome {
        match (self.success, self.data) {
            (true, Some(artifacts)) => GenerationOutcome::Success(artifacts),
            _ if self.message.is_empty() => {
                GenerationOutcome::failure("generation service returned no data")
            }
            _ => GenerationOutcome::Failure {
                message: self.message,
            },
        }
    }
}

/// At most one generation request in flight
#[derive(Debug, Clone, Default)]
pub struct GenerationGate {
    in_flight: Option<RequestId>,
}

impl GenerationGate {
    /// Mark `request_id` as in flight
    ///
    /// # Errors
    ///
    /// `GenerationInFlight` if another request has not completed.
    pub fn begin(&mut self, request_id: &RequestId) -> Result<()> {
        if let Some(current) = &self.in_flight {
            return Err(TableError::GenerationInFlight {
                request_id: current.clone(),
            });
        }
        self.in_flight = Some(request_id.clone());
        Ok(())
    }

    /// Release the gate, returning the request that held it
    ///
    /// # Errors
    ///
    /// `NoGenerationInFlight` if nothing was in flight.
    pub fn finish(&mut self) -> Result<RequestId> {
        self.in_flight.take().ok_or(TableError::NoGenerationInFlight)
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<&RequestId> {
        self.in_flight.as_ref()
    }
}
