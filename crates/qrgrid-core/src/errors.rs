use qrgrid_core_types::{ArtifactId, RequestId, RowId};
use thiserror::Error;

/// Result type alias using TableError
pub type Result<T> = std::result::Result<T, TableError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that the presentation layer and
/// the logs can rely on regardless of how the message text evolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input validation
    InvalidInput,
    MissingColumn,
    EmptyContent,
    BatchTooLarge,
    DuplicateId,

    // Lookup
    NotFound,

    // Row sources
    ParseFailure,

    // Generation
    GenerationInFlight,
    GenerationNotStarted,
    ExternalService,

    // Configuration / encoding
    InvalidConfig,
    Serialization,
    Decode,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::MissingColumn => "ERR_MISSING_COLUMN",
            ExErrorKind::EmptyContent => "ERR_EMPTY_CONTENT",
            ExErrorKind::BatchTooLarge => "ERR_BATCH_TOO_LARGE",
            ExErrorKind::DuplicateId => "ERR_DUPLICATE_ID",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::ParseFailure => "ERR_PARSE_FAILURE",
            ExErrorKind::GenerationInFlight => "ERR_GENERATION_IN_FLIGHT",
            ExErrorKind::GenerationNotStarted => "ERR_GENERATION_NOT_STARTED",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Decode => "ERR_DECODE",
        }
    }

    /// Whether this kind is an input validation problem the user can fix
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ExErrorKind::InvalidInput
                | ExErrorKind::MissingColumn
                | ExErrorKind::EmptyContent
                | ExErrorKind::BatchTooLarge
                | ExErrorKind::DuplicateId
        )
    }
}

/// Canonical structured error type
///
/// Carries the classification plus the context the presentation layer needs
/// to show a message next to the offending row or request.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    row_id: Option<RowId>,
    artifact_id: Option<ArtifactId>,
    request_id: Option<RequestId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            row_id: None,
            artifact_id: None,
            request_id: None,
            message: String::new(),
        }
    }

    /// Set the operation name
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Set the row the error refers to
    pub fn with_row_id(mut self, row_id: RowId) -> Self {
        self.row_id = Some(row_id);
        self
    }

    /// Set the artifact the error refers to
    pub fn with_artifact_id(mut self, artifact_id: ArtifactId) -> Self {
        self.artifact_id = Some(artifact_id);
        self
    }

    /// Set the generation request id
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Set the human-readable message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn row_id(&self) -> Option<&RowId> {
        self.row_id.as_ref()
    }

    pub fn artifact_id(&self) -> Option<&ArtifactId> {
        self.artifact_id.as_ref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(row_id) = &self.row_id {
            write!(f, " (row_id: {})", row_id)?;
        }
        if let Some(artifact_id) = &self.artifact_id {
            write!(f, " (artifact_id: {})", artifact_id)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for table engine operations
///
/// Every variant is recoverable. The operation that produced it left the
/// table state as it was before the call, except `GenerationFailed`, which
/// is reported after the artifacts have been cleared.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    // ===== Input Validation =====
    /// No content column has been chosen yet
    #[error("No content column selected")]
    MissingContentColumn,

    /// Nothing to generate from
    #[error("No non-empty content to generate from")]
    EmptyContent,

    /// Too many items for one generation request
    #[error("Batch of {count} items exceeds the limit of {max}")]
    BatchTooLarge { count: usize, max: usize },

    /// Field name is not usable as a column
    #[error("Invalid field name: {field:?}")]
    InvalidField { field: String },

    /// Two rows in one snapshot share an identity
    #[error("Duplicate row id: {row_id}")]
    DuplicateRowId { row_id: RowId },

    // ===== Lookup =====
    /// Row not present in the canonical table
    #[error("Row not found: {row_id}")]
    RowNotFound { row_id: RowId },

    /// Artifact not present in the artifact map
    #[error("Artifact not found: {artifact_id}")]
    ArtifactNotFound { artifact_id: ArtifactId },

    // ===== Row Sources =====
    /// Pasted text contained no usable rows
    #[error("Pasted text contains no rows")]
    EmptyPaste,

    /// A row source could not be parsed
    #[error("Failed to parse rows: {message}")]
    Parse { message: String },

    // ===== Generation =====
    /// A generation request is already outstanding
    #[error("Generation already in flight: {request_id}")]
    GenerationInFlight { request_id: RequestId },

    /// A generation result arrived with no outstanding request
    #[error("No generation request is in flight")]
    NoGenerationInFlight,

    /// The generation collaborator reported a failure
    #[error("Generation failed: {message}")]
    GenerationFailed { message: String },

    // ===== Configuration / Encoding =====
    /// Configuration values are out of range
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Serialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Artifact payload is not valid base64
    #[error("Failed to decode payload of artifact {artifact_id}: {message}")]
    PayloadDecode {
        artifact_id: ArtifactId,
        message: String,
    },
}

impl From<TableError> for ExError {
    fn from(err: TableError) -> Self {
        let message = err.to_string();
        match err {
            TableError::MissingContentColumn => {
                ExError::new(ExErrorKind::MissingColumn).with_message(message)
            }
            TableError::EmptyContent => ExError::new(ExErrorKind::EmptyContent).with_message(message),
            TableError::BatchTooLarge { .. } => {
                ExError::new(ExErrorKind::BatchTooLarge).with_message(message)
            }
            TableError::InvalidField { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }
            TableError::DuplicateRowId { row_id } => ExError::new(ExErrorKind::DuplicateId)
                .with_row_id(row_id)
                .with_message(message),
            TableError::RowNotFound { row_id } => ExError::new(ExErrorKind::NotFound)
                .with_row_id(row_id)
                .with_message(message),
            TableError::ArtifactNotFound { artifact_id } => ExError::new(ExErrorKind::NotFound)
                .with_artifact_id(artifact_id)
                .with_message(message),
            TableError::EmptyPaste | TableError::Parse { .. } => {
                ExError::new(ExErrorKind::ParseFailure).with_message(message)
            }
            TableError::GenerationInFlight { request_id } => {
                ExError::new(ExErrorKind::GenerationInFlight)
                    .with_request_id(request_id)
                    .with_message(message)
            }
            TableError::NoGenerationInFlight => {
                ExError::new(ExErrorKind::GenerationNotStarted).with_message(message)
            }
            TableError::GenerationFailed { .. } => {
                ExError::new(ExErrorKind::ExternalService).with_message(message)
            }
            TableError::InvalidConfig { .. } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(message)
            }
            TableError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
            TableError::PayloadDecode { artifact_id, .. } => ExError::new(ExErrorKind::Decode)
                .with_artifact_id(artifact_id)
                .with_message(message),
        }
    }
}

/// Conversion from serde_json::Error to TableError
impl From<serde_json::Error> for TableError {
    fn from(err: serde_json::Error) -> Self {
        TableError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for TableError {
    fn from(err: toml::de::Error) -> Self {
        TableError::Serialization {
            message: err.to_string(),
        }
    }
}
