pub mod debounce;
pub mod generation;
pub mod history;
pub mod ingest;
pub mod matcher;
pub mod navigator;
pub mod projection;

pub use debounce::{DebounceState, Debouncer};
pub use generation::{
    ArtifactGenerator, GenerationGate, GenerationOutcome, GenerationRequest, GenerationResponse,
};
pub use history::History;
pub use ingest::Record;
pub use matcher::{artifact_key, ArtifactMatcher};
pub use navigator::{navigate, Direction, Selection};
pub use projection::{project, SortDirection, SortDirective};
