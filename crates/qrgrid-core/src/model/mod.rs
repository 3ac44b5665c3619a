pub mod artifact;
pub mod row;
pub mod snapshot;

pub use artifact::{Artifact, ArtifactKind, ArtifactMap};
pub use row::{CellValue, Row};
pub use snapshot::Snapshot;
