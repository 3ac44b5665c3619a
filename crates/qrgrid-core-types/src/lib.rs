//! Core types shared across the qrgrid crates
//!
//! This crate provides the foundational types used by the table engine,
//! its error facility and its logging facility:
//!
//! - **Identity types**: RowId, ArtifactId, RequestId
//! - **Schema constants**: Canonical field keys and event names

pub mod ids;
pub mod schema;

pub use ids::{ArtifactId, RequestId, RowId};
