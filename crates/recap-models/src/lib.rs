//! Shared data models for the LectureRecap curation backend.
//!
//! This crate provides Serde-serializable types for:
//! - Classified transcript chunks and action tags
//! - Highlight blocks and time segments
//! - Topic cluster maps
//! - Curation run identity

pub mod block;
pub mod chunk;
pub mod cluster;
pub mod run;
pub mod timestamp;

// Re-export common types
pub use block::{HighlightBlock, TimeSegment};
pub use chunk::{ActionTag, Chunk};
pub use cluster::{ClusterEntry, ClusterMap};
pub use run::RunId;
pub use timestamp::{format_timestamp, parse_timestamp, TimestampError};
