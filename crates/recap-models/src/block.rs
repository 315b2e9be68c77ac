//! Highlight block models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::chunk::na_string;
use crate::timestamp::parse_timestamp;

/// A `(start, end)` timestamp pair handed to the video assembler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TimeSegment {
    /// Start timestamp (HH:MM:SS.ff)
    pub start: String,
    /// End timestamp (HH:MM:SS.ff)
    pub end: String,
}

impl TimeSegment {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Start time in seconds; malformed timestamps sort first.
    pub fn start_seconds(&self) -> f64 {
        parse_timestamp(&self.start).unwrap_or(0.0)
    }

    /// End time in seconds; malformed timestamps count as zero.
    pub fn end_seconds(&self) -> f64 {
        parse_timestamp(&self.end).unwrap_or(0.0)
    }
}

/// A temporally contiguous, single-cluster run of retained chunks.
///
/// Member chunk ids are strictly increasing and consecutive members differ
/// by at most the grouper's `max_gap_chunks`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HighlightBlock {
    /// Cluster id shared by all member chunks
    pub cluster_id: Option<u32>,

    /// Topic of the first member chunk
    #[serde(with = "na_string")]
    #[schemars(with = "String")]
    pub topic_name: Option<String>,

    /// First member chunk id
    pub start_chunk_id: u32,

    /// Last member chunk id
    pub end_chunk_id: u32,

    /// Member `(start, end)` pairs in chunk order
    pub segments: Vec<TimeSegment>,
}

impl HighlightBlock {
    /// Total duration of the block's segments in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.segments
            .iter()
            .map(|s| (s.end_seconds() - s.start_seconds()).max(0.0))
            .sum()
    }
}
