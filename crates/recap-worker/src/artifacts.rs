//! Input loading and artifact persistence.
//!
//! Any persistence failure is logged and re-raised: the run is aborted
//! rather than continued on a partially written artifact set.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use recap_models::{Chunk, ClusterMap};

use crate::error::{WorkerError, WorkerResult};

/// One timestamped transcript segment, as produced by the external
/// transcription collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Start timestamp (HH:MM:SS.ff)
    pub start: String,
    /// End timestamp (HH:MM:SS.ff)
    pub end: String,
    /// Transcribed text
    pub text: String,
}

/// A full transcript: the ordered segment list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub segments: Vec<TranscriptSegment>,
}

/// Load the transcript JSON from disk.
pub fn load_transcript(path: &Path) -> WorkerResult<Transcript> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| WorkerError::artifact(format!("Failed to read {}: {}", path.display(), e)))?;
    let transcript: Transcript = serde_json::from_str(&raw)?;
    info!(
        path = %path.display(),
        segments = transcript.segments.len(),
        "Loaded transcript"
    );
    Ok(transcript)
}

/// Load the allowed topic list (JSON string array) from disk.
pub fn load_topics(path: &Path) -> WorkerResult<Vec<String>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| WorkerError::artifact(format!("Failed to read {}: {}", path.display(), e)))?;
    let topics: Vec<String> = serde_json::from_str(&raw)?;
    info!(path = %path.display(), topics = topics.len(), "Loaded topic list");
    Ok(topics)
}

/// Persist a chunk-record list as pretty-printed JSON.
pub fn persist_chunks(path: &Path, chunks: &[Chunk]) -> WorkerResult<()> {
    persist_json(path, chunks)
}

/// Persist the cluster map as pretty-printed JSON.
pub fn persist_cluster_map(path: &Path, map: &ClusterMap) -> WorkerResult<()> {
    persist_json(path, map)
}

/// Serialize `value` to `path`, logging and re-raising on failure.
pub fn persist_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> WorkerResult<()> {
    let body = serde_json::to_string_pretty(value)?;
    if let Err(e) = std::fs::write(path, body) {
        error!(path = %path.display(), error = %e, "Failed to persist artifact");
        return Err(WorkerError::artifact(format!(
            "Failed to write {}: {}",
            path.display(),
            e
        )));
    }
    info!(path = %path.display(), "Persisted artifact");
    Ok(())
}
