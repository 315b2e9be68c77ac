//! Keep/drop statistics and the run summary artifact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use recap_models::{Chunk, RunId};

/// Teaching vs non-teaching totals for a classified chunk sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeepStats {
    pub teaching_chunks: usize,
    pub teaching_seconds: f64,
    pub non_teaching_chunks: usize,
    pub non_teaching_seconds: f64,
}

/// Compute keep/drop totals over the chunk sequence.
pub fn compute_keep_stats(chunks: &[Chunk]) -> KeepStats {
    let mut stats = KeepStats {
        teaching_chunks: 0,
        teaching_seconds: 0.0,
        non_teaching_chunks: 0,
        non_teaching_seconds: 0.0,
    };

    for chunk in chunks {
        let duration = chunk.duration_seconds();
        if chunk.keep {
            stats.teaching_chunks += 1;
            stats.teaching_seconds += duration;
        } else {
            stats.non_teaching_chunks += 1;
            stats.non_teaching_seconds += duration;
        }
    }

    stats
}

/// Log keep/drop totals at the end of classification.
pub fn log_keep_stats(stats: &KeepStats) {
    info!(
        chunks = stats.teaching_chunks,
        seconds = format!("{:.1}", stats.teaching_seconds),
        minutes = format!("{:.2}", stats.teaching_seconds / 60.0),
        "Teaching content"
    );
    info!(
        chunks = stats.non_teaching_chunks,
        seconds = format!("{:.1}", stats.non_teaching_seconds),
        minutes = format!("{:.2}", stats.non_teaching_seconds / 60.0),
        "Non-teaching content"
    );
}

/// Summary artifact persisted at the end of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurationSummary {
    pub run_id: RunId,
    pub generated_at: DateTime<Utc>,
    pub total_chunks: usize,
    pub keep_stats: KeepStats,
    pub cluster_count: usize,
    pub block_count: usize,
    pub segment_count: usize,
}
