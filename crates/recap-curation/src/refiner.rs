//! Keep-flag refinement.
//!
//! One deterministic left-to-right pass over a fixed window of three chunks.
//! Neighbor values are read as already mutated within the same pass; the pass
//! is NOT iterated to a fixed point, so overlapping windows resolve in scan
//! order. Boundary chunks are never flipped, only reason-stamped.

use tracing::debug;

use recap_models::Chunk;

/// Reason stamped on chunks left unchanged by refinement.
pub const REASON_ORIGINAL: &str = "Original";
/// Reason stamped when a false gap between same-topic neighbors is filled.
pub const REASON_GAP_FILL: &str = "Sandwiched between same topic";
/// Reason stamped when an isolated teaching chunk is dropped.
pub const REASON_ISOLATED: &str = "Isolated teaching chunk";

fn reason_unset(chunk: &Chunk) -> bool {
    chunk
        .reason_for_keep_change
        .as_deref()
        .map_or(true, str::is_empty)
}

/// Apply local 3-chunk keep corrections in a single pass.
///
/// - Gap-fill: a non-keep chunk between two keep chunks sharing a topic is
///   flipped to keep and inherits that topic.
/// - Isolated removal: a keep chunk between two non-keep chunks is dropped.
/// - Everything else gets `"Original"` stamped if no reason is set yet.
///
/// After the pass every chunk carries a non-empty
/// `reason_for_keep_change`.
pub fn refine_keep(chunks: &mut [Chunk]) {
    if chunks.is_empty() {
        return;
    }

    let mut gap_fills = 0usize;
    let mut isolated_drops = 0usize;

    for i in 1..chunks.len().saturating_sub(1) {
        let prev_keep = chunks[i - 1].keep;
        let next_keep = chunks[i + 1].keep;
        let neighbors_same_topic = chunks[i - 1].topic_name == chunks[i + 1].topic_name;

        if !chunks[i].keep && prev_keep && next_keep && neighbors_same_topic {
            let topic = chunks[i - 1].topic_name.clone();
            let chunk = &mut chunks[i];
            chunk.keep = true;
            chunk.topic_name = topic;
            chunk.reason_for_keep_change = Some(REASON_GAP_FILL.to_string());
            gap_fills += 1;
        } else if chunks[i].keep && !prev_keep && !next_keep {
            let chunk = &mut chunks[i];
            chunk.keep = false;
            chunk.reason_for_keep_change = Some(REASON_ISOLATED.to_string());
            isolated_drops += 1;
        } else if reason_unset(&chunks[i]) {
            chunks[i].reason_for_keep_change = Some(REASON_ORIGINAL.to_string());
        }
    }

    // Boundary chunks are only stamped, never flipped.
    let last = chunks.len() - 1;
    if reason_unset(&chunks[0]) {
        chunks[0].reason_for_keep_change = Some(REASON_ORIGINAL.to_string());
    }
    if reason_unset(&chunks[last]) {
        chunks[last].reason_for_keep_change = Some(REASON_ORIGINAL.to_string());
    }

    debug!(
        total = chunks.len(),
        gap_fills, isolated_drops, "Refined keep flags"
    );
}
