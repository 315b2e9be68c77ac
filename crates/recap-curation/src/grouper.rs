//! Highlight block grouping.
//!
//! Merges adjacent same-cluster chunks (within a chunk-id gap tolerance)
//! into ordered highlight blocks. Grouping assigns topic/cluster labeling
//! and gap semantics; the final cut order is decided by
//! [`flatten_segments_by_start`], which sorts by start time across blocks.

use tracing::debug;

use recap_models::{Chunk, HighlightBlock, TimeSegment};

fn open_block(chunk: &Chunk) -> HighlightBlock {
    HighlightBlock {
        cluster_id: chunk.cluster_id,
        topic_name: chunk.topic_name.clone(),
        start_chunk_id: chunk.chunk_id,
        end_chunk_id: chunk.chunk_id,
        segments: vec![TimeSegment::new(&chunk.start, &chunk.end)],
    }
}

/// Group a filtered chunk subset into gap-tolerant, single-cluster blocks.
///
/// The input is sorted by chunk id first; a chunk extends the open block
/// when its cluster matches and the id gap from the previous chunk is at
/// most `max_gap_chunks`, otherwise it starts a new block.
pub fn group_highlight_blocks(chunks: &[Chunk], max_gap_chunks: u32) -> Vec<HighlightBlock> {
    if chunks.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<&Chunk> = chunks.iter().collect();
    sorted.sort_by_key(|c| c.chunk_id);

    let mut blocks = Vec::new();
    let mut current = open_block(sorted[0]);
    let mut prev_chunk_id = sorted[0].chunk_id;

    for chunk in &sorted[1..] {
        let same_cluster = chunk.cluster_id == current.cluster_id;
        let small_gap = chunk.chunk_id - prev_chunk_id <= max_gap_chunks;

        if same_cluster && small_gap {
            current.end_chunk_id = chunk.chunk_id;
            current
                .segments
                .push(TimeSegment::new(&chunk.start, &chunk.end));
        } else {
            blocks.push(current);
            current = open_block(chunk);
        }

        prev_chunk_id = chunk.chunk_id;
    }

    blocks.push(current);

    debug!(
        chunks = sorted.len(),
        blocks = blocks.len(),
        max_gap_chunks,
        "Grouped highlight blocks"
    );
    blocks
}

/// Flatten all blocks' segments and sort them by start time.
///
/// This is the list handed to the external cut/concatenate tool: time
/// order, not block order, dictates the final cut sequence.
pub fn flatten_segments_by_start(blocks: &[HighlightBlock]) -> Vec<TimeSegment> {
    let mut segments: Vec<TimeSegment> = blocks
        .iter()
        .flat_map(|b| b.segments.iter().cloned())
        .collect();
    segments.sort_by(|a, b| a.start_seconds().total_cmp(&b.start_seconds()));
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use recap_models::ActionTag;

    fn chunk(id: u32, cluster: u32, start: &str, end: &str) -> Chunk {
        let mut c = Chunk::teaching(
            id,
            start,
            end,
            "text",
            ActionTag::Example,
            Some(format!("Topic {cluster}")),
            0.8,
        );
        c.cluster_id = Some(cluster);
        c
    }

    #[test]
    fn gap_at_tolerance_merges() {
        let chunks = vec![
            chunk(1, 1, "00:00:00.00", "00:00:20.00"),
            chunk(3, 1, "00:00:40.00", "00:01:00.00"),
        ];

        let blocks = group_highlight_blocks(&chunks, 2);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].start_chunk_id, 1);
        assert_eq!(blocks[0].end_chunk_id, 3);
        assert_eq!(blocks[0].segments.len(), 2);
    }

    #[test]
    fn gap_above_tolerance_splits() {
        let chunks = vec![
            chunk(1, 1, "00:00:00.00", "00:00:20.00"),
            chunk(4, 1, "00:01:00.00", "00:01:20.00"),
        ];

        let blocks = group_highlight_blocks(&chunks, 2);
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn cluster_change_splits() {
        let chunks = vec![
            chunk(1, 1, "00:00:00.00", "00:00:20.00"),
            chunk(2, 2, "00:00:20.00", "00:00:40.00"),
            chunk(3, 2, "00:00:40.00", "00:01:00.00"),
        ];

        let blocks = group_highlight_blocks(&chunks, 1);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].cluster_id, Some(1));
        assert_eq!(blocks[1].cluster_id, Some(2));
        assert_eq!(blocks[1].start_chunk_id, 2);
        assert_eq!(blocks[1].end_chunk_id, 3);
    }

    #[test]
    fn unsorted_input_is_sorted_first() {
        let chunks = vec![
            chunk(3, 1, "00:00:40.00", "00:01:00.00"),
            chunk(1, 1, "00:00:00.00", "00:00:20.00"),
            chunk(2, 1, "00:00:20.00", "00:00:40.00"),
        ];

        let blocks = group_highlight_blocks(&chunks, 1);
        assert_eq!(blocks.len(), 1);
        assert_eq!(
            blocks[0]
                .segments
                .iter()
                .map(|s| s.start.as_str())
                .collect::<Vec<_>>(),
            vec!["00:00:00.00", "00:00:20.00", "00:00:40.00"]
        );
    }

    #[test]
    fn block_topic_comes_from_first_member() {
        let mut a = chunk(1, 1, "00:00:00.00", "00:00:20.00");
        a.topic_name = Some("First".to_string());
        let mut b = chunk(2, 1, "00:00:20.00", "00:00:40.00");
        b.topic_name = Some("Second".to_string());

        let blocks = group_highlight_blocks(&[a, b], 1);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].topic_name.as_deref(), Some("First"));
    }

    #[test]
    fn flatten_sorts_by_start_time_across_blocks() {
        let blocks = vec![
            HighlightBlock {
                cluster_id: Some(2),
                topic_name: Some("B".to_string()),
                start_chunk_id: 5,
                end_chunk_id: 6,
                segments: vec![
                    TimeSegment::new("00:02:00.00", "00:02:20.00"),
                    TimeSegment::new("00:02:20.00", "00:02:40.00"),
                ],
            },
            HighlightBlock {
                cluster_id: Some(1),
                topic_name: Some("A".to_string()),
                start_chunk_id: 1,
                end_chunk_id: 1,
                segments: vec![TimeSegment::new("00:00:10.00", "00:00:30.00")],
            },
        ];

        let flat = flatten_segments_by_start(&blocks);
        assert_eq!(
            flat.iter().map(|s| s.start.as_str()).collect::<Vec<_>>(),
            vec!["00:00:10.00", "00:02:00.00", "00:02:20.00"]
        );
    }

    #[test]
    fn empty_input_yields_no_blocks() {
        assert!(group_highlight_blocks(&[], 1).is_empty());
    }
}
