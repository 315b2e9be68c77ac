//! End-to-end test of the curation passes chained in pipeline order:
//! smooth -> refine -> cluster -> group -> flatten.

use recap_curation::{
    assign_cluster_ids, flatten_segments_by_start, group_highlight_blocks, refine_keep,
    smooth_topic_transitions, REASON_GAP_FILL,
};
use recap_models::{format_timestamp, ActionTag, Chunk};

fn teaching(id: u32, topic: &str, tag: ActionTag) -> Chunk {
    let start = format_timestamp(f64::from(id - 1) * 20.0);
    let end = format_timestamp(f64::from(id) * 20.0);
    Chunk::teaching(id, start, end, format!("chunk {id}"), tag, Some(topic.to_string()), 0.85)
}

fn non_teaching(id: u32) -> Chunk {
    let start = format_timestamp(f64::from(id - 1) * 20.0);
    let end = format_timestamp(f64::from(id) * 20.0);
    Chunk::non_teaching(id, start, end, format!("chatter {id}"))
}

#[test]
fn full_curation_pass_sequence() {
    // A lecture that opens on Recursion, flips to Sorting for one spurious
    // chunk, returns to Recursion around a classroom interruption, then
    // settles on Sorting for good.
    let mut chunks = vec![
        teaching(1, "Recursion", ActionTag::Theory),
        teaching(2, "Recursion", ActionTag::Theory),
        teaching(3, "Sorting", ActionTag::Example), // spurious flip
        teaching(4, "Recursion", ActionTag::Theory),
        non_teaching(5), // interruption between same-topic neighbors
        teaching(6, "Recursion", ActionTag::Example),
        teaching(7, "Sorting", ActionTag::Theory),
        teaching(8, "Sorting", ActionTag::Example),
        teaching(9, "Sorting", ActionTag::Exercise),
    ];

    smooth_topic_transitions(&mut chunks, 3);

    // The lone Sorting chunk at position 3 reverts to Recursion; the final
    // Sorting run (length 3) is accepted.
    assert_eq!(chunks[2].topic_name.as_deref(), Some("Recursion"));
    assert_eq!(chunks[6].topic_name.as_deref(), Some("Sorting"));

    refine_keep(&mut chunks);

    // The interruption is sandwiched between Recursion chunks and flips back.
    assert!(chunks[4].keep);
    assert_eq!(
        chunks[4].reason_for_keep_change.as_deref(),
        Some(REASON_GAP_FILL)
    );

    let cluster_map = assign_cluster_ids(&mut chunks);

    // First-seen order: Recursion before Sorting.
    assert_eq!(cluster_map[&1].topic_name, "Recursion");
    assert_eq!(cluster_map[&2].topic_name, "Sorting");
    assert_eq!(cluster_map[&1].chunk_ids, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(cluster_map[&2].chunk_ids, vec![7, 8, 9]);

    let kept: Vec<Chunk> = chunks.iter().filter(|c| c.keep).cloned().collect();
    let blocks = group_highlight_blocks(&kept, 1);

    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].cluster_id, Some(1));
    assert_eq!(blocks[0].start_chunk_id, 1);
    assert_eq!(blocks[0].end_chunk_id, 6);
    assert_eq!(blocks[1].cluster_id, Some(2));
    assert_eq!(blocks[1].segments.len(), 3);

    let segments = flatten_segments_by_start(&blocks);
    assert_eq!(segments.len(), 9);
    let starts: Vec<f64> = segments.iter().map(|s| s.start_seconds()).collect();
    assert!(starts.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn rerun_of_every_pass_is_deterministic() {
    let build = || {
        vec![
            teaching(1, "Graphs", ActionTag::Theory),
            teaching(2, "Graphs", ActionTag::Example),
            non_teaching(3),
            teaching(4, "Trees", ActionTag::Theory),
            teaching(5, "Trees", ActionTag::Theory),
            teaching(6, "Trees", ActionTag::QA),
        ]
    };

    let run = |mut chunks: Vec<Chunk>| {
        smooth_topic_transitions(&mut chunks, 2);
        refine_keep(&mut chunks);
        let map = assign_cluster_ids(&mut chunks);
        let kept: Vec<Chunk> = chunks.iter().filter(|c| c.keep).cloned().collect();
        let blocks = group_highlight_blocks(&kept, 1);
        (chunks, map, blocks.len())
    };

    let (chunks_a, map_a, blocks_a) = run(build());
    let (chunks_b, map_b, blocks_b) = run(build());

    assert_eq!(map_a, map_b);
    assert_eq!(blocks_a, blocks_b);
    for (a, b) in chunks_a.iter().zip(&chunks_b) {
        assert_eq!(a.keep, b.keep);
        assert_eq!(a.topic_name, b.topic_name);
        assert_eq!(a.cluster_id, b.cluster_id);
        assert_eq!(a.reason_for_keep_change, b.reason_for_keep_change);
    }
}
