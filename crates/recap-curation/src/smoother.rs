//! Topic transition smoothing.
//!
//! Debounces single-chunk topic misclassifications in the ordered keep
//! sub-sequence: a topic switch is only accepted once at least `min_run`
//! consecutive chunks carry the new topic; shorter runs are relabeled back
//! to the last accepted topic. A short run at the very end of the sequence
//! is reverted like any other.

use tracing::debug;

use recap_models::Chunk;

/// Smooth topic transitions across the `keep == true` sub-sequence.
///
/// The first keep chunk's topic is accepted unconditionally. Non-keep chunks
/// are never touched. Running the pass twice with the same `min_run` yields
/// no further changes.
pub fn smooth_topic_transitions(chunks: &mut [Chunk], min_run: usize) {
    let keep_idx: Vec<usize> = chunks
        .iter()
        .enumerate()
        .filter(|(_, c)| c.keep)
        .map(|(i, _)| i)
        .collect();

    if keep_idx.is_empty() {
        return;
    }

    let mut last_accepted = chunks[keep_idx[0]].topic_name.clone();
    let mut reverted_runs = 0usize;

    let mut i = 0;
    while i < keep_idx.len() {
        let topic = chunks[keep_idx[i]].topic_name.clone();
        if topic == last_accepted {
            i += 1;
            continue;
        }

        // Length of the run sharing the new topic, bounded by a `min_run`
        // lookahead or the end of the sub-sequence.
        let lookahead_end = keep_idx.len().min(i + min_run);
        let mut run_len = 1;
        for j in (i + 1)..lookahead_end {
            if chunks[keep_idx[j]].topic_name == topic {
                run_len += 1;
            } else {
                break;
            }
        }

        if run_len >= min_run {
            last_accepted = topic;
        } else {
            for k in i..(i + run_len) {
                chunks[keep_idx[k]].topic_name = last_accepted.clone();
            }
            reverted_runs += 1;
        }

        i += run_len;
    }

    debug!(
        keep_chunks = keep_idx.len(),
        min_run, reverted_runs, "Smoothed topic transitions"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use recap_models::{ActionTag, Chunk};

    fn keep_chunk(id: u32, topic: &str) -> Chunk {
        Chunk::teaching(
            id,
            "00:00:00.00",
            "00:00:20.00",
            "text",
            ActionTag::Theory,
            Some(topic.to_string()),
            0.9,
        )
    }

    fn topics(chunks: &[Chunk]) -> Vec<&str> {
        chunks
            .iter()
            .filter(|c| c.keep)
            .map(|c| c.topic_name.as_deref().unwrap_or("n/a"))
            .collect()
    }

    #[test]
    fn single_flip_reverts() {
        let mut chunks: Vec<Chunk> = ["A", "A", "A", "B", "A", "A", "A"]
            .iter()
            .enumerate()
            .map(|(i, t)| keep_chunk(i as u32 + 1, t))
            .collect();

        smooth_topic_transitions(&mut chunks, 3);
        assert_eq!(topics(&chunks), vec!["A"; 7]);
    }

    #[test]
    fn long_run_accepted() {
        let mut chunks: Vec<Chunk> = ["A", "A", "A", "B", "B", "B", "B"]
            .iter()
            .enumerate()
            .map(|(i, t)| keep_chunk(i as u32 + 1, t))
            .collect();

        smooth_topic_transitions(&mut chunks, 3);
        assert_eq!(topics(&chunks), vec!["A", "A", "A", "B", "B", "B", "B"]);
    }

    #[test]
    fn trailing_short_run_reverts() {
        let mut chunks: Vec<Chunk> = ["A", "A", "A", "A", "A", "B", "B"]
            .iter()
            .enumerate()
            .map(|(i, t)| keep_chunk(i as u32 + 1, t))
            .collect();

        smooth_topic_transitions(&mut chunks, 3);
        assert_eq!(topics(&chunks), vec!["A"; 7]);
    }

    #[test]
    fn non_keep_chunks_untouched() {
        let mut chunks = vec![
            keep_chunk(1, "A"),
            Chunk::non_teaching(2, "00:00:20.00", "00:00:40.00", "chatter"),
            keep_chunk(3, "B"),
            keep_chunk(4, "A"),
        ];

        smooth_topic_transitions(&mut chunks, 2);

        // The lone B (run of 1 < 2) reverts; the non-keep chunk keeps its NA topic.
        assert_eq!(chunks[2].topic_name.as_deref(), Some("A"));
        assert!(chunks[1].topic_name.is_none());
        assert!(!chunks[1].keep);
    }

    #[test]
    fn accepted_topic_becomes_new_baseline() {
        let mut chunks: Vec<Chunk> = ["A", "B", "B", "B", "A", "B", "B", "B"]
            .iter()
            .enumerate()
            .map(|(i, t)| keep_chunk(i as u32 + 1, t))
            .collect();

        smooth_topic_transitions(&mut chunks, 3);
        // B accepted at index 1; the lone A at index 4 then reverts to B.
        assert_eq!(topics(&chunks), vec!["A", "B", "B", "B", "B", "B", "B", "B"]);
    }

    #[test]
    fn idempotent() {
        let mut chunks: Vec<Chunk> = ["A", "A", "B", "A", "B", "B", "B", "A"]
            .iter()
            .enumerate()
            .map(|(i, t)| keep_chunk(i as u32 + 1, t))
            .collect();

        smooth_topic_transitions(&mut chunks, 3);
        let first_pass: Vec<String> = chunks
            .iter()
            .map(|c| c.topic_name.clone().unwrap_or_default())
            .collect();

        smooth_topic_transitions(&mut chunks, 3);
        let second_pass: Vec<String> = chunks
            .iter()
            .map(|c| c.topic_name.clone().unwrap_or_default())
            .collect();

        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn empty_sequence_is_noop() {
        let mut chunks: Vec<Chunk> = Vec::new();
        smooth_topic_transitions(&mut chunks, 3);
        assert!(chunks.is_empty());
    }
}
