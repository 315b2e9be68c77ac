//! Curation pipeline orchestration.
//!
//! Stage order is fixed: classify -> persist tagged transcript -> smooth ->
//! persist smoothed chunks -> refine -> assign clusters -> persist cluster
//! map -> importance-filter -> group blocks -> flatten -> assemble video.
//! Classification is strictly sequential, one upstream call per chunk, gated
//! by a single rate limiter; every later stage is a pure in-memory pass over
//! the complete sequence. Any failure aborts the whole batch.

use std::path::PathBuf;

use chrono::Utc;
use tracing::info;

use recap_curation::{
    assign_cluster_ids, flatten_segments_by_start, group_highlight_blocks, refine_keep,
    smooth_topic_transitions,
};
use recap_llm_client::{
    estimate_tokens, prompt, ChatClient, ChunkContext, ClassificationParser, RateLimiter,
};
use recap_media::assemble_highlight_video;
use recap_models::{Chunk, RunId};

use crate::artifacts::{self, Transcript};
use crate::config::CurationConfig;
use crate::error::{WorkerError, WorkerResult};
use crate::importance::{filter_by_action_tags, ImportanceMatrix};
use crate::stats::{compute_keep_stats, log_keep_stats, CurationSummary};

/// Classify every transcript segment through the upstream model.
///
/// Calls are issued one at a time in segment order; the limiter's sleep is
/// the only suspension point. Chunk ids ascend from 1 in segment order.
pub async fn classify_transcript(
    client: &ChatClient,
    limiter: &mut RateLimiter,
    transcript: &Transcript,
    allowed_topics: &[String],
) -> WorkerResult<Vec<Chunk>> {
    let parser = ClassificationParser::new();
    let system_prompt = prompt::system_prompt_topic_tagging();
    let mut chunks = Vec::with_capacity(transcript.segments.len());

    for (idx, segment) in transcript.segments.iter().enumerate() {
        let chunk_id = idx as u32 + 1;
        let user_prompt = prompt::build_user_prompt_topic_tagging(&segment.text, allowed_topics);

        limiter.enforce(estimate_tokens(&user_prompt)).await;
        let raw = client.complete(system_prompt, &user_prompt).await?;

        let chunk = parser.parse(
            &raw,
            &ChunkContext {
                chunk_id,
                start: &segment.start,
                end: &segment.end,
                text: &segment.text,
            },
        );
        chunks.push(chunk);
    }

    info!(chunks = chunks.len(), "Classified transcript");
    Ok(chunks)
}

/// Run the full curation pipeline and return the highlight video path.
pub async fn run_curation(config: &CurationConfig) -> WorkerResult<PathBuf> {
    let run_id = RunId::new();
    info!(run_id = %run_id, "Starting curation run");

    let transcript = artifacts::load_transcript(&config.transcript_path)?;
    if transcript.segments.is_empty() {
        return Err(WorkerError::invalid_input("Transcript has no segments"));
    }
    let topics = artifacts::load_topics(&config.topics_path)?;
    if topics.is_empty() {
        return Err(WorkerError::invalid_input("Allowed topic list is empty"));
    }

    std::fs::create_dir_all(&config.output_dir)?;

    let client = ChatClient::from_env()?;
    let mut limiter = RateLimiter::new(
        config.max_requests_per_minute,
        config.max_tokens_per_minute,
    );

    let mut chunks = classify_transcript(&client, &mut limiter, &transcript, &topics).await?;
    artifacts::persist_chunks(&config.tagged_transcript_path(), &chunks)?;

    let keep_stats = compute_keep_stats(&chunks);
    log_keep_stats(&keep_stats);

    smooth_topic_transitions(&mut chunks, config.min_consecutive_chunks);
    artifacts::persist_chunks(&config.smoothed_chunks_path(), &chunks)?;

    refine_keep(&mut chunks);

    let cluster_map = assign_cluster_ids(&mut chunks);
    artifacts::persist_cluster_map(&config.cluster_map_path(), &cluster_map)?;

    let matrix = ImportanceMatrix::default();
    let top_tags = matrix
        .top_action_tags(&config.subject, config.top_n_content_types)
        .ok_or_else(|| {
            WorkerError::invalid_input(format!("Unknown subject: {}", config.subject))
        })?;
    info!(subject = %config.subject, tags = ?top_tags, "Selected content types");

    let filtered = filter_by_action_tags(&chunks, &top_tags);
    if filtered.is_empty() {
        return Err(WorkerError::invalid_input(
            "No chunks survived the importance filter",
        ));
    }

    let blocks = group_highlight_blocks(&filtered, config.max_gap_chunks);
    let segments = flatten_segments_by_start(&blocks);

    let video_path = assemble_highlight_video(
        &config.video_path,
        &segments,
        &config.output_dir,
        &config.highlight_video_name,
    )
    .await?;

    let summary = CurationSummary {
        run_id: run_id.clone(),
        generated_at: Utc::now(),
        total_chunks: chunks.len(),
        keep_stats,
        cluster_count: cluster_map.len(),
        block_count: blocks.len(),
        segment_count: segments.len(),
    };
    artifacts::persist_json(&config.summary_path(), &summary)?;

    info!(
        run_id = %run_id,
        video = %video_path.display(),
        "Curation run complete"
    );
    Ok(video_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::TranscriptSegment;
    use recap_llm_client::ChatConfig;
    use recap_models::ActionTag;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn segment(start: &str, end: &str, text: &str) -> TranscriptSegment {
        TranscriptSegment {
            start: start.to_string(),
            end: end.to_string(),
            text: text.to_string(),
        }
    }

    fn completion_body(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        })
    }

    #[tokio::test]
    async fn classify_transcript_assigns_sequential_ids() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
                "Content_Type: Teaching_Content\n\
                 Action_Tag: Theory\n\
                 Topic_Name: Recursion\n\
                 Confidence_Score: 0.9",
            )))
            .mount(&server)
            .await;

        let client = ChatClient::new(ChatConfig {
            base_url: server.uri(),
            api_key: "test-key".to_string(),
            model: "llama3-70b-8192".to_string(),
            temperature: 0.3,
            max_completion_tokens: 200,
            timeout: Duration::from_secs(5),
        })
        .unwrap();

        let transcript = Transcript {
            segments: vec![
                segment("00:00:00.00", "00:00:20.00", "base case first"),
                segment("00:00:20.00", "00:00:40.00", "then the recursive step"),
            ],
        };
        let topics = vec!["Recursion".to_string()];
        let mut limiter = RateLimiter::new(30, 6000);

        let chunks = classify_transcript(&client, &mut limiter, &transcript, &topics)
            .await
            .unwrap();

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chunk_id, 1);
        assert_eq!(chunks[1].chunk_id, 2);
        assert!(chunks.iter().all(|c| c.keep));
        assert!(chunks
            .iter()
            .all(|c| c.topic_name.as_deref() == Some("Recursion")));
        assert_eq!(chunks[0].start, "00:00:00.00");
        assert_eq!(chunks[1].text, "then the recursive step");
    }

    #[tokio::test]
    async fn malformed_responses_degrade_to_non_teaching() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion_body("sorry, I cannot classify this")),
            )
            .mount(&server)
            .await;

        let client = ChatClient::new(ChatConfig {
            base_url: server.uri(),
            api_key: "test-key".to_string(),
            model: "llama3-70b-8192".to_string(),
            temperature: 0.3,
            max_completion_tokens: 200,
            timeout: Duration::from_secs(5),
        })
        .unwrap();

        let transcript = Transcript {
            segments: vec![segment("00:00:00.00", "00:00:20.00", "whatever")],
        };
        let mut limiter = RateLimiter::new(30, 6000);

        let chunks = classify_transcript(&client, &mut limiter, &transcript, &[])
            .await
            .unwrap();

        assert_eq!(chunks.len(), 1);
        assert!(!chunks[0].keep);
        assert_eq!(chunks[0].action_tag, ActionTag::Na);
        assert_eq!(chunks[0].confidence_score, 0.0);
    }
}
