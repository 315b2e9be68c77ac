//! Curation run configuration.

use std::path::PathBuf;

/// Configuration for one curation run.
#[derive(Debug, Clone)]
pub struct CurationConfig {
    /// Upstream request budget per 60-second window
    pub max_requests_per_minute: u32,
    /// Upstream token budget per 60-second window
    pub max_tokens_per_minute: u32,
    /// Minimum consecutive chunks required to accept a topic switch
    pub min_consecutive_chunks: usize,
    /// Maximum chunk-id gap bridged inside one highlight block
    pub max_gap_chunks: u32,
    /// How many top-weighted content types survive the importance filter
    pub top_n_content_types: usize,
    /// Subject column of the importance matrix
    pub subject: String,
    /// Source lecture recording
    pub video_path: PathBuf,
    /// Timestamped transcript produced by the transcription collaborator
    pub transcript_path: PathBuf,
    /// Allowed topic list produced by the slide-extraction collaborator
    pub topics_path: PathBuf,
    /// Directory for artifacts and the final video
    pub output_dir: PathBuf,
    /// Final highlight video filename
    pub highlight_video_name: String,
}

impl Default for CurationConfig {
    fn default() -> Self {
        Self {
            max_requests_per_minute: 30,
            max_tokens_per_minute: 6000,
            min_consecutive_chunks: 3,
            max_gap_chunks: 1,
            top_n_content_types: 3,
            subject: "Computer_Science".to_string(),
            video_path: PathBuf::from("data/lecture.mp4"),
            transcript_path: PathBuf::from("data/transcript.json"),
            topics_path: PathBuf::from("data/topics.json"),
            output_dir: PathBuf::from("data/out"),
            highlight_video_name: "highlight_video.mp4".to_string(),
        }
    }
}

impl CurationConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_requests_per_minute: std::env::var("RECAP_MAX_REQUESTS_PER_MINUTE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_requests_per_minute),
            max_tokens_per_minute: std::env::var("RECAP_MAX_TOKENS_PER_MINUTE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_tokens_per_minute),
            min_consecutive_chunks: std::env::var("RECAP_MIN_CONSECUTIVE_CHUNKS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.min_consecutive_chunks),
            max_gap_chunks: std::env::var("RECAP_MAX_GAP_CHUNKS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_gap_chunks),
            top_n_content_types: std::env::var("RECAP_TOP_N_CONTENT_TYPES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.top_n_content_types),
            subject: std::env::var("RECAP_SUBJECT").unwrap_or(defaults.subject),
            video_path: std::env::var("RECAP_VIDEO_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.video_path),
            transcript_path: std::env::var("RECAP_TRANSCRIPT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.transcript_path),
            topics_path: std::env::var("RECAP_TOPICS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.topics_path),
            output_dir: std::env::var("RECAP_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            highlight_video_name: std::env::var("RECAP_HIGHLIGHT_VIDEO_NAME")
                .unwrap_or(defaults.highlight_video_name),
        }
    }

    /// Path of the topic-tagged transcript artifact.
    pub fn tagged_transcript_path(&self) -> PathBuf {
        self.output_dir.join("topic_tagged_transcript.json")
    }

    /// Path of the smoothed chunk artifact.
    pub fn smoothed_chunks_path(&self) -> PathBuf {
        self.output_dir.join("topic_smooth_chunks.json")
    }

    /// Path of the cluster map artifact.
    pub fn cluster_map_path(&self) -> PathBuf {
        self.output_dir.join("cluster_map.json")
    }

    /// Path of the run summary artifact.
    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join("curation_summary.json")
    }
}
