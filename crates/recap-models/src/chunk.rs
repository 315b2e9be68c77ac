//! Classified transcript chunk models.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::timestamp::parse_timestamp;

/// Content action tag assigned by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
pub enum ActionTag {
    Theory,
    Example,
    Exercise,
    #[serde(rename = "Q&A")]
    QA,
    /// Non-teaching or unrecognized content.
    #[default]
    #[serde(rename = "n/a", other)]
    Na,
}

impl ActionTag {
    /// Tags that mark teaching content.
    pub const TEACHING: &'static [ActionTag] = &[
        ActionTag::Theory,
        ActionTag::Example,
        ActionTag::Exercise,
        ActionTag::QA,
    ];

    /// Wire name as it appears in classification responses and artifacts.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionTag::Theory => "Theory",
            ActionTag::Example => "Example",
            ActionTag::Exercise => "Exercise",
            ActionTag::QA => "Q&A",
            ActionTag::Na => "n/a",
        }
    }

    /// Case-insensitive match against a raw classifier label.
    /// Unknown labels fall back to `Na`.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("theory") {
            ActionTag::Theory
        } else if label.eq_ignore_ascii_case("example") {
            ActionTag::Example
        } else if label.eq_ignore_ascii_case("exercise") {
            ActionTag::Exercise
        } else if label.eq_ignore_ascii_case("q&a") {
            ActionTag::QA
        } else {
            ActionTag::Na
        }
    }
}

impl fmt::Display for ActionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Serde adapter mapping the `"n/a"` wire sentinel to `None`.
pub mod na_string {
    use serde::{Deserialize, Deserializer, Serializer};

    pub const NA: &str = "n/a";

    pub fn serialize<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(s) => serializer.serialize_str(s),
            None => serializer.serialize_str(NA),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw.trim().eq_ignore_ascii_case(NA) || raw.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(raw))
        }
    }
}

/// One classified time unit of the transcript.
///
/// Invariant: `keep == false` implies `action_tag == Na`, `topic_name == None`
/// and `confidence_score == 0.0`. The parser boundary enforces this via the
/// [`Chunk::non_teaching`] constructor.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Chunk {
    /// Position in the sequence (1-indexed, strictly increasing)
    pub chunk_id: u32,

    /// Start timestamp (HH:MM:SS.ff)
    pub start: String,

    /// End timestamp (HH:MM:SS.ff)
    pub end: String,

    /// Original transcript text (opaque to curation)
    pub text: String,

    /// Teaching-relevance flag
    pub keep: bool,

    /// Content action tag
    pub action_tag: ActionTag,

    /// Assigned topic, `"n/a"` on the wire when absent
    #[serde(with = "na_string")]
    #[schemars(with = "String")]
    pub topic_name: Option<String>,

    /// Classifier confidence in [0.0, 1.0]
    pub confidence_score: f32,

    /// Topic cluster id, assigned after smoothing/refinement
    #[serde(default)]
    pub cluster_id: Option<u32>,

    /// Audit trail for keep-flag changes, stamped by the refiner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_for_keep_change: Option<String>,
}

impl Chunk {
    /// Build a teaching chunk.
    pub fn teaching(
        chunk_id: u32,
        start: impl Into<String>,
        end: impl Into<String>,
        text: impl Into<String>,
        action_tag: ActionTag,
        topic_name: Option<String>,
        confidence_score: f32,
    ) -> Self {
        Self {
            chunk_id,
            start: start.into(),
            end: end.into(),
            text: text.into(),
            keep: true,
            action_tag,
            topic_name,
            confidence_score,
            cluster_id: None,
            reason_for_keep_change: None,
        }
    }

    /// Build a non-teaching chunk with the invariant fields forced.
    pub fn non_teaching(
        chunk_id: u32,
        start: impl Into<String>,
        end: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            chunk_id,
            start: start.into(),
            end: end.into(),
            text: text.into(),
            keep: false,
            action_tag: ActionTag::Na,
            topic_name: None,
            confidence_score: 0.0,
            cluster_id: None,
            reason_for_keep_change: None,
        }
    }

    /// Whether the topic is the NA sentinel.
    pub fn is_na_topic(&self) -> bool {
        self.topic_name.is_none()
    }

    /// Chunk duration in seconds; malformed timestamps count as zero.
    pub fn duration_seconds(&self) -> f64 {
        let start = parse_timestamp(&self.start).unwrap_or(0.0);
        let end = parse_timestamp(&self.end).unwrap_or(0.0);
        (end - start).max(0.0)
    }
}
