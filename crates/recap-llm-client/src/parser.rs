//! Defensive parser for free-text classification responses.
//!
//! The upstream model is asked for four labeled lines but the response is
//! treated as untrusted: fields may be missing, reordered, differently
//! cased, wrapped in markdown, or garbage. Parsing never fails — anything
//! that cannot be read degrades to the non-teaching defaults, so downstream
//! passes only ever see well-formed chunk records.

use regex::Regex;

use recap_models::{ActionTag, Chunk};

/// Identity and timing metadata for the chunk being classified.
#[derive(Debug, Clone)]
pub struct ChunkContext<'a> {
    pub chunk_id: u32,
    pub start: &'a str,
    pub end: &'a str,
    pub text: &'a str,
}

/// Parser for labeled-field classification responses.
///
/// Field labels are matched case-insensitively anywhere in the text;
/// values run to the end of the line.
pub struct ClassificationParser {
    content_type: Regex,
    action_tag: Regex,
    topic_name: Regex,
    confidence: Regex,
}

impl ClassificationParser {
    pub fn new() -> Self {
        Self {
            content_type: Regex::new(r"(?im)content[_\s]*type\s*[:=]\s*(.+)$").unwrap(),
            action_tag: Regex::new(r"(?im)action[_\s]*tag\s*[:=]\s*(.+)$").unwrap(),
            topic_name: Regex::new(r"(?im)topic[_\s]*name\s*[:=]\s*(.+)$").unwrap(),
            confidence: Regex::new(r"(?im)confidence[_\s]*score\s*[:=][^0-9\n]*([0-9]*\.?[0-9]+)")
                .unwrap(),
        }
    }

    /// Parse one raw response into a fully-populated chunk record.
    ///
    /// If the content-type field is absent or not `Teaching_Content`, the
    /// chunk is non-teaching with NA fields and zero confidence. An
    /// unparseable confidence is 0.0; values are clamped into [0.0, 1.0].
    pub fn parse(&self, raw: &str, ctx: &ChunkContext<'_>) -> Chunk {
        let is_teaching = self
            .capture(&self.content_type, raw)
            .map(|value| {
                let value = value.to_lowercase();
                value.starts_with("teaching")
            })
            .unwrap_or(false);

        if !is_teaching {
            return Chunk::non_teaching(ctx.chunk_id, ctx.start, ctx.end, ctx.text);
        }

        let action_tag = self
            .capture(&self.action_tag, raw)
            .map(|value| ActionTag::from_label(&value))
            .unwrap_or(ActionTag::Na);

        let topic_name = self.capture(&self.topic_name, raw).filter(|value| {
            !value.is_empty() && !value.eq_ignore_ascii_case("n/a")
        });

        let confidence_score = self
            .capture(&self.confidence, raw)
            .and_then(|value| value.parse::<f32>().ok())
            .unwrap_or(0.0)
            .clamp(0.0, 1.0);

        Chunk::teaching(
            ctx.chunk_id,
            ctx.start,
            ctx.end,
            ctx.text,
            action_tag,
            topic_name,
            confidence_score,
        )
    }

    /// First capture group of the pattern, stripped of surrounding
    /// whitespace, quotes, markdown emphasis, and trailing punctuation.
    fn capture(&self, pattern: &Regex, raw: &str) -> Option<String> {
        let value = pattern.captures(raw)?.get(1)?.as_str();
        let value = value
            .trim_matches(|c: char| {
                c == '*' || c == '"' || c == '\'' || c == '`' || c.is_whitespace()
            })
            .trim_end_matches(['.', ','])
            .trim_end();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }
}

impl Default for ClassificationParser {
    fn default() -> Self {
        Self::new()
    }
}
