//! Prompt construction for transcript topic tagging.
//!
//! The labeled-field output contract here is the wire protocol that
//! [`crate::parser::ClassificationParser`] consumes. The model is asked for
//! plain `Label: value` lines, no JSON, because small models follow it more
//! reliably and the parser tolerates the misses.

/// System prompt for per-chunk teaching classification.
pub fn system_prompt_topic_tagging() -> &'static str {
    r#"You are an expert teaching assistant reviewing a lecture transcript one chunk at a time.

For each chunk you must decide whether it is teaching content and, if so, which topic from the provided list it covers and what kind of teaching activity it is.

Follow these rules carefully:
- Classify only from the chunk text; do not invent topics that are not in the provided list.
- Administrative talk, greetings, jokes, and off-topic conversation are Non_Teaching_Content.
- Output exactly the four labeled lines described by the user, nothing else.
- Do not add headings, explanations, numbering, or markdown formatting."#
}

/// User prompt carrying one chunk and the allowed topic list.
pub fn build_user_prompt_topic_tagging(chunk_text: &str, allowed_topics: &[String]) -> String {
    let topics = allowed_topics.join("\n");
    format!(
        r#"Classify the following lecture transcript chunk.

You must respond with exactly these four lines:
Content_Type: Teaching_Content or Non_Teaching_Content
Action_Tag: Theory, Example, Exercise, Q&A, or n/a
Topic_Name: one topic from the allowed list below, or n/a
Confidence_Score: a number between 0.0 and 1.0

Use n/a for Action_Tag and Topic_Name whenever Content_Type is Non_Teaching_Content.

--- ALLOWED TOPICS ---
{topics}
--- END ---

--- CHUNK ---
{chunk_text}
--- END ---"#
    )
}
