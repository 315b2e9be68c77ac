//! Subject-wise content-type importance filtering.
//!
//! The policy stage between cluster assignment and block grouping: each
//! subject weighs the four teaching content types differently, and only
//! chunks tagged with the subject's top-N types reach the grouper.

use std::collections::BTreeMap;

use recap_models::{ActionTag, Chunk};

/// Weight matrix: subject -> (content type, weight) rows.
///
/// Absent weights mean the content type is never selected for that subject.
#[derive(Debug, Clone)]
pub struct ImportanceMatrix {
    weights: BTreeMap<String, Vec<(ActionTag, f64)>>,
}

impl Default for ImportanceMatrix {
    fn default() -> Self {
        use ActionTag::{Example, Exercise, Theory, QA};

        let mut weights = BTreeMap::new();
        weights.insert(
            "Math".to_string(),
            vec![(Theory, 0.7), (Example, 1.0), (Exercise, 0.9), (QA, 0.5)],
        );
        weights.insert(
            "Science".to_string(),
            vec![(Theory, 1.0), (Example, 0.8), (Exercise, 0.8), (QA, 0.6)],
        );
        weights.insert(
            "Aptitude".to_string(),
            vec![(Theory, 0.5), (Example, 1.0), (Exercise, 1.0), (QA, 0.5)],
        );
        weights.insert(
            "History".to_string(),
            vec![(Theory, 1.0), (Example, 0.7), (QA, 0.6)],
        );
        weights.insert(
            "eng".to_string(),
            vec![(Theory, 0.8), (Example, 1.0), (Exercise, 0.9), (QA, 0.5)],
        );
        weights.insert(
            "Computer_Science".to_string(),
            vec![(Theory, 0.9), (Example, 1.0), (Exercise, 0.8), (QA, 0.6)],
        );

        Self { weights }
    }
}

impl ImportanceMatrix {
    /// The `n` highest-weighted content types for `subject`, best first.
    ///
    /// Ties keep matrix row order. Returns `None` for an unknown subject.
    pub fn top_action_tags(&self, subject: &str, n: usize) -> Option<Vec<ActionTag>> {
        let rows = self.weights.get(subject)?;
        let mut rows: Vec<(ActionTag, f64)> = rows.clone();
        rows.sort_by(|a, b| b.1.total_cmp(&a.1));
        Some(rows.into_iter().take(n).map(|(tag, _)| tag).collect())
    }

    /// All known subjects.
    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.weights.keys().map(String::as_str)
    }
}

/// Keep only chunks whose action tag is in `tags`.
pub fn filter_by_action_tags(chunks: &[Chunk], tags: &[ActionTag]) -> Vec<Chunk> {
    chunks
        .iter()
        .filter(|c| tags.contains(&c.action_tag))
        .cloned()
        .collect()
}
