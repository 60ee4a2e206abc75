//! Client-side selection for the bundled quiz file.
//!
//! The bundled file cannot filter on its own, so the fetcher filters, shuffles and
//! truncates here before synthesizing metadata.

use crate::core::shuffle::shuffle;
use crate::domain::model::{QuizBundle, QuizMetadata, QuizPayload, QuizQuestion, QuizSource};
use crate::utils::error::Result;

/// Parses the bundled file and drops questions whose answer is not among the options.
pub fn parse_bundle(bytes: &[u8]) -> Result<Vec<QuizQuestion>> {
    let bundle: QuizBundle = serde_json::from_slice(bytes)?;
    let total = bundle.quiz.len();

    let questions: Vec<QuizQuestion> = bundle
        .quiz
        .into_iter()
        .filter(|question| {
            let ok = question.is_well_formed();
            if !ok {
                tracing::warn!("⚠️ Skipping malformed bundled question: {}", question.question);
            }
            ok
        })
        .collect();

    tracing::debug!("Loaded {}/{} bundled questions", questions.len(), total);
    Ok(questions)
}

/// 只有空字串代表不過濾，其餘值原樣比對（不 trim）
fn normalized(filter: Option<&str>) -> Option<String> {
    filter
        .filter(|value| !value.is_empty())
        .map(str::to_lowercase)
}

/// Case-insensitive exact match on topic and difficulty. Missing or empty filters match everything.
pub fn filter_questions(
    questions: &[QuizQuestion],
    topic: Option<&str>,
    difficulty: Option<&str>,
) -> Vec<QuizQuestion> {
    let topic = normalized(topic);
    let difficulty = normalized(difficulty);

    questions
        .iter()
        .filter(|q| topic.as_ref().map_or(true, |t| q.topic.to_lowercase() == *t))
        .filter(|q| {
            difficulty
                .as_ref()
                .map_or(true, |d| !q.difficulty.is_empty() && q.difficulty.to_lowercase() == *d)
        })
        .cloned()
        .collect()
}

/// Set-membership variant used by custom quiz requests. An empty list means no filter.
pub fn filter_questions_any(
    questions: &[QuizQuestion],
    topics: &[String],
    difficulties: &[String],
) -> Vec<QuizQuestion> {
    let topics: Vec<String> = topics
        .iter()
        .filter_map(|t| normalized(Some(t.as_str())))
        .collect();
    let difficulties: Vec<String> = difficulties
        .iter()
        .filter_map(|d| normalized(Some(d.as_str())))
        .collect();

    questions
        .iter()
        .filter(|q| topics.is_empty() || topics.contains(&q.topic.to_lowercase()))
        .filter(|q| {
            difficulties.is_empty()
                || (!q.difficulty.is_empty() && difficulties.contains(&q.difficulty.to_lowercase()))
        })
        .cloned()
        .collect()
}

/// 洗牌後截斷到 `count` 題，並產生 metadata
pub fn build_local_payload(filtered: &[QuizQuestion], count: usize) -> QuizPayload {
    let mut quiz = shuffle(filtered);
    quiz.truncate(count);

    QuizPayload {
        metadata: QuizMetadata::from_questions(&quiz),
        quiz,
        source: QuizSource::LocalFallback,
    }
}
