use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuizStatus {
    #[default]
    Draft,
    Published,
}

impl QuizStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuizStatus::Draft => "draft",
            QuizStatus::Published => "published",
        }
    }
}

impl fmt::Display for QuizStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuizStatus {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(QuizStatus::Draft),
            "published" => Ok(QuizStatus::Published),
            other => Err(QuizError::UnknownStatus(other.to_string())),
        }
    }
}

/// Personality quizzes score options by outcome weights, trivia quizzes by correctness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizKind {
    Personality,
    Trivia,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("slug '{0}' must be lowercase letters, digits and single dashes")]
    InvalidSlug(String),
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("quiz has no questions")]
    NoQuestions,
    #[error("quiz has no results")]
    NoResults,
    #[error("duplicate question id '{0}'")]
    DuplicateQuestion(String),
    #[error("question '{0}' needs at least two options")]
    TooFewOptions(String),
    #[error("question '{question}' repeats option id '{option}'")]
    DuplicateOption { question: String, option: String },
    #[error("result '{0}' has no outcome key")]
    MissingOutcome(String),
    #[error("result '{0}' has no score range")]
    MissingScoreRange(String),
    #[error("unknown status '{0}'")]
    UnknownStatus(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvaluateError {
    #[error("no answers given")]
    NoAnswers,
    #[error("unknown question '{0}'")]
    UnknownQuestion(String),
    #[error("question '{question}' has no option '{option}'")]
    UnknownOption { question: String, option: String },
    #[error("no result matches a score of {0}")]
    NoMatchingResult(i64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizData {
    pub metadata: QuizMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<serde_json::Value>,
    pub questions: Vec<Question>,
    pub results: Vec<QuizResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizMetadata {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_minutes: Option<u32>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub options: Vec<AnswerOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<BTreeMap<String, i64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_score: Option<i64>,
}

impl QuizResult {
    fn covers(&self, score: i64) -> bool {
        let min = self.min_score.unwrap_or(i64::MIN);
        let max = self.max_score.unwrap_or(i64::MAX);
        (min..=max).contains(&score)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation<'a> {
    pub kind: QuizKind,
    pub score: i64,
    pub result: &'a QuizResult,
}

impl QuizData {
    pub fn kind(&self) -> QuizKind {
        let weighted = self
            .questions
            .iter()
            .flat_map(|q| q.options.iter())
            .any(|o| o.weights.is_some());
        if weighted {
            QuizKind::Personality
        } else {
            QuizKind::Trivia
        }
    }

    pub fn validate(&self) -> Result<(), QuizError> {
        if self.questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        if self.results.is_empty() {
            return Err(QuizError::NoResults);
        }

        let mut question_ids = HashSet::new();
        for question in &self.questions {
            if !question_ids.insert(question.id.as_str()) {
                return Err(QuizError::DuplicateQuestion(question.id.clone()));
            }
            if question.options.len() < 2 {
                return Err(QuizError::TooFewOptions(question.id.clone()));
            }
            let mut option_ids = HashSet::new();
            for option in &question.options {
                if !option_ids.insert(option.id.as_str()) {
                    return Err(QuizError::DuplicateOption {
                        question: question.id.clone(),
                        option: option.id.clone(),
                    });
                }
            }
        }

        let kind = self.kind();
        for result in &self.results {
            match kind {
                QuizKind::Personality if result.outcome.is_none() => {
                    return Err(QuizError::MissingOutcome(result.id.clone()));
                }
                QuizKind::Trivia if result.min_score.is_none() && result.max_score.is_none() => {
                    return Err(QuizError::MissingScoreRange(result.id.clone()));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Scores `answers` (question id -> option id) and picks the matching result.
    ///
    /// Personality ties go to the outcome listed first in `results`. Unanswered
    /// trivia questions count as wrong.
    pub fn evaluate(&self, answers: &HashMap<String, String>) -> Result<Evaluation<'_>, EvaluateError> {
        if answers.is_empty() {
            return Err(EvaluateError::NoAnswers);
        }

        let mut chosen = Vec::with_capacity(answers.len());
        for (question_id, option_id) in answers {
            let question = self
                .questions
                .iter()
                .find(|q| &q.id == question_id)
                .ok_or_else(|| EvaluateError::UnknownQuestion(question_id.clone()))?;
            let option = question
                .options
                .iter()
                .find(|o| &o.id == option_id)
                .ok_or_else(|| EvaluateError::UnknownOption {
                    question: question_id.clone(),
                    option: option_id.clone(),
                })?;
            chosen.push(option);
        }

        match self.kind() {
            QuizKind::Personality => {
                let mut tally: HashMap<&str, i64> = HashMap::new();
                for weights in chosen.iter().filter_map(|o| o.weights.as_ref()) {
                    for (outcome, points) in weights {
                        let total = tally.entry(outcome.as_str()).or_default();
                        *total = total.saturating_add(*points);
                    }
                }

                let mut best: Option<(&QuizResult, i64)> = None;
                for result in &self.results {
                    let Some(outcome) = result.outcome.as_deref() else {
                        continue;
                    };
                    let score = tally.get(outcome).copied().unwrap_or(0);
                    if best.is_none_or(|(_, top)| score > top) {
                        best = Some((result, score));
                    }
                }

                let (result, score) = best.ok_or(EvaluateError::NoMatchingResult(0))?;
                Ok(Evaluation {
                    kind: QuizKind::Personality,
                    score,
                    result,
                })
            }
            QuizKind::Trivia => {
                let score = chosen.iter().filter(|o| o.correct == Some(true)).count() as i64;
                let result = self
                    .results
                    .iter()
                    .find(|r| r.covers(score))
                    .ok_or(EvaluateError::NoMatchingResult(score))?;
                Ok(Evaluation {
                    kind: QuizKind::Trivia,
                    score,
                    result,
                })
            }
        }
    }
}

pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .split('-')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewQuiz {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub status: QuizStatus,
    pub quiz_data: QuizData,
}

impl NewQuiz {
    pub fn validate(&self) -> Result<(), QuizError> {
        if !is_valid_slug(&self.slug) {
            return Err(QuizError::InvalidSlug(self.slug.clone()));
        }
        if self.title.trim().is_empty() {
            return Err(QuizError::EmptyTitle);
        }
        self.quiz_data.validate()
    }
}

/// Listing entry returned by the quiz index endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSummary {
    pub slug: String,
    pub title: String,
    pub status: QuizStatus,
    pub kind: QuizKind,
    pub question_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateRequest {
    pub answers: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateResponse {
    pub kind: QuizKind,
    pub score: i64,
    pub result: QuizResult,
}

impl From<Evaluation<'_>> for EvaluateResponse {
    fn from(eval: Evaluation<'_>) -> Self {
        Self {
            kind: eval.kind,
            score: eval.score,
            result: eval.result.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn personality() -> QuizData {
        serde_json::from_value(json!({
            "metadata": { "title": "Which pet suits you?", "accent": "warm" },
            "theme": { "primary": "#ff6600" },
            "questions": [
                { "id": "q1", "text": "Weekend plan?", "options": [
                    { "id": "a", "text": "Hike", "weights": { "dog": 2 } },
                    { "id": "b", "text": "Read", "weights": { "cat": 2 } }
                ]},
                { "id": "q2", "text": "Morning?", "options": [
                    { "id": "a", "text": "Early", "weights": { "dog": 1 } },
                    { "id": "b", "text": "Late", "weights": { "cat": 1, "dog": 1 } }
                ]}
            ],
            "results": [
                { "id": "r-cat", "title": "Cat person", "outcome": "cat" },
                { "id": "r-dog", "title": "Dog person", "outcome": "dog" }
            ]
        }))
        .unwrap()
    }

    fn trivia() -> QuizData {
        serde_json::from_value(json!({
            "metadata": { "title": "Capitals" },
            "questions": [
                { "id": "q1", "text": "France?", "options": [
                    { "id": "a", "text": "Paris", "correct": true },
                    { "id": "b", "text": "Lyon", "correct": false }
                ]},
                { "id": "q2", "text": "Japan?", "options": [
                    { "id": "a", "text": "Osaka" },
                    { "id": "b", "text": "Tokyo", "correct": true }
                ]}
            ],
            "results": [
                { "id": "low", "title": "Keep studying", "min_score": 0, "max_score": 1 },
                { "id": "high", "title": "Geographer", "min_score": 2, "max_score": 2 }
            ]
        }))
        .unwrap()
    }

    fn answers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(q, o)| (q.to_string(), o.to_string())).collect()
    }

    #[test]
    fn kind_is_derived_from_weights() {
        assert_eq!(personality().kind(), QuizKind::Personality);
        assert_eq!(trivia().kind(), QuizKind::Trivia);
    }

    #[test]
    fn personality_picks_highest_outcome() {
        let quiz = personality();
        let eval = quiz.evaluate(&answers(&[("q1", "a"), ("q2", "b")])).unwrap();
        assert_eq!(eval.result.id, "r-dog");
        assert_eq!(eval.score, 3);
    }

    #[test]
    fn personality_tie_goes_to_first_listed_result() {
        let quiz = personality();
        let eval = quiz.evaluate(&answers(&[("q1", "b"), ("q2", "a")])).unwrap();
        // cat 2, dog 1
        assert_eq!(eval.result.id, "r-cat");

        let eval = quiz.evaluate(&answers(&[("q2", "b")])).unwrap();
        // cat 1, dog 1
        assert_eq!(eval.result.id, "r-cat");
    }

    #[test]
    fn trivia_counts_correct_answers() {
        let quiz = trivia();
        let eval = quiz.evaluate(&answers(&[("q1", "a"), ("q2", "b")])).unwrap();
        assert_eq!(eval.kind, QuizKind::Trivia);
        assert_eq!(eval.score, 2);
        assert_eq!(eval.result.id, "high");

        let eval = quiz.evaluate(&answers(&[("q1", "b")])).unwrap();
        assert_eq!(eval.score, 0);
        assert_eq!(eval.result.id, "low");
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let quiz = trivia();
        assert_eq!(
            quiz.evaluate(&answers(&[("q9", "a")])),
            Err(EvaluateError::UnknownQuestion("q9".into()))
        );
        assert_eq!(
            quiz.evaluate(&answers(&[("q1", "z")])),
            Err(EvaluateError::UnknownOption {
                question: "q1".into(),
                option: "z".into()
            })
        );
        assert_eq!(quiz.evaluate(&HashMap::new()), Err(EvaluateError::NoAnswers));
    }

    #[test]
    fn score_outside_all_ranges_has_no_result() {
        let mut quiz = trivia();
        quiz.results.retain(|r| r.id == "high");
        assert_eq!(
            quiz.evaluate(&answers(&[("q1", "b")])),
            Err(EvaluateError::NoMatchingResult(0))
        );
    }

    #[test]
    fn unknown_metadata_keys_survive_round_trip() {
        let quiz = personality();
        assert_eq!(quiz.metadata.extra.get("accent"), Some(&json!("warm")));
        let back = serde_json::to_value(&quiz).unwrap();
        assert_eq!(back["metadata"]["accent"], "warm");
    }

    #[test]
    fn validation_catches_structural_problems() {
        let mut quiz = trivia();
        quiz.questions[1].options.truncate(1);
        assert_eq!(quiz.validate(), Err(QuizError::TooFewOptions("q2".into())));

        let mut quiz = trivia();
        quiz.questions[0].options[1].id = "a".into();
        assert!(matches!(quiz.validate(), Err(QuizError::DuplicateOption { .. })));

        let mut quiz = personality();
        quiz.results[0].outcome = None;
        assert_eq!(quiz.validate(), Err(QuizError::MissingOutcome("r-cat".into())));

        let mut quiz = trivia();
        quiz.results[0].min_score = None;
        quiz.results[0].max_score = None;
        assert_eq!(quiz.validate(), Err(QuizError::MissingScoreRange("low".into())));
    }

    #[test]
    fn slugs() {
        assert!(is_valid_slug("which-pet-are-you"));
        assert!(is_valid_slug("top10"));
        assert!(!is_valid_slug("Bad-Slug"));
        assert!(!is_valid_slug("double--dash"));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug(""));
    }

    #[test]
    fn new_quiz_defaults_to_draft() {
        let quiz: NewQuiz = serde_json::from_value(json!({
            "slug": "capitals",
            "title": "Capitals",
            "quiz_data": serde_json::to_value(trivia()).unwrap()
        }))
        .unwrap();
        assert_eq!(quiz.status, QuizStatus::Draft);
        assert_eq!(quiz.validate(), Ok(()));
    }

    #[test]
    fn extreme_weights_saturate_instead_of_overflowing() {
        let data: QuizData = serde_json::from_value(json!({
            "metadata": { "title": "Extremes" },
            "questions": [
                { "id": "q1", "text": "One", "options": [
                    { "id": "a", "text": "Max", "weights": { "big": i64::MAX } },
                    { "id": "b", "text": "Min", "weights": { "small": i64::MIN } }
                ]},
                { "id": "q2", "text": "Two", "options": [
                    { "id": "a", "text": "Max", "weights": { "big": i64::MAX } },
                    { "id": "b", "text": "Min", "weights": { "small": i64::MIN } }
                ]}
            ],
            "results": [
                { "id": "r-small", "title": "Small", "outcome": "small" },
                { "id": "r-big", "title": "Big", "outcome": "big" }
            ]
        }))
        .unwrap();
        assert_eq!(data.validate(), Ok(()));

        let eval = data.evaluate(&answers(&[("q1", "a"), ("q2", "a")])).unwrap();
        assert_eq!(eval.result.id, "r-big");
        assert_eq!(eval.score, i64::MAX);

        let eval = data.evaluate(&answers(&[("q1", "b"), ("q2", "b")])).unwrap();
        assert_eq!(eval.result.id, "r-big");
        assert_eq!(eval.score, 0);
    }
}
