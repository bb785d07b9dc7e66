use chrono::{DateTime, Utc};
use quizbox_shared::quiz::{QuizData, QuizStatus, QuizSummary};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;

/// A `quizzes` row as stored. `quiz_data` is whatever JSON the column holds.
#[derive(Debug, Clone, FromRow)]
pub struct QuizRow {
    pub id: i32,
    pub slug: String,
    pub title: String,
    pub quiz_data: Json<serde_json::Value>,
    pub status: String, // 'draft' | 'published'
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub id: i32,
    pub slug: String,
    pub title: String,
    pub quiz_data: QuizData,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<QuizRow> for Quiz {
    type Error = serde_json::Error;

    fn try_from(row: QuizRow) -> Result<Self, Self::Error> {
        Ok(Self {
            quiz_data: serde_json::from_value(row.quiz_data.0)?,
            id: row.id,
            slug: row.slug,
            title: row.title,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl Quiz {
    pub fn status(&self) -> QuizStatus {
        self.status.parse().unwrap_or_default()
    }

    pub fn summary(&self) -> QuizSummary {
        QuizSummary {
            slug: self.slug.clone(),
            title: self.title.clone(),
            status: self.status(),
            kind: self.quiz_data.kind(),
            question_count: self.quiz_data.questions.len(),
        }
    }
}

/// Decodes a listing, dropping rows whose `quiz_data` no longer parses.
pub fn decode_listing(rows: Vec<QuizRow>) -> Vec<Quiz> {
    rows.into_iter()
        .filter_map(|row| {
            let slug = row.slug.clone();
            match Quiz::try_from(row) {
                Ok(quiz) => Some(quiz),
                Err(e) => {
                    tracing::warn!("Skipping quiz '{}' with unreadable quiz_data: {}", slug, e);
                    None
                }
            }
        })
        .collect()
}

#[derive(Debug, Clone, FromRow)]
pub struct UpsertedQuizRow {
    #[sqlx(flatten)]
    pub row: QuizRow,
    pub inserted: bool,
}

#[derive(Debug, Clone)]
pub struct UpsertedQuiz {
    pub quiz: Quiz,
    pub inserted: bool,
}
