use sqlx::{PgExecutor, PgPool};
use sqlx::types::Json;
use anyhow::{Context, Result};
use quizbox_shared::quiz::NewQuiz;
use crate::models::quiz::{Quiz, QuizRow, UpsertedQuiz, UpsertedQuizRow, decode_listing};

#[derive(Debug, Clone)]
pub struct QuizRepository {
    pool: PgPool,
}

/// Removes every quiz through `executor`, so callers can run it inside their own transaction.
pub async fn clear_quizzes<'e, E: PgExecutor<'e>>(executor: E) -> Result<u64> {
    let result = sqlx::query("DELETE FROM quizzes")
        .execute(executor)
        .await
        .context("Failed to clear quizzes")?;

    Ok(result.rows_affected())
}

fn decode_one(row: Option<QuizRow>, slug: &str) -> Result<Option<Quiz>> {
    row.map(Quiz::try_from)
        .transpose()
        .with_context(|| format!("Stored quiz_data for '{}' is unreadable", slug))
}

impl QuizRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_published(&self) -> Result<Vec<Quiz>> {
        let rows = sqlx::query_as::<_, QuizRow>(
            r#"
            SELECT id, slug, title, quiz_data, status, created_at, updated_at
            FROM quizzes
            WHERE status = 'published'
            ORDER BY created_at DESC, id DESC
            "#
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list published quizzes")?;

        Ok(decode_listing(rows))
    }

    pub async fn list_all(&self) -> Result<Vec<Quiz>> {
        let rows = sqlx::query_as::<_, QuizRow>(
            r#"
            SELECT id, slug, title, quiz_data, status, created_at, updated_at
            FROM quizzes
            ORDER BY updated_at DESC, id DESC
            "#
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list quizzes")?;

        Ok(decode_listing(rows))
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Quiz>> {
        let row = sqlx::query_as::<_, QuizRow>(
            r#"
            SELECT id, slug, title, quiz_data, status, created_at, updated_at
            FROM quizzes
            WHERE slug = $1
            "#
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch quiz by slug")?;

        decode_one(row, slug)
    }

    pub async fn get_published(&self, slug: &str) -> Result<Option<Quiz>> {
        let row = sqlx::query_as::<_, QuizRow>(
            r#"
            SELECT id, slug, title, quiz_data, status, created_at, updated_at
            FROM quizzes
            WHERE slug = $1 AND status = 'published'
            "#
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch published quiz")?;

        decode_one(row, slug)
    }

    /// Inserts or replaces the quiz with the same slug. `inserted` is false on update.
    pub async fn upsert(&self, quiz: &NewQuiz) -> Result<UpsertedQuiz> {
        let saved = sqlx::query_as::<_, UpsertedQuizRow>(
            r#"
            INSERT INTO quizzes (slug, title, quiz_data, status)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (slug) DO UPDATE
            SET title = EXCLUDED.title,
                quiz_data = EXCLUDED.quiz_data,
                status = EXCLUDED.status,
                updated_at = NOW()
            RETURNING id, slug, title, quiz_data, status, created_at, updated_at, (xmax = 0) AS inserted
            "#
        )
        .bind(&quiz.slug)
        .bind(quiz.title.trim())
        .bind(Json(&quiz.quiz_data))
        .bind(quiz.status.as_str())
        .fetch_one(&self.pool)
        .await
        .context("Failed to upsert quiz")?;

        Ok(UpsertedQuiz {
            quiz: Quiz::try_from(saved.row).context("Saved quiz_data did not decode")?,
            inserted: saved.inserted,
        })
    }

    pub async fn delete(&self, slug: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM quizzes WHERE slug = $1")
            .bind(slug)
            .execute(&self.pool)
            .await
            .context("Failed to delete quiz")?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes every quiz. Returns how many were removed.
    pub async fn delete_all(&self) -> Result<u64> {
        clear_quizzes(&self.pool).await
    }
}
