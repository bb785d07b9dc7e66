use crate::repositories::quiz_repo::clear_quizzes;
use anyhow::{Context, Result};
use quizbox_shared::quiz::{NewQuiz, QuizStatus};
use serde_json::json;
use sqlx::PgPool;
use sqlx::types::Json;

/// The two sample quizzes the site ships with: one personality, one trivia.
pub fn sample_quizzes() -> Result<Vec<NewQuiz>> {
    let personality = json!({
        "metadata": {
            "title": "Which Dessert Matches Your Personality?",
            "description": "Six quick questions to find your sweet side.",
            "category": "personality",
            "estimated_minutes": 2
        },
        "theme": { "primary": "#f472b6", "background": "#fff7ed" },
        "questions": [
            { "id": "q1", "text": "Pick a weekend plan", "options": [
                { "id": "a", "text": "A long hike", "weights": { "sorbet": 2, "brownie": 0 } },
                { "id": "b", "text": "A cosy movie night", "weights": { "brownie": 2 } },
                { "id": "c", "text": "A dinner party", "weights": { "tiramisu": 2 } }
            ]},
            { "id": "q2", "text": "Your ideal holiday", "options": [
                { "id": "a", "text": "Beach", "weights": { "sorbet": 2 } },
                { "id": "b", "text": "Cabin in the woods", "weights": { "brownie": 2 } },
                { "id": "c", "text": "City break", "weights": { "tiramisu": 2 } }
            ]},
            { "id": "q3", "text": "Choose a colour", "options": [
                { "id": "a", "text": "Lemon yellow", "weights": { "sorbet": 1 } },
                { "id": "b", "text": "Chocolate brown", "weights": { "brownie": 1 } },
                { "id": "c", "text": "Espresso black", "weights": { "tiramisu": 1 } }
            ]}
        ],
        "results": [
            { "id": "r-sorbet", "outcome": "sorbet", "title": "Sorbet",
              "description": "Bright, fresh and always up for an adventure." },
            { "id": "r-brownie", "outcome": "brownie", "title": "Brownie",
              "description": "Warm, dependable and the heart of any gathering." },
            { "id": "r-tiramisu", "outcome": "tiramisu", "title": "Tiramisu",
              "description": "Sophisticated with a hidden kick." }
        ]
    });

    let trivia = json!({
        "metadata": {
            "title": "World Capitals Challenge",
            "description": "How well do you know your capitals?",
            "category": "geography",
            "estimated_minutes": 3
        },
        "questions": [
            { "id": "q1", "text": "What is the capital of Australia?", "options": [
                { "id": "a", "text": "Sydney", "correct": false },
                { "id": "b", "text": "Canberra", "correct": true },
                { "id": "c", "text": "Melbourne", "correct": false }
            ]},
            { "id": "q2", "text": "What is the capital of Canada?", "options": [
                { "id": "a", "text": "Ottawa", "correct": true },
                { "id": "b", "text": "Toronto", "correct": false },
                { "id": "c", "text": "Vancouver", "correct": false }
            ]},
            { "id": "q3", "text": "What is the capital of Brazil?", "options": [
                { "id": "a", "text": "Rio de Janeiro", "correct": false },
                { "id": "b", "text": "São Paulo", "correct": false },
                { "id": "c", "text": "Brasília", "correct": true }
            ]}
        ],
        "results": [
            { "id": "novice", "title": "Tourist", "min_score": 0, "max_score": 1,
              "description": "Time to dust off the atlas." },
            { "id": "traveller", "title": "Traveller", "min_score": 2, "max_score": 2,
              "description": "You know your way around." },
            { "id": "expert", "title": "Cartographer", "min_score": 3, "max_score": 3,
              "description": "Perfect score!" }
        ]
    });

    Ok(vec![
        NewQuiz {
            slug: "which-dessert-are-you".to_string(),
            title: "Which Dessert Matches Your Personality?".to_string(),
            status: QuizStatus::Published,
            quiz_data: serde_json::from_value(personality).context("Invalid personality sample")?,
        },
        NewQuiz {
            slug: "world-capitals-challenge".to_string(),
            title: "World Capitals Challenge".to_string(),
            status: QuizStatus::Published,
            quiz_data: serde_json::from_value(trivia).context("Invalid trivia sample")?,
        },
    ])
}

/// Replaces every quiz with the samples. Returns the inserted slugs.
pub async fn seed_quizzes(pool: &PgPool) -> Result<Vec<String>> {
    let quizzes = sample_quizzes()?;
    let mut tx = pool.begin().await.context("Failed to open seed transaction")?;

    let outcome: Result<Vec<String>> = async {
        let removed = clear_quizzes(&mut *tx).await?;
        tracing::info!("Removed {} existing quizzes", removed);

        let mut slugs = Vec::with_capacity(quizzes.len());
        for quiz in &quizzes {
            sqlx::query(
                "INSERT INTO quizzes (slug, title, quiz_data, status) VALUES ($1, $2, $3, $4)",
            )
            .bind(&quiz.slug)
            .bind(&quiz.title)
            .bind(Json(&quiz.quiz_data))
            .bind(quiz.status.as_str())
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to insert quiz {}", quiz.slug))?;
            slugs.push(quiz.slug.clone());
        }
        Ok(slugs)
    }
    .await;

    match outcome {
        Ok(slugs) => {
            tx.commit().await.context("Failed to commit seed")?;
            Ok(slugs)
        }
        Err(e) => {
            tx.rollback().await.context("Failed to roll back seed")?;
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizbox_shared::quiz::QuizKind;
    use std::collections::HashMap;

    #[test]
    fn samples_are_valid_and_cover_both_kinds() {
        let quizzes = sample_quizzes().unwrap();
        assert_eq!(quizzes.len(), 2);
        for quiz in &quizzes {
            assert_eq!(quiz.validate(), Ok(()), "{} failed validation", quiz.slug);
        }
        assert_eq!(quizzes[0].quiz_data.kind(), QuizKind::Personality);
        assert_eq!(quizzes[1].quiz_data.kind(), QuizKind::Trivia);
    }

    #[test]
    fn trivia_sample_perfect_score() {
        let quizzes = sample_quizzes().unwrap();
        let answers: HashMap<String, String> = [("q1", "b"), ("q2", "a"), ("q3", "c")]
            .iter()
            .map(|(q, o)| (q.to_string(), o.to_string()))
            .collect();
        let eval = quizzes[1].quiz_data.evaluate(&answers).unwrap();
        assert_eq!(eval.result.id, "expert");
    }
}
