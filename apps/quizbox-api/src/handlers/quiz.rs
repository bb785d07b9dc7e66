use crate::AppState;
use crate::error::{ApiError, ApiResult};
use axum::{
    Json,
    extract::{Path, State},
};
use quizbox_db::models::quiz::Quiz;
use quizbox_shared::api::ListResponse;
use quizbox_shared::quiz::{EvaluateRequest, EvaluateResponse, QuizSummary};

pub async fn list_quizzes(State(state): State<AppState>) -> ApiResult<Json<ListResponse<QuizSummary>>> {
    let quizzes = state.quizzes.list_published().await?;
    let summaries: Vec<QuizSummary> = quizzes.iter().map(Quiz::summary).collect();
    Ok(Json(summaries.into()))
}

async fn published(state: &AppState, slug: &str) -> ApiResult<Quiz> {
    state
        .quizzes
        .get_published(slug)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("quiz '{}'", slug)))
}

pub async fn get_quiz(State(state): State<AppState>, Path(slug): Path<String>) -> ApiResult<Json<Quiz>> {
    Ok(Json(published(&state, &slug).await?))
}

pub async fn evaluate_quiz(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(req): Json<EvaluateRequest>,
) -> ApiResult<Json<EvaluateResponse>> {
    let quiz = published(&state, &slug).await?;
    let evaluation = quiz.quiz_data.evaluate(&req.answers)?;
    Ok(Json(evaluation.into()))
}
