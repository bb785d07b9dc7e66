use crate::AppState;
use crate::auth::authorize_admin;
use crate::error::{ApiError, ApiResult};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};
use quizbox_db::models::quiz::Quiz;
use quizbox_shared::api::ListResponse;
use quizbox_shared::quiz::NewQuiz;

/// Every quiz, drafts included.
pub async fn list_all_quizzes(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<ListResponse<Quiz>>> {
    authorize_admin(&state, &headers)?;
    let quizzes = state.quizzes.list_all().await?;
    Ok(Json(quizzes.into()))
}

pub async fn upsert_quiz(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(quiz): Json<NewQuiz>,
) -> ApiResult<(StatusCode, Json<Quiz>)> {
    authorize_admin(&state, &headers)?;
    quiz.validate()?;

    let saved = state.quizzes.upsert(&quiz).await?;
    let status = if saved.inserted {
        tracing::info!("Created quiz '{}' ({})", saved.quiz.slug, saved.quiz.status);
        StatusCode::CREATED
    } else {
        tracing::info!("Updated quiz '{}' ({})", saved.quiz.slug, saved.quiz.status);
        StatusCode::OK
    };
    Ok((status, Json(saved.quiz)))
}

pub async fn delete_quiz(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> ApiResult<StatusCode> {
    authorize_admin(&state, &headers)?;

    if state.quizzes.delete(&slug).await? {
        tracing::info!("Deleted quiz '{}'", slug);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("quiz '{}'", slug)))
    }
}
