use axum::http::HeaderMap;
use crate::AppState;
use crate::error::ApiError;

fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// Admin routes require `Authorization: Bearer <ADMIN_TOKEN>`.
pub fn authorize_admin(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let expected = state
        .config
        .admin_token
        .as_deref()
        .ok_or(ApiError::AdminDisabled)?;

    let token = extract_bearer_token(headers).ok_or(ApiError::Unauthorized)?;
    if token.trim().is_empty() || token.trim() != expected {
        return Err(ApiError::Unauthorized);
    }
    Ok(())
}
