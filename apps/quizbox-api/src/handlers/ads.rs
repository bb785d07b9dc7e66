use crate::AppState;
use crate::auth::authorize_admin;
use crate::error::{ApiError, ApiResult};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
};
use quizbox_db::models::ad::Ad;
use quizbox_shared::ads::{AdStatus, NewAd};
use quizbox_shared::api::ListResponse;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct AdsQuery {
    pub slot: Option<String>,
    /// `active` (default), `inactive` or `all`. Anything but `active` needs the admin token.
    pub status: Option<String>,
}

impl AdsQuery {
    fn status_filter(&self) -> Result<Option<AdStatus>, ApiError> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") => Ok(Some(AdStatus::Active)),
            Some("all") => Ok(None),
            Some(other) => Ok(Some(other.parse()?)),
        }
    }
}

pub async fn list_ads(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<AdsQuery>,
) -> ApiResult<Json<ListResponse<Ad>>> {
    let status = query.status_filter()?;
    if status != Some(AdStatus::Active) {
        authorize_admin(&state, &headers)?;
    }

    let slot = query.slot.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let ads = state.ads.list(slot, status).await?;
    Ok(Json(ads.into()))
}

pub async fn create_ad(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(ad): Json<NewAd>,
) -> ApiResult<(StatusCode, Json<Ad>)> {
    authorize_admin(&state, &headers)?;
    ad.validate()?;

    let created = state.ads.create(&ad).await?;
    tracing::info!("Created ad {} '{}' in slot {}", created.id, created.name, created.slot);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_ad(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<Json<Ad>> {
    state
        .ads
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("ad {}", id)))
}

pub async fn delete_ad(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    authorize_admin(&state, &headers)?;

    if state.ads.delete(id).await? {
        tracing::info!("Deleted ad {}", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("ad {}", id)))
    }
}

pub async fn record_impression(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    if state.ads.record_impression(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("ad {}", id)))
    }
}

pub async fn record_click(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<StatusCode> {
    if state.ads.record_click(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("ad {}", id)))
    }
}
