use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::dto::{ProfileRequest, ProfileResponse};
use super::{repo, services};
use crate::{error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/profile/", post(upsert_profile))
        .route("/profile/:name", get(get_profile))
}

#[instrument(skip(state, payload))]
pub async fn upsert_profile(
    State(state): State<AppState>,
    Json(mut payload): Json<ProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    if let Err(e) = services::validate(&mut payload) {
        warn!(error = %e, name = %payload.name, "profile rejected");
        return Err(e);
    }

    let row = services::save_profile(&state.db, &payload).await?;
    info!(profile_id = %row.id, name = %row.name, "profile saved");
    Ok(Json(row.into()))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ProfileResponse>, AppError> {
    let row = repo::find_by_name(&state.db, name.trim())
        .await?
        .ok_or_else(|| AppError::not_found("profile not found"))?;
    Ok(Json(row.into()))
}
