use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::{debug, instrument};

use super::catalog::BOLIVIAN_FOODS;
use super::services::{deficits, recommend, Suggestion};
use crate::{
    daily_log::{dto::UserQuery, repo as log_repo, repo_types::MacroTotals, services as log_services},
    error::AppError,
    profiles::{repo as profile_repo, requirements::Requirements},
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub user: String,
    pub requirements: Requirements,
    pub consumed: MacroTotals,
    pub deficit: MacroTotals,
    pub recommendations: Vec<Suggestion>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/recommendations", get(get_recommendations))
}

#[instrument(skip(state))]
pub async fn get_recommendations(
    State(state): State<AppState>,
    Query(q): Query<UserQuery>,
) -> Result<Json<RecommendationsResponse>, AppError> {
    let user = log_services::normalize_user(&q.user)?;
    let profile = profile_repo::find_by_name(&state.db, &user)
        .await?
        .ok_or_else(|| AppError::not_found("profile not found"))?;

    let requirements = profile.requirements();
    let consumed = log_repo::totals_for_day(&state.db, &user, log_services::today()).await?;
    let recommendations = recommend(
        &requirements,
        &consumed,
        &BOLIVIAN_FOODS,
        &mut rand::thread_rng(),
    );
    debug!(count = recommendations.len(), "recommendations picked");

    Ok(Json(RecommendationsResponse {
        user,
        requirements,
        consumed,
        deficit: deficits(&requirements, &consumed),
        recommendations,
    }))
}
