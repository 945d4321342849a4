use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use super::dto::{DailyFoodItem, DailyLogRequest, DailyLogResponse, ResetQuery, ResetResponse, UserQuery};
use super::repo;
use super::repo_types::NewLogEntry;
use super::services::{self, ResetScope};
use crate::{error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/daily-log", get(get_daily_log).post(add_daily_log))
        .route("/daily-log/reset", delete(reset_daily_log))
}

#[instrument(skip(state))]
pub async fn get_daily_log(
    State(state): State<AppState>,
    Query(q): Query<UserQuery>,
) -> Result<Json<DailyLogResponse>, AppError> {
    let user = services::normalize_user(&q.user)?;
    let log = services::day_log(&state.db, user, services::today()).await?;
    Ok(Json(log))
}

#[instrument(skip(state, payload))]
pub async fn add_daily_log(
    State(state): State<AppState>,
    Json(mut payload): Json<DailyLogRequest>,
) -> Result<(StatusCode, Json<DailyFoodItem>), AppError> {
    if let Err(e) = services::validate_entry(&mut payload) {
        warn!(error = %e, "log entry rejected");
        return Err(e);
    }

    let row = repo::insert_entry(
        &state.db,
        &NewLogEntry {
            user: &payload.user,
            food_name: &payload.food_name,
            macros: payload.macros(),
            logged_at: OffsetDateTime::now_utc(),
        },
    )
    .await?;

    info!(entry_id = %row.id, user = %row.user_name, food = %row.food_name, "log entry saved");
    Ok((StatusCode::CREATED, Json(row.into())))
}

/// Requires either `user` or an explicit `all=true`.
#[instrument(skip(state))]
pub async fn reset_daily_log(
    State(state): State<AppState>,
    Query(q): Query<ResetQuery>,
) -> Result<Json<ResetResponse>, AppError> {
    let scope = match (q.user.as_deref(), q.all) {
        (Some(user), _) => ResetScope::User(services::normalize_user(user)?),
        (None, true) => ResetScope::All,
        (None, false) => {
            warn!("unscoped reset refused");
            return Err(AppError::bad_request(
                "pass user=<name>, or all=true to clear every user",
            ));
        }
    };

    let deleted = services::reset(&state.db, &scope).await?;
    let scope = match scope {
        ResetScope::User(user) => user,
        ResetScope::All => "all".to_string(),
    };
    info!(%scope, deleted, "daily log reset");
    Ok(Json(ResetResponse { scope, deleted }))
}
