use axum::{extract::Path, routing::get, Json, Router};
use tracing::instrument;

use super::table::{self, FoodEntry};
use crate::{error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/foods", get(list_foods))
        .route("/foods/:name", get(get_food))
}

pub async fn list_foods() -> Json<&'static [FoodEntry]> {
    Json(table::all())
}

#[instrument]
pub async fn get_food(Path(name): Path<String>) -> Result<Json<FoodEntry>, AppError> {
    table::find(&name)
        .copied()
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("no macro data for '{}'", name)))
}
