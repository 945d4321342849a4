pub mod handlers;
pub mod table;

use crate::state::AppState;
use axum::Router;

pub use table::{lookup, MacroFacts};

pub fn router() -> Router<AppState> {
    handlers::routes()
}
