mod dto;
pub mod handlers;
pub mod stats;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
