use std::collections::HashMap;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use time::OffsetDateTime;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::services::AuthUser,
    exercises::repo::Exercise,
    profile::{dto::ProfileStatsResponse, stats::compute_profile_stats},
    state::AppState,
    workouts::repo::Workout,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/profile/stats", get(get_profile_stats))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

#[instrument(skip(state))]
pub async fn get_profile_stats(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProfileStatsResponse>, (StatusCode, String)> {
    let history = Workout::list_full_history(&state.db, user_id)
        .await
        .map_err(internal)?;

    let exercise_index: HashMap<Uuid, Exercise> = Exercise::list_by_user(&state.db, user_id)
        .await
        .map_err(internal)?
        .into_iter()
        .map(|e| (e.id, e))
        .collect();

    // Single clock read per request; the whole computation sees one "today".
    let today = OffsetDateTime::now_utc().date();
    let stats = compute_profile_stats(&history, &exercise_index, today);

    Ok(Json(ProfileStatsResponse::from_stats(user_id, stats)))
}
