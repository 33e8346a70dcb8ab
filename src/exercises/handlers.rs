use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::services::AuthUser,
    exercises::{
        dto::{CreateExerciseRequest, ExerciseResponse},
        repo::Exercise,
    },
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/exercises", get(list_exercises).post(create_exercise))
        .route(
            "/exercises/:id",
            get(get_exercise).delete(delete_exercise),
        )
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

#[instrument(skip(state, payload))]
pub async fn create_exercise(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateExerciseRequest>,
) -> Result<(StatusCode, Json<ExerciseResponse>), (StatusCode, String)> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "name must not be empty".into()));
    }
    let category = payload.category.trim();
    if category.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "category must not be empty".into()));
    }

    let exercise = Exercise::create(&state.db, user_id, name, category)
        .await
        .map_err(internal)?;
    Ok((StatusCode::CREATED, Json(exercise.into())))
}

#[instrument(skip(state))]
pub async fn list_exercises(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<ExerciseResponse>>, (StatusCode, String)> {
    let exercises = Exercise::list_by_user(&state.db, user_id)
        .await
        .map_err(internal)?;
    Ok(Json(exercises.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state))]
pub async fn get_exercise(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ExerciseResponse>, (StatusCode, String)> {
    let exercise = Exercise::find_by_id(&state.db, user_id, id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "Exercise not found".to_string()))?;
    Ok(Json(exercise.into()))
}

#[instrument(skip(state))]
pub async fn delete_exercise(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let deleted = Exercise::delete(&state.db, user_id, id)
        .await
        .map_err(internal)?;
    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Exercise not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}
