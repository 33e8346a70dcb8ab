use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::services::AuthUser,
    state::AppState,
    workouts::{
        dto::{
            CreateWorkoutRequest, CreatedWorkoutResponse, Pagination, WorkoutDetails,
            WorkoutListItem,
        },
        repo::Workout,
    },
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/workouts", get(list_workouts).post(create_workout))
        .route("/workouts/:id", get(get_workout).delete(delete_workout))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

#[instrument(skip(state, payload))]
pub async fn create_workout(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateWorkoutRequest>,
) -> Result<(StatusCode, HeaderMap, Json<CreatedWorkoutResponse>), (StatusCode, String)> {
    payload
        .validate()
        .map_err(|msg| (StatusCode::BAD_REQUEST, msg))?;

    let workout = Workout::create(&state.db, user_id, &payload)
        .await
        .map_err(internal)?;

    let mut headers = HeaderMap::new();
    if let Ok(location) = format!("/api/v1/workouts/{}", workout.id).parse() {
        headers.insert(axum::http::header::LOCATION, location);
    }

    Ok((
        StatusCode::CREATED,
        headers,
        Json(CreatedWorkoutResponse {
            id: workout.id,
            created_at: workout.created_at,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn list_workouts(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<WorkoutListItem>>, (StatusCode, String)> {
    let workouts = Workout::list_by_user(&state.db, user_id, p.limit, p.offset)
        .await
        .map_err(internal)?;
    Ok(Json(workouts.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state))]
pub async fn get_workout(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<WorkoutDetails>, (StatusCode, String)> {
    let detail = Workout::get_detail(&state.db, user_id, id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "Workout not found".to_string()))?;
    Ok(Json(detail.into()))
}

#[instrument(skip(state))]
pub async fn delete_workout(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let deleted = Workout::delete(&state.db, user_id, id)
        .await
        .map_err(internal)?;
    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Workout not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}
