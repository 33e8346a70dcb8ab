use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use crate::{auth::services::AuthUser, photos::repo::Photo, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/photos", post(upload_photos))
        .route("/photos/:id", get(get_photo).delete(delete_photo))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

fn photo_key(user_id: Uuid, photo_id: Uuid) -> String {
    format!("users/{}/photos/{}", user_id, photo_id)
}

#[derive(Debug, Serialize)]
pub struct UploadedPhotosResponse {
    pub photo_ids: Vec<Uuid>,
}

/// POST /photos (multipart, field `files`/`files[]`).
#[instrument(skip(state, mp))]
pub async fn upload_photos(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    mut mp: Multipart,
) -> Result<(StatusCode, Json<UploadedPhotosResponse>), (StatusCode, String)> {
    let mut files: Vec<(Bytes, String)> = Vec::new();
    while let Ok(Some(field)) = mp.next_field().await {
        if !matches!(field.name(), Some("files") | Some("files[]")) {
            continue;
        }
        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".into());
        let data = field.bytes().await.map_err(internal)?;
        files.push((data, content_type));
    }
    if files.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "files[] is required".into()));
    }

    let mut photo_ids = Vec::with_capacity(files.len());
    for (body, content_type) in files {
        let photo_id = Uuid::new_v4();
        let key = photo_key(user_id, photo_id);
        state
            .storage
            .put_object(&key, body, &content_type)
            .await
            .map_err(internal)?;
        Photo::insert(&state.db, photo_id, user_id, &key, &content_type)
            .await
            .map_err(internal)?;
        photo_ids.push(photo_id);
    }

    Ok((
        StatusCode::CREATED,
        Json(UploadedPhotosResponse { photo_ids }),
    ))
}

/// 302 to a presigned URL for the stored object.
#[instrument(skip(state))]
pub async fn get_photo(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let photo = Photo::find_by_id(&state.db, user_id, id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "Photo not found".to_string()))?;

    let url = state
        .storage
        .presign_get(&photo.s3_key, 600)
        .await
        .map_err(internal)?;

    Ok(Redirect::temporary(&url))
}

#[instrument(skip(state))]
pub async fn delete_photo(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let photo = Photo::find_by_id(&state.db, user_id, id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "Photo not found".to_string()))?;

    state
        .storage
        .delete_object(&photo.s3_key)
        .await
        .map_err(internal)?;
    Photo::delete(&state.db, user_id, id).await.map_err(internal)?;

    Ok(StatusCode::NO_CONTENT)
}
