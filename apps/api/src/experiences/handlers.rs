use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::experience::{ExperiencePage, ExperiencePatch, ExperienceRecord, NewExperience};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ListQuery {
    pub user_id: Uuid,
    pub cursor: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

/// GET /api/v1/experiences
pub async fn handle_list_experiences(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<ExperiencePage>, AppError> {
    let limit = params.limit.unwrap_or(state.config.page_size);
    let page = state
        .experiences
        .list_page(params.user_id, params.cursor, limit)
        .await?;
    Ok(Json(page))
}

/// POST /api/v1/experiences
pub async fn handle_create_experience(
    State(state): State<AppState>,
    Json(req): Json<NewExperience>,
) -> Result<(StatusCode, Json<ExperienceRecord>), AppError> {
    if req.user_id.is_nil() {
        return Err(AppError::Validation("user_id is required".to_string()));
    }
    if req.activity_name.trim().is_empty() && req.story_title.trim().is_empty() {
        return Err(AppError::Validation(
            "activity_name or story_title is required".to_string(),
        ));
    }
    let record = state.experiences.create(req).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// PATCH /api/v1/experiences/:id
pub async fn handle_update_experience(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ExperiencePatch>,
) -> Result<Json<ExperienceRecord>, AppError> {
    let record = state.experiences.update(id, patch).await?;
    Ok(Json(record))
}

/// DELETE /api/v1/experiences/:id
pub async fn handle_delete_experience(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    state.experiences.soft_delete(id, params.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
