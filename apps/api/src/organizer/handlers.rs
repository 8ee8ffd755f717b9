use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::organizer::organize;
use crate::organizer::session::{ExpandState, GroupKey, ViewMode, ViewState};
use crate::organizer::sort::SortOrder;
use crate::organizer::StoryView;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OrganizeRequest {
    pub user_id: Uuid,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub mode: ViewMode,
    #[serde(default)]
    pub sort: SortOrder,
    /// Groups the client currently shows collapsed. Everything else is expanded.
    #[serde(default)]
    pub collapsed: Vec<GroupKey>,
    pub cursor: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Serialize)]
struct OrganizeResponse<'a> {
    view: StoryView<'a>,
    next_cursor: Option<i64>,
    has_more: bool,
}

/// POST /api/v1/stories/organize
///
/// Loads one page of the user's records and arranges its stories for the
/// requested view. Later pages are organized independently; the client appends.
pub async fn handle_organize(
    State(state): State<AppState>,
    Json(req): Json<OrganizeRequest>,
) -> Result<Json<Value>, AppError> {
    let limit = req.limit.unwrap_or(state.config.page_size);
    let page = state
        .experiences
        .list_page(req.user_id, req.cursor, limit)
        .await?;

    let view_state = ViewState {
        query: req.query,
        mode: req.mode,
        sort: req.sort,
        expand: ExpandState::with_collapsed(req.collapsed),
    };
    let view = organize(&page.records, &view_state);
    debug!(
        "Organized {} of {} records for user {} ({:?})",
        view.record_count(),
        page.records.len(),
        req.user_id,
        view_state.mode
    );

    let body = serde_json::to_value(OrganizeResponse {
        view,
        next_cursor: page.next_cursor,
        has_more: page.has_more,
    })
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize story view: {e}")))?;
    Ok(Json(body))
}
