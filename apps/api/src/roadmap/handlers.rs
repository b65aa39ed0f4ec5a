use axum::{
    extract::{Path, Query, State},
    Json,
};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::roadmap::models::{
    OverallProgress, RoadmapQuery, RoadmapRow, UpdateProgressRequest, UpdateProgressResponse,
};
use crate::roadmap::progress::{compute_overall_progress, set_item_check};
use crate::roadmap::repository::{
    find_active_roadmap, find_roadmap, lock_active_roadmap, update_stages,
};
use crate::state::AppState;

/// GET /api/v1/roadmaps?studentId=
pub async fn handle_get_active_roadmap(
    State(state): State<AppState>,
    Query(params): Query<RoadmapQuery>,
) -> Result<Json<RoadmapRow>, AppError> {
    let roadmap = find_active_roadmap(&state.db, params.student_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("No roadmap for student {}", params.student_id))
        })?;
    Ok(Json(roadmap))
}

/// GET /api/v1/roadmaps/:id
pub async fn handle_get_roadmap(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RoadmapRow>, AppError> {
    let roadmap = find_roadmap(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Roadmap {id} not found")))?;
    Ok(Json(roadmap))
}

/// PATCH /api/v1/roadmaps/progress
///
/// Toggles one item on the student's active roadmap and recomputes overall progress.
pub async fn handle_update_progress(
    State(state): State<AppState>,
    Json(req): Json<UpdateProgressRequest>,
) -> Result<Json<UpdateProgressResponse>, AppError> {
    let (roadmap_id, overall_progress) = apply_progress_update(&state.db, &req).await?;

    info!(
        "Roadmap {} item [{}][{}][{}] checked={} ({}% complete)",
        roadmap_id,
        req.stage_idx,
        req.area_idx,
        req.item_idx,
        req.checked,
        overall_progress.percentage_complete
    );

    Ok(Json(UpdateProgressResponse {
        success: true,
        overall_progress,
    }))
}

/// Read-modify-write of the stages document under a row lock.
pub(crate) async fn apply_progress_update(
    db: &PgPool,
    req: &UpdateProgressRequest,
) -> Result<(Uuid, OverallProgress), AppError> {
    let mut tx = db.begin().await?;

    let mut roadmap = lock_active_roadmap(&mut *tx, req.student_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Roadmap not found".to_string()))?;

    set_item_check(
        &mut roadmap.stages.0,
        req.stage_idx,
        req.area_idx,
        req.item_idx,
        req.checked,
    )
    .map_err(AppError::Validation)?;

    let overall_progress = compute_overall_progress(&roadmap.stages.0);
    let written =
        update_stages(&mut *tx, roadmap.id, &roadmap.stages.0, overall_progress).await?;
    ensure_written(written, roadmap.id)?;

    tx.commit().await?;
    Ok((roadmap.id, overall_progress))
}

fn ensure_written(rows: u64, roadmap_id: Uuid) -> Result<(), AppError> {
    if rows == 0 {
        return Err(AppError::NotFound(format!("Roadmap {roadmap_id} not found")));
    }
    Ok(())
}
