//! Axum route handlers for the Career Matching API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::catalog::{career_catalog, find_career, CareerProfile};
use crate::matching::profile::StudentProfile;
use crate::matching::scorer::{score_careers, CareerMatch};
use crate::state::AppState;
use crate::students::handlers::load_student;

#[derive(Debug, Serialize)]
pub struct CareerListResponse {
    pub careers: &'static [CareerProfile],
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub matches: Vec<CareerMatch>,
}

/// GET /api/v1/careers
pub async fn handle_list_careers() -> Json<CareerListResponse> {
    Json(CareerListResponse {
        careers: career_catalog(),
    })
}

/// GET /api/v1/careers/:id
pub async fn handle_get_career(
    Path(id): Path<String>,
) -> Result<Json<&'static CareerProfile>, AppError> {
    find_career(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Career {id} not found")))
}

/// POST /api/v1/careers/match
///
/// Scores the submitted profile against every known career and returns the top matches.
pub async fn handle_match_careers(
    Json(profile): Json<StudentProfile>,
) -> Result<Json<MatchResponse>, AppError> {
    profile.validate().map_err(AppError::Validation)?;

    let matches = score_careers(&profile);
    debug!(
        "Scored profile: top match {:?}",
        matches.first().map(|m| (&m.career, m.match_score))
    );

    Ok(Json(MatchResponse { matches }))
}

/// GET /api/v1/students/:id/career-matches
///
/// Scores the stored profile. Out-of-range stored values are clamped, not rejected.
pub async fn handle_student_career_matches(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MatchResponse>, AppError> {
    let student = load_student(&state, id).await?;
    let matches = score_careers(&student.to_profile());
    Ok(Json(MatchResponse { matches }))
}
