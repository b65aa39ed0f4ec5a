use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::advisor::models::{
    AdvisorProfile, CareerAdvice, PredictRequest, PredictResponse, RecommendationRequest,
    RecommendationResponse, RecommendationRow, RegenerateResponse, SaveRecommendationRequest,
};
use crate::advisor::pipeline::apply_career_pipeline;
use crate::advisor::repository::{insert_recommendation, latest_recommendation};
use crate::advisor::service::{advise, job_file_for_career};
use crate::errors::AppError;
use crate::matching::scorer::score_careers;
use crate::state::AppState;
use crate::students::handlers::load_student;

fn require_it_skills(it_skills: &[String]) -> Result<(), AppError> {
    if it_skills.iter().all(|s| s.trim().is_empty()) {
        return Err(AppError::Validation(
            "At least one IT skill is required".to_string(),
        ));
    }
    Ok(())
}

/// POST /api/v1/advisor/preview
///
/// Runs prediction and narrative without persisting anything.
pub async fn handle_preview(
    State(state): State<AppState>,
    Json(profile): Json<AdvisorProfile>,
) -> Result<Json<CareerAdvice>, AppError> {
    require_it_skills(&profile.it_skills)?;
    let advice = advise(state.advisor.as_ref(), &profile).await?;
    Ok(Json(advice))
}

/// POST /api/v1/advisor/predict
pub async fn handle_predict(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, AppError> {
    require_it_skills(&req.it_skills)?;
    let predicted_career = state
        .advisor
        .predict_career(&req.it_skills, &req.soft_skills)
        .await?;
    Ok(Json(PredictResponse {
        target_career_id: job_file_for_career(&predicted_career).to_string(),
        predicted_career,
    }))
}

/// POST /api/v1/advisor/recommendation
pub async fn handle_recommendation(
    State(state): State<AppState>,
    Json(req): Json<RecommendationRequest>,
) -> Result<Json<RecommendationResponse>, AppError> {
    if req.predicted_career.trim().is_empty() {
        return Err(AppError::Validation("predictedCareer is required".to_string()));
    }
    let recommendation = state
        .advisor
        .recommend(&req.student, &req.predicted_career)
        .await?;
    Ok(Json(RecommendationResponse { recommendation }))
}

/// POST /api/v1/students/:id/regenerate-roadmap
///
/// Re-predicts the career from the stored skills and rebuilds the roadmap.
pub async fn handle_regenerate_roadmap(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RegenerateResponse>, AppError> {
    let student = load_student(&state, id).await?;
    info!("Regenerating career and roadmap for student {}", student.student_code);

    let advice = advise(state.advisor.as_ref(), &AdvisorProfile::from(&student)).await?;
    let (_, roadmap) = apply_career_pipeline(&state, student, &advice).await?;

    Ok(Json(RegenerateResponse {
        success: true,
        career: advice,
        roadmap,
    }))
}

/// GET /api/v1/students/:id/recommendations/latest
pub async fn handle_latest_recommendation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RecommendationRow>, AppError> {
    let recommendation = latest_recommendation(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No recommendation for student {id}")))?;
    Ok(Json(recommendation))
}

/// POST /api/v1/students/:id/recommendations
///
/// Snapshots the student's current career and narrative (or the provided
/// overrides) with freshly computed matches.
pub async fn handle_save_recommendation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SaveRecommendationRequest>,
) -> Result<(StatusCode, Json<RecommendationRow>), AppError> {
    let student = load_student(&state, id).await?;

    let predicted_career = req
        .predicted_career
        .or_else(|| student.predicted_career.clone())
        .ok_or_else(|| {
            AppError::UnprocessableEntity("Student has no predicted career yet".to_string())
        })?;
    let narrative = req
        .narrative
        .or_else(|| student.ai_recommendation.clone())
        .unwrap_or_default();

    let matches = score_careers(&student.to_profile());
    let row =
        insert_recommendation(&state.db, id, &predicted_career, &narrative, &matches).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_it_skills() {
        assert!(require_it_skills(&[]).is_err());
        assert!(require_it_skills(&[" ".to_string()]).is_err());
        assert!(require_it_skills(&["Go".to_string()]).is_ok());
    }
}
