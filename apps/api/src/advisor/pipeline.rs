use tracing::info;

use crate::advisor::models::CareerAdvice;
use crate::advisor::repository::insert_recommendation;
use crate::errors::AppError;
use crate::matching::scorer::score_careers;
use crate::roadmap::models::RoadmapRow;
use crate::roadmap::repository::replace_roadmaps;
use crate::state::AppState;
use crate::students::models::StudentRow;
use crate::students::repository::save_student;

/// Records `advice` on the student.
pub fn apply_advice(student: &mut StudentRow, advice: &CareerAdvice) {
    student.predicted_career = Some(advice.predicted_career.clone());
    student.target_career_id = Some(advice.target_career_id.clone());
    student.career_confidence = Some(advice.confidence);
    student.ai_recommendation = Some(advice.recommendation.clone());
}

/// Stores the advice on the student, generates a fresh personalized roadmap
/// that replaces any previous one, and snapshots the recommendation together
/// with the deterministic career matches.
pub async fn apply_career_pipeline(
    state: &AppState,
    mut student: StudentRow,
    advice: &CareerAdvice,
) -> Result<(StudentRow, RoadmapRow), AppError> {
    apply_advice(&mut student, advice);
    let student = save_student(&state.db, &student).await?;
    info!(
        "Student {} career set to {} ({})",
        student.student_code, advice.predicted_career, advice.target_career_id
    );

    let generated = state
        .roadmap_provider
        .personalized_roadmap(student.id, &advice.predicted_career)
        .await?;
    let roadmap = RoadmapRow::from_generated(
        student.id,
        generated,
        &advice.target_career_id,
        &advice.predicted_career,
        advice.confidence,
    );
    let roadmap = replace_roadmaps(&state.db, &roadmap).await?;
    info!(
        "Saved roadmap {} with {} stages for student {}",
        roadmap.id,
        roadmap.stages.0.len(),
        student.student_code
    );

    let matches = score_careers(&student.to_profile());
    insert_recommendation(
        &state.db,
        student.id,
        &advice.predicted_career,
        &advice.recommendation,
        &matches,
    )
    .await?;

    Ok((student, roadmap))
}
