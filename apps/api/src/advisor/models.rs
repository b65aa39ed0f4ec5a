use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::matching::scorer::CareerMatch;
use crate::roadmap::models::RoadmapRow;
use crate::students::models::StudentRow;

/// The slice of a student the advisor prompts need.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorProfile {
    pub full_name: String,
    #[serde(default)]
    pub it_skills: Vec<String>,
    #[serde(default)]
    pub soft_skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    pub current_semester: Option<i32>,
    pub gpa: Option<f64>,
}

impl From<&StudentRow> for AdvisorProfile {
    fn from(student: &StudentRow) -> Self {
        Self {
            full_name: student.full_name.clone(),
            it_skills: student.it_skills.clone(),
            soft_skills: student.soft_skills.clone(),
            interests: student.interests.clone(),
            current_semester: student.current_semester,
            gpa: student.gpa,
        }
    }
}

/// Result of one advisor run: predicted career plus its narrative.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerAdvice {
    pub predicted_career: String,
    pub target_career_id: String,
    pub confidence: f64,
    pub recommendation: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictRequest {
    #[serde(default)]
    pub it_skills: Vec<String>,
    #[serde(default)]
    pub soft_skills: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    pub predicted_career: String,
    pub target_career_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub student: AdvisorProfile,
    pub predicted_career: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub recommendation: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateResponse {
    pub success: bool,
    pub career: CareerAdvice,
    pub roadmap: RoadmapRow,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub predicted_career: String,
    pub narrative: String,
    pub career_matches: Json<Vec<CareerMatch>>,
    pub created_at: DateTime<Utc>,
}

/// Manually recorded snapshot; matches are recomputed from the stored profile.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecommendationRequest {
    pub predicted_career: Option<String>,
    pub narrative: Option<String>,
}
