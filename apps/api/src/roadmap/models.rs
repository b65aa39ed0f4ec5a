use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::llm_client::MODEL;
use crate::roadmap::progress::{compute_overall_progress, normalize_order_indices};

// ────────────────────────────────────────────────────────────────────────────
// Roadmap document
//
// The personalization service emits snake_case keys; stored documents and the
// HTTP API use camelCase. Every renamed field carries a snake_case alias so both
// shapes deserialize into the same types.
// ────────────────────────────────────────────────────────────────────────────

fn default_status() -> String {
    "not_assigned".to_string()
}

fn default_priority() -> i32 {
    999
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Personalization {
    /// One of already_mastered, high_priority, medium_priority, low_priority,
    /// optional, not_assigned.
    #[serde(default = "default_status")]
    pub status: String,
    /// 0 is the highest priority.
    #[serde(default = "default_priority")]
    pub priority: i32,
    #[serde(default, alias = "personalized_description")]
    pub personalized_description: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemProgress {
    #[serde(default, alias = "started_at")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "completed_at")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "progress_percentage")]
    pub progress_percentage: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredSkill {
    pub tag: String,
    #[serde(default, alias = "min_level")]
    pub min_level: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapItem {
    pub id: String,
    pub name: String,
    /// skill, concept, project or certification.
    #[serde(default, alias = "item_type")]
    pub item_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "skill_tags")]
    pub skill_tags: Vec<String>,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default, alias = "required_skills")]
    pub required_skills: Vec<RequiredSkill>,
    #[serde(default, alias = "estimated_hours")]
    pub estimated_hours: Option<f64>,
    #[serde(default, alias = "order_index")]
    pub order_index: Option<i32>,
    #[serde(default)]
    pub check: bool,
    #[serde(default)]
    pub personalization: Option<Personalization>,
    #[serde(default)]
    pub progress: Option<ItemProgress>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapArea {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "order_index")]
    pub order_index: Option<i32>,
    #[serde(default)]
    pub items: Vec<RoadmapItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapStage {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "order_index")]
    pub order_index: Option<i32>,
    #[serde(default, alias = "recommended_semesters")]
    pub recommended_semesters: Vec<i32>,
    #[serde(default)]
    pub areas: Vec<RoadmapArea>,
}

/// Roadmap as returned by the personalization service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedRoadmap {
    #[serde(default, alias = "career_id")]
    pub career_id: Option<String>,
    #[serde(default, alias = "career_name")]
    pub career_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stages: Vec<RoadmapStage>,
}

// ────────────────────────────────────────────────────────────────────────────
// Stored roadmap
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallProgress {
    pub total_items: u32,
    pub completed_items: u32,
    pub in_progress_items: u32,
    pub percentage_complete: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSource {
    pub model: String,
    /// clova-rag, manual or hybrid.
    pub generated_by: String,
    pub confidence: Option<f64>,
    pub api_version: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub career_id: String,
    pub career_name: String,
    pub description: Option<String>,
    pub stages: Json<Vec<RoadmapStage>>,
    pub overall_progress: Json<OverallProgress>,
    pub generation_source: Json<GenerationSource>,
    pub is_active: bool,
    pub generated_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RoadmapRow {
    /// Builds an active roadmap from a service payload. Missing career fields fall
    /// back to the student's predicted career, and progress is computed up front.
    pub fn from_generated(
        student_id: Uuid,
        generated: GeneratedRoadmap,
        career_id: &str,
        career_name: &str,
        confidence: f64,
    ) -> Self {
        let mut stages = generated.stages;
        normalize_order_indices(&mut stages);
        let overall_progress = compute_overall_progress(&stages);
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            student_id,
            career_id: generated.career_id.unwrap_or_else(|| career_id.to_string()),
            career_name: generated
                .career_name
                .unwrap_or_else(|| career_name.to_string()),
            description: Some(generated.description.unwrap_or_else(|| {
                format!("Personalized learning roadmap for {career_name}")
            })),
            stages: Json(stages),
            overall_progress: Json(overall_progress),
            generation_source: Json(GenerationSource {
                model: MODEL.to_string(),
                generated_by: "clova-rag".to_string(),
                confidence: Some(confidence),
                api_version: Some("v1".to_string()),
            }),
            is_active: true,
            generated_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapQuery {
    pub student_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgressRequest {
    pub student_id: Uuid,
    pub stage_idx: usize,
    pub area_idx: usize,
    pub item_idx: usize,
    pub checked: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgressResponse {
    pub success: bool,
    pub overall_progress: OverallProgress,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_service_payload_with_snake_case_keys() {
        let doc: GeneratedRoadmap = serde_json::from_value(json!({
            "career_id": "data_scientist",
            "career_name": "Data Scientist",
            "stages": [{
                "id": "stage_1",
                "name": "Foundations",
                "recommended_semesters": [1, 2],
                "areas": [{
                    "id": "python",
                    "name": "Python",
                    "items": [{
                        "id": "python_basics",
                        "name": "Python basics",
                        "item_type": "skill",
                        "skill_tags": ["python"],
                        "required_skills": [{"tag": "programming", "min_level": 2}],
                        "estimated_hours": 20,
                        "order_index": 3,
                        "check": true,
                        "personalization": {
                            "status": "already_mastered",
                            "priority": 5,
                            "personalized_description": "You already know this"
                        }
                    }]
                }]
            }]
        }))
        .unwrap();

        assert_eq!(doc.career_id.as_deref(), Some("data_scientist"));
        let stage = &doc.stages[0];
        assert_eq!(stage.recommended_semesters, vec![1, 2]);
        assert_eq!(stage.order_index, None);
        let item = &stage.areas[0].items[0];
        assert_eq!(item.item_type.as_deref(), Some("skill"));
        assert_eq!(item.required_skills[0].min_level, 2.0);
        assert_eq!(item.order_index, Some(3));
        assert!(item.check);
        let personalization = item.personalization.as_ref().unwrap();
        assert_eq!(personalization.status, "already_mastered");
        assert_eq!(
            personalization.personalized_description.as_deref(),
            Some("You already know this")
        );
    }

    #[test]
    fn test_from_generated_fills_defaults() {
        let generated: GeneratedRoadmap = serde_json::from_value(json!({
            "stages": [{"id": "s1", "name": "Basics", "areas": [
                {"id": "a1", "name": "Linux", "items": [
                    {"id": "i1", "name": "Shell", "check": true},
                    {"id": "i2", "name": "Networking"}
                ]}
            ]}]
        }))
        .unwrap();
        let student_id = Uuid::new_v4();

        let row = RoadmapRow::from_generated(
            student_id,
            generated,
            "cloud_architect",
            "Cloud Engineer",
            0.85,
        );

        assert_eq!(row.student_id, student_id);
        assert_eq!(row.career_id, "cloud_architect");
        assert_eq!(row.career_name, "Cloud Engineer");
        assert_eq!(
            row.description.as_deref(),
            Some("Personalized learning roadmap for Cloud Engineer")
        );
        assert_eq!(row.stages.0[0].order_index, Some(0));
        assert_eq!(row.overall_progress.0.percentage_complete, 50);
        assert_eq!(row.generation_source.0.model, "HCX-007");
        assert_eq!(row.generation_source.0.confidence, Some(0.85));
        assert!(row.is_active);
    }

    #[test]
    fn test_stored_items_serialize_camel_case() {
        let item: RoadmapItem = serde_json::from_value(json!({
            "id": "sql",
            "name": "SQL",
            "skillTags": ["sql"],
            "personalization": {}
        }))
        .unwrap();
        let personalization = item.personalization.as_ref().unwrap();
        assert_eq!(personalization.status, "not_assigned");
        assert_eq!(personalization.priority, 999);

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["skillTags"], json!(["sql"]));
        assert!(value.get("skill_tags").is_none());
        assert_eq!(value["check"], false);
    }
}
